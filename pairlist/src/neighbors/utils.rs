use std::collections::BTreeMap;

use ndarray::Array1;

/// Count the number of neighbors of each center atom, given the `first`
/// (center) atom of all pairs in a neighbor list.
///
/// If `sorted` is true, the pairs are expected to be sorted by center atom,
/// and this counts the length of each run of identical consecutive centers.
/// Otherwise, this counts the pairs for each unique center, in increasing
/// order of center index.
///
/// Atoms without any neighbor do not appear in the output.
pub fn count_neighbors(first: &Array1<usize>, sorted: bool) -> Vec<usize> {
    if sorted {
        let mut counts = Vec::new();
        let mut previous = None;
        for &center in first {
            if previous == Some(center) {
                if let Some(last) = counts.last_mut() {
                    *last += 1;
                }
            } else {
                counts.push(1);
                previous = Some(center);
            }
        }
        return counts;
    }

    let mut counts = BTreeMap::new();
    for &center in first {
        *counts.entry(center).or_insert(0) += 1;
    }
    return counts.into_values().collect();
}

/// Indexes of all the triples of atoms `(i, j, k)` such that `j` and `k` are
/// both neighbors of `i`.
///
/// The triples are stored as indexes into the pairs of a neighbor list:
/// `second[first_pair[t]]` is the `j` atom of triple `t`, `second[second_pair[t]]`
/// is the `k` atom, and the corresponding pair vectors give `Rij` and `Rik`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomTriples {
    /// center atom `i` of each triple
    pub centers: Array1<usize>,
    /// index of the `i-j` pair of each triple
    pub first_pair: Array1<usize>,
    /// index of the `i-k` pair of each triple
    pub second_pair: Array1<usize>,
}

impl AtomTriples {
    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Are there any triples?
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

/// Build all triples of atoms from a neighbor list sorted by center atom,
/// given the `first` (center) atom of all pairs.
///
/// For each center, all the unordered combinations of two different pairs
/// around this center are included once, with `first_pair < second_pair`.
pub fn atom_triples(first: &Array1<usize>) -> AtomTriples {
    let mut centers = Vec::new();
    let mut first_pair = Vec::new();
    let mut second_pair = Vec::new();

    let mut start = 0;
    for count in count_neighbors(first, true) {
        let center = first[start];
        for j in start..(start + count) {
            for k in (j + 1)..(start + count) {
                centers.push(center);
                first_pair.push(j);
                second_pair.push(k);
            }
        }
        start += count;
    }

    return AtomTriples {
        centers: Array1::from(centers),
        first_pair: Array1::from(first_pair),
        second_pair: Array1::from(second_pair),
    };
}

#[cfg(test)]
mod tests {
    use ndarray::arr1;

    use super::*;

    #[test]
    fn count_sorted() {
        assert_eq!(count_neighbors(&arr1(&[0, 0, 0, 1, 3, 3]), true), [3, 1, 2]);
        assert_eq!(count_neighbors(&arr1(&[]), true), Vec::<usize>::new());
    }

    #[test]
    fn count_unsorted() {
        let first = arr1(&[3, 0, 1, 0, 3, 0]);
        assert_eq!(count_neighbors(&first, false), [3, 1, 2]);
        // runs are counted separately when pretending the list is sorted
        assert_eq!(count_neighbors(&first, true), [1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn triples() {
        let triples = atom_triples(&arr1(&[0, 0, 0, 2, 5, 5]));

        assert_eq!(triples.len(), 4);
        assert_eq!(triples.centers, arr1(&[0, 0, 0, 5]));
        assert_eq!(triples.first_pair, arr1(&[0, 0, 1, 4]));
        assert_eq!(triples.second_pair, arr1(&[1, 2, 2, 5]));

        let triples = atom_triples(&arr1(&[0, 1, 2]));
        assert!(triples.is_empty());
    }
}
