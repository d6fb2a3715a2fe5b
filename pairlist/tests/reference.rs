//! Compare the neighbor lists against a naive search over a large set of
//! periodic images, and check the general properties of the lists.
use std::collections::BTreeMap;

use approx::assert_relative_eq;

use pairlist::{CellShift, NeighborList, NeighborListOptions, NeighborSearch, PeriodicNeighborList};
use pairlist::{Structure, Vector3D};
use pairlist::neighbors::cell_repeats;

mod common;
use common::test_structures;

type PairKey = (usize, usize, [i32; 3]);

/// Naive search, using more periodic images than required and checking both
/// directions of every pair
fn reference_pairs(structure: &Structure, cutoff: f64) -> BTreeMap<PairKey, Vector3D> {
    let cell = structure.cell();
    let periodic = cell.periodic();
    let repeats = cell_repeats(cell, cutoff);

    let mut range = [0; 3];
    for axis in 0..3 {
        if periodic[axis] {
            range[axis] = repeats[axis] + 1;
        }
    }

    let positions = structure.positions();
    let mut pairs = BTreeMap::new();
    for a in -range[0]..=range[0] {
        for b in -range[1]..=range[1] {
            for c in -range[2]..=range[2] {
                let shift = CellShift::from([a, b, c]);
                let shift_vector = shift.cartesian(&cell.matrix());
                for i in 0..positions.len() {
                    for j in 0..positions.len() {
                        if i == j && shift.is_zero() {
                            continue;
                        }

                        let vector = positions[i] - positions[j] + shift_vector;
                        if vector.norm() < cutoff {
                            pairs.insert((i, j, shift.into_array()), vector);
                        }
                    }
                }
            }
        }
    }

    return pairs;
}

fn with_offsets(cutoff: f64) -> PeriodicNeighborList {
    let mut options = NeighborListOptions::new(cutoff);
    options.return_offset = true;
    return PeriodicNeighborList::new(options).expect("invalid options");
}

fn check_sorted(list: &NeighborList) {
    let first = list.first.as_slice().expect("non contiguous array");
    assert!(first.windows(2).all(|w| w[0] <= w[1]), "centers are not sorted: {:?}", first);
}

#[test]
fn against_reference() {
    for &cutoff in &[1.2, 2.5, 3.7] {
        let search = with_offsets(cutoff);
        for structure in test_structures() {
            let list = search.search(&structure).unwrap().short_range;
            let reference = reference_pairs(&structure, cutoff);

            assert_eq!(
                list.len(), reference.len(),
                "wrong number of pairs for structure {} with cutoff {}", structure.id(), cutoff
            );

            for pair in list.pairs() {
                let key = (pair.first, pair.second, pair.cell_shift.into_array());
                let expected = reference.get(&key).unwrap_or_else(|| {
                    panic!("unexpected pair {:?} in structure {}", key, structure.id())
                });
                assert_relative_eq!(pair.vector, *expected, epsilon = 1e-12);
                assert!(pair.vector.norm() < cutoff);
            }
        }
    }
}

#[test]
fn list_properties() {
    let cutoff = 3.1;
    let search = with_offsets(cutoff);
    for structure in test_structures() {
        let list = search.search(&structure).unwrap().short_range;
        check_sorted(&list);

        let mut pairs = BTreeMap::new();
        for pair in list.pairs() {
            // no self pair in the central cell
            assert!(!(pair.first == pair.second && pair.cell_shift.is_zero()));

            let key = (pair.first, pair.second, pair.cell_shift.into_array());
            let previous = pairs.insert(key, pair.vector);
            assert!(previous.is_none(), "duplicated pair {:?}", key);
        }

        // every pair has exactly one reverse pair
        for (&(first, second, shift), &vector) in &pairs {
            let reverse = (second, first, (-CellShift::from(shift)).into_array());
            let reverse_vector = pairs.get(&reverse).expect("missing reverse pair");
            assert_eq!(*reverse_vector, -vector);
        }

        // pairs around the same center are contiguous
        let mut seen = Vec::new();
        for &center in &list.first {
            if seen.last() != Some(&center) {
                assert!(!seen.contains(&center), "pairs around {} are not contiguous", center);
                seen.push(center);
            }
        }
    }
}

#[test]
fn range_containment() {
    let mut options = NeighborListOptions::new(1.8);
    options.long_range_cutoff = 3.4;
    options.return_offset = true;
    let search = PeriodicNeighborList::new(options).unwrap();

    for structure in test_structures() {
        let neighbors = search.search(&structure).unwrap();
        let long_range = neighbors.long_range.expect("missing long range list");
        let short_range = neighbors.short_range;

        check_sorted(&long_range);
        check_sorted(&short_range);

        let expected = long_range.pairs()
            .filter(|pair| pair.vector.norm() <= 1.8)
            .collect::<Vec<_>>();
        assert_eq!(short_range.pairs().collect::<Vec<_>>(), expected);

        // the long range list is a complete search at the long range cutoff
        assert_eq!(long_range.len(), reference_pairs(&structure, 3.4).len());
        assert_eq!(short_range.len(), reference_pairs(&structure, 1.8).len());
    }
}

#[test]
fn counting_and_triples() {
    let search = with_offsets(2.5);
    for structure in test_structures() {
        let list = search.search(&structure).unwrap().short_range;

        let counts = pairlist::neighbors::count_neighbors(&list.first, true);
        assert_eq!(counts.iter().sum::<usize>(), list.len());
        assert_eq!(counts, pairlist::neighbors::count_neighbors(&list.first, false));

        let triples = pairlist::neighbors::atom_triples(&list.first);
        let expected = counts.iter().map(|n| n * n.saturating_sub(1) / 2).sum::<usize>();
        assert_eq!(triples.len(), expected);

        for t in 0..triples.len() {
            let center = triples.centers[t];
            assert_eq!(list.first[triples.first_pair[t]], center);
            assert_eq!(list.first[triples.second_pair[t]], center);
            assert!(triples.first_pair[t] < triples.second_pair[t]);
        }
    }
}
