use ndarray::{Axis, concatenate};

use crate::Error;
use super::NeighborList;

/// Transform a half neighbor list (containing each pair once) into a full
/// neighbor list, containing both `(i, j, Rij, shift)` and `(j, i, -Rij,
/// -shift)` for each pair.
///
/// The resulting pairs are sorted by center (first) atom. The sort is stable,
/// so all pairs for a given center are contiguous and keep the relative order
/// they had in the concatenation of the original and swapped pairs.
#[time_graph::instrument(name = "symmetrize")]
pub fn symmetrize(half: &NeighborList) -> Result<NeighborList, Error> {
    let first = concatenate(Axis(0), &[half.first.view(), half.second.view()])?;
    let second = concatenate(Axis(0), &[half.second.view(), half.first.view()])?;

    let negated = -&half.vectors;
    let vectors = concatenate(Axis(0), &[half.vectors.view(), negated.view()])?;

    let cell_shifts = match half.cell_shifts {
        Some(ref shifts) => {
            let negated = -shifts;
            Some(concatenate(Axis(0), &[shifts.view(), negated.view()])?)
        }
        None => None,
    };

    let mut order = (0..first.len()).collect::<Vec<_>>();
    order.sort_by_key(|&index| first[index]);

    let full = NeighborList {
        first: first,
        second: second,
        vectors: vectors,
        cell_shifts: cell_shifts,
    };

    return Ok(full.select(&order));
}

#[cfg(test)]
mod tests {
    use approx::assert_ulps_eq;

    use crate::{Vector3D, UnitCell};
    use crate::neighbors::{CellShift, Pair, cell_shifts, half_neighbor_list};

    use super::*;

    fn pair(first: usize, second: usize, vector: [f64; 3], shift: [i32; 3]) -> Pair {
        Pair {
            first: first,
            second: second,
            vector: vector.into(),
            cell_shift: CellShift::from(shift),
        }
    }

    #[test]
    fn two_atoms() {
        let half = NeighborList::from_pairs(&[pair(0, 1, [-2.0, 0.0, 0.0], [0, 0, 0])], true).unwrap();
        let full = symmetrize(&half).unwrap();

        assert_eq!(full.len(), 2);
        assert_eq!(full.first, ndarray::arr1(&[0, 1]));
        assert_eq!(full.second, ndarray::arr1(&[1, 0]));
        assert_eq!(full.vector(0), Vector3D::new(-2.0, 0.0, 0.0));
        assert_eq!(full.vector(1), Vector3D::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn stable_order() {
        let half = NeighborList::from_pairs(&[
            pair(1, 2, [1.0, 0.0, 0.0], [0, 0, 0]),
            pair(0, 2, [2.0, 0.0, 0.0], [0, 0, 0]),
            pair(1, 1, [3.0, 0.0, 0.0], [1, 0, 0]),
            pair(0, 1, [4.0, 0.0, 0.0], [0, 1, 0]),
        ], true).unwrap();

        let full = symmetrize(&half).unwrap();
        assert_eq!(full.first, ndarray::arr1(&[0, 0, 1, 1, 1, 1, 2, 2]));
        assert_eq!(full.second, ndarray::arr1(&[2, 1, 2, 1, 1, 0, 1, 0]));

        let expected_x = [2.0, 4.0, 1.0, 3.0, -3.0, -4.0, -1.0, -2.0];
        for (index, &x) in expected_x.iter().enumerate() {
            assert_eq!(full.vector(index)[0], x);
        }

        let expected_shifts = [
            [0, 0, 0], [0, 1, 0], [0, 0, 0], [1, 0, 0],
            [-1, 0, 0], [0, -1, 0], [0, 0, 0], [0, 0, 0],
        ];
        for (index, &shift) in expected_shifts.iter().enumerate() {
            assert_eq!(full.cell_shift(index), Some(CellShift::from(shift)));
        }
    }

    #[test]
    fn without_cell_shifts() {
        let half = NeighborList::from_pairs(&[pair(0, 1, [1.0, 1.0, 0.0], [0, 0, 1])], false).unwrap();
        let full = symmetrize(&half).unwrap();
        assert_eq!(full.len(), 2);
        assert!(full.cell_shifts.is_none());
    }

    #[test]
    fn empty() {
        let full = symmetrize(&NeighborList::empty(true)).unwrap();
        assert_eq!(full, NeighborList::empty(true));
    }

    #[test]
    fn fcc_self_images() {
        let cell = UnitCell::new(crate::Matrix3::new([
            [0.0, 1.5, 1.5],
            [1.5, 0.0, 1.5],
            [1.5, 1.5, 0.0],
        ]), [true, true, true]).unwrap();
        let positions = [Vector3D::new(0.0, 0.0, 0.0)];

        let shifts = cell_shifts(&cell, 3.0);
        let pairs = half_neighbor_list(&positions, &cell, &shifts, 3.0);
        let full = symmetrize(&NeighborList::from_pairs(&pairs, true).unwrap()).unwrap();

        // the 12 nearest neighbors in a fcc lattice
        assert_eq!(full.len(), 12);
        for index in 0..full.len() {
            assert_eq!(full.first[index], 0);
            assert_eq!(full.second[index], 0);
            assert_ulps_eq!(full.distance(index), 2.1213203435596424);
        }
    }

    #[test]
    fn symmetric_pairs() {
        let structure = crate::systems::test_utils::test_structure("NaCl");
        let cell = structure.cell();
        let shifts = cell_shifts(cell, 2.5);
        let pairs = half_neighbor_list(structure.positions(), cell, &shifts, 2.5);
        let full = symmetrize(&NeighborList::from_pairs(&pairs, true).unwrap()).unwrap();

        assert_eq!(full.len(), 2 * pairs.len());

        for pair in full.pairs() {
            let count = full.pairs().filter(|other| {
                other.first == pair.second
                    && other.second == pair.first
                    && other.cell_shift == -pair.cell_shift
                    && other.vector == -pair.vector
            }).count();
            assert_eq!(count, 1, "missing or duplicated reverse pair for {:?}", pair);
        }

        // centers are sorted, so all pairs for a center are contiguous
        assert!(full.first.iter().zip(full.first.iter().skip(1)).all(|(a, b)| a <= b));
    }
}
