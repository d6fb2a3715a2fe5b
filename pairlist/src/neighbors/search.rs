use log::warn;
use rayon::prelude::*;

use crate::Vector3D;
use crate::systems::UnitCell;

use super::{CellShift, Pair};

/// Squared distance under which two atoms are considered suspiciously close
const CLOSE_ATOMS_DISTANCE2: f64 = 1e-3;

/// Check a single candidate pair, returning it if the atoms are closer than
/// the cutoff.
#[inline]
fn check_pair(first: usize, second: usize, vector: Vector3D, cell_shift: CellShift, cutoff: f64) -> Option<Pair> {
    let distance = vector.norm();
    if distance < cutoff {
        if distance * distance < CLOSE_ATOMS_DISTANCE2 {
            warn!(
                "atoms {} and {} are very close to one another ({} A)",
                first, second, distance
            );
        }

        return Some(Pair {
            first: first,
            second: second,
            vector: vector,
            cell_shift: cell_shift,
        });
    }

    return None;
}

/// Find all pairs of atoms strictly closer than `cutoff`, using a brute force
/// search over all pairs of atoms and all the given `shifts`.
///
/// This produces a so-called "half" neighbors list, where each pair is only
/// included once. `shifts` should not contain the zero shift, and should not
/// contain both `s` and `-s` (see [`cell_shifts`](super::cell_shifts)).
///
/// Inside the central cell (zero shift), only pairs with `i < j` are
/// considered. For all other shifts, all pairs are considered, including pairs
/// between an atom and its own periodic image.
///
/// The output contains the pairs from the central cell first, followed by the
/// pairs for each shift in order. For a given shift, pairs are sorted by
/// first then second atom.
///
/// Atoms are expected to be inside the unit cell along periodic directions,
/// otherwise pairs needing larger shifts than the ones given will be missed.
#[time_graph::instrument(name = "half_neighbor_list")]
pub fn half_neighbor_list(positions: &[Vector3D], cell: &UnitCell, shifts: &[CellShift], cutoff: f64) -> Vec<Pair> {
    let n_atoms = positions.len();
    let matrix = cell.matrix();

    let mut pairs = Vec::new();
    for first in 0..n_atoms {
        for second in (first + 1)..n_atoms {
            let vector = positions[first] - positions[second];
            if let Some(pair) = check_pair(first, second, vector, CellShift::default(), cutoff) {
                pairs.push(pair);
            }
        }
    }

    let pairs_by_shift = shifts.par_iter()
        .map(|&shift| {
            let shift_vector = shift.cartesian(&matrix);

            let mut pairs = Vec::new();
            for first in 0..n_atoms {
                for second in 0..n_atoms {
                    let vector = positions[first] - positions[second] + shift_vector;
                    if let Some(pair) = check_pair(first, second, vector, shift, cutoff) {
                        pairs.push(pair);
                    }
                }
            }
            pairs
        })
        .collect::<Vec<_>>();

    for shift_pairs in pairs_by_shift {
        pairs.extend(shift_pairs);
    }

    return pairs;
}
