//! Neighbor lists for atomic structures, with periodic boundary conditions.
//!
//! The default neighbor search is a brute force search over all pairs of
//! atoms and all periodic images of the cell within the cutoff. This search
//! only produces half of the pairs, which are then symmetrized and sorted by
//! center atom. When both a short-range and a long-range neighbor list are
//! needed, a single search is done with the long-range cutoff and the
//! short-range list is extracted from it.
use ndarray::{Array1, Array2, Axis};

use crate::{Error, Vector3D};
use crate::systems::Structure;

mod shifts;
pub use self::shifts::{CellShift, cell_shifts, cell_repeats};

mod search;
pub use self::search::half_neighbor_list;

mod symmetrize;
pub use self::symmetrize::symmetrize;

mod split;
pub use self::split::split_short_range;

mod periodic;
pub use self::periodic::{NeighborListOptions, PeriodicNeighborList};

mod utils;
pub use self::utils::{count_neighbors, atom_triples, AtomTriples};

/// Pair of atoms coming from a neighbor list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair {
    /// index of the first (center) atom in the pair
    pub first: usize,
    /// index of the second (neighbor) atom in the pair
    pub second: usize,
    /// vector between the two atoms, accounting for periodic boundary
    /// conditions. This is `position[first] - position[second] + cell_shift ·
    /// H` where `H` is the cell matrix.
    pub vector: Vector3D,
    /// How many cell shift where applied to create this pair.
    pub cell_shift: CellShift,
}

/// A list of pairs, stored as parallel arrays.
///
/// All arrays have the same number of entries, and entry `k` in each of them
/// describes the same pair.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NeighborList {
    /// index of the first (center) atom in each pair
    #[serde(rename = "idx_i")]
    pub first: Array1<usize>,
    /// index of the second (neighbor) atom in each pair
    #[serde(rename = "idx_j")]
    pub second: Array1<usize>,
    /// vector between the atoms in each pair, with shape `(n_pairs, 3)`
    #[serde(rename = "Rij")]
    pub vectors: Array2<f64>,
    /// cell shifts for each pair, with shape `(n_pairs, 3)`. This is only
    /// stored if it was requested when creating the list.
    #[serde(rename = "offsets", default, skip_serializing_if = "Option::is_none")]
    pub cell_shifts: Option<Array2<i32>>,
}

impl NeighborList {
    /// Create an empty neighbor list, optionally storing cell shifts
    pub fn empty(with_cell_shifts: bool) -> NeighborList {
        NeighborList {
            first: Array1::zeros(0),
            second: Array1::zeros(0),
            vectors: Array2::zeros((0, 3)),
            cell_shifts: if with_cell_shifts { Some(Array2::zeros((0, 3))) } else { None },
        }
    }

    /// Create a neighbor list from a list of `pairs`, keeping the pairs in
    /// the same order. Cell shifts are only stored if `with_cell_shifts` is
    /// true.
    pub fn from_pairs(pairs: &[Pair], with_cell_shifts: bool) -> Result<NeighborList, Error> {
        let n_pairs = pairs.len();

        let first = pairs.iter().map(|pair| pair.first).collect::<Array1<_>>();
        let second = pairs.iter().map(|pair| pair.second).collect::<Array1<_>>();

        let vectors = pairs.iter()
            .flat_map(|pair| pair.vector.into_array())
            .collect::<Vec<_>>();
        let vectors = Array2::from_shape_vec((n_pairs, 3), vectors)?;

        let cell_shifts = if with_cell_shifts {
            let shifts = pairs.iter()
                .flat_map(|pair| pair.cell_shift.into_array())
                .collect::<Vec<_>>();
            Some(Array2::from_shape_vec((n_pairs, 3), shifts)?)
        } else {
            None
        };

        return Ok(NeighborList {
            first: first,
            second: second,
            vectors: vectors,
            cell_shifts: cell_shifts,
        });
    }

    /// Get the number of pairs in this list
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// Is this list empty?
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Get the vector for the pair at the given index
    pub fn vector(&self, index: usize) -> Vector3D {
        let row = self.vectors.row(index);
        Vector3D::new(row[0], row[1], row[2])
    }

    /// Get the cell shift for the pair at the given index, if cell shifts
    /// are stored in this list
    pub fn cell_shift(&self, index: usize) -> Option<CellShift> {
        self.cell_shifts.as_ref().map(|shifts| {
            let row = shifts.row(index);
            CellShift::from([row[0], row[1], row[2]])
        })
    }

    /// Get the distance between the atoms of the pair at the given index
    pub fn distance(&self, index: usize) -> f64 {
        self.vector(index).norm()
    }

    /// Iterate over the pairs in this list. If this list does not store cell
    /// shifts, the pairs will use a zero cell shift.
    pub fn pairs(&self) -> impl Iterator<Item = Pair> + '_ {
        (0..self.len()).map(move |index| Pair {
            first: self.first[index],
            second: self.second[index],
            vector: self.vector(index),
            cell_shift: self.cell_shift(index).unwrap_or_default(),
        })
    }

    /// Create a new list containing only the pairs at the given `indexes`, in
    /// the order of `indexes`.
    pub fn select(&self, indexes: &[usize]) -> NeighborList {
        NeighborList {
            first: self.first.select(Axis(0), indexes),
            second: self.second.select(Axis(0), indexes),
            vectors: self.vectors.select(Axis(0), indexes),
            cell_shifts: self.cell_shifts.as_ref().map(|shifts| shifts.select(Axis(0), indexes)),
        }
    }
}

/// Result of a neighbor search for a single structure.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Neighbors {
    /// neighbor list using the main (short-range) cutoff
    pub short_range: NeighborList,
    /// neighbor list using the long-range cutoff, if one was requested
    #[serde(default)]
    pub long_range: Option<NeighborList>,
}

impl From<NeighborList> for Neighbors {
    fn from(short_range: NeighborList) -> Neighbors {
        Neighbors {
            short_range: short_range,
            long_range: None,
        }
    }
}

/// A `NeighborSearch` computes the neighbor lists of a structure.
///
/// Implementations must be deterministic: searching twice the same structure
/// should give the exact same result, since the result can be cached and
/// reused later.
///
/// Any `Fn(&Structure) -> Result<Neighbors, Error>` closure is a valid
/// `NeighborSearch`, which allows to use external implementations of
/// neighbor lists. Such external implementations are expected to directly
/// return full neighbor lists, sorted by center atom.
pub trait NeighborSearch: Send + Sync {
    /// Compute the neighbor lists for the given `structure`
    fn search(&self, structure: &Structure) -> Result<Neighbors, Error>;
}

impl<F> NeighborSearch for F where F: Fn(&Structure) -> Result<Neighbors, Error> + Send + Sync {
    fn search(&self, structure: &Structure) -> Result<Neighbors, Error> {
        self(structure)
    }
}
