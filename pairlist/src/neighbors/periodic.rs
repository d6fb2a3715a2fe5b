use crate::Error;
use crate::systems::Structure;

use super::{NeighborList, Neighbors, NeighborSearch};
use super::{cell_shifts, half_neighbor_list, symmetrize, split_short_range};

/// Parameters of a neighbor search
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NeighborListOptions {
    /// Spherical cutoff radius used to find neighbors. Pairs with a distance
    /// strictly smaller than this cutoff are included in the neighbor list.
    pub cutoff: f64,
    /// Optional larger cutoff radius. If this is positive, a second neighbor
    /// list is computed with this cutoff, and the short range neighbor list is
    /// extracted from it instead of running a second search. Setting this to
    /// zero or a negative value disables the long range neighbor list.
    #[serde(default = "serde_default_long_range_cutoff")]
    pub long_range_cutoff: f64,
    /// Should the neighbor lists also contain the cell shift of each pair?
    #[serde(default)]
    pub return_offset: bool,
}

fn serde_default_long_range_cutoff() -> f64 {
    return -1.0;
}

impl NeighborListOptions {
    /// Create options for a single neighbor list with the given `cutoff`,
    /// without cell shifts
    pub fn new(cutoff: f64) -> NeighborListOptions {
        NeighborListOptions {
            cutoff: cutoff,
            long_range_cutoff: serde_default_long_range_cutoff(),
            return_offset: false,
        }
    }

    /// Parse and validate options from the given JSON string
    pub fn from_json(json: &str) -> Result<NeighborListOptions, Error> {
        let options = serde_json::from_str::<NeighborListOptions>(json)?;
        options.validate()?;
        return Ok(options);
    }

    /// Check that these options are valid
    pub fn validate(&self) -> Result<(), Error> {
        if !self.cutoff.is_finite() || self.cutoff <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "cutoff must be a finite positive number, got {}", self.cutoff
            )));
        }

        if self.long_range_cutoff.is_nan() || self.long_range_cutoff == f64::INFINITY {
            return Err(Error::InvalidParameter(format!(
                "long_range_cutoff must be a finite number, got {}", self.long_range_cutoff
            )));
        }

        if self.has_long_range() && self.cutoff >= self.long_range_cutoff {
            return Err(Error::InvalidParameter(format!(
                "cutoff ({}) must be smaller than long_range_cutoff ({})",
                self.cutoff, self.long_range_cutoff
            )));
        }

        return Ok(());
    }

    /// Is a long range neighbor list requested?
    pub fn has_long_range(&self) -> bool {
        self.long_range_cutoff > 0.0
    }

    /// Get the cutoff used for the actual search, i.e. the long range cutoff
    /// if any, and the main cutoff otherwise
    pub fn search_cutoff(&self) -> f64 {
        if self.has_long_range() {
            self.long_range_cutoff
        } else {
            self.cutoff
        }
    }
}

/// Brute force neighbor search, accounting for periodic boundary conditions.
///
/// The search produces full neighbor lists (containing both `i-j` and `j-i`
/// pairs) sorted by center atom.
#[derive(Debug, Clone)]
pub struct PeriodicNeighborList {
    options: NeighborListOptions,
}

impl PeriodicNeighborList {
    /// Create a new neighbor search with the given options
    pub fn new(options: NeighborListOptions) -> Result<PeriodicNeighborList, Error> {
        options.validate()?;
        return Ok(PeriodicNeighborList { options: options });
    }

    /// Get the options used by this neighbor search
    pub fn options(&self) -> &NeighborListOptions {
        &self.options
    }

    /// Compute the full neighbor list of `structure` with the given `cutoff`
    #[time_graph::instrument(name = "PeriodicNeighborList::full_neighbor_list")]
    pub fn full_neighbor_list(&self, structure: &Structure, cutoff: f64) -> Result<NeighborList, Error> {
        let cell = structure.cell();
        let periodic = cell.periodic();
        for axis in 0..3 {
            if periodic[axis] && !cell.reciprocal(axis).norm().is_finite() {
                return Err(Error::Geometry(format!(
                    "the cell of structure {} can not be inverted but periodic \
                    boundary conditions are set to {:?}", structure.id(), periodic
                )));
            }
        }

        let shifts = cell_shifts(cell, cutoff);
        let pairs = half_neighbor_list(structure.positions(), cell, &shifts, cutoff);
        let half = NeighborList::from_pairs(&pairs, self.options.return_offset)?;

        return symmetrize(&half);
    }
}

impl NeighborSearch for PeriodicNeighborList {
    fn search(&self, structure: &Structure) -> Result<Neighbors, Error> {
        if self.options.has_long_range() {
            let long_range = self.full_neighbor_list(structure, self.options.long_range_cutoff)?;
            let short_range = split_short_range(&long_range, self.options.cutoff);
            return Ok(Neighbors {
                short_range: short_range,
                long_range: Some(long_range),
            });
        }

        let neighbors = self.full_neighbor_list(structure, self.options.cutoff)?;
        return Ok(Neighbors::from(neighbors));
    }
}
