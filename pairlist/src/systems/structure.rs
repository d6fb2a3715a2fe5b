use crate::{Error, Vector3D};
use super::UnitCell;

/// A single atomic structure, for which neighbor lists can be computed.
///
/// The `id` identifies the structure inside a dataset, and is used as the
/// key when caching neighbor lists on disk.
#[derive(Clone, Debug)]
pub struct Structure {
    id: u64,
    cell: UnitCell,
    types: Vec<i32>,
    positions: Vec<Vector3D>,
}

impl Structure {
    /// Create a new empty structure with the given `id` and unit cell
    pub fn new(id: u64, cell: UnitCell) -> Structure {
        Structure {
            id: id,
            cell: cell,
            types: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Create a new structure from already existing `types` and `positions`.
    /// Both must have the same length.
    pub fn from_parts(id: u64, cell: UnitCell, types: Vec<i32>, positions: Vec<Vector3D>) -> Result<Structure, Error> {
        if types.len() != positions.len() {
            return Err(Error::InvalidParameter(format!(
                "got {} atomic types but {} positions for structure {}",
                types.len(), positions.len(), id
            )));
        }

        return Ok(Structure {
            id: id,
            cell: cell,
            types: types,
            positions: positions,
        });
    }

    /// Add an atom with the given atomic type and position to this structure
    pub fn add_atom(&mut self, atomic_type: i32, position: Vector3D) {
        self.types.push(atomic_type);
        self.positions.push(position);
    }

    /// Get the identifier of this structure
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the unit cell of this structure
    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Get the number of atoms in this structure
    pub fn size(&self) -> usize {
        self.types.len()
    }

    /// Get the atomic types of all atoms in this structure. These are usually
    /// atomic numbers, but don't have to.
    pub fn types(&self) -> &[i32] {
        &self.types
    }

    /// Get the Cartesian positions of all atoms in this structure
    pub fn positions(&self) -> &[Vector3D] {
        &self.positions
    }
}
