use crate::{Matrix3, Vector3D};
use crate::systems::UnitCell;

/// A cell shift represents the displacement along cell axis between the actual
/// position of an atom and a periodic image of this atom.
///
/// The cell shift can be used to reconstruct the vector between two points,
/// accounting for periodic boundary conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellShift([i32; 3]);

impl std::ops::Neg for CellShift {
    type Output = CellShift;

    fn neg(self) -> Self::Output {
        CellShift([-self[0], -self[1], -self[2]])
    }
}

impl std::ops::Index<usize> for CellShift {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<[i32; 3]> for CellShift {
    fn from(shift: [i32; 3]) -> CellShift {
        CellShift(shift)
    }
}

impl CellShift {
    /// Get the shift as an array of integers
    pub fn into_array(self) -> [i32; 3] {
        self.0
    }

    /// Is this the zero shift, i.e. no displacement at all?
    pub fn is_zero(&self) -> bool {
        self.0 == [0, 0, 0]
    }

    /// Is this shift in the "positive" half of the shift space, i.e. is the
    /// first non-zero component of the shift positive? For any non-zero shift,
    /// exactly one of `shift` and `-shift` is positive.
    pub fn is_positive(&self) -> bool {
        match self.0.iter().find(|&&s| s != 0) {
            Some(&first) => first > 0,
            None => false,
        }
    }

    /// Compute the shift vector in cartesian coordinates, using the given cell
    /// matrix (stored in row major order).
    pub fn cartesian(&self, cell: &Matrix3) -> Vector3D {
        let shift = Vector3D::new(self[0] as f64, self[1] as f64, self[2] as f64);
        return cell.transposed() * shift;
    }
}

/// Number of periodic images to consider along each lattice vector of `cell`
/// to find all pairs closer than `cutoff`. This is zero along non-periodic
/// directions.
pub fn cell_repeats(cell: &UnitCell, cutoff: f64) -> [i32; 3] {
    let periodic = cell.periodic();
    let mut repeats = [0; 3];
    for axis in 0..3 {
        if periodic[axis] {
            repeats[axis] = f64::ceil(cutoff * cell.reciprocal(axis).norm()) as i32;
        }
    }
    return repeats;
}

/// Get all the cell shifts that need to be considered when searching for
/// neighbors closer than `cutoff` in the given `cell`.
///
/// The zero shift is implicit and not included in the output. Only one shift
/// out of each `{s, -s}` pair is returned (the one with a positive first
/// non-zero component), since the pairs found with `-s` are the same as the
/// pairs found with `s` with the atoms swapped. Shifts are sorted in
/// lexicographic order.
pub fn cell_shifts(cell: &UnitCell, cutoff: f64) -> Vec<CellShift> {
    let repeats = cell_repeats(cell, cutoff);

    let mut shifts = Vec::new();
    for a in 0..=repeats[0] {
        for b in -repeats[1]..=repeats[1] {
            for c in -repeats[2]..=repeats[2] {
                let shift = CellShift([a, b, c]);
                if shift.is_positive() {
                    shifts.push(shift);
                }
            }
        }
    }

    return shifts;
}
