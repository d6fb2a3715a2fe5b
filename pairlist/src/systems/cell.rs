//! The `UnitCell` type represents the enclosing box of a structure, with
//! periodic boundary conditions along some or all of its axes.
use std::f64;

use crate::{Error, Matrix3, Vector3D};

/// Cells with a determinant smaller than this (in absolute value) are
/// considered singular
const SINGULAR_DETERMINANT: f64 = 1e-6;

/// An `UnitCell` defines the physical boundaries of a structure.
///
/// The cell matrix contains the three lattice vectors as rows, and each of
/// these vectors can independently have periodic boundary conditions. A
/// periodic image of an atom is obtained by adding `shift · matrix` to its
/// position, where `shift` is an integer vector which is zero along the non
/// periodic directions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct UnitCell {
    /// Unit cell matrix, with lattice vectors as rows
    matrix: Matrix3,
    /// Inverse of the transpose of the unit cell matrix, i.e. the reciprocal
    /// lattice vectors as rows. This is only set if the cell is periodic
    /// along at least one axis
    reciprocal: Matrix3,
    /// Periodic boundary conditions along each lattice vector
    periodic: [bool; 3],
}

impl UnitCell {
    /// Create a new unit cell from the given `matrix` and periodic boundary
    /// conditions.
    ///
    /// This fails with `Error::Geometry` if the matrix is singular and the
    /// cell is periodic along any direction.
    pub fn new(matrix: Matrix3, periodic: [bool; 3]) -> Result<UnitCell, Error> {
        let reciprocal = if periodic.iter().any(|&p| p) {
            let determinant = matrix.determinant();
            if !determinant.is_finite() || f64::abs(determinant) < SINGULAR_DETERMINANT {
                return Err(Error::Geometry(format!(
                    "the cell matrix is singular (determinant is {}) but periodic \
                    boundary conditions are set to {:?}", determinant, periodic
                )));
            }
            matrix.transposed().inverse()
        } else {
            Matrix3::zero()
        };

        return Ok(UnitCell {
            matrix: matrix,
            reciprocal: reciprocal,
            periodic: periodic,
        });
    }

    /// Create an infinite unit cell, without any periodic boundary conditions
    pub fn infinite() -> UnitCell {
        UnitCell {
            matrix: Matrix3::zero(),
            reciprocal: Matrix3::zero(),
            periodic: [false, false, false],
        }
    }

    /// Create an orthorhombic unit cell, with side lengths `a, b, c` and
    /// periodic boundary conditions in all directions.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> UnitCell {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "Cell lengths must be positive");
        let matrix = Matrix3::new([
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c]
        ]);
        UnitCell {
            matrix: matrix,
            reciprocal: matrix.inverse(),
            periodic: [true, true, true],
        }
    }

    /// Create a cubic unit cell, with side lengths `length, length, length`
    /// and periodic boundary conditions in all directions.
    pub fn cubic(length: f64) -> UnitCell {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Create a triclinic unit cell, with side lengths `a, b, c` and angles
    /// `alpha, beta, gamma`, and periodic boundary conditions in all
    /// directions.
    pub fn triclinic(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> UnitCell {
        assert!(a > 0.0 && b > 0.0 && c > 0.0, "Cell lengths must be positive");
        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let b_x = b * cos_gamma;
        let b_y = b * sin_gamma;

        let c_x = c * cos_beta;
        let c_y = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c_z = f64::sqrt(c * c - c_y * c_y - c_x * c_x);

        let matrix = Matrix3::new([
            [a,   0.0, 0.0],
            [b_x, b_y, 0.0],
            [c_x, c_y, c_z],
        ]);

        UnitCell {
            matrix: matrix,
            reciprocal: matrix.transposed().inverse(),
            periodic: [true, true, true],
        }
    }

    /// Get a copy of this cell with different periodic boundary conditions
    pub fn with_periodicity(&self, periodic: [bool; 3]) -> Result<UnitCell, Error> {
        UnitCell::new(self.matrix, periodic)
    }

    /// Get the matricial representation of the unit cell
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the periodic boundary conditions along each lattice vector
    pub fn periodic(&self) -> [bool; 3] {
        self.periodic
    }

    /// Check if this unit cell has periodic boundary conditions along at least
    /// one direction.
    pub fn is_periodic(&self) -> bool {
        self.periodic.iter().any(|&p| p)
    }

    /// Get the reciprocal lattice vector associated with the given `axis`
    /// (without the 2π factor). The norm of this vector is the inverse of the
    /// distance between the two faces of the cell normal to it.
    ///
    /// This is the zero vector if the cell is not periodic at all.
    pub fn reciprocal(&self, axis: usize) -> Vector3D {
        self.reciprocal[axis].into()
    }
}
