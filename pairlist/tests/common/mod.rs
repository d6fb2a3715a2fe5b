#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use pairlist::{Matrix3, Structure, UnitCell, Vector3D};

/// Create a structure with `n_atoms` atoms at random positions inside the
/// given cell
pub fn random_structure(id: u64, matrix: [[f64; 3]; 3], periodic: [bool; 3], n_atoms: usize) -> Structure {
    let matrix = Matrix3::new(matrix);
    let cell = UnitCell::new(matrix, periodic).expect("invalid cell");

    let mut rng = Xoshiro256StarStar::seed_from_u64(id);
    let mut structure = Structure::new(id, cell);
    for atom in 0..n_atoms {
        let fractional = Vector3D::new(rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>());
        // positions are `fractional · matrix`
        let position = matrix.transposed() * fractional;
        structure.add_atom(1 + (atom % 3) as i32, position);
    }
    return structure;
}

/// Set of small structures with different cell shapes and periodic boundary
/// conditions
pub fn test_structures() -> Vec<Structure> {
    vec![
        random_structure(0, [[3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 3.0]], [true, true, true], 5),
        random_structure(1, [[3.0, 0.0, 0.0], [0.8, 2.9, 0.0], [0.5, 0.7, 3.2]], [true, true, true], 6),
        random_structure(2, [[4.0, 0.0, 0.0], [1.0, 3.5, 0.0], [0.0, 0.0, 20.0]], [true, true, false], 6),
        random_structure(3, [[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 2.1]], [false, false, true], 4),
        random_structure(4, [[6.0, 0.0, 0.0], [0.0, 6.0, 0.0], [0.0, 0.0, 6.0]], [false, false, false], 8),
        random_structure(5, [[1.3, 0.0, 0.0], [0.0, 1.1, 0.2], [0.3, 0.0, 1.2]], [true, true, true], 2),
        random_structure(6, [[0.0, 2.0, 2.0], [2.0, 0.0, 2.0], [2.0, 2.0, 0.0]], [true, false, true], 3),
    ]
}
