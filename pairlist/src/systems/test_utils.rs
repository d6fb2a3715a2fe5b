use crate::{Matrix3, Vector3D};
use super::{UnitCell, Structure};

pub fn test_structure(name: &str) -> Structure {
    match name {
        "methane" => get_methane(),
        "water" => get_water(),
        "CH" => get_ch(),
        "NaCl" => get_nacl(),
        "graphene" => get_graphene(),
        _ => panic!("unknown test structure {}", name)
    }
}

fn get_methane() -> Structure {
    let mut structure = Structure::new(0, UnitCell::cubic(5.0));
    structure.add_atom(6, Vector3D::new(5.0000, 5.0000, 5.0000));
    structure.add_atom(1, Vector3D::new(5.5288, 5.1610, 5.9359));
    structure.add_atom(1, Vector3D::new(5.2051, 5.8240, 4.3214));
    structure.add_atom(1, Vector3D::new(5.3345, 4.0686, 4.5504));
    structure.add_atom(1, Vector3D::new(3.9315, 4.9463, 5.1921));
    return structure;
}

fn get_water() -> Structure {
    let mut structure = Structure::new(1, UnitCell::cubic(10.0));
    // types do not have to be atomic number
    structure.add_atom(-42, Vector3D::new(0.0, 0.0, 0.0));
    structure.add_atom(1, Vector3D::new(0.0, 0.75545, -0.58895));
    structure.add_atom(1, Vector3D::new(0.0, -0.75545, -0.58895));
    return structure;
}

fn get_ch() -> Structure {
    let mut structure = Structure::new(2, UnitCell::cubic(10.0));
    structure.add_atom(6, Vector3D::new(0.0, 0.0, 0.0));
    structure.add_atom(1, Vector3D::new(0.0, 1.2, 0.0));
    return structure;
}

/// NaCl structure, using a primitive unit cell. The distance between the
/// closest Na-Cl pair is exactly 1.
fn get_nacl() -> Structure {
    let cell = Matrix3::new([[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]]);
    let cell = UnitCell::new(cell, [true, true, true]).expect("invalid cell");
    let mut structure = Structure::new(3, cell);
    structure.add_atom(11, Vector3D::new(0.0, 0.0, 0.0));
    structure.add_atom(17, Vector3D::new(1.0, 0.0, 0.0));
    return structure;
}

/// Graphene-like sheet, periodic only in the plane
fn get_graphene() -> Structure {
    let cell = Matrix3::new([
        [4.26, -2.45951215, 0.0],
        [2.13, 1.22975607, 0.0],
        [0.0, 0.0, 50.0],
    ]);
    let cell = UnitCell::new(cell, [true, true, false]).expect("invalid cell");
    let mut structure = Structure::new(4, cell);
    structure.add_atom(6, Vector3D::new(1.42, 0.0, 0.0));
    structure.add_atom(6, Vector3D::new(2.84, 0.0, 0.0));
    structure.add_atom(6, Vector3D::new(3.55, -1.22975607, 0.0));
    structure.add_atom(6, Vector3D::new(4.97, -1.22975607, 0.0));
    return structure;
}
