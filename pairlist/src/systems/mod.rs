mod cell;
pub use self::cell::UnitCell;

mod structure;
pub use self::structure::Structure;

#[cfg(test)]
pub(crate) mod test_utils;
