use super::NeighborList;

/// Extract the short-range neighbor list from a `long_range` list, keeping
/// only the pairs with a distance smaller or equal to `cutoff`.
///
/// Pairs are kept in the same relative order, so if the long range list is
/// sorted by center atom, the short range list will be too.
pub fn split_short_range(long_range: &NeighborList, cutoff: f64) -> NeighborList {
    let selected = (0..long_range.len())
        .filter(|&index| long_range.distance(index) <= cutoff)
        .collect::<Vec<_>>();

    return long_range.select(&selected);
}
