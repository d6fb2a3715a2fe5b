use pairlist::{CacheOptions, NeighborListCache, NeighborListOptions, NeighborSearch, PeriodicNeighborList};
use pairlist::{Structure, UnitCell, Vector3D};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let size = match std::env::args().nth(1) {
        Some(size) => size.parse()?,
        None => 6,
    };

    // enable collection of profiling data
    time_graph::enable_data_collection(true);
    // clear any existing collected data
    time_graph::clear_collected_data();

    // run the calculation
    compute_neighbors(size)?;

    // get the call graph and display it
    let graph = time_graph::get_full_graph();
    // (this requires the "table" feature for the time_graph crate)
    println!("{}", graph.as_short_table());

    // also available for saving profiling data to the disk & future analysis
    // (this requires the "json" feature for the time_graph crate)
    println!("{}", graph.as_json());

    Ok(())
}

/// Compute neighbor lists for a set of slightly distorted cubic crystals,
/// going through a temporary cache twice
fn compute_neighbors(size: usize) -> Result<(), Box<dyn std::error::Error>> {
    let options = NeighborListOptions::from_json(r#"{
        "cutoff": 3.0,
        "long_range_cutoff": 6.0,
        "return_offset": true
    }"#)?;

    let scratch = tempfile::tempdir()?;
    let cache = NeighborListCache::new(CacheOptions::new(scratch.path().join("cache")))?;
    let search = cache.with_search(PeriodicNeighborList::new(options)?);

    let structures = (0..4).map(|id| crystal(id, size)).collect::<Vec<_>>();
    for _ in 0..2 {
        time_graph::spanned!("Full calculation", {
            for structure in &structures {
                let neighbors = search.search(structure)?;
                log::info!("structure {} has {} pairs", structure.id(), neighbors.short_range.len());
            }
        });
    }

    cache.teardown();
    Ok(())
}

fn crystal(id: u64, size: usize) -> Structure {
    let lattice = 2.5;
    let mut structure = Structure::new(id, UnitCell::cubic(size as f64 * lattice));
    for i in 0..size {
        for j in 0..size {
            for k in 0..size {
                let displacement = 0.02 * ((i + 2 * j + 3 * k + id as usize) % 5) as f64;
                structure.add_atom(1, Vector3D::new(
                    i as f64 * lattice + displacement,
                    j as f64 * lattice,
                    k as f64 * lattice + 0.5 * displacement,
                ));
            }
        }
    }
    return structure;
}
