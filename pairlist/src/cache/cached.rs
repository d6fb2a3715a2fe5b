use std::path::{Path, PathBuf};

use log::debug;

use crate::Error;
use crate::neighbors::{Neighbors, NeighborSearch};
use crate::systems::Structure;

use super::entry::{read_entry, write_entry};
use super::lock::CacheLock;

/// A `NeighborSearch` memoizing the results of another search on disk.
///
/// Results are stored in the cache directory, one file per structure
/// (`cache_<id>.json`), using the structure id as the only key. Multiple
/// threads and processes can share the same cache directory: a given entry
/// is computed and written only once, under a per-structure lock
/// (`cache_<id>.lock`).
///
/// The cache does not check that existing entries were produced with the
/// same search parameters: a given cache directory must only ever be used
/// with a single dataset and neighbor search configuration.
pub struct CachedNeighborList<S> {
    location: PathBuf,
    search: S,
}

impl<S: NeighborSearch> CachedNeighborList<S> {
    /// Create a new cached search, storing the results of `search` in the
    /// existing `location` directory
    pub fn new(location: impl Into<PathBuf>, search: S) -> CachedNeighborList<S> {
        CachedNeighborList {
            location: location.into(),
            search: search,
        }
    }

    /// Get the directory containing the cache entries
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Get the underlying (un-cached) neighbor search
    pub fn inner(&self) -> &S {
        &self.search
    }

    fn compute_and_store(&self, structure: &Structure) -> Result<Neighbors, Error> {
        let id = structure.id();
        let _lock = CacheLock::acquire(&self.location, id)?;

        // someone else might have computed this entry while we were waiting
        // for the lock
        if let Some(neighbors) = read_entry(&self.location, id) {
            debug!("cache hit for structure {} after waiting for the lock", id);
            return Ok(neighbors);
        }

        let neighbors = self.search.search(structure)?;
        write_entry(&self.location, id, &neighbors)?;
        debug!("stored neighbors of structure {} in cache", id);

        return Ok(neighbors);
    }
}

impl<S: NeighborSearch> NeighborSearch for CachedNeighborList<S> {
    #[time_graph::instrument(name = "CachedNeighborList::search")]
    fn search(&self, structure: &Structure) -> Result<Neighbors, Error> {
        let id = structure.id();
        if let Some(neighbors) = read_entry(&self.location, id) {
            debug!("cache hit for structure {}", id);
            return Ok(neighbors);
        }

        debug!("cache miss for structure {}", id);
        return self.compute_and_store(structure).map_err(|error| Error::NeighborSearch {
            structure: id,
            source: Box::new(error),
        });
    }
}
