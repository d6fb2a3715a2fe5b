use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::warn;

use crate::Error;
use crate::neighbors::{NeighborList, Neighbors};

/// Path of the cache entry for the given `structure` in the cache `directory`
pub fn entry_path(directory: &Path, structure: u64) -> PathBuf {
    directory.join(format!("cache_{}.json", structure))
}

/// Get the paths of all cache entries in `directory`, ignoring lock files
/// and temporary files left behind by interrupted writers
pub fn list_entries(directory: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        let is_entry = path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix("cache_"))
            .and_then(|name| name.strip_suffix(".json"))
            .map_or(false, |id| id.parse::<u64>().is_ok());

        if is_entry {
            entries.push(path);
        }
    }
    entries.sort();
    return Ok(entries);
}

/// Read the cache entry for `structure` from `directory`.
///
/// This returns `None` if the entry does not exist yet. Entries that exist
/// but can not be read or decoded are reported with a warning and also give
/// `None`, so they will be computed again and overwritten.
pub fn read_entry(directory: &Path, structure: u64) -> Option<Neighbors> {
    let path = entry_path(directory, structure);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return None,
        Err(error) => {
            warn!("failed to open cache entry '{}': {}", path.display(), error);
            return None;
        }
    };

    let neighbors = match serde_json::from_reader::<_, Neighbors>(BufReader::new(file)) {
        Ok(neighbors) => neighbors,
        Err(error) => {
            warn!("ignoring corrupted cache entry '{}': {}", path.display(), error);
            return None;
        }
    };

    if let Err(message) = check_consistency(&neighbors) {
        warn!("ignoring corrupted cache entry '{}': {}", path.display(), message);
        return None;
    }

    return Some(neighbors);
}

/// Write the cache entry for `structure` in `directory`.
///
/// The data is first written to a temporary file in the same directory,
/// which is then renamed to the final path. Concurrent readers will either
/// see no entry or a complete entry.
pub fn write_entry(directory: &Path, structure: u64, neighbors: &Neighbors) -> Result<(), Error> {
    let mut file = tempfile::NamedTempFile::new_in(directory)?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        serde_json::to_writer(&mut writer, neighbors)?;
        writer.flush()?;
    }
    file.as_file().sync_all()?;

    file.persist(entry_path(directory, structure)).map_err(|error| Error::Io(error.error))?;

    return Ok(());
}

fn check_consistency(neighbors: &Neighbors) -> Result<(), String> {
    check_list(&neighbors.short_range)?;
    if let Some(ref long_range) = neighbors.long_range {
        check_list(long_range)?;
    }
    return Ok(());
}

fn check_list(list: &NeighborList) -> Result<(), String> {
    let n_pairs = list.first.len();
    if list.second.len() != n_pairs || list.vectors.shape() != [n_pairs, 3] {
        return Err(format!(
            "inconsistent shapes: idx_i has {} entries, idx_j has {} and Rij has shape {:?}",
            n_pairs, list.second.len(), list.vectors.shape()
        ));
    }

    if let Some(ref shifts) = list.cell_shifts {
        if shifts.shape() != [n_pairs, 3] {
            return Err(format!(
                "inconsistent shapes: idx_i has {} entries but offsets has shape {:?}",
                n_pairs, shifts.shape()
            ));
        }
    }

    return Ok(());
}
