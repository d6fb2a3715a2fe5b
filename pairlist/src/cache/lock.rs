use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::warn;

use crate::Error;

/// Path of the lock file for the given `structure` in the cache `directory`
pub fn lock_path(directory: &Path, structure: u64) -> PathBuf {
    directory.join(format!("cache_{}.lock", structure))
}

/// Exclusive lock on the cache entry of a single structure.
///
/// This uses an OS advisory lock on a dedicated lock file, which is released
/// when this `CacheLock` is dropped, or by the OS if the process dies while
/// holding it. Each `CacheLock` uses its own open file, so locks taken from
/// different threads of the same process also exclude one another.
///
/// The lock file itself is never removed, since another process could be
/// waiting on it.
#[derive(Debug)]
pub struct CacheLock {
    file: File,
    path: PathBuf,
}

impl CacheLock {
    /// Acquire the lock for `structure` in the cache `directory`, blocking
    /// until any other holder releases it.
    pub fn acquire(directory: &Path, structure: u64) -> Result<CacheLock, Error> {
        let path = lock_path(directory, structure);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        file.lock_exclusive()?;

        return Ok(CacheLock {
            file: file,
            path: path,
        });
    }

    /// Get the path of the underlying lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CacheLock {
    fn drop(&mut self) {
        if let Err(error) = FileExt::unlock(&self.file) {
            warn!("failed to release lock on '{}': {}", self.path.display(), error);
        }
    }
}
