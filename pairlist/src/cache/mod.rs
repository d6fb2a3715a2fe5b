//! On-disk cache of neighbor lists, shared between threads and processes.
//!
//! [`NeighborListCache`] manages the cache directories (creation, optional
//! staging in a scratch work directory, and cleanup), while
//! [`CachedNeighborList`] implements the per-structure lookup on top of any
//! [`NeighborSearch`](crate::NeighborSearch).
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::Error;
use crate::neighbors::NeighborSearch;

mod lock;
pub use self::lock::CacheLock;

mod entry;
pub use self::entry::{entry_path, list_entries, read_entry, write_entry};

mod cached;
pub use self::cached::CachedNeighborList;

/// Configuration of a neighbor list cache.
///
/// The structure id is the only key used to look up entries in the cache: a
/// given `cache_path` must only ever be used with a single dataset and a
/// single neighbor search configuration (cutoffs, offsets). Reusing it with
/// different settings will silently return stale neighbor lists.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CacheOptions {
    /// Directory where the cache entries are stored
    pub cache_path: PathBuf,
    /// Should the cache be kept after the end of the run? If this is false
    /// and `cache_path` did not exist before, it is removed on teardown.
    #[serde(default)]
    pub keep_cache: bool,
    /// Optional scratch directory, typically on a faster filesystem. If set,
    /// all the entries are read and written there during the run, and synced
    /// back to `cache_path` on teardown if `keep_cache` is true. This
    /// directory must not exist before the cache is created.
    #[serde(default)]
    pub cache_workdir: Option<PathBuf>,
}

impl CacheOptions {
    /// Create options for a cache in `cache_path`, without work directory,
    /// which is removed at the end of the run if it did not exist before.
    pub fn new(cache_path: impl Into<PathBuf>) -> CacheOptions {
        CacheOptions {
            cache_path: cache_path.into(),
            keep_cache: false,
            cache_workdir: None,
        }
    }

    /// Parse and validate options from the given JSON string
    pub fn from_json(json: &str) -> Result<CacheOptions, Error> {
        let options = serde_json::from_str::<CacheOptions>(json)?;
        options.validate()?;
        return Ok(options);
    }

    /// Check that these options are valid
    pub fn validate(&self) -> Result<(), Error> {
        if self.cache_path.as_os_str().is_empty() {
            return Err(Error::InvalidParameter("cache_path can not be empty".into()));
        }

        if let Some(ref workdir) = self.cache_workdir {
            if workdir.as_os_str().is_empty() {
                return Err(Error::InvalidParameter("cache_workdir can not be empty".into()));
            }

            if workdir == &self.cache_path {
                return Err(Error::InvalidParameter(format!(
                    "cache_workdir and cache_path must be different, both are '{}'",
                    workdir.display()
                )));
            }
        }

        return Ok(());
    }
}

/// Directories used to cache neighbor lists during a run.
///
/// Creating a `NeighborListCache` prepares the directories, and dropping it
/// (or calling [`NeighborListCache::teardown`]) cleans them up, according to
/// the [`CacheOptions`]. Cleanup is best effort: failures are logged and
/// otherwise ignored.
#[derive(Debug)]
pub struct NeighborListCache {
    options: CacheOptions,
    /// did `cache_path` exist before this cache was created?
    preexisting: bool,
    /// directory where entries are read and written during the run
    location: PathBuf,
    finished: bool,
}

impl NeighborListCache {
    /// Prepare the cache directories described by `options`.
    ///
    /// This fails with `Error::CacheState` if the work directory already
    /// exists, or if the cache path exists but is not a directory. If the
    /// work directory can not be prepared, the directories created here are
    /// removed before returning the error.
    pub fn new(options: CacheOptions) -> Result<NeighborListCache, Error> {
        options.validate()?;

        let cache_path = &options.cache_path;
        if cache_path.exists() && !cache_path.is_dir() {
            return Err(Error::CacheState(format!(
                "cache_path '{}' exists but is not a directory", cache_path.display()
            )));
        }

        if let Some(ref workdir) = options.cache_workdir {
            if workdir.exists() {
                return Err(Error::CacheState(format!(
                    "cache_workdir '{}' already exists, remove it before running", workdir.display()
                )));
            }
        }

        let preexisting = cache_path.is_dir();
        fs::create_dir_all(cache_path)?;

        let location = match options.cache_workdir {
            Some(ref workdir) => {
                if let Err(error) = prepare_workdir(cache_path, workdir, preexisting) {
                    // leave the filesystem as we found it, so the next run
                    // does not fail on an existing work directory
                    if workdir.exists() {
                        remove_directory(workdir, "cache work directory");
                    }
                    if !preexisting {
                        remove_directory(cache_path, "cache directory");
                    }
                    return Err(error);
                }
                workdir.clone()
            }
            None => cache_path.clone(),
        };

        info!(
            "using neighbor list cache in '{}' (cache_path '{}' {}, keep_cache={})",
            location.display(),
            cache_path.display(),
            if preexisting { "already existed" } else { "was created" },
            options.keep_cache,
        );

        return Ok(NeighborListCache {
            options: options,
            preexisting: preexisting,
            location: location,
            finished: false,
        });
    }

    /// Get the options used to create this cache
    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Get the directory where entries are read and written during the run,
    /// i.e. the work directory if any, and the cache path otherwise
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Did the cache path exist before this cache was created?
    pub fn preexisting(&self) -> bool {
        self.preexisting
    }

    /// Wrap the given `search`, caching its results in this cache. The
    /// returned value should not be used after this cache is torn down.
    pub fn with_search<S: NeighborSearch>(&self, search: S) -> CachedNeighborList<S> {
        CachedNeighborList::new(self.location.clone(), search)
    }

    /// Clean up the cache directories at the end of the run.
    ///
    /// If a work directory was used, it is synced back to the cache path
    /// when `keep_cache` is set, and then removed. If `keep_cache` is not set
    /// and the cache path was created by this cache, it is removed.
    pub fn teardown(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        let cache_path = &self.options.cache_path;
        if !self.options.keep_cache && !self.preexisting {
            remove_directory(cache_path, "cache directory");
        }

        if let Some(ref workdir) = self.options.cache_workdir {
            if self.options.keep_cache {
                if let Err(error) = copy_entries(workdir, cache_path) {
                    warn!(
                        "failed to sync cache from '{}' to '{}': {}",
                        workdir.display(), cache_path.display(), error
                    );
                }
            }

            remove_directory(workdir, "cache work directory");
        }
    }
}

/// Create the work directory, and fill it with the existing cache entries
fn prepare_workdir(cache_path: &Path, workdir: &Path, preexisting: bool) -> Result<(), Error> {
    fs::create_dir_all(workdir)?;
    if preexisting {
        copy_entries(cache_path, workdir)?;
    }
    return Ok(());
}

/// Copy all cache entries from `source` to `destination`, overwriting the
/// existing ones. Lock files and temporary files are not copied.
fn copy_entries(source: &Path, destination: &Path) -> Result<(), Error> {
    let entries = list_entries(source)?;
    let copy_options = fs_extra::dir::CopyOptions::new().overwrite(true);
    fs_extra::copy_items(entries.as_slice(), destination, &copy_options)?;
    return Ok(());
}

fn remove_directory(path: &Path, kind: &str) {
    if let Err(error) = fs::remove_dir_all(path) {
        warn!("failed to remove {} '{}': {}", kind, path.display(), error);
    }
}

impl Drop for NeighborListCache {
    fn drop(&mut self) {
        self.cleanup();
    }
}
