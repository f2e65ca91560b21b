use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

/// Cache file, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = ".swpc-alert-cache.json";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to write alert cache: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize alert cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What `load_with_outcome` found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLoad {
    /// Parsed successfully; holds the number of fingerprints.
    Loaded(usize),
    /// No file yet (first run).
    Missing,
    /// File exists but could not be read or parsed. Treated as empty.
    Corrupt,
}

/// Fingerprints of alerts that have already been notified.
///
/// Persisted as a JSON object of `fingerprint -> true`. Entries are never
/// removed.
#[derive(Debug, Clone)]
pub struct AlertCache {
    path: PathBuf,
    seen: HashSet<String>,
}

impl AlertCache {
    /// Empty cache that will persist to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seen: HashSet::new(),
        }
    }

    /// Load from `path`, starting empty if the file is missing or unreadable.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (cache, outcome) = Self::load_with_outcome(&path);
        match outcome {
            CacheLoad::Loaded(count) => {
                info!(path = %path.display(), count, "Loaded alert cache")
            }
            CacheLoad::Missing => {
                info!(path = %path.display(), "No alert cache found, starting empty")
            }
            CacheLoad::Corrupt => {
                warn!(path = %path.display(), "Alert cache unreadable, starting empty")
            }
        }
        cache
    }

    pub fn load_with_outcome(path: &Path) -> (Self, CacheLoad) {
        let mut cache = Self::new(path);

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return (cache, CacheLoad::Missing),
            Err(_) => return (cache, CacheLoad::Corrupt),
        };

        match serde_json::from_str::<BTreeMap<String, bool>>(&raw) {
            Ok(entries) => {
                cache.seen = entries
                    .into_iter()
                    .filter_map(|(fp, seen)| seen.then_some(fp))
                    .collect();
                let count = cache.seen.len();
                (cache, CacheLoad::Loaded(count))
            }
            Err(_) => (cache, CacheLoad::Corrupt),
        }
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.seen.contains(fingerprint)
    }

    /// Add a fingerprint. Returns `false` if it was already present.
    pub fn record(&mut self, fingerprint: impl Into<String>) -> bool {
        self.seen.insert(fingerprint.into())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the cache file with the current set.
    pub fn save(&self) -> Result<(), CacheError> {
        // Sorted so the file is stable between saves.
        let entries: BTreeMap<&str, bool> = self.seen.iter().map(|fp| (fp.as_str(), true)).collect();
        let json = serde_json::to_vec(&entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
