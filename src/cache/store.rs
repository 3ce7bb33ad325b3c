//! Cache store for the serialized inventory and index artifacts

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::inventory::{Inventory, InventoryIndex};

/// File name of the inventory artifact
const INVENTORY_FILE: &str = "inventory.json";

/// File name of the index artifact
const INDEX_FILE: &str = "index.json";

/// Errors raised when reading or writing the cache artifacts
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing an artifact failed
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// An artifact exists but does not parse
    #[error("malformed cache content: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Reads and writes the two cache artifacts under a single directory
///
/// The default directory is the platform cache location (`~/.cache/do-inventory/`
/// on Linux); a custom directory can be supplied through settings or arguments.
/// There is no locking: concurrent runs are last-writer-wins, which is accepted
/// for a per-host, best-effort cache.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where the artifacts are stored
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Creates a store using the platform cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no
    /// home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "do-inventory")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { cache_dir })
    }

    /// Creates a store over a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Returns the path of the inventory artifact
    fn inventory_path(&self) -> PathBuf {
        self.cache_dir.join(INVENTORY_FILE)
    }

    /// Returns the path of the index artifact
    fn index_path(&self) -> PathBuf {
        self.cache_dir.join(INDEX_FILE)
    }

    /// Binary freshness check for the cached snapshots.
    ///
    /// Returns true only when the inventory artifact exists, its modification
    /// time plus `max_age` seconds is still in the future, and the index
    /// artifact exists too. Anything else, including unreadable metadata,
    /// counts as stale and forces a rebuild. The default max age of 0 makes
    /// the cache always stale.
    pub fn is_valid(&self, max_age: u64) -> bool {
        let Ok(metadata) = fs::metadata(self.inventory_path()) else {
            return false;
        };
        let Ok(modified) = metadata.modified() else {
            return false;
        };

        let expires_at = DateTime::<Utc>::from(modified) + Duration::seconds(max_age as i64);
        let fresh = expires_at > Utc::now() && self.index_path().is_file();
        debug!(fresh, max_age, "checked cache validity");
        fresh
    }

    /// Writes both artifacts, creating the cache directory if needed.
    ///
    /// Keys are sorted by the map types themselves, so repeated writes of
    /// unchanged data produce byte-identical files.
    pub fn write(&self, inventory: &Inventory, index: &InventoryIndex) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)?;
        fs::write(
            self.inventory_path(),
            serde_json::to_string_pretty(inventory)?,
        )?;
        fs::write(self.index_path(), serde_json::to_string_pretty(index)?)?;
        Ok(())
    }

    /// Reads the serialized inventory back verbatim.
    ///
    /// List mode serves this text directly instead of re-serializing, so a
    /// cached run emits exactly the bytes the refreshing run wrote.
    pub fn read_inventory_text(&self) -> Result<String, CacheError> {
        Ok(fs::read_to_string(self.inventory_path())?)
    }

    /// Reads and parses the index artifact.
    ///
    /// A missing or malformed artifact is a hard failure for this read path;
    /// callers avoid it in the normal flow by checking `is_valid` first.
    pub fn read_index(&self) -> Result<InventoryIndex, CacheError> {
        let text = fs::read_to_string(self.index_path())?;
        Ok(serde_json::from_str(&text)?)
    }
}
