//! On-disk layout: `<base>/SharedFastNotes/<folder>/<file>` and `<cache>/<folder>.zip`.

use std::path::{Path, PathBuf};

use crate::app_data;
use crate::config::Config;

/// Name of the directory that holds every note folder.
pub const ROOT_DIR_NAME: &str = "SharedFastNotes";

/// Resolved locations for note folders and generated archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// `<base>/SharedFastNotes`
    pub root: PathBuf,
    /// Directory receiving share archives.
    pub cache: PathBuf,
}

impl Layout {
    pub fn new(base: &Path, cache: &Path) -> Self {
        Self {
            root: base.join(ROOT_DIR_NAME),
            cache: cache.to_path_buf(),
        }
    }

    /// Build from config, falling back to the app data and cache dirs, then to the temp dir.
    pub fn from_config(config: &Config) -> Self {
        let base = config
            .notes_root
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(app_data::app_data_dir)
            .unwrap_or_else(|| std::env::temp_dir().join("sharedfast"));
        let cache = config
            .cache_dir
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(app_data::app_cache_dir)
            .unwrap_or_else(|| std::env::temp_dir().join("sharedfast-cache"));
        Self::new(&base, &cache)
    }

    pub fn folder_dir(&self, title: &str) -> PathBuf {
        self.root.join(title)
    }

    pub fn archive_path(&self, title: &str) -> PathBuf {
        self.cache.join(format!("{title}.zip"))
    }
}
