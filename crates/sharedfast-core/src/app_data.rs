//! Where SharedFast stores its own data (config, note folders, share archives).
//!
//! Note folders live under the data dir unless the config points elsewhere.

use std::path::PathBuf;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "SharedFast", "SharedFast")
}

/// Returns the directory where SharedFast stores config and note folders.
/// On Linux: `~/.local/share/sharedfast/`.
/// Creates the directory if it doesn't exist; returns `None` if we can't determine the path.
pub fn app_data_dir() -> Option<PathBuf> {
    let dir = project_dirs()?.data_local_dir().to_path_buf();
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Returns the cache directory used for generated share archives.
pub fn app_cache_dir() -> Option<PathBuf> {
    let dir = project_dirs()?.cache_dir().to_path_buf();
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_is_some() {
        assert!(app_data_dir().is_some());
    }

    #[test]
    fn cache_dir_differs_from_data_dir() {
        let data = app_data_dir().unwrap();
        let cache = app_cache_dir().unwrap();
        assert_ne!(data, cache);
    }
}
