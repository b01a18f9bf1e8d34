//! Persisted config (notes root, cache dir, share and camera programs) in the app data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app_data;

const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base directory that holds `SharedFastNotes/`. Defaults to the app data dir.
    pub notes_root: Option<String>,
    /// Where share archives are written. Defaults to the app cache dir.
    pub cache_dir: Option<String>,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
}

/// Programs that receive a shared archive, keyed by target (`facebook`, `whatsapp`, `gmail`, `chooser`).
/// The archive path is appended as the last argument.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareConfig {
    #[serde(default)]
    pub commands: BTreeMap<String, Vec<String>>,
}

/// Program that takes a photo. The output path is appended as the last argument.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub command: Option<Vec<String>>,
}

/// Path of the config file inside the app data directory.
pub fn config_path() -> Option<PathBuf> {
    app_data::app_data_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Load config from the app data directory. Returns default config if missing or invalid.
pub fn load_config() -> Config {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Config::default(),
    }
}

/// Load config from an explicit file. Missing or unparsable files yield the default.
pub fn load_config_from(path: &Path) -> Config {
    let Ok(s) = std::fs::read_to_string(path) else {
        return Config::default();
    };
    match toml::from_str(&s) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
            Config::default()
        }
    }
}

/// Save config to the app data directory.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoDataDir)?;
    save_config_to(config, &path)
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let s = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    std::fs::write(path, s).map_err(ConfigError::Write)
}

/// Set and persist the notes root.
pub fn set_notes_root(path: &Path) -> Result<(), ConfigError> {
    let path = path.canonicalize().map_err(ConfigError::Canonicalize)?;
    if !path.is_dir() {
        return Err(ConfigError::NotADirectory(path));
    }
    let mut config = load_config();
    config.notes_root = Some(path.to_string_lossy().into_owned());
    save_config(&config)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine app data directory")]
    NoDataDir,
    #[error("failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("failed to write config: {0}")]
    Write(std::io::Error),
    #[error("failed to resolve path: {0}")]
    Canonicalize(std::io::Error),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_default() {
        let dir = tempdir().unwrap();
        assert_eq!(load_config_from(&dir.path().join("nope.toml")), Config::default());
    }

    #[test]
    fn invalid_file_gives_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "notes_root = [").unwrap();
        assert_eq!(load_config_from(&path), Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config {
            notes_root: Some("/tmp/notes".into()),
            ..Config::default()
        };
        config
            .share
            .commands
            .insert("gmail".into(), vec!["thunderbird".into(), "-compose".into()]);
        config.capture.command = Some(vec!["fswebcam".into()]);

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn parses_share_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[share.commands]\nwhatsapp = [\"xdg-open\"]\n",
        )
        .unwrap();
        let config = load_config_from(&path);
        assert_eq!(config.share.commands["whatsapp"], vec!["xdg-open".to_string()]);
        assert!(config.notes_root.is_none());
        assert!(config.capture.command.is_none());
    }
}
