//! Note folders: the immediate subdirectories of the notes root.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Format used for the folder "Created" line.
pub const FOLDER_DATE_FORMAT: &str = "%d %b %Y";

/// A folder as shown in the folder list. The title is also the directory name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub title: String,
    /// Directory mtime formatted with [`FOLDER_DATE_FORMAT`]. Computed at list time, never stored.
    pub created_time: String,
}

/// Why a create request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Folder),
    Skipped(SkipReason),
}

pub(crate) fn format_time(time: SystemTime, fmt: &str) -> String {
    DateTime::<Local>::from(time).format(fmt).to_string()
}

/// Lists folders under `root`. A missing or unreadable root yields an empty list.
/// Sorted by title so repeated listings are stable.
pub fn list_folders(root: &Path) -> Vec<Folder> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(root = %root.display(), error = %e, "notes root not readable");
            return Vec::new();
        }
    };

    let mut folders: Vec<Folder> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let meta = entry.metadata().ok()?;
            if !meta.is_dir() {
                return None;
            }
            let Ok(title) = entry.file_name().into_string() else {
                tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 folder name");
                return None;
            };
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            Some(Folder {
                title,
                created_time: format_time(modified, FOLDER_DATE_FORMAT),
            })
        })
        .collect();
    folders.sort_by(|a, b| a.title.cmp(&b.title));
    folders
}

/// Rejects titles that would not stay a single path segment under the root.
pub fn validate_title(title: &str) -> Result<(), FolderError> {
    let reason = if title.contains('/') {
        "contains '/'"
    } else if title.contains('\\') {
        "contains '\\'"
    } else if title.contains("..") {
        "contains '..'"
    } else if title.contains('\0') {
        "contains a NUL byte"
    } else if title == "." {
        "is '.'"
    } else {
        return Ok(());
    };
    Err(FolderError::InvalidName {
        name: title.to_string(),
        reason,
    })
}

/// Creates `<root>/<name>` after trimming `name`.
/// Blank names and names that already exist are skipped without touching the filesystem.
pub fn create_folder(root: &Path, name: &str) -> Result<CreateOutcome, FolderError> {
    let title = name.trim();
    if title.is_empty() {
        return Ok(CreateOutcome::Skipped(SkipReason::Blank));
    }
    validate_title(title)?;

    let dir = root.join(title);
    if dir.exists() {
        tracing::debug!(folder = title, "folder already exists");
        return Ok(CreateOutcome::Skipped(SkipReason::AlreadyExists));
    }

    std::fs::create_dir_all(root).map_err(|e| FolderError::Io(root.to_path_buf(), e))?;
    match std::fs::create_dir(&dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(CreateOutcome::Skipped(SkipReason::AlreadyExists));
        }
        Err(e) => return Err(FolderError::Io(dir, e)),
    }
    tracing::info!(folder = title, path = %dir.display(), "created folder");

    Ok(CreateOutcome::Created(Folder {
        title: title.to_string(),
        created_time: format_time(SystemTime::now(), FOLDER_DATE_FORMAT),
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum FolderError {
    #[error("invalid folder name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("io error for {0}: {1}")]
    Io(PathBuf, io::Error),
}
