//! Files inside one note folder, newest first.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::folders::format_time;

/// Extensions rendered as image thumbnails (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Format used for the per-file "Date" line.
pub const FILE_DATE_FORMAT: &str = "%d %b %Y - %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    #[serde(skip)]
    pub modified: SystemTime,
    /// Extension as found on disk (case preserved); empty when there is none.
    pub extension: String,
    pub size: u64,
}

impl FileEntry {
    pub fn is_image(&self) -> bool {
        let lower = self.extension.to_ascii_lowercase();
        IMAGE_EXTENSIONS.contains(&lower.as_str())
    }

    pub fn display_date(&self) -> String {
        format_time(self.modified, FILE_DATE_FORMAT)
    }
}

/// Lists regular files directly under `dir`, sorted by last-modified descending.
/// A missing directory yields an empty list.
pub fn list_folder_files(dir: &Path) -> Vec<FileEntry> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "folder not readable");
            return Vec::new();
        }
    };

    let mut files: Vec<FileEntry> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let meta = entry.metadata().ok()?;
            if !meta.is_file() {
                return None;
            }
            let path = entry.path();
            let extension = path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default();
            Some(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                extension,
                size: meta.len(),
                path,
            })
        })
        .collect();

    files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    fn touch(path: &Path, secs: u64) {
        std::fs::write(path, b"data").unwrap();
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn newest_first() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("old.txt"), 1_000);
        touch(&dir.path().join("new.png"), 3_000);
        touch(&dir.path().join("mid.pdf"), 2_000);

        let names: Vec<String> = list_folder_files(dir.path()).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["new.png", "mid.pdf", "old.txt"]);
    }

    #[test]
    fn skips_subdirectories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        let files = list_folder_files(dir.path());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "a.txt");
        assert_eq!(files[0].size, 1);
    }

    #[test]
    fn missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(list_folder_files(&dir.path().join("gone")).is_empty());
    }

    #[test]
    fn image_detection_by_extension() {
        let dir = tempdir().unwrap();
        for name in ["a.JPG", "b.jpeg", "c.png", "d.gif", "e"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let mut images: Vec<String> = list_folder_files(dir.path())
            .into_iter()
            .filter(FileEntry::is_image)
            .map(|f| f.name)
            .collect();
        images.sort();
        assert_eq!(images, vec!["a.JPG", "b.jpeg", "c.png"]);
    }

    #[test]
    fn display_date_has_time_part() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();
        let date = list_folder_files(dir.path())[0].display_date();
        assert!(date.contains(" - "));
        assert!(date.ends_with(|c: char| c.is_ascii_digit()));
    }
}
