//! Copying picked files into a note folder.
//!
//! Failures are logged and swallowed: the caller always gets a report, and the
//! destination may be missing or partially written.

use std::fs::File;
use std::io::{self, BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Something the user picked: a readable byte stream with an optional display name.
pub trait ImportSource {
    /// Human-facing name of the source, if one can be resolved.
    fn display_name(&self) -> Option<String>;
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
}

impl PathSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImportSource for PathSource {
    fn display_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(&self.path)?))
    }
}

/// Bytes already in memory (e.g. read from stdin).
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: Option<String>,
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: Option<String>, data: Vec<u8>) -> Self {
        Self { name, data }
    }
}

impl ImportSource for MemorySource {
    fn display_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(&self.data)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub file_name: String,
    pub path: PathBuf,
    /// `None` when the copy failed.
    pub bytes_copied: Option<u64>,
}

impl ImportReport {
    pub fn succeeded(&self) -> bool {
        self.bytes_copied.is_some()
    }
}

/// Destination name for `source`: the last component of its display name, or a random UUID.
pub fn resolve_file_name(source: &dyn ImportSource) -> String {
    source
        .display_name()
        .and_then(|name| {
            Path::new(name.trim())
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Copies `source` into `dir`, creating `dir` if needed.
pub fn import_into(dir: &Path, source: &dyn ImportSource) -> ImportReport {
    let file_name = resolve_file_name(source);
    let path = dir.join(&file_name);

    let bytes_copied = match copy_to(dir, source, &path) {
        Ok(n) => {
            tracing::info!(file = %path.display(), bytes = n, "imported");
            Some(n)
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "import failed");
            None
        }
    };

    ImportReport {
        file_name,
        path,
        bytes_copied,
    }
}

fn copy_to(dir: &Path, source: &dyn ImportSource, path: &Path) -> io::Result<u64> {
    std::fs::create_dir_all(dir)?;
    let mut reader = source.open()?;
    let mut writer = BufWriter::new(File::create(path)?);
    let n = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(n)
}
