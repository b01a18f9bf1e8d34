//! Zipping a note folder for sharing.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub output: PathBuf,
    /// Entry names in write order.
    pub entries: Vec<String>,
    pub bytes: u64,
}

/// Writes every regular file under `source` into a zip at `output`.
///
/// Entry names are relative to the parent of `source`, so the folder itself is the
/// top-level directory of the archive. Symlinks and special files are skipped.
/// Any failure aborts; a partially written `output` is left behind.
pub fn zip_folder(source: &Path, output: &Path) -> Result<ArchiveSummary, ArchiveError> {
    if !source.is_dir() {
        return Err(ArchiveError::NotADirectory(source.to_path_buf()));
    }
    let base = source.parent().unwrap_or(source);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ArchiveError::Io(parent.to_path_buf(), e))?;
    }
    let file = File::create(output).map_err(|e| ArchiveError::Io(output.to_path_buf(), e))?;
    let own_output = output.canonicalize().map_err(|e| ArchiveError::Io(output.to_path_buf(), e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::new();
    let mut bytes = 0;
    for entry in WalkDir::new(source)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() || is_same_file(entry.path(), &own_output) {
            continue;
        }
        let path = entry.path();
        let name = entry_name(path.strip_prefix(base).unwrap_or(path));

        zip.start_file(name.as_str(), options)?;
        let mut input = File::open(path).map_err(|e| ArchiveError::Io(path.to_path_buf(), e))?;
        bytes += io::copy(&mut input, &mut zip).map_err(|e| ArchiveError::Io(path.to_path_buf(), e))?;
        tracing::trace!(entry = %name, "zipped");
        entries.push(name);
    }

    zip.finish()?;
    tracing::info!(
        source = %source.display(),
        output = %output.display(),
        entries = entries.len(),
        "archive written"
    );
    Ok(ArchiveSummary {
        output: output.to_path_buf(),
        entries,
        bytes,
    })
}

fn is_same_file(path: &Path, canonical: &Path) -> bool {
    path.file_name() == canonical.file_name()
        && path.canonicalize().map_or(false, |p| p == canonical)
}

/// `/`-separated name built from the normal components of `rel`.
fn entry_name(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("io error for {0}: {1}")]
    Io(PathBuf, io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
