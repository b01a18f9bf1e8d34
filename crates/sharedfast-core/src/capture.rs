//! Taking a photo straight into a note folder.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Local};

/// Something that writes a photo to a path we choose.
pub trait Camera {
    fn capture_to(&self, path: &Path) -> io::Result<()>;
}

/// Runs an external program with the output path appended as its last argument.
#[derive(Debug, Clone)]
pub struct CommandCamera {
    argv: Vec<String>,
}

impl CommandCamera {
    /// Returns `None` for an empty argv.
    pub fn new(argv: Vec<String>) -> Option<Self> {
        if argv.is_empty() {
            None
        } else {
            Some(Self { argv })
        }
    }
}

impl Camera for CommandCamera {
    fn capture_to(&self, path: &Path) -> io::Result<()> {
        let status = Command::new(&self.argv[0])
            .args(&self.argv[1..])
            .arg(path)
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} exited with {status}", self.argv[0]),
            ))
        }
    }
}

/// Uses an existing image as the shot.
#[derive(Debug, Clone)]
pub struct FileCamera {
    image: PathBuf,
}

impl FileCamera {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
        }
    }
}

impl Camera for FileCamera {
    fn capture_to(&self, path: &Path) -> io::Result<()> {
        std::fs::copy(&self.image, path).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReport {
    pub file_name: String,
    pub path: PathBuf,
    pub saved: bool,
}

/// `IMG_<yyyyMMdd>_<HHmmss>.jpg`
pub fn capture_file_name(now: DateTime<Local>) -> String {
    format!("IMG_{}.jpg", now.format("%Y%m%d_%H%M%S"))
}

/// Points `camera` at a fresh file in `dir`. Errors are logged, not returned.
pub fn capture_into(dir: &Path, camera: &dyn Camera, now: DateTime<Local>) -> CaptureReport {
    let file_name = capture_file_name(now);
    let path = dir.join(&file_name);

    let result = std::fs::create_dir_all(dir).and_then(|()| camera.capture_to(&path));
    let saved = match result {
        Ok(()) => {
            tracing::info!(file = %path.display(), "image captured");
            true
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "capture failed");
            false
        }
    };

    CaptureReport {
        file_name,
        path,
        saved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 12, 5, 7).unwrap()
    }

    #[test]
    fn file_name_embeds_timestamp() {
        assert_eq!(capture_file_name(noon()), "IMG_20240309_120507.jpg");
    }

    #[test]
    fn file_camera_writes_into_folder() {
        let dir = tempdir().unwrap();
        let shot = dir.path().join("shot.jpg");
        std::fs::write(&shot, b"\xFF\xD8jpeg").unwrap();
        let folder = dir.path().join("Trip");

        let report = capture_into(&folder, &FileCamera::new(&shot), noon());
        assert!(report.saved);
        assert_eq!(report.path, folder.join("IMG_20240309_120507.jpg"));
        assert_eq!(std::fs::read(&report.path).unwrap(), b"\xFF\xD8jpeg");
    }

    #[test]
    fn missing_image_is_not_saved() {
        let dir = tempdir().unwrap();
        let report = capture_into(dir.path(), &FileCamera::new(dir.path().join("nope.jpg")), noon());
        assert!(!report.saved);
        assert!(!report.path.exists());
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(CommandCamera::new(Vec::new()).is_none());
    }
}
