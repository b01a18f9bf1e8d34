//! Handing a zipped folder to another application.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::str::FromStr;

use crate::archive::{zip_folder, ArchiveError};
use crate::config::ShareConfig;
use crate::folders::{validate_title, FolderError};
use crate::layout::Layout;

pub const ZIP_MIME_TYPE: &str = "application/zip";

/// Where a share goes: a specific app, or an open chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareTarget {
    Facebook,
    WhatsApp,
    Gmail,
    Chooser,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 4] = [
        ShareTarget::Facebook,
        ShareTarget::WhatsApp,
        ShareTarget::Gmail,
        ShareTarget::Chooser,
    ];

    /// Key used in `[share.commands]` and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            ShareTarget::Facebook => "facebook",
            ShareTarget::WhatsApp => "whatsapp",
            ShareTarget::Gmail => "gmail",
            ShareTarget::Chooser => "chooser",
        }
    }

    /// Android package of the receiving app; `None` for the chooser.
    pub fn package(self) -> Option<&'static str> {
        match self {
            ShareTarget::Facebook => Some("com.facebook.katana"),
            ShareTarget::WhatsApp => Some("com.whatsapp"),
            ShareTarget::Gmail => Some("com.google.android.gm"),
            ShareTarget::Chooser => None,
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ShareTarget {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ShareTarget::ALL
            .into_iter()
            .find(|t| t.key() == lower || t.package() == Some(lower.as_str()))
            .or_else(|| (lower == "bluetooth").then_some(ShareTarget::Chooser))
            .ok_or(ShareError::UnknownTarget(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub archive: PathBuf,
    pub mime_type: &'static str,
    pub target: ShareTarget,
}

/// The platform side of a share: delivers the archive to the target.
pub trait ShareHandler {
    fn hand_off(&self, request: &ShareRequest) -> Result<(), ShareError>;
}

/// Runs a configured program per target with the archive path appended.
#[derive(Debug, Clone, Default)]
pub struct CommandShareHandler {
    commands: BTreeMap<String, Vec<String>>,
}

impl CommandShareHandler {
    pub fn from_config(config: &ShareConfig) -> Self {
        Self {
            commands: config.commands.clone(),
        }
    }
}

impl ShareHandler for CommandShareHandler {
    fn hand_off(&self, request: &ShareRequest) -> Result<(), ShareError> {
        let argv = self
            .commands
            .get(request.target.key())
            .filter(|argv| !argv.is_empty());
        let Some(argv) = argv else {
            if request.target == ShareTarget::Chooser {
                tracing::info!(archive = %request.archive.display(), "no chooser program configured");
                return Ok(());
            }
            return Err(ShareError::TargetUnavailable(request.target));
        };

        let status = Command::new(&argv[0])
            .args(&argv[1..])
            .arg(&request.archive)
            .status()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ShareError::TargetUnavailable(request.target),
                _ => ShareError::Launch(argv[0].clone(), e),
            })?;
        if !status.success() {
            return Err(ShareError::Launch(
                argv[0].clone(),
                io::Error::new(io::ErrorKind::Other, format!("exited with {status}")),
            ));
        }
        Ok(())
    }
}

/// Zips the folder named `title` into the cache dir, then hands the archive to `handler`.
pub fn share_folder(
    layout: &Layout,
    title: &str,
    target: ShareTarget,
    handler: &dyn ShareHandler,
) -> Result<ShareRequest, ShareError> {
    validate_title(title)?;
    let archive = layout.archive_path(title);
    zip_folder(&layout.folder_dir(title), &archive)?;

    let request = ShareRequest {
        archive,
        mime_type: ZIP_MIME_TYPE,
        target,
    };
    handler.hand_off(&request)?;
    tracing::info!(folder = title, %target, "shared folder");
    Ok(request)
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("unknown share target: {0}")]
    UnknownTarget(String),
    #[error("no app available for {0}")]
    TargetUnavailable(ShareTarget),
    #[error("failed to launch {0}: {1}")]
    Launch(String, io::Error),
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Folder(#[from] FolderError),
}
