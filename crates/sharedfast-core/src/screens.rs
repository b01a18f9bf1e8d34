//! Screen state for the folder list and the folder detail view.
//!
//! Both screens mirror the filesystem and re-read it after every action.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::capture::{capture_into, Camera};
use crate::contents::{list_folder_files, FileEntry};
use crate::folders::{create_folder, list_folders, CreateOutcome, Folder, FolderError};
use crate::import::{import_into, ImportSource};
use crate::layout::Layout;
use crate::share::{share_folder, ShareError, ShareHandler, ShareTarget};

/// Short user-facing message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Imported(String),
    ImageCaptured,
    Shared(PathBuf),
    AppNotInstalled,
    ShareFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Imported(name) => write!(f, "Imported: {name}"),
            Notice::ImageCaptured => f.write_str("Image captured"),
            Notice::Shared(path) => match path.file_name() {
                Some(name) => write!(f, "Shared {}", name.to_string_lossy()),
                None => write!(f, "Shared {}", path.display()),
            },
            Notice::AppNotInstalled => f.write_str("App not installed"),
            Notice::ShareFailed(reason) => write!(f, "Share failed: {reason}"),
        }
    }
}

/// The "Add New Folder" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewFolderDialog {
    pub open: bool,
    pub name: String,
}

#[derive(Debug)]
pub struct HomeScreen {
    layout: Layout,
    folders: Vec<Folder>,
    dialog: NewFolderDialog,
    selected: Option<String>,
}

impl HomeScreen {
    pub fn load(layout: Layout) -> Self {
        let folders = list_folders(&layout.root);
        Self {
            layout,
            folders,
            dialog: NewFolderDialog::default(),
            selected: None,
        }
    }

    pub fn refresh(&mut self) {
        self.folders = list_folders(&self.layout.root);
        let still_listed = self
            .selected
            .as_ref()
            .map_or(true, |title| self.folders.iter().any(|f| &f.title == title));
        if !still_listed {
            self.selected = None;
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn dialog(&self) -> &NewFolderDialog {
        &self.dialog
    }

    pub fn open_dialog(&mut self) {
        self.dialog.open = true;
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog.open = false;
    }

    pub fn set_dialog_name(&mut self, name: impl Into<String>) {
        self.dialog.name = name.into();
    }

    /// "Add": creates the folder. Blank input keeps the dialog open; anything else
    /// clears and closes it, including when the folder already existed.
    pub fn confirm_dialog(&mut self) -> Result<CreateOutcome, FolderError> {
        let outcome = create_folder(&self.layout.root, &self.dialog.name)?;
        if self.dialog.name.trim().is_empty() {
            return Ok(outcome);
        }
        self.dialog = NewFolderDialog::default();
        self.refresh();
        Ok(outcome)
    }

    /// Selects `title`, or clears the selection when it is already selected.
    pub fn toggle_selected(&mut self, title: &str) {
        if self.selected.as_deref() == Some(title) {
            self.selected = None;
        } else if self.folders.iter().any(|f| f.title == title) {
            self.selected = Some(title.to_string());
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Shares the selected folder. `None` when nothing is selected.
    pub fn share_selected(
        &self,
        target: ShareTarget,
        handler: &dyn ShareHandler,
    ) -> Option<Notice> {
        let title = self.selected.as_deref()?;
        let notice = match share_folder(&self.layout, title, target, handler) {
            Ok(request) => Notice::Shared(request.archive),
            Err(ShareError::TargetUnavailable(_)) => Notice::AppNotInstalled,
            Err(e) => {
                tracing::error!(folder = title, error = %e, "share failed");
                Notice::ShareFailed(e.to_string())
            }
        };
        Some(notice)
    }
}

/// One line in the folder detail list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRow {
    Image { name: String, date: String },
    Plain { name: String },
}

impl From<&FileEntry> for FileRow {
    fn from(entry: &FileEntry) -> Self {
        if entry.is_image() {
            FileRow::Image {
                name: entry.name.clone(),
                date: entry.display_date(),
            }
        } else {
            FileRow::Plain {
                name: entry.name.clone(),
            }
        }
    }
}

#[derive(Debug)]
pub struct FolderScreen {
    title: String,
    dir: PathBuf,
    files: Vec<FileEntry>,
}

impl FolderScreen {
    /// Opens the folder, creating its directory when missing.
    pub fn open(layout: &Layout, title: &str) -> Result<Self, FolderError> {
        crate::folders::validate_title(title)?;
        let dir = layout.folder_dir(title);
        std::fs::create_dir_all(&dir).map_err(|e| FolderError::Io(dir.clone(), e))?;
        let files = list_folder_files(&dir);
        Ok(Self {
            title: title.to_string(),
            dir,
            files,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn rows(&self) -> Vec<FileRow> {
        self.files.iter().map(FileRow::from).collect()
    }

    pub fn refresh(&mut self) {
        self.files = list_folder_files(&self.dir);
    }

    /// Imports `source`. The notice reports the name even when the copy failed.
    pub fn import(&mut self, source: &dyn ImportSource) -> Notice {
        let report = import_into(&self.dir, source);
        self.refresh();
        Notice::Imported(report.file_name)
    }

    pub fn capture(&mut self, camera: &dyn Camera) -> Notice {
        capture_into(&self.dir, camera, Local::now());
        self.refresh();
        Notice::ImageCaptured
    }
}
