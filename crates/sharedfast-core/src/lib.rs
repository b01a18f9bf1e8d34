//! All backend logic independent of how the app is run.
//!
//! Note folders live under `<base>/SharedFastNotes/`, shared archives under the
//! cache dir (see [layout]). Everything is re-read from disk on demand; there is
//! no index or database.

pub mod app_data;
pub mod archive;
pub mod capture;
pub mod config;
pub mod contents;
pub mod folders;
pub mod import;
pub mod layout;
pub mod log;
pub mod screens;
pub mod share;

pub use app_data::{app_cache_dir, app_data_dir};
pub use archive::{zip_folder, ArchiveError, ArchiveSummary};
pub use capture::{capture_file_name, capture_into, Camera, CaptureReport, CommandCamera, FileCamera};
pub use config::{load_config, load_config_from, save_config, set_notes_root, Config, ConfigError};
pub use contents::{list_folder_files, FileEntry};
pub use folders::{create_folder, list_folders, CreateOutcome, Folder, FolderError, SkipReason};
pub use import::{import_into, ImportReport, ImportSource, MemorySource, PathSource};
pub use layout::{Layout, ROOT_DIR_NAME};
pub use screens::{FileRow, FolderScreen, HomeScreen, NewFolderDialog, Notice};
pub use share::{share_folder, CommandShareHandler, ShareError, ShareHandler, ShareRequest, ShareTarget};

/// Returns a short status string. Used to verify the backend is wired up.
pub fn status() -> &'static str {
    "sharedfast-core ready"
}
