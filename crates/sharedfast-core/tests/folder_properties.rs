use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use sharedfast_core::{
    create_folder, import_into, list_folder_files, list_folders, share_folder, zip_folder,
    CreateOutcome, Layout, MemorySource, PathSource, ShareError, ShareHandler, ShareRequest,
    ShareTarget, SkipReason,
};
use tempfile::tempdir;

fn zip_contents(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut out = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        out.push((entry.name().to_string(), data));
    }
    out.sort();
    out
}

#[test]
fn zip_of_two_files_has_two_rooted_entries() {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path(), &dir.path().join("cache"));
    create_folder(&layout.root, "Notes").unwrap();
    let folder = layout.folder_dir("Notes");
    std::fs::write(folder.join("a.txt"), b"text body").unwrap();
    std::fs::write(folder.join("b.jpg"), [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

    zip_folder(&folder, &layout.archive_path("Notes")).unwrap();
    assert_eq!(
        zip_contents(&layout.archive_path("Notes")),
        vec![
            ("Notes/a.txt".to_string(), b"text body".to_vec()),
            ("Notes/b.jpg".to_string(), vec![0xFF, 0xD8, 0xFF, 0xE0]),
        ]
    );
}

#[test]
fn share_overwrites_previous_archive() {
    struct Accept;
    impl ShareHandler for Accept {
        fn hand_off(&self, _request: &ShareRequest) -> Result<(), ShareError> {
            Ok(())
        }
    }

    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path(), &dir.path().join("cache"));
    create_folder(&layout.root, "Notes").unwrap();
    std::fs::write(layout.folder_dir("Notes").join("a.txt"), b"1").unwrap();
    share_folder(&layout, "Notes", ShareTarget::Chooser, &Accept).unwrap();
    std::fs::write(layout.folder_dir("Notes").join("b.txt"), b"2").unwrap();
    let request = share_folder(&layout, "Notes", ShareTarget::Chooser, &Accept).unwrap();

    let names: Vec<String> = zip_contents(&request.archive).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Notes/a.txt", "Notes/b.txt"]);
}

#[test]
fn unnamed_import_creates_exactly_one_file() {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("Inbox");
    let report = import_into(&folder, &MemorySource::new(None, b"payload".to_vec()));
    assert!(report.succeeded());
    let files = list_folder_files(&folder);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, report.file_name);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn create_adds_exactly_one_folder(names in proptest::collection::btree_set("[A-Za-z0-9 _-]{1,12}", 1..6)) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("SharedFastNotes");
        let mut expected = std::collections::BTreeSet::new();
        for name in &names {
            let before = list_folders(&root).len();
            let outcome = create_folder(&root, name).unwrap();
            let title = name.trim();
            let fresh = !title.is_empty() && expected.insert(title.to_string());
            match outcome {
                CreateOutcome::Created(folder) => {
                    prop_assert!(fresh);
                    prop_assert_eq!(folder.title, title);
                    prop_assert_eq!(list_folders(&root).len(), before + 1);
                }
                CreateOutcome::Skipped(SkipReason::Blank) => prop_assert!(title.is_empty()),
                CreateOutcome::Skipped(SkipReason::AlreadyExists) => {
                    prop_assert!(!fresh);
                    prop_assert_eq!(list_folders(&root).len(), before);
                }
            }
        }
    }

    #[test]
    fn import_preserves_bytes(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let dir = tempdir().unwrap();
        let src = dir.path().join("source.bin");
        std::fs::write(&src, &data).unwrap();
        let report = import_into(&dir.path().join("Folder"), &PathSource::new(&src));
        prop_assert_eq!(report.bytes_copied, Some(data.len() as u64));
        prop_assert_eq!(std::fs::read(&report.path).unwrap(), data);
    }

    #[test]
    fn listing_is_newest_first(stamps in proptest::collection::vec(0u64..1_000_000, 1..12)) {
        let dir = tempdir().unwrap();
        for (i, secs) in stamps.iter().enumerate() {
            let path = dir.path().join(format!("file{i}.txt"));
            std::fs::write(&path, b"x").unwrap();
            File::options()
                .write(true)
                .open(&path)
                .unwrap()
                .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(*secs))
                .unwrap();
        }
        let files = list_folder_files(dir.path());
        prop_assert_eq!(files.len(), stamps.len());
        prop_assert!(files.windows(2).all(|w| w[0].modified >= w[1].modified));
    }
}
