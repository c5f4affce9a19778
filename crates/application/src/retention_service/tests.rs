use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use datasweep_core::{AppError, AppResult};
use datasweep_domain::{FileCandidate, RetentionAction, RetentionRequest};

use crate::retention_ports::{DirectoryLister, FileActionExecutor};

use super::RetentionService;

const ROOT: &str = "/srv/inbox";

fn threshold() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(|| unreachable!())
}

/// In-memory directory: file paths mapped to modification instants.
#[derive(Default)]
struct FakeDirectory {
    missing: bool,
    files: Mutex<Vec<(PathBuf, DateTime<Utc>)>>,
    directories: Mutex<BTreeSet<PathBuf>>,
    failing_paths: BTreeSet<PathBuf>,
}

impl FakeDirectory {
    fn with_files(files: &[(&str, i64)]) -> Self {
        let files = files
            .iter()
            .map(|(name, offset_seconds)| {
                (
                    Path::new(ROOT).join(name),
                    threshold() + Duration::seconds(*offset_seconds),
                )
            })
            .collect();

        Self {
            files: Mutex::new(files),
            ..Self::default()
        }
    }

    fn paths(&self) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    fn has_directory(&self, path: &Path) -> bool {
        self.directories
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(path)
    }
}

impl DirectoryLister for FakeDirectory {
    fn list_regular_files(&self, directory: &Path) -> AppResult<Vec<FileCandidate>> {
        if self.missing {
            return Err(AppError::Directory(format!(
                "'{}' does not exist",
                directory.display()
            )));
        }

        Ok(self
            .files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|(path, _)| path.parent() == Some(directory))
            .map(|(path, modified_at)| {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                FileCandidate::new(name, path.clone(), *modified_at)
            })
            .collect())
    }
}

impl FileActionExecutor for FakeDirectory {
    fn ensure_directory(&self, directory: &Path) -> AppResult<()> {
        self.directories
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(directory.to_path_buf());
        Ok(())
    }

    fn move_file(&self, source: &Path, destination: &Path) -> AppResult<()> {
        if self.failing_paths.contains(source) {
            return Err(AppError::FileAction(format!(
                "permission denied: {}",
                source.display()
            )));
        }

        let mut files = self
            .files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if files.iter().any(|(path, _)| path == destination) {
            return Err(AppError::FileAction(format!(
                "'{}' already exists",
                destination.display()
            )));
        }

        let entry = files
            .iter_mut()
            .find(|(path, _)| path == source)
            .ok_or_else(|| AppError::FileAction(format!("'{}' not found", source.display())))?;
        entry.0 = destination.to_path_buf();
        Ok(())
    }

    fn delete_file(&self, path: &Path) -> AppResult<()> {
        if self.failing_paths.contains(path) {
            return Err(AppError::FileAction(format!(
                "permission denied: {}",
                path.display()
            )));
        }

        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .retain(|(stored, _)| stored != path);
        Ok(())
    }
}

fn build_service(directory: Arc<FakeDirectory>) -> RetentionService {
    RetentionService::new(directory.clone(), directory)
}

#[test]
fn move_archives_only_files_newer_than_threshold() {
    let directory = Arc::new(FakeDirectory::with_files(&[
        ("new.txt", 60),
        ("old.txt", -60),
        ("boundary.txt", 0),
    ]));
    let service = build_service(directory.clone());

    let outcome = service.run(&RetentionRequest::new(
        ROOT,
        threshold(),
        RetentionAction::Move,
    ));
    assert!(outcome.is_ok());
    let outcome = outcome.unwrap_or_else(|_| unreachable!());

    assert_eq!(outcome.processed_count, 1);
    assert!(outcome.is_complete());
    assert!(directory.has_directory(Path::new("/srv/inbox/Archived")));

    let paths = directory.paths();
    assert!(paths.contains(&PathBuf::from("/srv/inbox/Archived/new.txt")));
    assert!(paths.contains(&PathBuf::from("/srv/inbox/old.txt")));
    assert!(paths.contains(&PathBuf::from("/srv/inbox/boundary.txt")));
    assert!(!paths.contains(&PathBuf::from("/srv/inbox/new.txt")));
}

#[test]
fn delete_removes_qualifying_files() {
    let directory = Arc::new(FakeDirectory::with_files(&[
        ("a.log", 1),
        ("b.log", 3_600),
        ("c.log", -1),
    ]));
    let service = build_service(directory.clone());

    let outcome = service.run(&RetentionRequest::new(
        ROOT,
        threshold(),
        RetentionAction::Delete,
    ));
    assert!(outcome.is_ok());
    assert_eq!(
        outcome.map(|outcome| outcome.processed_count).ok(),
        Some(2)
    );
    assert_eq!(directory.paths(), vec![PathBuf::from("/srv/inbox/c.log")]);
    assert!(!directory.has_directory(Path::new("/srv/inbox/Archived")));
}

#[test]
fn second_move_sweep_processes_nothing() {
    let directory = Arc::new(FakeDirectory::with_files(&[("a.csv", 10), ("b.csv", 20)]));
    let service = build_service(directory);
    let request = RetentionRequest::new(ROOT, threshold(), RetentionAction::Move);

    let first = service.run(&request);
    assert_eq!(first.map(|outcome| outcome.processed_count).ok(), Some(2));

    let second = service.run(&request);
    assert_eq!(second.map(|outcome| outcome.processed_count).ok(), Some(0));
}

#[test]
fn failed_actions_are_reported_and_not_counted() {
    let mut fake = FakeDirectory::with_files(&[("locked.db", 5), ("free.db", 5)]);
    fake.failing_paths
        .insert(PathBuf::from("/srv/inbox/locked.db"));
    let directory = Arc::new(fake);
    let service = build_service(directory.clone());

    let outcome = service.run(&RetentionRequest::new(
        ROOT,
        threshold(),
        RetentionAction::Delete,
    ));
    assert!(outcome.is_ok());
    let outcome = outcome.unwrap_or_else(|_| unreachable!());

    assert_eq!(outcome.processed_count, 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(
        outcome.failures[0].path,
        PathBuf::from("/srv/inbox/locked.db")
    );
    assert_eq!(outcome.failures[0].kind, "file_action_error");
    assert_eq!(directory.paths(), vec![PathBuf::from("/srv/inbox/locked.db")]);
}

#[test]
fn name_collision_in_archive_keeps_both_files() {
    let directory = Arc::new(FakeDirectory::with_files(&[
        ("report.pdf", 30),
        ("Archived/report.pdf", -86_400),
    ]));
    let service = build_service(directory.clone());

    let outcome = service.run(&RetentionRequest::new(
        ROOT,
        threshold(),
        RetentionAction::Move,
    ));
    assert!(outcome.is_ok());
    let outcome = outcome.unwrap_or_else(|_| unreachable!());

    assert_eq!(outcome.processed_count, 0);
    assert_eq!(outcome.failures.len(), 1);
    let paths = directory.paths();
    assert!(paths.contains(&PathBuf::from("/srv/inbox/report.pdf")));
    assert!(paths.contains(&PathBuf::from("/srv/inbox/Archived/report.pdf")));
}

#[test]
fn dry_run_counts_without_side_effects() {
    let directory = Arc::new(FakeDirectory::with_files(&[("x.tmp", 1), ("y.tmp", -1)]));
    let service = build_service(directory.clone());

    let outcome = service.run(
        &RetentionRequest::new(ROOT, threshold(), RetentionAction::Delete).with_dry_run(true),
    );
    assert!(outcome.is_ok());
    let outcome = outcome.unwrap_or_else(|_| unreachable!());

    assert!(outcome.dry_run);
    assert_eq!(outcome.processed_count, 1);
    assert_eq!(directory.paths().len(), 2);
}

#[test]
fn missing_directory_aborts_before_any_action() {
    let directory = Arc::new(FakeDirectory {
        missing: true,
        ..FakeDirectory::default()
    });
    let service = build_service(directory.clone());

    let outcome = service.run(&RetentionRequest::new(
        ROOT,
        threshold(),
        RetentionAction::Move,
    ));

    assert!(matches!(outcome, Err(AppError::Directory(_))));
    assert!(!directory.has_directory(Path::new("/srv/inbox/Archived")));
}

#[test]
fn qualifying_files_lists_strictly_newer_candidates() {
    let directory = Arc::new(FakeDirectory::with_files(&[("keep", 0), ("take", 1)]));
    let service = build_service(directory);

    let qualifying = service
        .qualifying_files(&RetentionRequest::new(
            ROOT,
            threshold(),
            RetentionAction::Move,
        ))
        .unwrap_or_default();

    assert_eq!(qualifying.len(), 1);
    assert_eq!(qualifying[0].name(), "take");
}
