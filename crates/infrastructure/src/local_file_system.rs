//! Local filesystem adapter for retention sweeps.

use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use datasweep_application::{DirectoryLister, FileActionExecutor};
use datasweep_core::{AppError, AppResult};
use datasweep_domain::FileCandidate;
use tracing::debug;

/// Retention ports backed by `std::fs`.
///
/// Symbolic links are followed when deciding whether an entry is a regular
/// file, but a move or delete acts on the link itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Creates a local filesystem adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for LocalFileSystem {
    fn list_regular_files(&self, directory: &Path) -> AppResult<Vec<FileCandidate>> {
        let metadata = fs::metadata(directory).map_err(|error| {
            AppError::Directory(format!("cannot access '{}': {error}", directory.display()))
        })?;
        if !metadata.is_dir() {
            return Err(AppError::Directory(format!(
                "'{}' is not a directory",
                directory.display()
            )));
        }

        let entries = fs::read_dir(directory).map_err(|error| {
            AppError::Directory(format!("cannot read '{}': {error}", directory.display()))
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|error| {
                AppError::Directory(format!(
                    "failed to read an entry of '{}': {error}",
                    directory.display()
                ))
            })?;
            let path = entry.path();

            let Some(metadata) = entry_metadata(&path)? else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }

            let modified_at = metadata.modified().map_err(|error| {
                AppError::Directory(format!(
                    "cannot read modification time of '{}': {error}",
                    path.display()
                ))
            })?;

            candidates.push(FileCandidate::new(
                entry.file_name().to_string_lossy().into_owned(),
                path,
                DateTime::<Utc>::from(modified_at),
            ));
        }

        candidates.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(candidates)
    }
}

impl FileActionExecutor for LocalFileSystem {
    fn ensure_directory(&self, directory: &Path) -> AppResult<()> {
        fs::create_dir_all(directory).map_err(|error| {
            AppError::FileAction(format!(
                "failed to create directory '{}': {error}",
                directory.display()
            ))
        })
    }

    fn move_file(&self, source: &Path, destination: &Path) -> AppResult<()> {
        if fs::symlink_metadata(destination).is_ok() {
            return Err(AppError::FileAction(format!(
                "cannot move '{}': '{}' already exists",
                source.display(),
                destination.display()
            )));
        }

        match fs::rename(source, destination) {
            Ok(()) => {}
            Err(error) if error.kind() == ErrorKind::CrossesDevices => {
                copy_then_remove(source, destination)?;
            }
            Err(error) => {
                return Err(AppError::FileAction(format!(
                    "failed to move '{}' to '{}': {error}",
                    source.display(),
                    destination.display()
                )));
            }
        }

        debug!(
            source = %source.display(),
            destination = %destination.display(),
            "moved file"
        );
        Ok(())
    }

    fn delete_file(&self, path: &Path) -> AppResult<()> {
        fs::remove_file(path).map_err(|error| {
            AppError::FileAction(format!("failed to delete '{}': {error}", path.display()))
        })?;

        debug!(path = %path.display(), "deleted file");
        Ok(())
    }
}

/// Follows symlinks. Entries that vanished mid-scan or dangling links yield
/// `None`; any other failure is a directory error.
fn entry_metadata(path: &Path) -> AppResult<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "skipping entry that no longer resolves");
            Ok(None)
        }
        Err(error) => Err(AppError::Directory(format!(
            "cannot inspect '{}': {error}",
            path.display()
        ))),
    }
}

fn copy_then_remove(source: &Path, destination: &Path) -> AppResult<()> {
    fs::copy(source, destination).map_err(|error| {
        AppError::FileAction(format!(
            "failed to copy '{}' to '{}': {error}",
            source.display(),
            destination.display()
        ))
    })?;

    fs::remove_file(source).map_err(|error| {
        AppError::FileAction(format!(
            "copied '{}' but failed to remove the original: {error}",
            source.display()
        ))
    })
}
