use std::path::Path;

use datasweep_core::AppResult;
use datasweep_domain::FileCandidate;

/// Port for enumerating sweep candidates.
pub trait DirectoryLister: Send + Sync {
    /// Lists regular files directly inside `directory`, sorted by name.
    ///
    /// Fails with `AppError::Directory` when the path is missing, is not a
    /// directory, or cannot be read.
    fn list_regular_files(&self, directory: &Path) -> AppResult<Vec<FileCandidate>>;
}

/// Port for the side effects applied to qualifying files.
pub trait FileActionExecutor: Send + Sync {
    /// Creates `directory` when absent. Succeeds when it already exists.
    fn ensure_directory(&self, directory: &Path) -> AppResult<()>;

    /// Relocates `source` to `destination`.
    ///
    /// Fails with `AppError::FileAction` without touching either file when
    /// `destination` already exists.
    fn move_file(&self, source: &Path, destination: &Path) -> AppResult<()>;

    /// Permanently removes `path`.
    fn delete_file(&self, path: &Path) -> AppResult<()>;
}
