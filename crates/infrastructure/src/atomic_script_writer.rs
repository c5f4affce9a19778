//! Script writer that replaces the destination only after a complete write.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use datasweep_application::ScriptWriter;
use datasweep_core::{AppError, AppResult};
use tempfile::NamedTempFile;
use tracing::info;

/// Writes scripts to a sibling temporary file, then renames it into place.
///
/// On any failure the temporary file is discarded and an existing
/// destination keeps its previous contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicScriptWriter;

impl AtomicScriptWriter {
    /// Creates an atomic script writer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ScriptWriter for AtomicScriptWriter {
    fn write_script(
        &self,
        destination: &Path,
        statements: &mut dyn Iterator<Item = String>,
    ) -> AppResult<usize> {
        let directory = destination
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let staging = NamedTempFile::new_in(directory).map_err(|error| {
            write_error(destination, "failed to create a staging file", &error)
        })?;

        let mut writer = BufWriter::new(staging);
        let mut statement_count = 0_usize;
        for statement in statements {
            writer
                .write_all(statement.as_bytes())
                .map_err(|error| write_error(destination, "failed to write statement", &error))?;
            statement_count += 1;
        }

        let staging = writer.into_inner().map_err(|error| {
            write_error(destination, "failed to flush script", error.error())
        })?;
        staging
            .as_file()
            .sync_all()
            .map_err(|error| write_error(destination, "failed to sync script", &error))?;
        set_script_permissions(&staging, destination)?;

        staging.persist(destination).map_err(|error| {
            write_error(destination, "failed to move script into place", &error.error)
        })?;

        info!(
            destination = %destination.display(),
            statements = statement_count,
            "wrote SQL script"
        );
        Ok(statement_count)
    }

    fn would_replace(&self, destination: &Path, existing: &Path) -> bool {
        match (fs::canonicalize(destination), fs::canonicalize(existing)) {
            (Ok(destination), Ok(existing)) => destination == existing,
            _ => false,
        }
    }
}

#[cfg(unix)]
fn set_script_permissions(staging: &NamedTempFile, destination: &Path) -> AppResult<()> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    staging
        .as_file()
        .set_permissions(Permissions::from_mode(0o644))
        .map_err(|error| write_error(destination, "failed to set script permissions", &error))
}

#[cfg(not(unix))]
fn set_script_permissions(_staging: &NamedTempFile, _destination: &Path) -> AppResult<()> {
    Ok(())
}

fn write_error(destination: &Path, context: &str, error: &std::io::Error) -> AppError {
    AppError::DestinationWrite(format!("{context} for '{}': {error}", destination.display()))
}
