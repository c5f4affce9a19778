use std::sync::Arc;

use datasweep_core::AppResult;
use datasweep_domain::{
    FileActionFailure, FileCandidate, RetentionAction, RetentionOutcome, RetentionRequest,
};

use crate::retention_ports::{DirectoryLister, FileActionExecutor};

/// Application service for age-based directory retention sweeps.
///
/// The whole directory is listed before the first action runs, so a missing
/// or unreadable directory aborts without side effects. A failed move or
/// delete is recorded in the outcome and the sweep continues with the next
/// file.
#[derive(Clone)]
pub struct RetentionService {
    lister: Arc<dyn DirectoryLister>,
    executor: Arc<dyn FileActionExecutor>,
}

impl RetentionService {
    /// Creates a retention service.
    #[must_use]
    pub fn new(lister: Arc<dyn DirectoryLister>, executor: Arc<dyn FileActionExecutor>) -> Self {
        Self { lister, executor }
    }

    /// Returns the files a sweep would act upon, in listing order.
    pub fn qualifying_files(&self, request: &RetentionRequest) -> AppResult<Vec<FileCandidate>> {
        let candidates = self.lister.list_regular_files(request.directory())?;

        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.qualifies(request.threshold()))
            .collect())
    }

    /// Runs one sweep and reports how many files were processed.
    pub fn run(&self, request: &RetentionRequest) -> AppResult<RetentionOutcome> {
        let qualifying = self.qualifying_files(request)?;

        if request.is_dry_run() {
            return Ok(RetentionOutcome {
                action: request.action(),
                dry_run: true,
                processed_count: qualifying.len(),
                failures: Vec::new(),
            });
        }

        let mut processed_count = 0_usize;
        let mut failures = Vec::new();

        for candidate in qualifying {
            match self.apply_action(request, &candidate) {
                Ok(()) => processed_count += 1,
                Err(error) => failures.push(FileActionFailure::new(candidate.full_path(), &error)),
            }
        }

        Ok(RetentionOutcome {
            action: request.action(),
            dry_run: false,
            processed_count,
            failures,
        })
    }

    fn apply_action(&self, request: &RetentionRequest, candidate: &FileCandidate) -> AppResult<()> {
        match request.action() {
            RetentionAction::Move => {
                let archive_directory = request.archive_directory();
                self.executor.ensure_directory(archive_directory.as_path())?;
                self.executor.move_file(
                    candidate.full_path(),
                    candidate.destination_in(archive_directory.as_path()).as_path(),
                )
            }
            RetentionAction::Delete => self.executor.delete_file(candidate.full_path()),
        }
    }
}

#[cfg(test)]
mod tests;
