//! Retention sweep types and the age qualification rule.
//!
//! A sweep compares each file's modification time against a threshold
//! derived from a calendar date. Only files strictly newer than the
//! threshold are acted upon.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use datasweep_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Name of the subdirectory that receives moved files.
pub const ARCHIVE_DIRECTORY_NAME: &str = "Archived";

/// Accepted calendar format for threshold dates.
pub const THRESHOLD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Side effect applied to every qualifying file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionAction {
    /// Relocate the file into the `Archived` subdirectory.
    Move,
    /// Permanently remove the file.
    Delete,
}

impl RetentionAction {
    /// Returns stable action value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Delete => "delete",
        }
    }
}

impl Display for RetentionAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RetentionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "move" => Ok(Self::Move),
            "delete" => Ok(Self::Delete),
            other => Err(AppError::Validation(format!(
                "unknown retention action '{other}', expected 'move' or 'delete'"
            ))),
        }
    }
}

/// Calendar date paired with the instant of its midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdDate {
    date: NaiveDate,
    timestamp: DateTime<Utc>,
}

impl ThresholdDate {
    /// Parses a strict `YYYY-MM-DD` date and anchors it at local midnight.
    pub fn parse(value: &str) -> AppResult<Self> {
        Self::parse_in(value, &Local)
    }

    /// Parses a strict `YYYY-MM-DD` date and anchors it at midnight in `timezone`.
    pub fn parse_in<Tz: TimeZone>(value: &str, timezone: &Tz) -> AppResult<Self> {
        if !has_calendar_shape(value) {
            return Err(AppError::InvalidDateFormat(format!(
                "'{value}' does not match YYYY-MM-DD"
            )));
        }

        let date = NaiveDate::parse_from_str(value, THRESHOLD_DATE_FORMAT).map_err(|error| {
            AppError::InvalidDateFormat(format!("'{value}' is not a calendar date: {error}"))
        })?;

        Self::from_date_in(date, timezone)
    }

    /// Anchors a calendar date at midnight in `timezone`.
    pub fn from_date_in<Tz: TimeZone>(date: NaiveDate, timezone: &Tz) -> AppResult<Self> {
        let midnight = date.and_time(NaiveTime::MIN);
        let timestamp = match timezone.from_local_datetime(&midnight) {
            LocalResult::Single(instant) => instant.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
            LocalResult::None => {
                return Err(AppError::InvalidDateFormat(format!(
                    "midnight of {date} does not exist in the local time zone"
                )));
            }
        };

        Ok(Self { date, timestamp })
    }

    /// Returns today's local date anchored at local midnight.
    pub fn today() -> AppResult<Self> {
        Self::from_date_in(Local::now().date_naive(), &Local)
    }

    /// Returns the calendar date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the cutoff instant.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Parses a `YYYY-MM-DD` string into the local-midnight cutoff instant.
pub fn parse_threshold_date(value: &str) -> AppResult<DateTime<Utc>> {
    ThresholdDate::parse(value).map(|threshold| threshold.timestamp())
}

fn has_calendar_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Validated input for one retention sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionRequest {
    directory: PathBuf,
    threshold: DateTime<Utc>,
    action: RetentionAction,
    dry_run: bool,
}

impl RetentionRequest {
    /// Creates a request that mutates the filesystem.
    #[must_use]
    pub fn new(
        directory: impl Into<PathBuf>,
        threshold: DateTime<Utc>,
        action: RetentionAction,
    ) -> Self {
        Self {
            directory: directory.into(),
            threshold,
            action,
            dry_run: false,
        }
    }

    /// Builds a request from raw collaborator input, parsing the date strictly.
    pub fn parse(
        directory: impl Into<PathBuf>,
        threshold_date: &str,
        action: RetentionAction,
    ) -> AppResult<Self> {
        let threshold = parse_threshold_date(threshold_date)?;
        Ok(Self::new(directory, threshold, action))
    }

    /// Toggles dry-run mode, where qualifying files are only counted.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the scanned directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.directory.as_path()
    }

    /// Returns the cutoff instant.
    #[must_use]
    pub fn threshold(&self) -> DateTime<Utc> {
        self.threshold
    }

    /// Returns the configured action.
    #[must_use]
    pub fn action(&self) -> RetentionAction {
        self.action
    }

    /// Returns whether the sweep only counts qualifying files.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the directory that receives moved files.
    #[must_use]
    pub fn archive_directory(&self) -> PathBuf {
        self.directory.join(ARCHIVE_DIRECTORY_NAME)
    }
}

/// Regular file found directly inside the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    name: String,
    full_path: PathBuf,
    modified_at: DateTime<Utc>,
}

impl FileCandidate {
    /// Creates a file candidate.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        full_path: impl Into<PathBuf>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            modified_at,
        }
    }

    /// Returns the file name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the full path.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        self.full_path.as_path()
    }

    /// Returns the last modification instant.
    #[must_use]
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Returns the path this file takes inside `directory`, keeping its name.
    #[must_use]
    pub fn destination_in(&self, directory: &Path) -> PathBuf {
        self.full_path.file_name().map_or_else(
            || directory.join(self.name.as_str()),
            |file_name| directory.join(file_name),
        )
    }

    /// Returns true when the file was modified strictly after `threshold`.
    #[must_use]
    pub fn qualifies(&self, threshold: DateTime<Utc>) -> bool {
        self.modified_at > threshold
    }
}

/// One file whose action failed during a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileActionFailure {
    /// Path of the file that was not processed.
    pub path: PathBuf,
    /// Stable error category.
    pub kind: String,
    /// Human-readable failure message.
    pub message: String,
}

impl FileActionFailure {
    /// Records a failed action for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, error: &AppError) -> Self {
        Self {
            path: path.into(),
            kind: error.kind().to_owned(),
            message: error.message().to_owned(),
        }
    }
}

/// Result of a completed sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionOutcome {
    /// Action that was applied.
    pub action: RetentionAction,
    /// Whether the sweep only counted qualifying files.
    pub dry_run: bool,
    /// Files that qualified and were processed successfully.
    pub processed_count: usize,
    /// Qualifying files whose action failed.
    pub failures: Vec<FileActionFailure>,
}

impl RetentionOutcome {
    /// Returns true when no qualifying file failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
