//! Datasweep command-line runtime.

#![forbid(unsafe_code)]

mod cli_config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use datasweep_application::{
    RetentionService, SqlExportOutcome, SqlExportRequest, SqlExportService, SqlImportRequest,
    SqlImportService,
};
use datasweep_core::{AppError, AppResult};
use datasweep_domain::{RetentionAction, RetentionOutcome, RetentionRequest, ThresholdDate};
use datasweep_infrastructure::{AtomicScriptWriter, LocalFileSystem, SpreadsheetTableReader};
use tracing::info;

use crate::cli_config::{CliConfig, init_tracing};

const DEFAULT_SCRIPT_PATH: &str = "output.sql";

#[derive(Parser, Debug)]
#[command(version, about = "Age-based file retention and spreadsheet to SQL export")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print outcomes as JSON instead of a summary line
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Move or delete files modified after a threshold date
    Sweep {
        /// Directory whose top-level files are swept
        directory: PathBuf,
        /// Act on files modified after local midnight of this date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        threshold: Option<String>,
        /// Action for qualifying files: move or delete
        #[arg(long)]
        action: Option<String>,
        /// Count qualifying files without touching them
        #[arg(long)]
        dry_run: bool,
    },
    /// Convert the first sheet of a spreadsheet into INSERT statements
    Export {
        /// Spreadsheet to read (.xlsx, .xls, .ods, .csv, ...)
        source: PathBuf,
        /// Script file to write
        #[arg(short, long, default_value = DEFAULT_SCRIPT_PATH)]
        output: PathBuf,
    },
    /// Convert a SQL script back into a spreadsheet (not supported)
    Import {
        /// SQL script to read
        script: PathBuf,
        /// Spreadsheet to write
        destination: PathBuf,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error [{}]: {}", error.kind(), error.message());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> AppResult<ExitCode> {
    let config = CliConfig::load()?;
    init_tracing(&config)?;

    match args.command {
        Command::Sweep {
            directory,
            threshold,
            action,
            dry_run,
        } => {
            let action = resolve_action(action.as_deref(), &config)?;
            let request = match threshold.as_deref() {
                Some(value) => RetentionRequest::parse(directory, value, action)?,
                None => RetentionRequest::new(directory, ThresholdDate::today()?.timestamp(), action),
            }
            .with_dry_run(dry_run);
            info!(
                directory = %request.directory().display(),
                threshold = %request.threshold(),
                action = %action,
                dry_run,
                "starting retention sweep"
            );

            let file_system = Arc::new(LocalFileSystem::new());
            let service = RetentionService::new(file_system.clone(), file_system);
            let outcome = service.run(&request)?;

            report_sweep(&outcome, args.json)
        }
        Command::Export { source, output } => {
            let service = SqlExportService::new(
                Arc::new(SpreadsheetTableReader::new()),
                Arc::new(AtomicScriptWriter::new()),
            );
            let outcome = service.export(&SqlExportRequest {
                source_path: source,
                destination_path: output,
            })?;

            report_export(&outcome, args.json)
        }
        Command::Import {
            script,
            destination,
        } => {
            SqlImportService::new().import(&SqlImportRequest {
                script_path: script,
                destination_path: destination,
            })?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn resolve_action(flag: Option<&str>, config: &CliConfig) -> AppResult<RetentionAction> {
    flag.map_or(Ok(config.default_action), str::parse)
}

fn report_sweep(outcome: &RetentionOutcome, json: bool) -> AppResult<ExitCode> {
    if json {
        println!("{}", to_json(outcome)?);
    } else {
        println!("{}", sweep_summary(outcome));
    }

    for failure in &outcome.failures {
        eprintln!(
            "failed [{}] {}: {}",
            failure.kind,
            failure.path.display(),
            failure.message
        );
    }

    if outcome.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn report_export(outcome: &SqlExportOutcome, json: bool) -> AppResult<ExitCode> {
    if json {
        println!("{}", to_json(outcome)?);
    } else {
        println!(
            "SQL script saved to: {}",
            outcome.destination_path.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn sweep_summary(outcome: &RetentionOutcome) -> String {
    if outcome.dry_run {
        format!(
            "Dry run: {} files would be processed.",
            outcome.processed_count
        )
    } else {
        format!("Success! {} files processed.", outcome.processed_count)
    }
}

fn to_json(value: &impl serde::Serialize) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Internal(format!("failed to serialize outcome: {error}")))
}
