use std::env;

use datasweep_core::{AppError, AppResult};
use datasweep_domain::RetentionAction;
use tracing_subscriber::EnvFilter;

const DEFAULT_ACTION_ENV: &str = "DATASWEEP_DEFAULT_ACTION";
const LOG_FILTER_ENV: &str = "DATASWEEP_LOG_FILTER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub default_action: RetentionAction,
    pub log_filter: Option<String>,
}

impl CliConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let default_action = match non_empty(lookup(DEFAULT_ACTION_ENV)) {
            Some(value) => value.parse::<RetentionAction>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid {DEFAULT_ACTION_ENV} value '{value}': {}",
                    error.message()
                ))
            })?,
            None => RetentionAction::Move,
        };

        Ok(Self {
            default_action,
            log_filter: non_empty(lookup(LOG_FILTER_ENV)),
        })
    }
}

/// `RUST_LOG` wins over the configured filter, which wins over `info`.
pub fn init_tracing(config: &CliConfig) -> AppResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match config.log_filter.as_deref() {
            Some(directives) => EnvFilter::try_new(directives).map_err(|error| {
                AppError::Validation(format!(
                    "invalid {LOG_FILTER_ENV} value '{directives}': {error}"
                ))
            })?,
            None => EnvFilter::new("info"),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
