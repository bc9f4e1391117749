//! Error types for the debitcheck library.
//!
//! Validation itself never fails: an invalid card is an ordinary `false`.
//! These errors cover building a filter from configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DebitCheckError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yml::Error),

    #[error("Configuration lists no target fields")]
    EmptyTargetFields,

    #[error("Separator rule #{index} has an empty `find` string")]
    EmptySeparator { index: usize },

    #[error("`max_repeat_run` must be at least 1")]
    ZeroRepeatRun,
}

pub type Result<T> = std::result::Result<T, DebitCheckError>;
