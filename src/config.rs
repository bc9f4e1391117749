//! Configuration for the validator and record filter.
//!
//! Handles YAML (de)serialization, the embedded defaults and integrity checks.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::{DebitCheckError, Result};
use crate::filter::DEFAULT_TARGET_FIELD;
use crate::validators::{DebitCardValidator, SeparatorRule, DEFAULT_MAX_REPEAT_RUN};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CardCheckConfig {
    /// Record fields checked for a card. Any one validating keeps the record.
    pub target_fields: Vec<String>,
    /// Strip table applied, in order, before the repeated-digit check.
    pub separators: Vec<SeparatorRule>,
    /// Longest allowed run of a single repeated digit.
    pub max_repeat_run: usize,
}

impl Default for CardCheckConfig {
    fn default() -> Self {
        CardCheckConfig {
            target_fields: vec![DEFAULT_TARGET_FIELD.to_string()],
            separators: vec![SeparatorRule::strip("-")],
            max_repeat_run: DEFAULT_MAX_REPEAT_RUN,
        }
    }
}

impl CardCheckConfig {
    /// Loads the configuration embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        Self::from_yaml_str(include_str!("../config/default_config.yaml"))
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: CardCheckConfig = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| DebitCheckError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        info!(
            "Loaded configuration with {} target field(s) and {} separator rule(s).",
            config.target_fields.len(),
            config.separators.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_fields.is_empty() {
            return Err(DebitCheckError::EmptyTargetFields);
        }
        if let Some(index) = self.separators.iter().position(|rule| rule.find.is_empty()) {
            return Err(DebitCheckError::EmptySeparator { index });
        }
        if self.max_repeat_run == 0 {
            return Err(DebitCheckError::ZeroRepeatRun);
        }
        Ok(())
    }

    pub fn validator(&self) -> DebitCardValidator {
        DebitCardValidator::new(self.separators.clone(), self.max_repeat_run)
    }
}
