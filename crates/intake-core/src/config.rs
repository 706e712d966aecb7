//! Configuration types for Intake.
//!
//! Everything process-wide is read once at startup and then passed around as
//! a value: the JSON config file, plus the `GH_AW_TRACKER_ID` environment
//! variable layered on top.

use std::path::Path;

use intake_sanitize::SanitizerConfig;
use serde::{Deserialize, Serialize};

use crate::error::IntakeError;
use crate::Result;

/// Environment variable carrying the tracker ID of the triggering run.
pub const TRACKER_ID_ENV: &str = "GH_AW_TRACKER_ID";

/// Configuration for the Intake facade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Sanitization pipeline configuration.
    pub sanitizer: SanitizerConfig,

    /// Opaque ID threaded through generated artifacts; unset when `None`.
    pub tracker_id: Option<String>,
}

impl IntakeConfig {
    /// Load configuration from a JSON file. Missing sections take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| IntakeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides. Reads the process environment; call it
    /// once at startup.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        let tracker_id = std::env::var(TRACKER_ID_ENV).ok();
        self.with_tracker_id(tracker_id)
    }

    /// Override the tracker ID. `None` keeps the current value; an empty
    /// string clears it.
    #[must_use]
    pub fn with_tracker_id(mut self, tracker_id: Option<String>) -> Self {
        if let Some(id) = tracker_id {
            self.tracker_id = Some(id).filter(|id| !id.is_empty());
        }
        self
    }

    /// Check invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// [`IntakeError::Config`] when the length budget is zero.
    pub fn validate(&self) -> Result<()> {
        if self.sanitizer.max_length == 0 {
            return Err(IntakeError::Config(
                "sanitizer.max_length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
