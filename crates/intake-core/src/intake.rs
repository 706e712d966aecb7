//! The unified Intake facade.
//!
//! [`Intake`] owns a configured [`Sanitizer`] and the tracker ID read at
//! startup, and is what the workflow runner holds instead of reaching for
//! process globals.

use intake_sanitize::{SanitizeOptions, Sanitizer};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::IntakeConfig,
    error::IntakeError,
    tool::ToolDescriptor,
    tracker::{get_tracker_id, TrackerFormat},
    Result,
};

/// Entry point for sanitizing untrusted text and checking tool calls.
///
/// # Example
///
/// ```rust,no_run
/// use intake_core::{Intake, IntakeConfig, TrackerFormat};
///
/// let intake = Intake::new(IntakeConfig::from_env())?;
/// let body = intake.sanitize_incoming_text("thanks @octocat", None);
/// assert_eq!(body, "thanks `@octocat`");
/// let footer = intake.tracker_id(TrackerFormat::Markdown);
/// # let _ = footer;
/// # Ok::<(), intake_core::IntakeError>(())
/// ```
#[derive(Debug)]
pub struct Intake {
    /// Configuration.
    config: IntakeConfig,

    /// Sanitization pipeline.
    sanitizer: Sanitizer,
}

impl Intake {
    /// Create a new Intake with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The length budget is zero
    /// - The domain policy or redaction placeholder is invalid
    pub fn new(config: IntakeConfig) -> Result<Self> {
        config.validate()?;
        let sanitizer = Sanitizer::with_config(config.sanitizer.clone())?;

        info!(
            max_length = config.sanitizer.max_length,
            denied = config.sanitizer.domains.denied.len(),
            tracker = config.tracker_id.is_some(),
            "Intake initialized"
        );

        Ok(Self { config, sanitizer })
    }

    /// Current configuration.
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// The underlying sanitizer.
    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// Sanitize text from an issue, comment or other untrusted source.
    pub fn sanitize_incoming_text(&self, text: &str, max_length: Option<usize>) -> String {
        self.sanitizer.sanitize_incoming_text(text, max_length)
    }

    /// Sanitize with no mention allow-list.
    pub fn sanitize_content_core(&self, text: &str, max_length: Option<usize>) -> String {
        self.sanitizer.sanitize_content_core(text, max_length)
    }

    /// Sanitize with per-call options (allowed aliases, source context).
    pub fn sanitize_content(&self, text: &str, options: &SanitizeOptions) -> String {
        self.sanitizer.sanitize_content(text, options)
    }

    /// Tracker ID rendered in `format`; empty when none is configured.
    pub fn tracker_id(&self, format: TrackerFormat) -> String {
        get_tracker_id(self.config.tracker_id.as_deref(), format)
    }

    /// Check a tool call's arguments against the tool's required fields.
    ///
    /// # Errors
    ///
    /// [`IntakeError::MissingRequiredFields`] naming every absent field.
    pub fn check_tool_call(&self, tool: &ToolDescriptor, args: &Value) -> Result<()> {
        debug!("Checking tool call: {}", tool.name);

        let fields = tool.missing_fields(args);
        if fields.is_empty() {
            return Ok(());
        }

        warn!(tool = %tool.name, missing = ?fields, "Tool call rejected");
        Err(IntakeError::MissingRequiredFields {
            tool: tool.name.clone(),
            fields,
        })
    }
}
