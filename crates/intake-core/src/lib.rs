//! # Intake Core
//!
//! The boundary between untrusted issue/comment text and an agentic
//! workflow. Wraps the [`intake_sanitize`] pipeline together with the small
//! utilities the tool dispatcher needs.
//!
//! ## Coverage
//!
//! | Concern | Entry point | Outcome |
//! |---------|-------------|---------|
//! | Untrusted text | [`Intake::sanitize_incoming_text`] | Disarmed, redacted, mentions neutralized, bounded |
//! | Tool arguments | [`Intake::check_tool_call`] | Missing required fields listed |
//! | Artifact paths | [`sanitize_workflow_name`] | Filesystem-safe name |
//! | Error reporting | [`message_from_value`] | Never-failing message text |
//! | Run correlation | [`get_tracker_id`] | Plain or markdown tracker ID |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     INTAKE CORE                      │
//! ├──────────────────────────────────────────────────────┤
//! │                  ┌──────────────┐                    │
//! │   IntakeConfig ─▶│    Intake    │◀─ ToolDescriptor   │
//! │   (file + env)   └──────┬───────┘                    │
//! │                         │                            │
//! │           ┌─────────────┴─────────────┐              │
//! │           ▼                           ▼              │
//! │    ┌─────────────┐           ┌────────────────┐      │
//! │    │  Sanitizer  │           │ Required-field │      │
//! │    │  pipeline   │           │   validation   │      │
//! │    └──────┬──────┘           └────────────────┘      │
//! │           ▼                                          │
//! │     audit log (JSONL)                                │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use intake_core::{create_tool_config, Intake, IntakeConfig};
//! use serde_json::json;
//!
//! let intake = Intake::new(IntakeConfig::load("intake.json")?.with_env_overrides())?;
//!
//! let body = intake.sanitize_incoming_text("cc @maintainers, see https://evil.example", None);
//!
//! let tool = create_tool_config("add_comment", "Post a comment", json!({ "required": ["body"] }), "add_comment.cjs");
//! intake.check_tool_call(&tool, &json!({ "body": body }))?;
//! # Ok::<(), intake_core::IntakeError>(())
//! ```
//!
//! ## Notes
//!
//! - Sanitization never fails; audit-log trouble only shows up in tracing
//! - Process-wide inputs (config file, `GH_AW_TRACKER_ID`) are read once at
//!   startup and passed in as values

mod config;
mod error;
mod error_message;
mod intake;
mod tool;
mod tracker;
mod validation;
mod workflow_name;

pub use config::{IntakeConfig, TRACKER_ID_ENV};
pub use error::IntakeError;
pub use error_message::{error_message, message_from_panic, message_from_value};
pub use intake::Intake;
pub use tool::{create_tool_config, HandlerKind, ToolDescriptor};
pub use tracker::{get_tracker_id, TrackerFormat};
pub use validation::validate_required_fields;
pub use workflow_name::sanitize_workflow_name;

// Re-export sanitizer types for convenience
pub use intake_sanitize::{
    DomainPolicy, RedactedDomainRecord, SanitizeOptions, SanitizeReport, Sanitizer,
    SanitizerConfig,
};

/// Core result type for intake operations.
pub type Result<T> = std::result::Result<T, IntakeError>;
