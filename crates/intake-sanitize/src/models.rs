//! # Core Types for Content Sanitization
//!
//! This module defines the data types shared by every stage of the
//! sanitization pipeline: the redaction audit record, the per-call options
//! and the crate error type.
//!
//! ## Threat Model
//!
//! The types here encode three guarantees the pipeline makes about
//! untrusted text (issue bodies, comments, PR descriptions):
//!
//! | Guarantee | Type | Stage |
//! |-----------|------|-------|
//! | No live `@handle` notifications | [`MentionMatch`] | Mention neutralizer |
//! | Bounded size | [`DEFAULT_MAX_LENGTH`], [`SanitizeOptions`] | Length bounder |
//! | Audited domain removal | [`RedactedDomainRecord`] | Domain redaction |
//!
//! ## Design Principles
//!
//! 1. **Infallible transforms** - sanitizing never returns an error; only
//!    configuration and the explicit audit API can fail
//! 2. **Append-only audit** - records are never mutated after being written
//! 3. **Serializable** - records derive Serde traits for the JSON Lines log

use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default output budget in bytes (512 KiB).
pub const DEFAULT_MAX_LENGTH: usize = 524_288;

/// Placeholder substituted for every redacted URL or hostname.
pub const DEFAULT_REDACTION_PLACEHOLDER: &str = "(redacted)";

/// One redacted domain, aggregated over a single sanitization call.
///
/// Produced zero or more times per call, ordered by first discovery in the
/// scanned text. The `occurrence_count` of all records for a domain sums to
/// the number of times it was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedDomainRecord {
    /// Lower-cased hostname that was removed.
    pub domain: String,

    /// How many times the domain was removed in this call.
    pub occurrence_count: usize,

    /// Where the text came from (e.g. `issue_body`), when the caller said.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_context: Option<String>,

    /// When the record was produced.
    pub timestamp: DateTime<Utc>,
}

impl RedactedDomainRecord {
    /// Creates a record for a single occurrence, timestamped now.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            occurrence_count: 1,
            source_context: None,
            timestamp: Utc::now(),
        }
    }

    /// Attaches the source context.
    #[must_use]
    pub fn with_source_context(mut self, context: Option<String>) -> Self {
        self.source_context = context;
        self
    }
}

/// A live `@handle` found by the mention scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionMatch<'a> {
    /// The handle without the leading `@` (may include `/team`).
    pub handle: &'a str,

    /// Byte span of the full token, `@` included.
    pub span: Range<usize>,
}

/// Per-call knobs for [`crate::Sanitizer::sanitize_content`].
///
/// # Example
///
/// ```rust
/// use intake_sanitize::SanitizeOptions;
///
/// let options = SanitizeOptions::default()
///     .with_max_length(1024)
///     .with_allowed_aliases(["octocat"])
///     .with_source_context("issue_comment");
/// assert_eq!(options.max_length, Some(1024));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeOptions {
    /// Output budget in bytes; the sanitizer's configured budget when `None`.
    pub max_length: Option<usize>,

    /// Handles that may keep a live mention (ASCII case-insensitive).
    #[serde(default)]
    pub allowed_aliases: Vec<String>,

    /// Stamped onto every redaction record produced by the call.
    pub source_context: Option<String>,
}

impl SanitizeOptions {
    /// Sets the output budget.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the mention allow-list.
    #[must_use]
    pub fn with_allowed_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the source context for redaction records.
    #[must_use]
    pub fn with_source_context(mut self, context: impl Into<String>) -> Self {
        self.source_context = Some(context.into());
        self
    }
}

/// Errors raised by sanitizer setup and the explicit audit-log API.
///
/// The sanitization entry points themselves never return these; a failing
/// audit sink degrades to a diagnostic and the sanitized text is still
/// returned.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// A denylist or allowlist entry is not a usable hostname.
    #[error("Invalid domain pattern: {0:?}")]
    InvalidDomain(String),

    /// The redaction placeholder would itself be matched as a domain or a
    /// mention on the next pass.
    #[error("Invalid redaction placeholder: {0:?}")]
    InvalidPlaceholder(String),

    /// The process-wide sanitizer was already installed.
    #[error("Global sanitizer already installed")]
    AlreadyInstalled,

    /// The audit log could not be opened or appended to.
    #[error("Audit log write failed for {path}: {source}")]
    AuditLog {
        /// Log destination
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded as JSON.
    #[error("Audit record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for fallible sanitizer operations.
pub type Result<T> = std::result::Result<T, SanitizeError>;
