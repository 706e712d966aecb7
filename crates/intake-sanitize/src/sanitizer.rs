//! Main sanitizer facade
//!
//! Runs disarm, domain redaction, mention neutralization and length bounding
//! as one pass in a fixed order:
//!
//! ```text
//! raw ─▶ disarm ─▶ redact domains ─▶ neutralize mentions ─▶ bound ─▶ sanitized
//!                      │
//!                      └─▶ RedactedDomainRecord[] ─▶ audit log
//! ```
//!
//! Redaction sees the domains as written, before backticks are inserted.
//! Bounding runs last so the cut can be kept out of neutralized tokens.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::audit::{RedactionLog, DEFAULT_AUDIT_LOG_PATH};
use crate::domains::{DomainPolicy, DomainRedactor};
use crate::models::{
    RedactedDomainRecord, Result, SanitizeError, SanitizeOptions, DEFAULT_MAX_LENGTH,
    DEFAULT_REDACTION_PLACEHOLDER,
};
use crate::{bound, cdr, mentions};

static GLOBAL: OnceLock<Sanitizer> = OnceLock::new();

/// Sanitizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Output budget in bytes when the caller gives none
    pub max_length: usize,
    /// Which domains get redacted
    pub domains: DomainPolicy,
    /// Text written in place of a redacted URL or hostname
    pub redaction_placeholder: String,
    /// Strip ANSI escapes and invisible characters before scanning
    pub strip_control_chars: bool,
    /// Where redaction records are appended
    pub audit_log_path: PathBuf,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            domains: DomainPolicy::default(),
            redaction_placeholder: DEFAULT_REDACTION_PLACEHOLDER.to_string(),
            strip_control_chars: true,
            audit_log_path: PathBuf::from(DEFAULT_AUDIT_LOG_PATH),
        }
    }
}

/// Everything one sanitization pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeReport {
    /// The sanitized text.
    pub text: String,
    /// Redaction records in discovery order.
    pub records: Vec<RedactedDomainRecord>,
    /// Whether the length budget cut anything.
    pub truncated: bool,
}

/// The content sanitizer - main interface
#[derive(Debug)]
pub struct Sanitizer {
    config: SanitizerConfig,
    redactor: DomainRedactor,
    audit_log: RedactionLog,
}

impl Sanitizer {
    /// Create a sanitizer with default config (no domain policy)
    pub fn new() -> Self {
        let config = SanitizerConfig::default();
        Self {
            audit_log: RedactionLog::new(&config.audit_log_path),
            redactor: DomainRedactor::default(),
            config,
        }
    }

    /// Create a sanitizer with custom config
    ///
    /// # Errors
    ///
    /// Fails when the domain policy or placeholder is invalid.
    pub fn with_config(config: SanitizerConfig) -> Result<Self> {
        let redactor = DomainRedactor::new(&config.domains, config.redaction_placeholder.clone())?;
        Ok(Self {
            audit_log: RedactionLog::new(&config.audit_log_path),
            redactor,
            config,
        })
    }

    /// Install the process-wide sanitizer used by the free functions.
    ///
    /// # Errors
    ///
    /// [`SanitizeError::AlreadyInstalled`] if one is already in place
    /// (including the default one created lazily by [`Sanitizer::global`]).
    pub fn install_global(config: SanitizerConfig) -> Result<&'static Sanitizer> {
        let sanitizer = Self::with_config(config)?;
        GLOBAL
            .set(sanitizer)
            .map_err(|_| SanitizeError::AlreadyInstalled)?;
        let installed = Self::global();
        info!(
            audit_log = %installed.audit_log.path().display(),
            denied = installed.config.domains.denied.len(),
            "Global sanitizer installed"
        );
        Ok(installed)
    }

    /// The process-wide sanitizer, defaulted on first use.
    pub fn global() -> &'static Sanitizer {
        GLOBAL.get_or_init(Sanitizer::new)
    }

    /// Current configuration
    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// The audit sink redaction records go to
    pub fn audit_log(&self) -> &RedactionLog {
        &self.audit_log
    }

    /// Run the full pipeline without touching the audit log.
    pub fn sanitize_report(&self, text: &str, options: &SanitizeOptions) -> SanitizeReport {
        let max_length = options.max_length.unwrap_or(self.config.max_length);

        let disarmed = if self.config.strip_control_chars {
            Cow::Owned(cdr::disarm(text))
        } else {
            Cow::Borrowed(text)
        };

        let redaction = self
            .redactor
            .scan_and_redact(&disarmed, options.source_context.as_deref());
        let neutralized = mentions::neutralize_with_spans(&redaction.text, &options.allowed_aliases);
        let bounded = bound::bound_length_protected(&neutralized.text, max_length, &neutralized.spans);
        let truncated = bounded.len() < neutralized.text.len();

        debug!(
            input = text.len(),
            output = bounded.len(),
            mentions = neutralized.spans.len(),
            redacted = redaction.records.len(),
            truncated,
            "Content sanitized"
        );

        SanitizeReport {
            text: bounded,
            records: redaction.records,
            truncated,
        }
    }

    /// Sanitize with per-call options, appending any redaction records.
    pub fn sanitize_content(&self, text: &str, options: &SanitizeOptions) -> String {
        let report = self.sanitize_report(text, options);
        self.audit_log.write(&report.records);
        report.text
    }

    /// Sanitize with no mention allow-list.
    ///
    /// `max_length` falls back to the configured budget (524288 bytes by
    /// default).
    pub fn sanitize_content_core(&self, text: &str, max_length: Option<usize>) -> String {
        let options = SanitizeOptions {
            max_length,
            ..SanitizeOptions::default()
        };
        self.sanitize_content(text, &options)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize untrusted text with the process-wide sanitizer.
pub fn sanitize_content_core(content: &str, max_length: Option<usize>) -> String {
    Sanitizer::global().sanitize_content_core(content, max_length)
}
