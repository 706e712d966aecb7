//! # Intake Sanitize - Untrusted Content Sanitization
//!
//! Turns arbitrary external text (issue bodies, comments, PR descriptions)
//! into a string that is safe to embed in a generated prompt or document.
//!
//! ## Purpose
//!
//! This crate implements the sanitization pipeline that every workflow step
//! runs before handing untrusted text to a downstream consumer:
//!
//! 1. **Content Disarm** - strips ANSI escapes and invisible characters that
//!    could hide a mention or a domain from the scanners.
//!
//! 2. **Domain Redaction** - replaces denylisted (or, in allow-list mode,
//!    non-allowed) URLs and hostnames with a placeholder and records each
//!    removal in an append-only audit log.
//!
//! 3. **Mention Neutralization** - wraps `@handle` tokens in backticks so
//!    nothing re-rendering the text sends notifications.
//!
//! 4. **Length Bounding** - silently truncates to a byte budget without
//!    splitting a character or a neutralized token.
//!
//! ## Threat Model
//!
//! | Threat | Description | Defense |
//! |--------|-------------|---------|
//! | Notification spam | `@user` / `@org/team` pings via the bot identity | Mention neutralizer |
//! | Link smuggling | Tracking or phishing URLs carried into generated docs | Domain redaction |
//! | Context flooding | Oversized bodies exhausting downstream budgets | Length bounder |
//! | Hidden tokens | Zero-width or ANSI-split mentions and hosts | Content disarm |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         SANITIZER                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  raw ──▶ ┌────────┐   ┌────────┐   ┌──────────┐   ┌────────┐    │
//! │          │ DISARM │──▶│ REDACT │──▶│NEUTRALIZE│──▶│ BOUND  │──▶ │
//! │          └────────┘   └───┬────┘   └──────────┘   └────────┘    │
//! │                           │                                     │
//! │                           ▼                                     │
//! │                  ┌─────────────────┐                            │
//! │                  │  AUDIT LOG      │  JSON Lines, append-only   │
//! │                  └─────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//!
//! Sanitization never fails. Any input, including empty text, yields a
//! best-effort output, and an unavailable audit log only produces a
//! diagnostic.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use intake_sanitize::{DomainPolicy, Sanitizer, SanitizerConfig};
//!
//! let sanitizer = Sanitizer::with_config(SanitizerConfig {
//!     domains: DomainPolicy::default().deny(["tracker.example"]),
//!     ..SanitizerConfig::default()
//! })?;
//!
//! let body = "cc @maintainers, see https://tracker.example/pixel";
//! let safe = sanitizer.sanitize_incoming_text(body, None);
//! assert_eq!(safe, "cc `@maintainers`, see (redacted)");
//! # Ok::<(), intake_sanitize::SanitizeError>(())
//! ```

pub mod audit;
pub mod bound;
pub mod cdr;
pub mod domains;
pub mod incoming;
pub mod mentions;
pub mod models;
pub mod sanitizer;

pub use audit::{write_redacted_domains_log, RedactionLog, DEFAULT_AUDIT_LOG_PATH};
pub use domains::{DomainPolicy, DomainRedactor};
pub use incoming::sanitize_incoming_text;
pub use models::{
    RedactedDomainRecord, SanitizeError, SanitizeOptions, DEFAULT_MAX_LENGTH,
    DEFAULT_REDACTION_PLACEHOLDER,
};
pub use sanitizer::{sanitize_content_core, SanitizeReport, Sanitizer, SanitizerConfig};
