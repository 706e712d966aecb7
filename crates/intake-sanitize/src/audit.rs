//! # Redacted-Domain Audit Log
//!
//! Append-only JSON Lines sink for [`RedactedDomainRecord`]s.
//!
//! ## Resource Model
//!
//! - The file is opened (with `O_APPEND`) on the first write and kept for the
//!   life of the process; nothing here closes it.
//! - Each batch is encoded up front and handed to a single `write_all`, so
//!   concurrent writers interleave whole batches, never partial records.
//! - No lock is taken: `&File` is `Write`, and append mode makes each write
//!   land at the current end of file.
//!
//! ## Failure Policy
//!
//! Logging is best-effort. [`RedactionLog::write`] swallows failures; the
//! first one is surfaced through `tracing::warn!`, later ones at `debug`.
//! [`RedactionLog::append`] is the fallible variant for callers that want
//! the error.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::models::{RedactedDomainRecord, Result, SanitizeError};

/// Where the process-wide log goes unless configured otherwise.
pub const DEFAULT_AUDIT_LOG_PATH: &str = "/tmp/gh-aw/redacted-urls.log";

/// Append-only audit log of redacted domains.
#[derive(Debug)]
pub struct RedactionLog {
    path: PathBuf,
    file: OnceLock<File>,
    warned: AtomicBool,
}

impl RedactionLog {
    /// Creates a log that will open `path` on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: OnceLock::new(),
            warned: AtomicBool::new(false),
        }
    }

    /// Log destination.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `records` as one batch, one JSON object per line.
    ///
    /// # Errors
    ///
    /// [`SanitizeError::AuditLog`] when the destination cannot be opened or
    /// written, [`SanitizeError::Serialize`] if a record fails to encode.
    pub fn append(&self, records: &[RedactedDomainRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut batch = String::new();
        for record in records {
            batch.push_str(&serde_json::to_string(record)?);
            batch.push('\n');
        }

        let mut file = self.file()?;
        file.write_all(batch.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| self.io_error(source))?;

        debug!(records = records.len(), path = %self.path.display(), "Redaction records appended");
        Ok(())
    }

    /// Append `records`, swallowing any failure.
    pub fn write(&self, records: &[RedactedDomainRecord]) {
        if let Err(err) = self.append(records) {
            if self.warned.swap(true, Ordering::Relaxed) {
                debug!(error = %err, "Redaction audit write dropped");
            } else {
                warn!(error = %err, "Redaction audit log unavailable; records dropped");
            }
        }
    }

    fn file(&self) -> Result<&File> {
        if let Some(file) = self.file.get() {
            return Ok(file);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let opened = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;

        // A concurrent opener may have won; its handle is kept and ours dropped.
        Ok(self.file.get_or_init(|| opened))
    }

    fn io_error(&self, source: std::io::Error) -> SanitizeError {
        SanitizeError::AuditLog {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Append `records` to the process-wide audit log.
///
/// The destination comes from the installed global sanitizer (see
/// [`crate::Sanitizer::install_global`]). Failures are swallowed.
pub fn write_redacted_domains_log(records: &[RedactedDomainRecord]) {
    crate::Sanitizer::global().audit_log().write(records);
}
