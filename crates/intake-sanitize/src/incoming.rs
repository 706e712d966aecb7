//! Incoming-Text Sanitizer
//!
//! Entry point for the first contact with external text (issue bodies,
//! comments, PR descriptions), before any trust decision exists. Every
//! mention is neutralized; there is no allow-list on this path.
//!
//! The audit writer is re-exported so callers that only import this module
//! can still inspect or drive the redaction trail.

pub use crate::audit::{write_redacted_domains_log, RedactionLog};

use crate::sanitizer::Sanitizer;

impl Sanitizer {
    /// Most conservative sanitization: the core pipeline with no mention
    /// allow-list.
    pub fn sanitize_incoming_text(&self, text: &str, max_length: Option<usize>) -> String {
        self.sanitize_content_core(text, max_length)
    }
}

/// Sanitize freshly ingested external text with the process-wide sanitizer.
pub fn sanitize_incoming_text(content: &str, max_length: Option<usize>) -> String {
    Sanitizer::global().sanitize_incoming_text(content, max_length)
}
