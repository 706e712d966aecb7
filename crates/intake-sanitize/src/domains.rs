//! # Domain Redaction
//!
//! Finds URLs and bare hostnames in untrusted text, replaces the ones the
//! policy rejects with a fixed placeholder and returns one audit record per
//! redacted domain.
//!
//! ## Threat Model
//!
//! | Threat | Example | Defense |
//! |--------|---------|---------|
//! | Tracking / exfil links | `https://collector.example/p?d=...` | Denylist or allow-list mode |
//! | Phishing hosts in generated docs | `login-github.example.com` | Denylist (parent-domain match) |
//! | Link smuggling in markdown | `[docs](https://evil.example/x)` | Path stops at `)` and quotes |
//!
//! ## Policy
//!
//! - **Denylist** - a host is rejected when it equals an entry or is a
//!   subdomain of one (`evil.com` rejects `cdn.evil.com`). Applies to URLs
//!   and bare hostnames.
//! - **Allow-list mode** - when `allowed` is set, every URL (`scheme://...`)
//!   whose host is not allowed is rejected. Bare hostnames are left to the
//!   denylist so that file names like `config.rs` survive.
//! - **Email addresses** - the domain part is a bare hostname, so
//!   `user@evil.com` becomes `user@(redacted)` under a denylist.
//! - **Nested hosts** - the path, query and fragment of a URL that is kept
//!   are scanned again, so `https://good.org/?u=evil.com` still loses
//!   `evil.com`.
//!
//! Matching is ASCII case-insensitive. Redaction runs before any other
//! transform so it sees domains exactly as the author wrote them.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{RedactedDomainRecord, Result, SanitizeError, DEFAULT_REDACTION_PLACEHOLDER};

static HOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?:(?P<scheme>[A-Za-z][A-Za-z0-9+.-]*)://)?",
        r"(?P<host>(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,63})\b",
        r"(?::[0-9]{1,5})?",
        r"(?:[/?#][^\s<>()\[\]`'\x22]*)?",
    ))
    .expect("host pattern is valid")
});

/// Which domains get redacted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainPolicy {
    /// Hosts (and their subdomains) that are always redacted.
    #[serde(default)]
    pub denied: Vec<String>,

    /// When set, URLs to any other host are redacted too.
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
}

impl DomainPolicy {
    /// Adds entries to the denylist.
    #[must_use]
    pub fn deny<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.denied.extend(domains.into_iter().map(Into::into));
        self
    }

    /// Switches to allow-list mode with the given hosts.
    #[must_use]
    pub fn allow_only<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(domains.into_iter().map(Into::into).collect());
        self
    }
}

/// A URL or hostname found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMatch<'a> {
    /// Host as written.
    pub host: &'a str,
    /// Whether the match carried a `scheme://` prefix.
    pub is_url: bool,
    /// Byte span of the whole match (scheme, port and path included).
    pub span: Range<usize>,
    /// Byte span of the port, path, query and fragment after the host.
    pub tail: Range<usize>,
}

/// Lazily iterate over URLs and hostnames in `text`, left to right.
pub fn find_domains(text: &str) -> impl Iterator<Item = DomainMatch<'_>> {
    HOST_PATTERN.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let host = caps.name("host")?;
        Some(DomainMatch {
            host: host.as_str(),
            is_url: caps.name("scheme").is_some(),
            span: whole.range(),
            tail: host.end()..whole.end(),
        })
    })
}

/// Redacted text plus the records describing what was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redaction {
    /// Text with every rejected URL or hostname replaced.
    pub text: String,
    /// One record per distinct domain, in order of first discovery.
    pub records: Vec<RedactedDomainRecord>,
}

/// Applies a validated [`DomainPolicy`].
#[derive(Debug, Clone)]
pub struct DomainRedactor {
    denied: Vec<String>,
    allowed: Option<Vec<String>>,
    placeholder: String,
}

impl Default for DomainRedactor {
    fn default() -> Self {
        Self {
            denied: Vec::new(),
            allowed: None,
            placeholder: DEFAULT_REDACTION_PLACEHOLDER.to_string(),
        }
    }
}

impl DomainRedactor {
    /// Validate and normalize `policy`.
    ///
    /// # Errors
    ///
    /// [`SanitizeError::InvalidDomain`] for an entry that is not a hostname,
    /// [`SanitizeError::InvalidPlaceholder`] for a placeholder the scanners
    /// would pick up again.
    pub fn new(policy: &DomainPolicy, placeholder: impl Into<String>) -> Result<Self> {
        let placeholder = placeholder.into();
        if find_domains(&placeholder).next().is_some()
            || crate::mentions::contains_live_mention(&placeholder)
        {
            return Err(SanitizeError::InvalidPlaceholder(placeholder));
        }

        let denied = policy
            .denied
            .iter()
            .map(|d| normalize_domain(d))
            .collect::<Result<Vec<_>>>()?;
        let allowed = policy
            .allowed
            .as_ref()
            .map(|list| list.iter().map(|d| normalize_domain(d)).collect::<Result<Vec<_>>>())
            .transpose()?;

        Ok(Self {
            denied,
            allowed,
            placeholder,
        })
    }

    /// The replacement written in place of each redacted match.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Whether a host found in text should be removed.
    pub fn should_redact(&self, host: &str, is_url: bool) -> bool {
        let host = host.to_ascii_lowercase();
        if self.denied.iter().any(|d| host_matches(&host, d)) {
            return true;
        }
        match &self.allowed {
            Some(allowed) if is_url => !allowed.iter().any(|a| host_matches(&host, a)),
            _ => false,
        }
    }

    /// Replace every rejected URL or hostname in `text`.
    pub fn scan_and_redact(&self, text: &str, source_context: Option<&str>) -> Redaction {
        let mut out = String::with_capacity(text.len());
        let mut records: Vec<RedactedDomainRecord> = Vec::new();
        self.redact_into(text, &mut out, &mut records, source_context);

        if !records.is_empty() {
            tracing::debug!(domains = records.len(), "Redacted domains from content");
        }
        Redaction { text: out, records }
    }

    /// Redact `text` into `out`. A kept match has its tail redacted
    /// recursively; each tail is strictly shorter than its match.
    fn redact_into(
        &self,
        text: &str,
        out: &mut String,
        records: &mut Vec<RedactedDomainRecord>,
        source_context: Option<&str>,
    ) {
        let mut last = 0;

        for found in find_domains(text) {
            out.push_str(&text[last..found.span.start]);
            last = found.span.end;

            if !self.should_redact(found.host, found.is_url) {
                out.push_str(&text[found.span.start..found.tail.start]);
                self.redact_into(&text[found.tail.clone()], out, records, source_context);
                continue;
            }

            out.push_str(&self.placeholder);
            let domain = found.host.to_ascii_lowercase();
            match records.iter_mut().find(|r| r.domain == domain) {
                Some(record) => record.occurrence_count += 1,
                None => records.push(
                    RedactedDomainRecord::new(domain)
                        .with_source_context(source_context.map(str::to_owned)),
                ),
            }
        }
        out.push_str(&text[last..]);
    }
}

fn host_matches(host: &str, pattern: &str) -> bool {
    host == pattern
        || (host.len() > pattern.len()
            && host.ends_with(pattern)
            && host.as_bytes()[host.len() - pattern.len() - 1] == b'.')
}

/// Lower-case a policy entry, dropping a leading `*.` or `.`.
fn normalize_domain(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix("*.")
        .or_else(|| trimmed.strip_prefix('.'))
        .unwrap_or(trimmed);

    let valid = !stripped.is_empty()
        && !stripped.starts_with('-')
        && !stripped.ends_with('.')
        && !stripped.contains("..")
        && stripped
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.');

    if valid {
        Ok(stripped.to_ascii_lowercase())
    } else {
        Err(SanitizeError::InvalidDomain(raw.to_string()))
    }
}
