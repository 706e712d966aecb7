//! Length Bounder
//!
//! Enforces the output budget with a silent, deterministic cut. Partial
//! content is preferred over failure, so oversize input is truncated rather
//! than rejected.
//!
//! The budget is measured in bytes. The cut never splits a UTF-8 sequence
//! and never lands inside a protected span (a neutralized mention), where a
//! half-kept `` `@user `` would drop its closing backtick and go live again.
//! A cut that still leaves a live mention the full text did not have (a
//! shortened handle, or a user-written `` `@user` `` or `` `@org/team` ``
//! losing its closing backtick) is moved back to that mention's `@`.

use std::ops::Range;

use crate::mentions::find_mentions;

/// Truncate `text` to at most `max_length` bytes.
pub fn bound_length(text: &str, max_length: usize) -> String {
    bound_length_protected(text, max_length, &[])
}

/// Truncate `text` to at most `max_length` bytes without cutting inside
/// any of `protected` (byte spans of `text`, in ascending order).
pub fn bound_length_protected(text: &str, max_length: usize, protected: &[Range<usize>]) -> String {
    if text.len() <= max_length {
        return text.to_owned();
    }

    let mut cut = floor_char_boundary(text, max_length);
    if let Some(span) = protected
        .iter()
        .find(|span| span.start < cut && cut < span.end)
    {
        cut = span.start;
    }
    cut = retreat_from_live_mention(text, cut, protected);

    tracing::debug!(
        original = text.len(),
        kept = cut,
        max_length,
        "Content truncated to length budget"
    );
    text[..cut].to_owned()
}

/// Move `cut` back until the kept prefix has no live mention that the full
/// text did not have. Shortening a user-backticked `` `@org/team` `` can
/// expose `@org` well before the cut, so every prefix mention is checked.
fn retreat_from_live_mention(text: &str, mut cut: usize, protected: &[Range<usize>]) -> usize {
    let original: Vec<Range<usize>> = find_mentions(text).map(|m| m.span).collect();
    let is_known = |span: &Range<usize>| original.contains(span) || protected.contains(span);

    while let Some(exposed) = find_mentions(&text[..cut]).find(|m| !is_known(&m.span)) {
        cut = exposed.span.start;
    }
    cut
}

/// Largest char boundary `<= index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    (0..=index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0)
}
