//! # Mention Neutralizer
//!
//! Rewrites `@handle` references in untrusted text so that no consumer that
//! triggers notifications on literal mentions will fire.
//!
//! ## Threat Model
//!
//! Text copied from an issue or comment into a generated document is
//! re-rendered under the workflow's identity. Every `@handle` left live in
//! that document pings a real account or team, which lets an attacker
//! spam or socially engineer people through the automation.
//!
//! ## Token Grammar
//!
//! | Part | Shape |
//! |------|-------|
//! | Handle | 1-39 of `[A-Za-z0-9_-]`, first and last ASCII alphanumeric |
//! | Team (optional) | `/` followed by `[A-Za-z0-9._-]+` |
//! | Context | at text start, after a non-word character, or right after another mention |
//!
//! An `@` preceded by an ASCII word character is never a mention, so email
//! addresses pass through untouched. A token already wrapped in backticks
//! (`` `@user` ``) is treated as neutralized.
//!
//! ## Neutralized Form
//!
//! ```text
//! Hello @octocat and @org/team   →   Hello `@octocat` and `@org/team`
//! @a@b                            →   `@a``@b`
//! ```
//!
//! The backtick-wrapped form never matches the grammar again, which makes
//! [`neutralize_mentions`] idempotent.

use std::ops::Range;

use crate::models::MentionMatch;

/// Longest handle the platform accepts.
pub const MAX_HANDLE_LEN: usize = 39;

/// Lazy left-to-right scanner over the live mentions in a text.
///
/// Yields non-overlapping matches in order. A mention that begins exactly
/// where the previous match ended (`@a@b`) is reported too, since wrapping
/// the first one would otherwise expose the second.
#[derive(Debug, Clone)]
pub struct MentionScanner<'a> {
    text: &'a str,
    pos: usize,
    chain_end: Option<usize>,
}

impl<'a> MentionScanner<'a> {
    /// Creates a scanner positioned at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            chain_end: None,
        }
    }

    fn opens_mention(&self, at: usize, handle_end: usize) -> bool {
        if at == 0 || self.chain_end == Some(at) {
            return true;
        }
        match self.text[..at].chars().next_back() {
            Some('`') => self.text.as_bytes().get(handle_end) != Some(&b'`'),
            Some(prev) => !is_word_char(prev),
            None => true,
        }
    }
}

impl<'a> Iterator for MentionScanner<'a> {
    type Item = MentionMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let at = self.pos + self.text[self.pos..].find('@')?;
            let handle_start = at + 1;

            if let Some(len) = handle_len(&self.text[handle_start..]) {
                let end = handle_start + len;
                if self.opens_mention(at, end) {
                    self.pos = end;
                    self.chain_end = Some(end);
                    return Some(MentionMatch {
                        handle: &self.text[handle_start..end],
                        span: at..end,
                    });
                }
            }

            self.pos = handle_start;
        }
        None
    }
}

/// Text after neutralization plus the byte spans of every mention token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neutralized {
    /// The rewritten text.
    pub text: String,
    /// Spans (in `text`) of each token: wrapped ones with their backticks,
    /// allowed ones as written. A cut inside any of them changes who gets
    /// notified.
    pub spans: Vec<Range<usize>>,
}

/// Iterate over the live mentions in `text`.
pub fn find_mentions(text: &str) -> MentionScanner<'_> {
    MentionScanner::new(text)
}

/// Whether `text` still contains a mention that would notify someone.
pub fn contains_live_mention(text: &str) -> bool {
    find_mentions(text).next().is_some()
}

/// Neutralize every mention in `text`.
pub fn neutralize_mentions(text: &str) -> String {
    neutralize_with_spans(text, &[]).text
}

/// Neutralize every mention whose handle is not in `allowed`.
///
/// Allowed aliases compare ASCII case-insensitively and may be given with
/// or without the leading `@`.
pub fn neutralize_with_spans(text: &str, allowed: &[String]) -> Neutralized {
    let mut out = String::with_capacity(text.len() + 16);
    let mut spans = Vec::new();
    let mut last = 0;

    for mention in find_mentions(text) {
        out.push_str(&text[last..mention.span.start]);
        let token = &text[mention.span.clone()];

        let start = out.len();
        if is_allowed(mention.handle, allowed) {
            out.push_str(token);
        } else {
            out.push('`');
            out.push_str(token);
            out.push('`');
        }
        spans.push(start..out.len());
        last = mention.span.end;
    }
    out.push_str(&text[last..]);

    Neutralized { text: out, spans }
}

fn is_allowed(handle: &str, allowed: &[String]) -> bool {
    allowed
        .iter()
        .any(|alias| alias.trim_start_matches('@').eq_ignore_ascii_case(handle))
}

/// Byte length of the handle (and optional team) at the start of `rest`.
fn handle_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    if !bytes.first()?.is_ascii_alphanumeric() {
        return None;
    }

    let run = bytes
        .iter()
        .take(MAX_HANDLE_LEN)
        .take_while(|b| is_handle_byte(**b))
        .count();
    let mut len = run;
    while !bytes[len - 1].is_ascii_alphanumeric() {
        len -= 1;
    }

    if bytes.get(len) == Some(&b'/') {
        let team = bytes[len + 1..]
            .iter()
            .take_while(|b| is_team_byte(**b))
            .count();
        if team > 0 {
            len += 1 + team;
        }
    }

    Some(len)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_handle_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_team_byte(b: u8) -> bool {
    is_handle_byte(b) || b == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handles(text: &str) -> Vec<&str> {
        find_mentions(text).map(|m| m.handle).collect()
    }

    #[test]
    fn test_basic_mention_wrapped() {
        assert_eq!(neutralize_mentions("Hello @user"), "Hello `@user`");
        assert_eq!(neutralize_mentions("@user said something"), "`@user` said something");
    }

    #[test]
    fn test_team_mention_wrapped() {
        assert_eq!(neutralize_mentions("Hello @myorg/myteam"), "Hello `@myorg/myteam`");
    }

    #[test]
    fn test_multiple_mentions() {
        assert_eq!(
            neutralize_mentions("@user1 and @user2 are here"),
            "`@user1` and `@user2` are here"
        );
    }

    #[test]
    fn test_email_is_not_mention() {
        assert_eq!(neutralize_mentions("email@example.com"), "email@example.com");
        assert!(handles("contact email@example.com").is_empty());
    }

    #[test]
    fn test_already_backticked_untouched() {
        let input = "Already `@user` handled";
        assert_eq!(neutralize_mentions(input), input);
    }

    #[test]
    fn test_punctuation_boundaries() {
        assert_eq!(neutralize_mentions("(@user)"), "(`@user`)");
        assert_eq!(neutralize_mentions("@user, @other."), "`@user`, `@other`.");
        assert_eq!(neutralize_mentions("@user\n@other"), "`@user`\n`@other`");
    }

    #[test]
    fn test_adjacent_mentions_both_wrapped() {
        assert_eq!(neutralize_mentions("@a@b"), "`@a``@b`");
        assert_eq!(neutralize_mentions("@a@b@c"), "`@a``@b``@c`");
    }

    #[test]
    fn test_handle_shape() {
        assert_eq!(neutralize_mentions("@-invalid"), "@-invalid");
        assert_eq!(neutralize_mentions("@invalid-"), "`@invalid`-");
        assert_eq!(neutralize_mentions("@user-name-123"), "`@user-name-123`");
        assert_eq!(neutralize_mentions("@ user"), "@ user");
        assert_eq!(neutralize_mentions("@"), "@");
        assert_eq!(neutralize_mentions("@@"), "@@");
    }

    #[test]
    fn test_long_handle_capped() {
        let long = format!("@{}", "x".repeat(50));
        let out = neutralize_mentions(&long);
        assert_eq!(out, format!("`@{}`{}", "x".repeat(39), "x".repeat(11)));
        assert!(!contains_live_mention(&out));
    }

    #[test]
    fn test_user_supplied_backtick_without_close_is_live() {
        assert_eq!(neutralize_mentions("`@a`@b"), "`@a``@b`");
        assert_eq!(neutralize_mentions("`@user"), "``@user`");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Hello @user",
            "@a@b@c",
            "@org/team and @x-y",
            "`@a`@b",
            "@invalid-",
            "mail me at a@b.c or @real",
        ];
        for input in inputs {
            let once = neutralize_mentions(input);
            assert_eq!(neutralize_mentions(&once), once, "input: {input:?}");
            assert!(!contains_live_mention(&once), "input: {input:?}");
        }
    }

    #[test]
    fn test_non_mention_text_untouched() {
        let input = "No mentions here, just 你好 and #123";
        assert_eq!(neutralize_mentions(input), input);
    }

    #[test]
    fn test_allowed_alias_kept() {
        let allowed = vec!["User".to_string(), "@org/team".to_string()];
        let result = neutralize_with_spans("@user @other @org/team", &allowed);
        assert_eq!(result.text, "@user `@other` @org/team");
        assert_eq!(result.spans, vec![0..5, 6..14, 15..24]);
    }

    #[test]
    fn test_spans_cover_wrapped_tokens() {
        let result = neutralize_with_spans("hi @a and @bc", &[]);
        for span in &result.spans {
            let token = &result.text[span.clone()];
            assert!(token.starts_with("`@") && token.ends_with('`'));
        }
        assert_eq!(result.spans.len(), 2);
    }

    #[test]
    fn test_scanner_spans() {
        let found: Vec<_> = find_mentions("x @ab y").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span, 2..5);
        assert_eq!(found[0].handle, "ab");
    }
}
