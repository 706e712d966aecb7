//! Content Disarm (stage 0)
//!
//! Strips terminal escape sequences and invisible characters before any
//! scanner looks at the text, so a zero-width joiner cannot split `@user`
//! or `evil.com` into something the mention and domain scanners miss.

use std::sync::LazyLock;

use regex::Regex;

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("ANSI escape pattern is valid")
});

/// Disarm text by removing escape sequences and invisible characters.
///
/// - Removes ANSI CSI escape sequences
/// - Strips control characters (except newline, carriage return and tab)
/// - Strips zero-width, bidi-override, BOM and tag characters
///
/// Never fails and is idempotent.
pub fn disarm(input: &str) -> String {
    let without_ansi = strip_ansi(input);
    let mut output = String::with_capacity(without_ansi.len());

    for c in without_ansi.chars() {
        match c {
            '\n' | '\r' | '\t' => output.push(c),
            '\u{0000}'..='\u{001F}' => {} // C0 controls
            '\u{007F}'..='\u{009F}' => {} // DEL + C1 controls
            '\u{200B}'..='\u{200F}' => {} // Zero-width chars
            '\u{202A}'..='\u{202E}' => {} // Directional formatting
            '\u{2060}'..='\u{2064}' => {} // Word joiner, invisible operators
            '\u{FEFF}' => {}              // BOM
            '\u{E0000}'..='\u{E007F}' => {} // Tag characters
            c => output.push(c),
        }
    }

    output
}

/// Strip ANSI escape sequences from text
pub fn strip_ansi(input: &str) -> String {
    ANSI_ESCAPE.replace_all(input, "").into_owned()
}
