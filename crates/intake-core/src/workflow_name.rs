//! Filesystem-safe workflow names.

/// Turn a workflow name into a path fragment.
///
/// Lower-cases, maps path separators, colons and whitespace to `-`, then maps
/// every remaining character outside `[a-z0-9._-]` to `-`. Each input
/// character becomes exactly one output character, so runs are not
/// collapsed.
pub fn sanitize_workflow_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            c if c.is_whitespace() => '-',
            'a'..='z' | '0'..='9' | '.' | '_' | '-' => c,
            _ => '-',
        })
        .collect()
}
