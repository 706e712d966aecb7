//! Tracker ID formatting.
//!
//! The ID itself is read once at startup (see
//! [`IntakeConfig::with_env_overrides`](crate::IntakeConfig::with_env_overrides))
//! and passed in here as a value.

use serde::{Deserialize, Serialize};
use tracing::info;

/// How the tracker ID is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerFormat {
    /// The bare ID.
    #[default]
    Text,
    /// An HTML comment appended to a markdown body.
    Markdown,
}

/// Render the tracker ID, or an empty string when there is none.
///
/// ```rust
/// use intake_core::{get_tracker_id, TrackerFormat};
///
/// assert_eq!(get_tracker_id(None, TrackerFormat::Markdown), "");
/// assert_eq!(
///     get_tracker_id(Some("abc"), TrackerFormat::Markdown),
///     "\n\n<!-- gh-aw-tracker-id: abc -->"
/// );
/// ```
pub fn get_tracker_id(tracker_id: Option<&str>, format: TrackerFormat) -> String {
    let Some(id) = tracker_id.filter(|id| !id.is_empty()) else {
        return String::new();
    };

    info!("Tracker ID: {}", id);
    match format {
        TrackerFormat::Markdown => format!("\n\n<!-- gh-aw-tracker-id: {id} -->"),
        TrackerFormat::Text => id.to_string(),
    }
}
