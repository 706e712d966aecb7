//! # Intake Integration Tests
//!
//! End-to-end tests through the public facade and boundary utilities.
//!
//! ## Coverage
//!
//! | Concern | Entry point | Test |
//! |---------|-------------|------|
//! | Config file + overrides | `IntakeConfig::load` | `test_config_load_*` |
//! | Pipeline via facade | `Intake::sanitize_*` | `test_facade_*` |
//! | Audit trail | `RedactedDomainRecord` log | `test_audit_*` |
//! | Tool dispatch | `Intake::check_tool_call` | `test_tool_*` |
//! | Boundary utilities | free functions | `test_util_*` |

use std::fs;
use std::path::Path;

use intake_core::{
    create_tool_config, get_tracker_id, message_from_value, sanitize_workflow_name,
    validate_required_fields, DomainPolicy, HandlerKind, Intake, IntakeConfig, IntakeError,
    RedactedDomainRecord, SanitizeOptions, SanitizerConfig, TrackerFormat,
};
use serde_json::json;
use tempfile::TempDir;

/// Creates a test configuration logging into a temporary directory.
fn test_config(temp_dir: &TempDir) -> IntakeConfig {
    IntakeConfig {
        sanitizer: SanitizerConfig {
            domains: DomainPolicy::default().deny(["evil.com"]),
            audit_log_path: temp_dir.path().join("redacted-urls.log"),
            ..SanitizerConfig::default()
        },
        tracker_id: None,
    }
}

fn read_log(path: &Path) -> Vec<RedactedDomainRecord> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_config_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("intake.json");
    fs::write(
        &path,
        r#"{
            "sanitizer": {
                "max_length": 64,
                "domains": { "denied": ["evil.com"] },
                "redaction_placeholder": "[link removed]"
            },
            "tracker_id": "from-file"
        }"#,
    )
    .unwrap();

    let config = IntakeConfig::load(&path).unwrap();
    assert_eq!(config.sanitizer.max_length, 64);
    assert_eq!(config.tracker_id.as_deref(), Some("from-file"));

    let intake = Intake::new(config).unwrap();
    assert_eq!(
        intake.sanitizer().sanitize_report("see evil.com", &SanitizeOptions::default()).text,
        "see [link removed]"
    );
}

#[test]
fn test_config_load_override_replaces_tracker() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("intake.json");
    fs::write(&path, r#"{"tracker_id": "from-file"}"#).unwrap();

    let config = IntakeConfig::load(&path)
        .unwrap()
        .with_tracker_id(Some("from-env".to_string()));
    assert_eq!(config.tracker_id.as_deref(), Some("from-env"));
}

#[test]
fn test_config_load_errors() {
    let temp_dir = TempDir::new().unwrap();

    let missing = IntakeConfig::load(temp_dir.path().join("absent.json"));
    assert!(matches!(missing, Err(IntakeError::Io { .. })));

    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(IntakeConfig::load(&path), Err(IntakeError::Json(_))));

    fs::write(&path, r#"{"sanitizer": {"max_length": 0}}"#).unwrap();
    assert!(matches!(IntakeConfig::load(&path), Err(IntakeError::Config(_))));
}

// =============================================================================
// FACADE
// =============================================================================

#[test]
fn test_facade_clean_text_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let intake = Intake::new(test_config(&temp_dir)).unwrap();

    let input = "The build fails on step 3; logs attached.\nThanks!";
    assert_eq!(intake.sanitize_incoming_text(input, None), input);
    assert!(!temp_dir.path().join("redacted-urls.log").exists());
}

#[test]
fn test_facade_full_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let intake = Intake::new(test_config(&temp_dir)).unwrap();

    let out = intake.sanitize_incoming_text("@alice see https://cdn.evil.com/a.js and @bob", None);
    assert_eq!(out, "`@alice` see (redacted) and `@bob`");
}

#[test]
fn test_facade_allowed_aliases() {
    let temp_dir = TempDir::new().unwrap();
    let intake = Intake::new(test_config(&temp_dir)).unwrap();

    let options = SanitizeOptions::default().with_allowed_aliases(["@Octocat"]);
    assert_eq!(
        intake.sanitize_content("@octocat please ping @mallory", &options),
        "@octocat please ping `@mallory`"
    );
    // The core path has no allow-list.
    assert_eq!(
        intake.sanitize_content_core("@octocat", None),
        "`@octocat`"
    );
}

#[test]
fn test_facade_length_budget() {
    let temp_dir = TempDir::new().unwrap();
    let intake = Intake::new(test_config(&temp_dir)).unwrap();

    let out = intake.sanitize_incoming_text(&"word ".repeat(1000), Some(100));
    assert_eq!(out.len(), 100);
}

#[test]
fn test_facade_tracker_id() {
    let temp_dir = TempDir::new().unwrap();
    let config = test_config(&temp_dir).with_tracker_id(Some("workflow-run-9".to_string()));
    let intake = Intake::new(config).unwrap();

    assert_eq!(intake.tracker_id(TrackerFormat::Text), "workflow-run-9");
    assert_eq!(
        intake.tracker_id(TrackerFormat::Markdown),
        "\n\n<!-- gh-aw-tracker-id: workflow-run-9 -->"
    );

    let untracked = Intake::new(test_config(&temp_dir)).unwrap();
    assert_eq!(untracked.tracker_id(TrackerFormat::Markdown), "");
}

// =============================================================================
// AUDIT TRAIL
// =============================================================================

#[test]
fn test_audit_records_aggregated_per_host() {
    let temp_dir = TempDir::new().unwrap();
    let intake = Intake::new(test_config(&temp_dir)).unwrap();

    let options = SanitizeOptions::default().with_source_context("issue_comment");
    intake.sanitize_content(
        "evil.com, https://EVIL.com/x, api.evil.com and evil.com again",
        &options,
    );

    let records = read_log(&temp_dir.path().join("redacted-urls.log"));
    let summary: Vec<_> = records
        .iter()
        .map(|r| (r.domain.as_str(), r.occurrence_count))
        .collect();
    assert_eq!(summary, vec![("evil.com", 3), ("api.evil.com", 1)]);
    assert!(records
        .iter()
        .all(|r| r.source_context.as_deref() == Some("issue_comment")));
}

#[test]
fn test_audit_appends_across_calls() {
    let temp_dir = TempDir::new().unwrap();
    let intake = Intake::new(test_config(&temp_dir)).unwrap();

    intake.sanitize_incoming_text("evil.com", None);
    intake.sanitize_incoming_text("nothing to see", None);
    intake.sanitize_incoming_text("www.evil.com", None);

    let domains: Vec<_> = read_log(&temp_dir.path().join("redacted-urls.log"))
        .into_iter()
        .map(|r| r.domain)
        .collect();
    assert_eq!(domains, vec!["evil.com", "www.evil.com"]);
}

#[test]
fn test_audit_failure_does_not_affect_output() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = test_config(&temp_dir);
    // A directory cannot be opened as the log file.
    config.sanitizer.audit_log_path = temp_dir.path().to_path_buf();
    let intake = Intake::new(config).unwrap();

    assert_eq!(intake.sanitize_incoming_text("go to evil.com", None), "go to (redacted)");
}

// =============================================================================
// TOOL DISPATCH
// =============================================================================

#[test]
fn test_tool_call_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let intake = Intake::new(test_config(&temp_dir)).unwrap();

    let tool = create_tool_config(
        "create_issue",
        "Open an issue",
        json!({ "type": "object", "required": ["title", "body"] }),
        "handlers/create_issue.sh",
    );
    assert_eq!(tool.handler_kind(), HandlerKind::Shell);
    assert!(intake
        .check_tool_call(&tool, &json!({ "title": "Bug", "body": "Steps..." }))
        .is_ok());
}

#[test]
fn test_tool_call_missing_fields_reported() {
    let temp_dir = TempDir::new().unwrap();
    let intake = Intake::new(test_config(&temp_dir)).unwrap();

    let tool = create_tool_config(
        "create_issue",
        "Open an issue",
        json!({ "required": ["title", "body", "labels"] }),
        "create_issue.py",
    );
    let err = intake
        .check_tool_call(&tool, &json!({ "title": "", "labels": [] }))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing required fields for tool 'create_issue': title, body"
    );
}

// =============================================================================
// BOUNDARY UTILITIES
// =============================================================================

#[test]
fn test_util_validate_required_fields() {
    let schema = json!({ "required": ["a", "b"] });
    assert_eq!(validate_required_fields(&json!({}), &schema), vec!["a", "b"]);
    assert_eq!(
        validate_required_fields(&json!({ "a": "x", "b": "  " }), &schema),
        vec!["b"]
    );
    assert!(validate_required_fields(&json!({ "a": 0, "b": false }), &schema).is_empty());
}

#[test]
fn test_util_workflow_name() {
    assert_eq!(sanitize_workflow_name("My Workflow: Test/Run"), "my-workflow--test-run");
}

#[test]
fn test_util_error_message() {
    assert_eq!(message_from_value(&json!({ "message": "x" })), "x");
    assert_eq!(message_from_value(&json!(42)), "42");
}

#[test]
fn test_util_tracker_id() {
    assert_eq!(get_tracker_id(None, TrackerFormat::Text), "");
    assert_eq!(get_tracker_id(Some("abc"), TrackerFormat::Text), "abc");
}
