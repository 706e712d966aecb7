//! Required-field validation for tool arguments.
//!
//! Runs before a handler is invoked. Never fails: absence is reported as a
//! list so the dispatcher can decide whether to reject the call.

use serde_json::Value;

/// Names of the fields listed in `input_schema.required` that `args` lacks.
///
/// A field is missing when it is absent, `null`, or a string that is empty
/// after trimming whitespace. Other falsy values (`0`, `false`, `[]`) count
/// as present. Non-object `args` lack every required field; a schema without
/// a `required` array yields an empty list.
///
/// # Example
///
/// ```rust
/// use intake_core::validate_required_fields;
/// use serde_json::json;
///
/// let schema = json!({ "required": ["a", "b"] });
/// let missing = validate_required_fields(&json!({ "a": "x", "b": "  " }), &schema);
/// assert_eq!(missing, vec!["b".to_string()]);
/// ```
pub fn validate_required_fields(args: &Value, input_schema: &Value) -> Vec<String> {
    let Some(required) = input_schema.get("required").and_then(Value::as_array) else {
        return Vec::new();
    };

    required
        .iter()
        .filter_map(Value::as_str)
        .filter(|field| is_missing(args.get(*field)))
        .map(str::to_owned)
        .collect()
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
