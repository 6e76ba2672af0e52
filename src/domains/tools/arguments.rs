//! Typed accessors over the argument bag of a tool call.
//!
//! Tool call arguments arrive as a JSON object: a map from parameter name
//! to a dynamically-typed value. The accessors here pull values out of that
//! bag with presence, type and meaningful-value checks, one function per
//! (type, cardinality) pair, so the rules stay explicit and auditable per
//! type.
//!
//! Two rules are worth calling out:
//!
//! - For *required* parameters, a present-but-zero value (empty string,
//!   number `0`) is collapsed into the same failure as an absent key.
//!   A required parameter that the caller left empty is treated as not
//!   supplied at all.
//! - JSON `null` is treated as absent everywhere. A key mapped to `null`
//!   behaves exactly like a key that is not in the bag.
//!
//! There is intentionally no `required_bool`: the zero-value rule would
//! make an explicit `false` unrepresentable, so boolean parameters are
//! always optional.
//!
//! All accessors are pure functions over the bag snapshot; nothing here
//! touches the network or any shared state.

use serde_json::{Map, Value};

use super::error::ToolError;

/// The argument bag of a single tool call.
pub type ArgumentBag = Map<String, Value>;

/// Human-readable name of a JSON value's type, for error messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Look up a key, treating JSON `null` as absent.
fn lookup<'a>(args: &'a ArgumentBag, name: &str) -> Option<&'a Value> {
    match args.get(name) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Fetch a required string parameter.
///
/// Fails when the key is absent, when the value is not a string, or when
/// the string is empty.
pub fn required_string(args: &ArgumentBag, name: &str) -> Result<String, ToolError> {
    match lookup(args, name) {
        None => Err(ToolError::missing(name)),
        Some(Value::String(s)) if s.is_empty() => Err(ToolError::missing(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ToolError::mismatch(name, "string", type_name(other))),
    }
}

/// Fetch a required integer parameter.
///
/// Numeric parameters arrive as JSON numbers; the result is obtained by
/// truncating toward zero. A numeric value of `0` is collapsed into the
/// missing-parameter failure, checked before truncation so that e.g. `0.3`
/// is accepted (and truncates to `0`).
pub fn required_int(args: &ArgumentBag, name: &str) -> Result<i64, ToolError> {
    match lookup(args, name) {
        None => Err(ToolError::missing(name)),
        Some(Value::Number(n)) => {
            let value = n.as_f64().unwrap_or(0.0);
            if value == 0.0 {
                Err(ToolError::missing(name))
            } else {
                Ok(value as i64)
            }
        }
        Some(other) => Err(ToolError::mismatch(name, "number", type_name(other))),
    }
}

/// Fetch an optional string parameter, defaulting to `""` when absent.
///
/// The empty-means-missing rule never applies to optional parameters: an
/// explicit empty string is returned as-is.
pub fn optional_string(args: &ArgumentBag, name: &str) -> Result<String, ToolError> {
    match lookup(args, name) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ToolError::mismatch(name, "string", type_name(other))),
    }
}

/// Fetch an optional integer parameter, defaulting to `0` when absent.
/// The value is truncated toward zero.
pub fn optional_int(args: &ArgumentBag, name: &str) -> Result<i64, ToolError> {
    match lookup(args, name) {
        None => Ok(0),
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(0.0) as i64),
        Some(other) => Err(ToolError::mismatch(name, "number", type_name(other))),
    }
}

/// Fetch an optional integer parameter with a default.
///
/// The default is substituted whenever the resolved value is `0`, which
/// makes an explicit `0` supplied by the caller indistinguishable from "not
/// supplied". That collapse is intentional and relied on by pagination
/// parameters.
pub fn optional_int_or(args: &ArgumentBag, name: &str, default: i64) -> Result<i64, ToolError> {
    let value = optional_int(args, name)?;
    if value == 0 { Ok(default) } else { Ok(value) }
}

/// Fetch an optional boolean parameter, defaulting to `false` when absent.
pub fn optional_bool(args: &ArgumentBag, name: &str) -> Result<bool, ToolError> {
    match lookup(args, name) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ToolError::mismatch(name, "boolean", type_name(other))),
    }
}

/// Fetch an optional string-array parameter, defaulting to `[]` when absent.
///
/// Every element must be a string; a single offending element fails the
/// whole call and no partial result is returned.
pub fn optional_string_array(args: &ArgumentBag, name: &str) -> Result<Vec<String>, ToolError> {
    let Some(value) = lookup(args, name) else {
        return Ok(Vec::new());
    };

    let items = match value {
        Value::Array(items) => items,
        other => return Err(ToolError::mismatch(name, "array of strings", type_name(other))),
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => out.push(s.clone()),
            other => {
                return Err(ToolError::mismatch(name, "string", type_name(other)));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: serde_json::Value) -> ArgumentBag {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_required_string_present() {
        let args = bag(json!({"owner": "octocat"}));
        assert_eq!(required_string(&args, "owner").unwrap(), "octocat");
    }

    #[test]
    fn test_required_string_absent() {
        let args = bag(json!({}));
        assert!(matches!(
            required_string(&args, "owner"),
            Err(ToolError::MissingParameter(name)) if name == "owner"
        ));
    }

    #[test]
    fn test_required_string_empty_collapses_to_missing() {
        let args = bag(json!({"owner": ""}));
        assert!(matches!(
            required_string(&args, "owner"),
            Err(ToolError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_required_string_wrong_type() {
        let args = bag(json!({"owner": 42}));
        assert!(matches!(
            required_string(&args, "owner"),
            Err(ToolError::TypeMismatch { expected: "string", .. })
        ));
    }

    #[test]
    fn test_required_string_null_treated_as_absent() {
        let args = bag(json!({"owner": null}));
        assert!(matches!(
            required_string(&args, "owner"),
            Err(ToolError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_required_int_whole_number() {
        let args = bag(json!({"issue_number": 5.0}));
        assert_eq!(required_int(&args, "issue_number").unwrap(), 5);
    }

    #[test]
    fn test_required_int_truncates_not_rounds() {
        let args = bag(json!({"issue_number": 5.9}));
        assert_eq!(required_int(&args, "issue_number").unwrap(), 5);
    }

    #[test]
    fn test_required_int_fraction_passes_zero_check_then_truncates() {
        // The zero check runs on the float, so 0.4 is not "missing" even
        // though it truncates to 0.
        let args = bag(json!({"issue_number": 0.4}));
        assert_eq!(required_int(&args, "issue_number").unwrap(), 0);
    }

    #[test]
    fn test_required_int_zero_collapses_to_missing() {
        let args = bag(json!({"issue_number": 0}));
        assert!(matches!(
            required_int(&args, "issue_number"),
            Err(ToolError::MissingParameter(_))
        ));
    }

    #[test]
    fn test_required_int_wrong_type() {
        let args = bag(json!({"issue_number": "5"}));
        assert!(matches!(
            required_int(&args, "issue_number"),
            Err(ToolError::TypeMismatch { expected: "number", .. })
        ));
    }

    #[test]
    fn test_optional_string_absent_yields_empty() {
        let args = bag(json!({}));
        assert_eq!(optional_string(&args, "branch").unwrap(), "");
    }

    #[test]
    fn test_optional_string_empty_passes_through() {
        let args = bag(json!({"branch": ""}));
        assert_eq!(optional_string(&args, "branch").unwrap(), "");
    }

    #[test]
    fn test_optional_string_wrong_type() {
        let args = bag(json!({"branch": false}));
        assert!(optional_string(&args, "branch").is_err());
    }

    #[test]
    fn test_optional_int_absent_yields_zero() {
        let args = bag(json!({}));
        assert_eq!(optional_int(&args, "page").unwrap(), 0);
    }

    #[test]
    fn test_optional_int_or_default_when_absent() {
        let args = bag(json!({}));
        assert_eq!(optional_int_or(&args, "x", 10).unwrap(), 10);
    }

    #[test]
    fn test_optional_int_or_default_on_explicit_zero() {
        // An explicit 0 is indistinguishable from absence.
        let args = bag(json!({"x": 0}));
        assert_eq!(optional_int_or(&args, "x", 10).unwrap(), 10);
    }

    #[test]
    fn test_optional_int_or_keeps_value() {
        let args = bag(json!({"x": 3}));
        assert_eq!(optional_int_or(&args, "x", 10).unwrap(), 3);
    }

    #[test]
    fn test_optional_bool() {
        let args = bag(json!({"draft": true}));
        assert!(optional_bool(&args, "draft").unwrap());
        assert!(!optional_bool(&args, "private").unwrap());
        let args = bag(json!({"draft": "yes"}));
        assert!(optional_bool(&args, "draft").is_err());
    }

    #[test]
    fn test_optional_string_array_present() {
        let args = bag(json!({"labels": ["a", "b"]}));
        assert_eq!(
            optional_string_array(&args, "labels").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_optional_string_array_absent_yields_empty() {
        let args = bag(json!({}));
        assert!(optional_string_array(&args, "labels").unwrap().is_empty());
    }

    #[test]
    fn test_optional_string_array_mixed_elements_all_or_nothing() {
        let args = bag(json!({"labels": [1, "b"]}));
        assert!(matches!(
            optional_string_array(&args, "labels"),
            Err(ToolError::TypeMismatch { actual, .. }) if actual == "number"
        ));
    }

    #[test]
    fn test_optional_string_array_not_an_array() {
        let args = bag(json!({"labels": "a,b"}));
        assert!(optional_string_array(&args, "labels").is_err());
    }
}
