//! Type names and the predicates behind `type` and `disallow`.

use serde_json::Value;

use crate::error::Result;
use crate::walk::Node;

/// Whether `value` belongs to the named type. Unknown names always match.
pub fn named_type_matches(name: &str, value: &Value) -> bool {
    match name {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => is_integer(value),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => false,
    }
}

/// Runtime kind name of a value, spelled the way `type` names it.
///
/// Integral numbers report `integer`, so callers describing an instance
/// agree with the validator's own type messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) if is_integer(value) => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check one type entry: a name, or a nested schema the value must pass.
pub(crate) fn check_type(node: &Node<'_>, spec: &Value, value: &Value) -> Result<bool> {
    match spec {
        Value::String(name) => Ok(named_type_matches(name, value)),
        Value::Object(_) => node.passes(spec, value),
        other => {
            node.walker.malformed(
                node.path,
                "type",
                &format!("expected a type name or schema, got {other}"),
            )?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integer_accepts_integral_floats() {
        assert!(named_type_matches("integer", &json!(3)));
        assert!(named_type_matches("integer", &json!(3.0)));
        assert!(!named_type_matches("integer", &json!(3.5)));
        assert!(!named_type_matches("integer", &json!("3")));
    }

    #[test]
    fn object_excludes_null_and_arrays() {
        assert!(named_type_matches("object", &json!({})));
        assert!(!named_type_matches("object", &json!(null)));
        assert!(!named_type_matches("object", &json!([])));
        assert!(named_type_matches("null", &json!(null)));
    }

    #[test]
    fn unknown_names_always_match() {
        assert!(named_type_matches("any", &json!([1])));
        assert!(named_type_matches("date", &json!(false)));
    }

    #[test]
    fn kind_names() {
        assert_eq!(kind_name(&json!(2)), "integer");
        assert_eq!(kind_name(&json!(2.5)), "number");
        assert_eq!(kind_name(&json!({"a": 1})), "object");
    }
}
