//! Canonical text forms of JSON values.
//!
//! Structural equality (`enum`, `uniqueItems`) compares canonical strings:
//! object keys are sorted and integral numbers print without a fraction, so
//! `{"b":1.0,"a":2}` and `{"a":2,"b":1}` are the same value.

use serde_json::{Number, Value};

/// Largest integer magnitude an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Canonical serialization of `value`.
pub fn canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&number_text(n)),
        Value::String(s) => write_json_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_string(key, out);
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
    }
}

fn write_json_string(s: &str, out: &mut String) {
    match serde_json::to_string(s) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
    }
}

/// Shortest decimal text of a number; integral floats drop their fraction.
pub fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => format!("{}", f as i64),
        Some(f) => format!("{f}"),
        None => n.to_string(),
    }
}

/// Text of a value as it appears inside a message or a coerced string check.
///
/// Strings are used verbatim; everything else uses its canonical form.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        other => canonical_string(other),
    }
}

/// Structural equality under canonical serialization.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    canonical_string(a) == canonical_string(b)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn num(value: Value) -> Number {
        match value {
            Value::Number(n) => n,
            other => panic!("not a number: {other}"),
        }
    }

    #[test]
    fn object_key_order_is_irrelevant() {
        assert_eq!(
            canonical_string(&json!({"b": 1, "a": [true, null]})),
            r#"{"a":[true,null],"b":1}"#
        );
        assert!(structurally_equal(
            &json!({"x": {"q": 1, "p": 2}}),
            &json!({"x": {"p": 2, "q": 1}})
        ));
    }

    #[test]
    fn integral_floats_match_integers() {
        assert!(structurally_equal(&json!(1.0), &json!(1)));
        assert!(!structurally_equal(&json!(1.5), &json!(1)));
        assert_eq!(number_text(&num(json!(0.01))), "0.01");
        assert_eq!(number_text(&num(json!(-3.0))), "-3");
    }

    #[test]
    fn strings_are_escaped() {
        assert_eq!(canonical_string(&json!("a\"b")), r#""a\"b""#);
        assert_eq!(display_text(&json!("a\"b")), "a\"b");
        assert!(!structurally_equal(&json!("1"), &json!(1)));
    }
}
