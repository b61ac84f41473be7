//! `enum`, `allOf`/`extends`, `anyOf`, `oneOf`, `not`, `type` and `disallow`.

use serde_json::Value;

use crate::canonical::{display_text, structurally_equal};
use crate::error::Result;
use crate::keyword::{has_date_format, AgnosticKeyword};
use crate::report::ValidationError;
use crate::translate::MessageKey;
use crate::types::check_type;
use crate::walk::Node;

pub(crate) fn evaluate(
    node: &Node<'_>,
    keyword: AgnosticKeyword,
    value: &Value,
) -> Result<Vec<ValidationError>> {
    let Some(arg) = node.schema.get(keyword.as_str()) else {
        return Ok(Vec::new());
    };
    match keyword {
        AgnosticKeyword::Enum => enumeration(node, arg, value),
        AgnosticKeyword::Extends => match arg {
            _ if is_schema(arg) => node.descend(arg, Some(value), node.path),
            _ => all_of(node, keyword, arg, value),
        },
        AgnosticKeyword::AllOf => all_of(node, keyword, arg, value),
        AgnosticKeyword::AnyOf => any_of(node, arg, value),
        AgnosticKeyword::OneOf => one_of(node, arg, value),
        AgnosticKeyword::Not => not(node, arg, value),
        AgnosticKeyword::Type => type_of(node, arg, value),
        AgnosticKeyword::Disallow => disallow(node, arg, value),
    }
}

fn enumeration(node: &Node<'_>, arg: &Value, value: &Value) -> Result<Vec<ValidationError>> {
    let Value::Array(members) = arg else {
        return node.skip("enum", "expected an array");
    };
    if members.iter().any(|m| structurally_equal(m, value)) {
        return Ok(Vec::new());
    }
    Ok(vec![node.error("enum", MessageKey::Enum, &[])])
}

fn all_of(
    node: &Node<'_>,
    keyword: AgnosticKeyword,
    arg: &Value,
    value: &Value,
) -> Result<Vec<ValidationError>> {
    let Value::Array(branches) = arg else {
        return node.skip(keyword.as_str(), "expected an array of schemas");
    };
    let mut errors = Vec::new();
    for branch in branches {
        if !is_schema(branch) {
            node.skip(keyword.as_str(), "expected a schema")?;
            continue;
        }
        errors.extend(node.descend(branch, Some(value), node.path)?);
    }
    Ok(errors)
}

fn any_of(node: &Node<'_>, arg: &Value, value: &Value) -> Result<Vec<ValidationError>> {
    let Value::Array(branches) = arg else {
        return node.skip("anyOf", "expected an array of schemas");
    };
    for branch in branches {
        if !is_schema(branch) {
            node.skip("anyOf", "expected a schema")?;
            continue;
        }
        if node.passes(branch, value)? {
            return Ok(Vec::new());
        }
    }
    Ok(vec![node.error("anyOf", MessageKey::AnyOf, &[])])
}

fn one_of(node: &Node<'_>, arg: &Value, value: &Value) -> Result<Vec<ValidationError>> {
    let Value::Array(branches) = arg else {
        return node.skip("oneOf", "expected an array of schemas");
    };

    let mut valid_count = 0usize;
    let mut branch_errors = Vec::new();
    for (i, branch) in branches.iter().enumerate() {
        if !is_schema(branch) {
            node.skip("oneOf", "expected a schema")?;
            continue;
        }
        let errors = node.descend(branch, Some(value), node.path)?;
        if errors.is_empty() {
            valid_count += 1;
        }
        branch_errors.extend(errors.into_iter().map(|err| relabel(node.path, i, err)));
    }

    if valid_count == 1 {
        return Ok(Vec::new());
    }
    let mut errors = vec![node.error("oneOf", MessageKey::OneOf, &[valid_count.to_string()])];
    errors.extend(branch_errors);
    Ok(errors)
}

/// Sub-schema arguments are objects, or `true` for the empty schema.
fn is_schema(arg: &Value) -> bool {
    matches!(arg, Value::Object(_) | Value::Bool(true))
}

/// `<path><rest>` becomes `<path>.oneOf[i]<rest>`.
fn relabel(path: &str, branch: usize, mut err: ValidationError) -> ValidationError {
    if let Some(rest) = err.path.strip_prefix(path) {
        err.path = format!("{path}.oneOf[{branch}]{rest}");
    }
    err
}

fn not(node: &Node<'_>, arg: &Value, value: &Value) -> Result<Vec<ValidationError>> {
    if !is_schema(arg) {
        return node.skip("not", "expected a schema");
    }
    if node.passes(arg, value)? {
        return Ok(vec![node.error("not", MessageKey::Not, &[])]);
    }
    Ok(Vec::new())
}

fn type_of(node: &Node<'_>, arg: &Value, value: &Value) -> Result<Vec<ValidationError>> {
    if let Value::Array(union) = arg {
        for entry in union {
            if check_type(node, entry, value)? {
                return Ok(Vec::new());
            }
        }
        return Ok(vec![node.error("type", MessageKey::TypeUnion, &[])]);
    }

    // Date-like integers may arrive as numeric strings; the format check owns them.
    if has_date_format(node.schema) && arg.as_str() == Some("integer") {
        let coerced = Value::String(display_text(value));
        if !check_type(node, &Value::String("string".into()), &coerced)? {
            return Ok(vec![node.error(
                "type",
                MessageKey::Type,
                &[node.arg_text("format")],
            )]);
        }
        return Ok(Vec::new());
    }

    if check_type(node, arg, value)? {
        return Ok(Vec::new());
    }
    Ok(vec![node.error("type", MessageKey::Type, &[display_text(arg)])])
}

fn disallow(node: &Node<'_>, arg: &Value, value: &Value) -> Result<Vec<ValidationError>> {
    if let Value::Array(union) = arg {
        for entry in union {
            if check_type(node, entry, value)? {
                return Ok(vec![node.error("disallow", MessageKey::DisallowUnion, &[])]);
            }
        }
        return Ok(Vec::new());
    }

    if check_type(node, arg, value)? {
        return Ok(vec![node.error(
            "disallow",
            MessageKey::Disallow,
            &[display_text(arg)],
        )]);
    }
    Ok(Vec::new())
}
