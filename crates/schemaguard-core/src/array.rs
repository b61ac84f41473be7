//! `items`/`additionalItems`, `minItems`, `maxItems` and `uniqueItems`.

use std::collections::HashSet;

use serde_json::Value;

use crate::canonical::{canonical_string, number_text};
use crate::error::Result;
use crate::keyword::ArrayKeyword;
use crate::report::{child_path, ValidationError};
use crate::translate::MessageKey;
use crate::walk::{truthy, Node};

pub(crate) fn evaluate(node: &Node<'_>, items: &[Value]) -> Result<Vec<ValidationError>> {
    let mut errors = Vec::new();
    for keyword in ArrayKeyword::present(node.schema) {
        match keyword {
            ArrayKeyword::Items => errors.extend(each_item(node, items)?),
            ArrayKeyword::MaxItems | ArrayKeyword::MinItems => {
                errors.extend(cardinality(node, keyword, items.len())?)
            }
            ArrayKeyword::UniqueItems => errors.extend(unique(node, items)),
        }
    }
    Ok(errors)
}

fn each_item(node: &Node<'_>, items: &[Value]) -> Result<Vec<ValidationError>> {
    let Some(spec) = node.schema.get("items") else {
        return Ok(Vec::new());
    };
    let mut errors = Vec::new();

    let Value::Array(tuple) = spec else {
        for (i, item) in items.iter().enumerate() {
            errors.extend(node.descend(spec, Some(item), &child_path(node.path, i))?);
        }
        return Ok(errors);
    };

    for (i, item) in items.iter().enumerate() {
        let item_path = child_path(node.path, i);
        if let Some(positional) = tuple.get(i).filter(|s| truthy(s)) {
            errors.extend(node.descend(positional, Some(item), &item_path)?);
            continue;
        }
        // Past the end of the tuple: `additionalItems` decides, absent means anything goes.
        match node.schema.get("additionalItems") {
            Some(Value::Bool(false)) => {
                errors.push(node.error("additionalItems", MessageKey::AdditionalItems, &[]));
                break;
            }
            Some(extra @ Value::Object(_)) => {
                errors.extend(node.descend(extra, Some(item), &item_path)?);
            }
            _ => break,
        }
    }
    Ok(errors)
}

fn cardinality(
    node: &Node<'_>,
    keyword: ArrayKeyword,
    len: usize,
) -> Result<Vec<ValidationError>> {
    let Some(Value::Number(limit)) = node.schema.get(keyword.as_str()) else {
        return node.skip(keyword.as_str(), "expected a number");
    };
    let bound = limit.as_f64().unwrap_or(f64::NAN);
    let (violated, key) = match keyword {
        ArrayKeyword::MaxItems => (len as f64 > bound, MessageKey::MaxItems),
        _ => ((len as f64) < bound, MessageKey::MinItems),
    };
    if violated {
        return Ok(vec![node.error(keyword.as_str(), key, &[number_text(limit)])]);
    }
    Ok(Vec::new())
}

/// Report the first duplicate only.
fn unique(node: &Node<'_>, items: &[Value]) -> Vec<ValidationError> {
    if !node.schema.get("uniqueItems").is_some_and(truthy) {
        return Vec::new();
    }
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(canonical_string(item)) {
            return vec![node.error("uniqueItems", MessageKey::UniqueItems, &[])];
        }
    }
    Vec::new()
}
