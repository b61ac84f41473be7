//! `minLength`, `maxLength` and `pattern`.

use regex::Regex;
use serde_json::Value;

use crate::canonical::number_text;
use crate::error::Result;
use crate::keyword::StringKeyword;
use crate::report::ValidationError;
use crate::translate::MessageKey;
use crate::walk::Node;

pub(crate) fn evaluate(node: &Node<'_>, value: &str) -> Result<Vec<ValidationError>> {
    let mut errors = Vec::new();
    // Length is counted in characters, not bytes.
    let length = value.chars().count() as f64;
    for keyword in StringKeyword::present(node.schema) {
        match keyword {
            StringKeyword::MaxLength => {
                let Some(limit) = limit(node, keyword)? else {
                    continue;
                };
                if length > limit.0 {
                    errors.push(node.error(keyword.as_str(), MessageKey::MaxLength, &[limit.1]));
                }
            }
            StringKeyword::MinLength => {
                let Some(limit) = limit(node, keyword)? else {
                    continue;
                };
                if length < limit.0 {
                    let key = if limit.0 == 1.0 {
                        MessageKey::NotEmpty
                    } else {
                        MessageKey::MinLength
                    };
                    errors.push(node.error(keyword.as_str(), key, &[limit.1]));
                }
            }
            StringKeyword::Pattern => errors.extend(pattern(node, value)?),
        }
    }
    Ok(errors)
}

/// Numeric argument of a length keyword and its message text.
fn limit(node: &Node<'_>, keyword: StringKeyword) -> Result<Option<(f64, String)>> {
    match node.schema.get(keyword.as_str()) {
        Some(Value::Number(n)) => Ok(n.as_f64().map(|f| (f, number_text(n)))),
        _ => {
            node.skip(keyword.as_str(), "expected a number")?;
            Ok(None)
        }
    }
}

fn pattern(node: &Node<'_>, value: &str) -> Result<Vec<ValidationError>> {
    let Some(Value::String(source)) = node.schema.get("pattern") else {
        return node.skip("pattern", "expected a string");
    };
    let regex = match Regex::new(source) {
        Ok(regex) => regex,
        Err(err) => return node.skip("pattern", &err.to_string()),
    };
    if regex.is_match(value) {
        return Ok(Vec::new());
    }

    let message = match node
        .schema
        .get("options")
        .and_then(|options| options.get("patternmessage"))
    {
        Some(Value::String(custom)) if !custom.is_empty() => custom.clone(),
        _ => node.translate(MessageKey::Pattern, &[source.clone()]),
    };
    Ok(vec![ValidationError::new(node.path, "pattern", message)])
}
