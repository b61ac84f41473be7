//! `minimum`, `maximum`, `multipleOf` and `divisibleBy`.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::canonical::number_text;
use crate::error::Result;
use crate::keyword::NumberKeyword;
use crate::report::ValidationError;
use crate::translate::MessageKey;
use crate::walk::{truthy, Node};

pub(crate) fn evaluate(node: &Node<'_>, value: &Number) -> Result<Vec<ValidationError>> {
    let mut errors = Vec::new();
    for keyword in NumberKeyword::present(node.schema) {
        match keyword {
            NumberKeyword::MultipleOf => errors.extend(divisibility(node, keyword, value)?),
            // `divisibleBy` is the legacy spelling; `multipleOf` wins when both are set.
            NumberKeyword::DivisibleBy if !node.schema.contains_key("multipleOf") => {
                errors.extend(divisibility(node, keyword, value)?)
            }
            NumberKeyword::DivisibleBy => {}
            NumberKeyword::Maximum => errors.extend(bound(node, Bound::Maximum, value)?),
            NumberKeyword::Minimum => errors.extend(bound(node, Bound::Minimum, value)?),
        }
    }
    Ok(errors)
}

fn divisibility(
    node: &Node<'_>,
    keyword: NumberKeyword,
    value: &Number,
) -> Result<Vec<ValidationError>> {
    let name = keyword.as_str();
    let divisor = match node.schema.get(name) {
        Some(Value::Number(d)) if d.as_f64().is_some_and(|f| f > 0.0) => d,
        _ => return node.skip(name, "expected a positive number"),
    };
    if node.cx().backend().is_multiple_of(value, divisor) {
        return Ok(Vec::new());
    }
    Ok(vec![node.error(
        name,
        MessageKey::MultipleOf,
        &[number_text(divisor)],
    )])
}

#[derive(Clone, Copy)]
enum Bound {
    Minimum,
    Maximum,
}

impl Bound {
    fn keyword(self) -> &'static str {
        match self {
            Bound::Minimum => "minimum",
            Bound::Maximum => "maximum",
        }
    }

    fn exclusive_keyword(self) -> &'static str {
        match self {
            Bound::Minimum => "exclusiveMinimum",
            Bound::Maximum => "exclusiveMaximum",
        }
    }

    fn accepts(self, ordering: Ordering, exclusive: bool) -> bool {
        match (self, exclusive) {
            (Bound::Minimum, true) => ordering == Ordering::Greater,
            (Bound::Minimum, false) => ordering != Ordering::Less,
            (Bound::Maximum, true) => ordering == Ordering::Less,
            (Bound::Maximum, false) => ordering != Ordering::Greater,
        }
    }

    fn message(self, exclusive: bool) -> MessageKey {
        match (self, exclusive) {
            (Bound::Minimum, true) => MessageKey::MinimumExclusive,
            (Bound::Minimum, false) => MessageKey::MinimumInclusive,
            (Bound::Maximum, true) => MessageKey::MaximumExclusive,
            (Bound::Maximum, false) => MessageKey::MaximumInclusive,
        }
    }
}

fn bound(node: &Node<'_>, bound: Bound, value: &Number) -> Result<Vec<ValidationError>> {
    let Some(Value::Number(limit)) = node.schema.get(bound.keyword()) else {
        return node.skip(bound.keyword(), "expected a number");
    };
    let exclusive = node
        .schema
        .get(bound.exclusive_keyword())
        .is_some_and(truthy);

    let valid = node
        .cx()
        .backend()
        .compare(value, limit)
        .is_some_and(|ordering| bound.accepts(ordering, exclusive));
    if valid {
        return Ok(Vec::new());
    }
    Ok(vec![node.error(
        bound.keyword(),
        bound.message(exclusive),
        &[number_text(limit)],
    )])
}
