//! Heuristic value/schema affinity, independent of strict validity.

use std::cmp::Ordering;
use std::ops::AddAssign;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::report::ROOT_PATH;
use crate::walk::Walker;

/// Weight given to a top-level property; each nesting level divides it by 100.
pub const DEFAULT_FIT_WEIGHT: f64 = 10_000_000.0;

/// How well a value lines up with the properties a schema declares.
///
/// `matched` grows for every declared property the value has. `extra` grows
/// for every declared property the value lacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FitScore {
    #[serde(rename = "match")]
    pub matched: f64,
    pub extra: f64,
}

impl AddAssign for FitScore {
    fn add_assign(&mut self, rhs: Self) {
        self.matched += rhs.matched;
        self.extra += rhs.extra;
    }
}

impl FitScore {
    /// Higher `matched` first, then lower `extra`.
    pub fn affinity_cmp(&self, other: &Self) -> Ordering {
        other
            .matched
            .total_cmp(&self.matched)
            .then_with(|| self.extra.total_cmp(&other.extra))
    }
}

pub(crate) fn fit_test(
    walker: &Walker<'_>,
    value: &Value,
    schema: &Value,
    weight: f64,
    depth: usize,
) -> Result<FitScore> {
    let mut score = FitScore::default();
    let Value::Object(map) = value else {
        return Ok(score);
    };
    let schema = walker.expand(schema, ROOT_PATH, depth)?;
    let Some(Value::Object(properties)) = schema.get("properties") else {
        return Ok(score);
    };

    for (key, declared) in properties {
        let Some(child) = map.get(key) else {
            score.extra += weight;
            continue;
        };
        if child.is_object() {
            let declared = walker.expand(declared, ROOT_PATH, depth + 1)?;
            if declared.get("properties").is_some_and(Value::is_object) {
                score += fit_test(
                    walker,
                    child,
                    &Value::Object(declared),
                    weight / 100.0,
                    depth + 1,
                )?;
            }
        }
        score.matched += weight;
    }
    Ok(score)
}
