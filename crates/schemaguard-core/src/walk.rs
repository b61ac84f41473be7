//! Recursive tree walk over one schema/value pair.

use serde_json::{Map, Value};

use crate::canonical::display_text;
use crate::dedup::dedup_errors;
use crate::error::{Result, SchemaError};
use crate::keyword::{has_date_format, AgnosticKeyword};
use crate::report::{ValidationError, ROOT_PATH};
use crate::resolver::resolve_uri;
use crate::translate::MessageKey;
use crate::validator::Context;
use crate::{array, combinator, custom, format, number, object, string};

/// One `validate` call: the context plus the root schema local `$ref`s point into.
pub(crate) struct Walker<'a> {
    pub(crate) cx: &'a Context,
    root: &'a Value,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(cx: &'a Context, root: &'a Value) -> Self {
        Self { cx, root }
    }

    /// Validate `value` against the root schema and collapse duplicate findings.
    pub(crate) fn run(&self, value: Option<&Value>) -> Result<Vec<ValidationError>> {
        let errors = self.validate(self.root, value, ROOT_PATH, 0)?;
        Ok(dedup_errors(errors))
    }

    /// Raw, undeduplicated findings for `value` at `path`.
    pub(crate) fn validate(
        &self,
        schema: &Value,
        value: Option<&Value>,
        path: &str,
        depth: usize,
    ) -> Result<Vec<ValidationError>> {
        self.check_depth(path, depth)?;
        let schema = self.expand(schema, path, depth)?;
        let node = Node {
            walker: self,
            schema: &schema,
            path,
            depth,
        };
        tracing::trace!(path, depth, "validating node");

        let Some(value) = value else {
            return Ok(node.legacy_required());
        };

        let mut errors = Vec::new();
        for keyword in AgnosticKeyword::present(&schema) {
            errors.extend(combinator::evaluate(&node, keyword, value)?);
        }

        errors.extend(match value {
            Value::Null | Value::Bool(_) => Vec::new(),
            Value::Number(n) => number::evaluate(&node, n)?,
            Value::String(s) => string::evaluate(&node, s)?,
            Value::Array(items) => array::evaluate(&node, items)?,
            Value::Object(map) => object::evaluate(&node, value, map)?,
        });

        errors.extend(self.described_by(&node, value)?);

        if has_date_format(&schema) {
            errors.extend(format::evaluate(&node, value)?);
        }

        errors.extend(custom::run_all(&node, value));
        Ok(errors)
    }

    /// Copy `schema` into a fresh map with its `$ref` chain merged in.
    ///
    /// Referenced keywords form the base; keywords next to `$ref` override them.
    pub(crate) fn expand(
        &self,
        schema: &Value,
        path: &str,
        depth: usize,
    ) -> Result<Map<String, Value>> {
        let mut current = match schema {
            Value::Object(map) => map.clone(),
            Value::Bool(true) => Map::new(),
            other => {
                self.malformed(path, "schema", &format!("expected an object, got {other}"))?;
                return Ok(Map::new());
            }
        };

        let mut hops = 0usize;
        while let Some(reference) = current.remove("$ref") {
            hops += 1;
            self.check_depth(path, depth + hops)?;

            let Value::String(reference) = reference else {
                self.malformed(path, "$ref", "expected a string")?;
                continue;
            };
            match self.lookup_ref(&reference) {
                Some(Value::Object(mut target)) => {
                    for (key, value) in current {
                        target.insert(key, value);
                    }
                    current = target;
                }
                Some(Value::Bool(true)) => {}
                _ => {
                    if self.cx.options().strict {
                        return Err(SchemaError::UnresolvedRef(reference));
                    }
                    tracing::debug!(path, reference = %reference, "skipping unresolved $ref");
                }
            }
        }
        Ok(current)
    }

    fn lookup_ref(&self, reference: &str) -> Option<Value> {
        match reference.strip_prefix('#') {
            Some(pointer) => self.root.pointer(pointer).cloned(),
            None => resolve_uri(self.cx.resolver(), reference),
        }
    }

    /// Re-validate against the schema a `describedby` link expands to.
    fn described_by(&self, node: &Node<'_>, value: &Value) -> Result<Vec<ValidationError>> {
        let Some(Value::Array(links)) = node.schema.get("links") else {
            return Ok(Vec::new());
        };
        let Some((index, link)) = links.iter().enumerate().find_map(|(i, link)| match link {
            Value::Object(link) if is_described_by(link) => Some((i, link)),
            _ => None,
        }) else {
            return Ok(Vec::new());
        };

        let Some(fragment) = self.cx.resolver().resolve_link(link) else {
            tracing::debug!(path = node.path, "describedby link did not resolve");
            return Ok(Vec::new());
        };

        let mut remaining = links.clone();
        remaining.remove(index);
        let mut merged = node.schema.clone();
        merged.insert("links".to_string(), Value::Array(remaining));
        if let Value::Object(fragment) = fragment {
            for (key, value) in fragment {
                merged.insert(key, value);
            }
        }
        self.validate(&Value::Object(merged), Some(value), node.path, node.depth + 1)
    }

    fn check_depth(&self, path: &str, depth: usize) -> Result<()> {
        let limit = self.cx.options().max_depth;
        if depth > limit {
            return Err(SchemaError::DepthExceeded {
                path: path.to_string(),
                limit,
            });
        }
        Ok(())
    }

    /// Skip a malformed constraint, or fail in strict mode.
    pub(crate) fn malformed(&self, path: &str, keyword: &str, reason: &str) -> Result<()> {
        if self.cx.options().strict {
            return Err(SchemaError::Malformed {
                path: path.to_string(),
                keyword: keyword.to_string(),
                reason: reason.to_string(),
            });
        }
        tracing::debug!(path, keyword, reason, "skipping malformed constraint");
        Ok(())
    }
}

fn is_described_by(link: &Map<String, Value>) -> bool {
    matches!(link.get("rel"), Some(Value::String(rel)) if rel.eq_ignore_ascii_case("describedby"))
}

/// An expanded schema node being applied at one path.
pub(crate) struct Node<'n> {
    pub(crate) walker: &'n Walker<'n>,
    pub(crate) schema: &'n Map<String, Value>,
    pub(crate) path: &'n str,
    pub(crate) depth: usize,
}

impl Node<'_> {
    pub(crate) fn cx(&self) -> &Context {
        self.walker.cx
    }

    /// Validate a child value one level down.
    pub(crate) fn descend(
        &self,
        schema: &Value,
        value: Option<&Value>,
        path: &str,
    ) -> Result<Vec<ValidationError>> {
        self.walker.validate(schema, value, path, self.depth + 1)
    }

    /// Whether `value` passes `schema` at this node's path.
    pub(crate) fn passes(&self, schema: &Value, value: &Value) -> Result<bool> {
        Ok(self.descend(schema, Some(value), self.path)?.is_empty())
    }

    pub(crate) fn error(
        &self,
        property: &str,
        key: MessageKey,
        args: &[String],
    ) -> ValidationError {
        ValidationError::new(self.path, property, self.translate(key, args))
    }

    pub(crate) fn translate(&self, key: MessageKey, args: &[String]) -> String {
        self.cx().translator().translate(key, args)
    }

    /// Ignore a malformed keyword argument, producing no findings.
    pub(crate) fn skip(&self, keyword: &str, reason: &str) -> Result<Vec<ValidationError>> {
        self.walker.malformed(self.path, keyword, reason)?;
        Ok(Vec::new())
    }

    /// Text of a keyword argument for use in a message.
    pub(crate) fn arg_text(&self, keyword: &str) -> String {
        self.schema.get(keyword).map(display_text).unwrap_or_default()
    }

    /// Legacy boolean `required` applied to an absent value.
    fn legacy_required(&self) -> Vec<ValidationError> {
        let required = match self.schema.get("required") {
            Some(Value::Bool(flag)) => *flag,
            Some(_) => false,
            None => self.cx().options().required_by_default,
        };
        if required {
            vec![self.error("required", MessageKey::NotSet, &[])]
        } else {
            Vec::new()
        }
    }
}

/// Loose truthiness of a schema flag: `null`, `false`, `0` and `""` are false.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ValidatorOptions;

    fn strict() -> Context {
        Context::new().with_options(ValidatorOptions {
            strict: true,
            ..ValidatorOptions::default()
        })
    }

    #[test]
    fn expand_merges_local_ref_with_sibling_override() {
        let root = json!({
            "definitions": {"base": {"type": "string", "minLength": 2}},
            "$ref": "#/definitions/base",
            "minLength": 5
        });
        let cx = Context::new();
        let walker = Walker::new(&cx, &root);
        let expanded = walker.expand(&root, "root", 0).unwrap();
        assert_eq!(expanded.get("type"), Some(&json!("string")));
        assert_eq!(expanded.get("minLength"), Some(&json!(5)));
        assert!(!expanded.contains_key("$ref"));
    }

    #[test]
    fn expand_does_not_touch_caller_schema() {
        let root = json!({"definitions": {"a": {"type": "null"}}, "$ref": "#/definitions/a"});
        let before = root.clone();
        let cx = Context::new();
        Walker::new(&cx, &root).run(Some(&json!(null))).unwrap();
        assert_eq!(root, before);
    }

    #[test]
    fn cyclic_ref_hits_depth_limit() {
        let root = json!({"definitions": {"a": {"$ref": "#/definitions/a"}}, "$ref": "#/definitions/a"});
        let cx = Context::new();
        let result = Walker::new(&cx, &root).run(Some(&json!(1)));
        assert!(matches!(result, Err(SchemaError::DepthExceeded { .. })));
    }

    #[test]
    fn cyclic_all_of_hits_depth_limit() {
        let root = json!({"allOf": [{"$ref": "#"}]});
        let cx = Context::new();
        let result = Walker::new(&cx, &root).run(Some(&json!(1)));
        assert!(matches!(result, Err(SchemaError::DepthExceeded { .. })));
    }

    #[test]
    fn unresolved_ref_is_skipped_unless_strict() {
        let root = json!({"$ref": "missing.json", "type": "string"});
        let cx = Context::new();
        let errors = Walker::new(&cx, &root).run(Some(&json!(1))).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property, "type");

        let cx = strict();
        let result = Walker::new(&cx, &root).run(Some(&json!(1)));
        assert!(matches!(result, Err(SchemaError::UnresolvedRef(r)) if r == "missing.json"));
    }

    #[test]
    fn non_object_schema_is_malformed_in_strict_mode() {
        let root = json!({"items": 5});
        let cx = Context::new();
        assert!(Walker::new(&cx, &root).run(Some(&json!([1]))).unwrap().is_empty());

        let cx = strict();
        let result = Walker::new(&cx, &root).run(Some(&json!([1])));
        assert!(matches!(result, Err(SchemaError::Malformed { keyword, .. }) if keyword == "schema"));
    }

    #[test]
    fn truthiness_matches_legacy_rules() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!({})));
        assert!(truthy(&json!(0.5)));
    }
}
