//! Object keywords: cardinality, list-form `required`, `properties`,
//! `patternProperties`, `additionalProperties` and `dependencies`.

use std::collections::HashSet;

use regex::Regex;
use serde_json::{Map, Value};

use crate::canonical::number_text;
use crate::error::Result;
use crate::keyword::ObjectKeyword;
use crate::report::{child_path, ValidationError};
use crate::translate::MessageKey;
use crate::walk::Node;

/// Keys of one object value already covered by `properties` or `patternProperties`.
///
/// Lives for a single object evaluation and is never shared with children.
#[derive(Debug, Default)]
struct Validated<'v> {
    keys: HashSet<&'v str>,
}

impl<'v> Validated<'v> {
    fn mark(&mut self, key: &'v str) {
        self.keys.insert(key);
    }

    fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

pub(crate) fn evaluate(
    node: &Node<'_>,
    value: &Value,
    map: &Map<String, Value>,
) -> Result<Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut validated = Validated::default();

    for keyword in ObjectKeyword::ORDER.iter().copied() {
        match keyword {
            ObjectKeyword::MaxProperties | ObjectKeyword::MinProperties => {
                errors.extend(cardinality(node, keyword, map.len())?)
            }
            ObjectKeyword::Required => errors.extend(required(node, map)?),
            ObjectKeyword::Properties => errors.extend(properties(node, map, &mut validated)?),
            ObjectKeyword::PatternProperties => {
                errors.extend(pattern_properties(node, map, &mut validated)?)
            }
            ObjectKeyword::AdditionalProperties => {
                errors.extend(additional_properties(node, map, &validated)?)
            }
            ObjectKeyword::Dependencies => errors.extend(dependencies(node, value, map)?),
        }
    }
    Ok(errors)
}

fn cardinality(
    node: &Node<'_>,
    keyword: ObjectKeyword,
    len: usize,
) -> Result<Vec<ValidationError>> {
    let name = keyword.as_str();
    let limit = match node.schema.get(name) {
        None => return Ok(Vec::new()),
        Some(Value::Number(limit)) => limit,
        Some(_) => return node.skip(name, "expected a number"),
    };
    let bound = limit.as_f64().unwrap_or(f64::NAN);
    let (violated, key) = match keyword {
        ObjectKeyword::MaxProperties => (len as f64 > bound, MessageKey::MaxProperties),
        _ => ((len as f64) < bound, MessageKey::MinProperties),
    };
    if violated {
        return Ok(vec![node.error(name, key, &[number_text(limit)])]);
    }
    Ok(Vec::new())
}

fn required(node: &Node<'_>, map: &Map<String, Value>) -> Result<Vec<ValidationError>> {
    let names = match node.schema.get("required") {
        None | Some(Value::Bool(_)) => return Ok(Vec::new()),
        Some(Value::Array(names)) => names,
        Some(_) => return node.skip("required", "expected an array or a boolean"),
    };

    let mut errors = Vec::new();
    for name in names {
        let Value::String(name) = name else {
            node.skip("required", "expected property names")?;
            continue;
        };
        if map.contains_key(name) || is_non_data_control(node, name) {
            continue;
        }
        errors.push(node.error("required", MessageKey::Required, &[name.clone()]));
    }
    Ok(errors)
}

fn is_non_data_control(node: &Node<'_>, name: &str) -> bool {
    node.cx()
        .editor_lookup()
        .and_then(|lookup| lookup.lookup_editor(&child_path(node.path, name)))
        .is_some_and(|editor| editor.is_non_data_control())
}

fn properties<'v>(
    node: &Node<'_>,
    map: &'v Map<String, Value>,
    validated: &mut Validated<'v>,
) -> Result<Vec<ValidationError>> {
    let declared = match node.schema.get("properties") {
        None => return Ok(Vec::new()),
        Some(Value::Object(declared)) => declared,
        Some(_) => return node.skip("properties", "expected an object"),
    };

    let mut errors = Vec::new();
    for (key, schema) in declared {
        if let Some((own_key, _)) = map.get_key_value(key) {
            validated.mark(own_key);
        }
        // Absent keys still recurse so legacy `required: true` can fire.
        errors.extend(node.descend(schema, map.get(key), &child_path(node.path, key))?);
    }
    Ok(errors)
}

fn pattern_properties<'v>(
    node: &Node<'_>,
    map: &'v Map<String, Value>,
    validated: &mut Validated<'v>,
) -> Result<Vec<ValidationError>> {
    let patterns = match node.schema.get("patternProperties") {
        None => return Ok(Vec::new()),
        Some(Value::Object(patterns)) => patterns,
        Some(_) => return node.skip("patternProperties", "expected an object"),
    };

    let mut errors = Vec::new();
    for (source, schema) in patterns {
        let regex = match Regex::new(source) {
            Ok(regex) => regex,
            Err(err) => {
                node.skip("patternProperties", &err.to_string())?;
                continue;
            }
        };
        for (key, child) in map {
            if regex.is_match(key) {
                validated.mark(key);
                errors.extend(node.descend(schema, Some(child), &child_path(node.path, key))?);
            }
        }
    }
    Ok(errors)
}

#[derive(Clone, Copy)]
enum AdditionalPolicy<'s> {
    Allow,
    Deny,
    Schema(&'s Value),
}

fn additional_policy<'s>(node: &Node<'s>) -> Result<Option<AdditionalPolicy<'s>>> {
    let policy = match node.schema.get("additionalProperties") {
        // The global switch does not reach schemas built from alternatives.
        None if node.cx().options().no_additional_properties
            && !node.schema.contains_key("oneOf")
            && !node.schema.contains_key("anyOf") =>
        {
            Some(AdditionalPolicy::Deny)
        }
        None => None,
        Some(Value::Bool(true)) => Some(AdditionalPolicy::Allow),
        Some(Value::Bool(false) | Value::Null) => Some(AdditionalPolicy::Deny),
        Some(schema @ Value::Object(_)) => Some(AdditionalPolicy::Schema(schema)),
        Some(_) => {
            node.skip("additionalProperties", "expected a boolean or a schema")?;
            None
        }
    };
    Ok(policy)
}

fn additional_properties(
    node: &Node<'_>,
    map: &Map<String, Value>,
    validated: &Validated<'_>,
) -> Result<Vec<ValidationError>> {
    let Some(policy) = additional_policy(node)? else {
        return Ok(Vec::new());
    };

    let mut errors = Vec::new();
    for (key, child) in map.iter().filter(|(key, _)| !validated.contains(key)) {
        match policy {
            AdditionalPolicy::Allow => break,
            AdditionalPolicy::Deny => {
                errors.push(node.error(
                    "additionalProperties",
                    MessageKey::AdditionalProperties,
                    &[key.clone()],
                ));
                break;
            }
            AdditionalPolicy::Schema(schema) => {
                errors.extend(node.descend(schema, Some(child), &child_path(node.path, key))?);
            }
        }
    }
    Ok(errors)
}

fn dependencies(
    node: &Node<'_>,
    value: &Value,
    map: &Map<String, Value>,
) -> Result<Vec<ValidationError>> {
    let rules = match node.schema.get("dependencies") {
        None => return Ok(Vec::new()),
        Some(Value::Object(rules)) => rules,
        Some(_) => return node.skip("dependencies", "expected an object"),
    };

    let mut errors = Vec::new();
    for (trigger, rule) in rules.iter().filter(|(trigger, _)| map.contains_key(*trigger)) {
        match rule {
            Value::Array(names) => {
                for name in names.iter().filter_map(Value::as_str) {
                    if !map.contains_key(name) {
                        errors.push(missing_dependency(node, name));
                    }
                }
            }
            Value::String(name) => {
                if !map.contains_key(name) {
                    errors.push(missing_dependency(node, name));
                }
            }
            Value::Object(_) => errors.extend(node.descend(rule, Some(value), node.path)?),
            _ => {
                node.skip(
                    "dependencies",
                    &format!("rule for `{trigger}` must be a list or a schema"),
                )?;
            }
        }
    }
    Ok(errors)
}

fn missing_dependency(node: &Node<'_>, name: &str) -> ValidationError {
    node.error("dependencies", MessageKey::Dependency, &[name.to_string()])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::config::ValidatorOptions;
    use crate::resolver::{EditorInfo, EditorLookup};
    use crate::validator::Context;

    fn check(schema: serde_json::Value, value: serde_json::Value) -> Vec<crate::ValidationError> {
        Context::new().validate(&schema, Some(&value)).unwrap()
    }

    fn no_additional() -> Context {
        Context::new().with_options(ValidatorOptions {
            no_additional_properties: true,
            ..ValidatorOptions::default()
        })
    }

    #[test]
    fn additional_properties_false_names_first_extra_key() {
        let schema = json!({
            "type": "object",
            "properties": {"a": {"type": "string"}},
            "additionalProperties": false
        });
        let errors = check(schema, json!({"a": "x", "b": 1, "c": 2}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property, "additionalProperties");
        assert_eq!(
            errors[0].message,
            "No additional properties allowed, but property b is set"
        );
    }

    #[test]
    fn additional_properties_schema_checks_each_unmarked_key() {
        let schema = json!({
            "properties": {"a": {}},
            "patternProperties": {"^x_": {"type": "number"}},
            "additionalProperties": {"type": "string"}
        });
        let errors = check(schema, json!({"a": 1, "x_1": 2, "b": "ok", "c": 3, "d": false}));
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["root.c", "root.d"]);
    }

    #[test]
    fn pattern_properties_validate_matching_keys() {
        let schema = json!({"patternProperties": {"^n": {"type": "number"}}});
        let errors = check(schema, json!({"n1": 1, "n2": "x", "other": "y"}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "root.n2");
    }

    #[test]
    fn global_no_additional_properties_skips_alternatives() {
        let schema = json!({"properties": {"a": {}}});
        let errors = no_additional()
            .validate(&schema, Some(&json!({"a": 1, "b": 2})))
            .unwrap();
        assert_eq!(errors[0].property, "additionalProperties");

        let with_one_of = json!({"properties": {"a": {}}, "oneOf": [{}]});
        assert!(no_additional()
            .validate(&with_one_of, Some(&json!({"a": 1, "b": 2})))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn list_required_reports_each_missing_key() {
        let schema = json!({"required": ["a", "b", "c"]});
        let errors = check(schema, json!({"b": 1}));
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Object is missing the required property 'a'",
                "Object is missing the required property 'c'"
            ]
        );
        assert!(errors.iter().all(|e| e.path == "root"));
    }

    struct Buttons;

    impl EditorLookup for Buttons {
        fn lookup_editor(&self, path: &str) -> Option<EditorInfo> {
            (path == "root.submit").then(|| EditorInfo {
                type_name: Some("button".into()),
                format: None,
            })
        }
    }

    #[test]
    fn required_skips_non_data_controls() {
        let cx = Context::new().with_editor_lookup(Arc::new(Buttons));
        let schema = json!({"required": ["submit", "name"]});
        let errors = cx.validate(&schema, Some(&json!({}))).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("'name'"));
    }

    #[test]
    fn legacy_required_fires_through_properties() {
        let schema = json!({"properties": {"a": {"required": true}, "b": {"required": false}}});
        let errors = check(schema, json!({}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "root.a");
        assert_eq!(errors[0].message, "Property must be set");
    }

    #[test]
    fn dependencies_list_string_and_schema_forms() {
        let schema = json!({"dependencies": {
            "card": ["billing", "cvv"],
            "nick": "name",
            "tag": {"required": ["label"]}
        }});
        let errors = check(schema.clone(), json!({"card": 1, "cvv": 2, "nick": "n", "tag": 1}));
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Must have property billing",
                "Must have property name",
                "Object is missing the required property 'label'"
            ]
        );
        assert!(check(schema, json!({"other": 1})).is_empty());
    }

    #[test]
    fn property_count_bounds() {
        let errors = check(json!({"maxProperties": 1}), json!({"a": 1, "b": 2}));
        assert_eq!(errors[0].message, "Object must have at most 1 properties");
        let errors = check(json!({"minProperties": 2}), json!({"a": 1}));
        assert_eq!(errors[0].message, "Object must have at least 2 properties");
    }
}
