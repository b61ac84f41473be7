use std::sync::Arc;

use serde_json::{json, Value};

use schemaguard_core::{
    kind_name, Context, DecimalBackend, SchemaRegistry, ValidationError, Validator,
    ValidatorOptions,
};

fn errors_for(schema: Value, value: Value) -> Vec<ValidationError> {
    Validator::new(schema)
        .validate(&value)
        .expect("validation should not abort")
}

#[test]
fn empty_string_against_min_length_one_uses_not_empty_message() {
    let errors = errors_for(json!({"type": "string", "minLength": 1}), json!(""));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "root");
    assert_eq!(errors[0].property, "minLength");
    assert_eq!(errors[0].message, "Value required");
}

#[test]
fn exclusive_minimum_rejects_the_boundary_only() {
    let schema = json!({"type": "number", "minimum": 5, "exclusiveMinimum": true});

    let errors = errors_for(schema.clone(), json!(5));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].property, "minimum");
    assert_eq!(errors[0].message, "Value must be greater than 5");

    assert!(errors_for(schema, json!(5.0001)).is_empty());
}

#[test]
fn duplicate_items_report_uniqueness_once() {
    let schema = json!({"type": "array", "items": {"type": "number"}, "uniqueItems": true});
    let errors = errors_for(schema, json!([1, 2, 2]));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].property, "uniqueItems");
}

#[test]
fn additional_property_is_named() {
    let schema = json!({
        "type": "object",
        "properties": {"a": {"type": "string"}},
        "additionalProperties": false
    });
    let errors = errors_for(schema, json!({"a": "x", "b": 1}));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].property, "additionalProperties");
    assert_eq!(
        errors[0].message,
        "No additional properties allowed, but property b is set"
    );
}

#[test]
fn one_of_reports_summary_and_labelled_branch_errors() {
    let schema = json!({"oneOf": [{"type": "string"}, {"type": "number"}]});
    assert!(errors_for(schema.clone(), json!("x")).is_empty());

    let errors = errors_for(schema, json!(true));
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].path, "root");
    assert_eq!(errors[0].property, "oneOf");
    assert!(errors[0].message.contains("validates against 0 of the schemas"));
    assert_eq!(errors[1].path, "root.oneOf[0]");
    assert_eq!(errors[1].message, "Value must be of type string");
    assert_eq!(errors[2].path, "root.oneOf[1]");
    assert_eq!(errors[2].message, "Value must be of type number");
}

#[test]
fn multiple_of_hundredth_depends_on_numeric_backend() {
    let schema = json!({"type": "integer", "multipleOf": 0.01});
    let value = json!(1.14);
    let multiple_of = |errors: Vec<ValidationError>| {
        errors
            .into_iter()
            .filter(|e| e.property == "multipleOf")
            .count()
    };

    // 1.14 / 0.01 floors to 113 in binary floating point.
    let native = Context::new()
        .validate(&schema, Some(&value))
        .expect("native validation");
    assert_eq!(multiple_of(native), 1);

    let precise = Context::new()
        .with_backend(Arc::new(DecimalBackend))
        .validate(&schema, Some(&value))
        .expect("precise validation");
    assert_eq!(multiple_of(precise), 0);
}

#[test]
fn legacy_and_list_form_required_mix() {
    let schema = json!({
        "type": "object",
        "required": ["id"],
        "properties": {
            "id": {"type": "integer"},
            "nick": {"type": "string", "required": true},
            "note": {"type": "string"}
        }
    });
    let errors = errors_for(schema, json!({"note": 3}));
    let found: Vec<_> = errors
        .iter()
        .map(|e| (e.path.as_str(), e.property.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("root", "required"),
            ("root.nick", "required"),
            ("root.note", "type"),
        ]
    );
}

#[test]
fn required_by_default_reports_missing_properties() {
    let cx = Context::new().with_options(ValidatorOptions {
        required_by_default: true,
        ..ValidatorOptions::default()
    });
    let schema = json!({"properties": {
        "a": {"type": "string"},
        "b": {"type": "string", "required": false}
    }});
    let errors = cx
        .validate(&schema, Some(&json!({})))
        .expect("validation should not abort");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "root.a");
    assert_eq!(errors[0].message, "Property must be set");
}

#[test]
fn registry_resolves_refs_between_documents() {
    let registry = SchemaRegistry::from_embedded(&[
        (
            "order",
            r#"{"type": "object", "properties": {
                "lines": {"type": "array", "items": {"$ref": "line"}, "minItems": 1}
            }}"#,
        ),
        (
            "line",
            r#"{"type": "object", "required": ["sku"], "properties": {
                "sku": {"type": "string", "pattern": "^[A-Z]{3}-[0-9]+$"},
                "qty": {"type": "integer", "minimum": 1}
            }}"#,
        ),
    ])
    .expect("embedded schemas should parse");
    let validator = Arc::new(registry)
        .validator("order")
        .expect("order schema should be registered");

    let errors = validator
        .validate(&json!({"lines": [{"sku": "ABC-1", "qty": 2}, {"sku": "abc", "qty": 0}, {}]}))
        .expect("validation should not abort");
    let found: Vec<_> = errors
        .iter()
        .map(|e| (e.path.as_str(), e.property.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("root.lines.1.sku", "pattern"),
            ("root.lines.1.qty", "minimum"),
            ("root.lines.2", "required"),
        ]
    );
}

#[test]
fn error_report_serializes_with_errorcount() {
    let errors = errors_for(
        json!({"allOf": [{"minimum": 10}, {"minimum": 10}]}),
        json!(3),
    );
    let report = serde_json::to_value(&errors).expect("report should serialize");
    assert_eq!(
        report,
        json!([{
            "path": "root",
            "property": "minimum",
            "message": "Value must be at least 10",
            "errorcount": 2
        }])
    );
}

#[test]
fn kind_name_agrees_with_type_messages() {
    let errors = errors_for(json!({"type": "integer"}), json!(2.5));
    assert_eq!(errors[0].message, "Value must be of type integer");
    assert_eq!(kind_name(&json!(2.5)), "number");
    assert_eq!(kind_name(&json!(2.0)), "integer");
    assert_eq!(kind_name(&json!("2")), "string");
}
