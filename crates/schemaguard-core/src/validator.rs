use std::sync::Arc;

use serde_json::Value;

use crate::config::ValidatorOptions;
use crate::custom::{CustomValidator, ValidatorDefaults};
use crate::error::Result;
use crate::fit::{self, FitScore, DEFAULT_FIT_WEIGHT};
use crate::numeric::{NativeBackend, NumericBackend};
use crate::report::ValidationError;
use crate::resolver::{EditorLookup, NoResolver, RichFormatValidator, SchemaResolver};
use crate::translate::{EnglishCatalog, Translator};
use crate::walk::Walker;

/// Options and collaborators for validation calls.
///
/// A context holds no per-call state, so one context can serve any number of
/// schemas and threads.
#[derive(Clone)]
pub struct Context {
    options: ValidatorOptions,
    backend: Arc<dyn NumericBackend>,
    resolver: Arc<dyn SchemaResolver>,
    translator: Arc<dyn Translator>,
    editor_lookup: Option<Arc<dyn EditorLookup>>,
    format_validator: Option<Arc<dyn RichFormatValidator>>,
    defaults: Arc<ValidatorDefaults>,
    custom_validators: Vec<Arc<dyn CustomValidator>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Default options, native arithmetic, English messages and no external documents.
    pub fn new() -> Self {
        Self {
            options: ValidatorOptions::default(),
            backend: Arc::new(NativeBackend),
            resolver: Arc::new(NoResolver),
            translator: Arc::new(EnglishCatalog),
            editor_lookup: None,
            format_validator: None,
            defaults: Arc::new(ValidatorDefaults::default()),
            custom_validators: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Arithmetic used for range and divisibility checks.
    pub fn with_backend(mut self, backend: Arc<dyn NumericBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn SchemaResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_editor_lookup(mut self, lookup: Arc<dyn EditorLookup>) -> Self {
        self.editor_lookup = Some(lookup);
        self
    }

    pub fn with_format_validator(mut self, validator: Arc<dyn RichFormatValidator>) -> Self {
        self.format_validator = Some(validator);
        self
    }

    /// Shared validators that run before this context's own.
    pub fn with_defaults(mut self, defaults: Arc<ValidatorDefaults>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_custom_validator(mut self, validator: Arc<dyn CustomValidator>) -> Self {
        self.custom_validators.push(validator);
        self
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn backend(&self) -> &dyn NumericBackend {
        self.backend.as_ref()
    }

    pub fn resolver(&self) -> &dyn SchemaResolver {
        self.resolver.as_ref()
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    pub fn editor_lookup(&self) -> Option<&dyn EditorLookup> {
        self.editor_lookup.as_deref()
    }

    pub fn format_validator(&self) -> Option<&dyn RichFormatValidator> {
        self.format_validator.as_deref()
    }

    pub fn defaults(&self) -> &ValidatorDefaults {
        &self.defaults
    }

    pub fn custom_validators(&self) -> &[Arc<dyn CustomValidator>] {
        &self.custom_validators
    }

    /// Validate `value` against `schema`. `None` stands for an absent value.
    ///
    /// Returns every finding in traversal order with duplicates collapsed;
    /// an empty list means the value is valid.
    pub fn validate(&self, schema: &Value, value: Option<&Value>) -> Result<Vec<ValidationError>> {
        validate(schema, value, self)
    }

    /// Score how well `value` lines up with the properties `schema` declares.
    pub fn fit_test(&self, schema: &Value, value: &Value, weight: f64) -> Result<FitScore> {
        fit::fit_test(&Walker::new(self, schema), value, schema, weight, 0)
    }

    /// Candidate indices ordered from best to worst fit; ties keep input order.
    pub fn rank_candidates(&self, value: &Value, candidates: &[Value]) -> Result<Vec<usize>> {
        let mut scored = Vec::with_capacity(candidates.len());
        for (index, schema) in candidates.iter().enumerate() {
            scored.push((index, self.fit_test(schema, value, DEFAULT_FIT_WEIGHT)?));
        }
        scored.sort_by(|(_, a), (_, b)| a.affinity_cmp(b));
        Ok(scored.into_iter().map(|(index, _)| index).collect())
    }
}

/// Validate `value` against `schema` with the options and collaborators in `cx`.
pub fn validate(
    schema: &Value,
    value: Option<&Value>,
    cx: &Context,
) -> Result<Vec<ValidationError>> {
    Walker::new(cx, schema).run(value)
}

/// A schema bound to a context.
#[derive(Clone)]
pub struct Validator {
    schema: Value,
    context: Context,
}

impl Validator {
    /// Validator for `schema` with a default context.
    pub fn new(schema: Value) -> Self {
        Self::with_context(schema, Context::new())
    }

    pub fn with_context(schema: Value, context: Context) -> Self {
        Self { schema, context }
    }

    /// Parse `schema_json` and bind it to `context`.
    pub fn from_json(schema_json: &str, context: Context) -> Result<Self> {
        let schema: Value = serde_json::from_str(schema_json)?;
        Ok(Self::with_context(schema, context))
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn validate(&self, value: &Value) -> Result<Vec<ValidationError>> {
        self.context.validate(&self.schema, Some(value))
    }

    /// Validate a possibly absent value.
    pub fn validate_optional(&self, value: Option<&Value>) -> Result<Vec<ValidationError>> {
        self.context.validate(&self.schema, value)
    }

    pub fn is_valid(&self, value: &Value) -> Result<bool> {
        Ok(self.validate(value)?.is_empty())
    }

    /// Fit score of `value` against this validator's schema at the default weight.
    pub fn fit_test(&self, value: &Value) -> Result<FitScore> {
        self.context
            .fit_test(&self.schema, value, DEFAULT_FIT_WEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::numeric::DecimalBackend;
    use crate::resolver::SchemaResolver;

    #[test]
    fn undefined_value_short_circuits_everything() {
        let schema = json!({"required": true, "type": "string", "minLength": 3});
        let errors = Validator::new(schema).validate_optional(None).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property, "required");
        assert_eq!(errors[0].message, "Property must be set");
    }

    #[test]
    fn required_by_default_applies_only_when_required_absent() {
        let cx = Context::new().with_options(ValidatorOptions {
            required_by_default: true,
            ..ValidatorOptions::default()
        });
        assert_eq!(cx.validate(&json!({}), None).unwrap().len(), 1);
        assert!(cx.validate(&json!({"required": false}), None).unwrap().is_empty());
        assert!(Context::new().validate(&json!({}), None).unwrap().is_empty());
    }

    #[test]
    fn null_skips_type_specific_keywords() {
        let schema = json!({"minLength": 2, "minimum": 3, "minItems": 1, "required": ["a"]});
        assert!(Validator::new(schema).validate(&json!(null)).unwrap().is_empty());
    }

    #[test]
    fn dedup_runs_once_at_the_top() {
        let schema = json!({"allOf": [{"type": "string"}, {"type": "string"}, {"type": "string"}]});
        let errors = Validator::new(schema).validate(&json!(1)).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].errorcount, 3);
    }

    #[test]
    fn one_of_counts_use_raw_branch_results() {
        let schema = json!({"oneOf": [
            {"allOf": [{"type": "string"}, {"type": "string"}]},
            {"type": "number"}
        ]});
        let errors = Validator::new(schema).validate(&json!(true)).unwrap();
        assert_eq!(errors[0].property, "oneOf");
        assert_eq!(errors[1].path, "root.oneOf[0]");
        assert_eq!(errors[1].errorcount, 2);
        assert_eq!(errors[2].path, "root.oneOf[1]");
    }

    struct Catalog;

    impl SchemaResolver for Catalog {
        fn resolve_ref(&self, uri: &str) -> Option<Value> {
            match uri {
                "address" => Some(json!({"required": ["city"], "properties": {"city": {"type": "string"}}})),
                "strict-name" => Some(json!({"properties": {"name": {"minLength": 3}}})),
                _ => None,
            }
        }
    }

    #[test]
    fn external_refs_go_through_resolver() {
        let cx = Context::new().with_resolver(Arc::new(Catalog));
        let schema = json!({"properties": {"home": {"$ref": "address"}}});
        let errors = cx.validate(&schema, Some(&json!({"home": {"city": 5}}))).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "root.home.city");
    }

    #[test]
    fn described_by_link_appends_linked_errors() {
        let cx = Context::new().with_resolver(Arc::new(Catalog));
        let schema = json!({
            "type": "object",
            "links": [{"rel": "DescribedBy", "href": "strict-name"}]
        });
        let errors = cx.validate(&schema, Some(&json!({"name": "ab"}))).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "root.name");
        assert_eq!(errors[0].property, "minLength");
    }

    #[test]
    fn described_by_without_resolution_is_ignored() {
        let schema = json!({"links": [{"rel": "describedby", "href": "nowhere"}]});
        assert!(Validator::new(schema).validate(&json!(1)).unwrap().is_empty());
    }

    #[test]
    fn precision_backend_is_used_for_bounds() {
        let schema = json!({"maximum": 0.3});
        let value = json!(0.30000000000000004);
        assert_eq!(Validator::new(schema.clone()).validate(&value).unwrap().len(), 1);
        let precise = Context::new().with_backend(Arc::new(DecimalBackend));
        assert_eq!(precise.validate(&schema, Some(&value)).unwrap().len(), 1);
        assert!(precise.validate(&schema, Some(&json!(0.3))).unwrap().is_empty());
    }

    #[test]
    fn rank_candidates_orders_by_affinity() {
        let candidates = vec![
            json!({"properties": {"x": {}}}),
            json!({"properties": {"a": {}, "b": {}}}),
            json!({"properties": {"a": {}, "b": {}, "c": {}}}),
        ];
        let ranked = Context::new()
            .rank_candidates(&json!({"a": 1, "b": 2}), &candidates)
            .unwrap();
        assert_eq!(ranked, vec![1, 2, 0]);
    }

    #[test]
    fn from_json_rejects_invalid_text() {
        assert!(matches!(
            Validator::from_json("{nope", Context::new()),
            Err(crate::SchemaError::InvalidJson(_))
        ));
    }
}
