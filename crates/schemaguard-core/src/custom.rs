//! Pluggable validators run after the built-in keywords.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::report::ValidationError;
use crate::translate::{MessageKey, Translator};
use crate::walk::Node;

/// Extra check applied to every defined value.
///
/// Findings are appended after the built-in keyword findings for the same node.
pub trait CustomValidator: Send + Sync {
    fn validate(
        &self,
        schema: &Map<String, Value>,
        value: &Value,
        path: &str,
        translator: &dyn Translator,
    ) -> Vec<ValidationError>;
}

/// Adapter turning a closure into a [`CustomValidator`].
pub struct FnValidator<F>(F);

/// Wrap `f` as a custom validator.
pub fn from_fn<F>(f: F) -> FnValidator<F>
where
    F: Fn(&Map<String, Value>, &Value, &str) -> Vec<ValidationError> + Send + Sync,
{
    FnValidator(f)
}

impl<F> CustomValidator for FnValidator<F>
where
    F: Fn(&Map<String, Value>, &Value, &str) -> Vec<ValidationError> + Send + Sync,
{
    fn validate(
        &self,
        schema: &Map<String, Value>,
        value: &Value,
        path: &str,
        _translator: &dyn Translator,
    ) -> Vec<ValidationError> {
        (self.0)(schema, value, path)
    }
}

/// Built-in `ipv4`, `ipv6` and `hostname` formats for string values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkAddressValidator;

impl CustomValidator for NetworkAddressValidator {
    fn validate(
        &self,
        schema: &Map<String, Value>,
        value: &Value,
        path: &str,
        translator: &dyn Translator,
    ) -> Vec<ValidationError> {
        let (Some(format), Value::String(text)) = (schema.get("format").and_then(Value::as_str), value)
        else {
            return Vec::new();
        };
        let failed = match format {
            "ipv4" => text.parse::<Ipv4Addr>().is_err().then_some(MessageKey::Ipv4),
            "ipv6" => text.parse::<Ipv6Addr>().is_err().then_some(MessageKey::Ipv6),
            "hostname" => (!is_hostname(text)).then_some(MessageKey::Hostname),
            _ => None,
        };
        failed
            .map(|key| ValidationError::new(path, "format", translator.translate(key, &[])))
            .into_iter()
            .collect()
    }
}

/// RFC 1123 host name: dot-separated labels of letters, digits and inner hyphens.
fn is_hostname(text: &str) -> bool {
    let text = text.strip_suffix('.').unwrap_or(text);
    if text.is_empty() || text.len() > 255 {
        return false;
    }
    text.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

/// Validators shared by many contexts, run before per-context ones.
#[derive(Default)]
pub struct ValidatorDefaults {
    custom_validators: Vec<Arc<dyn CustomValidator>>,
}

impl ValidatorDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a validator for every context built from these defaults.
    pub fn register(&mut self, validator: Arc<dyn CustomValidator>) -> &mut Self {
        self.custom_validators.push(validator);
        self
    }

    pub fn custom_validators(&self) -> &[Arc<dyn CustomValidator>] {
        &self.custom_validators
    }
}

/// Built-in, then shared, then per-context validators, in registration order.
pub(crate) fn run_all(node: &Node<'_>, value: &Value) -> Vec<ValidationError> {
    let cx = node.cx();
    let translator = cx.translator();
    let mut errors =
        NetworkAddressValidator.validate(node.schema, value, node.path, translator);
    for validator in cx
        .defaults()
        .custom_validators()
        .iter()
        .chain(cx.custom_validators())
    {
        errors.extend(validator.validate(node.schema, value, node.path, translator));
    }
    errors
}
