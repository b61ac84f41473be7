//! `date`, `time` and `datetime-local` formats.
//!
//! Integer-typed schemas treat the value as an epoch timestamp. String values
//! are matched against a fixed shape unless a [`DatePicker`] is registered for
//! the path, in which case the picker decides.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::canonical::display_text;
use crate::error::Result;
use crate::report::ValidationError;
use crate::translate::MessageKey;
use crate::walk::Node;

/// A rich date input bound to one value path.
pub trait DatePicker: Send + Sync {
    /// Format shown to the user in error messages, e.g. `Y-m-d`.
    fn date_format(&self) -> String;

    /// Whether the picker can parse `value` and format it back unchanged.
    fn accepts(&self, value: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    Date,
    Time,
    DatetimeLocal,
}

impl DateKind {
    pub fn from_format(format: &str) -> Option<Self> {
        match format {
            "date" => Some(Self::Date),
            "time" => Some(Self::Time),
            "datetime-local" => Some(Self::DatetimeLocal),
            _ => None,
        }
    }

    fn message(self) -> MessageKey {
        match self {
            Self::Date => MessageKey::Date,
            Self::Time => MessageKey::Time,
            Self::DatetimeLocal => MessageKey::DatetimeLocal,
        }
    }

    /// Human-readable shape used when no picker supplies its own.
    fn default_display(self) -> &'static str {
        match self {
            Self::Date => "\"YYYY-MM-DD\"",
            Self::Time => "\"HH:MM\"",
            Self::DatetimeLocal => "\"YYYY-MM-DD HH:MM\"",
        }
    }

    fn shape(self) -> Option<&'static Regex> {
        static DATE: OnceLock<Option<Regex>> = OnceLock::new();
        static TIME: OnceLock<Option<Regex>> = OnceLock::new();
        static DATETIME: OnceLock<Option<Regex>> = OnceLock::new();

        // Empty input is allowed; `minLength`/`required` police emptiness.
        let (cell, source) = match self {
            Self::Date => (&DATE, r"^([0-9]{4}[^0-9][0-9]{2}[^0-9][0-9]{2})?$"),
            Self::Time => (&TIME, r"^([0-9]{2}:[0-9]{2}(:[0-9]{2})?)?$"),
            Self::DatetimeLocal => (
                &DATETIME,
                r"^([0-9]{4}[^0-9][0-9]{2}[^0-9][0-9]{2}[ T][0-9]{2}:[0-9]{2}(:[0-9]{2})?)?$",
            ),
        };
        cell.get_or_init(|| Regex::new(source).ok()).as_ref()
    }
}

pub(crate) fn evaluate(node: &Node<'_>, value: &Value) -> Result<Vec<ValidationError>> {
    let Some(kind) = node
        .schema
        .get("format")
        .and_then(Value::as_str)
        .and_then(DateKind::from_format)
    else {
        return Ok(Vec::new());
    };

    let picker = node
        .cx()
        .format_validator()
        .and_then(|rich| rich.picker_for(node.path));
    let display = picker
        .as_ref()
        .map(|picker| picker.date_format())
        .unwrap_or_else(|| kind.default_display().to_string());

    if node.schema.get("type").and_then(Value::as_str) == Some("integer") {
        return Ok(epoch(node, kind, value, display).into_iter().collect());
    }

    let text = display_text(value);
    let valid = match &picker {
        Some(picker) => text.is_empty() || picker.accepts(&text),
        None => kind.shape().map_or(true, |shape| shape.is_match(&text)),
    };
    if valid {
        return Ok(Vec::new());
    }
    Ok(vec![node.error("format", kind.message(), &[display])])
}

/// Timestamps must be whole seconds after the epoch.
fn epoch(node: &Node<'_>, kind: DateKind, value: &Value, display: String) -> Option<ValidationError> {
    let seconds = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match seconds {
        Some(s) if s.is_finite() => {
            (s < 1.0 || s.fract() != 0.0).then(|| node.error("format", MessageKey::InvalidEpoch, &[]))
        }
        _ => Some(node.error("format", kind.message(), &[display])),
    }
}
