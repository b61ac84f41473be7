//! Closed keyword sets and the order each group is evaluated in.
//!
//! Error order follows these arrays, not the key order of the schema.

use serde_json::{Map, Value};

macro_rules! keyword_group {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All keywords of this group in evaluation order.
            pub const ORDER: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Keywords of this group present on `schema`, in evaluation order.
            pub fn present(schema: &Map<String, Value>) -> impl Iterator<Item = $name> + '_ {
                Self::ORDER
                    .iter()
                    .copied()
                    .filter(move |kw| schema.contains_key(kw.as_str()))
            }
        }
    };
}

keyword_group!(
    /// Keywords checked for every defined value.
    AgnosticKeyword {
        Enum => "enum",
        Extends => "extends",
        AllOf => "allOf",
        AnyOf => "anyOf",
        OneOf => "oneOf",
        Not => "not",
        Type => "type",
        Disallow => "disallow",
    }
);

keyword_group!(
    /// Keywords checked for number values.
    NumberKeyword {
        MultipleOf => "multipleOf",
        DivisibleBy => "divisibleBy",
        Maximum => "maximum",
        Minimum => "minimum",
    }
);

keyword_group!(
    /// Keywords checked for string values.
    StringKeyword {
        MaxLength => "maxLength",
        MinLength => "minLength",
        Pattern => "pattern",
    }
);

keyword_group!(
    /// Keywords checked for array values.
    ArrayKeyword {
        Items => "items",
        MaxItems => "maxItems",
        MinItems => "minItems",
        UniqueItems => "uniqueItems",
    }
);

keyword_group!(
    /// Keywords checked for object values.
    ///
    /// `additionalProperties` and `dependencies` run last so they see every
    /// key marked by `properties` and `patternProperties`.
    ObjectKeyword {
        MaxProperties => "maxProperties",
        MinProperties => "minProperties",
        Required => "required",
        Properties => "properties",
        PatternProperties => "patternProperties",
        AdditionalProperties => "additionalProperties",
        Dependencies => "dependencies",
    }
);

/// Formats handled by the date/time validator.
pub const DATE_FORMATS: [&str; 3] = ["date", "time", "datetime-local"];

/// Whether `schema.format` names a date-like format.
pub fn has_date_format(schema: &Map<String, Value>) -> bool {
    matches!(schema.get("format"), Some(Value::String(f)) if DATE_FORMATS.contains(&f.as_str()))
}
