//! Message keys and the default English catalog.

use std::fmt;

/// Every message the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    NotSet,
    NotEmpty,
    Enum,
    AnyOf,
    OneOf,
    Not,
    TypeUnion,
    Type,
    DisallowUnion,
    Disallow,
    MultipleOf,
    MaximumExclusive,
    MaximumInclusive,
    MinimumExclusive,
    MinimumInclusive,
    MaxLength,
    MinLength,
    Pattern,
    AdditionalItems,
    MaxItems,
    MinItems,
    UniqueItems,
    MaxProperties,
    MinProperties,
    Required,
    AdditionalProperties,
    Dependency,
    Date,
    Time,
    DatetimeLocal,
    InvalidEpoch,
    Ipv4,
    Ipv6,
    Hostname,
}

impl MessageKey {
    /// Catalog identifier, e.g. `error_minLength`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotSet => "error_notset",
            Self::NotEmpty => "error_notempty",
            Self::Enum => "error_enum",
            Self::AnyOf => "error_anyOf",
            Self::OneOf => "error_oneOf",
            Self::Not => "error_not",
            Self::TypeUnion => "error_type_union",
            Self::Type => "error_type",
            Self::DisallowUnion => "error_disallow_union",
            Self::Disallow => "error_disallow",
            Self::MultipleOf => "error_multipleOf",
            Self::MaximumExclusive => "error_maximum_excl",
            Self::MaximumInclusive => "error_maximum_incl",
            Self::MinimumExclusive => "error_minimum_excl",
            Self::MinimumInclusive => "error_minimum_incl",
            Self::MaxLength => "error_maxLength",
            Self::MinLength => "error_minLength",
            Self::Pattern => "error_pattern",
            Self::AdditionalItems => "error_additionalItems",
            Self::MaxItems => "error_maxItems",
            Self::MinItems => "error_minItems",
            Self::UniqueItems => "error_uniqueItems",
            Self::MaxProperties => "error_maxProperties",
            Self::MinProperties => "error_minProperties",
            Self::Required => "error_required",
            Self::AdditionalProperties => "error_additional_properties",
            Self::Dependency => "error_dependency",
            Self::Date => "error_date",
            Self::Time => "error_time",
            Self::DatetimeLocal => "error_datetime_local",
            Self::InvalidEpoch => "error_invalid_epoch",
            Self::Ipv4 => "error_ipv4",
            Self::Ipv6 => "error_ipv6",
            Self::Hostname => "error_hostname",
        }
    }

    fn english(self) -> &'static str {
        match self {
            Self::NotSet => "Property must be set",
            Self::NotEmpty => "Value required",
            Self::Enum => "Value must be one of the enumerated values",
            Self::AnyOf => "Value must validate against at least one of the provided schemas",
            Self::OneOf => {
                "Value must validate against exactly one of the provided schemas. It currently validates against {{0}} of the schemas."
            }
            Self::Not => "Value must not validate against the provided schema",
            Self::TypeUnion => "Value must be one of the provided types",
            Self::Type => "Value must be of type {{0}}",
            Self::DisallowUnion => "Value must not be one of the provided disallowed types",
            Self::Disallow => "Value must not be of type {{0}}",
            Self::MultipleOf => "Value must be a multiple of {{0}}",
            Self::MaximumExclusive => "Value must be less than {{0}}",
            Self::MaximumInclusive => "Value must be at most {{0}}",
            Self::MinimumExclusive => "Value must be greater than {{0}}",
            Self::MinimumInclusive => "Value must be at least {{0}}",
            Self::MaxLength => "Value must be at most {{0}} characters long",
            Self::MinLength => "Value must be at least {{0}} characters long",
            Self::Pattern => "Value must match the pattern {{0}}",
            Self::AdditionalItems => "No additional items allowed in this array",
            Self::MaxItems => "Value must have at most {{0}} items",
            Self::MinItems => "Value must have at least {{0}} items",
            Self::UniqueItems => "Array must have unique items",
            Self::MaxProperties => "Object must have at most {{0}} properties",
            Self::MinProperties => "Object must have at least {{0}} properties",
            Self::Required => "Object is missing the required property '{{0}}'",
            Self::AdditionalProperties => {
                "No additional properties allowed, but property {{0}} is set"
            }
            Self::Dependency => "Must have property {{0}}",
            Self::Date => "Date must be in the format {{0}}",
            Self::Time => "Time must be in the format {{0}}",
            Self::DatetimeLocal => "Datetime must be in the format {{0}}",
            Self::InvalidEpoch => "Date must be greater than 1 January 1970",
            Self::Ipv4 => {
                "Value must be a valid IPv4 address in the form of 4 numbers between 0 and 255, separated by dots"
            }
            Self::Ipv6 => "Value must be a valid IPv6 address",
            Self::Hostname => "The hostname has the wrong format",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a message key and its positional arguments into text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: MessageKey, args: &[String]) -> String;
}

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl Translator for EnglishCatalog {
    fn translate(&self, key: MessageKey, args: &[String]) -> String {
        fill_placeholders(key.english(), args)
    }
}

/// Replace `{{0}}`, `{{1}}`, ... with the matching argument.
///
/// Placeholders without an argument are left untouched.
pub fn fill_placeholders(template: &str, args: &[String]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{{{i}}}}}"), arg);
    }
    out
}
