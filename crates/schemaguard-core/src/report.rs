use std::fmt;

use serde::{Deserialize, Serialize};

/// Root path segment used for the outermost value.
pub const ROOT_PATH: &str = "root";

/// One constraint violation found while walking a value.
///
/// `path` is a dotted location such as `root.items.3.name`, `property` names the
/// keyword that failed and `errorcount` is how many identical findings were
/// collapsed into this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub path: String,
    pub property: String,
    pub message: String,
    pub errorcount: u32,
}

impl ValidationError {
    pub fn new(
        path: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            property: property.into(),
            message: message.into(),
            errorcount: 1,
        }
    }

    /// Classify this finding by the keyword that produced it.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_property(&self.property)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.path, self.property, self.message)?;
        if self.errorcount > 1 {
            write!(f, " (x{})", self.errorcount)?;
        }
        Ok(())
    }
}

/// Taxonomy of soft validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TypeMismatch,
    EnumMismatch,
    CombinatorFailure,
    RangeViolation,
    DivisibilityViolation,
    LengthViolation,
    PatternMismatch,
    CardinalityViolation,
    UniquenessViolation,
    RequiredPropertyMissing,
    AdditionalPropertyDisallowed,
    DependencyViolation,
    FormatViolation,
    CustomValidatorFailure,
}

impl ErrorKind {
    pub fn from_property(property: &str) -> Self {
        match property {
            "type" | "disallow" => Self::TypeMismatch,
            "enum" => Self::EnumMismatch,
            "allOf" | "extends" | "anyOf" | "oneOf" | "not" => Self::CombinatorFailure,
            "minimum" | "maximum" => Self::RangeViolation,
            "multipleOf" | "divisibleBy" => Self::DivisibilityViolation,
            "minLength" | "maxLength" => Self::LengthViolation,
            "pattern" => Self::PatternMismatch,
            "minItems" | "maxItems" | "minProperties" | "maxProperties" => {
                Self::CardinalityViolation
            }
            "uniqueItems" => Self::UniquenessViolation,
            "required" => Self::RequiredPropertyMissing,
            "additionalProperties" | "additionalItems" => Self::AdditionalPropertyDisallowed,
            "dependencies" => Self::DependencyViolation,
            "format" => Self::FormatViolation,
            _ => Self::CustomValidatorFailure,
        }
    }
}

/// Append a child segment to a dotted path.
pub(crate) fn child_path(path: &str, segment: impl fmt::Display) -> String {
    format!("{path}.{segment}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_property() {
        let err = ValidationError::new("root", "uniqueItems", "dup");
        assert_eq!(err.kind(), ErrorKind::UniquenessViolation);
        assert_eq!(
            ErrorKind::from_property("additionalItems"),
            ErrorKind::AdditionalPropertyDisallowed
        );
        assert_eq!(
            ErrorKind::from_property("postcode"),
            ErrorKind::CustomValidatorFailure
        );
    }

    #[test]
    fn display_includes_count_only_when_collapsed() {
        let mut err = ValidationError::new("root.a", "type", "Value must be of type string");
        assert_eq!(
            err.to_string(),
            "root.a [type]: Value must be of type string"
        );
        err.errorcount = 3;
        assert!(err.to_string().ends_with("(x3)"));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let err = ValidationError::new("root", "required", "Property must be set");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["errorcount"], 1);
        assert_eq!(json["property"], "required");
    }
}
