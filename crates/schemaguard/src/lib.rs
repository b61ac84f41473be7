//! Forgiving JSON Schema validation for legacy and list-form dialects.
//!
//! schemaguard walks a value against a schema and reports every violation it
//! finds, each with a dotted path, the failing keyword and a readable message.
//! It also scores how closely a value matches candidate schemas.
//!
//! # Crate Structure
//!
//! - [`engine`]: the validation engine, schema registry and collaborator traits
//!
//! The most used types are re-exported at the crate root.

/// Re-export engine types.
pub mod engine {
    pub use schemaguard_core::*;
}

pub use schemaguard_core::{
    validate, Context, DecimalBackend, FitScore, SchemaError, SchemaRegistry, ValidationError,
    Validator, ValidatorOptions,
};
