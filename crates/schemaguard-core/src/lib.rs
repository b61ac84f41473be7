//! Recursive JSON Schema validation for legacy and list-form dialects.
//!
//! Accepts both the boolean `required` of draft-3 style schemas and the
//! list-form `required` of draft-4 style schemas, along with `extends`,
//! `disallow`, `divisibleBy` and `describedby` links. Validation never stops
//! at the first failure: every finding is reported as a [`ValidationError`]
//! with a dotted path, the failing keyword and a translated message.
//!
//! Malformed schemas are tolerated by default and the offending keyword is
//! skipped. Set [`ValidatorOptions::strict`] to turn them into
//! [`SchemaError::Malformed`] instead.

mod array;
pub mod canonical;
mod combinator;
pub mod config;
pub mod custom;
pub mod dedup;
pub mod error;
pub mod fit;
pub mod format;
pub mod keyword;
mod number;
pub mod numeric;
mod object;
pub mod registry;
pub mod report;
pub mod resolver;
mod string;
pub mod translate;
pub mod types;
pub mod validator;
mod walk;

pub use config::{RegistryConfig, ValidatorOptions};
pub use custom::{from_fn, CustomValidator, NetworkAddressValidator, ValidatorDefaults};
pub use dedup::dedup_errors;
pub use error::{Result, SchemaError};
pub use fit::{FitScore, DEFAULT_FIT_WEIGHT};
pub use format::{DateKind, DatePicker};
pub use numeric::{DecimalBackend, NativeBackend, NumericBackend};
pub use registry::SchemaRegistry;
pub use report::{ErrorKind, ValidationError, ROOT_PATH};
pub use resolver::{EditorInfo, EditorLookup, NoResolver, RichFormatValidator, SchemaResolver};
pub use translate::{EnglishCatalog, MessageKey, Translator};
pub use types::kind_name;
pub use validator::{validate, Context, Validator};
