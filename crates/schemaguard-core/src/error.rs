/// Errors that abort a validation call or a registry operation.
///
/// Constraint violations are never reported through this type; they are
/// returned as [`ValidationError`](crate::ValidationError) values.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A schema file could not be loaded.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// Schema or instance text is not valid JSON.
    #[error("input is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A constraint argument has the wrong shape (strict mode only).
    #[error("malformed `{keyword}` at {path}: {reason}")]
    Malformed {
        path: String,
        keyword: String,
        reason: String,
    },

    /// A `$ref` could not be expanded (strict mode only).
    #[error("unresolved reference: {0}")]
    UnresolvedRef(String),

    /// Schema/value nesting exceeded the configured limit, usually a cyclic schema.
    #[error("recursion limit of {limit} exceeded at {path}")]
    DepthExceeded { path: String, limit: usize },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
