use std::fmt;
use std::io;

use schemaguard_core::SchemaError;

// Exit codes follow the sysexits-style ranges used across 3leaps tools.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    let code = match &err {
        SchemaError::InvalidJson(_)
        | SchemaError::Malformed { .. }
        | SchemaError::UnresolvedRef(_)
        | SchemaError::DepthExceeded { .. } => DATA_INVALID,
        SchemaError::LoadFailed(_) => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_usage_errors() {
        let err = io_error("read", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, USAGE);
        assert!(err.message.starts_with("read: "));
    }

    #[test]
    fn schema_errors_map_to_exit_codes() {
        let depth = SchemaError::DepthExceeded {
            path: "root".into(),
            limit: 4,
        };
        assert_eq!(schema_error("validate", depth).code, DATA_INVALID);
        assert_eq!(
            schema_error("load", SchemaError::LoadFailed("nope".into())).code,
            FAILURE
        );
    }
}
