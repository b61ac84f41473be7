use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::config::RegistryConfig;
use crate::error::{Result, SchemaError};
use crate::resolver::SchemaResolver;
use crate::validator::{Context, Validator};

const SCHEMA_SUFFIX: &str = ".schema.json";

/// URI-keyed store of schema documents.
///
/// Serves as the [`SchemaResolver`] for `$ref` and `describedby` links, so
/// schemas registered together can point at each other.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Value>,
    config: RegistryConfig,
}

impl SchemaRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            schemas: HashMap::new(),
            config,
        }
    }

    /// Register a schema under `uri` from a JSON string.
    pub fn register(&mut self, uri: &str, schema_json: &str) -> Result<()> {
        let schema: Value = serde_json::from_str(schema_json)?;
        self.register_value(uri, schema);
        Ok(())
    }

    /// Register a schema under `uri`, and under its own `id`/`$id` if it declares one.
    pub fn register_value(&mut self, uri: &str, schema: Value) {
        for key in ["$id", "id"] {
            if let Some(Value::String(id)) = schema.get(key) {
                let id = id.trim_end_matches('#');
                if !id.is_empty() && id != uri {
                    self.schemas.insert(id.to_string(), schema.clone());
                }
            }
        }
        tracing::debug!(uri, "registered schema");
        self.schemas.insert(uri.to_string(), schema);
    }

    /// Load `*.schema.json` files from a directory, keyed by file stem.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, RegistryConfig::default())
    }

    /// Load schemas from a directory with explicit config.
    pub fn from_directory_with_config(path: &Path, config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        let mut loaded_schema_count = 0usize;

        let entries = std::fs::read_dir(path)
            .map_err(|err| SchemaError::LoadFailed(format!("{}: {err}", path.display())))?;

        for entry in entries {
            let entry = entry.map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let Some(uri) = uri_from_file_name(&file_name) else {
                continue;
            };
            let entry_path = entry.path();
            let path_metadata = std::fs::symlink_metadata(&entry_path)
                .map_err(|err| SchemaError::LoadFailed(err.to_string()))?;
            let file_type = path_metadata.file_type();

            if file_type.is_symlink() {
                return Err(SchemaError::LoadFailed(format!(
                    "refusing to load schema symlink: {file_name}"
                )));
            }
            if !file_type.is_file() {
                continue;
            }

            loaded_schema_count = loaded_schema_count.saturating_add(1);
            if loaded_schema_count > registry.config.max_schemas_from_directory {
                return Err(SchemaError::LoadFailed(format!(
                    "schema count exceeds configured max ({}): {}",
                    registry.config.max_schemas_from_directory, loaded_schema_count
                )));
            }

            let file = std::fs::File::open(&entry_path).map_err(|err| {
                SchemaError::LoadFailed(format!(
                    "failed opening schema {}: {err}",
                    entry_path.display()
                ))
            })?;
            let opened_metadata = file
                .metadata()
                .map_err(|err| SchemaError::LoadFailed(err.to_string()))?;

            #[cfg(unix)]
            {
                if !same_file_identity(&path_metadata, &opened_metadata) {
                    return Err(SchemaError::LoadFailed(format!(
                        "schema file changed during load: {file_name}"
                    )));
                }
            }

            if opened_metadata.len() > registry.config.max_schema_file_size as u64 {
                return Err(SchemaError::LoadFailed(format!(
                    "schema file too large ({} bytes): {file_name}",
                    opened_metadata.len()
                )));
            }

            let max_bytes = registry.config.max_schema_file_size;
            let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
            let mut content = String::new();
            file.take(read_limit)
                .read_to_string(&mut content)
                .map_err(|err| {
                    SchemaError::LoadFailed(format!(
                        "failed reading schema {}: {err}",
                        entry_path.display()
                    ))
                })?;
            if content.len() > max_bytes {
                return Err(SchemaError::LoadFailed(format!(
                    "schema file too large while reading: {file_name}"
                )));
            }

            registry.register(uri, &content)?;
        }

        Ok(registry)
    }

    /// Load from embedded schema strings.
    pub fn from_embedded(schemas: &[(&str, &str)]) -> Result<Self> {
        let mut registry = Self::new();
        for (uri, schema) in schemas {
            registry.register(uri, schema)?;
        }
        Ok(registry)
    }

    /// Schema registered under `uri`.
    pub fn get(&self, uri: &str) -> Option<&Value> {
        self.schemas.get(uri)
    }

    /// Check if a schema is registered under `uri`.
    pub fn has_schema(&self, uri: &str) -> bool {
        self.schemas.contains_key(uri)
    }

    /// Registered URIs, sorted.
    pub fn uris(&self) -> Vec<&str> {
        let mut uris: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        uris.sort_unstable();
        uris
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Context resolving references through this registry.
    pub fn context(self: &Arc<Self>) -> Context {
        Context::new()
            .with_options(self.config.validator_options())
            .with_resolver(Arc::clone(self) as Arc<dyn SchemaResolver>)
    }

    /// Validator for the schema registered under `uri`.
    pub fn validator(self: &Arc<Self>, uri: &str) -> Option<Validator> {
        let schema = self.get(uri)?.clone();
        Some(Validator::with_context(schema, self.context()))
    }
}

impl SchemaResolver for SchemaRegistry {
    fn resolve_ref(&self, uri: &str) -> Option<Value> {
        self.get(uri).cloned()
    }
}

fn uri_from_file_name(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_suffix(SCHEMA_SUFFIX)?;
    (!stem.is_empty()).then_some(stem)
}

#[cfg(unix)]
fn same_file_identity(
    path_metadata: &std::fs::Metadata,
    opened_metadata: &std::fs::Metadata,
) -> bool {
    use std::os::unix::fs::MetadataExt;
    path_metadata.dev() == opened_metadata.dev() && path_metadata.ino() == opened_metadata.ino()
}
