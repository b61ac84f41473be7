/// Controls validation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// When true, an absent value is an error unless its schema says `required: false`.
    pub required_by_default: bool,
    /// When true, object schemas without `additionalProperties` reject unknown keys.
    ///
    /// Not applied to schemas carrying `oneOf` or `anyOf`.
    pub no_additional_properties: bool,
    /// When true, malformed constraint arguments abort validation instead of being skipped.
    pub strict: bool,
    /// Maximum combined schema/value nesting before validation gives up.
    pub max_depth: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            required_by_default: false,
            no_additional_properties: false,
            strict: false,
            max_depth: 128,
        }
    }
}

/// Controls schema registry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// When true, validators built from the registry reject additional properties.
    pub no_additional_properties: bool,
    /// Maximum number of schemas loaded from a directory.
    pub max_schemas_from_directory: usize,
    /// Maximum bytes allowed per schema file loaded from a directory.
    pub max_schema_file_size: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            no_additional_properties: false,
            max_schemas_from_directory: 256,
            max_schema_file_size: 256 * 1024,
        }
    }
}

impl RegistryConfig {
    /// Validator options implied by this registry config.
    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            no_additional_properties: self.no_additional_properties,
            ..ValidatorOptions::default()
        }
    }
}
