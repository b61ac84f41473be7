use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use schemaguard_core::{RegistryConfig, SchemaRegistry};
use serde_json::Value;

use crate::exit::{io_error, schema_error, CliResult};
use crate::output::OutputFormat;

pub mod fit;
pub mod validate;
pub mod version;

/// Path argument meaning "read standard input".
pub const STDIN: &str = "-";

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate instance documents against a schema.
    Validate(ValidateArgs),
    /// Rank candidate schemas by how well an instance fits them.
    Fit(FitArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Validate(args) => validate::run(args, format),
        Command::Fit(args) => fit::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file to validate against.
    #[arg(long, short = 's', value_name = "FILE")]
    pub schema: PathBuf,
    /// Directory of *.schema.json files that $ref and describedby links resolve against.
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,
    /// Treat every property as required unless its schema says `required: false`.
    #[arg(long)]
    pub required_by_default: bool,
    /// Reject undeclared properties when a schema leaves additionalProperties unset.
    #[arg(long)]
    pub no_additional_properties: bool,
    /// Fail on malformed schema keywords instead of skipping them.
    #[arg(long)]
    pub strict: bool,
    /// Use exact decimal arithmetic for numeric bounds and multipleOf.
    #[arg(long)]
    pub precise: bool,
    /// Maximum combined schema/value nesting.
    #[arg(long, default_value = "128", value_name = "N")]
    pub max_depth: usize,
    /// Instance documents to validate ("-" reads stdin).
    #[arg(required = true, value_name = "INSTANCE")]
    pub instances: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct FitArgs {
    /// Candidate schema files (repeatable).
    #[arg(long, short = 's', value_name = "FILE", required = true)]
    pub schema: Vec<PathBuf>,
    /// Directory of *.schema.json files that $ref links resolve against.
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,
    /// Instance document to score ("-" reads stdin).
    #[arg(value_name = "INSTANCE")]
    pub instance: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Read and parse a JSON document from a file or stdin.
pub(crate) fn read_json(path: &Path) -> CliResult<Value> {
    let label = path.display().to_string();
    let text = if label == STDIN {
        std::io::read_to_string(std::io::stdin()).map_err(|err| io_error("read stdin", err))?
    } else {
        std::fs::read_to_string(path).map_err(|err| io_error(&format!("read {label}"), err))?
    };
    serde_json::from_str(&text).map_err(|err| schema_error(&format!("parse {label}"), err.into()))
}

/// Registry preloaded from `schema_dir`, or empty.
pub(crate) fn load_registry(
    schema_dir: Option<&Path>,
    config: RegistryConfig,
) -> CliResult<SchemaRegistry> {
    match schema_dir {
        Some(dir) => {
            let registry = SchemaRegistry::from_directory_with_config(dir, config)
                .map_err(|err| schema_error(&format!("load {}", dir.display()), err))?;
            tracing::debug!(dir = %dir.display(), schemas = registry.uris().len(), "loaded schema directory");
            Ok(registry)
        }
        None => Ok(SchemaRegistry::with_config(config)),
    }
}

/// Register `schema` under its file stem so documents can reference it by name.
pub(crate) fn register_named(registry: &mut SchemaRegistry, path: &Path, schema: &Value) {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return;
    };
    let uri = name
        .strip_suffix(".schema.json")
        .or_else(|| name.strip_suffix(".json"))
        .unwrap_or(name);
    if !registry.has_schema(uri) {
        registry.register_value(uri, schema.clone());
    }
}
