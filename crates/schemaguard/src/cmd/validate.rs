use std::sync::Arc;

use schemaguard_core::{Context, DecimalBackend, RegistryConfig, ValidatorOptions};

use crate::cmd::{load_registry, read_json, register_named, ValidateArgs};
use crate::exit::{schema_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_reports, InstanceReport, OutputFormat};

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    let schema = read_json(&args.schema)?;

    let config = RegistryConfig {
        no_additional_properties: args.no_additional_properties,
        ..RegistryConfig::default()
    };
    let mut registry = load_registry(args.schema_dir.as_deref(), config)?;
    register_named(&mut registry, &args.schema, &schema);

    let options = ValidatorOptions {
        required_by_default: args.required_by_default,
        no_additional_properties: args.no_additional_properties,
        strict: args.strict,
        max_depth: args.max_depth,
    };
    let mut cx = Context::new()
        .with_options(options)
        .with_resolver(Arc::new(registry));
    if args.precise {
        cx = cx.with_backend(Arc::new(DecimalBackend));
    }
    tracing::debug!(backend = cx.backend().name(), strict = args.strict, "validator ready");

    let mut reports = Vec::with_capacity(args.instances.len());
    for path in &args.instances {
        let label = path.display().to_string();
        let instance = read_json(path)?;
        let errors = cx
            .validate(&schema, Some(&instance))
            .map_err(|err| schema_error(&format!("validate {label}"), err))?;
        tracing::info!(instance = %label, errors = errors.len(), "validated instance");
        reports.push(InstanceReport::new(label, errors));
    }

    print_reports(&reports, format);

    if reports.iter().all(|report| report.valid) {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}
