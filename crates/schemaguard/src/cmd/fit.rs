use std::sync::Arc;

use schemaguard_core::{kind_name, Context, RegistryConfig, DEFAULT_FIT_WEIGHT};

use crate::cmd::{load_registry, read_json, register_named, FitArgs};
use crate::exit::{schema_error, CliResult, SUCCESS};
use crate::output::{print_fit, FitRow, OutputFormat};

pub fn run(args: FitArgs, format: OutputFormat) -> CliResult<i32> {
    let instance = read_json(&args.instance)?;
    if !instance.is_object() {
        tracing::warn!(
            kind = kind_name(&instance),
            "only objects are scored; every candidate will score zero"
        );
    }

    let mut registry = load_registry(args.schema_dir.as_deref(), RegistryConfig::default())?;
    let mut candidates = Vec::with_capacity(args.schema.len());
    for path in &args.schema {
        let schema = read_json(path)?;
        register_named(&mut registry, path, &schema);
        candidates.push(schema);
    }
    let cx = Context::new().with_resolver(Arc::new(registry));

    let ranked = cx
        .rank_candidates(&instance, &candidates)
        .map_err(|err| schema_error("rank candidates", err))?;

    let mut rows = Vec::with_capacity(ranked.len());
    for (position, index) in ranked.into_iter().enumerate() {
        let score = cx
            .fit_test(&candidates[index], &instance, DEFAULT_FIT_WEIGHT)
            .map_err(|err| schema_error("fit", err))?;
        rows.push(FitRow {
            rank: position + 1,
            schema: args.schema[index].display().to_string(),
            score,
        });
    }

    print_fit(&rows, format);
    Ok(SUCCESS)
}
