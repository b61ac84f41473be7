use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Overrides `--log-level` with a full filter, e.g. `schemaguard_core::walk=trace`.
pub const LOG_ENV: &str = "SCHEMAGUARD_LOG";

/// Crates whose events reach stderr under `--log-level`.
const TARGETS: [&str; 2] = ["schemaguard", "schemaguard_core"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Filter directives for a run: the override when it parses, else the
/// level applied to the validator crates only.
fn directives(level: LogLevel, env_override: Option<&str>) -> String {
    if let Some(raw) = env_override.map(str::trim).filter(|raw| !raw.is_empty()) {
        if EnvFilter::try_new(raw).is_ok() {
            return raw.to_string();
        }
    }
    TARGETS
        .iter()
        .map(|target| format!("{target}={}", level.as_str()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the stderr subscriber; stdout stays reserved for reports.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let env_override = std::env::var(LOG_ENV).ok();
    let directives = directives(level, env_override.as_deref());
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(&directives))
        .with_ansi(false)
        .with_target(true);

    let installed = match format {
        LogFormat::Text => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    };
    if installed {
        tracing::trace!(%directives, "logging initialized");
    }
}
