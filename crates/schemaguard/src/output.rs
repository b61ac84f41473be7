use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use schemaguard_core::{FitScore, ValidationError};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Findings for one instance document.
#[derive(Debug, Serialize)]
pub struct InstanceReport {
    pub instance: String,
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl InstanceReport {
    pub fn new(instance: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        Self {
            instance: instance.into(),
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// One candidate schema's fit against an instance.
#[derive(Debug, Serialize)]
pub struct FitRow {
    pub rank: usize,
    pub schema: String,
    #[serde(flatten)]
    pub score: FitScore,
}

pub fn print_reports(reports: &[InstanceReport], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for report in reports {
                println!(
                    "{}",
                    serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INSTANCE", "PATH", "PROPERTY", "MESSAGE", "COUNT"]);
            for report in reports {
                if report.valid {
                    table.add_row(vec![report.instance.as_str(), "-", "-", "valid", "-"]);
                }
                for err in &report.errors {
                    table.add_row(vec![
                        report.instance.clone(),
                        err.path.clone(),
                        err.property.clone(),
                        err.message.clone(),
                        err.errorcount.to_string(),
                    ]);
                }
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for report in reports {
                if report.valid {
                    println!("{}: valid", report.instance);
                    continue;
                }
                println!("{}: {} error(s)", report.instance, report.errors.len());
                for err in &report.errors {
                    println!("  {err}");
                }
            }
        }
        OutputFormat::Raw => {
            for report in reports {
                for err in &report.errors {
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        report.instance, err.path, err.property, err.message, err.errorcount
                    );
                }
            }
        }
    }
}

pub fn print_fit(rows: &[FitRow], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["RANK", "SCHEMA", "MATCH", "EXTRA"]);
            for row in rows {
                table.add_row(vec![
                    row.rank.to_string(),
                    row.schema.clone(),
                    row.score.matched.to_string(),
                    row.score.extra.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in rows {
                println!(
                    "#{} {} match={} extra={}",
                    row.rank, row.schema, row.score.matched, row.score.extra
                );
            }
        }
        OutputFormat::Raw => {
            for row in rows {
                println!(
                    "{}\t{}\t{}\t{}",
                    row.rank, row.schema, row.score.matched, row.score.extra
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_json_shape() {
        let report = InstanceReport::new(
            "a.json",
            vec![ValidationError::new("root", "type", "Value must be of type string")],
        );
        let value = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(value["instance"], "a.json");
        assert_eq!(value["valid"], false);
        assert_eq!(value["errors"][0]["errorcount"], 1);
    }

    #[test]
    fn fit_row_flattens_score() {
        let row = FitRow {
            rank: 1,
            schema: "a.schema.json".to_string(),
            score: FitScore {
                matched: 2.0,
                extra: 0.0,
            },
        };
        let value = serde_json::to_value(&row).expect("row should serialize");
        assert_eq!(value["match"], 2.0);
        assert_eq!(value["extra"], 0.0);
        assert_eq!(value["rank"], 1);
    }
}
