//! Terminal and JSON rendering of a check report.

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use provider_docs_check::Report;
use serde_json::{json, Value};

use crate::error::{CliError, CliResult};

/// Lines printed for a report: errors, then warnings, then the summary line.
pub fn render_lines(report: &Report) -> Vec<String> {
    let mut lines: Vec<String> = report.errors().map(ToString::to_string).collect();
    lines.extend(report.warnings().map(|warning| format!("warning: {warning}")));
    if report.is_success() {
        lines.push("OK".to_string());
    } else {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("FAILED: {} issue(s)", report.error_count()));
    }
    lines
}

/// Print the report lines to stdout.
pub fn print_report(report: &Report) {
    for line in render_lines(report) {
        println!("{line}");
    }
}

/// Machine-readable summary of a run.
pub fn json_report(report: &Report) -> Value {
    json!({
        "generated_at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "files_checked": report.files_checked(),
        "error_count": report.error_count(),
        "warning_count": report.warnings().count(),
        "counts_by_check": report.counts_by_check(),
        "violations": report.violations(),
    })
}

/// Write the JSON summary, creating parent directories as needed.
pub fn write_json_report(report: &Report, output: &Path) -> CliResult<()> {
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            CliError::io(format!("failed to create report directory: {err}")).with_path(parent)
        })?;
    }
    let body = serde_json::to_string_pretty(&json_report(report))
        .map_err(|err| CliError::io(format!("failed to serialize report: {err}")))?;
    fs::write(output, format!("{body}\n"))
        .map_err(|err| CliError::io(format!("failed to write report: {err}")).with_path(output))?;
    tracing::info!(path = %output.display(), "wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use provider_docs_check::{CheckKind, Severity, Violation};

    fn sample() -> Report {
        Report::new(
            3,
            vec![
                Violation::new(
                    "docs/resources/b.md",
                    CheckKind::NamingConventionMismatch,
                    "example uses random_id",
                )
                .with_severity(Severity::Warning),
                Violation::new(
                    "docs/resources/a.md",
                    CheckKind::ForbiddenFieldPresent,
                    "YAML frontmatter should not contain layout",
                ),
            ],
        )
    }

    #[test]
    fn failed_report_lists_errors_then_warnings() {
        assert_eq!(
            render_lines(&sample()),
            vec![
                "docs/resources/a.md: error checking file frontmatter: YAML frontmatter should not contain layout",
                "warning: docs/resources/b.md: error checking file contents: example uses random_id",
                "",
                "FAILED: 1 issue(s)",
            ]
        );
    }

    #[test]
    fn clean_report_prints_ok() {
        assert_eq!(render_lines(&Report::new(2, Vec::new())), vec!["OK"]);
    }

    #[test]
    fn json_report_is_written_with_counts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("out").join("report.json");
        write_json_report(&sample(), &output).expect("write report");

        let body = fs::read_to_string(&output).expect("read report");
        let value: Value = serde_json::from_str(&body).expect("json");
        assert_eq!(value["files_checked"], 3);
        assert_eq!(value["error_count"], 1);
        assert_eq!(value["warning_count"], 1);
        assert_eq!(value["counts_by_check"]["forbidden-field-present"], 1);
        assert_eq!(value["violations"][0]["check"], "forbidden-field-present");
        assert_eq!(value["violations"][1]["severity"], "warning");
        assert!(value["generated_at"].is_string());
    }
}
