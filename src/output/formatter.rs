use std::fmt::Write as _;
use std::path::{Component, Path};

use crate::detector::analyzer::SourceReport;
use crate::output::report;

/// Rendering of analysis results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per finding plus a summary line.
    #[default]
    Text,
    /// Pretty-printed JSON array, one object per input.
    Json,
    /// Markdown report.
    Markdown,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

/// Render `reports` in the requested format.
pub fn render(reports: &[SourceReport], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(format_text(reports)),
        OutputFormat::Json => format_json(reports),
        OutputFormat::Markdown => Ok(report::build_report(reports)),
    }
}

/// One line per finding, then a summary line.
pub fn format_text(reports: &[SourceReport]) -> String {
    let mut out = String::new();
    for sr in reports {
        for (index, detail) in sr.report.findings() {
            writeln!(
                out,
                "{}: statement #{}: {} at offset {} (len {}): {}",
                sr.source,
                index + 1,
                detail.pattern,
                detail.position,
                detail.length,
                detail.fragment
            )
            .unwrap();
        }
    }

    let total = report::combined(reports);
    let statements: usize = reports.iter().map(|sr| sr.report.statements.len()).sum();
    writeln!(
        out,
        "{} finding(s) in {} statement(s) across {} input(s); severity: {}",
        total.details().len(),
        statements,
        reports.len(),
        total.severity()
    )
    .unwrap();
    out
}

/// Pretty-printed JSON array of per-input reports.
pub fn format_json(reports: &[SourceReport]) -> Result<String, String> {
    serde_json::to_string_pretty(reports).map_err(|e| format!("Failed to serialize findings: {e}"))
}

/// Write the JSON findings and the markdown report to `output_dir`.
pub fn write_output(output_dir: &Path, name: &str, reports: &[SourceReport]) -> Result<(), String> {
    validate_output_name(name)?;

    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create output directory: {e}"))?;

    let findings_path = output_dir.join(format!("{name}_findings.json"));
    let findings_content = format_json(reports)?;
    std::fs::write(&findings_path, &findings_content)
        .map_err(|e| format!("Failed to write {}: {e}", findings_path.display()))?;

    let report_path = output_dir.join(format!("{name}_report.md"));
    let report_content = report::build_report(reports);
    std::fs::write(&report_path, &report_content)
        .map_err(|e| format!("Failed to write {}: {e}", report_path.display()))?;

    Ok(())
}

/// `name` is used as a file-name prefix, so it must be a single plain path component.
fn validate_output_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Output name must not be empty".to_string());
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None)
            if part.to_str() == Some(name) && !name.contains(['/', '\\']) =>
        {
            Ok(())
        }
        _ => Err(format!(
            "Invalid output name '{name}': expected a bare file name prefix"
        )),
    }
}
