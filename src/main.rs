//! CLI entry point for `sqli-tautology`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use sqli_tautology::detector::analyzer::{analyze_sql, SourceReport};
use sqli_tautology::output::formatter::{self, OutputFormat};
use sqli_tautology::output::report;
use sqli_tautology::parser::sql_parser::SqlDialect;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sqli-tautology",
    version,
    about = "Detect tautological WHERE clauses (SQL injection such as OR 1=1)"
)]
struct Cli {
    /// Input SQL files
    #[arg(required_unless_present_any = ["sql", "sql_dir"])]
    input: Vec<PathBuf>,

    /// Analyze this SQL text instead of (or in addition to) files
    #[arg(long)]
    sql: Option<String>,

    /// Process all .sql files in directory
    #[arg(long)]
    sql_dir: Option<PathBuf>,

    /// SQL dialect used to parse the input
    #[arg(long, default_value = "mysql", env = "SQLI_DIALECT")]
    dialect: SqlDialect,

    /// Output format on stdout: text, json or markdown
    #[arg(long, default_value = "text", env = "SQLI_FORMAT")]
    format: OutputFormat,

    /// Also write findings JSON and a markdown report to this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print verbose diagnostics
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME"))));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    error!("{message}");
    process::exit(2);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Collect input files
    let mut sql_files = cli.input.clone();
    if let Some(dir) = &cli.sql_dir {
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                let mut found: Vec<PathBuf> = entries
                    .flatten()
                    .map(|entry| entry.path())
                    .filter(|path| path.extension().is_some_and(|e| e == "sql"))
                    .collect();
                found.sort();
                sql_files.extend(found);
            }
            Err(e) => exit_with_error(&format!("Error reading SQL directory: {e}")),
        }
    }

    let mut inputs: Vec<(String, String)> = Vec::new();
    if let Some(sql) = &cli.sql {
        inputs.push(("<inline>".to_string(), sql.clone()));
    }
    for path in &sql_files {
        match std::fs::read_to_string(path) {
            Ok(content) => inputs.push((path.display().to_string(), content)),
            Err(e) => exit_with_error(&format!("Error reading {}: {e}", path.display())),
        }
    }

    if inputs.is_empty() {
        exit_with_error("No input SQL provided");
    }

    info!(inputs = inputs.len(), dialect = %cli.dialect, "Starting analysis");

    // Each input is analyzed on its own so that offsets stay relative to it.
    let mut reports = Vec::with_capacity(inputs.len());
    for (source, sql) in inputs {
        match analyze_sql(&sql, cli.dialect) {
            Ok(analysis) => {
                debug!(
                    source = %source,
                    statements = analysis.statements.len(),
                    findings = analysis.result.details().len(),
                    "Analyzed input"
                );
                reports.push(SourceReport {
                    source,
                    dialect: cli.dialect,
                    report: analysis,
                });
            }
            Err(e) => exit_with_error(&format!("{source}: {e}")),
        }
    }

    match formatter::render(&reports, cli.format) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => exit_with_error(&e),
    }

    if let Some(output_dir) = &cli.output_dir {
        // Derive name from first input file
        let name = sql_files
            .first()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or("inline");
        if let Err(e) = formatter::write_output(output_dir, name, &reports) {
            exit_with_error(&format!("Error writing output: {e}"));
        }
    }

    // Exit code based on findings
    if report::combined(&reports).is_detected() {
        process::exit(1);
    }
}
