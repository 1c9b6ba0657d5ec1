//! Gauntlet demo runner
//!
//! Registers the bundled demonstration suite, runs it, prints the
//! console report, writes the HTML report document and exits with the
//! run verdict.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use gauntlet_core::{ConsoleReport, HtmlReport, RootRegistry, Runner};
use std::path::PathBuf;
use std::process::ExitCode;

mod suite;

/// Gauntlet demonstration runner.
///
/// Runs the bundled suite through the engine: every assertion kind, a
/// deliberate failure and a never-asserting case, so the output shows
/// each reportable outcome. The exit code reflects the run verdict.
#[derive(Parser)]
#[command(name = "gauntlet")]
#[command(version)]
struct Cli {
    /// Project name shown in report headers
    #[arg(long, default_value = "Gauntlet Demo")]
    project: String,

    /// HTML report output path
    #[arg(long, default_value = "report.html")]
    report: PathBuf,

    /// Skip writing the HTML report
    #[arg(long)]
    no_report: bool,

    /// Suppress per-case result lines
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Print a machine-readable summary instead of the console report
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> Result<ExitCode> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut registry = RootRegistry::new(&args.project);
    let runner = Runner::new().with_quiet(args.quiet || args.json);

    suite::register_and_run(&mut registry, &runner)?;

    let at = Utc::now();
    if args.json {
        let stats = registry.stats();
        println!(
            "{}",
            serde_json::json!({
                "project": registry.name(),
                "total": stats.total,
                "passed": stats.passed,
                "failed": stats.failed,
                "invalid": stats.invalid(),
                "verdict": registry.outcome(),
            })
        );
    } else {
        ConsoleReport::new()
            .with_no_color(args.no_color)
            .print(&registry, at)?;
    }

    if !args.no_report {
        HtmlReport::new().write_to_file(&registry, at, &args.report);
    }

    Ok(registry.exit_code())
}
