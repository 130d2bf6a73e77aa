//! keyledger CLI
//!
//! Inventory of KMS keys and Secrets Manager secrets.

use clap::Parser;
use kl_cli_common::{format_number, init_logging};
use std::process::ExitCode;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    // Logs go to stderr; stdout carries only the report
    if let Err(e) = init_logging(args.log_level) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    let summary = match run::execute(args).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let stats = &summary.stats;
    let plural = summary.kind.plural().to_lowercase();

    if let Some(export) = &summary.export {
        eprintln!(
            "Wrote {} {} to {}",
            format_number(export.rows as u64),
            plural,
            export.path.display()
        );
    }

    eprintln!();
    eprintln!("Inventory completed:");
    eprintln!("  Listed:         {}", format_number(stats.listed as u64));
    eprintln!("  Active:         {}", format_number(stats.active as u64));
    eprintln!("  Not Authorized: {}", format_number(stats.not_authorized as u64));
    eprintln!("  Inactive:       {}", format_number(stats.inactive as u64));
    eprintln!("  Errors:         {}", format_number(stats.errors as u64));

    if let Some(duration) = stats.duration() {
        eprintln!(
            "  Duration:       {:.2}s",
            duration.num_milliseconds() as f64 / 1000.0
        );

        if let Some(rate) = stats.resources_per_second() {
            eprintln!("  Throughput:     {:.1} {}/sec", rate, plural);
        }
    }

    ExitCode::SUCCESS
}
