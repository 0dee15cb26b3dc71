//! Scenario Runner CLI
//!
//! Drives the tick pipeline from a scripted scenario JSON file.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tp_cli")]
#[command(about = "Run tick-pipeline scenarios from JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file and print or save the response
    Run {
        /// Input scenario JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output response JSON file path (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print a per-scenario summary after the run
        #[arg(long, default_value = "false")]
        summary: bool,
    },

    /// Parse a scenario file without running it
    Validate {
        /// Input scenario JSON file path
        #[arg(long)]
        r#in: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { r#in, out, summary } => {
            let response = tp_cli::run_scenario_file(&r#in)?;

            match out {
                Some(path) => {
                    std::fs::write(&path, &response)?;
                    println!("✅ Response saved to: {}", path.display());
                }
                None => println!("{response}"),
            }

            if summary {
                print_summary(&tp_cli::summarize(&response)?);
            }
        }

        Commands::Validate { r#in } => {
            let ticks = tp_cli::validate_scenario_file(&r#in)?;
            println!("✅ Valid scenario: {ticks} tick(s)");
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(summary: &tp_cli::ScenarioSummary) {
    println!("\nScenario summary");
    println!("   Ticks:          {}", summary.ticks);
    println!("   Staged commits: {}", summary.staged_commits);
    println!("   Shifted sends:  {}", summary.shifted_sends);
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("tp_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
