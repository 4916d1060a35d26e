mod commands;
mod output;
mod source;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use commands::generate::{GenerateOptions, Outcome};
use meetcal_core::OutputFormat;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Exit status after Ctrl-C
const INTERRUPTED_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(name = "meetcal", version)]
#[command(about = "Generate an iCalendar feed or a JSON summary from semicolon-separated meeting lists")]
struct Cli {
    /// Check the syntax of the input and write nothing
    #[arg(short, long, conflicts_with = "format")]
    check: bool,

    /// Output format: ics or json
    #[arg(short, long, default_value = "ics")]
    format: OutputFormat,

    /// File or directory of *.csv files to read (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// File to write (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: ~/.config/meetcal/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave out events that started more than this many days ago
    #[arg(long)]
    cutoff_days: Option<u32>,

    /// Number of events in the JSON summary
    #[arg(long)]
    limit: Option<usize>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(Some(code)) => code,
        Ok(None) => {
            eprintln!("Interrupted, nothing written");
            // The blocking reader may still be waiting on stdin, so don't
            // wait for the runtime to shut down.
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `None` when the run was interrupted.
async fn run(cli: Cli) -> Result<Option<ExitCode>> {
    if cli.check {
        return commands::check::run(cli.input.as_deref()).map(Some);
    }

    let config = commands::load_config(cli.config.as_deref(), cli.cutoff_days, cli.limit)?;

    let outcome = commands::generate::run(GenerateOptions {
        input: cli.input,
        output: cli.output,
        format: cli.format,
        config,
    })
    .await?;

    match outcome {
        Outcome::Written => Ok(Some(ExitCode::SUCCESS)),
        Outcome::Interrupted => Ok(None),
    }
}
