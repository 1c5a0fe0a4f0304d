// crosscheck CLI - Shipment / RW / CSP presence cross-check, headless

mod commands;
mod exit_codes;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_IO, EXIT_SCHEMA, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "crosscheck")]
#[command(about = "Cross-check product/destination pairs across Shipment, RW and CSP exports")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the cross-check report workbook
    #[command(after_help = "\
Rows missing from Shipment sort first and are highlighted in the workbook.
Missing rows are reported, not treated as failure: exit 0 means the report was written.

Examples:
  crosscheck run --shipment shipment.xlsx --rw rw.xlsx --csp csp.csv
  crosscheck run --config crosscheck.toml -o out/report.xlsx
  crosscheck run --config crosscheck.toml --csp today_csp.xlsx --preview 10
  crosscheck run --config crosscheck.toml --json | jq .summary")]
    Run {
        /// TOML config (source files, column positions, keywords, output styling)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Shipment export (overrides [sources.shipment] file)
        #[arg(long)]
        shipment: Option<PathBuf>,

        /// RW export (overrides [sources.rw] file)
        #[arg(long)]
        rw: Option<PathBuf>,

        /// CSP export (overrides [sources.csp] file)
        #[arg(long)]
        csp: Option<PathBuf>,

        /// Report workbook to write
        #[arg(long, short = 'o', default_value = commands::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Print the full result as JSON on stdout
        #[arg(long, conflicts_with = "preview")]
        json: bool,

        /// Print the first N report rows as a text table on stdout
        #[arg(long, value_name = "N")]
        preview: Option<usize>,

        /// Suppress the summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Validate a config file without reading any sources
    #[command(after_help = "\
Examples:
  crosscheck validate crosscheck.toml")]
    Validate {
        /// Path to the TOML config
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Run { config, shipment, rw, csp, output, json, preview, quiet } => {
            commands::cmd_run(commands::RunArgs {
                config,
                shipment,
                rw,
                csp,
                output,
                json,
                preview,
                quiet,
            })
        }
        Commands::Validate { config } => commands::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SCHEMA, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
