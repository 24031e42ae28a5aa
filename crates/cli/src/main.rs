// tmerge - compare two keyed CSV tables and write a reconciliation report

mod exit_codes;
mod merge;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "tmerge")]
#[command(about = "Merge two keyed tables into a field-by-field comparison report")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Log engine decisions to stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a comparison described by a TOML config
    #[command(after_help = "\
Examples:
  tmerge run customers.merge.toml
  tmerge run customers.merge.toml --items either --columns union -o report.csv
  tmerge run customers.merge.toml --json > report.json
  tmerge run customers.merge.toml --preview 5 --values-match match")]
    Run {
        /// Path to the .merge.toml config file
        config: PathBuf,

        /// Print the JSON report document to stdout
        #[arg(long)]
        json: bool,

        /// Write the CSV report here (overrides [output].csv)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[command(flatten)]
        policy: merge::PolicyOverrides,

        /// Print an aligned report over the first N records of each input
        /// instead of writing any output
        #[arg(long, value_name = "N")]
        preview: Option<usize>,

        /// Suppress the summary on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Parse and validate a config without reading any tables
    Validate {
        /// Path to the .merge.toml config file
        config: PathBuf,
    },

    /// Show the first records of one table as the engine will see them
    Preview {
        /// CSV file to read
        file: PathBuf,

        /// Key column
        #[arg(long, short = 'k')]
        key: String,

        /// Fields to keep (comma-separated or repeated); default is every column
        #[arg(long, short = 'f')]
        fields: Vec<String>,

        /// Number of records to show
        #[arg(long, short = 'n', default_value_t = 10)]
        rows: usize,
    },

    /// List every policy option with its index
    Options,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: tmerge <command> [options]");
            eprintln!("       tmerge --help for more information");
            Ok(())
        }
        Some(Commands::Run {
            config,
            json,
            output,
            policy,
            preview,
            quiet,
        }) => merge::cmd_run(config, json, output, policy, preview, quiet),
        Some(Commands::Validate { config }) => merge::cmd_validate(config),
        Some(Commands::Preview {
            file,
            key,
            fields,
            rows,
        }) => merge::cmd_preview(file, key, fields, rows),
        Some(Commands::Options) => merge::cmd_options(),
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
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
