mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Split a Go package into one file per function.
#[derive(Parser, Debug)]
#[command(name = "fsplit", version, about)]
pub struct Cli {
    /// Directory of the Go package to split
    #[arg(value_name = "PACKAGE_PATH")]
    pub package_path: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the report and all logging below errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    commands::split::run(&cli)
}
