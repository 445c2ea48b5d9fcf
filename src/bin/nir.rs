// src/bin/nir.rs

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use nir::cli::{Cli, Commands};
use nir::commands::check::check_files;
use nir::commands::inspect::inspect_files;
use nir::commands::version::print_version;

fn main() -> ExitCode {
    // Initialize tracing if NIR_LOG is set.
    if let Ok(filter) = EnvFilter::try_from_env("NIR_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { files } => inspect_files(&files),
        Commands::Check { files } => check_files(&files),
        Commands::Version => print_version(),
    }
}
