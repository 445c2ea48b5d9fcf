// src/cli/args.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::version::version_string;

/// NIR module reader and inspection tools
#[derive(Parser)]
#[command(name = "nir")]
#[command(version = version_string())]
#[command(about = "Read and inspect serialized NIR modules", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode files and print their definitions as text
    #[command(visible_alias = "i")]
    Inspect {
        /// Paths of the files to inspect
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },
    /// Decode files and report a one-line summary per file
    #[command(visible_alias = "c")]
    Check {
        /// Paths of the files to check
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,
    },
    /// Show version information
    Version,
}
