// src/commands/version.rs

use std::process::ExitCode;

/// The version string shown by `nir version` and `nir --version`.
pub fn version_string() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn print_version() -> ExitCode {
    println!("nir {}", version_string());
    ExitCode::SUCCESS
}
