// src/errors/mod.rs
//! Error types surfaced by the driver, and their rendering.

pub use nir_core::TypeError;
pub use nir_reader::{DecodeError, FileError};

/// Renders a diagnostic report to stderr.
pub fn render_to_stderr(report: &miette::Report) {
    eprintln!("{report:?}");
}
