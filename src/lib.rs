// src/lib.rs
pub mod cli;
pub mod commands;
pub mod errors;
pub use nir_codegen as codegen;
pub use nir_core as ir;
pub use nir_reader as reader;
