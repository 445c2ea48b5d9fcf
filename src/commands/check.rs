// src/commands/check.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use nir_reader::File;

/// Decode each file and report a one-line summary, without printing the
/// definitions themselves.
pub fn check_files(files: &[PathBuf]) -> ExitCode {
    let mut had_error = false;

    for path in files {
        if check_single_file(path).is_err() {
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn check_single_file(path: &Path) -> Result<(), ()> {
    match File::from_path(path) {
        Ok(file) => {
            println!(
                "ok {}: {} definitions (format {}.{})",
                path.display(),
                file.definitions.len(),
                file.header.compatibility_level,
                file.header.revision,
            );
            Ok(())
        }
        Err(e) => {
            let report =
                miette::Report::new(e).wrap_err(format!("could not decode '{}'", path.display()));
            crate::errors::render_to_stderr(&report);
            Err(())
        }
    }
}
