// src/commands/inspect.rs

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use nir_codegen::{CodeGenerator, TextEmitter};
use nir_reader::File;

/// Decode each file and print its definitions as text.
pub fn inspect_files(files: &[PathBuf]) -> ExitCode {
    let mut had_error = false;

    for (i, path) in files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if inspect_single_file(path).is_err() {
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn inspect_single_file(path: &Path) -> Result<(), ()> {
    let file = match File::from_path(path) {
        Ok(file) => file,
        Err(e) => {
            let report =
                miette::Report::new(e).wrap_err(format!("could not decode '{}'", path.display()));
            crate::errors::render_to_stderr(&report);
            return Err(());
        }
    };

    // The module takes its name from the file stem.
    let module_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stdout = std::io::stdout();
    let mut emitter = TextEmitter::new(module_name, stdout.lock());
    for definition in &file.definitions {
        if let Err(e) = emitter.emit_definition(definition) {
            eprintln!("error: could not write output: {e}");
            return Err(());
        }
    }
    let _ = emitter.into_inner().flush();
    Ok(())
}
