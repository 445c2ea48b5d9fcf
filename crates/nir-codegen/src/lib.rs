// lib.rs
//
// The seam between the reader and a back end: a generator is bound to a
// module name and consumes definitions one by one. The textual emitter is
// the one back end shipped here; it renders definitions in the textual
// syntax and backs the driver's `inspect` command.

use std::io::{self, Write};

use tracing::debug;

use nir_core::{Definition, Instruction, Next};

/// Code generation from IR definitions to some back end.
pub trait CodeGenerator {
    /// The name of the module being constructed.
    fn module_name(&self) -> &str;

    /// Generates output for the given definition.
    fn emit_definition(&mut self, definition: &Definition) -> io::Result<()>;
}

/// A generator rendering definitions as text.
pub struct TextEmitter<W: Write> {
    module_name: String,
    out: W,
}

impl<W: Write> TextEmitter<W> {
    /// Creates an instance writing the module named `module_name` to `out`.
    pub fn new(module_name: impl Into<String>, out: W) -> Self {
        Self {
            module_name: module_name.into(),
            out,
        }
    }

    /// Consumes this emitter, returning its output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_instruction(&mut self, instruction: &Instruction) -> io::Result<()> {
        match instruction {
            Instruction::Label { id, parameters, .. } => {
                write!(self.out, "{id}(")?;
                for (i, p) in parameters.iter().enumerate() {
                    if i > 0 {
                        write!(self.out, ", ")?;
                    }
                    write!(self.out, "{p}")?;
                }
                writeln!(self.out, "):")
            }
            Instruction::Let {
                id,
                operation,
                next,
                ..
            } => {
                write!(self.out, "  {id} = {operation}")?;
                if !next.is_none() {
                    write!(self.out, " ~ {next}")?;
                }
                writeln!(self.out)
            }
            Instruction::Return { value, .. } => writeln!(self.out, "  ret {value}"),
            Instruction::Jump { target, .. } => writeln!(self.out, "  jump {target}"),
            Instruction::If {
                condition,
                success,
                failure,
                ..
            } => writeln!(self.out, "  if {condition} then {success} else {failure}"),
            Instruction::Switch { value, targets, .. } => {
                writeln!(self.out, "  switch {value} {{")?;
                // The first target is the default case.
                for (i, target) in targets.iter().enumerate() {
                    if i == 0 {
                        writeln!(self.out, "    default => {target}")?;
                    } else {
                        writeln!(self.out, "    {target}")?;
                    }
                }
                writeln!(self.out, "  }}")
            }
            Instruction::Throw {
                exception, unwind, ..
            } => {
                write!(self.out, "  throw {exception}")?;
                if !unwind.is_none() {
                    write!(self.out, " ~ {unwind}")?;
                }
                writeln!(self.out)
            }
            Instruction::Unreachable { unwind, .. } => {
                write!(self.out, "  unreachable")?;
                if !unwind.is_none() {
                    write!(self.out, " ~ {unwind}")?;
                }
                writeln!(self.out)
            }
            Instruction::LinktimeJump {
                condition,
                success,
                failure,
                ..
            } => writeln!(
                self.out,
                "  linktime if {condition} then {success} else {failure}"
            ),
        }
    }

    fn write_extends(&mut self, parent: Option<&nir_core::Top>, traits: &[nir_core::Top]) -> io::Result<()> {
        if let Some(parent) = parent {
            write!(self.out, " extends {parent}")?;
        }
        for (i, t) in traits.iter().enumerate() {
            if i == 0 {
                write!(self.out, " with {t}")?;
            } else {
                write!(self.out, ", {t}")?;
            }
        }
        Ok(())
    }

    fn write_attributes(&mut self, definition: &Definition) -> io::Result<()> {
        let attributes = definition.attributes();
        if !attributes.is_empty() {
            writeln!(self.out, "@[{attributes}]")?;
        }
        Ok(())
    }
}

impl<W: Write> CodeGenerator for TextEmitter<W> {
    fn module_name(&self) -> &str {
        &self.module_name
    }

    fn emit_definition(&mut self, definition: &Definition) -> io::Result<()> {
        debug!(name = %definition.name(), "emitting definition");
        self.write_attributes(definition)?;
        match definition {
            Definition::Binding {
                name,
                ty,
                initializer,
                constant,
                ..
            } => {
                let keyword = if *constant { "const" } else { "var" };
                writeln!(self.out, "{keyword} @{name} : {ty} = {initializer}")
            }
            Definition::Forward { name, ty, .. } => {
                writeln!(self.out, "decl @{name} : {ty}")
            }
            Definition::Method {
                name,
                ty,
                instructions,
                ..
            } => {
                writeln!(self.out, "def @{name} : {ty} {{")?;
                for instruction in instructions {
                    self.write_instruction(instruction)?;
                }
                writeln!(self.out, "}}")
            }
            Definition::Trait { name, bases, .. } => {
                write!(self.out, "trait {name}")?;
                for (i, base) in bases.iter().enumerate() {
                    if i == 0 {
                        write!(self.out, " : {base}")?;
                    } else {
                        write!(self.out, ", {base}")?;
                    }
                }
                writeln!(self.out)
            }
            Definition::Class {
                name,
                parent,
                traits,
                ..
            } => {
                write!(self.out, "class {name}")?;
                self.write_extends(parent.as_ref(), traits)?;
                writeln!(self.out)
            }
            Definition::Module {
                name,
                parent,
                traits,
                ..
            } => {
                write!(self.out, "module {name}")?;
                self.write_extends(parent.as_ref(), traits)?;
                writeln!(self.out)
            }
        }
    }
}
