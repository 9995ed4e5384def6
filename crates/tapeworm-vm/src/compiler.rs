//! Source to program compiler
//!
//! A single pass over the source bytes. Bytes with no registered handler are
//! comments and take up no program slot. Brackets are paired with an explicit
//! stack: a `[` is emitted with a zero operand and patched with its partner's
//! index once the matching `]` turns up.

use crate::builtins::OperationRegistry;
use crate::error::CompileError;
use crate::program::{Instruction, Program, CLOSE_BRACKET, OPEN_BRACKET};
use std::io::Read;
use tracing::debug;

/// Pending `[`: program index and source offset
#[derive(Debug, Clone, Copy)]
struct OpenBracket {
    index: u32,
    offset: usize,
}

/// Program compiler bound to a registry
///
/// The registry decides which bytes are recognized; it is only read.
pub struct Compiler<'r> {
    registry: &'r OperationRegistry,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r OperationRegistry) -> Self {
        Self { registry }
    }

    /// Read `source` to the end and compile it
    pub fn compile<R: Read>(&self, mut source: R) -> Result<Program, CompileError> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        self.compile_bytes(&bytes)
    }

    /// Compile an in-memory source
    pub fn compile_bytes(&self, source: &[u8]) -> Result<Program, CompileError> {
        let mut instructions: Vec<Instruction> = Vec::new();
        let mut pending: Vec<OpenBracket> = Vec::new();

        for (offset, &byte) in source.iter().enumerate() {
            if !self.registry.contains(byte) {
                continue;
            }

            let index =
                u32::try_from(instructions.len()).map_err(|_| CompileError::ProgramTooLarge)?;

            match byte {
                OPEN_BRACKET => {
                    instructions.push(Instruction::new(byte));
                    pending.push(OpenBracket { index, offset });
                }
                CLOSE_BRACKET => {
                    let open = pending
                        .pop()
                        .ok_or(CompileError::UnmatchedClose { offset })?;
                    instructions.push(Instruction::with_operand(byte, open.index));
                    instructions[open.index as usize].operand = index;
                }
                _ => instructions.push(Instruction::new(byte)),
            }
        }

        if let Some(open) = pending.last() {
            return Err(CompileError::UnmatchedOpen {
                offset: open.offset,
            });
        }

        let program = Program::from_instructions(instructions);
        debug!(
            source_len = source.len(),
            instructions = program.len(),
            bracket_pairs = program.bracket_pairs(),
            "compiled program"
        );
        Ok(program)
    }
}

/// Compile `source` under `registry`
pub fn compile<R: Read>(source: R, registry: &OperationRegistry) -> Result<Program, CompileError> {
    Compiler::new(registry).compile(source)
}
