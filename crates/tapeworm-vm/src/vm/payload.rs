//! Execution context handed to every handler

use crate::error::VmError;
use crate::program::Instruction;
use crate::tape::Tape;
use std::io::{ErrorKind, Read};
use tracing::warn;

/// Mutable state threaded through one execution
///
/// Handlers see the tape, the current instruction and its index, the output
/// accumulated so far, and the input provider. The instruction cursor is
/// read-only here: handlers redirect control flow by returning
/// [`Flow::Jump`](crate::vm::Flow::Jump).
pub struct Payload<'a> {
    tape: Tape,
    cursor: usize,
    instruction: Instruction,
    output: Vec<u8>,
    input: &'a mut dyn Read,
}

impl<'a> Payload<'a> {
    pub fn new(tape: Tape, input: &'a mut dyn Read) -> Self {
        Self {
            tape,
            cursor: 0,
            instruction: Instruction::new(0),
            output: Vec::new(),
            input,
        }
    }

    /// Refresh the per-iteration fields before a dispatch
    #[inline]
    pub(crate) fn load(&mut self, cursor: usize, instruction: Instruction) {
        self.cursor = cursor;
        self.instruction = instruction;
    }

    // ===== Tape access =====

    #[inline]
    pub fn pointer(&self) -> u16 {
        self.tape.pointer()
    }

    #[inline]
    pub fn set_pointer(&mut self, pointer: u16) {
        self.tape.set_pointer(pointer);
    }

    #[inline]
    pub fn move_pointer(&mut self, delta: i16) {
        self.tape.move_pointer(delta);
    }

    #[inline]
    pub fn cell(&self) -> Result<i16, VmError> {
        self.tape.cell()
    }

    #[inline]
    pub fn set_cell(&mut self, value: i16) -> Result<(), VmError> {
        self.tape.set_cell(value)
    }

    #[inline]
    pub fn cell_mut(&mut self) -> Result<&mut i16, VmError> {
        self.tape.cell_mut()
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    // ===== Control state =====

    /// Index of the instruction being executed
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn instruction(&self) -> Instruction {
        self.instruction
    }

    // ===== I/O =====

    /// Append a byte to the output buffer
    #[inline]
    pub fn emit(&mut self, byte: u8) {
        self.output.push(byte);
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Read exactly one byte from the input provider
    ///
    /// Returns `None` at end of input or when the read fails.
    pub fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return None,
                Ok(_) => return Some(buf[0]),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    warn!(error = %err, "input read failed");
                    return None;
                }
            }
        }
    }

    pub(crate) fn into_output(self) -> Vec<u8> {
        self.output
    }
}
