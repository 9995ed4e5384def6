//! Program debugging utilities

use crate::program::{Instruction, Program};
use std::fmt::Write;

/// Render a compiled program as one line per instruction
///
/// Brackets show the index of their partner.
pub fn disassemble(program: &Program) -> String {
    let mut out = String::new();
    for (index, instruction) in program.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{:04}  {}", index, describe(instruction));
    }
    out
}

fn describe(instruction: &Instruction) -> String {
    let tag = char::from(instruction.operator);
    let tag = if tag.is_ascii_graphic() {
        tag.to_string()
    } else {
        format!("0x{:02x}", instruction.operator)
    };

    if instruction.is_bracket() {
        format!("{}  -> {:04}", tag, instruction.operand)
    } else {
        tag
    }
}
