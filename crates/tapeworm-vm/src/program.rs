//! Compiled program representation
//!
//! A program is a flat list of instructions addressed by index. Bracket
//! instructions carry the index of their partner in `operand`; every other
//! instruction leaves it at zero.

use serde::Serialize;
use std::ops::Index;

/// Tag of the loop-open instruction
pub const OPEN_BRACKET: u8 = b'[';

/// Tag of the loop-close instruction
pub const CLOSE_BRACKET: u8 = b']';

/// One compiled instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Instruction {
    /// Tag the instruction was compiled from
    pub operator: u8,
    /// Resolved partner index for brackets, zero otherwise
    pub operand: u32,
}

impl Instruction {
    /// Instruction with no operand
    pub const fn new(operator: u8) -> Self {
        Self {
            operator,
            operand: 0,
        }
    }

    /// Instruction with an explicit operand
    pub const fn with_operand(operator: u8, operand: u32) -> Self {
        Self { operator, operand }
    }

    #[inline]
    pub fn is_bracket(&self) -> bool {
        self.operator == OPEN_BRACKET || self.operator == CLOSE_BRACKET
    }

    /// Operand as a program index
    #[inline]
    pub fn target(&self) -> usize {
        self.operand as usize
    }
}

/// Immutable compiled program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub(crate) fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Number of `[`/`]` pairs
    pub fn bracket_pairs(&self) -> usize {
        self.instructions
            .iter()
            .filter(|inst| inst.operator == OPEN_BRACKET)
            .count()
    }
}

impl Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Instruction {
        &self.instructions[index]
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
