//! Error types for the registry, compiler and VM

use thiserror::Error;

fn tag_char(tag: &u8) -> char {
    *tag as char
}

/// Registry mutation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Tag already has a handler
    #[error("duplicate operation: '{}'", tag_char(.0))]
    DuplicateOperation(u8),

    /// Tag has no handler to remove
    #[error("unknown operation: '{}'", tag_char(.0))]
    UnknownOperation(u8),
}

/// Compiler errors
///
/// Any of these discards the program being built.
#[derive(Debug, Error)]
pub enum CompileError {
    /// `]` with no pending `[`
    #[error("compilation error: unmatched close bracket at byte {offset}")]
    UnmatchedClose { offset: usize },

    /// `[` still pending at end of input
    #[error("compilation error: unmatched open bracket at byte {offset}")]
    UnmatchedOpen { offset: usize },

    /// Instruction index does not fit in an operand
    #[error("compilation error: program too large (max {} instructions)", u32::MAX)]
    ProgramTooLarge,

    /// Reading the source failed
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// True for the two bracket-nesting failures
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CompileError::UnmatchedClose { .. } | CompileError::UnmatchedOpen { .. }
        )
    }
}

/// VM runtime errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// Compiled tag has no handler in the registry used for execution
    #[error("invalid operation '{}' at instruction {index}", tag_char(.tag))]
    InvalidOperation { tag: u8, index: usize },

    /// Cell access past the end of the tape
    #[error("cell pointer {pointer} out of bounds (tape has {len} cells)")]
    CellOutOfBounds { pointer: u16, len: usize },

    /// Configured step budget exhausted
    #[error("step limit of {0} instructions exceeded")]
    StepLimitExceeded(u64),

    /// Cancellation flag was raised
    #[error("execution cancelled")]
    Cancelled,
}

/// Any error surfaced by the interpreter facade
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Vm(#[from] VmError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_tag() {
        assert_eq!(
            RegistryError::DuplicateOperation(b'+').to_string(),
            "duplicate operation: '+'"
        );
        assert_eq!(
            VmError::InvalidOperation { tag: b'*', index: 3 }.to_string(),
            "invalid operation '*' at instruction 3"
        );
    }

    #[test]
    fn test_structural_errors() {
        assert!(CompileError::UnmatchedClose { offset: 2 }.is_structural());
        assert!(CompileError::UnmatchedOpen { offset: 0 }.is_structural());
        assert!(!CompileError::ProgramTooLarge.is_structural());
        assert!(CompileError::UnmatchedClose { offset: 2 }
            .to_string()
            .contains("unmatched close"));
    }
}
