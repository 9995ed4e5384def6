//! Tapeworm Virtual Machine
//!
//! This crate implements a small, extensible engine for a tape-based esoteric
//! language. Single-byte tags map to handlers that mutate a pointer into an
//! array of signed 16-bit cells; `[` and `]` form zero-test loops.
//!
//! # Architecture
//!
//! Source bytes go through the [`Compiler`], which keeps only the bytes the
//! [`OperationRegistry`] recognizes and resolves every bracket to its
//! partner's index. The [`VM`] then walks the resulting [`Program`] against
//! a fresh [`Tape`], handing a [`Payload`] to each handler and collecting
//! output bytes.
//!
//! # Modules
//!
//! - `builtins`: Operation registry and the eight built-in instructions
//! - `compiler`: Source to program compiler
//! - `program`: Compiled instruction list
//! - `tape`: Cell store
//! - `vm`: Execution loop and handler context
//! - `interpreter`: Registry + program facade
//! - `debug`: Program disassembler
//! - `sync`: Registry sharing helpers
//! - `error`: Error types
//!
//! # Example
//!
//! ```
//! use tapeworm_vm::{compile, execute, Flow, OperationRegistry};
//!
//! let mut registry = OperationRegistry::new();
//! registry
//!     .add(b'*', |p| {
//!         let cell = p.cell_mut()?;
//!         *cell = cell.wrapping_mul(*cell);
//!         Ok(Flow::Continue)
//!     })
//!     .unwrap();
//!
//! let program = compile("+++*.".as_bytes(), &registry).unwrap();
//! assert_eq!(execute(&program, &registry).unwrap(), vec![9]);
//! ```

pub mod builtins;
pub mod compiler;
pub mod debug;
pub mod error;
pub mod interpreter;
pub mod program;
pub mod sync;
pub mod tape;
pub mod vm;

// Re-export main types
pub use builtins::{Handler, OperationRegistry};
pub use compiler::{compile, Compiler};
pub use debug::disassemble;
pub use error::{CompileError, Error, RegistryError, VmError};
pub use interpreter::Interpreter;
pub use program::{Instruction, Program};
pub use tape::{Tape, DEFAULT_TAPE_LEN};
pub use vm::{execute, Flow, Payload, VmConfig, VM};
