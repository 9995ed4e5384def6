//! Virtual Machine implementation

use crate::builtins::OperationRegistry;
use crate::error::VmError;
use crate::program::Program;
use crate::tape::{Tape, DEFAULT_TAPE_LEN};
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

// Module structure
mod payload;
mod result;

// Re-export public types
pub use payload::Payload;
pub use result::Flow;

/// VM settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Number of cells allocated for each run
    pub tape_len: usize,
    /// Maximum number of dispatched instructions, `None` for unbounded
    pub max_steps: Option<u64>,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            tape_len: DEFAULT_TAPE_LEN,
            max_steps: None,
        }
    }
}

/// Virtual Machine
///
/// Each call to [`VM::execute`] starts from a fresh tape; nothing carries over
/// between runs except the input provider.
pub struct VM {
    config: VmConfig,

    /// Byte source for the `,` instruction
    input: Box<dyn Read>,

    /// Checked once per dispatched instruction
    cancel: Option<Arc<AtomicBool>>,
}

impl VM {
    /// Create a VM with the default configuration reading from stdin
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        Self {
            config,
            input: Box::new(std::io::stdin()),
            cancel: None,
        }
    }

    /// Replace the input provider
    pub fn with_input<R: Read + 'static>(mut self, input: R) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Stop with [`VmError::Cancelled`] once `flag` is raised
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    /// Run `program`, dispatching each instruction through `registry`
    ///
    /// Returns the output produced once the cursor runs past the last
    /// instruction. On error the partial output is discarded.
    pub fn execute(
        &mut self,
        program: &Program,
        registry: &OperationRegistry,
    ) -> Result<Vec<u8>, VmError> {
        let mut payload = Payload::new(Tape::new(self.config.tape_len), &mut *self.input);
        let mut pc: usize = 0;
        let mut steps: u64 = 0;

        while let Some(&instruction) = program.get(pc) {
            if let Some(flag) = &self.cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(VmError::Cancelled);
                }
            }
            if let Some(limit) = self.config.max_steps {
                if steps >= limit {
                    return Err(VmError::StepLimitExceeded(limit));
                }
            }

            let handler = registry
                .get(instruction.operator)
                .ok_or(VmError::InvalidOperation {
                    tag: instruction.operator,
                    index: pc,
                })?;

            payload.load(pc, instruction);
            trace!(pc, op = %char::from(instruction.operator), "dispatch");

            if let Flow::Jump(target) = handler(&mut payload)? {
                pc = target;
            }
            pc = pc.saturating_add(1);
            steps += 1;
        }

        debug!(steps, output_len = payload.output().len(), "execution finished");
        Ok(payload.into_output())
    }
}

impl Default for VM {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `program` on a fresh default VM with an empty input provider
pub fn execute(program: &Program, registry: &OperationRegistry) -> Result<Vec<u8>, VmError> {
    VM::new().with_input(std::io::empty()).execute(program, registry)
}
