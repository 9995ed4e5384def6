//! One-stop interpreter
//!
//! Owns a registry and the most recently compiled program. Compile and
//! execute read the registry under a shared lock; adding or removing
//! operations takes the exclusive lock.

use crate::builtins::OperationRegistry;
use crate::compiler::Compiler;
use crate::error::{CompileError, Error, RegistryError, VmError};
use crate::program::Program;
use crate::sync::{self, SharedRegistry};
use crate::vm::{Flow, Payload, VmConfig, VM};
use std::io::Read;
use tracing::info;

/// Registry plus compiled program
pub struct Interpreter {
    registry: SharedRegistry,
    program: Option<Program>,
    vm: VM,
}

impl Interpreter {
    /// Interpreter with the built-in instructions, reading input from stdin
    pub fn new() -> Self {
        Self::with_vm(VM::new())
    }

    pub fn with_config(config: VmConfig) -> Self {
        Self::with_vm(VM::with_config(config))
    }

    /// Interpreter executing on a preconfigured VM
    pub fn with_vm(vm: VM) -> Self {
        Self {
            registry: sync::shared(OperationRegistry::new()),
            program: None,
            vm,
        }
    }

    /// Register a new instruction
    pub fn add_operation<F>(&mut self, tag: u8, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(&mut Payload<'_>) -> Result<Flow, VmError> + Send + Sync + 'static,
    {
        self.registry.write().add(tag, handler)?;
        info!(tag = %char::from(tag), "operation added");
        Ok(())
    }

    /// Unregister an instruction
    pub fn remove_operation(&mut self, tag: u8) -> Result<(), RegistryError> {
        self.registry.write().remove(tag)?;
        info!(tag = %char::from(tag), "operation removed");
        Ok(())
    }

    /// Compile `source` and keep the result for [`Interpreter::execute`]
    ///
    /// Any previously compiled program is dropped, including when
    /// compilation fails.
    pub fn interpret<R: Read>(&mut self, source: R) -> Result<&Program, CompileError> {
        self.program = None;
        let program = {
            let registry = self.registry.read();
            Compiler::new(&registry).compile(source)?
        };
        Ok(self.program.insert(program))
    }

    /// Run the compiled program
    ///
    /// With no program compiled the output is empty.
    pub fn execute(&mut self) -> Result<Vec<u8>, VmError> {
        let Some(program) = &self.program else {
            return Ok(Vec::new());
        };
        let registry = self.registry.read();
        self.vm.execute(program, &registry)
    }

    /// Compile `source` and run it straight away
    pub fn run<R: Read>(&mut self, source: R) -> Result<Vec<u8>, Error> {
        self.interpret(source)?;
        Ok(self.execute()?)
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    /// Handle to the registry shared with this interpreter
    pub fn registry(&self) -> SharedRegistry {
        SharedRegistry::clone(&self.registry)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Interpreter {
        Interpreter::with_vm(VM::new().with_input(std::io::empty()))
    }

    #[test]
    fn test_interpret_then_execute() {
        let mut inter = quiet();
        inter.interpret("+++.".as_bytes()).unwrap();
        assert_eq!(inter.execute().unwrap(), vec![3]);
    }

    #[test]
    fn test_failed_compile_drops_program() {
        let mut inter = quiet();
        inter.interpret("+.".as_bytes()).unwrap();
        assert!(inter.program().is_some());

        assert!(inter.interpret("[[]".as_bytes()).is_err());
        assert!(inter.program().is_none());
        assert_eq!(inter.execute().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_remove_between_compile_and_execute() {
        let mut inter = quiet();
        inter.interpret("+.".as_bytes()).unwrap();
        inter.remove_operation(b'.').unwrap();
        assert_eq!(
            inter.execute(),
            Err(VmError::InvalidOperation { tag: b'.', index: 1 })
        );
    }

    #[test]
    fn test_run_reports_each_phase() {
        let mut inter = quiet();
        assert!(matches!(
            inter.run("]".as_bytes()),
            Err(Error::Compile(CompileError::UnmatchedClose { offset: 0 }))
        ));
        assert!(matches!(
            inter.run("<.".as_bytes()),
            Err(Error::Vm(VmError::CellOutOfBounds { .. }))
        ));
        assert_eq!(inter.run("++.".as_bytes()).unwrap(), vec![2]);
    }

    #[test]
    fn test_registry_handle_is_shared() {
        let mut inter = quiet();
        inter.add_operation(b'!', |_| Ok(Flow::Continue)).unwrap();
        assert!(inter.registry().read().contains(b'!'));
    }
}
