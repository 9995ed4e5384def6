//! Optional instructions the CLI can switch on

use tapeworm_vm::{Flow, OperationRegistry, Payload, RegistryError, VmError};

/// Tag for [`square`]
pub const SQUARE_TAG: u8 = b'*';

/// `*` replaces the current cell with its square (wrapping)
pub fn square(payload: &mut Payload<'_>) -> Result<Flow, VmError> {
    let cell = payload.cell_mut()?;
    *cell = cell.wrapping_mul(*cell);
    Ok(Flow::Continue)
}

/// Register the extensions selected on the command line
pub fn install(registry: &mut OperationRegistry, square_op: bool) -> Result<(), RegistryError> {
    if square_op {
        registry.add(SQUARE_TAG, square)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_square() {
        let mut registry = OperationRegistry::new();
        install(&mut registry, false).unwrap();
        assert!(!registry.contains(SQUARE_TAG));

        install(&mut registry, true).unwrap();
        assert!(registry.contains(SQUARE_TAG));

        let program = tapeworm_vm::compile("+++*.".as_bytes(), &registry).unwrap();
        assert_eq!(tapeworm_vm::execute(&program, &registry).unwrap(), vec![9]);
    }

    #[test]
    fn test_square_wraps() {
        let mut registry = OperationRegistry::new();
        install(&mut registry, true).unwrap();
        // 256^2 = 65536 wraps to 0
        let source = format!("{}*.", "+".repeat(256));
        let program = tapeworm_vm::compile(source.as_bytes(), &registry).unwrap();
        assert_eq!(tapeworm_vm::execute(&program, &registry).unwrap(), vec![0]);
    }
}
