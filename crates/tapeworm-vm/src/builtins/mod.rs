//! Built-in instructions
//!
//! The eight canonical instructions, installed into every registry created
//! with [`OperationRegistry::new`].

pub mod registry;

pub use registry::{Handler, OperationRegistry};

use crate::error::VmError;
use crate::program::{CLOSE_BRACKET, OPEN_BRACKET};
use crate::vm::{Flow, Payload};

type BuiltinFn = fn(&mut Payload<'_>) -> Result<Flow, VmError>;

/// Tags and handlers seeded into [`OperationRegistry::new`]
pub(crate) const BUILTINS: [(u8, BuiltinFn); 8] = [
    (b'>', increment_pointer),
    (b'<', decrement_pointer),
    (b'+', increment_cell),
    (b'-', decrement_cell),
    (b'.', output_cell),
    (b',', input_cell),
    (OPEN_BRACKET, loop_open),
    (CLOSE_BRACKET, loop_close),
];

/// `>`
pub fn increment_pointer(payload: &mut Payload<'_>) -> Result<Flow, VmError> {
    payload.move_pointer(1);
    Ok(Flow::Continue)
}

/// `<`
pub fn decrement_pointer(payload: &mut Payload<'_>) -> Result<Flow, VmError> {
    payload.move_pointer(-1);
    Ok(Flow::Continue)
}

/// `+`
pub fn increment_cell(payload: &mut Payload<'_>) -> Result<Flow, VmError> {
    let cell = payload.cell_mut()?;
    *cell = cell.wrapping_add(1);
    Ok(Flow::Continue)
}

/// `-`
pub fn decrement_cell(payload: &mut Payload<'_>) -> Result<Flow, VmError> {
    let cell = payload.cell_mut()?;
    *cell = cell.wrapping_sub(1);
    Ok(Flow::Continue)
}

/// `.` emits the low 8 bits of the current cell
pub fn output_cell(payload: &mut Payload<'_>) -> Result<Flow, VmError> {
    let value = payload.cell()?;
    payload.emit(value as u8);
    Ok(Flow::Continue)
}

/// `,` stores one input byte; end of input leaves the cell untouched
pub fn input_cell(payload: &mut Payload<'_>) -> Result<Flow, VmError> {
    // Validate the pointer before consuming input
    payload.cell()?;
    if let Some(byte) = payload.read_byte() {
        payload.set_cell(i16::from(byte))?;
    }
    Ok(Flow::Continue)
}

/// `[` skips to its partner when the current cell is zero
pub fn loop_open(payload: &mut Payload<'_>) -> Result<Flow, VmError> {
    if payload.cell()? == 0 {
        return Ok(Flow::Jump(payload.instruction().target()));
    }
    Ok(Flow::Continue)
}

/// `]` returns to its partner while the current cell is strictly positive
///
/// A negative cell falls through, unlike `[` which treats any non-zero
/// value as "enter".
pub fn loop_close(payload: &mut Payload<'_>) -> Result<Flow, VmError> {
    if payload.cell()? > 0 {
        return Ok(Flow::Jump(payload.instruction().target()));
    }
    Ok(Flow::Continue)
}
