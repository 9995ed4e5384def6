//! Cell store
//!
//! The tape is a fixed array of signed 16-bit cells with a 16-bit pointer.
//! Pointer and cell arithmetic both wrap; only touching a cell past the end
//! of the tape is an error.

use crate::error::VmError;

/// Canonical number of cells
pub const DEFAULT_TAPE_LEN: usize = 32000;

/// Zero-initialized cell array plus the cell pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<i16>,
    pointer: u16,
}

impl Tape {
    /// Create a zeroed tape of `len` cells with the pointer at 0
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![0; len],
            pointer: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn pointer(&self) -> u16 {
        self.pointer
    }

    #[inline]
    pub fn set_pointer(&mut self, pointer: u16) {
        self.pointer = pointer;
    }

    /// Move the pointer by `delta`, wrapping at 16 bits
    #[inline]
    pub fn move_pointer(&mut self, delta: i16) {
        self.pointer = self.pointer.wrapping_add_signed(delta);
    }

    /// Value of the cell under the pointer
    #[inline]
    pub fn cell(&self) -> Result<i16, VmError> {
        self.get(self.pointer)
    }

    #[inline]
    pub fn set_cell(&mut self, value: i16) -> Result<(), VmError> {
        *self.cell_mut()? = value;
        Ok(())
    }

    pub fn cell_mut(&mut self) -> Result<&mut i16, VmError> {
        let len = self.cells.len();
        let pointer = self.pointer;
        self.cells
            .get_mut(pointer as usize)
            .ok_or(VmError::CellOutOfBounds { pointer, len })
    }

    /// Value of the cell at an arbitrary address
    pub fn get(&self, address: u16) -> Result<i16, VmError> {
        self.cells
            .get(address as usize)
            .copied()
            .ok_or(VmError::CellOutOfBounds {
                pointer: address,
                len: self.cells.len(),
            })
    }

    pub fn cells(&self) -> &[i16] {
        &self.cells
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(DEFAULT_TAPE_LEN)
    }
}
