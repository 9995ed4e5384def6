//! Handler results

/// What the executor does after a handler returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Continue to the next instruction
    Continue,
    /// Land on instruction K; the loop then steps past it, so execution
    /// resumes at K + 1
    Jump(usize),
}
