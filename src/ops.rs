//! The op tree the compiled path executes.

/// One primitive operation.
///
/// Each op corresponds to exactly one source symbol; a loop owns its body
/// as a subtree, so bracket matching is resolved once at build time and
/// never searched for again at run time.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Op {
    /// Increment the current cell (wrapping).
    Incr,
    /// Decrement the current cell (wrapping).
    Decr,
    /// Move the pointer one cell left.
    Left,
    /// Move the pointer one cell right.
    Right,
    /// Write the current cell to the output sink.
    Output,
    /// Read one input byte into the current cell (EOF reads as 255).
    Input,
    /// Repeat the body while the current cell is non-zero.
    Loop(Vec<Op>),
}
