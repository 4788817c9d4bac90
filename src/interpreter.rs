//! Direct interpreter for Brainfuck source text.
//!
//! The interpreter executes raw source bytes without a parse step. Loop
//! brackets are matched dynamically: `[` re-enters [`run_body`] for its
//! body, `]` returns a "repeat" flag one recursion level up. Call-stack
//! depth therefore equals the bracket nesting depth of the source, never
//! the iteration count.

use std::io::Read;
use std::io::Write;

use thiserror::Error;

use crate::byte_io::{read_byte, write_byte};
use crate::tape::{Tape, VecTape};
use crate::TapeAddr;
use crate::TapeError;

/// Error type for execution
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Tape pointer error (fixed tape exhausted).
    #[error("Tape error: {0}")]
    TapeError(#[from] TapeError),
    /// Io error during program execution.
    #[error("Unexpected IO Error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for ExecutionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TapeError(l0), Self::TapeError(r0)) => l0 == r0,
            (Self::IoError(l0), Self::IoError(r0)) => l0.kind() == r0.kind(),
            _ => false,
        }
    }
}

/// Run source against a caller-owned tape and pointer.
///
/// Execution ends when the instruction pointer runs off the end of the
/// source or the tape pointer goes negative. Neither is an error: the
/// latter is the silent program-halting convention of the tape model, and
/// unbalanced brackets are likewise tolerated (an unmatched `]` ends the
/// run, an unmatched `[` scans to the end of the source).
pub fn execute_on<TapeT: Tape>(
    source: &[u8],
    tape: &mut TapeT,
    tape_ptr: &mut TapeAddr,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<(), ExecutionError> {
    let mut ip: usize = 0;
    // A top-level `]` hands its repeat flag to us; there is no loop to
    // repeat, so the run just ends here.
    let _ = run_body(source, &mut ip, tape, tape_ptr, false, input, output)?;
    output.flush()?;
    Ok(())
}

/// Execute source with a fresh unbounded tape.
pub fn execute(
    source: &[u8],
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<(), ExecutionError> {
    let mut tape = VecTape::new();
    let mut tape_ptr: TapeAddr = 0.into();
    execute_on(source, &mut tape, &mut tape_ptr, input, output)
}

/// Convenience wrapper: feed a string as input, collect output as a string.
///
/// Output bytes need not be valid UTF-8; invalid sequences are replaced.
pub fn execute_str(source: &str, input: &str) -> Result<String, ExecutionError> {
    let mut input = input.as_bytes();
    let mut output: Vec<u8> = Vec::new();
    execute(source.as_bytes(), &mut input, &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Convenience wrapper: execute with the process's standard streams.
pub fn execute_stdio(source: &[u8]) -> Result<(), ExecutionError> {
    execute(
        source,
        &mut std::io::stdin().lock(),
        &mut std::io::stdout().lock(),
    )
}

/// One re-entrant pass over a loop body (or the whole program).
///
/// Returns the repeat flag produced by the `]` that ended the pass: true
/// means the enclosing loop should run its body again. Running off the end
/// of the source returns false.
///
/// When `skip` is set, effect symbols advance the instruction pointer
/// without touching the tape or the streams. Nested `[` are still entered
/// recursively so their `]` does not end the outer pass early, and each
/// nested entry re-reads the live cell to pick its own skip mode rather
/// than inheriting ours. Since skip mode performs no mutation the live
/// cell is the one that was zero at the untaken branch, but the re-read is
/// deliberate and load-bearing: it is not the same thing as counting
/// bracket depth.
fn run_body<TapeT: Tape>(
    source: &[u8],
    ip: &mut usize,
    tape: &mut TapeT,
    tape_ptr: &mut TapeAddr,
    skip: bool,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<bool, ExecutionError> {
    while !tape_ptr.is_negative() && *ip < source.len() {
        match source[*ip] {
            b'[' => {
                *ip += 1;
                let body_start = *ip;
                loop {
                    // Re-read the live cell on every entry, even when we
                    // are ourselves skipping (see the doc comment above).
                    let skip_body = tape.get(*tape_ptr)? == 0.into();
                    if !run_body(source, ip, tape, tape_ptr, skip_body, input, output)? {
                        break;
                    }
                    *ip = body_start;
                }
                // ip now rests on the matching `]` (or at the end of the
                // source for an unmatched `[`); the increment below steps
                // past it.
            }
            b']' => return Ok(tape.get(*tape_ptr)? != 0.into()),
            b'+' if !skip => tape.modify(*tape_ptr, 1.into())?,
            b'-' if !skip => tape.modify(*tape_ptr, (-1).into())?,
            b'>' if !skip => *tape_ptr += 1.into(),
            b'<' if !skip => *tape_ptr -= 1.into(),
            b'.' if !skip => write_byte(output, tape.get(*tape_ptr)?.into())?,
            b',' if !skip => {
                // We may need to flush output here if there wasn't a newline.
                output.flush()?;
                let byte = read_byte(input)?;
                tape.set(*tape_ptr, byte.into())?;
            }
            // Inert bytes, and effect symbols while skipping.
            _ => (),
        }
        *ip += 1;
    }
    Ok(false)
}
