//! # brainspin - A Brainfuck interpreter and ahead-of-time compiler
//!
//! Two execution strategies with identical observable behaviour:
//!
//! * [`execute`] interprets raw source text directly, matching loop
//!   brackets dynamically against an unbounded tape.
//! * [`compile`] translates the source once into an op tree; the resulting
//!   [`CompiledProgram`] runs against a fixed-size tape (see
//!   [`tape::FIXED_TAPE_LEN`]) and rejects unbalanced brackets at build
//!   time, which the interpreter deliberately tolerates.
//!
//! Cells are wrapping bytes, reading exhausted input yields 255, and a
//! pointer moved below the start of the tape silently ends the run.

// Re-export some symbols.
pub use compiler::compile;
pub use compiler::CompiledProgram;
pub use interpreter::execute;
pub use interpreter::execute_on;
pub use interpreter::execute_stdio;
pub use interpreter::execute_str;
pub use interpreter::ExecutionError;
pub use parser::parse_source;
pub use parser::ParseError;
pub use types::Cell;
pub use types::TapeAddr;
pub use types::TapeError;

pub mod byte_io;
mod compiler;
mod interpreter;
pub mod ops;
mod parser;
pub mod tape;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

/// The bundled rot13 program.
///
/// Mechanically generated: each input byte is compared against all 52
/// ASCII letters and shifted by plus or minus 13 on a match. Reads until
/// the 255 EOF sentinel, so it streams arbitrary input.
pub const ROT13_PROGRAM: &str = include_str!("../programs/rot13.b");
