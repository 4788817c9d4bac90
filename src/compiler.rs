//! Ahead-of-time translation of source into a runnable unit.
//!
//! [`compile`] does all bracket matching once, up front, and fails fast on
//! unbalanced input (unlike the interpreter, which tolerates it). The
//! resulting [`CompiledProgram`] can be invoked any number of times; each
//! run owns a fresh fixed-size tape.

use std::io::Read;
use std::io::Write;

use crate::byte_io::{read_byte, write_byte};
use crate::ops::Op;
use crate::parser::{parse_source, ParseError};
use crate::tape::{FixedTape, Tape};
use crate::ExecutionError;
use crate::TapeAddr;

/// Signal used to unwind the whole run when the pointer goes negative.
///
/// Matching the interpreter, this is a normal end of execution and not an
/// error, but it has to cut through every enclosing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

/// A translated program, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProgram {
    ops: Vec<Op>,
}

/// Translate source into a [`CompiledProgram`].
pub fn compile(source: &[u8]) -> Result<CompiledProgram, ParseError> {
    Ok(CompiledProgram {
        ops: parse_source(source)?,
    })
}

impl CompiledProgram {
    /// Run the program once against the given streams.
    ///
    /// The tape is [`crate::tape::FIXED_TAPE_LEN`] cells, allocated per
    /// run. Within that bound the observable behaviour matches
    /// [`crate::execute`] on the same source and input; past it the run
    /// fails with [`ExecutionError::TapeError`] where the interpreter
    /// would have kept growing its tape.
    pub fn run(
        &self,
        input: &mut impl Read,
        output: &mut impl Write,
    ) -> Result<(), ExecutionError> {
        let mut tape = FixedTape::new();
        let mut tape_ptr: TapeAddr = 0.into();
        self.run_on(&mut tape, &mut tape_ptr, input, output)
    }

    /// As [`run`](Self::run), but against a caller-owned tape and pointer.
    pub fn run_on(
        &self,
        tape: &mut FixedTape,
        tape_ptr: &mut TapeAddr,
        input: &mut impl Read,
        output: &mut impl Write,
    ) -> Result<(), ExecutionError> {
        let _ = run_block(&self.ops, tape, tape_ptr, input, output)?;
        output.flush()?;
        Ok(())
    }

    /// Convenience wrapper mirroring [`crate::execute_str`].
    pub fn run_str(&self, input: &str) -> Result<String, ExecutionError> {
        let mut input = input.as_bytes();
        let mut output: Vec<u8> = Vec::new();
        self.run(&mut input, &mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

fn run_block(
    ops: &[Op],
    tape: &mut FixedTape,
    tape_ptr: &mut TapeAddr,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<Flow, ExecutionError> {
    for op in ops {
        if tape_ptr.is_negative() {
            return Ok(Flow::Halt);
        }
        match op {
            Op::Incr => tape.modify(*tape_ptr, 1.into())?,
            Op::Decr => tape.modify(*tape_ptr, (-1).into())?,
            Op::Left => *tape_ptr -= 1.into(),
            Op::Right => *tape_ptr += 1.into(),
            Op::Output => write_byte(output, tape.get(*tape_ptr)?.into())?,
            Op::Input => {
                // We may need to flush output here if there wasn't a newline.
                output.flush()?;
                let byte = read_byte(input)?;
                tape.set(*tape_ptr, byte.into())?;
            }
            Op::Loop(body) => {
                while !tape_ptr.is_negative() && tape.get(*tape_ptr)? != 0.into() {
                    if run_block(body, tape, tape_ptr, input, output)? == Flow::Halt {
                        return Ok(Flow::Halt);
                    }
                }
            }
        }
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::compile;
    use crate::parser::ParseError;
    use crate::tape::{FixedTape, Tape};
    use crate::TapeAddr;
    use crate::TapeError;

    fn run(source: &[u8], input: &[u8]) -> (FixedTape, TapeAddr, Vec<u8>) {
        let program = compile(source).unwrap();
        let mut tape = FixedTape::new();
        let mut tape_ptr: TapeAddr = 0.into();
        let mut input: VecDeque<u8> = input.iter().copied().collect();
        let mut output: Vec<u8> = Vec::new();
        program
            .run_on(&mut tape, &mut tape_ptr, &mut input, &mut output)
            .unwrap();
        (tape, tape_ptr, output)
    }

    #[test]
    fn test_run() {
        let (tape, tape_ptr, output) = run(b"+++>-->++[-]>+<>>>>>,.<,,", &[65, 32]);
        assert_eq!(i64::from(tape_ptr), 6);
        assert_eq!(tape.get(0.into()), Ok(3.into()));
        assert_eq!(tape.get(1.into()), Ok(254.into()));
        assert_eq!(tape.get(2.into()), Ok(0.into()));
        assert_eq!(tape.get(3.into()), Ok(1.into()));
        assert_eq!(tape.get(6.into()), Ok(255.into()));
        assert_eq!(tape.get(7.into()), Ok(65.into()));
        assert_eq!(output, vec![65]);
    }

    #[test]
    fn test_unbalanced_is_a_build_failure() {
        // The interpreter runs these silently; the compiler must not.
        assert_eq!(compile(b"++]++"), Err(ParseError::UnexpectedLoopEnd(2)));
        assert_eq!(compile(b"+[+"), Err(ParseError::UnclosedLoop(1)));
    }

    #[test]
    fn test_negative_pointer_halts_silently() {
        let (tape, tape_ptr, _) = run(b"++<+", b"");
        assert!(tape_ptr.is_negative());
        assert_eq!(tape.get(0.into()), Ok(2.into()));
    }

    #[test]
    fn test_negative_pointer_unwinds_loops() {
        let (tape, tape_ptr, output) = run(b"+[<]+++.", b"");
        assert!(tape_ptr.is_negative());
        assert_eq!(tape.get(0.into()), Ok(1.into()));
        assert!(output.is_empty());
    }

    #[test]
    fn test_fixed_tape_overflow_is_detected() {
        use crate::ExecutionError;

        // Seek right forever: the fixed tape runs out where the
        // interpreter's would keep growing.
        let program = compile(b"+[>+]").unwrap();
        let mut input: &[u8] = b"";
        let mut output: Vec<u8> = Vec::new();
        assert_eq!(
            program.run(&mut input, &mut output),
            Err(ExecutionError::TapeError(TapeError::AddrTooLarge))
        );
    }

    #[test]
    fn test_runs_are_independent() {
        // Each invocation gets a fresh tape; output must repeat exactly.
        let program = compile(b",+.").unwrap();
        assert_eq!(program.run_str("a").unwrap(), "b");
        assert_eq!(program.run_str("a").unwrap(), "b");
    }
}
