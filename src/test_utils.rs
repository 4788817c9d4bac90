//! Helpers shared by unit and integration tests.

use std::collections::VecDeque;

use crate::{compile, execute, ExecutionError};

/// Interpret source, collecting output.
pub fn interpreted_output(source: &[u8], input: &[u8]) -> Result<Vec<u8>, ExecutionError> {
    let mut input: VecDeque<u8> = input.iter().copied().collect();
    let mut output: Vec<u8> = Vec::new();
    execute(source, &mut input, &mut output)?;
    Ok(output)
}

/// Compile and run source, collecting output. Panics on parse failure,
/// since callers pass known-good programs.
pub fn compiled_output(source: &[u8], input: &[u8]) -> Result<Vec<u8>, ExecutionError> {
    let program = compile(source).expect("test program must parse");
    let mut input: VecDeque<u8> = input.iter().copied().collect();
    let mut output: Vec<u8> = Vec::new();
    program.run(&mut input, &mut output)?;
    Ok(output)
}

/// Run source through both engines, assert they agree, return the output.
pub fn assert_engines_agree(source: &[u8], input: &[u8]) -> Vec<u8> {
    let interpreted = interpreted_output(source, input).expect("interpreter failed");
    let compiled = compiled_output(source, input).expect("compiled run failed");
    assert_eq!(
        interpreted, compiled,
        "interpreter and compiled runner disagree"
    );
    interpreted
}
