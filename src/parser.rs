//! Parser for the compiled path.
//!
//! One linear pass over the source with an explicit stack of blocks. The
//! mapping is one symbol to one op; semantics preservation is the goal
//! here, not optimisation.

use thiserror::Error;

use crate::ops::Op;

/// Tokens in source file
#[derive(Debug, PartialEq, Clone, Copy)]
enum Token {
    Left,
    Right,
    Add,
    Subtract,
    Input,
    Output,
    BeginLoop,
    EndLoop,
}

/// Parses source code, producing a stream of tokens.
fn lexer(source_code: &'_ [u8]) -> impl Iterator<Item = (usize, Token)> + '_ {
    // Tokenise and discard unknown bytes
    source_code
        .iter()
        .enumerate() // For keeping track of source location
        .filter_map(|(pos, c)| match c {
            b'<' => Some((pos, Token::Left)),
            b'>' => Some((pos, Token::Right)),
            b'+' => Some((pos, Token::Add)),
            b'-' => Some((pos, Token::Subtract)),
            b'.' => Some((pos, Token::Output)),
            b',' => Some((pos, Token::Input)),
            b'[' => Some((pos, Token::BeginLoop)),
            b']' => Some((pos, Token::EndLoop)),
            _ => None,
        })
}

/// Errors during parsing
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// One or more `[` never closed before end of input.
    #[error("{0} loop(s) opened with [ but never closed")]
    UnclosedLoop(usize),
    /// A `]` with no loop open.
    #[error("] without a matching [ at byte {0} of the source")]
    UnexpectedLoopEnd(usize),
}

/// Build the op tree.
///
/// The interpreter tolerates unbalanced brackets; here they are a hard
/// build failure instead, since a partially built program is useless.
fn build_ops(tokens: impl Iterator<Item = (usize, Token)>) -> Result<Vec<Op>, ParseError> {
    // Stack of open blocks, innermost last. The bottom entry is the
    // program's top level and is the only one left when we are done.
    let mut blocks: Vec<Vec<Op>> = vec![vec![]];

    for (pos, token) in tokens {
        let op = match token {
            Token::Left => Op::Left,
            Token::Right => Op::Right,
            Token::Add => Op::Incr,
            Token::Subtract => Op::Decr,
            Token::Input => Op::Input,
            Token::Output => Op::Output,
            Token::BeginLoop => {
                blocks.push(vec![]);
                continue;
            }
            Token::EndLoop => {
                if blocks.len() < 2 {
                    return Err(ParseError::UnexpectedLoopEnd(pos));
                }
                let body = blocks.pop().expect("blocks is never empty");
                Op::Loop(body)
            }
        };
        blocks
            .last_mut()
            .expect("blocks is never empty")
            .push(op);
    }
    if blocks.len() != 1 {
        return Err(ParseError::UnclosedLoop(blocks.len() - 1));
    }
    Ok(blocks.pop().expect("blocks is never empty"))
}

/// Parse source code into an op tree.
pub fn parse_source(source_code: &[u8]) -> Result<Vec<Op>, ParseError> {
    build_ops(lexer(source_code))
}

#[cfg(test)]
mod tests {
    use super::{parse_source, ParseError};
    use crate::ops::Op;

    #[test]
    fn simple_parse() {
        parse_source(b"++>->,>.").unwrap();
        parse_source(b"++>->,>.>[-]").unwrap();
        parse_source(b"++>->,>.>[-[+>]]").unwrap();

        assert_eq!(
            parse_source(b"++>->,>.>[-]]"),
            Err(ParseError::UnexpectedLoopEnd(12))
        );
        assert_eq!(
            parse_source(b"++>->,>.>[-]["),
            Err(ParseError::UnclosedLoop(1))
        );
        assert_eq!(parse_source(b"[[["), Err(ParseError::UnclosedLoop(3)));
    }

    #[test]
    fn parse_is_one_to_one() {
        assert_eq!(
            parse_source(b"+ + comment [->.,<]").unwrap(),
            vec![
                Op::Incr,
                Op::Incr,
                Op::Loop(vec![Op::Decr, Op::Right, Op::Output, Op::Input, Op::Left]),
            ]
        );
    }

    #[test]
    fn parse_nested_loops() {
        assert_eq!(
            parse_source(b"[[-]]").unwrap(),
            vec![Op::Loop(vec![Op::Loop(vec![Op::Decr])])]
        );
    }
}
