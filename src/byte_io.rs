//! Byte-stream adapters shared by the interpreter and the compiled runner.

use std::io::{Read, Write};

/// The byte a `,` stores once input is exhausted.
///
/// Exhaustion is not an error: every read past the end of input yields this
/// sentinel again. Programs detect it with the `-,+[...]` idiom (read, add
/// one, loop while non-zero).
pub const EOF_BYTE: u8 = 255;

/// Read the next input byte, or [`EOF_BYTE`] at end of input.
pub fn read_byte(input: &mut impl Read) -> std::io::Result<u8> {
    let mut buf: [u8; 1] = [0; 1];
    match input.read(&mut buf)? {
        0 => Ok(EOF_BYTE),
        _ => Ok(buf[0]),
    }
}

/// Emit one byte to the output sink.
pub fn write_byte(output: &mut impl Write, value: u8) -> std::io::Result<()> {
    output.write_all(&[value])
}

#[cfg(test)]
mod tests {
    use super::{read_byte, write_byte, EOF_BYTE};
    use std::collections::VecDeque;

    #[test]
    fn test_eof_sentinel_repeats() {
        let mut input: VecDeque<u8> = VecDeque::from([65]);
        assert_eq!(read_byte(&mut input).unwrap(), 65);
        assert_eq!(read_byte(&mut input).unwrap(), EOF_BYTE);
        assert_eq!(read_byte(&mut input).unwrap(), EOF_BYTE);
    }

    #[test]
    fn test_write_byte() {
        let mut out: Vec<u8> = Vec::new();
        write_byte(&mut out, 1).unwrap();
        write_byte(&mut out, 255).unwrap();
        assert_eq!(out, vec![1, 255]);
    }
}
