//! Fundamental data types used throughout brainspin

use std::{
    fmt::Display,
    num::Wrapping,
    ops::{Add, AddAssign, Sub, SubAssign},
};
use thiserror::Error;

/// Error type for tape addressing
#[derive(Debug, Clone, Copy, Error, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum TapeError {
    /// The tape addr is negative in a context where this is not allowed.
    ///
    /// The engines never surface this to the user: a negative pointer
    /// silently ends the run before any cell access happens. The variant
    /// exists so the tape API rejects bad addresses instead of panicking.
    #[error("Tape pointer moved before the start of the tape")]
    AddrIsNegative,
    /// Tape address is past the end of a fixed-size tape.
    #[error("Tape pointer moved past the end of the fixed tape")]
    AddrTooLarge,
}

/// Newtype for tape pointer / tape offset
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TapeAddr(i64);

impl TapeAddr {
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl From<i32> for TapeAddr {
    fn from(value: i32) -> Self {
        Self(value as i64)
    }
}

impl From<i64> for TapeAddr {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<usize> for TapeAddr {
    fn from(value: usize) -> Self {
        Self(value as i64)
    }
}

impl From<TapeAddr> for i64 {
    fn from(value: TapeAddr) -> Self {
        value.0
    }
}

impl TryFrom<TapeAddr> for usize {
    type Error = TapeError;

    fn try_from(value: TapeAddr) -> Result<Self, Self::Error> {
        if value.0 < 0 {
            Err(TapeError::AddrIsNegative)
        } else {
            Ok(value.0 as Self)
        }
    }
}

impl Add for TapeAddr {
    type Output = TapeAddr;

    fn add(self, rhs: Self) -> Self::Output {
        TapeAddr(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for TapeAddr {
    fn add_assign(&mut self, rhs: Self) {
        // Good luck writing 2^63 ">" in a program, but wrapping keeps
        // pathological input from panicking in debug builds.
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for TapeAddr {
    type Output = TapeAddr;

    fn sub(self, rhs: Self) -> Self::Output {
        TapeAddr(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for TapeAddr {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Display for TapeAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One cell of program memory (u8 with wrapping semantics).
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Cell(Wrapping<u8>);

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Cell {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Cell {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self(Wrapping::<u8>(value.rem_euclid(256) as u8))
    }
}

impl From<u8> for Cell {
    fn from(value: u8) -> Self {
        Self(Wrapping::<u8>(value))
    }
}

impl From<Cell> for u8 {
    fn from(value: Cell) -> Self {
        value.0 .0
    }
}

impl From<Cell> for i64 {
    fn from(value: Cell) -> Self {
        value.0 .0 as i64
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, TapeAddr, TapeError};

    #[test]
    fn test_cell_wrapping() {
        assert_eq!(Cell::from(255) + 1.into(), 0.into());
        assert_eq!(Cell::from(0) - 1.into(), 255.into());
        assert_eq!(Cell::from(-1), 255.into());
    }

    #[test]
    fn test_incr_decr_are_inverses() {
        for v in 0..=255u8 {
            let c = Cell::from(v);
            assert_eq!(c + Cell::from(1u8) - Cell::from(1u8), c);
            assert_eq!(c - Cell::from(1u8) + Cell::from(1u8), c);
        }
    }

    #[test]
    fn test_addr_negative() {
        let mut addr: TapeAddr = 0.into();
        addr -= 1.into();
        assert!(addr.is_negative());
        assert_eq!(usize::try_from(addr), Err(TapeError::AddrIsNegative));
    }
}
