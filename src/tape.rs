//! Implementations of the BF tape

use crate::{Cell, TapeAddr, TapeError};

/// Number of cells in a [`FixedTape`].
///
/// The compiled runner allocates this many zeroed cells up front instead of
/// growing on demand like the interpreter does. Programs that wander past
/// this bound fail with [`TapeError::AddrTooLarge`] under the compiler while
/// continuing to work under the interpreter.
pub const FIXED_TAPE_LEN: usize = 1_000_000;

/// A trait implementing a tape for the BF program memory.
///
/// Callers are expected to keep the pointer non-negative; a negative
/// address is reported as an error rather than a panic, but the engines
/// treat a negative pointer as end-of-run before ever touching the tape.
pub trait Tape {
    fn get(&self, addr: TapeAddr) -> Result<Cell, TapeError>;
    fn set(&mut self, addr: TapeAddr, value: Cell) -> Result<(), TapeError>;
    fn modify(&mut self, addr: TapeAddr, diff: Cell) -> Result<(), TapeError>;
}

/// A tape implemented with a growable Vec, unbounded to the right.
///
/// Cells come into existence lazily: reading past the current extent yields
/// zero without allocating, writing extends the storage up to the written
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecTape {
    data: Vec<Cell>,
}

impl VecTape {
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    /// Get a length value for the tape.
    ///
    /// All this means is that no value at or above this address is
    /// non-zero. It does not guarantee a non-zero value below it.
    pub fn len(&self) -> TapeAddr {
        self.data.len().into()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn ensure_size(&mut self, addr: TapeAddr) -> Result<(), TapeError> {
        let idx: usize = addr.try_into()?;
        if self.data.len() < idx + 1 {
            self.data.resize(idx + 1, 0.into());
        }
        Ok(())
    }
}

impl Default for VecTape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape for VecTape {
    fn get(&self, addr: TapeAddr) -> Result<Cell, TapeError> {
        let idx: usize = addr.try_into()?;
        Ok(self.data.get(idx).copied().unwrap_or(0.into()))
    }

    fn set(&mut self, addr: TapeAddr, value: Cell) -> Result<(), TapeError> {
        self.ensure_size(addr)?;
        let idx: usize = addr.try_into()?;
        self.data[idx] = value;
        Ok(())
    }

    fn modify(&mut self, addr: TapeAddr, diff: Cell) -> Result<(), TapeError> {
        self.ensure_size(addr)?;
        let idx: usize = addr.try_into()?;
        self.data[idx] += diff;
        Ok(())
    }
}

/// A tape with a fixed capacity, allocated once.
///
/// This is the memory model of the compiled runner. See [`FIXED_TAPE_LEN`]
/// for the capacity divergence from [`VecTape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTape {
    data: Vec<Cell>,
}

impl FixedTape {
    pub fn new() -> Self {
        Self::with_capacity(FIXED_TAPE_LEN)
    }

    pub fn with_capacity(cells: usize) -> Self {
        Self {
            data: vec![0.into(); cells],
        }
    }

    fn index(&self, addr: TapeAddr) -> Result<usize, TapeError> {
        let idx: usize = addr.try_into()?;
        if idx >= self.data.len() {
            return Err(TapeError::AddrTooLarge);
        }
        Ok(idx)
    }
}

impl Default for FixedTape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape for FixedTape {
    fn get(&self, addr: TapeAddr) -> Result<Cell, TapeError> {
        Ok(self.data[self.index(addr)?])
    }

    fn set(&mut self, addr: TapeAddr, value: Cell) -> Result<(), TapeError> {
        let idx = self.index(addr)?;
        self.data[idx] = value;
        Ok(())
    }

    fn modify(&mut self, addr: TapeAddr, diff: Cell) -> Result<(), TapeError> {
        let idx = self.index(addr)?;
        self.data[idx] += diff;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedTape, Tape, VecTape};
    use crate::TapeError;

    #[test]
    fn test_vec_tape() {
        let mut tape = VecTape::new();
        tape.set(2.into(), 5.into()).unwrap();
        assert_eq!(tape.get(2.into()), Ok(5.into()));
        tape.modify(2.into(), 255.into()).unwrap();
        assert_eq!(tape.get(2.into()), Ok(4.into()));
        tape.modify(8.into(), 200.into()).unwrap();
        assert_eq!(tape.get(8.into()), Ok(200.into()));

        // Reads past the extent are zero and do not allocate.
        assert_eq!(tape.get(1000.into()), Ok(0.into()));
        assert_eq!(tape.len(), 9.into());

        assert_eq!(tape.get((-1).into()), Err(TapeError::AddrIsNegative));
        assert_eq!(
            tape.set((-1).into(), 200.into()),
            Err(TapeError::AddrIsNegative)
        );
    }

    #[test]
    fn test_fixed_tape_bounds() {
        let mut tape = FixedTape::with_capacity(16);
        tape.set(15.into(), 7.into()).unwrap();
        assert_eq!(tape.get(15.into()), Ok(7.into()));
        assert_eq!(tape.get(16.into()), Err(TapeError::AddrTooLarge));
        assert_eq!(
            tape.modify(16.into(), 1.into()),
            Err(TapeError::AddrTooLarge)
        );
        assert_eq!(tape.get((-1).into()), Err(TapeError::AddrIsNegative));
    }
}
