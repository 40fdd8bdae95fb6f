//! Types needed in multiple modules

/// Enumeration of binary symbol values
#[derive(Clone, Eq, PartialEq, Debug, Copy)]
pub enum Bit {
    /// Binary symbol `0`
    Zero = 0,
    /// Binary symbol `1`
    One = 1,
}

impl Bit {
    /// Returns `Zero` for `0` and `One` for any nonzero value.
    pub(crate) fn from_u8(val: u8) -> Self {
        match val {
            0 => Bit::Zero,
            _ => Bit::One,
        }
    }

    /// Returns `0u8` for `Zero` and `1u8` for `One`.
    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Custom error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid code dimension error
    #[error("{0}")]
    InvalidDimensions(String),
    /// Rank-deficient parity-check matrix error
    #[error("{0}")]
    RankDeficient(String),
    /// Invalid input error
    #[error("{0}")]
    InvalidInput(String),
    /// File read/write error
    #[error("{0}")]
    FileReadWriteError(#[from] std::io::Error),
    /// Serde read/write error
    #[error("{0}")]
    SerdeReadWriteError(#[from] serde_json::Error),
}
