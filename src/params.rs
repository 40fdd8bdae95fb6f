//! Dimension parameters of a regular LDPC code

use serde::{Deserialize, Serialize};

use crate::Error;

/// Dimension parameters of a regular (wc, wr) LDPC code
///
/// A valid parameter set fixes the codeword length `N`, the column weight
/// `wc`, and the row weight `wr`, from which the number of parity checks
/// `M = N * wc / wr`, the number of information bits `K = N - M`, and the
/// code rate `R = K / N` all follow.
#[derive(Clone, Eq, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct CodeParams {
    /// Codeword length
    n: usize,
    /// Column weight of the parity-check matrix
    wc: usize,
    /// Row weight of the parity-check matrix
    wr: usize,
}

impl CodeParams {
    /// Returns validated code parameters.
    ///
    /// # Parameters
    ///
    /// - `n`: Codeword length.
    ///
    /// - `wc`: Column weight (at least `2`).
    ///
    /// - `wr`: Row weight (greater than `wc`).
    ///
    /// # Errors
    ///
    /// Returns an error if `wc < 2`, if `wr <= wc`, if `n` is not divisible
    /// by `wr`, if `M = n * wc / wr` is not divisible by `wc`, or if
    /// `K = n - M` is not positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use ldpc::CodeParams;
    ///
    /// let params = CodeParams::new(12, 3, 4)?;
    /// assert_eq!(params.m(), 9);
    /// assert_eq!(params.k(), 3);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(n: usize, wc: usize, wr: usize) -> Result<Self, Error> {
        if wc < 2 {
            return Err(Error::InvalidDimensions(format!(
                "Column weight must be at least 2 (found {wc})",
            )));
        }
        if wr <= wc {
            return Err(Error::InvalidDimensions(format!(
                "Row weight {wr} must exceed column weight {wc}",
            )));
        }
        if n == 0 || n % wr != 0 {
            return Err(Error::InvalidDimensions(format!(
                "Codeword length {n} must be a positive multiple of the row weight {wr}",
            )));
        }
        let m = n * wc / wr;
        if m % wc != 0 {
            return Err(Error::InvalidDimensions(format!(
                "Parity check count {m} must be a multiple of the column weight {wc}",
            )));
        }
        if m >= n {
            return Err(Error::InvalidDimensions(format!(
                "Code has no information bits (M = {m}, N = {n})",
            )));
        }
        Ok(Self { n, wc, wr })
    }

    /// Returns the codeword length `N`.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the column weight `wc`.
    #[must_use]
    pub fn wc(&self) -> usize {
        self.wc
    }

    /// Returns the row weight `wr`.
    #[must_use]
    pub fn wr(&self) -> usize {
        self.wr
    }

    /// Returns the number of parity checks `M = N * wc / wr`.
    #[must_use]
    pub fn m(&self) -> usize {
        self.n * self.wc / self.wr
    }

    /// Returns the number of information bits `K = N - M`.
    #[must_use]
    pub fn k(&self) -> usize {
        self.n - self.m()
    }

    /// Returns the number of rows per band of the Gallager construction.
    #[must_use]
    pub fn block_rows(&self) -> usize {
        self.m() / self.wc
    }

    /// Returns the code rate `R = K / N`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rate(&self) -> f64 {
        self.k() as f64 / self.n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn test_new() {
        // Invalid input
        assert!(CodeParams::new(12, 1, 4).is_err());
        assert!(CodeParams::new(12, 4, 3).is_err());
        assert!(CodeParams::new(12, 3, 3).is_err());
        assert!(CodeParams::new(10, 3, 4).is_err());
        assert!(CodeParams::new(0, 3, 4).is_err());
        // Valid input
        assert!(CodeParams::new(12, 3, 4).is_ok());
        assert!(CodeParams::new(1024, 3, 6).is_ok());
    }

    #[test]
    fn test_derived_dimensions() {
        let params = CodeParams::new(12, 3, 4).unwrap();
        assert_eq!(params.n(), 12);
        assert_eq!(params.wc(), 3);
        assert_eq!(params.wr(), 4);
        assert_eq!(params.m(), 9);
        assert_eq!(params.k(), 3);
        assert_eq!(params.block_rows(), 3);
        assert_float_eq!(params.rate(), 0.25, abs <= 1e-12);
    }

    #[test]
    fn test_smallest_nontrivial_case() {
        let params = CodeParams::new(12, 2, 3).unwrap();
        assert_eq!(params.m(), 8);
        assert_eq!(params.k(), 4);
        assert_eq!(params.block_rows(), 4);
    }

    #[test]
    fn test_typical_case() {
        let params = CodeParams::new(1024, 3, 6).unwrap();
        assert_eq!(params.m(), 512);
        assert_eq!(params.k(), 512);
        assert_float_eq!(params.rate(), 0.5, abs <= 1e-12);
    }
}
