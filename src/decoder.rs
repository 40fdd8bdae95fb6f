//! Sum-product decoder for an LDPC code, plus LLR derivation helpers

use crate::{BinMatrix, Bit, Error};

/// Lower clamp on the argument of [`phi`]; caps the function near 16.81.
const PHI_ARG_MIN: f64 = 1e-7;
/// Upper clamp on the argument of [`phi`]; prevents overflow of `exp`.
const PHI_ARG_MAX: f64 = 30.0;

/// Outcome of a sum-product decoding call
#[derive(Clone, PartialEq, Debug)]
pub struct DecodeResult {
    /// Hard decision on every codeword bit
    pub code_bits: Vec<Bit>,
    /// Hard decision on the information bits (the last `K` codeword positions)
    pub info_bits: Vec<Bit>,
    /// Number of iterations performed (`max_iter` if the syndrome never cleared)
    pub num_iters: u32,
    /// `true` iff the final hard decision satisfies every parity check
    pub syndrome_ok: bool,
}

/// Returns hard decisions on the codeword and information bits from the
/// sum-product algorithm (SPA) on the Tanner graph of `h`.
///
/// Messages follow the flooding schedule. Each iteration performs, in order:
/// the check-node update (using the sign-and-phi form of the tanh rule), the
/// variable-node update, a tentative hard decision on the total LLR of every
/// bit, and a syndrome check that terminates decoding when every parity check
/// is satisfied. Exhausting `max_iter` without a zero syndrome is a decoding
/// failure from the receiver's viewpoint but not an error: the last tentative
/// decision is returned and the caller can inspect
/// [`DecodeResult::syndrome_ok`].
///
/// LLR values are signed so that a positive total means the bit is a one
/// (`total >= 0` decides `One`; for BPSK over AWGN with a one transmitted as
/// `+1.0`, this is `LLR = 2 * y / sigma^2`). With `max_iter` of `0` the
/// result is the hard decision on the channel LLR values alone.
///
/// # Parameters
///
/// - `llr`: Channel log-likelihood ratio of every codeword bit; must number
///   `h.num_cols()`.
///
/// - `h`: Parity-check matrix of shape `M x N`. When decoding against a
///   generator from [`generator_matrix`](crate::generator_matrix), this must
///   be the column-permuted matrix that call returned alongside the
///   generator.
///
/// - `max_iter`: Maximum number of SPA iterations.
///
/// # Errors
///
/// Returns an error if `llr.len()` differs from `h.num_cols()` or if `h` has
/// at least as many rows as columns (no information bits).
///
/// # Examples
///
/// ```
/// use ldpc::{decode, BinMatrix};
///
/// // Single parity check on four bits; flip nothing at high confidence.
/// let h = BinMatrix::from_rows(&[vec![1, 1, 1, 1]])?;
/// let result = decode(&[-9.0, 8.0, 7.5, -8.5], &h, 10)?;
/// assert!(result.syndrome_ok);
/// assert_eq!(result.num_iters, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode(llr: &[f64], h: &BinMatrix, max_iter: u32) -> Result<DecodeResult, Error> {
    let num_checks = h.num_rows();
    let num_vars = h.num_cols();
    if num_checks >= num_vars {
        return Err(Error::InvalidInput(format!(
            "Parity-check matrix must have fewer rows than columns (found {num_checks} x {num_vars})",
        )));
    }
    if llr.len() != num_vars {
        return Err(Error::InvalidInput(format!(
            "Expected {} LLR values (found {})",
            num_vars,
            llr.len()
        )));
    }

    // Tanner graph adjacency lists.
    let vars_of_check: Vec<Vec<usize>> = (0 .. num_checks)
        .map(|check| (0 .. num_vars).filter(|&var| h.get(check, var) == 1).collect())
        .collect();
    let checks_of_var: Vec<Vec<usize>> = (0 .. num_vars)
        .map(|var| (0 .. num_checks).filter(|&check| h.get(check, var) == 1).collect())
        .collect();

    // Message arrays: u holds variable-to-check aggregates, v check-to-variable
    // messages. Entries at (check, var) positions with h[check][var] = 0 stay
    // unused.
    let mut u = vec![0.0; num_checks * num_vars];
    let mut v = vec![0.0; num_checks * num_vars];

    // With all-zero messages the tentative decision is the channel hard
    // decision, which is what a max_iter of 0 must return.
    let mut hard: Vec<u8> = llr.iter().map(|&total| u8::from(total >= 0.0)).collect();
    let mut syndrome_ok = syndrome_is_zero(&hard, &vars_of_check);
    let mut num_iters = 0;

    for iter in 0 .. max_iter {
        // Check-node update.
        for check in 0 .. num_checks {
            let vars = &vars_of_check[check];
            for (target_pos, &target_var) in vars.iter().enumerate() {
                let mut sign = 1.0;
                let mut sum = 0.0;
                for (pos, &var) in vars.iter().enumerate() {
                    if pos != target_pos {
                        let x = llr[var] + u[check * num_vars + var];
                        sign *= sign_of(x);
                        sum += phi(x.abs());
                    }
                }
                v[check * num_vars + target_var] = sign * phi(sum);
            }
        }
        // Variable-node update. The channel LLR is deliberately not added
        // here; it enters only at the tentative decision.
        for var in 0 .. num_vars {
            let checks = &checks_of_var[var];
            for (target_pos, &target_check) in checks.iter().enumerate() {
                let mut sum = 0.0;
                for (pos, &check) in checks.iter().enumerate() {
                    if pos != target_pos {
                        sum += v[check * num_vars + var];
                    }
                }
                u[target_check * num_vars + var] = sum;
            }
        }
        // Tentative decision on the total LLR of every bit.
        for var in 0 .. num_vars {
            let mut total = llr[var];
            for &check in &checks_of_var[var] {
                total += v[check * num_vars + var];
            }
            hard[var] = u8::from(total >= 0.0);
        }
        num_iters = iter + 1;
        syndrome_ok = syndrome_is_zero(&hard, &vars_of_check);
        if syndrome_ok {
            break;
        }
    }

    let code_bits: Vec<Bit> = hard.iter().map(|&bit| Bit::from_u8(bit)).collect();
    let info_bits = code_bits[num_checks ..].to_vec();
    Ok(DecodeResult {
        code_bits,
        info_bits,
        num_iters,
        syndrome_ok,
    })
}

/// Returns bit-wise LLR values from per-symbol likelihoods.
///
/// `pyx[k][i]` is the likelihood of symbol value `k` for observation `i`,
/// with `E = pyx.len()` symbol values. Bit `b` of symbol `k` is `(k >> b) & 1`
/// (LSB first), and the LLR of bit `b` of observation `i`, stored at index
/// `b + i * log2(E)`, is the log-ratio of the summed likelihoods of the
/// symbols whose bit `b` is one versus those whose bit `b` is zero.
///
/// # Parameters
///
/// - `pyx`: Per-symbol likelihoods, one equal-length row per symbol value.
///
/// # Errors
///
/// Returns an error if the number of rows of `pyx` is not a power of two of
/// at least `2`, or if the rows have unequal lengths.
///
/// # Examples
///
/// ```
/// use ldpc::llr_from_symbol_probs;
///
/// let llr = llr_from_symbol_probs(&[vec![0.2], vec![0.8]])?;
/// assert!((llr[0] - 4.0f64.ln()).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn llr_from_symbol_probs(pyx: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
    let num_symbols = pyx.len();
    if num_symbols < 2 || !num_symbols.is_power_of_two() {
        return Err(Error::InvalidInput(format!(
            "Expected a power of two of at least 2 symbol values (found {num_symbols})",
        )));
    }
    let num_obs = pyx[0].len();
    if pyx.iter().any(|row| row.len() != num_obs) {
        return Err(Error::InvalidInput(
            "All symbol likelihood rows must have the same length".to_string(),
        ));
    }
    let bits_per_symbol = num_symbols.trailing_zeros() as usize;
    let mut llr = vec![0.0; num_obs * bits_per_symbol];
    for obs in 0 .. num_obs {
        for bit in 0 .. bits_per_symbol {
            let mut p1 = 0.0;
            let mut p0 = 0.0;
            for (symbol, row) in pyx.iter().enumerate() {
                if (symbol >> bit) & 1 == 1 {
                    p1 += row[obs];
                } else {
                    p0 += row[obs];
                }
            }
            llr[bit + obs * bits_per_symbol] = (p1 / p0).ln();
        }
    }
    Ok(llr)
}

/// Returns `true` iff the hard decision satisfies every parity check.
fn syndrome_is_zero(hard: &[u8], vars_of_check: &[Vec<usize>]) -> bool {
    vars_of_check
        .iter()
        .all(|vars| vars.iter().fold(0u8, |parity, &var| parity ^ hard[var]) == 0)
}

/// Returns `+1.0` for nonnegative values and `-1.0` otherwise.
fn sign_of(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Returns `log((e^x + 1) / (e^x - 1))` with the argument clamped to
/// `[1e-7, 30]`.
///
/// The function is its own inverse over positive reals, which is what lets
/// the check-node update take the `sign * phi(sum of phi)` form. The lower
/// clamp caps the output near `16.81`; the upper clamp keeps `exp` finite.
fn phi(x: f64) -> f64 {
    let t = x.clamp(PHI_ARG_MIN, PHI_ARG_MAX);
    ((t.exp() + 1.0) / (t.exp() - 1.0)).ln()
}

#[cfg(test)]
mod tests_of_decoder {
    use super::*;
    use crate::{encode, generator_matrix, parity_check_matrix, CodeParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use Bit::{One, Zero};

    /// Maps code bits to high-confidence channel LLR values (one => +10).
    fn noiseless_llr(code_bits: &[Bit]) -> Vec<f64> {
        code_bits
            .iter()
            .map(|&bit| if bit == One { 10.0 } else { -10.0 })
            .collect()
    }

    #[test]
    fn test_invalid_inputs() {
        let h = BinMatrix::from_rows(&[vec![1, 1, 1]]).unwrap();
        assert!(decode(&[1.0, -1.0], &h, 4).is_err());
        let square = BinMatrix::from_rows(&[vec![1, 1], vec![1, 1]]).unwrap();
        assert!(decode(&[1.0, -1.0], &square, 4).is_err());
    }

    #[test]
    fn test_noiseless_round_trip() {
        let params = CodeParams::new(12, 3, 4).unwrap();
        let mut h = parity_check_matrix(&params, &mut StdRng::seed_from_u64(37));
        let g = generator_matrix(&mut h, &params).unwrap();
        for pattern in 0u8 .. 8 {
            let info_bits: Vec<Bit> =
                (0 .. 3).map(|bit| Bit::from_u8((pattern >> bit) & 1)).collect();
            let code_bits = encode(&info_bits, &g).unwrap();
            let result = decode(&noiseless_llr(&code_bits), &h, 40).unwrap();
            assert!(result.syndrome_ok);
            assert!(result.num_iters <= 2);
            assert_eq!(result.info_bits, info_bits);
            assert_eq!(result.code_bits, code_bits);
        }
    }

    #[test]
    fn test_single_flipped_bit_is_corrected() {
        let params = CodeParams::new(12, 3, 4).unwrap();
        let mut h = parity_check_matrix(&params, &mut StdRng::seed_from_u64(41));
        let g = generator_matrix(&mut h, &params).unwrap();
        let info_bits = [One, Zero, One];
        let code_bits = encode(&info_bits, &g).unwrap();
        let mut llr = noiseless_llr(&code_bits);
        // One weakly wrong bit among strongly right ones.
        llr[5] = -llr[5].signum() * 0.5;
        let result = decode(&llr, &h, 40).unwrap();
        assert!(result.syndrome_ok);
        assert_eq!(result.info_bits, info_bits);
    }

    #[test]
    fn test_zero_iterations_returns_channel_hard_decision() {
        let h = BinMatrix::from_rows(&[vec![1, 1, 1, 0], vec![0, 1, 1, 1]]).unwrap();
        let llr = [3.0, -2.0, 0.0, -1.5];
        let result = decode(&llr, &h, 0).unwrap();
        assert_eq!(result.num_iters, 0);
        // total >= 0 decides One; zero ties break to One.
        assert_eq!(result.code_bits, [One, Zero, One, Zero]);
        assert_eq!(result.info_bits, [One, Zero]);
        assert!(!result.syndrome_ok);
    }

    #[test]
    fn test_decoding_failure_is_not_an_error() {
        // A codeword of the single check [1 1 1] needs even parity; all-ones
        // confidence on odd parity cannot be repaired symmetrically.
        let h = BinMatrix::from_rows(&[vec![1, 1, 1]]).unwrap();
        let result = decode(&[5.0, 5.0, 5.0], &h, 3).unwrap();
        assert_eq!(result.num_iters, 3);
        assert!(!result.syndrome_ok);
    }
}
