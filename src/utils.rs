//! Collection of useful functions for simulating code performance
//!
//! # Examples
//!
//! ```
//! use ldpc::utils;
//!
//! let mut rng = rand::rng();
//! let num_bits = 48;
//! let eb_over_n0_db = 4.0;
//! let bits = utils::random_bits(num_bits, &mut rng);
//! let bits_llr = utils::bpsk_awgn_channel(&bits, eb_over_n0_db, 0.5, &mut rng);
//! let bits_hat = utils::bpsk_slicer(&bits_llr);
//! let err_count = utils::error_count(&bits_hat, &bits);
//! ```

use rand::Rng;
use rand_distr::StandardNormal;

use crate::Bit;

/// Returns given number of random bits.
///
/// # Parameters
///
/// - `num_bits`: Number of random bits to be generated.
///
/// - `rng`: Random number generator to be used.
///
/// # Returns
///
/// - `bits`: Random bits.
pub fn random_bits<R: Rng>(num_bits: usize, rng: &mut R) -> Vec<Bit> {
    (0 .. num_bits)
        .map(|_| {
            if rng.random_bool(0.5) {
                Bit::One
            } else {
                Bit::Zero
            }
        })
        .collect()
}

/// Returns LLR values at BPSK-AWGN channel output corresponding to given
/// input bits.
///
/// A `One` is transmitted as `+1.0` and a `Zero` as `-1.0`; the noise
/// variance is `sigma^2 = 1 / (2 * code_rate * Eb/N0)`, and the LLR of each
/// received symbol `y` is `2 * y / sigma^2`, positive values indicating that
/// `One` is more likely.
///
/// # Parameters
///
/// - `bits`: Bits to be transmitted over the BPSK-AWGN channel.
///
/// - `eb_over_n0_db`: Ratio (dB) of energy per information bit to noise power
///   spectral density at the channel output.
///
/// - `code_rate`: Code rate `K / N` relating information-bit energy to
///   symbol energy (use `1.0` for uncoded transmission).
///
/// - `rng`: Random number generator to be used.
///
/// # Returns
///
/// - `bits_llr`: Log-likelihood-ratio (LLR) values at the BPSK-AWGN channel
///   output corresponding to the transmitted bits.
pub fn bpsk_awgn_channel<R: Rng>(
    bits: &[Bit],
    eb_over_n0_db: f64,
    code_rate: f64,
    rng: &mut R,
) -> Vec<f64> {
    let eb_over_n0 = 10f64.powf(0.1 * eb_over_n0_db);
    let noise_var = 1.0 / (2.0 * code_rate * eb_over_n0);
    bits.iter()
        .map(|bit| match bit {
            Bit::Zero => -1f64,
            Bit::One => 1f64,
        })
        .map(|x| {
            2.0 * (x + noise_var.sqrt() * rng.sample::<f64, _>(StandardNormal)) / noise_var
        })
        .collect()
}

/// Returns BPSK slicer output.
///
/// # Parameters
///
/// - `llr_vals`: LLR values to be sliced (nonnegative values slice to `One`).
///
/// # Returns
///
/// - `bits_hat`: Bits obtained by slicing the given values.
#[must_use]
pub fn bpsk_slicer(llr_vals: &[f64]) -> Vec<Bit> {
    llr_vals
        .iter()
        .map(|&x| if x >= 0.0 { Bit::One } else { Bit::Zero })
        .collect()
}

/// Returns number of errors in a sequence with respect to a reference
/// sequence.
///
/// # Parameters
///
/// - `seq`: Sequence in which errors must be counted.
///
/// - `ref_seq`: Reference sequence to which the given sequence is compared.
///
/// # Returns
///
/// - `err_count`: Number of positions in which the two sequences differ. If
///   they are of different lengths, then the longer sequence is effectively
///   truncated to the length of the shorter one.
pub fn error_count<T: PartialEq>(seq: &[T], ref_seq: &[T]) -> usize {
    ref_seq
        .iter()
        .zip(seq.iter())
        .filter(|&(x, y)| x != y)
        .count()
}

/// Returns the theoretical bit error rate of uncoded BPSK over AWGN,
/// `0.5 * erfc(sqrt(Eb/N0))`.
///
/// # Parameters
///
/// - `eb_over_n0_db`: Ratio (dB) of energy per bit to noise power spectral
///   density.
#[must_use]
pub fn bpsk_theoretical_ber(eb_over_n0_db: f64) -> f64 {
    let eb_over_n0 = 10f64.powf(0.1 * eb_over_n0_db);
    0.5 * erfc(eb_over_n0.sqrt())
}

/// Complementary error function, Abramowitz & Stegun approximation 7.1.26.
fn erfc(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.327_591_1 * x.abs());
    let poly = t
        * (0.254_829_592
            + t * (-0.284_496_736
                + t * (1.421_413_741 + t * (-1.453_152_027 + t * 1.061_405_429))));
    let result = poly * (-x * x).exp();
    if x >= 0.0 {
        result
    } else {
        2.0 - result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use Bit::{One, Zero};

    #[test]
    fn test_random_bits() {
        let mut rng = StdRng::seed_from_u64(43);
        let num_bits = 0;
        assert!(random_bits(num_bits, &mut rng).is_empty());
        let num_bits = 10000;
        let bits = random_bits(num_bits, &mut rng);
        let num_zeros = bits.iter().filter(|&b| *b == Zero).count();
        let num_ones = bits.iter().filter(|&b| *b == One).count();
        assert!(num_zeros > 9 * num_bits / 20 && num_ones > 9 * num_bits / 20);
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn test_bpsk_awgn_channel() {
        let mut rng = StdRng::seed_from_u64(47);
        assert!(bpsk_awgn_channel(&[], 0.0, 1.0, &mut rng).is_empty());
        let eb_over_n0_db = 20f64;
        let num_bits = 10000;
        let bits = random_bits(num_bits, &mut rng);
        let bits_llr = bpsk_awgn_channel(&bits, eb_over_n0_db, 1.0, &mut rng);
        // At Eb/N0 of 20 dB the noise rarely flips a hard decision, and the
        // noiseless LLR magnitude is 4 * Eb/N0.
        let eb_over_n0 = 10f64.powf(0.1 * eb_over_n0_db);
        let mean_magnitude =
            bits_llr.iter().map(|x| x.abs()).sum::<f64>() / num_bits as f64;
        assert!(error_count(&bpsk_slicer(&bits_llr), &bits) < num_bits / 100);
        assert!(mean_magnitude > 3.5 * eb_over_n0 && mean_magnitude < 4.5 * eb_over_n0);
    }

    #[test]
    fn test_bpsk_slicer() {
        assert!(bpsk_slicer(&[]).is_empty());
        assert_eq!(bpsk_slicer(&[0.0, 0.01, -0.01]), [One, One, Zero]);
    }

    #[test]
    fn test_error_count() {
        assert_eq!(error_count(&[], &[One, Zero]), 0);
        assert_eq!(error_count(&[One, Zero], &[]), 0);
        // Longer `seq`
        let ref_seq = [One, Zero, Zero, One, One, One, Zero, Zero];
        let seq = [One, One, Zero, Zero, One, One, Zero, Zero, Zero, One];
        assert_eq!(error_count(&seq, &ref_seq), 2);
        // Shorter `seq`
        let ref_seq = [One, Zero, Zero, One, One, One, Zero, Zero, Zero, One];
        let seq = [One, One, Zero, Zero, One, One, Zero, Zero];
        assert_eq!(error_count(&seq, &ref_seq), 2);
    }

    #[test]
    fn test_erfc() {
        assert_float_eq!(erfc(0.0), 1.0, abs <= 1e-6);
        assert_float_eq!(erfc(1.0), 0.157_299_2, abs <= 1e-6);
        assert_float_eq!(erfc(-1.0), 1.842_700_8, abs <= 1e-6);
        assert!(erfc(4.0) < 1e-7);
    }

    #[test]
    fn test_bpsk_theoretical_ber() {
        // BER at 0 dB is about 7.86e-2; it falls steeply with SNR.
        assert_float_eq!(bpsk_theoretical_ber(0.0), 7.865e-2, abs <= 1e-4);
        assert!(bpsk_theoretical_ber(10.0) < 1e-5);
        assert!(bpsk_theoretical_ber(-10.0) > 0.3);
    }
}
