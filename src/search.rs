//! Search for a parity-check/generator matrix pair with few 4-cycles
//!
//! Short cycles in the Tanner graph degrade belief-propagation performance,
//! so matrices are drawn repeatedly and the pair with the fewest 4-cycles is
//! kept. The search is computationally heavy for large codeword lengths;
//! adjust the number of trials accordingly.

use rand::Rng;

use crate::{
    count_four_cycles, generator_matrix, parity_check_matrix, BinMatrix, CodeParams, Error,
};

/// Best matrix pair found by [`min_cycle_search`], with summary statistics
#[derive(Clone, PartialEq, Debug)]
pub struct SearchOutcome {
    /// Parity-check matrix of the best pair (column-permuted by the
    /// systematic reduction)
    pub h: BinMatrix,
    /// Generator matrix of the best pair
    pub g: BinMatrix,
    /// Number of 4-cycles of the best pair
    pub four_cycles: u64,
    /// Mean number of 4-cycles over all successful trials
    pub mean_four_cycles: f64,
    /// Number of trials skipped because the drawn matrix was rank deficient
    pub num_skipped: u32,
}

/// Returns the matrix pair with the fewest 4-cycles over a number of random
/// draws.
///
/// Each trial draws a fresh parity-check matrix with the Gallager
/// construction, derives its systematic generator, and counts the 4-cycles of
/// the (column-permuted) parity-check matrix. Draws whose generator cannot be
/// constructed because of rank deficiency are skipped; they still count
/// toward the number of trials.
///
/// # Parameters
///
/// - `code`: Code dimension parameters.
///
/// - `num_trials`: Number of matrix pairs to draw (at least `1`).
///
/// - `rng`: Random number generator for the matrix draws.
///
/// # Errors
///
/// Returns an error if `num_trials` is `0` or if every trial was skipped.
///
/// # Examples
///
/// ```
/// use ldpc::{search, CodeParams};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let code = CodeParams::new(12, 3, 4)?;
/// let outcome = search::min_cycle_search(&code, 10, &mut StdRng::seed_from_u64(2))?;
/// assert_eq!(outcome.h.num_rows(), 9);
/// assert_eq!(outcome.g.num_rows(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn min_cycle_search<R: Rng>(
    code: &CodeParams,
    num_trials: u32,
    rng: &mut R,
) -> Result<SearchOutcome, Error> {
    if num_trials == 0 {
        return Err(Error::InvalidInput(
            "Number of search trials must be positive".to_string(),
        ));
    }
    let mut best: Option<(BinMatrix, BinMatrix, u64)> = None;
    let mut cycle_sum: u64 = 0;
    let mut num_successful: u32 = 0;
    let mut num_skipped: u32 = 0;
    for trial in 1 ..= num_trials {
        let mut h = parity_check_matrix(code, rng);
        let g = match generator_matrix(&mut h, code) {
            Ok(g) => g,
            Err(Error::RankDeficient(_)) => {
                num_skipped += 1;
                continue;
            }
            Err(err) => return Err(err),
        };
        let four_cycles = count_four_cycles(&h);
        cycle_sum += four_cycles;
        num_successful += 1;
        if best.as_ref().map_or(true, |&(_, _, best_cycles)| four_cycles < best_cycles) {
            eprintln!("[Trial {trial}] Best 4-cycle count so far: {four_cycles}");
            best = Some((h, g, four_cycles));
        }
    }
    let Some((h, g, four_cycles)) = best else {
        return Err(Error::RankDeficient(format!(
            "All {num_trials} trials produced a rank-deficient parity-check matrix",
        )));
    };
    Ok(SearchOutcome {
        h,
        g,
        four_cycles,
        mean_four_cycles: cycle_sum as f64 / f64::from(num_successful),
        num_skipped,
    })
}
