//! Counting of length-4 cycles in the Tanner graph of a parity-check matrix

use crate::BinMatrix;

/// Returns the number of length-4 cycles in the Tanner graph of the given
/// parity-check matrix.
///
/// Two distinct variable nodes that share `s >= 2` check nodes close
/// `s * (s - 1) / 2` distinct 4-cycles, so the count is the sum of that
/// quantity over all unordered pairs of columns of `h`. Short cycles degrade
/// belief-propagation performance, which makes this count a useful quality
/// score when drawing candidate matrices.
///
/// The count is invariant under row permutations and column permutations of
/// `h`, so it may be taken before or after the systematic reduction permutes
/// columns.
///
/// # Parameters
///
/// - `h`: Parity-check matrix.
///
/// # Examples
///
/// ```
/// use ldpc::{count_four_cycles, BinMatrix};
///
/// let h = BinMatrix::from_rows(&[vec![1, 1, 0], vec![1, 1, 0]])?;
/// assert_eq!(count_four_cycles(&h), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn count_four_cycles(h: &BinMatrix) -> u64 {
    let num_checks = h.num_rows();
    let num_vars = h.num_cols();
    // Check nodes incident to each variable node, in row-index order.
    let incident_checks: Vec<Vec<usize>> = (0 .. num_vars)
        .map(|var| (0 .. num_checks).filter(|&check| h.get(check, var) == 1).collect())
        .collect();
    let mut count: u64 = 0;
    for var_a in 0 .. num_vars {
        for var_b in var_a + 1 .. num_vars {
            let shared = incident_checks[var_a]
                .iter()
                .filter(|&check| incident_checks[var_b].contains(check))
                .count() as u64;
            if shared >= 2 {
                count += shared * (shared - 1) / 2;
            }
        }
    }
    count
}
