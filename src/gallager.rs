//! Gallager construction of a regular LDPC parity-check matrix

use rand::Rng;

use crate::{BinMatrix, CodeParams};

/// Returns a regular (wc, wr) parity-check matrix built by Gallager's
/// construction.
///
/// The `M = N * wc / wr` rows are divided into `wc` horizontal bands of
/// `M / wc` rows each. In band 0, row `r` has ones in columns
/// `[r * wr, (r + 1) * wr)`; every subsequent band is band 0 with its columns
/// permuted by a fresh random permutation. Each band therefore covers every
/// column exactly once, so every column of the result has weight `wc` and
/// every row has weight `wr`.
///
/// # Parameters
///
/// - `params`: Code dimension parameters.
///
/// - `rng`: Random number generator supplying the band permutations.
///
/// # Examples
///
/// ```
/// use ldpc::{parity_check_matrix, CodeParams};
///
/// let params = CodeParams::new(12, 3, 4)?;
/// let h = parity_check_matrix(&params, &mut rand::rng());
/// assert_eq!((h.num_rows(), h.num_cols()), (9, 12));
/// assert!((0 .. 12).all(|j| h.col_weight(j) == 3));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parity_check_matrix<R: Rng>(params: &CodeParams, rng: &mut R) -> BinMatrix {
    let n = params.n();
    let wr = params.wr();
    let block_rows = params.block_rows();
    let mut h = BinMatrix::zeros(params.m(), n);
    // Band 0: row r covers columns [r * wr, (r + 1) * wr).
    for r in 0 .. block_rows {
        for c in r * wr .. (r + 1) * wr {
            h.set(r, c, 1);
        }
    }
    // Bands 1 .. wc: band 0 with columns permuted.
    let mut perm: Vec<usize> = (0 .. n).collect();
    for band in 1 .. params.wc() {
        shuffle(&mut perm, rng);
        for r in 0 .. block_rows {
            for c in 0 .. n {
                let val = h.get(r, perm[c]);
                h.set(band * block_rows + r, c, val);
            }
        }
    }
    h
}

/// Resets `perm` to the identity and shuffles it by one random transposition
/// per position.
fn shuffle<R: Rng>(perm: &mut [usize], rng: &mut R) {
    for (idx, entry) in perm.iter_mut().enumerate() {
        *entry = idx;
    }
    for idx in 0 .. perm.len() {
        let other = rng.random_range(0 .. perm.len());
        perm.swap(idx, other);
    }
}
