//! Systematic generator matrix construction from a parity-check matrix

use crate::{BinMatrix, CodeParams, Error};

/// Returns the systematic generator matrix for a given parity-check matrix.
///
/// The construction runs a two-phase column-wise Gauss-Jordan elimination over
/// GF(2) on the extended workspace `X = [H^T | I_N]`. Phase A pivots the first
/// `M` columns; any column swap it needs stays inside `X`. Phase B pivots the
/// last `K` columns of the right half; a column swap there involves two
/// columns of the right half, and the corresponding columns of `h` are swapped
/// as well so that the extracted generator remains a right-kernel basis of the
/// permuted `h`. The generator is the bottom-right `K x N` block of `X`.
///
/// On success, every row of the returned `K x N` generator is a codeword of
/// the (possibly column-permuted) `h`, and the last `K` columns of the
/// generator form the `K x K` identity.
///
/// # Parameters
///
/// - `h`: Parity-check matrix of shape `M x N`. May be column-permuted in
///   place; callers must use the permuted matrix for all later encoding and
///   decoding against the returned generator.
///
/// - `params`: Code dimension parameters matching `h`.
///
/// # Errors
///
/// Returns an error if the shape of `h` does not match `params`, or if `h` is
/// too rank-deficient for a systematic pivot to be placed in every one of the
/// last `K` columns (in which case `h` may have been partially permuted and
/// should be rebuilt).
///
/// # Examples
///
/// ```
/// use ldpc::{generator_matrix, parity_check_matrix, CodeParams};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let params = CodeParams::new(12, 3, 4)?;
/// let mut h = parity_check_matrix(&params, &mut StdRng::seed_from_u64(1));
/// let g = generator_matrix(&mut h, &params)?;
/// assert_eq!((g.num_rows(), g.num_cols()), (3, 12));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generator_matrix(h: &mut BinMatrix, params: &CodeParams) -> Result<BinMatrix, Error> {
    let n = params.n();
    let m = params.m();
    let k = params.k();
    if h.num_rows() != m || h.num_cols() != n {
        return Err(Error::InvalidInput(format!(
            "Expected a {} x {} parity-check matrix (found {} x {})",
            m,
            n,
            h.num_rows(),
            h.num_cols()
        )));
    }

    // X = [H^T | I_N], of shape N x (M + N).
    let mut x = BinMatrix::zeros(n, m + n);
    for row in 0 .. n {
        for col in 0 .. m {
            let val = h.get(col, row);
            x.set(row, col, val);
        }
        x.set(row, m + row, 1);
    }

    // Phase A: pivot columns 0 .. M of X. Column swaps stay inside X.
    for pivot_col in 0 .. m {
        if x.get(pivot_col, pivot_col) == 0 {
            if let Some(row) = find_pivot_row(&x, pivot_col, pivot_col) {
                x.swap_rows(row, pivot_col);
            } else if let Some(col) = find_pivot_col(&x, pivot_col, pivot_col + 1) {
                x.swap_cols(col, pivot_col);
            }
        }
        eliminate(&mut x, pivot_col, pivot_col);
    }

    // Phase B: pivot the last K columns of the right half. Column swaps here
    // are mirrored into H so that G stays consistent with the permuted H.
    for pivot_col in 2 * m .. m + n {
        let pivot_row = pivot_col - m;
        if x.get(pivot_row, pivot_col) == 0 {
            if let Some(row) = find_pivot_row(&x, pivot_col, pivot_row) {
                x.swap_rows(row, pivot_row);
            } else if let Some(col) = find_pivot_col(&x, pivot_row, m) {
                x.swap_cols(col, pivot_col);
                h.swap_cols(col - m, pivot_col - m);
            }
        }
        if x.get(pivot_row, pivot_col) == 0 {
            return Err(Error::RankDeficient(format!(
                "No pivot available for systematic column {} of the generator",
                pivot_col - 2 * m,
            )));
        }
        eliminate(&mut x, pivot_col, pivot_row);
    }

    // G is the bottom-right K x N block of X.
    let mut g = BinMatrix::zeros(k, n);
    for row in 0 .. k {
        for col in 0 .. n {
            let val = x.get(m + row, m + col);
            g.set(row, col, val);
        }
    }

    if !annihilates(&g, h) {
        return Err(Error::RankDeficient(
            "Generator does not annihilate the permuted parity-check matrix".to_string(),
        ));
    }
    debug_assert!(has_trailing_identity(&g, k));
    Ok(g)
}

/// Returns the first row strictly below `from_row` with a one in `col`.
fn find_pivot_row(x: &BinMatrix, col: usize, from_row: usize) -> Option<usize> {
    (from_row + 1 .. x.num_rows()).find(|&row| x.get(row, col) == 1)
}

/// Returns the rightmost column at or beyond `min_col` with a one in `row`.
fn find_pivot_col(x: &BinMatrix, row: usize, min_col: usize) -> Option<usize> {
    (min_col .. x.num_cols()).rev().find(|&col| x.get(row, col) == 1)
}

/// XOR-adds the pivot row into every other row with a one in the pivot column.
fn eliminate(x: &mut BinMatrix, pivot_col: usize, pivot_row: usize) {
    for row in 0 .. x.num_rows() {
        if row != pivot_row && x.get(row, pivot_col) == 1 {
            x.xor_row_into(pivot_row, row);
        }
    }
}

/// Returns `true` iff `g * h^T = 0` over GF(2), i.e. every row of `g` is a
/// codeword of `h`.
pub(crate) fn annihilates(g: &BinMatrix, h: &BinMatrix) -> bool {
    (0 .. g.num_rows()).all(|g_row| {
        (0 .. h.num_rows()).all(|h_row| {
            let ones = g
                .row(g_row)
                .iter()
                .zip(h.row(h_row))
                .filter(|&(&a, &b)| a & b == 1)
                .count();
            ones % 2 == 0
        })
    })
}

/// Returns `true` iff the last `k` columns of `g` form the `k x k` identity.
fn has_trailing_identity(g: &BinMatrix, k: usize) -> bool {
    let offset = g.num_cols() - k;
    (0 .. k).all(|row| {
        (0 .. k).all(|col| g.get(row, offset + col) == u8::from(row == col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parity_check_matrix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shape_mismatch() {
        let params = CodeParams::new(12, 3, 4).unwrap();
        let mut h = BinMatrix::zeros(8, 12);
        assert!(generator_matrix(&mut h, &params).is_err());
    }

    #[test]
    fn test_generator_annihilates_permuted_h() {
        for seed in 0 .. 8 {
            let params = CodeParams::new(12, 3, 4).unwrap();
            let mut h = parity_check_matrix(&params, &mut StdRng::seed_from_u64(seed));
            let g = generator_matrix(&mut h, &params).unwrap();
            assert_eq!(g.num_rows(), 3);
            assert_eq!(g.num_cols(), 12);
            assert!(annihilates(&g, &h));
        }
    }

    #[test]
    fn test_generator_has_trailing_identity() {
        let params = CodeParams::new(24, 2, 4).unwrap();
        let mut h = parity_check_matrix(&params, &mut StdRng::seed_from_u64(5));
        let g = generator_matrix(&mut h, &params).unwrap();
        assert!(has_trailing_identity(&g, params.k()));
    }

    #[test]
    fn test_column_permutation_preserves_weights() {
        // Phase B swaps whole columns of H, so the regular weight profile of
        // the Gallager construction must survive the reduction.
        let params = CodeParams::new(12, 3, 4).unwrap();
        let mut h = parity_check_matrix(&params, &mut StdRng::seed_from_u64(2));
        generator_matrix(&mut h, &params).unwrap();
        assert!((0 .. h.num_rows()).all(|i| h.row_weight(i) == 4));
        assert!((0 .. h.num_cols()).all(|j| h.col_weight(j) == 3));
    }

    #[test]
    fn test_typical_case() {
        let params = CodeParams::new(120, 3, 6).unwrap();
        let mut h = parity_check_matrix(&params, &mut StdRng::seed_from_u64(13));
        let g = generator_matrix(&mut h, &params).unwrap();
        assert_eq!(g.num_rows(), 60);
        assert!(annihilates(&g, &h));
        assert!(has_trailing_identity(&g, 60));
    }

    #[test]
    fn test_annihilates() {
        let h = BinMatrix::from_rows(&[vec![1, 1, 0], vec![0, 1, 1]]).unwrap();
        let g_good = BinMatrix::from_rows(&[vec![1, 1, 1]]).unwrap();
        let g_bad = BinMatrix::from_rows(&[vec![1, 0, 1]]).unwrap();
        assert!(annihilates(&g_good, &h));
        assert!(!annihilates(&g_bad, &h));
    }
}
