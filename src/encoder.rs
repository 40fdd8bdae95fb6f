//! GF(2) encoder mapping information bits to a codeword

use crate::{BinMatrix, Bit, Error};

/// Returns the codeword obtained by multiplying the information bits with the
/// generator matrix over GF(2).
///
/// Code bit `i` is the XOR over `j` of `info_bits[j] AND g[j][i]`. With a
/// generator from [`generator_matrix`](crate::generator_matrix), whose last
/// `K` columns form the identity, the last `K` code bits equal the
/// information bits, i.e. the encoding is systematic.
///
/// # Parameters
///
/// - `info_bits`: Information bits to be encoded; must number `g.num_rows()`.
///
/// - `g`: Generator matrix of shape `K x N`.
///
/// # Errors
///
/// Returns an error if `info_bits.len()` differs from `g.num_rows()`.
///
/// # Examples
///
/// ```
/// use ldpc::{encode, BinMatrix, Bit};
/// use Bit::{One, Zero};
///
/// let g = BinMatrix::from_rows(&[vec![1, 1, 0, 1, 0], vec![0, 1, 1, 0, 1]])?;
/// let code_bits = encode(&[One, Zero], &g)?;
/// assert_eq!(code_bits, [One, One, Zero, One, Zero]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encode(info_bits: &[Bit], g: &BinMatrix) -> Result<Vec<Bit>, Error> {
    if info_bits.len() != g.num_rows() {
        return Err(Error::InvalidInput(format!(
            "Expected {} information bits (found {})",
            g.num_rows(),
            info_bits.len()
        )));
    }
    let code_bits = (0 .. g.num_cols())
        .map(|col| {
            let acc = info_bits
                .iter()
                .enumerate()
                .fold(0u8, |acc, (row, bit)| acc ^ (bit.as_u8() & g.get(row, col)));
            Bit::from_u8(acc)
        })
        .collect();
    Ok(code_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generator_matrix, parity_check_matrix, systematic, utils, CodeParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use Bit::{One, Zero};

    #[test]
    fn test_length_mismatch() {
        let g = BinMatrix::from_rows(&[vec![1, 0, 1], vec![0, 1, 1]]).unwrap();
        assert!(encode(&[One], &g).is_err());
    }

    #[test]
    fn test_encode_small() {
        let g = BinMatrix::from_rows(&[vec![1, 1, 0, 1, 0], vec![0, 1, 1, 0, 1]]).unwrap();
        assert_eq!(encode(&[Zero, Zero], &g).unwrap(), [Zero; 5]);
        assert_eq!(
            encode(&[One, One], &g).unwrap(),
            [One, Zero, One, One, One]
        );
    }

    #[test]
    fn test_codewords_satisfy_parity_checks() {
        let params = CodeParams::new(12, 3, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(29);
        let mut h = parity_check_matrix(&params, &mut rng);
        let g = generator_matrix(&mut h, &params).unwrap();
        for _ in 0 .. 8 {
            let info_bits = utils::random_bits(params.k(), &mut rng);
            let code_bits = encode(&info_bits, &g).unwrap();
            let code_row: Vec<u8> = code_bits.iter().map(|bit| bit.as_u8()).collect();
            let codeword = BinMatrix::from_rows(&[code_row]).unwrap();
            assert!(systematic::annihilates(&codeword, &h));
        }
    }

    #[test]
    fn test_systematic_bits_pass_through() {
        let params = CodeParams::new(12, 3, 4).unwrap();
        let mut h = parity_check_matrix(&params, &mut StdRng::seed_from_u64(31));
        let g = generator_matrix(&mut h, &params).unwrap();
        let info_bits = [One, Zero, One];
        let code_bits = encode(&info_bits, &g).unwrap();
        assert_eq!(&code_bits[params.m() ..], info_bits);
    }
}
