//! # Regular LDPC codes: construction, analysis, and sum-product decoding
//!
//! This crate implements the construction of a regular _low-density
//! parity-check_ (LDPC) code by Gallager's method, the derivation of a
//! systematic generator matrix from its parity-check matrix by Gaussian
//! elimination over GF(2), the counting of length-4 cycles in the associated
//! Tanner graph as a structural quality score, and iterative decoding with
//! the _sum-product algorithm_ (SPA).
//!
//! The [`parity_check_matrix`] function draws a regular parity-check matrix
//! `H`, and [`generator_matrix`] turns it into a generator `G` whose last `K`
//! columns form the identity (permuting columns of `H` in place where the
//! elimination requires it). The [`encode`] and [`decode`] functions handle
//! encoding against `G` and belief-propagation decoding against `H`,
//! respectively, while [`count_four_cycles`] scores the Tanner graph of a
//! candidate matrix. The [`Bit`] enum represents binary symbol values, and
//! dense GF(2) matrices are held in the [`BinMatrix`] struct. The code below
//! illustrates their usage through a toy example.
//!
//! # Examples
//!
//! ```
//! use ldpc::{decode, encode, generator_matrix, parity_check_matrix, Bit, CodeParams};
//! use rand::{rngs::StdRng, SeedableRng};
//! use Bit::{One, Zero};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let params = CodeParams::new(12, 3, 4)?; // N = 12, wc = 3, wr = 4
//!
//! // Matrix construction
//! let mut h = parity_check_matrix(&params, &mut rng);
//! let g = generator_matrix(&mut h, &params)?; // h is column-permuted here
//!
//! // Encoding; the last K code bits are the information bits themselves
//! let info_bits = [One, Zero, One];
//! let code_bits = encode(&info_bits, &g)?;
//! assert_eq!(&code_bits[9 ..], info_bits);
//!
//! // Noiseless decoding (positive LLR means a one was sent)
//! let code_bits_llr: Vec<f64> = code_bits
//!     .iter()
//!     .map(|&bit| if bit == One { 10.0 } else { -10.0 })
//!     .collect();
//! let result = decode(&code_bits_llr, &h, 40)?;
//! assert!(result.syndrome_ok);
//! assert_eq!(result.info_bits, info_bits);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The [`sim`] module evaluates the performance of a code over a BPSK-AWGN
//! channel by Monte Carlo simulation, the [`search`] module draws candidate
//! matrix pairs and keeps the one with the fewest 4-cycles, and the [`utils`]
//! module has some useful functions for such simulations. All randomized
//! operations take the random number generator as an explicit parameter, so
//! parallel drivers can seed independent generators per worker.

#![warn(
    clippy::complexity,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_import_braces,
    unused_qualifications
)]

mod common;
mod cycles;
mod decoder;
mod encoder;
mod gallager;
mod matrix;
mod params;
pub mod search;
pub mod sim;
mod systematic;
pub mod utils;

pub use common::{Bit, Error};
pub use cycles::count_four_cycles;
pub use decoder::{decode, llr_from_symbol_probs, DecodeResult};
pub use encoder::encode;
pub use gallager::parity_check_matrix;
pub use matrix::BinMatrix;
pub use params::CodeParams;
pub use systematic::generator_matrix;
