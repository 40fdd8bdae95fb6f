//! # BER simulation of a regular LDPC code over a BPSK-AWGN channel
//!
//! The [`bpsk_awgn_sim`] function simulates the performance of one (H, G)
//! matrix pair at a single Eb/N0 point; [`run_bpsk_awgn_sims`] sweeps a list
//! of such points against the same pair and saves the results to a JSON
//! file. The parameters of a simulation and the results from it are captured
//! in the [`SimParams`] and [`SimResults`] structs, respectively.
//!
//! # Examples
//!
//! This example simulates a small code at an Eb/N0 of 4 dB:
//! ```
//! use ldpc::{generator_matrix, parity_check_matrix, sim, CodeParams};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let code = CodeParams::new(12, 3, 4)?;
//! let mut h = parity_check_matrix(&code, &mut rng);
//! let g = generator_matrix(&mut h, &code)?;
//! let params = sim::SimParams {
//!     n: 12,
//!     wc: 3,
//!     wr: 4,
//!     eb_over_n0_db: 4.0,
//!     max_spa_iter: 40,
//!     num_block_errors_min: 0,
//!     num_blocks_per_run: 10,
//!     num_runs_min: 1,
//!     num_runs_max: 2,
//! };
//! let results = sim::bpsk_awgn_sim(&params, &h, &g, &mut rng)?;
//! assert_eq!(results.num_blocks, 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;

use crate::{decode, encode, utils, BinMatrix, CodeParams, Error};

/// Parameters for LDPC simulation over a BPSK-AWGN channel
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct SimParams {
    /// Codeword length
    pub n: usize,
    /// Column weight of the parity-check matrix
    pub wc: usize,
    /// Row weight of the parity-check matrix
    pub wr: usize,
    /// Ratio (dB) of energy per information bit to noise power spectral
    /// density at the BPSK-AWGN channel output
    pub eb_over_n0_db: f64,
    /// Maximum number of sum-product iterations per block
    pub max_spa_iter: u32,
    /// Desired minimum number of block errors
    pub num_block_errors_min: u32,
    /// Number of blocks to be transmitted per run
    pub num_blocks_per_run: u32,
    /// Minimum number of runs of blocks to be simulated
    pub num_runs_min: u32,
    /// Maximum number of runs of blocks to be simulated
    pub num_runs_max: u32,
}

impl SimParams {
    /// Checks validity of simulation parameters, returning the code
    /// dimensions they describe.
    fn check(&self) -> Result<CodeParams, Error> {
        let code = CodeParams::new(self.n, self.wc, self.wr)?;
        if self.num_blocks_per_run == 0 {
            return Err(Error::InvalidInput(
                "Number of blocks per run cannot be zero".to_string(),
            ));
        }
        if self.num_runs_min > self.num_runs_max {
            return Err(Error::InvalidInput(format!(
                "Minimum number of runs ({}) exceeds maximum number of runs ({})",
                self.num_runs_min, self.num_runs_max,
            )));
        }
        Ok(code)
    }

    /// Prints simulation parameters.
    fn print(&self) {
        eprintln!();
        self.print_code_dimensions();
        self.print_eb_over_n0_db();
        self.print_max_spa_iter();
        self.print_num_block_errors_min();
        self.print_num_blocks_per_run();
        self.print_num_runs_min();
        self.print_num_runs_max();
    }

    /// Prints code dimensions.
    fn print_code_dimensions(&self) {
        eprintln!(
            "({}, {}) regular LDPC code of length {}",
            self.wc, self.wr, self.n,
        );
    }

    /// Prints Eb/N0 (dB) value.
    fn print_eb_over_n0_db(&self) {
        eprintln!("Eb/N0 of {} dB", self.eb_over_n0_db);
    }

    /// Prints maximum number of sum-product iterations per block.
    fn print_max_spa_iter(&self) {
        eprintln!("Up to {} sum-product iterations", self.max_spa_iter);
    }

    /// Prints desired minimum number of block errors.
    fn print_num_block_errors_min(&self) {
        eprintln!("Minimum of {} block errors", self.num_block_errors_min);
    }

    /// Prints number of blocks to be transmitted per run.
    fn print_num_blocks_per_run(&self) {
        eprintln!("{} blocks per run", self.num_blocks_per_run);
    }

    /// Prints minimum number of runs of blocks to be simulated.
    fn print_num_runs_min(&self) {
        eprintln!("Minimum of {} runs", self.num_runs_min);
    }

    /// Prints maximum number of runs of blocks to be simulated.
    fn print_num_runs_max(&self) {
        eprintln!("Maximum of {} runs", self.num_runs_max);
    }
}

/// Results from LDPC simulation over a BPSK-AWGN channel
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct SimResults {
    /// Simulation parameters
    pub params: SimParams,
    /// Number of blocks transmitted
    pub num_blocks: u32,
    /// Number of information bits transmitted
    pub num_info_bits: u64,
    /// Number of block errors
    pub num_block_errors: u32,
    /// Number of information bit errors
    pub num_info_bit_errors: u64,
    /// Theoretical bit error rate of uncoded BPSK at the same Eb/N0
    pub uncoded_ber: f64,
}

impl SimResults {
    /// Returns initialized simulation results.
    #[must_use]
    fn new(params: &SimParams) -> Self {
        Self {
            params: *params,
            num_blocks: 0,
            num_info_bits: 0,
            num_block_errors: 0,
            num_info_bit_errors: 0,
            uncoded_ber: utils::bpsk_theoretical_ber(params.eb_over_n0_db),
        }
    }

    /// Returns block error rate.
    #[must_use]
    pub fn block_error_rate(&self) -> f64 {
        if self.num_blocks > 0 {
            f64::from(self.num_block_errors) / f64::from(self.num_blocks)
        } else {
            0.0
        }
    }

    /// Returns information bit error rate.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn info_bit_error_rate(&self) -> f64 {
        if self.num_info_bits > 0 {
            self.num_info_bit_errors as f64 / self.num_info_bits as f64
        } else {
            0.0
        }
    }

    /// Prints progress message.
    fn print_progress_message(&self) {
        if self.run_complete() {
            eprint!(
                "\rN = {:5}, Eb/N0 = {:6.3} dB: \
                 BER = {:9.4e}, BLER = {:9.4e} ({}/{}, {}/{})",
                self.params.n,
                self.params.eb_over_n0_db,
                self.info_bit_error_rate(),
                self.block_error_rate(),
                self.num_info_bit_errors,
                self.num_info_bits,
                self.num_block_errors,
                self.num_blocks,
            );
            if self.sim_complete() {
                eprintln!();
            }
        }
    }

    /// Returns `true` iff a run of blocks is now complete.
    fn run_complete(&self) -> bool {
        self.num_blocks % self.params.num_blocks_per_run == 0
    }

    /// Returns `true` iff the simulation is now complete.
    fn sim_complete(&self) -> bool {
        self.run_complete()
            && self.num_blocks >= self.params.num_runs_min * self.params.num_blocks_per_run
            && (self.num_block_errors >= self.params.num_block_errors_min
                || self.num_blocks >= self.params.num_runs_max * self.params.num_blocks_per_run)
    }

    /// Updates simulation results after a block.
    fn update_after_block(&mut self, num_info_bit_errors_this_block: u32, k: usize) {
        self.num_blocks += 1;
        self.num_info_bits += k as u64;
        if num_info_bit_errors_this_block > 0 {
            self.num_block_errors += 1;
            self.num_info_bit_errors += u64::from(num_info_bit_errors_this_block);
        }
    }
}

/// Runs simulation of an LDPC code over a BPSK-AWGN channel.
///
/// Each block draws random information bits, encodes them with `g`, passes
/// the BPSK-modulated codeword through an AWGN channel at the Eb/N0 of
/// `params`, and decodes the channel LLR values against `h` with the
/// sum-product algorithm. Blocks keep being transmitted until the desired
/// number of block errors has been seen or the run bounds are exhausted.
///
/// # Parameters
///
/// - `params`: Parameters for the simulation.
///
/// - `h`: Parity-check matrix, as permuted by
///   [`generator_matrix`](crate::generator_matrix).
///
/// - `g`: Generator matrix belonging to `h`.
///
/// - `rng`: Random number generator for the simulation.
///
/// # Returns
///
/// - `results`: Results from the simulation.
///
/// # Errors
///
/// Returns an error if `params` is invalid or if the shapes of `h` and `g`
/// do not match the code dimensions in `params`.
#[allow(clippy::cast_possible_truncation)]
pub fn bpsk_awgn_sim<R: Rng>(
    params: &SimParams,
    h: &BinMatrix,
    g: &BinMatrix,
    rng: &mut R,
) -> Result<SimResults, Error> {
    let code = params.check()?;
    check_matrix_shapes(&code, h, g)?;
    let mut results = SimResults::new(params);
    while !results.sim_complete() {
        let info_bits = utils::random_bits(code.k(), rng);
        let code_bits = encode(&info_bits, g)?;
        let code_bits_llr =
            utils::bpsk_awgn_channel(&code_bits, params.eb_over_n0_db, code.rate(), rng);
        let decoded = decode(&code_bits_llr, h, params.max_spa_iter)?;
        let num_info_bit_errors_this_block =
            utils::error_count(&decoded.info_bits, &info_bits);
        results.update_after_block(num_info_bit_errors_this_block as u32, code.k());
        results.print_progress_message();
    }
    Ok(results)
}

/// Runs simulations of an LDPC code over a BPSK-AWGN channel at several
/// Eb/N0 points and saves results to a JSON file.
///
/// # Parameters
///
/// - `all_params`: Parameters for each simulation scenario of interest.
///
/// - `h`: Parity-check matrix used for every scenario.
///
/// - `g`: Generator matrix belonging to `h`.
///
/// - `rng`: Random number generator for the simulations.
///
/// - `json_filename`: Name of the JSON file to which all simulation results
///   must be written.
///
/// # Errors
///
/// Returns an error if there is an error in creating or writing to the JSON
/// file for the simulation results.
pub fn run_bpsk_awgn_sims<R: Rng>(
    all_params: &[SimParams],
    h: &BinMatrix,
    g: &BinMatrix,
    rng: &mut R,
    json_filename: &str,
) -> Result<(), Error> {
    let mut all_results = Vec::with_capacity(all_params.len());
    for params in all_params {
        params.print();
        if let Ok(results) = bpsk_awgn_sim(params, h, g, rng) {
            all_results.push(results);
        } else {
            eprintln!("WARNING: Invalid simulation parameters");
        }
    }
    save_all_sim_results_to_file(&all_results, json_filename)?;
    Ok(())
}

/// Saves all simulation results to a JSON file.
///
/// # Parameters
///
/// - `all_results`: All simulation results to be saved.
///
/// - `json_filename`: Name of the JSON file to which all simulation results
///   must be written.
///
/// # Errors
///
/// Returns an error if creating or writing to the JSON file fails.
pub fn save_all_sim_results_to_file(
    all_results: &[SimResults],
    json_filename: &str,
) -> Result<(), Error> {
    let writer = BufWriter::new(File::create(json_filename)?);
    serde_json::to_writer_pretty(writer, all_results)?;
    Ok(())
}

/// Returns all simulation results from a JSON file.
///
/// # Parameters
///
/// - `json_filename`: Name of the JSON file from which all simulation results
///   must be read.
///
/// # Errors
///
/// Returns an error if opening or reading from the JSON file fails.
pub fn all_sim_results_from_file(json_filename: &str) -> Result<Vec<SimResults>, Error> {
    let reader = BufReader::new(File::open(json_filename)?);
    let all_results = serde_json::from_reader(reader)?;
    Ok(all_results)
}

/// Checks that the matrix shapes match the code dimensions.
fn check_matrix_shapes(code: &CodeParams, h: &BinMatrix, g: &BinMatrix) -> Result<(), Error> {
    if h.num_rows() != code.m() || h.num_cols() != code.n() {
        return Err(Error::InvalidInput(format!(
            "Expected a {} x {} parity-check matrix (found {} x {})",
            code.m(),
            code.n(),
            h.num_rows(),
            h.num_cols()
        )));
    }
    if g.num_rows() != code.k() || g.num_cols() != code.n() {
        return Err(Error::InvalidInput(format!(
            "Expected a {} x {} generator matrix (found {} x {})",
            code.k(),
            code.n(),
            g.num_rows(),
            g.num_cols()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generator_matrix, parity_check_matrix};
    use float_eq::assert_float_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params_for_test() -> SimParams {
        SimParams {
            n: 12,
            wc: 3,
            wr: 4,
            eb_over_n0_db: 4.0,
            max_spa_iter: 20,
            num_block_errors_min: 0,
            num_blocks_per_run: 10,
            num_runs_min: 1,
            num_runs_max: 2,
        }
    }

    #[test]
    fn test_check() {
        assert!(params_for_test().check().is_ok());
        let mut params = params_for_test();
        params.wr = 3;
        assert!(params.check().is_err());
        let mut params = params_for_test();
        params.num_blocks_per_run = 0;
        assert!(params.check().is_err());
        let mut params = params_for_test();
        params.num_runs_min = 3;
        assert!(params.check().is_err());
    }

    #[test]
    fn test_results_rates() {
        let mut results = SimResults::new(&params_for_test());
        assert_float_eq!(results.block_error_rate(), 0.0, abs <= 0.0);
        assert_float_eq!(results.info_bit_error_rate(), 0.0, abs <= 0.0);
        results.update_after_block(0, 3);
        results.update_after_block(2, 3);
        assert_eq!(results.num_blocks, 2);
        assert_eq!(results.num_info_bits, 6);
        assert_eq!(results.num_block_errors, 1);
        assert_eq!(results.num_info_bit_errors, 2);
        assert_float_eq!(results.block_error_rate(), 0.5, abs <= 1e-12);
        assert_float_eq!(results.info_bit_error_rate(), 1.0 / 3.0, abs <= 1e-12);
    }

    #[test]
    fn test_sim_complete() {
        let mut results = SimResults::new(&params_for_test());
        for _ in 0 .. 9 {
            results.update_after_block(0, 3);
            assert!(!results.sim_complete());
        }
        // Tenth block completes the first run; with num_block_errors_min of
        // 0 the simulation is then complete.
        results.update_after_block(0, 3);
        assert!(results.sim_complete());
    }

    #[test]
    fn test_bpsk_awgn_sim() {
        let mut rng = StdRng::seed_from_u64(53);
        let params = params_for_test();
        let code = CodeParams::new(12, 3, 4).unwrap();
        let mut h = parity_check_matrix(&code, &mut rng);
        let g = generator_matrix(&mut h, &code).unwrap();
        // Shape mismatch
        let wrong_g = BinMatrix::zeros(4, 12);
        assert!(bpsk_awgn_sim(&params, &h, &wrong_g, &mut rng).is_err());
        // Valid run stops after the first run of blocks
        let results = bpsk_awgn_sim(&params, &h, &g, &mut rng).unwrap();
        assert_eq!(results.num_blocks, 10);
        assert_eq!(results.num_info_bits, 30);
        assert!(results.num_block_errors <= 10);
    }

    #[test]
    fn test_save_and_load_results() {
        let mut results = SimResults::new(&params_for_test());
        results.update_after_block(1, 3);
        let path = std::env::temp_dir().join("ldpc_sim_results_round_trip_test.json");
        let path_str = path.to_str().unwrap();
        save_all_sim_results_to_file(&[results], path_str).unwrap();
        let all_results = all_sim_results_from_file(path_str).unwrap();
        assert_eq!(all_results.len(), 1);
        assert_eq!(all_results[0], results);
        std::fs::remove_file(&path).unwrap();
    }
}
