//! This crate generates regular LDPC parity-check/generator matrix pairs
//! (searching for a pair with few 4-cycles in its Tanner graph) and simulates
//! the BER-versus-SNR and BLER-versus-SNR performance of such a code over a
//! BPSK-AWGN channel with sum-product decoding. Matrices are saved to and
//! loaded from CSV-style text files, and simulation results are saved to a
//! JSON file.
//!
//! Build the executable with `cargo build --release` and then run
//! `./target/release/ldpc -h` for help on the command-line interface.

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

use anyhow::Result;
use clap::parser::ValueSource;
use clap::{crate_name, crate_version, value_parser, Arg, ArgMatches, Command};
use ldpc::{search, sim, BinMatrix, CodeParams};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Main function
fn main() -> Result<()> {
    let timer = Instant::now();
    let mut rng = rand::rng();
    let matches = command_line_parser().get_matches();
    match matches.subcommand() {
        Some(("gen", sub_matches)) => run_gen(sub_matches, &mut rng)?,
        Some(("ber", sub_matches)) => run_ber(sub_matches, &mut rng)?,
        _ => unreachable!("Subcommand is required"),
    }
    eprintln!("Elapsed time: {:.3?}", timer.elapsed());
    Ok(())
}

/// Runs the `gen` subcommand: searches for a low-4-cycle matrix pair and
/// saves it.
fn run_gen<R: Rng>(matches: &ArgMatches, rng: &mut R) -> Result<()> {
    let code = code_params_from_matches(matches)?;
    let num_trials = num_search_trials_from_matches(matches);
    let outcome = search::min_cycle_search(&code, num_trials, rng)?;
    let dir = PathBuf::from(output_dir_from_matches(matches)).join(format!(
        "N{}_wc{}_wr{}",
        code.n(),
        code.wc(),
        code.wr()
    ));
    std::fs::create_dir_all(&dir)?;
    outcome.h.to_file(dir.join("H.csv"))?;
    outcome.g.to_file(dir.join("G.csv"))?;
    write_info_file(&dir.join("info.txt"), &code, num_trials, &outcome)?;
    eprintln!("Matrices saved under directory: {}", dir.display());
    Ok(())
}

/// Runs the `ber` subcommand: sweeps Eb/N0 and saves BER/BLER results.
fn run_ber<R: Rng>(matches: &ArgMatches, rng: &mut R) -> Result<()> {
    let code = code_params_from_matches(matches)?;
    let (h, g) = matrices_from_matches(matches, &code, rng)?;
    let json_filename = json_filename_from_matches(matches);
    sim::run_bpsk_awgn_sims(&all_sim_params(matches, &code), &h, &g, rng, &json_filename)?;
    eprintln!("Results saved to {json_filename}");
    Ok(())
}

/// Writes a human-readable summary of a matrix search.
fn write_info_file(
    path: &Path,
    code: &CodeParams,
    num_trials: u32,
    outcome: &search::SearchOutcome,
) -> Result<()> {
    std::fs::write(
        path,
        format!(
            "LDPC matrix generation\n\
             Code rate R = {:.5}\n\
             N = {}\n\
             wc = {}\n\
             wr = {}\n\
             Trials = {}\n\
             Skipped trials = {}\n\
             Best 4-cycles = {}\n\
             Mean 4-cycles = {:.3}\n",
            code.rate(),
            code.n(),
            code.wc(),
            code.wr(),
            num_trials,
            outcome.num_skipped,
            outcome.four_cycles,
            outcome.mean_four_cycles,
        ),
    )?;
    Ok(())
}

/// Returns the matrix pair to simulate with: loaded from the given directory
/// if one was named, freshly searched for otherwise.
fn matrices_from_matches<R: Rng>(
    matches: &ArgMatches,
    code: &CodeParams,
    rng: &mut R,
) -> Result<(BinMatrix, BinMatrix)> {
    if let Some(dir) = matches.get_one::<String>("matrix_dir") {
        let dir = PathBuf::from(dir);
        let h = BinMatrix::from_file(dir.join("H.csv"), code.m(), code.n())?;
        let g = BinMatrix::from_file(dir.join("G.csv"), code.k(), code.n())?;
        Ok((h, g))
    } else {
        let outcome =
            search::min_cycle_search(code, num_search_trials_from_matches(matches), rng)?;
        Ok((outcome.h, outcome.g))
    }
}

/// Returns command line parser.
fn command_line_parser() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about(
            "Generates regular LDPC codes and evaluates their performance \
             over a BPSK-AWGN channel",
        )
        .subcommand_required(true)
        .subcommand(gen_command())
        .subcommand(ber_command())
}

/// Returns the `gen` subcommand.
fn gen_command() -> Command {
    Command::new("gen")
        .about("Searches for a low-4-cycle H/G matrix pair and saves it to CSV files")
        .arg(codeword_length())
        .arg(column_weight())
        .arg(row_weight())
        .arg(num_search_trials())
        .arg(output_dir())
}

/// Returns the `ber` subcommand.
fn ber_command() -> Command {
    Command::new("ber")
        .about("Evaluates the BER/BLER of a regular LDPC code over a BPSK-AWGN channel")
        .arg(codeword_length())
        .arg(column_weight())
        .arg(row_weight())
        .arg(matrix_dir())
        .arg(num_search_trials())
        .arg(max_spa_iter())
        .arg(first_snr_db())
        .arg(snr_step_db())
        .arg(num_snr())
        .arg(num_block_errors_min())
        .arg(num_blocks_per_run())
        .arg(num_runs_min())
        .arg(num_runs_max())
        .arg(json_filename())
}

/// Returns argument for codeword length.
fn codeword_length() -> Arg {
    Arg::new("codeword_length")
        .short('n')
        .value_parser(value_parser!(usize))
        .default_value("1024")
        .help("Codeword length N")
}

/// Returns argument for column weight.
fn column_weight() -> Arg {
    Arg::new("column_weight")
        .short('c')
        .value_parser(value_parser!(usize))
        .default_value("3")
        .help("Column weight wc of the parity-check matrix")
}

/// Returns argument for row weight.
fn row_weight() -> Arg {
    Arg::new("row_weight")
        .short('w')
        .value_parser(value_parser!(usize))
        .default_value("6")
        .help("Row weight wr of the parity-check matrix")
}

/// Returns argument for number of matrix search trials.
fn num_search_trials() -> Arg {
    Arg::new("num_search_trials")
        .short('t')
        .value_parser(value_parser!(u32))
        .default_value("100")
        .help("Number of matrix pairs to draw when searching for few 4-cycles")
}

/// Returns argument for matrix output directory.
fn output_dir() -> Arg {
    Arg::new("output_dir")
        .short('o')
        .default_value("matrices")
        .help("Directory under which the matrix files must be saved")
}

/// Returns argument for directory holding previously saved matrices.
fn matrix_dir() -> Arg {
    Arg::new("matrix_dir")
        .short('m')
        .help("Directory holding H.csv and G.csv to simulate with (fresh matrices are drawn if absent)")
}

/// Returns argument for maximum number of sum-product iterations.
fn max_spa_iter() -> Arg {
    Arg::new("max_spa_iter")
        .short('i')
        .value_parser(value_parser!(u32))
        .default_value("40")
        .help("Maximum number of sum-product iterations per block")
}

/// Returns argument for first Eb/N0 (dB).
fn first_snr_db() -> Arg {
    Arg::new("first_snr_db")
        .short('r')
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
        .default_value("-2.0")
        .help("First Eb/N0 (dB)")
}

/// Returns argument for Eb/N0 step (dB).
fn snr_step_db() -> Arg {
    Arg::new("snr_step_db")
        .short('p')
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
        .default_value("0.5")
        .help("Eb/N0 step (dB)")
}

/// Returns argument for number of Eb/N0 values.
fn num_snr() -> Arg {
    Arg::new("num_snr")
        .short('s')
        .value_parser(value_parser!(u32))
        .default_value("25")
        .help("Number of Eb/N0 values")
}

/// Returns argument for desired minimum number of block errors.
fn num_block_errors_min() -> Arg {
    Arg::new("num_block_errors_min")
        .short('e')
        .value_parser(value_parser!(u32))
        .default_value("100")
        .help("Desired minimum number of block errors")
}

/// Returns argument for number of blocks to be transmitted per run.
fn num_blocks_per_run() -> Arg {
    Arg::new("num_blocks_per_run")
        .short('b')
        .value_parser(value_parser!(u32))
        .default_value("100")
        .help("Number of blocks to be transmitted per run")
}

/// Returns argument for minimum number of runs of blocks to be simulated.
fn num_runs_min() -> Arg {
    Arg::new("num_runs_min")
        .short('u')
        .value_parser(value_parser!(u32))
        .default_value("1")
        .help("Minimum number of runs of blocks to be simulated")
}

/// Returns argument for maximum number of runs of blocks to be simulated.
fn num_runs_max() -> Arg {
    Arg::new("num_runs_max")
        .short('x')
        .value_parser(value_parser!(u32))
        .default_value("100")
        .help("Maximum number of runs of blocks to be simulated")
}

/// Returns argument for name of JSON file to which results must be saved.
fn json_filename() -> Arg {
    Arg::new("json_filename")
        .short('f')
        .default_value("ldpc_ber.json")
        .help("Name of JSON file to which results must be saved")
}

/// Returns code parameters based on command-line arguments.
fn code_params_from_matches(matches: &ArgMatches) -> Result<CodeParams> {
    let code = CodeParams::new(
        *matches.get_one("codeword_length").unwrap(),
        *matches.get_one("column_weight").unwrap(),
        *matches.get_one("row_weight").unwrap(),
    )?;
    Ok(code)
}

/// Returns simulation parameters based on command-line arguments.
fn all_sim_params(matches: &ArgMatches, code: &CodeParams) -> Vec<sim::SimParams> {
    let mut num_runs_min = num_runs_min_from_matches(matches);
    let mut num_runs_max = num_runs_max_from_matches(matches);
    if num_runs_min > num_runs_max {
        if let Some(ValueSource::DefaultValue) = matches.value_source("num_runs_min") {
            num_runs_min = num_runs_max;
        }
        if let Some(ValueSource::DefaultValue) = matches.value_source("num_runs_max") {
            num_runs_max = num_runs_min;
        }
    }
    let mut all_params = Vec::new();
    for eb_over_n0_db in all_eb_over_n0_db_from_matches(matches) {
        all_params.push(sim::SimParams {
            n: code.n(),
            wc: code.wc(),
            wr: code.wr(),
            eb_over_n0_db,
            max_spa_iter: max_spa_iter_from_matches(matches),
            num_block_errors_min: num_block_errors_min_from_matches(matches),
            num_blocks_per_run: num_blocks_per_run_from_matches(matches),
            num_runs_min,
            num_runs_max,
        });
    }
    // OK to unwrap in the functions called above: All command-line arguments
    // have default values, so an error cannot occur in any of them.
    all_params
}

/// Returns number of matrix search trials.
fn num_search_trials_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("num_search_trials").unwrap()
}

/// Returns matrix output directory.
fn output_dir_from_matches(matches: &ArgMatches) -> String {
    matches.get_one::<String>("output_dir").unwrap().to_string()
}

/// Returns maximum number of sum-product iterations.
fn max_spa_iter_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("max_spa_iter").unwrap()
}

/// Returns all Eb/N0 (dB) values.
fn all_eb_over_n0_db_from_matches(matches: &ArgMatches) -> Vec<f64> {
    let first_snr_db: f64 = *matches.get_one("first_snr_db").unwrap();
    let snr_step_db: f64 = *matches.get_one("snr_step_db").unwrap();
    let num_snr: u32 = *matches.get_one("num_snr").unwrap();
    (0 .. num_snr)
        .map(|n| first_snr_db + snr_step_db * f64::from(n))
        .collect()
}

/// Returns desired minimum number of block errors.
fn num_block_errors_min_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("num_block_errors_min").unwrap()
}

/// Returns number of blocks to be transmitted per run.
fn num_blocks_per_run_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("num_blocks_per_run").unwrap()
}

/// Returns minimum number of runs of blocks to be simulated.
fn num_runs_min_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("num_runs_min").unwrap()
}

/// Returns maximum number of runs of blocks to be simulated.
fn num_runs_max_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("num_runs_max").unwrap()
}

/// Returns name of JSON file to which simulation results must be saved.
fn json_filename_from_matches(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("json_filename")
        .unwrap()
        .to_string()
}
