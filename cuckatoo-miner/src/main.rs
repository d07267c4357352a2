//! Cuckatoo mining harness CLI: wraps `cuckatoo-core`'s solver/verifier in
//! an attempt loop with timing, statistics, and an optional baseline
//! comparison between the SIP-2-4 and SIP-1-2 PRF variants.

mod baseline;
mod cli;
mod harness;
mod header;
mod proof;

use clap::Parser;
use cuckatoo_core::{Key, Params};
use std::process::ExitCode;

const EXIT_OK: u8 = 0;
const EXIT_BAD_ARGS: u8 = 1;
const EXIT_MEMCAP: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();
    let cli = match cli::Cli::try_parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(EXIT_BAD_ARGS);
        }
    };

    if let Some(h) = &cli.header {
        if let Err(e) = header::validate_header(h) {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_BAD_ARGS);
        }
    }

    let mut params = Params::new(cli.edge_bits, Key::new(0, 0), cli.hash.into());
    params.mode = cli.mode.into();
    params.cycle_length = cli.cycle_length;
    params.threads = cli.threads.max(1);
    params.bucket_bits = cli.bucket_bits;
    params.memcap_bytes_per_edge = cli.memcap_bytes_per_edge;

    if let Err(e) = params.validate() {
        eprintln!("error: {e}");
        return ExitCode::from(EXIT_BAD_ARGS);
    }

    if cli.baseline_compare {
        return run_baseline_compare(&params, &cli);
    }

    run_harness(&params, &cli)
}

fn run_harness(params: &Params, cli: &cli::Cli) -> ExitCode {
    let result = harness::run(params, cli.attempts, cli.header.as_deref(), true);

    println!("attempts:        {}", result.stats.attempts);
    println!("verified found:  {}", result.stats.verified_found);
    println!("min:             {:?}", result.stats.min);
    println!("median:          {:?}", result.stats.median);
    println!("max:             {:?}", result.stats.max);
    println!("total:           {:?}", result.stats.total);

    if result.verify_failures > 0 {
        eprintln!("{} attempt(s) produced a proof that failed verification", result.verify_failures);
        return ExitCode::from(EXIT_BAD_ARGS);
    }
    if result.memcap_failures == cli.attempts as u64 && cli.attempts > 0 {
        eprintln!("all attempts exceeded the memory cap");
        return ExitCode::from(EXIT_MEMCAP);
    }

    match result.found_proof {
        Some(p) => {
            println!("proof: {}", proof::format_proof(&p));
        }
        None => {
            println!("no cycle found");
        }
    }
    ExitCode::from(EXIT_OK)
}

fn run_baseline_compare(params: &Params, cli: &cli::Cli) -> ExitCode {
    let result = baseline::run(params, cli.attempts, cli.header.as_deref());

    println!("sip24 median: {:.3} ms", result.sip24_median_ms);
    println!("sip12 median: {:.3} ms", result.sip12_median_ms);
    println!("ratio (sip12/sip24): {:.4}", result.ratio);

    if let Some(max_ratio) = cli.baseline_max_ratio {
        if result.ratio > max_ratio {
            eprintln!(
                "baseline ratio {:.4} exceeds threshold {:.4}",
                result.ratio, max_ratio
            );
            return ExitCode::from(EXIT_BAD_ARGS);
        }
    }

    ExitCode::from(EXIT_OK)
}
