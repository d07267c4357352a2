//! Attempt loop (H3): runs a solve attempt per header, timing each one and
//! aggregating statistics.

use cuckatoo_core::timing::{summarize, AttemptStats};
use cuckatoo_core::{Outcome, Params, SolverDriver};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::{Duration, Instant};

use crate::header;

/// The single attempt whose proof, if any, is the harness's headline result.
pub struct HarnessResult {
    pub stats: AttemptStats,
    pub found_proof: Option<Vec<u64>>,
    pub memcap_failures: u64,
    pub verify_failures: u64,
}

/// Runs `attempts` solve attempts, each against a freshly generated header
/// unless `fixed_header` is given, and reports aggregate timing.
pub fn run(
    base_params: &Params,
    attempts: u32,
    fixed_header: Option<&str>,
    show_progress: bool,
) -> HarnessResult {
    if attempts == 0 {
        return HarnessResult {
            stats: AttemptStats {
                attempts: 0,
                min: Duration::ZERO,
                max: Duration::ZERO,
                median: Duration::ZERO,
                total: Duration::ZERO,
                verified_found: 0,
            },
            found_proof: None,
            memcap_failures: 0,
            verify_failures: 0,
        };
    }

    let bar = if show_progress {
        let pb = ProgressBar::new(attempts as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} attempts ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(pb)
    } else {
        None
    };

    let mut durations = Vec::with_capacity(attempts as usize);
    let mut found_proof = None;
    let mut verified_found = 0u64;
    let mut memcap_failures = 0u64;
    let mut verify_failures = 0u64;

    for attempt in 0..attempts {
        let mut params = base_params.clone();
        let header_str;
        let header_ref = if let Some(h) = fixed_header {
            h
        } else {
            header_str = header::random_header();
            &header_str
        };
        params.key = header::derive_key(header_ref);

        let start = Instant::now();
        let driver = SolverDriver::new(params);
        let outcome = driver.run_to_state();
        let elapsed = start.elapsed();
        durations.push(elapsed);

        match outcome {
            Outcome::FoundVerified(proof) => {
                verified_found += 1;
                info!("attempt {attempt}: found and verified a cycle in {elapsed:?}");
                if found_proof.is_none() {
                    found_proof = Some(proof);
                }
            }
            Outcome::NotFound => {
                info!("attempt {attempt}: no cycle found in {elapsed:?}");
            }
            Outcome::FailedMemcap => {
                memcap_failures += 1;
                info!("attempt {attempt}: memory cap exceeded");
            }
            Outcome::FailedVerify(reason) => {
                verify_failures += 1;
                info!("attempt {attempt}: solver produced an unverifiable proof: {reason}");
            }
        }

        if let Some(pb) = &bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = bar {
        pb.finish_and_clear();
    }

    HarnessResult {
        stats: summarize(&mut durations, verified_found),
        found_proof,
        memcap_failures,
        verify_failures,
    }
}
