//! SolverDriver (C8): wires trimming, recovery and verification into one
//! state machine, enforcing the memory cap before any bitset is allocated.

use crate::error::{CuckatooError, Result};
use crate::types::{Params, SolveOutcome, TrimMode};
use crate::verifier;
use crate::{lean_trim, mean_trim};
use log::info;

/// The terminal outcome of one INIT -> TRIM -> RECOVER -> VERIFY attempt.
/// The non-terminal phases are not reified as states: they run strictly in
/// sequence inside [`SolverDriver::run`] and are only observable through
/// logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    FoundVerified(Vec<u64>),
    NotFound,
    FailedMemcap,
    FailedVerify(String),
}

pub struct SolverDriver {
    params: Params,
}

impl SolverDriver {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Runs the full INIT -> TRIM -> RECOVER -> VERIFY -> DONE pipeline for
    /// one attempt.
    pub fn run(&self) -> Result<SolveOutcome> {
        self.params.validate()?;

        if self.params.mode == TrimMode::Lean {
            if let Some(cap) = self.params.memcap_bytes_per_edge {
                let needed = self.params.lean_bytes_per_edge();
                if needed > cap {
                    return Err(CuckatooError::MemoryCapExceeded {
                        actual: needed as u64,
                        cap: cap as u64,
                    });
                }
            }
        }

        info!(
            "solver starting: edge_bits={} mode={} variant={} k={}",
            self.params.edge_bits, self.params.mode, self.params.variant, self.params.cycle_length
        );

        let (alive, stats) = match self.params.mode {
            TrimMode::Lean => lean_trim::trim(&self.params),
            TrimMode::Mean => mean_trim::trim(&self.params),
        };

        info!(
            "trimming done: {} rounds, {} -> {} edges",
            stats.rounds_performed, stats.edges_initial, stats.edges_remaining
        );

        let candidate = crate::recovery::recover_cycle(&self.params, &alive);

        match candidate {
            None => Ok(SolveOutcome::NotFound),
            Some(proof) => match verifier::verify(&self.params, &proof) {
                Ok(()) => Ok(SolveOutcome::Found(proof)),
                Err(reason) => Err(CuckatooError::VerificationFailed {
                    reason: reason.to_string(),
                }),
            },
        }
    }

    /// Same as [`SolverDriver::run`] but reports the terminal [`Outcome`]
    /// instead of a `Result`, for callers that want to distinguish
    /// "memory cap exceeded" and "solver defect" from ordinary errors
    /// without matching on `CuckatooError` variants. `Outcome` has exactly
    /// the four terminal states of the attempt state machine; it does not
    /// carry a bad-params or internal-error state. Callers who need those
    /// distinguished should call [`Params::validate`] themselves (as
    /// `cuckatoo-miner` does before ever constructing a driver) or use
    /// [`SolverDriver::run`] directly and match on `CuckatooError`.
    pub fn run_to_state(&self) -> Outcome {
        match self.run() {
            Ok(SolveOutcome::Found(proof)) => Outcome::FoundVerified(proof),
            Ok(SolveOutcome::NotFound) => Outcome::NotFound,
            Err(CuckatooError::MemoryCapExceeded { .. }) => Outcome::FailedMemcap,
            Err(CuckatooError::VerificationFailed { reason }) => Outcome::FailedVerify(reason),
            Err(_) => Outcome::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Key, SipVariant};

    #[test]
    fn memcap_rejection_happens_before_any_trimming() {
        let mut params = Params::new(20, Key::new(1, 2), SipVariant::Sip24);
        params.mode = TrimMode::Lean;
        params.memcap_bytes_per_edge = Some(0.001);
        let driver = SolverDriver::new(params);
        let result = driver.run();
        assert!(matches!(result, Err(CuckatooError::MemoryCapExceeded { .. })));
    }

    #[test]
    fn invalid_params_surface_as_bad_params_error() {
        let params = Params::new(0, Key::new(1, 2), SipVariant::Sip24);
        let driver = SolverDriver::new(params);
        assert!(matches!(
            driver.run(),
            Err(CuckatooError::InvalidEdgeBits { .. })
        ));
    }

    #[test]
    fn small_graph_either_finds_or_reports_not_found() {
        let mut params = Params::new(10, Key::new(5, 6), SipVariant::Sip24);
        params.cycle_length = 42;
        params.threads = 1;
        let driver = SolverDriver::new(params);
        match driver.run().unwrap() {
            SolveOutcome::Found(proof) => assert_eq!(proof.len(), 42),
            SolveOutcome::NotFound => {}
        }
    }

    #[test]
    fn mean_mode_reaches_a_terminal_state() {
        let mut params = Params::new(10, Key::new(5, 6), SipVariant::Sip24);
        params.cycle_length = 42;
        params.mode = TrimMode::Mean;
        params.bucket_bits = 4;
        params.threads = 1;
        let driver = SolverDriver::new(params);
        match driver.run_to_state() {
            Outcome::FoundVerified(proof) => assert_eq!(proof.len(), 42),
            Outcome::NotFound => {}
            other => panic!("unexpected terminal state: {other:?}"),
        }
    }

    #[test]
    fn failed_verify_state_is_reachable_by_direct_verifier_check() {
        // The driver only reaches FailedVerify if recovery itself produces
        // a non-cycle, which a correct recovery never does; we exercise the
        // verifier's rejection path directly instead (see verifier tests),
        // and confirm here only that the Outcome variant exists and can be
        // constructed/matched.
        let outcome = Outcome::FailedVerify("does not chain".to_string());
        assert!(matches!(outcome, Outcome::FailedVerify(_)));
    }
}
