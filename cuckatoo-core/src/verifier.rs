//! Verifier (C7): independent check that a proof is a simple alternating
//! cycle of the requested length.
//!
//! Carries none of the solver's invariants: it recomputes endpoints from
//! scratch and walks the induced multigraph, so a buggy solver cannot pass
//! a malformed proof by construction.

use crate::endpoint::endpoints;
use crate::types::Params;
use std::collections::{HashMap, HashSet};

/// Why a proof failed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    WrongLength { expected: u64, actual: usize },
    IndexOutOfRange { index: u64, bound: u64 },
    DuplicateIndex { index: u64 },
    WrongDegree { node: u64, side: u8, degree: u32 },
    DoesNotClose,
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyError::WrongLength { expected, actual } => {
                write!(f, "expected {expected} edge indices, got {actual}")
            }
            VerifyError::IndexOutOfRange { index, bound } => {
                write!(f, "edge index {index} is out of range (N={bound})")
            }
            VerifyError::DuplicateIndex { index } => {
                write!(f, "duplicate edge index {index} in cycle")
            }
            VerifyError::WrongDegree { node, side, degree } => {
                write!(f, "node {node} on side {side} has degree {degree}, expected 2")
            }
            VerifyError::DoesNotClose => {
                write!(f, "edges do not chain into a single alternating cycle")
            }
        }
    }
}

/// Verifies `proof` against `params`. `Ok(())` iff the proof is a simple
/// alternating cycle of exactly `params.cycle_length` edges.
pub fn verify(params: &Params, proof: &[u64]) -> Result<(), VerifyError> {
    let k = params.cycle_length;
    if proof.len() as u64 != k {
        return Err(VerifyError::WrongLength {
            expected: k,
            actual: proof.len(),
        });
    }

    let n = params.edge_count();
    let mut seen_indices = HashSet::with_capacity(proof.len());
    for &idx in proof {
        if idx >= n {
            return Err(VerifyError::IndexOutOfRange { index: idx, bound: n });
        }
        if !seen_indices.insert(idx) {
            return Err(VerifyError::DuplicateIndex { index: idx });
        }
    }

    let node_mask = params.node_mask();
    let ev: Vec<(u64, u64)> = proof
        .iter()
        .map(|&i| endpoints(params.key, params.variant, node_mask, i))
        .collect();

    let mut degree_u: HashMap<u64, u32> = HashMap::new();
    let mut degree_v: HashMap<u64, u32> = HashMap::new();
    for &(u, v) in &ev {
        *degree_u.entry(u).or_insert(0) += 1;
        *degree_v.entry(v).or_insert(0) += 1;
    }
    for (&node, &degree) in &degree_u {
        if degree != 2 {
            return Err(VerifyError::WrongDegree { node, side: 0, degree });
        }
    }
    for (&node, &degree) in &degree_v {
        if degree != 2 {
            return Err(VerifyError::WrongDegree { node, side: 1, degree });
        }
    }

    // Walk the alternating cycle starting from proof[0], side v (1).
    let mut used = vec![false; ev.len()];
    used[0] = true;
    let mut cur = ev[0].1;
    let mut next_is_u = true;
    let start = ev[0].0;

    for _ in 1..ev.len() {
        let mut advanced = false;
        for (j, &(u, v)) in ev.iter().enumerate() {
            if used[j] {
                continue;
            }
            if next_is_u && v == cur {
                cur = u;
                next_is_u = false;
                used[j] = true;
                advanced = true;
                break;
            } else if !next_is_u && u == cur {
                cur = v;
                next_is_u = true;
                used[j] = true;
                advanced = true;
                break;
            }
        }
        if !advanced {
            return Err(VerifyError::DoesNotClose);
        }
    }

    if cur == start {
        Ok(())
    } else {
        Err(VerifyError::DoesNotClose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Key, SipVariant};

    fn small_params(k: u64) -> Params {
        let mut p = Params::new(20, Key::new(1, 2), SipVariant::Sip24);
        p.cycle_length = k;
        p
    }

    #[test]
    fn rejects_wrong_length() {
        let params = small_params(42);
        let err = verify(&params, &[0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            VerifyError::WrongLength {
                expected: 42,
                actual: 3
            }
        );
    }

    #[test]
    fn rejects_duplicate_indices() {
        let params = small_params(4);
        let err = verify(&params, &[0, 0, 1, 2]).unwrap_err();
        assert_eq!(err, VerifyError::DuplicateIndex { index: 0 });
    }

    #[test]
    fn rejects_out_of_range_index() {
        let params = small_params(1);
        let n = params.edge_count();
        let err = verify(&params, &[n]).unwrap_err();
        assert_eq!(err, VerifyError::IndexOutOfRange { index: n, bound: n });
    }

    #[test]
    fn accepts_a_real_recovered_cycle() {
        // Search small graphs for a real 42-cycle via the full pipeline and
        // confirm the verifier accepts what recovery found.
        for attempt in 0u64..64 {
            let mut params = Params::new(10, Key::new(attempt, attempt ^ 0x1357_9bdf), SipVariant::Sip24);
            params.cycle_length = 42;
            params.threads = 1;
            let (alive, _) = crate::lean_trim::trim(&params);
            if let Some(cycle) = crate::recovery::recover_cycle(&params, &alive) {
                assert!(verify(&params, &cycle).is_ok());
                return;
            }
        }
    }

    #[test]
    fn rejects_two_disjoint_cycles_of_half_length() {
        // Two disjoint 2-cycles (a 2-cycle exists when two distinct edge
        // indices share both endpoints) do not chain into one k=4 cycle.
        // We can't easily manufacture this from the PRF without a search,
        // so we exercise the walk logic directly via degree mismatch: four
        // indices whose recomputed endpoints happen to give some node
        // degree != 2 should be rejected before the walk even starts.
        let params = small_params(4);
        // Four arbitrary distinct small indices are exceedingly unlikely to
        // form a valid cycle; verification must fail with some reason.
        let result = verify(&params, &[0, 1, 2, 3]);
        assert!(result.is_err());
    }
}
