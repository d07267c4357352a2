//! Error types for the Cuckatoo solver core.

use thiserror::Error;

/// Errors surfaced by params validation, trimming, recovery and verification.
///
/// `NOT_FOUND` is deliberately absent here: a failed search is a normal
/// outcome, not an error, and is modeled by [`crate::SolveOutcome::NotFound`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CuckatooError {
    #[error("edge_bits {bits} out of range (must be 1..=31)")]
    InvalidEdgeBits { bits: u32 },

    #[error("cycle length {k} out of range for N={n} edges (must be 2..=N)")]
    InvalidCycleLength { k: u64, n: u64 },

    #[error("malformed header: expected 32 hex characters, got {len}")]
    InvalidHeader { len: usize },

    #[error("memory cap exceeded: {actual} bytes per edge needed, cap is {cap} bytes per edge")]
    MemoryCapExceeded { actual: u64, cap: u64 },

    #[error("solver produced a proof that failed verification: {reason}")]
    VerificationFailed { reason: String },

    #[error("internal invariant violated: {reason}")]
    Internal { reason: String },
}

pub type Result<T> = std::result::Result<T, CuckatooError>;
