//! Core data types: params, keys, variants and outcomes.

use crate::error::CuckatooError;
use std::fmt;

/// Minimum and maximum supported `edge_bits`.
pub const MIN_EDGE_BITS: u32 = 1;
pub const MAX_EDGE_BITS: u32 = 31;

/// Canonical cycle length used throughout the reference test vectors.
pub const DEFAULT_CYCLE_LENGTH: u64 = 42;

/// A 128-bit SipHash key, as the pair `(k0, k1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub k0: u64,
    pub k1: u64,
}

impl Key {
    pub fn new(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }
}

/// PRF variant: number of compression/finalization rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SipVariant {
    /// SipHash-1-2: 1 compression round, 2 finalization rounds.
    Sip12,
    /// SipHash-2-4: the canonical variant.
    Sip24,
}

impl SipVariant {
    /// `(compression_rounds, finalization_rounds)`.
    pub fn rounds(self) -> (u32, u32) {
        match self {
            SipVariant::Sip12 => (1, 2),
            SipVariant::Sip24 => (2, 4),
        }
    }
}

impl fmt::Display for SipVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SipVariant::Sip12 => write!(f, "sip12"),
            SipVariant::Sip24 => write!(f, "sip24"),
        }
    }
}

/// Trimming frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimMode {
    /// Bitmap leaf-elimination trimming, bounded persistent footprint.
    Lean,
    /// Bucketed exact-degree trimming.
    Mean,
}

impl fmt::Display for TrimMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrimMode::Lean => write!(f, "lean"),
            TrimMode::Mean => write!(f, "mean"),
        }
    }
}

/// Immutable parameters for one solve attempt.
#[derive(Debug, Clone)]
pub struct Params {
    pub edge_bits: u32,
    pub key: Key,
    pub variant: SipVariant,
    pub cycle_length: u64,
    /// Worker thread count for trimming passes.
    pub threads: usize,
    /// Trimming frontend.
    pub mode: TrimMode,
    /// Bucket bits for `Mean` mode.
    pub bucket_bits: u32,
    /// Memory cap for `Lean` mode, in bytes per edge. `None` disables the check.
    pub memcap_bytes_per_edge: Option<f64>,
    /// Upper bound on trimming rounds before giving up.
    pub max_rounds: u32,
}

impl Params {
    pub fn new(edge_bits: u32, key: Key, variant: SipVariant) -> Self {
        Self {
            edge_bits,
            key,
            variant,
            cycle_length: DEFAULT_CYCLE_LENGTH,
            threads: 1,
            mode: TrimMode::Lean,
            bucket_bits: 8,
            memcap_bytes_per_edge: None,
            max_rounds: 256,
        }
    }

    pub fn validate(&self) -> Result<(), CuckatooError> {
        if self.edge_bits < MIN_EDGE_BITS || self.edge_bits > MAX_EDGE_BITS {
            return Err(CuckatooError::InvalidEdgeBits {
                bits: self.edge_bits,
            });
        }
        let n = self.edge_count();
        if self.cycle_length < 2 || self.cycle_length > n {
            return Err(CuckatooError::InvalidCycleLength {
                k: self.cycle_length,
                n,
            });
        }
        Ok(())
    }

    /// `N = 2^edge_bits`, the number of edges and the number of nodes per side.
    pub fn edge_count(&self) -> u64 {
        1u64 << self.edge_bits
    }

    /// `node_mask = N - 1`.
    pub fn node_mask(&self) -> u64 {
        self.edge_count() - 1
    }

    pub fn words_per_side(&self) -> u64 {
        (self.edge_count() + 63) / 64
    }

    /// Persistent working-set bytes per edge for `Lean` mode:
    /// two edge-alive buffers plus four node bitmaps, each `words_per_side` words wide.
    pub fn lean_bytes_per_edge(&self) -> f64 {
        let words = self.words_per_side() as f64;
        let bytes = (2.0 + 4.0) * words * 8.0;
        bytes / self.edge_count() as f64
    }
}

/// The non-error result of a solve attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A cycle of the requested length was found and independently verified.
    Found(Vec<u64>),
    /// Trimming converged (or exhausted its round budget) without a cycle of
    /// the requested length surviving.
    NotFound,
}
