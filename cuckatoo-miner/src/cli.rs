//! Command-line surface for the mining harness.

use clap::{Parser, ValueEnum};
use cuckatoo_core::{SipVariant, TrimMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Lean,
    Mean,
}

impl From<ModeArg> for TrimMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Lean => TrimMode::Lean,
            ModeArg::Mean => TrimMode::Mean,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HashArg {
    Sip12,
    Sip24,
}

impl From<HashArg> for SipVariant {
    fn from(h: HashArg) -> Self {
        match h {
            HashArg::Sip12 => SipVariant::Sip12,
            HashArg::Sip24 => SipVariant::Sip24,
        }
    }
}

/// Cuckatoo cycle mining harness: searches for and verifies `k`-cycles over
/// a keyed pseudorandom bipartite graph.
#[derive(Debug, Parser)]
#[command(name = "cuckatoo-miner", version, about)]
pub struct Cli {
    /// Trimming frontend.
    #[arg(long, value_enum, default_value_t = ModeArg::Lean)]
    pub mode: ModeArg,

    /// PRF variant.
    #[arg(long, value_enum, default_value_t = HashArg::Sip24)]
    pub hash: HashArg,

    /// log2 of the edge count.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
    pub edge_bits: u32,

    /// Worker thread count for trimming passes.
    #[arg(long, default_value_t = 1)]
    pub threads: usize,

    /// Number of attempts to run.
    #[arg(long, default_value_t = 1)]
    pub attempts: u32,

    /// Target cycle length.
    #[arg(long = "cycle-length", default_value_t = 42)]
    pub cycle_length: u64,

    /// Bucket bits, mean mode only.
    #[arg(long = "bucket-bits", default_value_t = 8)]
    pub bucket_bits: u32,

    /// Memory cap in bytes per edge, lean mode only. Unset disables the check.
    #[arg(long = "memcap-bytes-per-edge")]
    pub memcap_bytes_per_edge: Option<f64>,

    /// 32 hex character (16 byte) header. Random per attempt when absent.
    #[arg(long)]
    pub header: Option<String>,

    /// Run both hash variants over identical parameters and report the
    /// median-time ratio.
    #[arg(long = "baseline-compare", default_value_t = false)]
    pub baseline_compare: bool,

    /// With --baseline-compare, exit non-zero if sip12/sip24 median ratio
    /// exceeds this threshold.
    #[arg(long = "baseline-max-ratio")]
    pub baseline_max_ratio: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_argv() {
        let cli = Cli::try_parse_from(["cuckatoo-miner", "--edge-bits", "20"]).unwrap();
        assert_eq!(cli.edge_bits, 20);
        assert_eq!(cli.mode, ModeArg::Lean);
        assert_eq!(cli.hash, HashArg::Sip24);
        assert_eq!(cli.cycle_length, 42);
        assert_eq!(cli.attempts, 1);
    }

    #[test]
    fn rejects_missing_edge_bits() {
        assert!(Cli::try_parse_from(["cuckatoo-miner"]).is_err());
    }

    #[test]
    fn rejects_out_of_range_edge_bits() {
        assert!(Cli::try_parse_from(["cuckatoo-miner", "--edge-bits", "99"]).is_err());
    }

    #[test]
    fn parses_full_argv() {
        let cli = Cli::try_parse_from([
            "cuckatoo-miner",
            "--mode",
            "mean",
            "--hash",
            "sip12",
            "--edge-bits",
            "16",
            "--threads",
            "4",
            "--attempts",
            "10",
            "--cycle-length",
            "12",
            "--bucket-bits",
            "6",
            "--memcap-bytes-per-edge",
            "0.75",
            "--header",
            "00112233445566778899aabbccddeeff",
        ])
        .unwrap();
        assert_eq!(cli.mode, ModeArg::Mean);
        assert_eq!(cli.hash, HashArg::Sip12);
        assert_eq!(cli.threads, 4);
        assert_eq!(cli.attempts, 10);
        assert_eq!(cli.cycle_length, 12);
        assert_eq!(cli.bucket_bits, 6);
        assert_eq!(cli.memcap_bytes_per_edge, Some(0.75));
    }
}
