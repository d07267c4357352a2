//! Baseline-compare mode (H4): runs the harness under both PRF variants
//! over identical parameters and reports the median-time ratio.

use cuckatoo_core::timing::median_ratio;
use cuckatoo_core::{Params, SipVariant};

use crate::harness;

pub struct BaselineResult {
    pub sip24_median_ms: f64,
    pub sip12_median_ms: f64,
    pub ratio: f64,
}

/// Runs `attempts` attempts under SIP-2-4 then SIP-1-2 with otherwise
/// identical params, returning `median(sip12) / median(sip24)`.
pub fn run(base_params: &Params, attempts: u32, fixed_header: Option<&str>) -> BaselineResult {
    let mut sip24_params = base_params.clone();
    sip24_params.variant = SipVariant::Sip24;
    let sip24 = harness::run(&sip24_params, attempts, fixed_header, false);

    let mut sip12_params = base_params.clone();
    sip12_params.variant = SipVariant::Sip12;
    let sip12 = harness::run(&sip12_params, attempts, fixed_header, false);

    let ratio = median_ratio(&sip24.stats, &sip12.stats);

    BaselineResult {
        sip24_median_ms: sip24.stats.median.as_secs_f64() * 1000.0,
        sip12_median_ms: sip12.stats.median.as_secs_f64() * 1000.0,
        ratio,
    }
}
