//! Attempt timing and benchmark statistics, used by the harness to report
//! per-attempt durations and by [`crate::driver`] callers that want phase
//! breakdowns.

use log::{debug, trace};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Tracks named phase durations within a single solve attempt.
pub struct PhaseTimer {
    start_time: Instant,
    checkpoints: HashMap<String, Instant>,
    durations: HashMap<String, Duration>,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            checkpoints: HashMap::new(),
            durations: HashMap::new(),
        }
    }

    pub fn start_phase(&mut self, phase: &str) {
        self.checkpoints.insert(phase.to_string(), Instant::now());
    }

    pub fn end_phase(&mut self, phase: &str) -> Option<Duration> {
        let start = self.checkpoints.remove(phase)?;
        let duration = start.elapsed();
        trace!("phase '{phase}' completed in {duration:?}");
        self.durations.insert(phase.to_string(), duration);
        Some(duration)
    }

    pub fn phase_duration(&self, phase: &str) -> Option<Duration> {
        self.durations.get(phase).copied()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics over a run of attempts, as reported by the harness.
#[derive(Debug, Clone)]
pub struct AttemptStats {
    pub attempts: usize,
    pub min: Duration,
    pub max: Duration,
    pub median: Duration,
    pub total: Duration,
    pub verified_found: u64,
}

/// Computes [`AttemptStats`] from a list of per-attempt durations. `durations`
/// is sorted in place.
pub fn summarize(durations: &mut [Duration], verified_found: u64) -> AttemptStats {
    assert!(!durations.is_empty(), "summarize requires at least one attempt");
    durations.sort();
    let total: Duration = durations.iter().sum();
    let stats = AttemptStats {
        attempts: durations.len(),
        min: durations[0],
        max: durations[durations.len() - 1],
        median: durations[durations.len() / 2],
        total,
        verified_found,
    };
    debug!(
        "summarized {} attempts: median={:?} min={:?} max={:?}",
        stats.attempts, stats.median, stats.min, stats.max
    );
    stats
}

/// Ratio of two medians, as used by the baseline-compare harness mode
/// (`sip12_median / sip24_median`).
pub fn median_ratio(baseline: &AttemptStats, comparison: &AttemptStats) -> f64 {
    comparison.median.as_secs_f64() / baseline.median.as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn phase_timer_measures_elapsed_time() {
        let mut timer = PhaseTimer::new();
        timer.start_phase("trim");
        thread::sleep(Duration::from_millis(5));
        let duration = timer.end_phase("trim").unwrap();
        assert!(duration >= Duration::from_millis(5));
        assert_eq!(timer.phase_duration("trim"), Some(duration));
    }

    #[test]
    fn ending_an_unstarted_phase_returns_none() {
        let mut timer = PhaseTimer::new();
        assert_eq!(timer.end_phase("never-started"), None);
    }

    #[test]
    fn summarize_computes_median_and_bounds() {
        let mut durations = vec![
            Duration::from_millis(30),
            Duration::from_millis(10),
            Duration::from_millis(20),
        ];
        let stats = summarize(&mut durations, 1);
        assert_eq!(stats.min, Duration::from_millis(10));
        assert_eq!(stats.max, Duration::from_millis(30));
        assert_eq!(stats.median, Duration::from_millis(20));
        assert_eq!(stats.attempts, 3);
    }

    #[test]
    fn median_ratio_is_symmetric_around_one() {
        let mut a = vec![Duration::from_millis(10); 3];
        let mut b = vec![Duration::from_millis(20); 3];
        let stats_a = summarize(&mut a, 0);
        let stats_b = summarize(&mut b, 0);
        assert!((median_ratio(&stats_a, &stats_b) - 2.0).abs() < 1e-9);
    }
}
