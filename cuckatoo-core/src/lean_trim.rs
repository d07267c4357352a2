//! LeanTrim (C4): iterative two-pass leaf elimination over a packed bitset.
//!
//! Each round, for one side: pass 1 derives `seen`/`nonleaf` node bitmaps by
//! streaming the alive edges once; pass 2 keeps only edges whose endpoint on
//! that side is `nonleaf`. Rounds alternate sides; convergence is detected
//! when a side-pair leaves the alive count unchanged, at which point one
//! final combined (both-sides) pass is run to confirm.

use crate::bitset::Bitset;
use crate::endpoint::endpoint;
use crate::types::Params;
use log::{debug, trace};
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for a completed trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimStats {
    pub rounds_performed: u32,
    pub edges_initial: u64,
    pub edges_remaining: u64,
}

pub(crate) fn chunks(n: u64, threads: usize) -> Vec<(u64, u64)> {
    let threads = threads.max(1) as u64;
    let chunk = (n + threads - 1) / threads;
    let mut out = Vec::new();
    let mut start = 0;
    while start < n {
        let end = (start + chunk).min(n);
        out.push((start, end));
        start = end;
    }
    if out.is_empty() {
        out.push((0, 0));
    }
    out
}

/// One trim pass over `side`: rebuilds `seen`/`nonleaf` from `alive`, then
/// fills `new_alive` with edges whose `side` endpoint survives. Returns the
/// number of edges kept.
fn trim_round_side(
    params: &Params,
    alive: &Bitset,
    new_alive: &Bitset,
    seen: &Bitset,
    nonleaf: &Bitset,
    side: u8,
) -> u64 {
    seen.clear_all();
    nonleaf.clear_all();
    new_alive.clear_all();

    let n = params.edge_count();
    let node_mask = params.node_mask();
    let key = params.key;
    let variant = params.variant;

    std::thread::scope(|s| {
        for (start, end) in chunks(n, params.threads) {
            s.spawn(move || {
                for i in start..end {
                    if !alive.get(i) {
                        continue;
                    }
                    let x = endpoint(key, variant, node_mask, i, side);
                    if seen.get(x) {
                        nonleaf.atomic_or_word(x, 1u64 << (x % 64));
                    } else {
                        seen.atomic_or_word(x, 1u64 << (x % 64));
                    }
                }
            });
        }
    });

    let kept = AtomicU64::new(0);
    std::thread::scope(|s| {
        for (start, end) in chunks(n, params.threads) {
            let kept = &kept;
            s.spawn(move || {
                let mut local = 0u64;
                for i in start..end {
                    if !alive.get(i) {
                        continue;
                    }
                    let x = endpoint(key, variant, node_mask, i, side);
                    if nonleaf.get(x) {
                        new_alive.atomic_or_word(i, 1u64 << (i % 64));
                        local += 1;
                    }
                }
                kept.fetch_add(local, Ordering::Relaxed);
            });
        }
    });

    kept.load(Ordering::Relaxed)
}

/// A combined pass that requires both sides' endpoints to be nonleaf,
/// used as the final tightening step once the alternating passes converge.
fn trim_round_both(
    params: &Params,
    alive: &Bitset,
    new_alive: &Bitset,
    seen0: &Bitset,
    nonleaf0: &Bitset,
    seen1: &Bitset,
    nonleaf1: &Bitset,
) -> u64 {
    seen0.clear_all();
    nonleaf0.clear_all();
    seen1.clear_all();
    nonleaf1.clear_all();
    new_alive.clear_all();

    let n = params.edge_count();
    let node_mask = params.node_mask();
    let key = params.key;
    let variant = params.variant;

    std::thread::scope(|s| {
        for (start, end) in chunks(n, params.threads) {
            s.spawn(move || {
                for i in start..end {
                    if !alive.get(i) {
                        continue;
                    }
                    let u = endpoint(key, variant, node_mask, i, 0);
                    if seen0.get(u) {
                        nonleaf0.atomic_or_word(u, 1u64 << (u % 64));
                    } else {
                        seen0.atomic_or_word(u, 1u64 << (u % 64));
                    }
                    let v = endpoint(key, variant, node_mask, i, 1);
                    if seen1.get(v) {
                        nonleaf1.atomic_or_word(v, 1u64 << (v % 64));
                    } else {
                        seen1.atomic_or_word(v, 1u64 << (v % 64));
                    }
                }
            });
        }
    });

    let kept = AtomicU64::new(0);
    std::thread::scope(|s| {
        for (start, end) in chunks(n, params.threads) {
            let kept = &kept;
            s.spawn(move || {
                let mut local = 0u64;
                for i in start..end {
                    if !alive.get(i) {
                        continue;
                    }
                    let u = endpoint(key, variant, node_mask, i, 0);
                    let v = endpoint(key, variant, node_mask, i, 1);
                    if nonleaf0.get(u) && nonleaf1.get(v) {
                        new_alive.atomic_or_word(i, 1u64 << (i % 64));
                        local += 1;
                    }
                }
                kept.fetch_add(local, Ordering::Relaxed);
            });
        }
    });

    kept.load(Ordering::Relaxed)
}

/// Runs leaf trimming to convergence (or `max_rounds`), returning the final
/// alive bitset and round statistics.
pub fn trim(params: &Params) -> (Bitset, TrimStats) {
    let n = params.edge_count();
    let node_mask = params.node_mask();

    let mut alive = Bitset::all_ones(n);
    let mut scratch = Bitset::zeroed(n);
    let seen0 = Bitset::zeroed(node_mask + 1);
    let nonleaf0 = Bitset::zeroed(node_mask + 1);
    let seen1 = Bitset::zeroed(node_mask + 1);
    let nonleaf1 = Bitset::zeroed(node_mask + 1);

    let initial = alive.popcount();
    let mut prev_alive = initial;
    let mut rounds = 0u32;

    loop {
        if rounds >= params.max_rounds || prev_alive == 0 {
            break;
        }
        rounds += 1;

        trim_round_side(params, &alive, &scratch, &seen0, &nonleaf0, 0);
        std::mem::swap(&mut alive, &mut scratch);

        let kept1 = trim_round_side(params, &alive, &scratch, &seen1, &nonleaf1, 1);
        std::mem::swap(&mut alive, &mut scratch);

        trace!(
            "lean trim round {rounds}: {prev_alive} -> {kept1} edges alive"
        );

        if kept1 == prev_alive {
            let combined = trim_round_both(
                params, &alive, &scratch, &seen0, &nonleaf0, &seen1, &nonleaf1,
            );
            std::mem::swap(&mut alive, &mut scratch);
            if combined == kept1 {
                prev_alive = combined;
                break;
            }
            prev_alive = combined;
            continue;
        }

        prev_alive = kept1;
    }

    debug!(
        "lean trim converged after {rounds} rounds: {initial} -> {prev_alive} edges"
    );

    (
        alive,
        TrimStats {
            rounds_performed: rounds,
            edges_initial: initial,
            edges_remaining: prev_alive,
        },
    )
}
