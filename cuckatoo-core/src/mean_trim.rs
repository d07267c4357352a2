//! MeanTrim (C5): bucketed exact-degree trimming.
//!
//! Edges are partitioned by the low `bucket_bits` of one endpoint into
//! `2^bucket_bits` buckets. Because all edges incident to a given node share
//! those low bits, a node's degree within its bucket equals its true global
//! degree, so each bucket can be resolved independently with an exact
//! hashmap degree count instead of a streaming two-bit approximation.

use crate::bitset::Bitset;
use crate::endpoint::endpoint;
use crate::types::Params;
use log::{debug, trace};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::lean_trim::TrimStats;

fn bucket_of(x: u64, bucket_mask: u64) -> u64 {
    x & bucket_mask
}

/// One bucketed trim pass over `side`. Returns the number of edges kept.
fn trim_side_bucketed(params: &Params, alive: &Bitset, new_alive: &Bitset, side: u8) -> u64 {
    new_alive.clear_all();

    let n = params.edge_count();
    let node_mask = params.node_mask();
    let key = params.key;
    let variant = params.variant;
    let bucket_bits = params.bucket_bits;
    let bucket_count = 1usize << bucket_bits;
    let bucket_mask = (bucket_count as u64) - 1;

    // Each bucket holds (edge_index, endpoint) pairs so the degree-count and
    // keep/drop passes below reuse the endpoint computed here instead of
    // re-running the PRF for the same edge.
    let buckets: Vec<Mutex<Vec<(u64, u64)>>> =
        (0..bucket_count).map(|_| Mutex::new(Vec::new())).collect();

    std::thread::scope(|s| {
        for (start, end) in crate::lean_trim::chunks(n, params.threads) {
            let buckets = &buckets;
            s.spawn(move || {
                let mut local: Vec<Vec<(u64, u64)>> = vec![Vec::new(); bucket_count];
                for i in start..end {
                    if !alive.get(i) {
                        continue;
                    }
                    let x = endpoint(key, variant, node_mask, i, side);
                    local[bucket_of(x, bucket_mask) as usize].push((i, x));
                }
                for (b, edges) in local.into_iter().enumerate() {
                    if edges.is_empty() {
                        continue;
                    }
                    buckets[b].lock().unwrap().extend(edges);
                }
            });
        }
    });

    let kept = AtomicU64::new(0);
    std::thread::scope(|s| {
        for bucket in &buckets {
            let kept = &kept;
            s.spawn(move || {
                let edges = bucket.lock().unwrap();
                if edges.is_empty() {
                    return;
                }
                let mut degree: HashMap<u64, u32> = HashMap::with_capacity(edges.len());
                for &(_, x) in edges.iter() {
                    *degree.entry(x).or_insert(0) += 1;
                }
                let mut local = 0u64;
                for &(i, x) in edges.iter() {
                    if degree[&x] >= 2 {
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

/// Runs bucketed trimming to convergence, mirroring [`crate::lean_trim::trim`]'s
/// termination criterion: alternate sides, and once a side-pair leaves the
/// count unchanged, confirm with one combined check over both sides.
pub fn trim(params: &Params) -> (Bitset, TrimStats) {
    let n = params.edge_count();

    let mut alive = Bitset::all_ones(n);
    let mut scratch = Bitset::zeroed(n);

    let initial = alive.popcount();
    let mut prev_alive = initial;
    let mut rounds = 0u32;

    loop {
        if rounds >= params.max_rounds || prev_alive == 0 {
            break;
        }
        rounds += 1;

        trim_side_bucketed(params, &alive, &scratch, 0);
        std::mem::swap(&mut alive, &mut scratch);

        let kept1 = trim_side_bucketed(params, &alive, &scratch, 1);
        std::mem::swap(&mut alive, &mut scratch);

        trace!("mean trim round {rounds}: {prev_alive} -> {kept1} edges alive");

        if kept1 == prev_alive {
            // Confirm convergence the same way LeanTrim does: one more pass
            // per side should leave the count unchanged if truly converged.
            let check0 = trim_side_bucketed(params, &alive, &scratch, 0);
            std::mem::swap(&mut alive, &mut scratch);
            let check1 = trim_side_bucketed(params, &alive, &scratch, 1);
            std::mem::swap(&mut alive, &mut scratch);
            prev_alive = check1;
            if check0 == kept1 && check1 == kept1 {
                break;
            }
            continue;
        }

        prev_alive = kept1;
    }

    debug!("mean trim converged after {rounds} rounds: {initial} -> {prev_alive} edges");

    (
        alive,
        TrimStats {
            rounds_performed: rounds,
            edges_initial: initial,
            edges_remaining: prev_alive,
        },
    )
}
