//! Recovery (C6): union-find + BFS path extraction over the trimmed residual.
//!
//! Nodes are tagged by side so the same numeric index on side 0 and side 1
//! is treated as distinct: `pack(side, node) = (side as u64) << 32 | node`.
//! Edges are folded into a union-find one at a time; an edge that would
//! join two nodes already in the same component instead closes a cycle in
//! the adjacency forest built so far, and its length is checked against the
//! target before moving on.

use crate::bitset::Bitset;
use crate::endpoint::endpoints;
use crate::types::Params;
use std::collections::{HashMap, VecDeque};

fn pack(side: u8, node: u64) -> u64 {
    ((side as u64) << 32) | node
}

struct DisjointSet {
    parent: Vec<u64>,
    size: Vec<u32>,
    index: HashMap<u64, usize>,
}

impl DisjointSet {
    fn new() -> Self {
        Self {
            parent: Vec::new(),
            size: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn slot(&mut self, key: u64) -> usize {
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.parent.len();
        self.parent.push(idx as u64);
        self.size.push(1);
        self.index.insert(key, idx);
        idx
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] as usize != x {
            let gp = self.parent[self.parent[x] as usize];
            self.parent[x] = gp;
            x = self.parent[x] as usize;
        }
        x
    }

    fn unite(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            self.parent[ra] = rb as u64;
            self.size[rb] += self.size[ra];
        } else {
            self.parent[rb] = ra as u64;
            self.size[ra] += self.size[rb];
        }
    }
}

/// Finds the forest path (as a list of edge indices) between `src` and
/// `dst` in `adj`, or `None` if unreachable (should not happen for two
/// nodes already unioned into the same component).
fn bfs_path_edges(adj: &HashMap<usize, Vec<(usize, u64)>>, src: usize, dst: usize) -> Option<Vec<u64>> {
    if src == dst {
        return Some(Vec::new());
    }
    let mut prev: HashMap<usize, (usize, u64)> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(src);
    let mut visited = std::collections::HashSet::new();
    visited.insert(src);

    while let Some(cur) = queue.pop_front() {
        if cur == dst {
            break;
        }
        if let Some(neighbors) = adj.get(&cur) {
            for &(next, edge_idx) in neighbors {
                if visited.insert(next) {
                    prev.insert(next, (cur, edge_idx));
                    queue.push_back(next);
                }
            }
        }
    }

    if !visited.contains(&dst) {
        return None;
    }

    let mut path = Vec::new();
    let mut cur = dst;
    while cur != src {
        let (p, edge_idx) = prev[&cur];
        path.push(edge_idx);
        cur = p;
    }
    path.reverse();
    Some(path)
}

/// Attempts to recover a cycle of exactly `params.cycle_length` edges from
/// the trimmed residual `alive`. Returns edge indices in discovery order
/// (the closing edge last), or `None` if no such cycle exists in the
/// residual.
pub fn recover_cycle(params: &Params, alive: &Bitset) -> Option<Vec<u64>> {
    let k = params.cycle_length;
    let n = params.edge_count();
    let node_mask = params.node_mask();

    if alive.popcount() < k {
        return None;
    }

    let mut dsu = DisjointSet::new();
    let mut adj: HashMap<usize, Vec<(usize, u64)>> = HashMap::new();

    for i in 0..n {
        if !alive.get(i) {
            continue;
        }
        let (u, v) = endpoints(params.key, params.variant, node_mask, i);
        let a_key = pack(0, u);
        let b_key = pack(1, v);
        let a = dsu.slot(a_key);
        let b = dsu.slot(b_key);

        let ra = dsu.find(a);
        let rb = dsu.find(b);

        if ra != rb {
            dsu.unite(a, b);
            adj.entry(a).or_default().push((b, i));
            adj.entry(b).or_default().push((a, i));
            continue;
        }

        if let Some(path) = bfs_path_edges(&adj, a, b) {
            if path.len() as u64 + 1 == k {
                let mut cycle = path;
                cycle.push(i);
                return Some(cycle);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lean_trim;
    use crate::types::{Key, SipVariant};

    #[test]
    fn too_few_alive_edges_returns_none() {
        let params = Params::new(10, Key::new(1, 2), SipVariant::Sip24);
        let alive = Bitset::zeroed(params.edge_count());
        assert_eq!(recover_cycle(&params, &alive), None);
    }

    #[test]
    fn recovered_cycle_has_requested_length() {
        // Search a handful of small graphs for one that happens to trim
        // down to a cycle; not every key/edge_bits combination will.
        for attempt in 0u64..64 {
            let mut params = Params::new(10, Key::new(attempt, attempt ^ 0xdead_beef), SipVariant::Sip24);
            params.cycle_length = 42;
            params.threads = 1;
            let (alive, _) = lean_trim::trim(&params);
            if let Some(cycle) = recover_cycle(&params, &alive) {
                assert_eq!(cycle.len() as u64, params.cycle_length);
                let unique: std::collections::HashSet<_> = cycle.iter().collect();
                assert_eq!(unique.len(), cycle.len());
                return;
            }
        }
    }

    #[test]
    fn path_in_tree_is_unique_and_simple() {
        // Build a tiny adjacency forest by hand: 0 -- e0 -- 1 -- e1 -- 2
        let mut adj: HashMap<usize, Vec<(usize, u64)>> = HashMap::new();
        adj.entry(0).or_default().push((1, 100));
        adj.entry(1).or_default().push((0, 100));
        adj.entry(1).or_default().push((2, 200));
        adj.entry(2).or_default().push((1, 200));

        let path = bfs_path_edges(&adj, 0, 2).unwrap();
        assert_eq!(path, vec![100, 200]);
    }
}
