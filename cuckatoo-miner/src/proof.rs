//! Proof rendering (H5): comma-separated ASCII integers, insertion order.

pub fn format_proof(proof: &[u64]) -> String {
    proof
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
