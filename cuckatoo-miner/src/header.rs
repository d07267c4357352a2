//! Header parsing/generation and FNV-1a key derivation (H2).
//!
//! A header is a 32 hex character (16 byte) string. The SipHash key is not
//! the decoded bytes: it is derived by hashing the ASCII header text itself,
//! suffixed with `/k0` and `/k1`, with FNV-1a.

use cuckatoo_core::{CuckatooError, Key};
use rand::Rng;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv1a64(data: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Validates a header string: exactly 32 lowercase-or-uppercase hex digits.
pub fn validate_header(header: &str) -> Result<(), CuckatooError> {
    if header.len() != 32 || !header.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CuckatooError::InvalidHeader { len: header.len() });
    }
    Ok(())
}

/// Generates a random 32 hex character header.
pub fn random_header() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Derives `(k0, k1)` from the header's ASCII text via FNV-1a, per the
/// harness's key schedule.
pub fn derive_key(header: &str) -> Key {
    let k0 = fnv1a64(format!("{header}/k0").as_bytes());
    let k1 = fnv1a64(format!("{header}/k1").as_bytes());
    Key::new(k0, k1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_wrong_length() {
        assert!(validate_header("00112233").is_err());
    }

    #[test]
    fn validate_rejects_non_hex() {
        let bad = "0011223344556677gggggggggggggggg";
        assert!(validate_header(bad).is_err());
    }

    #[test]
    fn validate_accepts_32_hex_chars() {
        assert!(validate_header("00112233445566778899aabbccddeeff").is_ok());
    }

    #[test]
    fn derive_key_is_deterministic() {
        let header = "00112233445566778899aabbccddeeff";
        let a = derive_key(header);
        let b = derive_key(header);
        assert_eq!(a, b);
    }

    #[test]
    fn derive_key_differs_per_header() {
        let a = derive_key(&"0".repeat(32));
        let b = derive_key(&"1".repeat(32));
        assert_ne!(a, b);
    }

    #[test]
    fn derive_key_k0_and_k1_differ() {
        let key = derive_key("00112233445566778899aabbccddeeff");
        assert_ne!(key.k0, key.k1);
    }

    #[test]
    fn random_header_is_valid_and_varies() {
        let a = random_header();
        let b = random_header();
        assert!(validate_header(&a).is_ok());
        assert!(validate_header(&b).is_ok());
        assert_ne!(a, b);
    }
}
