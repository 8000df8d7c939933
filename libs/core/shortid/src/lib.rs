//! Short opaque identifiers for database records.
//!
//! Generates fixed-length, URL-safe alphanumeric strings with no persisted
//! sequence state. With 62 symbols over 20 positions the collision
//! probability is negligible for this system's record volumes. No ordering
//! or monotonicity is guaranteed.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of every generated identifier.
pub const ID_LENGTH: usize = 20;

/// Generate a new 20-character identifier.
pub fn generate() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_id_has_fixed_length() {
        for _ in 0..100 {
            assert_eq!(generate().len(), ID_LENGTH);
        }
    }

    #[test]
    fn test_generated_id_is_url_safe_alphanumeric() {
        let id = generate();
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
