//! Random broadcast tag generation.
//!
//! Every spray broadcast carries a short alphanumeric tag so clients can
//! distinguish deliveries. Tags are advisory display identifiers, not
//! primary keys: no collision detection is performed, and the generator is
//! deliberately not cryptographically secure.

use rand::Rng;

/// Alphabet for broadcast tags: digits, then lowercase, then uppercase.
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of the tag attached to every broadcast.
///
/// Seven characters over a 62-symbol alphabet gives ~3.5e12 combinations,
/// enough for display purposes.
pub const AUTO_ID_LEN: usize = 7;

/// Generates a random alphanumeric string of the given length.
///
/// Characters are drawn uniformly from `[0-9a-zA-Z]`. A `length` of zero
/// yields the empty string. Output is opaque; callers must not rely on
/// anything beyond length and character set.
pub fn generate(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generates a broadcast tag of the standard length.
pub fn generate_tag() -> String {
    generate(AUTO_ID_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generate_produces_requested_length() {
        assert_eq!(generate(7).len(), 7);
        assert_eq!(generate(1).len(), 1);
        assert_eq!(generate(32).len(), 32);
    }

    #[test]
    fn generate_zero_length_yields_empty_string() {
        assert_eq!(generate(0), "");
    }

    #[test]
    fn generate_tag_uses_standard_length() {
        assert_eq!(generate_tag().len(), AUTO_ID_LEN);
    }

    #[test]
    fn successive_tags_are_distinct() {
        // 62^7 combinations; a same-pair here would indicate a broken rng.
        let a = generate_tag();
        let b = generate_tag();
        assert_ne!(a, b);
    }

    #[test]
    fn output_is_alphanumeric_ascii() {
        let tag = generate(256);
        assert!(tag.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    proptest! {
        #[test]
        fn any_length_produces_alphanumeric_output(len in 0usize..64) {
            let s = generate(len);
            prop_assert_eq!(s.len(), len);
            prop_assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }
}
