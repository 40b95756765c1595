//! Random strings, salted hashes, and access-token generation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use apikit_core::config::SecurityConfig;

type HmacSha256 = Hmac<Sha256>;

/// Characters that cannot be confused with each other when read aloud or
/// copied by hand (no `0/O`, `1/l/I`, `i`, `o`).
pub const UNAMBIGUOUS_ALPHABET: &str = "23456789abcdefghjkmnpqrstuvwxyzABCDEFGHJKMNPQRSTUVWYZ";

/// A random string of `length` characters drawn from `alphabet`
/// (or [`UNAMBIGUOUS_ALPHABET`] when `None` or empty).
pub fn random_string(length: usize, alphabet: Option<&str>) -> String {
    let alphabet: Vec<char> = alphabet
        .filter(|a| !a.is_empty())
        .unwrap_or(UNAMBIGUOUS_ALPHABET)
        .chars()
        .collect();

    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Base64 of HMAC-SHA256 over `value`, keyed with `salt` followed by `pepper`.
pub fn salted(value: &str, salt: &str, pepper: &str) -> String {
    STANDARD.encode(hmac_sha256(value, salt, pepper))
}

/// Derive a new bearer access token: a random seed [`salted`] with the
/// configured salt and pepper, re-encoded URL-safe without padding.
pub fn generate_access_token(security: &SecurityConfig) -> String {
    let seed = random_string(security.token_seed_length, None);
    url_safe(&salted(&seed, &security.salt, &security.pepper))
}

fn url_safe(standard: &str) -> String {
    standard
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

fn hmac_sha256(value: &str, salt: &str, pepper: &str) -> Vec<u8> {
    let key = format!("{salt}{pepper}");
    let Ok(mut mac) = HmacSha256::new_from_slice(key.as_bytes()) else {
        unreachable!("HMAC-SHA256 accepts keys of any length");
    };
    mac.update(value.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_string_uses_alphabet() {
        let s = random_string(64, None);
        assert_eq!(s.chars().count(), 64);
        assert!(s.chars().all(|c| UNAMBIGUOUS_ALPHABET.contains(c)));

        assert_eq!(random_string(5, Some("x")), "xxxxx");
        assert_eq!(random_string(0, None), "");
    }

    #[test]
    fn test_salted_is_deterministic_and_keyed() {
        let a = salted("secret", "salt", "");
        assert_eq!(a, salted("secret", "salt", ""));
        assert_ne!(a, salted("secret", "salt", "pepper"));
        assert_ne!(a, salted("secret", "other", ""));
        // 32-byte digest in padded base64
        assert_eq!(a.len(), 44);
    }

    #[test]
    fn test_generated_tokens_are_url_safe_and_unique() {
        let config = SecurityConfig::default();
        let a = generate_access_token(&config);
        let b = generate_access_token(&config);
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_url_safe_rewrites_salted_output() {
        assert_eq!(url_safe("a+b/c=="), "a-b_c");
        let salted = salted("seed", "salt", "pepper");
        assert_eq!(url_safe(&salted).len(), 43);
    }
}
