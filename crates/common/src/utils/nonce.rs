//! Random nonces and timestamps for signed requests

use uuid::Uuid;

/// 32 lowercase hex characters from a random v4 UUID.
#[must_use]
pub fn nonce_str() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Current Unix time in whole seconds, as the wire expects it.
#[must_use]
pub fn timestamp_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_is_32_hex_chars_and_unique() {
        let a = nonce_str();
        let b = nonce_str();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }

    #[test]
    fn timestamp_is_after_2020() {
        assert!(timestamp_secs() > 1_577_836_800);
    }
}
