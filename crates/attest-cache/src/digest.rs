use sha2::{Digest, Sha256};

/// Length of a derived cache key in hex characters.
pub const KEY_HEX_LEN: usize = 64;

/// Derive the content-addressed key: SHA-256 over the content bytes followed
/// by the producer version bytes, lowercase hex.
pub fn derive_key(content: &[u8], producer_version: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hasher.update(producer_version.as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether `s` has the shape of a derived key.
pub fn is_key(s: &str) -> bool {
    s.len() == KEY_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Short label identifying content by its own digest (version-independent).
pub(crate) fn content_label(content: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(content));
    format!("sha256:{}", &digest[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_is_deterministic() {
        let a = derive_key(b"imgA", "v1");
        let b = derive_key(b"imgA", "v1");
        assert_eq!(a, b);
        assert!(is_key(&a));
    }

    #[test]
    fn derive_key_matches_plain_sha256_of_concatenation() {
        let expected = hex::encode(Sha256::digest(b"imgAv1"));
        assert_eq!(derive_key(b"imgA", "v1"), expected);
    }

    #[test]
    fn derive_key_changes_with_single_byte() {
        assert_ne!(derive_key(b"imgA", "v1"), derive_key(b"imgB", "v1"));
        assert_ne!(derive_key(b"\x00\x01", "v1"), derive_key(b"\x00\x02", "v1"));
    }

    #[test]
    fn derive_key_changes_with_version() {
        assert_ne!(derive_key(b"imgA", "v1"), derive_key(b"imgA", "v2"));
    }

    #[test]
    fn is_key_rejects_other_shapes() {
        assert!(!is_key("abc"));
        assert!(!is_key(&"A".repeat(KEY_HEX_LEN)));
        assert!(!is_key(&"g".repeat(KEY_HEX_LEN)));
        assert!(is_key(&"0f".repeat(KEY_HEX_LEN / 2)));
    }

    #[test]
    fn content_label_is_version_independent() {
        let label = content_label(b"imgA");
        assert!(label.starts_with("sha256:"));
        assert_eq!(label.len(), "sha256:".len() + 12);
        assert_eq!(label, content_label(b"imgA"));
    }
}
