use std::fmt::Display;

use blake3::Hash;

/// Fingerprint of a track payload.
///
/// Lets clients tell uploaded payloads apart without transferring them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayloadDigest(pub Hash);

impl PayloadDigest {
    pub fn of(payload: &[u8]) -> Self {
        Self(blake3::hash(payload))
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }

    /// first 12 hex characters, enough for listings
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(12);
        hex
    }
}

impl Display for PayloadDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_payload_same_digest() {
        assert_eq!(PayloadDigest::of(b"abc"), PayloadDigest::of(b"abc"));
        assert_ne!(PayloadDigest::of(b"abc"), PayloadDigest::of(b"abd"));
    }

    #[test]
    fn test_short_is_prefix_of_hex() {
        let digest = PayloadDigest::of(b"payload");
        let short = digest.short();

        assert_eq!(short.len(), 12);
        assert!(digest.to_hex().starts_with(&short));
        assert_eq!(digest.to_string(), digest.to_hex());
    }
}
