//! Pluggable naming capability
//!
//! A hasher maps an original identifier to its obfuscated replacement. It must
//! be deterministic, but nothing here guarantees uniqueness; colliding
//! proposals are filtered later by the candidate resolver.

/// Deterministic identifier-to-identifier mapping
pub trait NameHasher: Send + Sync {
    fn hash(&self, name: &str) -> String;
}

/// Number of digest bytes kept in an obfuscated name (two hex chars each)
const HASHED_NAME_BYTES: usize = 16;

const KEY_CONTEXT: &str = "goshroud 2024-05 identifier obfuscation key";

/// BLAKE3 keyed hasher producing letter-only names
///
/// Names keep their leading case so exported Go identifiers stay exported.
pub struct KeyedHasher {
    key: [u8; 32],
}

impl KeyedHasher {
    pub fn new(passphrase: &str) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, passphrase.as_bytes()),
        }
    }
}

impl NameHasher for KeyedHasher {
    fn hash(&self, name: &str) -> String {
        let digest = blake3::keyed_hash(&self.key, name.as_bytes());
        let hex = digest.to_hex();

        let mut hashed: String = hex.as_str()[..HASHED_NAME_BYTES * 2]
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => char::from(b'g' + d as u8),
                None => c,
            })
            .collect();

        if name.chars().next().is_some_and(|c| c.is_uppercase()) {
            hashed[..1].make_ascii_uppercase();
        }
        hashed
    }
}

/// Appends a fixed suffix; readable output for debugging runs
pub struct SuffixHasher {
    suffix: String,
}

impl SuffixHasher {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl NameHasher for SuffixHasher {
    fn hash(&self, name: &str) -> String {
        format!("{}{}", name, self.suffix)
    }
}
