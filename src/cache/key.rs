//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Hash a logical cache key into the on-disk file stem.
///
/// Hashing keeps arbitrary handles (unicode, case, punctuation) out of
/// file names and gives every key a fixed-length, collision-resistant stem.
pub fn cache_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Logical key for a profile lookup
pub fn user_key(handle: &str) -> String {
    format!("user_{}", handle)
}

/// Logical key for a recent-posts lookup
pub fn posts_key(user_id: &str) -> String {
    format!("posts_{}", user_id)
}
