//! Session key fingerprinting.
//!
//! The user service logs a truncated SHA-256 digest of its signing key at
//! startup so operators can confirm replicas share a key without exposing
//! the key itself.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Lowercase hex of the first 8 bytes of `SHA-256(key.signing())`.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use habit_tracker::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
