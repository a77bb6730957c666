// ABOUTME: MD5 content fingerprints used as cache and identity keys.
// ABOUTME: Not a security primitive; kept for compatibility with stored identifiers.

use std::fmt;

use serde::{Serialize, Serializer};

/// Length in bytes of a [`Digest`].
pub const DIGEST_LEN: usize = 16;

/// A 128-bit content fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// 32 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&md5::Digest(self.0), f)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Digest of raw bytes.
pub fn digest_data(data: &[u8]) -> Digest {
    Digest(md5::compute(data).0)
}

/// Digest of the UTF-8 encoding of `s`.
pub fn digest_bytes(s: &str) -> Digest {
    digest_data(s.as_bytes())
}

/// Hex rendering of [`digest_bytes`].
pub fn digest_hex(s: &str) -> String {
    digest_bytes(s).to_hex()
}

/// Lowercase hex of arbitrary bytes. `None` for empty input.
pub fn hex_string(data: &[u8]) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    Some(hex::encode(data))
}
