//! # Content Identity
//!
//! Fast, deterministic content fingerprints for blocks. The hash is 64-bit
//! FNV-1a over the UTF-8 bytes of the block text, rendered as 16 lowercase hex
//! digits. It is stable across runs and platforms; it is not a cryptographic
//! hash and collisions are tolerated by the diff engine (a collision only costs
//! a wrongly kept block, never an invalid command stream).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Content fingerprint of a block's raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Fingerprints `text`. O(len), no allocation.
    pub fn of(text: &str) -> Self {
        let mut hash = FNV_OFFSET_BASIS;
        for byte in text.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(hash)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fingerprint {0:?}: expected 16 hex digits")]
pub struct FingerprintParseError(String);

impl FromStr for Fingerprint {
    type Err = FingerprintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FingerprintParseError(s.to_string()));
        }
        u64::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| FingerprintParseError(s.to_string()))
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.to_string()
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Hashes `text` to a fixed-width hex string.
pub fn hash(text: &str) -> String {
    Fingerprint::of(text).to_string()
}

/// Cache key for an external renderer's output for a block.
///
/// The renderer tag keeps output of different renderers (diagram, math,
/// highlighter) for the same content apart.
pub fn render_cache_key(renderer: &str, fingerprint: Fingerprint) -> String {
    format!("{renderer}:{fingerprint}")
}
