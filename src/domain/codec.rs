//! Length-prefixed snapshot format.
//!
//! ```text
//! [i32 count] [i32 key_0] [i32 key_1] ... [i32 key_(count-1)]
//! ```
//!
//! Integers use host-native byte order. Keys are written in level order and
//! read back as an implicit complete binary tree (`i` -> `2i + 1`, `2i + 2`).
//! There is no version tag, checksum or endianness marker.

use std::mem::size_of;

use tracing::{debug, instrument, warn};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{FullBinaryTree, Key};

/// Width of the leading node count.
pub const COUNT_WIDTH: usize = size_of::<i32>();
/// Width of every encoded key.
pub const KEY_WIDTH: usize = size_of::<Key>();

/// How much of a snapshot could be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// All `count` declared keys were read.
    Complete { count: usize },
    /// Fewer than four bytes; no count to read.
    MissingHeader,
    /// Negative count; treated as an empty snapshot.
    InvalidCount { declared: i32 },
    /// Input ended early. Only the `read` whole keys are kept.
    Truncated { declared: usize, read: usize },
}

/// Keys recovered from a snapshot together with how they were recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub keys: Vec<Key>,
    pub outcome: DecodeOutcome,
}

/// Encode keys (already in level order) as a snapshot.
pub fn encode(keys: &[Key]) -> DomainResult<Vec<u8>> {
    let count = i32::try_from(keys.len()).map_err(|_| DomainError::TooManyNodes(keys.len()))?;

    let mut buf = Vec::with_capacity(COUNT_WIDTH + keys.len() * KEY_WIDTH);
    buf.extend_from_slice(&count.to_ne_bytes());
    for key in keys {
        buf.extend_from_slice(&key.to_ne_bytes());
    }
    Ok(buf)
}

/// Decode a snapshot, keeping whatever whole keys are present.
pub fn decode(bytes: &[u8]) -> Decoded {
    let Some((header, body)) = bytes.split_first_chunk::<COUNT_WIDTH>() else {
        return Decoded {
            keys: Vec::new(),
            outcome: DecodeOutcome::MissingHeader,
        };
    };

    let declared = i32::from_ne_bytes(*header);
    let Ok(count) = usize::try_from(declared) else {
        return Decoded {
            keys: Vec::new(),
            outcome: DecodeOutcome::InvalidCount { declared },
        };
    };

    let keys: Vec<Key> = body
        .chunks_exact(KEY_WIDTH)
        .take(count)
        .filter_map(|chunk| <[u8; KEY_WIDTH]>::try_from(chunk).ok())
        .map(Key::from_ne_bytes)
        .collect();

    let outcome = if keys.len() < count {
        DecodeOutcome::Truncated {
            declared: count,
            read: keys.len(),
        }
    } else {
        DecodeOutcome::Complete { count }
    };
    Decoded { keys, outcome }
}

impl FullBinaryTree {
    /// Snapshot of the tree: node count, then keys in level order.
    #[instrument(level = "debug", skip(self))]
    pub fn to_bytes(&self) -> DomainResult<Vec<u8>> {
        let keys: Vec<Key> = self.level_order().collect();
        encode(&keys)
    }

    /// Discard the current structure and rebuild it from a snapshot.
    ///
    /// Truncated input keeps the keys that were fully read. The rebuilt
    /// shape is the implicit complete tree over those keys, which is only
    /// full when their count is odd.
    #[instrument(level = "debug", skip_all, fields(len = bytes.len()))]
    pub fn load_bytes(&mut self, bytes: &[u8]) -> DecodeOutcome {
        let Decoded { keys, outcome } = decode(bytes);
        match outcome {
            DecodeOutcome::Complete { count } => debug!("load: {} keys", count),
            other => warn!("load: incomplete snapshot: {:?}", other),
        }
        self.rebuild(&keys);
        outcome
    }

    /// Tree rebuilt from a snapshot, together with the decode outcome.
    pub fn from_bytes(bytes: &[u8]) -> (Self, DecodeOutcome) {
        let mut tree = Self::new();
        let outcome = tree.load_bytes(bytes);
        (tree, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(count: i32, keys: &[Key]) -> Vec<u8> {
        let mut buf = count.to_ne_bytes().to_vec();
        for key in keys {
            buf.extend_from_slice(&key.to_ne_bytes());
        }
        buf
    }

    #[test]
    fn decode_short_header_is_missing_header() {
        let decoded = decode(&[0, 0]);
        assert_eq!(decoded.outcome, DecodeOutcome::MissingHeader);
        assert!(decoded.keys.is_empty());
    }

    #[test]
    fn decode_negative_count_is_invalid() {
        let decoded = decode(&snapshot(-3, &[1, 2, 3]));
        assert_eq!(decoded.outcome, DecodeOutcome::InvalidCount { declared: -3 });
        assert!(decoded.keys.is_empty());
    }

    #[test]
    fn decode_ignores_partial_trailing_key() {
        let mut bytes = snapshot(3, &[7, 8]);
        bytes.extend_from_slice(&[0xff, 0xff]);
        let decoded = decode(&bytes);
        assert_eq!(decoded.keys, vec![7, 8]);
        assert_eq!(
            decoded.outcome,
            DecodeOutcome::Truncated {
                declared: 3,
                read: 2
            }
        );
    }

    #[test]
    fn decode_ignores_bytes_past_declared_keys() {
        let decoded = decode(&snapshot(1, &[5, 6, 7]));
        assert_eq!(decoded.keys, vec![5]);
        assert_eq!(decoded.outcome, DecodeOutcome::Complete { count: 1 });
    }

    #[test]
    fn encode_writes_count_then_keys() {
        let bytes = encode(&[-1, 2]).unwrap();
        assert_eq!(bytes, snapshot(2, &[-1, 2]));
    }
}
