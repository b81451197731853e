//! # Hashing
//!
//! Every transaction and delegate action is identified by the SHA-256 of its
//! canonical encoding. The hash function is fixed: it is part of the
//! protocol, not a per-call option, and nodes recompute it to check
//! signatures.
//!
//! Hashes render as base58 in text and JSON, which is how explorers and RPC
//! responses show transaction and block hashes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use super::keys::KeyError;
use crate::codec::{BinaryCodec, CodecError, Reader};
use crate::config::HASH_LENGTH;

/// A 32-byte digest: block hashes, transaction hashes, delegate hashes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CryptoHash(pub [u8; HASH_LENGTH]);

impl CryptoHash {
    /// Hashes `data` with the protocol hash function.
    pub fn hash_bytes(data: &[u8]) -> Self {
        Self(sha256(data))
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }
}

impl From<[u8; HASH_LENGTH]> for CryptoHash {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for CryptoHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CryptoHash({})", self)
    }
}

impl FromStr for CryptoHash {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = bs58::decode(s)
            .into_vec()
            .map_err(|_| KeyError::InvalidBase58)?;
        let bytes: [u8; HASH_LENGTH] =
            raw.as_slice()
                .try_into()
                .map_err(|_| KeyError::InvalidLength {
                    expected: HASH_LENGTH,
                    actual: raw.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl Serialize for CryptoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CryptoHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl BinaryCodec for CryptoHash {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.0.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self(input.take_array()?))
    }
}

/// Computes SHA-256 of `data`.
///
/// ```
/// use near_tx_protocol::crypto::sha256;
///
/// let digest = sha256(b"near");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; HASH_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut output = [0u8; HASH_LENGTH];
    output.copy_from_slice(&hasher.finalize());
    output
}
