//! # Key Material
//!
//! Public keys, signatures and the ed25519 key pair that backs local
//! signing.
//!
//! On the wire a key is a one-byte [`KeyType`] followed by a fixed-width
//! payload: 32 bytes for a public key, 64 for a signature. In text and JSON
//! both use the `ed25519:<base58>` form wallets and explorers expect.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop (ed25519-dalek does this for us).
//! - Key generation draws from `OsRng`.
//! - Secret bytes are never logged and never appear in `Debug` output.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::codec::{BinaryCodec, CodecError, Reader};
use crate::config::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors from parsing textual keys and signatures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key type: {0}")]
    UnknownKeyType(String),

    #[error("invalid base58 payload")]
    InvalidBase58,

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("secret key does not match its embedded public key")]
    KeypairMismatch,
}

// ---------------------------------------------------------------------------
// KeyType
// ---------------------------------------------------------------------------

/// The signature scheme a key belongs to. Encoded as a single tag byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KeyType {
    #[default]
    Ed25519 = 0,
}

impl KeyType {
    /// Textual prefix used in `ed25519:<base58>` strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" => Ok(Self::Ed25519),
            other => Err(KeyError::UnknownKeyType(other.to_string())),
        }
    }
}

impl BinaryCodec for KeyType {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.push(*self as u8);
        Ok(())
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        match input.take_tag()? {
            0 => Ok(Self::Ed25519),
            tag => Err(CodecError::UnknownDiscriminant {
                type_name: "KeyType",
                tag,
            }),
        }
    }
}

/// Splits `ed25519:<base58>` into its key type and decoded payload. A bare
/// base58 string is read as ed25519.
fn parse_prefixed<const N: usize>(s: &str) -> Result<(KeyType, [u8; N]), KeyError> {
    let (key_type, payload) = match s.split_once(':') {
        Some((prefix, payload)) => (prefix.parse()?, payload),
        None => (KeyType::Ed25519, s),
    };
    let raw = bs58::decode(payload)
        .into_vec()
        .map_err(|_| KeyError::InvalidBase58)?;
    let data: [u8; N] = raw.as_slice().try_into().map_err(|_| KeyError::InvalidLength {
        expected: N,
        actual: raw.len(),
    })?;
    Ok((key_type, data))
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A public key: key type plus exactly 32 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    pub key_type: KeyType,
    pub data: [u8; PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    /// Wraps raw ed25519 public key bytes.
    pub fn ed25519(data: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self {
            key_type: KeyType::Ed25519,
            data,
        }
    }

    /// Verifies `signature` over `message` with this key.
    ///
    /// Returns `false` for mismatched key types, points that are not on the
    /// curve, and signatures that simply do not verify.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        if self.key_type != signature.key_type {
            return false;
        }
        match self.key_type {
            KeyType::Ed25519 => {
                let Ok(verifying_key) = VerifyingKey::from_bytes(&self.data) else {
                    return false;
                };
                let sig = DalekSignature::from_bytes(&signature.data);
                verifying_key.verify(message, &sig).is_ok()
            }
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key_type, bs58::encode(self.data).into_string())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key_type, data) = parse_prefixed::<PUBLIC_KEY_LENGTH>(s)?;
        Ok(Self { key_type, data })
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl BinaryCodec for PublicKey {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.key_type.encode_to(out)?;
        self.data.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            key_type: KeyType::decode_from(input)?,
            data: input.take_array()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A signature: key type plus exactly 64 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    pub key_type: KeyType,
    pub data: [u8; SIGNATURE_LENGTH],
}

impl Signature {
    /// Wraps raw ed25519 signature bytes.
    pub fn ed25519(data: [u8; SIGNATURE_LENGTH]) -> Self {
        Self {
            key_type: KeyType::Ed25519,
            data,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key_type, bs58::encode(self.data).into_string())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = hex::encode(self.data);
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

impl FromStr for Signature {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key_type, data) = parse_prefixed::<SIGNATURE_LENGTH>(s)?;
        Ok(Self { key_type, data })
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl BinaryCodec for Signature {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.key_type.encode_to(out)?;
        self.data.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            key_type: KeyType::decode_from(input)?,
            data: input.take_array()?,
        })
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// An ed25519 key pair held in process memory.
///
/// This is the local signing key the delegate builder uses, and what the
/// in-memory signer keeps per account. `KeyPair` deliberately does not
/// implement `Serialize`; exporting a secret goes through
/// [`KeyPair::to_secret_string`] so it is always a conscious act.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generates a fresh key pair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Derives a key pair from a 32-byte seed. Same seed, same key.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// The public half, ready to embed in a transaction.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::ed25519(self.signing_key.verifying_key().to_bytes())
    }

    /// Signs `message` as-is. Callers that follow the protocol pass a hash.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::ed25519(self.signing_key.sign(message).to_bytes())
    }

    /// Verifies a signature against this pair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key().verify(message, signature)
    }

    /// Exports the secret in the `ed25519:<base58(secret || public)>` form.
    ///
    /// Handle the result like the key itself.
    pub fn to_secret_string(&self) -> String {
        let mut raw = Vec::with_capacity(SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH);
        raw.extend_from_slice(&self.signing_key.to_bytes());
        raw.extend_from_slice(&self.public_key().data);
        format!("{}:{}", KeyType::Ed25519, bs58::encode(raw).into_string())
    }
}

impl FromStr for KeyPair {
    type Err = KeyError;

    /// Parses `ed25519:<base58>` where the payload is either the 32-byte seed
    /// or the 64-byte `secret || public` export. The embedded public half is
    /// checked against the derived one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = match s.split_once(':') {
            Some((prefix, payload)) => {
                prefix.parse::<KeyType>()?;
                payload
            }
            None => s,
        };
        let raw = bs58::decode(payload)
            .into_vec()
            .map_err(|_| KeyError::InvalidBase58)?;

        let mut seed = [0u8; SECRET_KEY_LENGTH];
        match raw.len() {
            SECRET_KEY_LENGTH => seed.copy_from_slice(&raw),
            len if len == SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH => {
                seed.copy_from_slice(&raw[..SECRET_KEY_LENGTH]);
            }
            actual => {
                return Err(KeyError::InvalidLength {
                    expected: SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH,
                    actual,
                })
            }
        }

        let pair = Self::from_seed(&seed);
        if raw.len() > SECRET_KEY_LENGTH && raw[SECRET_KEY_LENGTH..] != pair.public_key().data {
            return Err(KeyError::KeypairMismatch);
        }
        Ok(pair)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Public half only. Never print secret material, not even partially.
        write!(f, "KeyPair(pub={})", self.public_key())
    }
}
