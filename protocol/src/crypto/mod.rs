//! # Cryptographic Primitives
//!
//! Key types, the fixed transaction hash, and the in-process ed25519 key
//! pair. Everything here is a thin, typed wrapper around audited crates
//! (`ed25519-dalek`, `sha2`); there is no hand-rolled cryptography.
//!
//! The raw signature algorithm behind the external signer capability is not
//! this crate's business. [`KeyPair`] exists for local signing (delegate
//! actions) and for the in-memory reference signer.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{sha256, CryptoHash};
pub use keys::{KeyError, KeyPair, KeyType, PublicKey, Signature};
pub use signatures::{sign_hash_of, verify_hash_of, LocalSigner};
