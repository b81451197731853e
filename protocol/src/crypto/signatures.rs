//! # Local Signing
//!
//! The delegate builder signs with a key it holds directly, without going
//! through the asynchronous [`Signer`](crate::transaction::Signer)
//! capability. [`LocalSigner`] is that seam: anything that can hand out its
//! public key and sign bytes synchronously. [`KeyPair`] is the stock
//! implementation; tests substitute deterministic stubs.
//!
//! Both signing domains in this crate sign the SHA-256 of the canonical
//! bytes, never the bytes themselves. [`sign_hash_of`] and [`verify_hash_of`]
//! keep that rule in one place.

use super::hash::CryptoHash;
use super::keys::{KeyPair, PublicKey, Signature};

/// A signing key held in process.
pub trait LocalSigner {
    /// The public key that verifies this signer's signatures.
    fn public_key(&self) -> PublicKey;

    /// Signs `message` as-is.
    fn sign(&self, message: &[u8]) -> Signature;
}

impl LocalSigner for KeyPair {
    fn public_key(&self) -> PublicKey {
        KeyPair::public_key(self)
    }

    fn sign(&self, message: &[u8]) -> Signature {
        KeyPair::sign(self, message)
    }
}

impl<T: LocalSigner + ?Sized> LocalSigner for &T {
    fn public_key(&self) -> PublicKey {
        (**self).public_key()
    }

    fn sign(&self, message: &[u8]) -> Signature {
        (**self).sign(message)
    }
}

/// Hashes `canonical` and signs the digest. Returns both.
pub fn sign_hash_of<S: LocalSigner + ?Sized>(signer: &S, canonical: &[u8]) -> (CryptoHash, Signature) {
    let hash = CryptoHash::hash_bytes(canonical);
    let signature = signer.sign(hash.as_bytes());
    (hash, signature)
}

/// Checks that `signature` covers the SHA-256 of `canonical` under `public_key`.
pub fn verify_hash_of(public_key: &PublicKey, canonical: &[u8], signature: &Signature) -> bool {
    let hash = CryptoHash::hash_bytes(canonical);
    public_key.verify(hash.as_bytes(), signature)
}
