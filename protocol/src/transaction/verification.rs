//! Signature verification for both signing domains.
//!
//! A relayer checks the inner delegate signature before paying gas for it;
//! a node or indexer checks the outer transaction signature before trusting
//! anything in it. Both recompute the canonical bytes, hash them, and verify
//! the ed25519 signature over that hash with the key embedded in the entity
//! itself.

use tracing::debug;

use super::delegate::SignedDelegateAction;
use super::error::TransactionError;
use super::types::SignedTransaction;
use crate::codec::BinaryCodec;
use crate::crypto::{CryptoHash, PublicKey, Signature};

/// Verifies a signed transaction against `transaction.public_key`.
///
/// Returns the transaction hash on success.
///
/// Does not descend into `Delegate` actions; call
/// [`verify_signed_delegate`] on each of them separately.
pub fn verify_signed_transaction(signed: &SignedTransaction) -> Result<CryptoHash, TransactionError> {
    let bytes = signed.transaction.to_bytes()?;
    check(&signed.transaction.public_key, &bytes, &signed.signature)
}

/// Verifies a signed delegate action against `delegate_action.public_key`.
///
/// Returns the delegate action hash on success.
pub fn verify_signed_delegate(signed: &SignedDelegateAction) -> Result<CryptoHash, TransactionError> {
    let bytes = signed.delegate_action.to_bytes()?;
    check(&signed.delegate_action.public_key, &bytes, &signed.signature)
}

fn check(
    public_key: &PublicKey,
    canonical: &[u8],
    signature: &Signature,
) -> Result<CryptoHash, TransactionError> {
    let hash = CryptoHash::hash_bytes(canonical);
    if !public_key.verify(hash.as_bytes(), signature) {
        debug!(%public_key, %hash, "signature rejected");
        return Err(TransactionError::InvalidSignature {
            public_key: *public_key,
        });
    }
    Ok(hash)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
