//! Error type shared by the action model, the delegate builder and the
//! signing pipeline.

use thiserror::Error;

use super::signer::SignerError;
use crate::codec::CodecError;
use crate::crypto::PublicKey;

/// Everything that can go wrong between "here are my actions" and "here is
/// a signed transaction".
///
/// Codec and signer failures are wrapped transparently so callers can match
/// on the underlying variant; nothing is retried or swallowed here.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// A union was supplied with zero or several populated alternatives.
    #[error("{type_name} must have exactly one variant populated, found {found}")]
    InvalidVariant {
        type_name: &'static str,
        found: usize,
    },

    /// A delegate action was asked to wrap another delegate action.
    #[error("delegate actions cannot wrap a delegate action (found one at index {index})")]
    NestedDelegateAction { index: usize },

    /// A local key was asked to sign an entity that names a different key.
    #[error("entity names key {expected} but was signed with {found}")]
    KeyMismatch {
        expected: PublicKey,
        found: PublicKey,
    },

    /// A signature does not verify against the embedded public key.
    #[error("signature does not verify against {public_key}")]
    InvalidSignature { public_key: PublicKey },

    /// Structured function-call args or a JSON action could not be processed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Signer(#[from] SignerError),
}
