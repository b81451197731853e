//! Transactions and signed transactions.
//!
//! A [`Transaction`] is the unsigned envelope: who signs, with which key,
//! under which nonce, against which receiver, anchored to which recent
//! block. Its canonical encoding is what gets hashed and signed. A
//! [`SignedTransaction`] pairs it with the signature and is what gets
//! broadcast.

use serde::{Deserialize, Serialize};

use super::action::Action;
use crate::codec::{BinaryCodec, CodecError, Reader};
use crate::crypto::{CryptoHash, PublicKey, Signature};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An unsigned transaction.
///
/// # Canonical Byte Format
///
/// Fields in this order, encoded per [`crate::codec`]:
///
/// ```text
/// signer_id | public_key | nonce | receiver_id | block_hash | actions
/// ```
///
/// This is the order the chain expects, and differs from the order the
/// fields are usually listed in prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Account whose access key signs and pays for this transaction.
    pub signer_id: String,

    /// Access key of `signer_id` that produces the signature.
    pub public_key: PublicKey,

    /// Must exceed the access key's current nonce on chain.
    pub nonce: u64,

    /// Account the actions execute against.
    pub receiver_id: String,

    /// A recent block hash. Transactions expire once the block ages out.
    pub block_hash: CryptoHash,

    /// Executed in order, atomically.
    pub actions: Vec<Action>,
}

impl Transaction {
    /// SHA-256 of the canonical encoding. This is the transaction hash RPC
    /// nodes report and the digest the signature covers.
    pub fn hash(&self) -> Result<CryptoHash, CodecError> {
        Ok(CryptoHash::hash_bytes(&self.to_bytes()?))
    }
}

impl BinaryCodec for Transaction {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.signer_id.encode_to(out)?;
        self.public_key.encode_to(out)?;
        self.nonce.encode_to(out)?;
        self.receiver_id.encode_to(out)?;
        self.block_hash.encode_to(out)?;
        self.actions.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            signer_id: String::decode_from(input)?,
            public_key: PublicKey::decode_from(input)?,
            nonce: u64::decode_from(input)?,
            receiver_id: String::decode_from(input)?,
            block_hash: CryptoHash::decode_from(input)?,
            actions: Vec::decode_from(input)?,
        })
    }
}

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A transaction plus the signature over its hash. Encodes as the
/// transaction followed by the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
}

impl SignedTransaction {
    /// The hash of the inner transaction. The signature is not part of it.
    pub fn hash(&self) -> Result<CryptoHash, CodecError> {
        self.transaction.hash()
    }

    /// Base64 of the canonical encoding, the form `broadcast_tx_*` RPC
    /// methods accept.
    pub fn to_base64(&self) -> Result<String, CodecError> {
        use base64::Engine as _;
        Ok(base64::engine::general_purpose::STANDARD.encode(self.to_bytes()?))
    }
}

impl BinaryCodec for SignedTransaction {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.transaction.encode_to(out)?;
        self.signature.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            transaction: Transaction::decode_from(input)?,
            signature: Signature::decode_from(input)?,
        })
    }
}
