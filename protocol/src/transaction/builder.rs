//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] collects fields and actions, then `.build()`
//! hands back an unsigned [`Transaction`]. It does not sign. That happens
//! in [`super::signing`], so construction stays testable without a signer.

use super::action::Action;
use super::types::Transaction;
use crate::crypto::{CryptoHash, PublicKey};

/// Fluent builder for [`Transaction`].
///
/// ```rust
/// use near_tx_protocol::crypto::{KeyPair, CryptoHash};
/// use near_tx_protocol::transaction::{Action, TransactionBuilder};
///
/// let key = KeyPair::generate();
/// let tx = TransactionBuilder::new("alice.test", key.public_key())
///     .receiver("bob.test")
///     .nonce(7)
///     .block_hash(CryptoHash::hash_bytes(b"recent block"))
///     .action(Action::transfer(1_000))
///     .build();
///
/// assert_eq!(tx.actions.len(), 1);
/// assert_eq!(tx.receiver_id, "bob.test");
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    signer_id: String,
    public_key: PublicKey,
    receiver_id: Option<String>,
    nonce: u64,
    block_hash: CryptoHash,
    actions: Vec<Action>,
}

impl TransactionBuilder {
    /// Starts a transaction signed by `signer_id` with `public_key`.
    ///
    /// Defaults: receiver is the signer itself, nonce 0, all-zero block hash,
    /// no actions.
    pub fn new(signer_id: impl Into<String>, public_key: PublicKey) -> Self {
        Self {
            signer_id: signer_id.into(),
            public_key,
            receiver_id: None,
            nonce: 0,
            block_hash: CryptoHash::default(),
            actions: Vec::new(),
        }
    }

    /// Sets the receiver. Defaults to the signer.
    pub fn receiver(mut self, receiver_id: impl Into<String>) -> Self {
        self.receiver_id = Some(receiver_id.into());
        self
    }

    /// Sets the access key nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the recent block hash the transaction is anchored to.
    pub fn block_hash(mut self, block_hash: CryptoHash) -> Self {
        self.block_hash = block_hash;
        self
    }

    /// Appends one action. Order is execution order.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends several actions, in order.
    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Consumes the builder and returns the unsigned transaction.
    pub fn build(self) -> Transaction {
        let receiver_id = self.receiver_id.unwrap_or_else(|| self.signer_id.clone());
        Transaction {
            signer_id: self.signer_id,
            public_key: self.public_key,
            nonce: self.nonce,
            receiver_id,
            block_hash: self.block_hash,
            actions: self.actions,
        }
    }
}
