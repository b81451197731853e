//! # Transaction Module
//!
//! The action model, transactions, and the two signing domains.
//!
//! ## Architecture
//!
//! ```text
//! action.rs       Action sum type, constructors, JSON single-variant parsing
//! permission.rs   AccessKey and AccessKeyPermission
//! args.rs         FunctionCallArgs: raw bytes or JSON
//! types.rs        Transaction and SignedTransaction
//! builder.rs      Fluent TransactionBuilder for unsigned transactions
//! signer.rs       Async Signer capability and InMemorySigner
//! signing.rs      Transaction signing pipeline
//! delegate.rs     DelegateAction and the local-key delegate builder
//! verification.rs Signature checks for transactions and delegates
//! error.rs        TransactionError
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: assemble [`Action`]s, then a [`Transaction`] with
//!    [`TransactionBuilder`].
//! 2. **Sign**: [`sign_transaction`] encodes, hashes, and asks a [`Signer`].
//! 3. **Broadcast**: submit [`SignedTransaction::to_base64`] to an RPC node.
//!
//! Meta-transactions add a step before 1: the sender signs a
//! [`DelegateAction`] with [`create_signed_delegate`], and a relayer puts the
//! resulting [`Action::Delegate`] into its own transaction.

pub mod action;
pub mod args;
pub mod builder;
pub mod delegate;
pub mod error;
pub mod permission;
pub mod signer;
pub mod signing;
pub mod types;
pub mod verification;

pub use action::Action;
pub use args::FunctionCallArgs;
pub use builder::TransactionBuilder;
pub use delegate::{
    build_delegate_action, create_signed_delegate, sign_delegate_action, DelegateAction,
    NonDelegateAction, SignedDelegateAction,
};
pub use error::TransactionError;
pub use permission::{AccessKey, AccessKeyPermission, FunctionCallPermission};
pub use signer::{InMemorySigner, Signer, SignerError};
pub use signing::{sign_transaction, sign_transaction_parts};
pub use types::{SignedTransaction, Transaction};
pub use verification::{verify_signed_delegate, verify_signed_transaction};
