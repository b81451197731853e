// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NEAR Transaction Protocol
//!
//! Builds, encodes and signs transactions for a NEAR-style chain. A caller
//! describes what should happen as an ordered list of typed actions; this
//! crate turns that into the exact bytes the chain hashes and verifies, and
//! gets a signature over them from whatever holds the key.
//!
//! ## Architecture
//!
//! - **codec**: the bit-exact binary layout every node agrees on.
//! - **crypto**: key types, signatures, hashing, an ed25519 key pair.
//! - **transaction**: actions, transactions, the async signing pipeline,
//!   delegate (meta-) transactions and verification.
//! - **units**: NEAR amount and gas conversions.
//! - **config**: protocol constants and network identifiers.
//!
//! ## Two signing domains
//!
//! A transaction is signed by its `signer_id` through an injected
//! [`transaction::Signer`]. A delegate action is signed by its sender with a
//! key held locally, then carried inside someone else's transaction. Both
//! signatures cover the SHA-256 of the respective canonical encoding and are
//! checked independently.
//!
//! ```rust
//! use near_tx_protocol::crypto::{CryptoHash, KeyPair};
//! use near_tx_protocol::transaction::{
//!     sign_transaction_parts, verify_signed_transaction, Action, InMemorySigner,
//! };
//!
//! # tokio_test_block_on(async {
//! let key = KeyPair::generate();
//! let signer = InMemorySigner::new().with_key("testnet", "alice.test", key);
//!
//! let (hash, signed) = sign_transaction_parts(
//!     "bob.test",
//!     1,
//!     vec![Action::transfer(1_000)],
//!     CryptoHash::default(),
//!     &signer,
//!     "alice.test",
//!     None,
//! )
//! .await
//! .unwrap();
//!
//! assert_eq!(verify_signed_transaction(&signed).unwrap(), hash);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod crypto;
pub mod transaction;
pub mod units;
