//! Transaction signing through the external [`Signer`] capability.
//!
//! Signing is a separate step from building because the key usually lives
//! somewhere else (wallet, hardware device, remote service). The pipeline
//! is canonicalize, hash, ask the signer, assemble. It holds no state, so
//! any number of pipelines can run concurrently against one signer.

use tracing::debug;

use super::action::Action;
use super::error::TransactionError;
use super::signer::Signer;
use super::types::{SignedTransaction, Transaction};
use crate::codec::BinaryCodec;
use crate::crypto::{CryptoHash, Signature};

/// Signs `tx` and returns its hash together with the signed transaction.
///
/// `account_id` defaults to `tx.signer_id`; `network_id` is passed through to
/// the signer as given. The signer receives the canonical bytes. The
/// returned hash is the SHA-256 of those same bytes, so callers can look the
/// transaction up later without re-encoding it.
///
/// The signature's key type is taken from `tx.public_key`; the signer only
/// supplies the raw bytes.
///
/// # Errors
///
/// Encoding failures surface as [`TransactionError::Codec`]; signer failures
/// as [`TransactionError::Signer`], carrying the signer's own error.
pub async fn sign_transaction<S: Signer + ?Sized>(
    tx: Transaction,
    signer: &S,
    account_id: Option<&str>,
    network_id: Option<&str>,
) -> Result<(CryptoHash, SignedTransaction), TransactionError> {
    let bytes = tx.to_bytes()?;
    let hash = CryptoHash::hash_bytes(&bytes);
    let account_id = account_id.unwrap_or(tx.signer_id.as_str());

    let signed_by = signer.sign_message(&bytes, Some(account_id), network_id).await?;
    debug!(
        signer_id = %tx.signer_id,
        receiver_id = %tx.receiver_id,
        nonce = tx.nonce,
        actions = tx.actions.len(),
        %hash,
        "signed transaction"
    );

    let signature = Signature {
        key_type: tx.public_key.key_type,
        data: signed_by.data,
    };
    Ok((
        hash,
        SignedTransaction {
            transaction: tx,
            signature,
        },
    ))
}

/// Builds a transaction from parts and signs it.
///
/// The public key is fetched from `signer` first, using the same account and
/// network that are then used for signing. `account_id` becomes the
/// transaction's `signer_id`.
pub async fn sign_transaction_parts<S: Signer + ?Sized>(
    receiver_id: impl Into<String>,
    nonce: u64,
    actions: Vec<Action>,
    block_hash: CryptoHash,
    signer: &S,
    account_id: &str,
    network_id: Option<&str>,
) -> Result<(CryptoHash, SignedTransaction), TransactionError> {
    let public_key = signer.get_public_key(Some(account_id), network_id).await?;
    let tx = Transaction {
        signer_id: account_id.to_string(),
        public_key,
        nonce,
        receiver_id: receiver_id.into(),
        block_hash,
        actions,
    };
    sign_transaction(tx, signer, Some(account_id), network_id).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{verify_hash_of, KeyPair, PublicKey};
    use crate::transaction::signer::{InMemorySigner, SignerError};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Returns fixed bytes and records what it was asked to sign.
    #[derive(Debug, Default)]
    struct StubSigner {
        seen: Mutex<Vec<(Vec<u8>, Option<String>, Option<String>)>>,
    }

    const STUB_SIG: [u8; 64] = [0xAB; 64];

    #[async_trait]
    impl Signer for StubSigner {
        async fn get_public_key(
            &self,
            _account_id: Option<&str>,
            _network_id: Option<&str>,
        ) -> Result<PublicKey, SignerError> {
            Ok(PublicKey::ed25519([0x11; 32]))
        }

        async fn sign_message(
            &self,
            message: &[u8],
            account_id: Option<&str>,
            network_id: Option<&str>,
        ) -> Result<Signature, SignerError> {
            self.seen.lock().push((
                message.to_vec(),
                account_id.map(str::to_string),
                network_id.map(str::to_string),
            ));
            Ok(Signature::ed25519(STUB_SIG))
        }
    }

    #[derive(Debug)]
    struct DecliningSigner;

    #[async_trait]
    impl Signer for DecliningSigner {
        async fn get_public_key(
            &self,
            _account_id: Option<&str>,
            _network_id: Option<&str>,
        ) -> Result<PublicKey, SignerError> {
            Err(SignerError::Unavailable("locked".into()))
        }

        async fn sign_message(
            &self,
            _message: &[u8],
            _account_id: Option<&str>,
            _network_id: Option<&str>,
        ) -> Result<Signature, SignerError> {
            Err(SignerError::Rejected("user declined".into()))
        }
    }

    fn sample(nonce: u64) -> Transaction {
        Transaction {
            signer_id: "alice.test".into(),
            public_key: PublicKey::ed25519([0x11; 32]),
            nonce,
            receiver_id: "bob.test".into(),
            block_hash: CryptoHash([7u8; 32]),
            actions: vec![Action::transfer(1000)],
        }
    }

    #[tokio::test]
    async fn stub_signature_is_assembled_verbatim() {
        let signer = StubSigner::default();
        let tx = sample(1);
        let canonical = tx.to_bytes().unwrap();

        let (hash, signed) = sign_transaction(tx.clone(), &signer, None, Some("testnet"))
            .await
            .unwrap();

        assert_eq!(signed.signature.data, STUB_SIG);
        assert_eq!(signed.signature.key_type, tx.public_key.key_type);
        assert_eq!(hash, CryptoHash::hash_bytes(&canonical));
        assert_eq!(signed.transaction, tx);

        let seen = signer.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, canonical);
        assert_eq!(seen[0].1.as_deref(), Some("alice.test"));
        assert_eq!(seen[0].2.as_deref(), Some("testnet"));
    }

    #[tokio::test]
    async fn explicit_account_overrides_signer_id() {
        let signer = StubSigner::default();
        sign_transaction(sample(1), &signer, Some("relayer.test"), None)
            .await
            .unwrap();
        let seen = signer.seen.lock();
        assert_eq!(seen[0].1.as_deref(), Some("relayer.test"));
        assert_eq!(seen[0].2, None);
    }

    #[tokio::test]
    async fn signer_errors_propagate_unchanged() {
        let err = sign_transaction(sample(1), &DecliningSigner, None, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Signer(SignerError::Rejected(ref reason)) if reason == "user declined"
        ));

        let err = sign_transaction_parts(
            "bob.test",
            1,
            vec![],
            CryptoHash::default(),
            &DecliningSigner,
            "alice.test",
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Signer(SignerError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn parts_fetch_key_then_sign() {
        let kp = KeyPair::from_seed(&[9u8; 32]);
        let signer = InMemorySigner::new().with_key("testnet", "alice.test", kp.clone());

        let (hash, signed) = sign_transaction_parts(
            "bob.test",
            3,
            vec![Action::transfer(5)],
            CryptoHash([1u8; 32]),
            &signer,
            "alice.test",
            Some("testnet"),
        )
        .await
        .unwrap();

        assert_eq!(signed.transaction.signer_id, "alice.test");
        assert_eq!(signed.transaction.public_key, kp.public_key());
        assert_eq!(hash, signed.hash().unwrap());
        let canonical = signed.transaction.to_bytes().unwrap();
        assert!(verify_hash_of(&kp.public_key(), &canonical, &signed.signature));
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let signer: Box<dyn Signer> = Box::new(StubSigner::default());
        let (_, signed) = sign_transaction(sample(1), signer.as_ref(), None, None)
            .await
            .unwrap();
        assert_eq!(signed.signature.data, STUB_SIG);
    }

    #[tokio::test]
    async fn concurrent_pipelines_do_not_interfere() {
        let kp = KeyPair::from_seed(&[5u8; 32]);
        let signer = InMemorySigner::new().with_key("testnet", "alice.test", kp.clone());

        let jobs = (1..=16u64).map(|nonce| {
            let tx = Transaction {
                public_key: kp.public_key(),
                ..sample(nonce)
            };
            sign_transaction(tx, &signer, None, None)
        });
        let results = futures::future::join_all(jobs).await;

        for (i, result) in results.into_iter().enumerate() {
            let (hash, signed) = result.unwrap();
            assert_eq!(signed.transaction.nonce, i as u64 + 1);
            assert_eq!(hash, signed.hash().unwrap());
            let canonical = signed.transaction.to_bytes().unwrap();
            assert!(verify_hash_of(&kp.public_key(), &canonical, &signed.signature));
        }
    }
}
