//! The external signing capability.
//!
//! The signing pipeline never touches key material. It asks a [`Signer`]
//! for a public key and for a signature over the canonical transaction
//! bytes. Wallet extensions, hardware devices and KMS-backed services all
//! fit behind this trait; [`InMemorySigner`] is the in-process reference
//! implementation.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;

use crate::config::network_name;
use crate::crypto::{sign_hash_of, KeyPair, PublicKey, Signature};

/// Failures reported by a [`Signer`]. Passed to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    /// The signer has no key for the requested account/network.
    #[error("signer unavailable: {0}")]
    Unavailable(String),

    /// The signer refused (user declined, policy, device error).
    #[error("signer rejected the request: {0}")]
    Rejected(String),
}

/// Asynchronous signing capability, keyed by account and network.
///
/// `sign_message` receives the canonical bytes of the entity being signed.
/// Implementations sign the SHA-256 of those bytes.
#[async_trait]
pub trait Signer: fmt::Debug + Send + Sync {
    /// The key that will verify signatures for `account_id` on `network_id`.
    async fn get_public_key(
        &self,
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<PublicKey, SignerError>;

    /// Signs `message` on behalf of `account_id` on `network_id`.
    async fn sign_message(
        &self,
        message: &[u8],
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<Signature, SignerError>;
}

/// Key pairs held in memory, looked up by `(network, account)`.
///
/// A missing network falls back to
/// [`DEFAULT_NETWORK_ID`](crate::config::DEFAULT_NETWORK_ID). A missing
/// account is an error: there is no "default account".
#[derive(Default)]
pub struct InMemorySigner {
    keys: RwLock<HashMap<(String, String), KeyPair>>,
}

impl InMemorySigner {
    /// An empty signer with no keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_key(self, network_id: &str, account_id: &str, key_pair: KeyPair) -> Self {
        self.set_key(network_id, account_id, key_pair);
        self
    }

    /// Stores or replaces the key for `account_id` on `network_id`.
    pub fn set_key(&self, network_id: &str, account_id: &str, key_pair: KeyPair) {
        self.keys
            .write()
            .insert((network_id.to_string(), account_id.to_string()), key_pair);
    }

    fn key_for(&self, account_id: Option<&str>, network_id: Option<&str>) -> Result<KeyPair, SignerError> {
        let account_id = account_id
            .ok_or_else(|| SignerError::Unavailable("no account id given".into()))?;
        let network_id = network_name(network_id);
        self.keys
            .read()
            .get(&(network_id.to_string(), account_id.to_string()))
            .cloned()
            .ok_or_else(|| {
                SignerError::Unavailable(format!("no key for {} on {}", account_id, network_id))
            })
    }
}

impl fmt::Debug for InMemorySigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = self.keys.read();
        let mut accounts: Vec<_> = keys.keys().collect();
        accounts.sort();
        f.debug_struct("InMemorySigner")
            .field("accounts", &accounts)
            .finish()
    }
}

#[async_trait]
impl Signer for InMemorySigner {
    async fn get_public_key(
        &self,
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<PublicKey, SignerError> {
        Ok(self.key_for(account_id, network_id)?.public_key())
    }

    async fn sign_message(
        &self,
        message: &[u8],
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<Signature, SignerError> {
        let key_pair = self.key_for(account_id, network_id)?;
        let (_, signature) = sign_hash_of(&key_pair, message);
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NETWORK_ID_MAINNET, NETWORK_ID_TESTNET};
    use crate::crypto::verify_hash_of;

    #[tokio::test]
    async fn missing_network_uses_default() {
        let kp = KeyPair::from_seed(&[1u8; 32]);
        let signer = InMemorySigner::new().with_key(NETWORK_ID_TESTNET, "alice.test", kp.clone());
        assert_eq!(
            signer.get_public_key(Some("alice.test"), None).await.unwrap(),
            kp.public_key()
        );
    }

    #[tokio::test]
    async fn keys_are_scoped_by_network() {
        let signer = InMemorySigner::new().with_key(
            NETWORK_ID_MAINNET,
            "alice.near",
            KeyPair::from_seed(&[2u8; 32]),
        );
        let err = signer
            .get_public_key(Some("alice.near"), Some(NETWORK_ID_TESTNET))
            .await
            .unwrap_err();
        assert!(matches!(err, SignerError::Unavailable(_)));
    }

    #[tokio::test]
    async fn missing_account_is_unavailable() {
        let signer = InMemorySigner::new();
        assert!(matches!(
            signer.sign_message(b"x", None, None).await,
            Err(SignerError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn signs_the_hash_of_the_message() {
        let kp = KeyPair::from_seed(&[3u8; 32]);
        let signer = InMemorySigner::new();
        signer.set_key(NETWORK_ID_TESTNET, "bob.test", kp.clone());

        let sig = signer
            .sign_message(b"canonical bytes", Some("bob.test"), Some(NETWORK_ID_TESTNET))
            .await
            .unwrap();
        assert!(verify_hash_of(&kp.public_key(), b"canonical bytes", &sig));
        assert!(!kp.verify(b"canonical bytes", &sig));
    }

    #[test]
    fn debug_lists_accounts_not_keys() {
        let signer = InMemorySigner::new().with_key(
            NETWORK_ID_TESTNET,
            "alice.test",
            KeyPair::from_seed(&[4u8; 32]),
        );
        let dbg = format!("{:?}", signer);
        assert!(dbg.contains("alice.test"));
        assert!(!dbg.contains("ed25519:"));
    }
}
