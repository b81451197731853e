//! Delegate actions (meta-transactions).
//!
//! A sender signs a [`DelegateAction`] describing what they want done; a
//! relayer wraps the resulting [`SignedDelegateAction`] in an
//! [`Action::Delegate`] inside its own transaction and pays the gas. The
//! chain executes the inner actions as the sender.
//!
//! Delegates do not nest. [`NonDelegateAction`] is an `Action` that is
//! proven not to be `Delegate`, so a `DelegateAction` holding another
//! delegate cannot be constructed, encoded, or decoded.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::action::{decode_action_body, Action};
use super::error::TransactionError;
use crate::codec::{BinaryCodec, CodecError, Reader};
use crate::config::ACTION_DELEGATE;
use crate::crypto::{sign_hash_of, CryptoHash, LocalSigner, PublicKey, Signature};

// ---------------------------------------------------------------------------
// NonDelegateAction
// ---------------------------------------------------------------------------

/// An [`Action`] that is anything but `Delegate`.
///
/// Encodes exactly like the wrapped `Action` (same tags, same bodies). On
/// decode, tag 8 is treated as unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Action", into = "Action")]
pub struct NonDelegateAction(Action);

impl NonDelegateAction {
    /// The wrapped action.
    pub fn action(&self) -> &Action {
        &self.0
    }

    /// Unwraps into a plain [`Action`].
    pub fn into_inner(self) -> Action {
        self.0
    }
}

impl TryFrom<Action> for NonDelegateAction {
    type Error = TransactionError;

    fn try_from(action: Action) -> Result<Self, Self::Error> {
        if action.is_delegate() {
            return Err(TransactionError::NestedDelegateAction { index: 0 });
        }
        Ok(Self(action))
    }
}

impl From<NonDelegateAction> for Action {
    fn from(action: NonDelegateAction) -> Self {
        action.0
    }
}

impl BinaryCodec for NonDelegateAction {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.0.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        match input.take_tag()? {
            ACTION_DELEGATE => Err(CodecError::UnknownDiscriminant {
                type_name: "NonDelegateAction",
                tag: ACTION_DELEGATE,
            }),
            tag => Ok(Self(decode_action_body(tag, input)?)),
        }
    }
}

// ---------------------------------------------------------------------------
// DelegateAction
// ---------------------------------------------------------------------------

/// What the sender authorizes a relayer to submit on their behalf.
///
/// Wire order: `sender_id`, `receiver_id`, `actions`, `nonce`,
/// `block_hash`, `public_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateAction {
    pub sender_id: String,
    pub receiver_id: String,
    pub actions: Vec<NonDelegateAction>,
    /// Nonce of the sender's access key, not the relayer's.
    pub nonce: u64,
    pub block_hash: CryptoHash,
    /// The sender's key; verifies the delegate signature.
    pub public_key: PublicKey,
}

impl DelegateAction {
    /// Assembles a delegate action, rejecting any `Delegate` among `actions`.
    pub fn new(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        actions: Vec<Action>,
        nonce: u64,
        block_hash: CryptoHash,
        public_key: PublicKey,
    ) -> Result<Self, TransactionError> {
        let sender_id = sender_id.into();
        let actions = actions
            .into_iter()
            .enumerate()
            .map(|(index, action)| {
                NonDelegateAction::try_from(action).map_err(|_| {
                    warn!(sender = %sender_id, index, "refusing to nest a delegate action");
                    TransactionError::NestedDelegateAction { index }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            sender_id,
            receiver_id: receiver_id.into(),
            actions,
            nonce,
            block_hash,
            public_key,
        })
    }

    /// SHA-256 of the canonical encoding. This is what the sender signs.
    pub fn hash(&self) -> Result<CryptoHash, CodecError> {
        Ok(CryptoHash::hash_bytes(&self.to_bytes()?))
    }
}

impl BinaryCodec for DelegateAction {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.sender_id.encode_to(out)?;
        self.receiver_id.encode_to(out)?;
        self.actions.encode_to(out)?;
        self.nonce.encode_to(out)?;
        self.block_hash.encode_to(out)?;
        self.public_key.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            sender_id: String::decode_from(input)?,
            receiver_id: String::decode_from(input)?,
            actions: Vec::decode_from(input)?,
            nonce: u64::decode_from(input)?,
            block_hash: CryptoHash::decode_from(input)?,
            public_key: PublicKey::decode_from(input)?,
        })
    }
}

/// A delegate action plus the sender's signature over its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedDelegateAction {
    pub delegate_action: DelegateAction,
    pub signature: Signature,
}

impl BinaryCodec for SignedDelegateAction {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.delegate_action.encode_to(out)?;
        self.signature.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            delegate_action: DelegateAction::decode_from(input)?,
            signature: Signature::decode_from(input)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Builder functions
// ---------------------------------------------------------------------------

/// Builds a [`DelegateAction`] whose `public_key` is the local signer's key.
pub fn build_delegate_action<S: LocalSigner + ?Sized>(
    sender_id: impl Into<String>,
    receiver_id: impl Into<String>,
    actions: Vec<Action>,
    nonce: u64,
    block_hash: CryptoHash,
    local_key: &S,
) -> Result<DelegateAction, TransactionError> {
    DelegateAction::new(
        sender_id,
        receiver_id,
        actions,
        nonce,
        block_hash,
        local_key.public_key(),
    )
}

/// Encodes, hashes, and signs a delegate action with a locally held key.
///
/// The signature covers `sha256(encode(delegate_action))`. Returns that hash
/// together with the signed result.
///
/// # Errors
///
/// [`TransactionError::KeyMismatch`] if `delegate_action.public_key` is not
/// the key of `local_key`.
pub fn sign_delegate_action<S: LocalSigner + ?Sized>(
    delegate_action: DelegateAction,
    local_key: &S,
) -> Result<(CryptoHash, SignedDelegateAction), TransactionError> {
    let signing_key = local_key.public_key();
    if delegate_action.public_key != signing_key {
        warn!(
            sender = %delegate_action.sender_id,
            expected = %delegate_action.public_key,
            found = %signing_key,
            "delegate action names a different key than the signer"
        );
        return Err(TransactionError::KeyMismatch {
            expected: delegate_action.public_key,
            found: signing_key,
        });
    }
    let bytes = delegate_action.to_bytes()?;
    let (hash, signature) = sign_hash_of(local_key, &bytes);
    debug!(
        sender = %delegate_action.sender_id,
        receiver = %delegate_action.receiver_id,
        actions = delegate_action.actions.len(),
        %hash,
        "signed delegate action"
    );
    Ok((
        hash,
        SignedDelegateAction {
            delegate_action,
            signature,
        },
    ))
}

/// Builds and signs a delegate action, returning it ready to embed as an
/// [`Action::Delegate`] in a relayer's transaction.
pub fn create_signed_delegate<S: LocalSigner + ?Sized>(
    sender_id: impl Into<String>,
    receiver_id: impl Into<String>,
    actions: Vec<Action>,
    nonce: u64,
    block_hash: CryptoHash,
    local_key: &S,
) -> Result<(CryptoHash, Action), TransactionError> {
    let delegate_action =
        build_delegate_action(sender_id, receiver_id, actions, nonce, block_hash, local_key)?;
    let (hash, signed) = sign_delegate_action(delegate_action, local_key)?;
    Ok((hash, Action::Delegate(signed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{verify_hash_of, KeyPair};

    /// Always returns the same signature; lets tests compare exact bytes.
    struct FixedKey;

    impl LocalSigner for FixedKey {
        fn public_key(&self) -> PublicKey {
            PublicKey::ed25519([7u8; 32])
        }

        fn sign(&self, _message: &[u8]) -> Signature {
            Signature::ed25519([1u8; 64])
        }
    }

    fn sample() -> DelegateAction {
        build_delegate_action(
            "alice.test",
            "bob.test",
            vec![Action::transfer(1), Action::create_account()],
            5,
            CryptoHash([9u8; 32]),
            &FixedKey,
        )
        .unwrap()
    }

    #[test]
    fn public_key_comes_from_local_signer() {
        assert_eq!(sample().public_key, PublicKey::ed25519([7u8; 32]));
    }

    #[test]
    fn wire_order() {
        let bytes = sample().to_bytes().unwrap();
        let mut expected = Vec::new();
        expected.extend_from_slice(&10u32.to_le_bytes());
        expected.extend_from_slice(b"alice.test");
        expected.extend_from_slice(&8u32.to_le_bytes());
        expected.extend_from_slice(b"bob.test");
        expected.extend_from_slice(&2u32.to_le_bytes());
        expected.push(3);
        expected.extend_from_slice(&1u128.to_le_bytes());
        expected.push(0);
        expected.extend_from_slice(&5u64.to_le_bytes());
        expected.extend_from_slice(&[9u8; 32]);
        expected.push(0);
        expected.extend_from_slice(&[7u8; 32]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn roundtrip() {
        let action = sample();
        assert_eq!(DelegateAction::from_bytes(&action.to_bytes().unwrap()).unwrap(), action);
    }

    #[test]
    fn nested_delegate_is_rejected_at_construction() {
        let (_, inner) = create_signed_delegate(
            "carol.test",
            "dave.test",
            vec![Action::transfer(1)],
            1,
            CryptoHash::default(),
            &FixedKey,
        )
        .unwrap();

        let err = build_delegate_action(
            "alice.test",
            "bob.test",
            vec![Action::transfer(1), inner],
            2,
            CryptoHash::default(),
            &FixedKey,
        )
        .unwrap_err();
        assert!(matches!(err, TransactionError::NestedDelegateAction { index: 1 }));
    }

    #[test]
    fn nested_delegate_is_rejected_on_decode() {
        let mut bytes = sample().to_bytes().unwrap();
        // First action tag sits after both strings and the count.
        let first_tag = 4 + 10 + 4 + 8 + 4;
        bytes[first_tag] = ACTION_DELEGATE;
        assert_eq!(
            DelegateAction::from_bytes(&bytes),
            Err(CodecError::UnknownDiscriminant {
                type_name: "NonDelegateAction",
                tag: ACTION_DELEGATE
            })
        );
    }

    #[test]
    fn signed_delegate_embeds_as_action() {
        let (hash, action) = create_signed_delegate(
            "alice.test",
            "bob.test",
            vec![Action::transfer(1), Action::create_account()],
            5,
            CryptoHash([9u8; 32]),
            &FixedKey,
        )
        .unwrap();

        let Action::Delegate(signed) = &action else {
            panic!("expected a delegate action");
        };
        assert_eq!(signed.delegate_action, sample());
        assert_eq!(signed.signature, Signature::ed25519([1u8; 64]));
        assert_eq!(hash, sample().hash().unwrap());

        let bytes = action.to_bytes().unwrap();
        assert_eq!(bytes[0], ACTION_DELEGATE);
        assert_eq!(Action::from_bytes(&bytes).unwrap(), action);
    }

    #[test]
    fn real_key_signature_verifies_over_hash() {
        let kp = KeyPair::from_seed(&[4u8; 32]);
        let action = build_delegate_action(
            "alice.test",
            "bob.test",
            vec![Action::transfer(10)],
            1,
            CryptoHash::default(),
            &kp,
        )
        .unwrap();
        let (hash, signed) = sign_delegate_action(action, &kp).unwrap();

        let canonical = signed.delegate_action.to_bytes().unwrap();
        assert_eq!(hash, CryptoHash::hash_bytes(&canonical));
        assert!(verify_hash_of(&kp.public_key(), &canonical, &signed.signature));
    }

    #[test]
    fn signing_with_a_foreign_key_is_rejected() {
        let owner = KeyPair::from_seed(&[4u8; 32]);
        let stranger = KeyPair::from_seed(&[5u8; 32]);
        let action = DelegateAction::new(
            "alice.test",
            "bob.test",
            vec![Action::transfer(10)],
            1,
            CryptoHash::default(),
            owner.public_key(),
        )
        .unwrap();

        let err = sign_delegate_action(action, &stranger).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::KeyMismatch { expected, found }
                if expected == owner.public_key() && found == stranger.public_key()
        ));
    }

    #[test]
    fn json_rejects_nested_delegate() {
        let (_, inner) = create_signed_delegate(
            "carol.test",
            "dave.test",
            vec![],
            1,
            CryptoHash::default(),
            &FixedKey,
        )
        .unwrap();
        let mut json = serde_json::to_value(sample()).unwrap();
        json["actions"][0] = serde_json::to_value(&inner).unwrap();
        assert!(serde_json::from_value::<DelegateAction>(json).is_err());
    }

    #[test]
    fn json_roundtrip() {
        let action = sample();
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["senderId"], "alice.test");
        assert_eq!(json["actions"][1], "createAccount");
        assert_eq!(serde_json::from_value::<DelegateAction>(json).unwrap(), action);
    }
}
