//! The action catalog.
//!
//! A transaction is an ordered batch of [`Action`]s executed atomically
//! against its receiver. `Action` is a closed sum type: one value holds
//! exactly one variant, and the compiler makes "transfer *and* stake in the
//! same action" unrepresentable.
//!
//! ## Wire tags
//!
//! ```text
//! 0 CreateAccount   3 Transfer   6 DeleteKey
//! 1 DeployContract  4 Stake      7 DeleteAccount
//! 2 FunctionCall    5 AddKey     8 Delegate
//! ```
//!
//! Tags equal declaration order and never change. New actions append.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::args::FunctionCallArgs;
use super::delegate::SignedDelegateAction;
use super::error::TransactionError;
use super::permission::AccessKey;
use crate::codec::{read_bytes, write_bytes, BinaryCodec, CodecError, Reader};
use crate::config::*;
use crate::crypto::PublicKey;
use crate::units::dec_format;

/// One step of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Creates the receiver account. Must be followed by a transfer and a
    /// key in practice, but that is the chain's concern.
    CreateAccount,
    /// Deploys wasm `code` to the receiver.
    DeployContract {
        #[serde(with = "base64_bytes")]
        code: Vec<u8>,
    },
    /// Calls `method_name` on the receiver contract.
    FunctionCall {
        method_name: String,
        #[serde(with = "base64_bytes")]
        args: Vec<u8>,
        gas: u64,
        #[serde(with = "dec_format")]
        deposit: u128,
    },
    /// Sends `deposit` yoctoNEAR to the receiver.
    Transfer {
        #[serde(with = "dec_format")]
        deposit: u128,
    },
    /// Stakes `stake` yoctoNEAR with `public_key` as validator key.
    Stake {
        #[serde(with = "dec_format")]
        stake: u128,
        public_key: PublicKey,
    },
    /// Adds `public_key` to the receiver with the given access.
    AddKey {
        public_key: PublicKey,
        access_key: AccessKey,
    },
    /// Removes `public_key` from the receiver.
    DeleteKey {
        public_key: PublicKey,
    },
    /// Deletes the receiver account, sending its balance to `beneficiary_id`.
    DeleteAccount {
        beneficiary_id: String,
    },
    /// A meta-transaction signed by its sender, submitted by a relayer.
    Delegate(SignedDelegateAction),
}

impl Action {
    /// Creates the receiver account.
    pub fn create_account() -> Self {
        Self::CreateAccount
    }

    /// Deploys wasm bytecode to the receiver.
    pub fn deploy_contract(code: impl Into<Vec<u8>>) -> Self {
        Self::DeployContract { code: code.into() }
    }

    /// Builds a function call. Raw bytes are sent as-is; a JSON value is
    /// serialized to compact UTF-8 first. See [`FunctionCallArgs`].
    pub fn function_call(
        method_name: impl Into<String>,
        args: impl Into<FunctionCallArgs>,
        gas: u64,
        deposit: u128,
    ) -> Self {
        Self::FunctionCall {
            method_name: method_name.into(),
            args: args.into().into_bytes(),
            gas,
            deposit,
        }
    }

    /// Builds a function call with any serializable value as JSON args.
    pub fn function_call_json<T: Serialize + ?Sized>(
        method_name: impl Into<String>,
        args: &T,
        gas: u64,
        deposit: u128,
    ) -> Result<Self, TransactionError> {
        Ok(Self::function_call(
            method_name,
            FunctionCallArgs::json(args)?,
            gas,
            deposit,
        ))
    }

    /// Sends `deposit` yoctoNEAR.
    pub fn transfer(deposit: u128) -> Self {
        Self::Transfer { deposit }
    }

    /// Stakes `stake` yoctoNEAR under validator key `public_key`.
    pub fn stake(stake: u128, public_key: PublicKey) -> Self {
        Self::Stake { stake, public_key }
    }

    /// Grants `public_key` the given access to the receiver.
    pub fn add_key(public_key: PublicKey, access_key: AccessKey) -> Self {
        Self::AddKey {
            public_key,
            access_key,
        }
    }

    /// Revokes `public_key` from the receiver.
    pub fn delete_key(public_key: PublicKey) -> Self {
        Self::DeleteKey { public_key }
    }

    /// Deletes the receiver, sending its balance to `beneficiary_id`.
    pub fn delete_account(beneficiary_id: impl Into<String>) -> Self {
        Self::DeleteAccount {
            beneficiary_id: beneficiary_id.into(),
        }
    }

    /// Wraps a signed delegate action for submission by a relayer.
    pub fn delegate(signed: SignedDelegateAction) -> Self {
        Self::Delegate(signed)
    }

    /// The wire tag for this variant.
    pub fn discriminant(&self) -> u8 {
        match self {
            Self::CreateAccount => ACTION_CREATE_ACCOUNT,
            Self::DeployContract { .. } => ACTION_DEPLOY_CONTRACT,
            Self::FunctionCall { .. } => ACTION_FUNCTION_CALL,
            Self::Transfer { .. } => ACTION_TRANSFER,
            Self::Stake { .. } => ACTION_STAKE,
            Self::AddKey { .. } => ACTION_ADD_KEY,
            Self::DeleteKey { .. } => ACTION_DELETE_KEY,
            Self::DeleteAccount { .. } => ACTION_DELETE_ACCOUNT,
            Self::Delegate(_) => ACTION_DELEGATE,
        }
    }

    /// `true` for [`Action::Delegate`].
    pub fn is_delegate(&self) -> bool {
        matches!(self, Self::Delegate(_))
    }

    /// Parses the `{ "transfer": { "deposit": "1" } }` JSON shape, insisting
    /// on exactly one populated variant.
    pub fn from_json(value: &Value) -> Result<Self, TransactionError> {
        let value = normalize_single_variant("Action", value)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl BinaryCodec for Action {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.push(self.discriminant());
        match self {
            Self::CreateAccount => Ok(()),
            Self::DeployContract { code } => write_bytes(code, out),
            Self::FunctionCall {
                method_name,
                args,
                gas,
                deposit,
            } => {
                method_name.encode_to(out)?;
                write_bytes(args, out)?;
                gas.encode_to(out)?;
                deposit.encode_to(out)
            }
            Self::Transfer { deposit } => deposit.encode_to(out),
            Self::Stake { stake, public_key } => {
                stake.encode_to(out)?;
                public_key.encode_to(out)
            }
            Self::AddKey {
                public_key,
                access_key,
            } => {
                public_key.encode_to(out)?;
                access_key.encode_to(out)
            }
            Self::DeleteKey { public_key } => public_key.encode_to(out),
            Self::DeleteAccount { beneficiary_id } => beneficiary_id.encode_to(out),
            Self::Delegate(signed) => signed.encode_to(out),
        }
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        let tag = input.take_tag()?;
        decode_action_body(tag, input)
    }
}

/// Decodes the body that follows an action tag. Shared with
/// `NonDelegateAction`, which applies its own tag check first.
pub(super) fn decode_action_body(tag: u8, input: &mut Reader<'_>) -> Result<Action, CodecError> {
    Ok(match tag {
        ACTION_CREATE_ACCOUNT => Action::CreateAccount,
        ACTION_DEPLOY_CONTRACT => Action::DeployContract {
            code: read_bytes(input)?,
        },
        ACTION_FUNCTION_CALL => Action::FunctionCall {
            method_name: String::decode_from(input)?,
            args: read_bytes(input)?,
            gas: u64::decode_from(input)?,
            deposit: u128::decode_from(input)?,
        },
        ACTION_TRANSFER => Action::Transfer {
            deposit: u128::decode_from(input)?,
        },
        ACTION_STAKE => Action::Stake {
            stake: u128::decode_from(input)?,
            public_key: PublicKey::decode_from(input)?,
        },
        ACTION_ADD_KEY => Action::AddKey {
            public_key: PublicKey::decode_from(input)?,
            access_key: AccessKey::decode_from(input)?,
        },
        ACTION_DELETE_KEY => Action::DeleteKey {
            public_key: PublicKey::decode_from(input)?,
        },
        ACTION_DELETE_ACCOUNT => Action::DeleteAccount {
            beneficiary_id: String::decode_from(input)?,
        },
        ACTION_DELEGATE => Action::Delegate(SignedDelegateAction::decode_from(input)?),
        tag => {
            return Err(CodecError::UnknownDiscriminant {
                type_name: "Action",
                tag,
            })
        }
    })
}

/// Checks the externally-tagged JSON shape has exactly one variant key.
///
/// Unit variants are accepted as a bare string (`"createAccount"`) or as a
/// key with an empty body (`{ "createAccount": {} }`); the latter is rewritten
/// to the former so serde sees the form it expects.
pub(super) fn normalize_single_variant(
    type_name: &'static str,
    value: &Value,
) -> Result<Value, TransactionError> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Object(map) if map.len() == 1 => match map.iter().next() {
            Some((name, Value::Null)) => Ok(Value::String(name.clone())),
            Some((name, Value::Object(body))) if body.is_empty() => Ok(Value::String(name.clone())),
            _ => Ok(value.clone()),
        },
        Value::Object(map) => Err(TransactionError::InvalidVariant {
            type_name,
            found: map.len(),
        }),
        _ => Err(TransactionError::InvalidVariant {
            type_name,
            found: 0,
        }),
    }
}

/// Base64 rendering for opaque byte fields in JSON, as RPC nodes show them.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::permission::AccessKeyPermission;
    use serde_json::json;

    fn pk(byte: u8) -> PublicKey {
        PublicKey::ed25519([byte; 32])
    }

    fn one_of_each() -> Vec<Action> {
        vec![
            Action::create_account(),
            Action::deploy_contract(vec![0x00, 0x61, 0x73, 0x6d]),
            Action::function_call("ft_transfer", json!({ "amount": "1" }), 30_000_000_000_000, 1),
            Action::transfer(1000),
            Action::stake(u128::MAX, pk(1)),
            Action::add_key(pk(2), AccessKey::full_access()),
            Action::delete_key(pk(3)),
            Action::delete_account("beneficiary.test"),
        ]
    }

    #[test]
    fn transfer_roundtrip() {
        let action = Action::transfer(1000);
        let decoded = Action::from_bytes(&action.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, action);
        assert!(matches!(decoded, Action::Transfer { deposit: 1000 }));
    }

    #[test]
    fn first_byte_is_declaration_index() {
        for (index, action) in one_of_each().iter().enumerate() {
            let bytes = action.to_bytes().unwrap();
            assert_eq!(bytes[0] as usize, index, "{:?}", action);
            assert_eq!(action.discriminant() as usize, index);
        }
    }

    #[test]
    fn every_variant_roundtrips() {
        for action in one_of_each() {
            let bytes = action.to_bytes().unwrap();
            assert_eq!(Action::from_bytes(&bytes).unwrap(), action);
        }
    }

    #[test]
    fn create_account_is_one_byte() {
        assert_eq!(Action::create_account().to_bytes().unwrap(), vec![0]);
    }

    #[test]
    fn transfer_layout() {
        let bytes = Action::transfer(1000).to_bytes().unwrap();
        assert_eq!(bytes.len(), 17);
        assert_eq!(&bytes[1..3], &[0xE8, 0x03]);
    }

    #[test]
    fn function_call_layout() {
        let action = Action::function_call("go", vec![9u8, 9], 5, 7);
        let bytes = action.to_bytes().unwrap();
        let mut expected = vec![ACTION_FUNCTION_CALL];
        expected.extend_from_slice(&[2, 0, 0, 0, b'g', b'o']);
        expected.extend_from_slice(&[2, 0, 0, 0, 9, 9]);
        expected.extend_from_slice(&5u64.to_le_bytes());
        expected.extend_from_slice(&7u128.to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn json_args_are_serialized() {
        let Action::FunctionCall { args, .. } =
            Action::function_call("m", json!({ "x": 1 }), 1, 0)
        else {
            panic!("expected a function call");
        };
        assert_eq!(args, br#"{"x":1}"#.to_vec());
    }

    #[test]
    fn function_call_json_helper() {
        let action = Action::function_call_json("m", &vec![1, 2], 1, 0).unwrap();
        let Action::FunctionCall { args, .. } = action else {
            panic!("expected a function call");
        };
        assert_eq!(args, b"[1,2]".to_vec());
    }

    #[test]
    fn unknown_action_tag() {
        assert_eq!(
            Action::from_bytes(&[9]),
            Err(CodecError::UnknownDiscriminant {
                type_name: "Action",
                tag: 9
            })
        );
    }

    #[test]
    fn truncated_stake_key() {
        let mut bytes = Action::stake(1, pk(4)).to_bytes().unwrap();
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            Action::from_bytes(&bytes),
            Err(CodecError::TruncatedInput { needed: 32, remaining: 31 })
        ));
    }

    #[test]
    fn trailing_bytes_after_action() {
        let mut bytes = Action::transfer(5).to_bytes().unwrap();
        bytes.push(0);
        assert_eq!(
            Action::from_bytes(&bytes),
            Err(CodecError::TrailingBytes { count: 1 })
        );
    }

    #[test]
    fn from_json_accepts_single_variant() {
        let transfer = Action::from_json(&json!({ "transfer": { "deposit": "1000" } })).unwrap();
        assert_eq!(transfer, Action::transfer(1000));

        let create = Action::from_json(&json!({ "createAccount": {} })).unwrap();
        assert_eq!(create, Action::CreateAccount);

        let add = Action::from_json(&json!({
            "addKey": {
                "publicKey": pk(2).to_string(),
                "accessKey": { "nonce": 0, "permission": "fullAccess" }
            }
        }))
        .unwrap();
        assert_eq!(
            add,
            Action::add_key(pk(2), AccessKey { nonce: 0, permission: AccessKeyPermission::FullAccess })
        );
    }

    #[test]
    fn from_json_rejects_zero_or_many_variants() {
        let many = json!({
            "transfer": { "deposit": "1" },
            "stake": { "stake": "1", "publicKey": pk(1).to_string() }
        });
        assert!(matches!(
            Action::from_json(&many),
            Err(TransactionError::InvalidVariant { type_name: "Action", found: 2 })
        ));
        assert!(matches!(
            Action::from_json(&json!({})),
            Err(TransactionError::InvalidVariant { found: 0, .. })
        ));
        assert!(matches!(
            Action::from_json(&json!(42)),
            Err(TransactionError::InvalidVariant { found: 0, .. })
        ));
    }

    #[test]
    fn from_json_unknown_variant_is_a_json_error() {
        assert!(matches!(
            Action::from_json(&json!({ "mint": {} })),
            Err(TransactionError::Json(_))
        ));
    }

    #[test]
    fn json_roundtrip_every_variant() {
        for action in one_of_each() {
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(Action::from_json(&json).unwrap(), action);
        }
    }
}
