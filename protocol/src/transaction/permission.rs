//! Access keys and what they are allowed to do.
//!
//! A full-access key can sign anything for its account. A function-call key
//! can only call the listed methods (or any method, if the list is empty) on
//! one receiver contract, optionally spending up to `allowance` yoctoNEAR on
//! gas fees.

use serde::{Deserialize, Serialize};

use super::action::normalize_single_variant;
use super::error::TransactionError;
use crate::codec::{BinaryCodec, CodecError, Reader};
use crate::config::{PERMISSION_FULL_ACCESS, PERMISSION_FUNCTION_CALL};
use crate::units::dec_format;

/// Restrictions on a function-call access key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallPermission {
    /// Gas-fee budget in yoctoNEAR. `None` means unlimited.
    #[serde(with = "dec_format", default)]
    pub allowance: Option<u128>,
    /// The only contract this key may call.
    pub receiver_id: String,
    /// Callable methods. Empty means any method on `receiver_id`.
    pub method_names: Vec<String>,
}

impl BinaryCodec for FunctionCallPermission {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.allowance.encode_to(out)?;
        self.receiver_id.encode_to(out)?;
        self.method_names.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            allowance: Option::decode_from(input)?,
            receiver_id: String::decode_from(input)?,
            method_names: Vec::decode_from(input)?,
        })
    }
}

/// What an access key may sign. Tag 0 = function call, 1 = full access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessKeyPermission {
    FunctionCall(FunctionCallPermission),
    FullAccess,
}

impl AccessKeyPermission {
    /// Parses the `{ "functionCall": {...} }` / `{ "fullAccess": {} }` shape,
    /// insisting on exactly one populated variant.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, TransactionError> {
        let value = normalize_single_variant("AccessKeyPermission", value)?;
        Ok(serde_json::from_value(value)?)
    }
}

impl BinaryCodec for AccessKeyPermission {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        match self {
            Self::FunctionCall(permission) => {
                out.push(PERMISSION_FUNCTION_CALL);
                permission.encode_to(out)
            }
            Self::FullAccess => {
                out.push(PERMISSION_FULL_ACCESS);
                Ok(())
            }
        }
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        match input.take_tag()? {
            PERMISSION_FUNCTION_CALL => Ok(Self::FunctionCall(FunctionCallPermission::decode_from(
                input,
            )?)),
            PERMISSION_FULL_ACCESS => Ok(Self::FullAccess),
            tag => Err(CodecError::UnknownDiscriminant {
                type_name: "AccessKeyPermission",
                tag,
            }),
        }
    }
}

/// An access key as stored on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    /// Starting nonce. Not validated here; the chain enforces monotonicity.
    pub nonce: u64,
    pub permission: AccessKeyPermission,
}

impl AccessKey {
    /// A key that can sign any transaction for its account.
    pub fn full_access() -> Self {
        Self {
            nonce: 0,
            permission: AccessKeyPermission::FullAccess,
        }
    }

    /// A key limited to calling `method_names` on `receiver_id`.
    pub fn function_call_access(
        receiver_id: impl Into<String>,
        method_names: Vec<String>,
        allowance: Option<u128>,
    ) -> Self {
        Self {
            nonce: 0,
            permission: AccessKeyPermission::FunctionCall(FunctionCallPermission {
                allowance,
                receiver_id: receiver_id.into(),
                method_names,
            }),
        }
    }
}

impl BinaryCodec for AccessKey {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.nonce.encode_to(out)?;
        self.permission.encode_to(out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            nonce: u64::decode_from(input)?,
            permission: AccessKeyPermission::decode_from(input)?,
        })
    }
}
