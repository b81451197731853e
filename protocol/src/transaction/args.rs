//! Function-call arguments.
//!
//! Contracts built with the standard SDKs expect UTF-8 JSON. Some contracts
//! (hand-written wasm, binary protocols) read their input as raw bytes. The
//! caller picks which by choosing the variant; nothing is guessed.

use serde::Serialize;

/// Arguments for [`Action::function_call`](super::Action::function_call).
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionCallArgs {
    /// Passed to the contract untouched.
    Bytes(Vec<u8>),
    /// Serialized as compact UTF-8 JSON.
    Json(serde_json::Value),
}

impl FunctionCallArgs {
    /// Converts any serializable value into JSON args.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// The bytes that go on the wire.
    ///
    /// JSON objects come out with their keys in `serde_json::Map` order
    /// (sorted), so equal values always produce identical bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Json(value) => value.to_string().into_bytes(),
        }
    }
}

impl Default for FunctionCallArgs {
    fn default() -> Self {
        Self::Bytes(Vec::new())
    }
}

impl From<Vec<u8>> for FunctionCallArgs {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for FunctionCallArgs {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<serde_json::Value> for FunctionCallArgs {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}
