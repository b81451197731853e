//! # Protocol Constants
//!
//! Every fixed width and well-known identifier the codec and signing
//! pipelines rely on lives here. These values are part of the wire
//! contract: changing one after release breaks every reader of old bytes.

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Production network.
pub const NETWORK_ID_MAINNET: &str = "mainnet";

/// Public test network.
pub const NETWORK_ID_TESTNET: &str = "testnet";

/// Network assumed when a caller does not name one.
pub const DEFAULT_NETWORK_ID: &str = NETWORK_ID_TESTNET;

// ---------------------------------------------------------------------------
// Fixed Widths
// ---------------------------------------------------------------------------

/// Ed25519 public key payload, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 secret seed, in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Ed25519 signature payload, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA-256 digest / block hash, in bytes.
pub const HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Action Discriminants
// ---------------------------------------------------------------------------

// Tag bytes for `Action`, equal to declaration order. Stable forever.
pub const ACTION_CREATE_ACCOUNT: u8 = 0;
pub const ACTION_DEPLOY_CONTRACT: u8 = 1;
pub const ACTION_FUNCTION_CALL: u8 = 2;
pub const ACTION_TRANSFER: u8 = 3;
pub const ACTION_STAKE: u8 = 4;
pub const ACTION_ADD_KEY: u8 = 5;
pub const ACTION_DELETE_KEY: u8 = 6;
pub const ACTION_DELETE_ACCOUNT: u8 = 7;
pub const ACTION_DELEGATE: u8 = 8;

/// Tag bytes for `AccessKeyPermission`.
pub const PERMISSION_FUNCTION_CALL: u8 = 0;
pub const PERMISSION_FULL_ACCESS: u8 = 1;

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

/// Returns a display name for a network id, mainly for logging. Unknown
/// (custom) networks are passed through unchanged.
pub fn network_name(network_id: Option<&str>) -> &str {
    match network_id {
        None => DEFAULT_NETWORK_ID,
        Some(id) => id,
    }
}
