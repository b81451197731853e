//! Error types for the binary codec.
//!
//! Decode failures are always local and synchronous: they describe exactly
//! which layout rule the input broke, never what the caller meant to send.

use thiserror::Error;

/// Errors produced while encoding or decoding wire bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Fewer bytes remain than the next field's declared width.
    #[error("truncated input: needed {needed} bytes, only {remaining} remaining")]
    TruncatedInput {
        /// Bytes the field requires.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },

    /// A complete top-level entity was decoded but input remains.
    #[error("{count} trailing bytes after a complete entity")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },

    /// A union tag byte falls outside the declared variant range.
    #[error("unknown discriminant {tag} for {type_name}")]
    UnknownDiscriminant {
        /// The union being decoded.
        type_name: &'static str,
        /// The offending tag byte.
        tag: u8,
    },

    /// A value does not fit in its declared fixed-width slot.
    #[error("{what} value {value} exceeds its declared width")]
    ValueOutOfRange {
        /// Which slot overflowed (e.g. "length prefix").
        what: &'static str,
        /// The value that did not fit.
        value: u128,
    },

    /// A string field does not hold valid UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    /// An optional field's presence flag is neither 0 nor 1.
    #[error("invalid presence flag {0}, expected 0 or 1")]
    InvalidPresenceFlag(u8),
}
