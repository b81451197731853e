//! # Binary Codec
//!
//! Deterministic, bit-exact encoding for every wire entity. There is no
//! schema table and no reflection: each type implements [`BinaryCodec`]
//! next to its definition, so the layout lives with the struct it describes.
//!
//! ## Layout rules
//!
//! ```text
//! struct         fields in declared order, no padding
//! u8/u32/u64/u128 little-endian, fixed width
//! [u8; N]        raw bytes, exactly N
//! String, bytes  u32 LE length prefix + raw bytes
//! Vec<T>         u32 LE element count + each element
//! Option<T>      0x00 | 0x01 + value
//! enum           1-byte discriminant (declaration index) + variant body
//! ```
//!
//! This layout is the on-wire contract. Reordering fields or variants is a
//! breaking change for every node and wallet that reads these bytes.

pub mod error;
mod primitives;

pub use error::CodecError;

/// A cursor over input bytes that refuses to read past the end.
///
/// Every read either consumes exactly the requested width or fails with
/// [`CodecError::TruncatedInput`] and leaves the cursor where it was.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Wraps a byte slice, positioned at its first byte.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consumes exactly `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(CodecError::TruncatedInput {
                needed: n,
                remaining,
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Consumes exactly `N` bytes into a fixed array.
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads a single discriminant byte.
    pub fn take_tag(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    /// Fails if any input is left. Called once a top-level entity is decoded.
    pub fn finish(self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            count => Err(CodecError::TrailingBytes { count }),
        }
    }
}

/// Static encode/decode logic for one wire entity.
///
/// Implementors only write `encode_to` and `decode_from`; the provided
/// methods handle the top-level buffer and the trailing-bytes check.
pub trait BinaryCodec: Sized {
    /// Appends the canonical encoding of `self` to `out`.
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Reads one value from the cursor, consuming exactly its encoding.
    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError>;

    /// Returns the canonical encoding as a fresh buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(128);
        self.encode_to(&mut out)?;
        Ok(out)
    }

    /// Decodes a complete value, rejecting any trailing input.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(bytes);
        let value = Self::decode_from(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

/// Writes a `u32` length prefix, failing if `len` does not fit.
pub(crate) fn write_len(len: usize, out: &mut Vec<u8>) -> Result<(), CodecError> {
    let len = u32::try_from(len).map_err(|_| CodecError::ValueOutOfRange {
        what: "length prefix",
        value: len as u128,
    })?;
    out.extend_from_slice(&len.to_le_bytes());
    Ok(())
}

/// Reads a `u32` length prefix.
pub(crate) fn read_len(input: &mut Reader<'_>) -> Result<usize, CodecError> {
    let len = u32::from_le_bytes(input.take_array()?);
    Ok(len as usize)
}

/// Encodes a byte blob with its length prefix.
pub(crate) fn write_bytes(bytes: &[u8], out: &mut Vec<u8>) -> Result<(), CodecError> {
    write_len(bytes.len(), out)?;
    out.extend_from_slice(bytes);
    Ok(())
}

/// Decodes a length-prefixed byte blob.
pub(crate) fn read_bytes(input: &mut Reader<'_>) -> Result<Vec<u8>, CodecError> {
    let len = read_len(input)?;
    Ok(input.take(len)?.to_vec())
}
