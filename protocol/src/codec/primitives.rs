//! Codec impls for the building blocks every entity is made of.

use super::{read_len, write_len, BinaryCodec, CodecError, Reader};

macro_rules! impl_le_int {
    ($($ty:ty),*) => {
        $(
            impl BinaryCodec for $ty {
                fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
                    out.extend_from_slice(&self.to_le_bytes());
                    Ok(())
                }

                fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
                    Ok(<$ty>::from_le_bytes(input.take_array()?))
                }
            }
        )*
    };
}

impl_le_int!(u8, u16, u32, u64, u128);

impl<const N: usize> BinaryCodec for [u8; N] {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(self);
        Ok(())
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        input.take_array()
    }
}

impl BinaryCodec for String {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        super::write_bytes(self.as_bytes(), out)
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        let raw = super::read_bytes(input)?;
        String::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8)
    }
}

impl<T: BinaryCodec> BinaryCodec for Vec<T> {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        write_len(self.len(), out)?;
        for item in self {
            item.encode_to(out)?;
        }
        Ok(())
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        let len = read_len(input)?;
        // Every element takes at least one byte, so the remaining input
        // bounds the allocation regardless of what the prefix claims.
        let mut items = Vec::with_capacity(len.min(input.remaining()));
        for _ in 0..len {
            items.push(T::decode_from(input)?);
        }
        Ok(items)
    }
}

impl<T: BinaryCodec> BinaryCodec for Option<T> {
    fn encode_to(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        match self {
            None => out.push(0),
            Some(value) => {
                out.push(1);
                value.encode_to(out)?;
            }
        }
        Ok(())
    }

    fn decode_from(input: &mut Reader<'_>) -> Result<Self, CodecError> {
        match input.take_tag()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode_from(input)?)),
            flag => Err(CodecError::InvalidPresenceFlag(flag)),
        }
    }
}
