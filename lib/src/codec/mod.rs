//! Binary codec machinery shared by every header component.
//!
//! Values are written with [`Encode`] into a growable buffer and read back
//! with [`Decode`] from a [`Reader`] that tracks the cursor position and the
//! configured sequence limit.

use crate::config::CodecConfig;
use crate::error::{Error, ErrorKind, Result, ResultExt};

pub mod compact;
pub mod variant;

pub use compact::CompactInteger;
pub use variant::{TaggedUnion, VariantRegistry};

// -------------------------------------------------------------------------- //
// Traits

pub trait Encode {
    fn encode_to(&self, out: &mut Vec<u8>);

    /// Number of bytes `encode_to` appends, computed without encoding.
    fn encoded_len(&self) -> usize;

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_to(&mut out);
        out
    }
}

pub trait Decode: Sized {
    fn decode(reader: &mut Reader<'_>) -> Result<Self>;

    /// Decode a value that must span the whole buffer.
    fn decode_all(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let value = Self::decode(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}

/// Decode a value from the front of `bytes`, returning it together with the
/// number of bytes consumed. Trailing bytes are left to the caller.
pub fn decode_from<T: Decode>(bytes: &[u8]) -> Result<(T, usize)> {
    let mut reader = Reader::new(bytes);
    let value = T::decode(&mut reader)?;
    Ok((value, reader.position()))
}

/// `0x`-prefixed lower-case hex of the binary encoding.
pub fn encode_to_hex<T: Encode>(value: &T) -> String {
    format!("0x{}", hex::encode(value.encode()))
}

/// Inverse of [`encode_to_hex`]. The prefix is optional and the decoded
/// bytes must be consumed entirely.
pub fn decode_from_hex<T: Decode>(text: &str) -> Result<T> {
    let digits = strip_hex_prefix(text);
    let bytes = hex::decode(digits).map_err(|e| Error::new(ErrorKind::InvalidHex(e.to_string())))?;
    T::decode_all(&bytes)
}

pub(crate) fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

// -------------------------------------------------------------------------- //
// Reader

pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
    max_sequence_len: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader::with_config(data, &CodecConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: &CodecConfig) -> Self {
        Reader {
            data,
            position: 0,
            max_sequence_len: config.max_sequence_len,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn max_sequence_len(&self) -> usize {
        self.max_sequence_len
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.position).ok_or_else(|| {
            Error::new(ErrorKind::Truncated {
                needed: 1,
                remaining: 0,
            })
        })?;
        self.position += 1;
        Ok(byte)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if length > remaining {
            return Err(Error::new(ErrorKind::Truncated {
                needed: length,
                remaining,
            }));
        }
        let bytes = &self.data[self.position..self.position + length];
        self.position += length;
        Ok(bytes)
    }

    /// Validate an element count read from a length prefix before anything
    /// is allocated for it. Every element occupies at least one byte.
    pub fn check_sequence_len(&self, len: usize) -> Result<()> {
        if len > self.max_sequence_len {
            return Err(Error::new(ErrorKind::LengthLimit {
                len,
                max: self.max_sequence_len,
            }));
        }
        let remaining = self.remaining();
        if len > remaining {
            return Err(Error::new(ErrorKind::Truncated {
                needed: len,
                remaining,
            }));
        }
        Ok(())
    }

    /// Fail if any input is left.
    pub fn finish(&self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(Error::new(ErrorKind::TrailingBytes(n))),
        }
    }
}

// -------------------------------------------------------------------------- //
// Primitive Codecs

impl Encode for u8 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }

    fn encoded_len(&self) -> usize {
        1
    }
}

impl Decode for u8 {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_byte()
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }

    fn encoded_len(&self) -> usize {
        N
    }
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let mut array = [0u8; N];
        array.copy_from_slice(reader.read_bytes(N)?);
        Ok(array)
    }
}

/// Sequences are prefixed with their element count as a compact integer.
impl<T: Encode> Encode for Vec<T> {
    fn encode_to(&self, out: &mut Vec<u8>) {
        compact::encode_len(self.len(), out);
        for item in self {
            item.encode_to(out);
        }
    }

    fn encoded_len(&self) -> usize {
        compact::len_of_len(self.len()) + self.iter().map(Encode::encoded_len).sum::<usize>()
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let len = compact::decode_len(reader)?;
        reader.check_sequence_len(len)?;
        let mut items = Vec::with_capacity(len);
        for i in 0..len {
            items.push(T::decode(reader).at_index(i)?);
        }
        Ok(items)
    }
}
