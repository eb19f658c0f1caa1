use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use super::{Decode, Encode, Reader};
use crate::error::{Error, ErrorKind, Result};

// -------------------------------------------------------------------------- //
// Width Classes
//
// The two low bits of the first byte select the class:
//
//   0b00  single byte, value in the upper six bits
//   0b01  two bytes little endian, value in the upper fourteen bits
//   0b10  four bytes little endian, value in the upper thirty bits
//   0b11  big integer, upper six bits hold `byte length - 4`, followed by the
//         value in little endian

const MODE_MASK: u8 = 0b11;
const MODE_SINGLE_BYTE: u8 = 0b00;
const MODE_TWO_BYTE: u8 = 0b01;
const MODE_FOUR_BYTE: u8 = 0b10;
const MODE_BIG_INTEGER: u8 = 0b11;

pub const SINGLE_BYTE_MAX: u64 = (1 << 6) - 1;
pub const TWO_BYTE_MAX: u64 = (1 << 14) - 1;
pub const FOUR_BYTE_MAX: u64 = (1 << 30) - 1;

/// Payload bounds of the big-integer class.
pub const MIN_BIG_INTEGER_BYTES: usize = 4;
pub const MAX_BIG_INTEGER_BYTES: usize = MIN_BIG_INTEGER_BYTES + 0b11_1111;

// -------------------------------------------------------------------------- //
// Compact Integer

/// Unsigned integer of unbounded magnitude in canonical compact encoding.
///
/// The largest representable value is `2^536 - 1`, the limit of the
/// big-integer class.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompactInteger(BigUint);

macro_rules! compact_from_native {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CompactInteger {
                fn from(x: $t) -> Self {
                    CompactInteger(BigUint::from(x))
                }
            }
        )*
    };
}

compact_from_native!(u8, u16, u32, u64, u128, usize);

impl TryFrom<BigUint> for CompactInteger {
    type Error = Error;

    fn try_from(x: BigUint) -> Result<Self> {
        CompactInteger::try_from_biguint(x)
    }
}

impl CompactInteger {
    pub fn try_from_biguint(x: BigUint) -> Result<Self> {
        if byte_len(x.bits()) > MAX_BIG_INTEGER_BYTES {
            return Err(Error::new(ErrorKind::MalformedInteger));
        }
        Ok(CompactInteger(x))
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_value(self) -> BigUint {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_u32(&self) -> Option<u32> {
        self.0.to_u32()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    pub fn to_usize(&self) -> Option<usize> {
        self.0.to_usize()
    }
}

impl std::fmt::Display for CompactInteger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

fn byte_len(bits: u64) -> usize {
    Integer::div_ceil(&bits, &8) as usize
}

fn big_integer_prefix(len: usize) -> u8 {
    (((len - MIN_BIG_INTEGER_BYTES) as u8) << 2) | MODE_BIG_INTEGER
}

// -------------------------------------------------------------------------- //
// Encoding

/// Append the canonical compact encoding of a native value.
pub fn encode_u64(x: u64, out: &mut Vec<u8>) {
    if x <= SINGLE_BYTE_MAX {
        out.push(((x as u8) << 2) | MODE_SINGLE_BYTE);
    } else if x <= TWO_BYTE_MAX {
        out.extend_from_slice(&(((x as u16) << 2) | MODE_TWO_BYTE as u16).to_le_bytes());
    } else if x <= FOUR_BYTE_MAX {
        out.extend_from_slice(&(((x as u32) << 2) | MODE_FOUR_BYTE as u32).to_le_bytes());
    } else {
        let len = byte_len(u64::from(u64::BITS - x.leading_zeros()));
        out.push(big_integer_prefix(len));
        out.extend_from_slice(&x.to_le_bytes()[..len]);
    }
}

pub fn len_of_u64(x: u64) -> usize {
    if x <= SINGLE_BYTE_MAX {
        1
    } else if x <= TWO_BYTE_MAX {
        2
    } else if x <= FOUR_BYTE_MAX {
        4
    } else {
        1 + byte_len(u64::from(u64::BITS - x.leading_zeros()))
    }
}

/// Length prefix of a sequence.
pub fn encode_len(len: usize, out: &mut Vec<u8>) {
    encode_u64(len as u64, out)
}

pub fn len_of_len(len: usize) -> usize {
    len_of_u64(len as u64)
}

impl Encode for CompactInteger {
    fn encode_to(&self, out: &mut Vec<u8>) {
        match self.0.to_u64() {
            Some(x) => encode_u64(x, out),
            None => {
                let bytes = self.0.to_bytes_le();
                out.push(big_integer_prefix(bytes.len()));
                out.extend_from_slice(&bytes);
            }
        }
    }

    fn encoded_len(&self) -> usize {
        match self.0.to_u64() {
            Some(x) => len_of_u64(x),
            None => 1 + byte_len(self.0.bits()),
        }
    }
}

// -------------------------------------------------------------------------- //
// Decoding

fn malformed(_: Error) -> Error {
    Error::new(ErrorKind::MalformedInteger)
}

/// Decode one compact integer, rejecting any encoding that is not the
/// shortest one for its value.
pub fn decode(reader: &mut Reader<'_>) -> Result<CompactInteger> {
    let first = reader.read_byte().map_err(malformed)?;
    match first & MODE_MASK {
        MODE_SINGLE_BYTE => Ok(CompactInteger::from(first >> 2)),
        MODE_TWO_BYTE => {
            let rest = reader.read_byte().map_err(malformed)?;
            let x = u16::from_le_bytes([first, rest]) >> 2;
            if u64::from(x) <= SINGLE_BYTE_MAX {
                return Err(Error::new(ErrorKind::MalformedInteger));
            }
            Ok(CompactInteger::from(x))
        }
        MODE_FOUR_BYTE => {
            let rest = reader.read_bytes(3).map_err(malformed)?;
            let x = u32::from_le_bytes([first, rest[0], rest[1], rest[2]]) >> 2;
            if u64::from(x) <= TWO_BYTE_MAX {
                return Err(Error::new(ErrorKind::MalformedInteger));
            }
            Ok(CompactInteger::from(x))
        }
        _ => {
            let len = (first >> 2) as usize + MIN_BIG_INTEGER_BYTES;
            let bytes = reader.read_bytes(len).map_err(malformed)?;
            // A zero most significant byte means the declared length is
            // longer than the value needs.
            if bytes[len - 1] == 0 {
                return Err(Error::new(ErrorKind::MalformedInteger));
            }
            let x = BigUint::from_bytes_le(bytes);
            if len == MIN_BIG_INTEGER_BYTES && x <= BigUint::from(FOUR_BYTE_MAX) {
                return Err(Error::new(ErrorKind::MalformedInteger));
            }
            Ok(CompactInteger(x))
        }
    }
}

/// Decode a sequence length prefix.
pub fn decode_len(reader: &mut Reader<'_>) -> Result<usize> {
    let len = decode(reader)?;
    // Counts beyond `usize` saturate; they are over any configured limit.
    len.to_usize().ok_or_else(|| {
        Error::new(ErrorKind::LengthLimit {
            len: usize::MAX,
            max: reader.max_sequence_len(),
        })
    })
}

impl Decode for CompactInteger {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        decode(reader)
    }
}
