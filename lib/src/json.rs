//! JSON form of header values, as served by the node's RPC.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Num;
use serde::de::{self, DeserializeOwned, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{strip_hex_prefix, CompactInteger};
use crate::error::{Error, ErrorKind, Result};

// -------------------------------------------------------------------------- //
// Text Codec

/// Textual encoding of a scalar used when the surrounding message is JSON.
/// Independent of the binary [`Encode`](crate::codec::Encode) path.
pub trait TextCodec: Sized {
    fn to_text(&self) -> String;
    fn from_text(text: &str) -> Result<Self>;
}

pub(crate) fn serialize_text<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: TextCodec,
    S: Serializer,
{
    serializer.serialize_str(&value.to_text())
}

pub(crate) fn deserialize_text<'de, T, D>(deserializer: D) -> std::result::Result<T, D::Error>
where
    T: TextCodec,
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    T::from_text(&text).map_err(|e| match e.kind() {
        ErrorKind::InvalidNumericText(t) => de::Error::custom(format_args!("{NUMERIC_TEXT_TAG}{t}")),
        _ => de::Error::custom(e),
    })
}

// serde errors only carry a message; numeric text failures are tagged so
// that `from_json` can restore their kind.
const NUMERIC_TEXT_TAG: &str = "invalid numeric text: ";

fn json_error(e: serde_json::Error) -> Error {
    let message = e.to_string();
    let position = format!(" at line {} column {}", e.line(), e.column());
    let bare = message.strip_suffix(&position).unwrap_or(&message);
    match bare.strip_prefix(NUMERIC_TEXT_TAG) {
        Some(text) => Error::new(ErrorKind::InvalidNumericText(text.to_string())),
        None => Error::new(ErrorKind::Json(message)),
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::new(ErrorKind::Json(e.to_string())))
}

pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(json_error)
}

// -------------------------------------------------------------------------- //
// Compact Integers
//
// Written as JSON numbers while they fit in a u64 and as decimal strings
// beyond that. Decimal and `0x` hex strings are both accepted on input.

impl Serialize for CompactInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.to_u64() {
            Some(x) => serializer.serialize_u64(x),
            None => serializer.serialize_str(&self.to_string()),
        }
    }
}

struct CompactIntegerVisitor;

impl<'de> Visitor<'de> for CompactIntegerVisitor {
    type Value = CompactInteger;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer or integer string")
    }

    fn visit_u64<E: de::Error>(self, x: u64) -> std::result::Result<Self::Value, E> {
        Ok(CompactInteger::from(x))
    }

    fn visit_i64<E: de::Error>(self, x: i64) -> std::result::Result<Self::Value, E> {
        u64::try_from(x)
            .map(CompactInteger::from)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(x), &self))
    }

    fn visit_str<E: de::Error>(self, text: &str) -> std::result::Result<Self::Value, E> {
        let invalid = || E::invalid_value(de::Unexpected::Str(text), &self);
        let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(digits) if digits.bytes().all(|b| b.is_ascii_hexdigit()) => (digits, 16),
            None if text.bytes().all(|b| b.is_ascii_digit()) => (text, 10),
            _ => return Err(invalid()),
        };
        if digits.is_empty() {
            return Err(invalid());
        }
        let x = BigUint::from_str_radix(digits, radix).map_err(|_| invalid())?;
        CompactInteger::try_from_biguint(x).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for CompactInteger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CompactIntegerVisitor)
    }
}

// -------------------------------------------------------------------------- //
// Byte Sequences

/// `#[serde(with = "byte_seq")]` for `Vec<u8>` fields: written as an array
/// of integers, read from either an array or a hex string.
pub mod byte_seq {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
        deserializer.deserialize_any(ByteSeqVisitor)
    }

    struct ByteSeqVisitor;

    impl<'de> Visitor<'de> for ByteSeqVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an array of bytes or a hex string")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
            let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(byte) = seq.next_element::<u8>()? {
                bytes.push(byte);
            }
            Ok(bytes)
        }

        fn visit_str<E: de::Error>(self, text: &str) -> std::result::Result<Self::Value, E> {
            hex::decode(strip_hex_prefix(text)).map_err(E::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::primitives::BlockNumber;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Blob {
        #[serde(with = "byte_seq")]
        data: Vec<u8>,
        size: CompactInteger,
    }

    #[test]
    fn compact_integer_json() {
        assert_eq!(to_json(&CompactInteger::from(7u8)).unwrap(), "7");
        assert_eq!(
            to_json(&CompactInteger::from(u128::MAX)).unwrap(),
            format!("\"{}\"", u128::MAX)
        );

        assert_eq!(from_json::<CompactInteger>("7").unwrap(), CompactInteger::from(7u8));
        assert_eq!(from_json::<CompactInteger>("\"0x10\"").unwrap(), CompactInteger::from(16u8));
        assert_eq!(
            from_json::<CompactInteger>(&format!("\"{}\"", u128::MAX)).unwrap(),
            CompactInteger::from(u128::MAX)
        );
        assert!(from_json::<CompactInteger>("-1").is_err());
        assert!(from_json::<CompactInteger>("\"ten\"").is_err());
    }

    #[test]
    fn compact_integer_strings_must_be_plain_digits() {
        for text in ["", "0x", "+5", "-5", "1_000", " 7", "7 ", "0x+f", "0x1_0", "1e3"] {
            let err = from_json::<CompactInteger>(&format!("\"{text}\"")).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::Json(_)), "input {text:?}");
        }
        assert_eq!(from_json::<CompactInteger>("\"0X1f\"").unwrap(), CompactInteger::from(31u8));
        assert_eq!(from_json::<CompactInteger>("\"007\"").unwrap(), CompactInteger::from(7u8));
    }

    #[test]
    fn numeric_text_errors_keep_their_kind() {
        #[derive(Debug, Deserialize)]
        struct Block {
            #[allow(dead_code)]
            number: BlockNumber,
        }

        for text in ["xyz", "", "0x", "100000000"] {
            let err = from_json::<Block>(&format!(r#"{{"number": "{text}"}}"#)).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidNumericText(text.to_string()));
        }

        // other schema errors stay json errors
        let err = from_json::<Block>(r#"{"number": 5}"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Json(_)));
    }

    #[test]
    fn byte_sequences_accept_arrays_and_hex() {
        let blob = Blob {
            data: vec![1, 2, 255],
            size: CompactInteger::from(3u8),
        };
        let value = serde_json::to_value(&blob).unwrap();
        assert_eq!(value, json!({ "data": [1, 2, 255], "size": 3 }));

        let from_hex: Blob = serde_json::from_value(json!({ "data": "0x0102ff", "size": "3" })).unwrap();
        assert_eq!(from_hex, blob);

        let err = from_json::<Blob>(r#"{"data": [256], "size": 1}"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Json(_)));
    }
}
