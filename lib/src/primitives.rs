use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::compact;
use crate::codec::{CompactInteger, Decode, Encode, Reader};
use crate::error::{Error, ErrorKind, Result};
use crate::json::TextCodec;

// -------------------------------------------------------------------------- //
// Primitives Types

pub const HASH_LEN: usize = 32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct H256(pub [u8; HASH_LEN]);

pub type Hash = H256;

/// Block height. Compact integer on the wire, hex string in JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockNumber(pub u32);

/// Application identifier inside the data lookup index.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub CompactInteger);

/// Four byte tag of the consensus engine that produced a digest item, for
/// example `*b"BABE"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConsensusEngineId(pub [u8; 4]);

impl H256 {
    /// A hash whose leading bytes are `prefix`, zero padded.
    pub fn from_prefix(prefix: &[u8]) -> Self {
        let mut bytes = [0u8; HASH_LEN];
        let len = prefix.len().min(HASH_LEN);
        bytes[..len].copy_from_slice(&prefix[..len]);
        H256(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_LEN]> for H256 {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        H256(bytes)
    }
}

impl From<u32> for BlockNumber {
    fn from(x: u32) -> Self {
        BlockNumber(x)
    }
}

impl From<CompactInteger> for AppId {
    fn from(x: CompactInteger) -> Self {
        AppId(x)
    }
}

impl From<u32> for AppId {
    fn from(x: u32) -> Self {
        AppId(CompactInteger::from(x))
    }
}

// -------------------------------------------------------------------------- //
// Binary Codec

impl Encode for H256 {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.0.encode_to(out)
    }

    fn encoded_len(&self) -> usize {
        HASH_LEN
    }
}

impl Decode for H256 {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(H256(<[u8; HASH_LEN]>::decode(reader)?))
    }
}

impl Encode for BlockNumber {
    fn encode_to(&self, out: &mut Vec<u8>) {
        compact::encode_u64(u64::from(self.0), out)
    }

    fn encoded_len(&self) -> usize {
        compact::len_of_u64(u64::from(self.0))
    }
}

impl Decode for BlockNumber {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let x = CompactInteger::decode(reader)?;
        x.to_u32()
            .map(BlockNumber)
            .ok_or_else(|| Error::new(ErrorKind::MalformedInteger))
    }
}

impl Encode for AppId {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.0.encode_to(out)
    }

    fn encoded_len(&self) -> usize {
        self.0.encoded_len()
    }
}

impl Decode for AppId {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(AppId(CompactInteger::decode(reader)?))
    }
}

impl Encode for ConsensusEngineId {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.0.encode_to(out)
    }

    fn encoded_len(&self) -> usize {
        4
    }
}

impl Decode for ConsensusEngineId {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(ConsensusEngineId(<[u8; 4]>::decode(reader)?))
    }
}

// -------------------------------------------------------------------------- //
// Text Codec

impl TextCodec for BlockNumber {
    /// Lower-case hex digits, most significant first, no prefix.
    fn to_text(&self) -> String {
        format!("{:x}", self.0)
    }

    /// Accepts an optional `0x` prefix. Anything that is not one to eight
    /// significant hex digits is rejected.
    fn from_text(text: &str) -> Result<Self> {
        let digits = crate::codec::strip_hex_prefix(text);
        let invalid = || Error::new(ErrorKind::InvalidNumericText(text.to_string()));
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u32::from_str_radix(digits, 16)
            .map(BlockNumber)
            .map_err(|_| invalid())
    }
}

impl TextCodec for H256 {
    fn to_text(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    fn from_text(text: &str) -> Result<Self> {
        let mut bytes = [0u8; HASH_LEN];
        hex::decode_to_slice(crate::codec::strip_hex_prefix(text), &mut bytes)
            .map_err(|e| Error::new(ErrorKind::InvalidHex(e.to_string())))?;
        Ok(H256(bytes))
    }
}

impl Serialize for BlockNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        crate::json::serialize_text(self, serializer)
    }
}

impl<'de> Deserialize<'de> for BlockNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        crate::json::deserialize_text(deserializer)
    }
}

impl Serialize for H256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        crate::json::serialize_text(self, serializer)
    }
}

impl<'de> Deserialize<'de> for H256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        crate::json::deserialize_text(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_number_text() {
        assert_eq!(BlockNumber(42).to_text(), "2a");
        assert_eq!(BlockNumber(0).to_text(), "0");
        assert_eq!(BlockNumber(u32::MAX).to_text(), "ffffffff");

        assert_eq!(BlockNumber::from_text("2a").unwrap(), BlockNumber(42));
        assert_eq!(BlockNumber::from_text("0x2A").unwrap(), BlockNumber(42));
        assert_eq!(BlockNumber::from_text("0X00ff").unwrap(), BlockNumber(255));
    }

    #[test]
    fn block_number_text_rejects_bad_input() {
        for text in ["", "0x", "xyz", "+2a", "-1", "0x100000000", " 2a", "2a "] {
            let err = BlockNumber::from_text(text).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::InvalidNumericText(t) if t == text),
                "input {text:?}"
            );
        }
    }

    #[test]
    fn block_number_binary_and_text_agree() {
        for x in [0u32, 1, 63, 64, 16_383, 16_384, 1 << 30, u32::MAX] {
            let number = BlockNumber(x);
            let from_binary = BlockNumber::decode_all(&number.encode()).unwrap();
            let from_text = BlockNumber::from_text(&number.to_text()).unwrap();
            assert_eq!(from_binary, from_text);
            assert_eq!(number.encoded_len(), number.encode().len());
        }
    }

    #[test]
    fn block_number_above_u32_is_rejected() {
        let encoded = CompactInteger::from(u64::from(u32::MAX) + 1).encode();
        let err = BlockNumber::decode_all(&encoded).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MalformedInteger);
    }

    #[test]
    fn hash_text() {
        let hash = H256::from_prefix(&[1, 2, 3]);
        let text = hash.to_text();
        assert!(text.starts_with("0x010203000000"));
        assert_eq!(text.len(), 2 + 2 * HASH_LEN);
        assert_eq!(H256::from_text(&text).unwrap(), hash);
        assert_eq!(H256::from_text(&text[2..]).unwrap(), hash);
        assert!(H256::from_text("0x0102").is_err());
    }
}
