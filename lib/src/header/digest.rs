use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::variant::{decode_tagged, encode_tagged, tagged_len};
use crate::codec::{decode_from_hex, encode_to_hex, Decode, Encode, Reader, TaggedUnion, VariantRegistry};
use crate::error::{Result, ResultExt};
use crate::primitives::{ConsensusEngineId, H256};

// -------------------------------------------------------------------------- //
// Digest Items

pub const OTHER: u8 = 0;
pub const CHANGES_TRIE_ROOT: u8 = 2;
pub const CONSENSUS: u8 = 4;
pub const SEAL: u8 = 5;
pub const PRE_RUNTIME: u8 = 6;

/// One log entry of the header digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestItem {
    Other(Vec<u8>),
    ChangesTrieRoot(H256),
    Consensus(ConsensusEngineId, Vec<u8>),
    Seal(ConsensusEngineId, Vec<u8>),
    PreRuntime(ConsensusEngineId, Vec<u8>),
}

fn decode_engine_payload(reader: &mut Reader<'_>) -> Result<(ConsensusEngineId, Vec<u8>)> {
    Ok((
        ConsensusEngineId::decode(reader).at("engine")?,
        Vec::<u8>::decode(reader).at("data")?,
    ))
}

static DIGEST_ITEMS: Lazy<VariantRegistry<DigestItem>> = Lazy::new(|| {
    VariantRegistry::new("DigestItem")
        .register(OTHER, "Other", |r| Ok(DigestItem::Other(Vec::decode(r)?)))
        .register(CHANGES_TRIE_ROOT, "ChangesTrieRoot", |r| {
            Ok(DigestItem::ChangesTrieRoot(H256::decode(r)?))
        })
        .register(CONSENSUS, "Consensus", |r| {
            let (engine, data) = decode_engine_payload(r)?;
            Ok(DigestItem::Consensus(engine, data))
        })
        .register(SEAL, "Seal", |r| {
            let (engine, data) = decode_engine_payload(r)?;
            Ok(DigestItem::Seal(engine, data))
        })
        .register(PRE_RUNTIME, "PreRuntime", |r| {
            let (engine, data) = decode_engine_payload(r)?;
            Ok(DigestItem::PreRuntime(engine, data))
        })
});

impl TaggedUnion for DigestItem {
    fn registry() -> &'static VariantRegistry<Self> {
        &DIGEST_ITEMS
    }

    fn discriminant(&self) -> u8 {
        match self {
            DigestItem::Other(_) => OTHER,
            DigestItem::ChangesTrieRoot(_) => CHANGES_TRIE_ROOT,
            DigestItem::Consensus(..) => CONSENSUS,
            DigestItem::Seal(..) => SEAL,
            DigestItem::PreRuntime(..) => PRE_RUNTIME,
        }
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        match self {
            DigestItem::Other(data) => data.encode_to(out),
            DigestItem::ChangesTrieRoot(root) => root.encode_to(out),
            DigestItem::Consensus(engine, data)
            | DigestItem::Seal(engine, data)
            | DigestItem::PreRuntime(engine, data) => {
                engine.encode_to(out);
                data.encode_to(out);
            }
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            DigestItem::Other(data) => data.encoded_len(),
            DigestItem::ChangesTrieRoot(root) => root.encoded_len(),
            DigestItem::Consensus(engine, data)
            | DigestItem::Seal(engine, data)
            | DigestItem::PreRuntime(engine, data) => engine.encoded_len() + data.encoded_len(),
        }
    }
}

impl Encode for DigestItem {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_tagged(self, out)
    }

    fn encoded_len(&self) -> usize {
        tagged_len(self)
    }
}

impl Decode for DigestItem {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        decode_tagged(reader)
    }
}

/// In JSON every item is the hex string of its binary encoding.
impl Serialize for DigestItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_to_hex(self))
    }
}

impl<'de> Deserialize<'de> for DigestItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        decode_from_hex(&text).map_err(serde::de::Error::custom)
    }
}

// -------------------------------------------------------------------------- //
// Digest

/// Ordered list of digest items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub logs: Vec<DigestItem>,
}

impl From<Vec<DigestItem>> for Digest {
    fn from(logs: Vec<DigestItem>) -> Self {
        Digest { logs }
    }
}

impl Encode for Digest {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.logs.encode_to(out)
    }

    fn encoded_len(&self) -> usize {
        self.logs.encoded_len()
    }
}

impl Decode for Digest {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Digest {
            logs: Vec::decode(reader).at("logs")?,
        })
    }
}
