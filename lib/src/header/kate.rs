use serde::{Deserialize, Serialize};

use crate::codec::{CompactInteger, Decode, Encode, Reader};
use crate::error::{Result, ResultExt};
use crate::json::byte_seq;
use crate::primitives::{AppId, H256};

// -------------------------------------------------------------------------- //
// Kate Commitment

/// Commitment to the erasure coded block data, laid out as a `rows x cols`
/// matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KateCommitment {
    #[serde(alias = "hash")]
    pub data_root: H256,
    #[serde(with = "byte_seq")]
    pub commitment: Vec<u8>,
    pub rows: CompactInteger,
    pub cols: CompactInteger,
}

impl Encode for KateCommitment {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.data_root.encode_to(out);
        self.commitment.encode_to(out);
        self.rows.encode_to(out);
        self.cols.encode_to(out);
    }

    fn encoded_len(&self) -> usize {
        self.data_root.encoded_len()
            + self.commitment.encoded_len()
            + self.rows.encoded_len()
            + self.cols.encoded_len()
    }
}

impl Decode for KateCommitment {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(KateCommitment {
            data_root: H256::decode(reader).at("dataRoot")?,
            commitment: Vec::<u8>::decode(reader).at("commitment")?,
            rows: CompactInteger::decode(reader).at("rows")?,
            cols: CompactInteger::decode(reader).at("cols")?,
        })
    }
}

// -------------------------------------------------------------------------- //
// Data Lookup

/// Start of the data range owned by one application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLookupIndexItem {
    pub app_id: AppId,
    pub start: CompactInteger,
}

/// Index of application owned ranges in the block data. Well formed chain
/// data keeps `index` sorted by app id; the order is preserved as decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLookup {
    pub size: CompactInteger,
    pub index: Vec<DataLookupIndexItem>,
}

impl DataLookupIndexItem {
    pub fn new(app_id: impl Into<AppId>, start: impl Into<CompactInteger>) -> Self {
        DataLookupIndexItem {
            app_id: app_id.into(),
            start: start.into(),
        }
    }
}

impl Encode for DataLookupIndexItem {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.app_id.encode_to(out);
        self.start.encode_to(out);
    }

    fn encoded_len(&self) -> usize {
        self.app_id.encoded_len() + self.start.encoded_len()
    }
}

impl Decode for DataLookupIndexItem {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(DataLookupIndexItem {
            app_id: AppId::decode(reader).at("appId")?,
            start: CompactInteger::decode(reader).at("start")?,
        })
    }
}

impl Encode for DataLookup {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.size.encode_to(out);
        self.index.encode_to(out);
    }

    fn encoded_len(&self) -> usize {
        self.size.encoded_len() + self.index.encoded_len()
    }
}

impl Decode for DataLookup {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(DataLookup {
            size: CompactInteger::decode(reader).at("size")?,
            index: Vec::<DataLookupIndexItem>::decode(reader).at("index")?,
        })
    }
}
