use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::codec::{Decode, Encode, Reader};
use crate::config::CodecConfig;
use crate::error::{Error, ErrorKind, Result, ResultExt};
use crate::primitives::{BlockNumber, H256};

pub mod digest;
pub mod extension;
pub mod hash;
pub mod kate;

pub use digest::{Digest, DigestItem};
pub use extension::{HeaderExtension, V1HeaderExtension, VTHeaderExtension};
pub use kate::{DataLookup, DataLookupIndexItem, KateCommitment};

// -------------------------------------------------------------------------- //
// Header

/// Block header of a data availability chain.
///
/// The extrinsics root is a Kate commitment rather than a plain trie root,
/// and the header carries a versioned extension. Fields are read only; a
/// changed header is a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, CopyGetters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[getset(get = "pub")]
    parent_hash: H256,
    #[getset(get_copy = "pub")]
    number: BlockNumber,
    #[getset(get = "pub")]
    state_root: H256,
    #[getset(get = "pub")]
    extrinsics_root: KateCommitment,
    #[getset(get = "pub")]
    digest: Digest,
    #[getset(get = "pub")]
    extension: HeaderExtension,
}

impl Header {
    pub fn new(
        parent_hash: H256,
        number: BlockNumber,
        state_root: H256,
        extrinsics_root: KateCommitment,
        digest: Digest,
        extension: HeaderExtension,
    ) -> Self {
        Header {
            parent_hash,
            number,
            state_root,
            extrinsics_root,
            digest,
            extension,
        }
    }

    /// Blake2b-256 of the binary encoding.
    pub fn hash(&self) -> H256 {
        hash::header_hash(self)
    }
}

impl Encode for Header {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.parent_hash.encode_to(out);
        self.number.encode_to(out);
        self.state_root.encode_to(out);
        self.extrinsics_root.encode_to(out);
        self.digest.encode_to(out);
        self.extension.encode_to(out);
    }

    fn encoded_len(&self) -> usize {
        self.parent_hash.encoded_len()
            + self.number.encoded_len()
            + self.state_root.encoded_len()
            + self.extrinsics_root.encoded_len()
            + self.digest.encoded_len()
            + self.extension.encoded_len()
    }
}

impl Decode for Header {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        let start = reader.position();
        let header = Header {
            parent_hash: H256::decode(reader).at("parentHash")?,
            number: BlockNumber::decode(reader).at("number")?,
            state_root: H256::decode(reader).at("stateRoot")?,
            extrinsics_root: KateCommitment::decode(reader).at("extrinsicsRoot")?,
            digest: Digest::decode(reader).at("digest")?,
            extension: HeaderExtension::decode(reader).at("extension")?,
        };
        log::trace!(
            "decoded header #{} ({} bytes)",
            header.number.0,
            reader.position() - start
        );
        Ok(header)
    }
}

// -------------------------------------------------------------------------- //
// Header Codec

/// Entry points for collaborators that receive headers from the transport.
///
/// Binary input is decoded with the configured sequence limit; trailing bytes
/// are reported to the caller unless the configuration rejects them.
#[derive(Debug, Clone, Default)]
pub struct HeaderCodec {
    config: CodecConfig,
}

impl HeaderCodec {
    pub fn new(config: CodecConfig) -> Self {
        HeaderCodec { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn encode(&self, header: &Header) -> Vec<u8> {
        header.encode()
    }

    /// Decode a header from the front of `bytes`, returning the number of
    /// bytes consumed.
    pub fn decode(&self, bytes: &[u8]) -> Result<(Header, usize)> {
        let mut reader = Reader::with_config(bytes, &self.config);
        let header = Header::decode(&mut reader)
            .inspect_err(|e| log::debug!("header decode failed: {e}"))?;
        if self.config.reject_trailing_bytes {
            reader.finish()?;
        }
        Ok((header, reader.position()))
    }

    pub fn decode_hex(&self, text: &str) -> Result<(Header, usize)> {
        let bytes = hex::decode(crate::codec::strip_hex_prefix(text))
            .map_err(|e| Error::new(ErrorKind::InvalidHex(e.to_string())))?;
        self.decode(&bytes)
    }

    pub fn to_json(&self, header: &Header) -> Result<String> {
        crate::json::to_json(header)
    }

    /// The block number is the only numeric text field of a header, so
    /// numeric text errors are reported at `number`.
    pub fn from_json(&self, text: &str) -> Result<Header> {
        crate::json::from_json(text)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidNumericText(_) => e.at("number"),
                _ => e,
            })
            .inspect_err(|e| log::debug!("header json rejected: {e}"))
    }
}
