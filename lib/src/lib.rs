//! Wire formats of data availability block headers.
//!
//! Headers travel in two independent forms: the compact binary layout that
//! is hashed for block identity and sent between peers, and the JSON form
//! served by RPC. Both decode to the same [`Header`] value.
//!
//! ```
//! use header_codec::{Decode, Encode, Header};
//!
//! let header = Header::default();
//! let bytes = header.encode();
//! assert_eq!(Header::decode_all(&bytes).unwrap(), header);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod header;
pub mod json;
pub mod primitives;

pub use codec::{decode_from, decode_from_hex, encode_to_hex, CompactInteger, Decode, Encode, Reader};
pub use config::CodecConfig;
pub use error::{Error, ErrorKind, PathSegment, Result};
pub use header::{
    DataLookup, DataLookupIndexItem, Digest, DigestItem, Header, HeaderCodec, HeaderExtension,
    KateCommitment, V1HeaderExtension, VTHeaderExtension,
};
pub use json::TextCodec;
pub use primitives::{AppId, BlockNumber, ConsensusEngineId, Hash, H256};
