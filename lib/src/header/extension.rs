use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::kate::{DataLookup, KateCommitment};
use crate::codec::variant::{decode_tagged, encode_tagged, tagged_len};
use crate::codec::{Decode, Encode, Reader, TaggedUnion, VariantRegistry};
use crate::error::{Result, ResultExt};
use crate::json::byte_seq;

// -------------------------------------------------------------------------- //
// Header Extension Versions

pub const V1: u8 = 0;
pub const VTEST: u8 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1HeaderExtension {
    pub commitment: KateCommitment,
    pub app_lookup: DataLookup,
}

/// Test version used to exercise upgrades: V1 with an extra leading field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VTHeaderExtension {
    #[serde(with = "byte_seq")]
    pub new_field: Vec<u8>,
    pub commitment: KateCommitment,
    pub app_lookup: DataLookup,
}

/// Versioned header extension. The version is the wire discriminant and
/// must match the protocol version of the chain release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderExtension {
    V1(V1HeaderExtension),
    VTest(VTHeaderExtension),
}

impl Default for HeaderExtension {
    fn default() -> Self {
        HeaderExtension::V1(V1HeaderExtension::default())
    }
}

impl HeaderExtension {
    pub fn commitment(&self) -> &KateCommitment {
        match self {
            HeaderExtension::V1(ext) => &ext.commitment,
            HeaderExtension::VTest(ext) => &ext.commitment,
        }
    }

    pub fn app_lookup(&self) -> &DataLookup {
        match self {
            HeaderExtension::V1(ext) => &ext.app_lookup,
            HeaderExtension::VTest(ext) => &ext.app_lookup,
        }
    }
}

// -------------------------------------------------------------------------- //
// Binary Codec

impl Encode for V1HeaderExtension {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.commitment.encode_to(out);
        self.app_lookup.encode_to(out);
    }

    fn encoded_len(&self) -> usize {
        self.commitment.encoded_len() + self.app_lookup.encoded_len()
    }
}

impl Decode for V1HeaderExtension {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(V1HeaderExtension {
            commitment: KateCommitment::decode(reader).at("commitment")?,
            app_lookup: DataLookup::decode(reader).at("appLookup")?,
        })
    }
}

impl Encode for VTHeaderExtension {
    fn encode_to(&self, out: &mut Vec<u8>) {
        self.new_field.encode_to(out);
        self.commitment.encode_to(out);
        self.app_lookup.encode_to(out);
    }

    fn encoded_len(&self) -> usize {
        self.new_field.encoded_len() + self.commitment.encoded_len() + self.app_lookup.encoded_len()
    }
}

impl Decode for VTHeaderExtension {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(VTHeaderExtension {
            new_field: Vec::<u8>::decode(reader).at("newField")?,
            commitment: KateCommitment::decode(reader).at("commitment")?,
            app_lookup: DataLookup::decode(reader).at("appLookup")?,
        })
    }
}

static HEADER_EXTENSIONS: Lazy<VariantRegistry<HeaderExtension>> = Lazy::new(|| {
    VariantRegistry::new("HeaderExtension")
        .register(V1, "V1", |r| Ok(HeaderExtension::V1(V1HeaderExtension::decode(r)?)))
        .register(VTEST, "VTest", |r| Ok(HeaderExtension::VTest(VTHeaderExtension::decode(r)?)))
});

impl TaggedUnion for HeaderExtension {
    fn registry() -> &'static VariantRegistry<Self> {
        &HEADER_EXTENSIONS
    }

    fn discriminant(&self) -> u8 {
        match self {
            HeaderExtension::V1(_) => V1,
            HeaderExtension::VTest(_) => VTEST,
        }
    }

    fn encode_payload(&self, out: &mut Vec<u8>) {
        match self {
            HeaderExtension::V1(ext) => ext.encode_to(out),
            HeaderExtension::VTest(ext) => ext.encode_to(out),
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            HeaderExtension::V1(ext) => ext.encoded_len(),
            HeaderExtension::VTest(ext) => ext.encoded_len(),
        }
    }
}

impl Encode for HeaderExtension {
    fn encode_to(&self, out: &mut Vec<u8>) {
        encode_tagged(self, out)
    }

    fn encoded_len(&self) -> usize {
        tagged_len(self)
    }
}

impl Decode for HeaderExtension {
    fn decode(reader: &mut Reader<'_>) -> Result<Self> {
        decode_tagged(reader)
    }
}
