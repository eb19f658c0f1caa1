mod common;

use std::any::Any;

use common::{example_header, example_header_with, example_vtest, init_logger};
use header_codec::{
    decode_from, BlockNumber, Decode, Encode, ErrorKind, Header, HeaderExtension, TextCodec,
    V1HeaderExtension, VTHeaderExtension,
};

const EXAMPLE_HEADER_HEX: &str = concat!(
    // parent hash
    "0102030405000000000000000000000000000000000000000000000000000000",
    // number
    "a8",
    // state root
    "0203040506000000000000000000000000000000000000000000000000000000",
    // extrinsics root
    "0304050607000000000000000000000000000000000000000000000000000000",
    "100102030410", "04",
    // digest
    "14",
    "00080405",
    "020607000000000000000000000000000000000000000000000000000000000000",
    "04090000000c0a0b0c",
    "050b0000000c0c0d0e",
    "060d0000000c0e0f10",
    // extension
    "00",
    "08090a0b0c000000000000000000000000000000000000000000000000000000",
    "100102030410", "04",
    "04", "04", "0404",
);

const EXAMPLE_HEADER_HASH: &str = "eb855c169c4413a4c2b185ffd24f9c69f0ab490778ae77d5aa8fe56f2e01719a";

#[test]
fn golden_vector() {
    init_logger();
    let header = example_header();
    let encoded = header.encode();
    assert_eq!(hex::encode(&encoded), EXAMPLE_HEADER_HEX);
    assert_eq!(encoded.len(), 213);
    assert_eq!(header_codec::encode_to_hex(&header), format!("0x{EXAMPLE_HEADER_HEX}"));
    assert_eq!(hex::encode(header.hash().0), EXAMPLE_HEADER_HASH);
}

#[test]
fn golden_vector_decodes() {
    let bytes = hex::decode(EXAMPLE_HEADER_HEX).unwrap();
    assert_eq!(Header::decode_all(&bytes).unwrap(), example_header());
    assert_eq!(
        header_codec::decode_from_hex::<Header>(&format!("0x{EXAMPLE_HEADER_HEX}")).unwrap(),
        example_header()
    );
}

#[test]
fn round_trip_both_extension_versions() {
    init_logger();
    for header in [
        example_header(),
        example_header_with(HeaderExtension::VTest(example_vtest())),
        Header::default(),
    ] {
        let encoded = header.encode();
        let (decoded, consumed) = decode_from::<Header>(&encoded).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(consumed, encoded.len());
    }
}

#[test]
fn vtest_layout() {
    let header = example_header_with(HeaderExtension::VTest(example_vtest()));
    let encoded = hex::encode(header.encode());
    let extension = concat!(
        "01",
        "140102030405",
        "0d0e0f1011000000000000000000000000000000000000000000000000000000",
        "100506070820", "08",
        "08", "04", "0828",
    );
    assert!(encoded.ends_with(extension));
    assert_eq!(encoded.len() / 2, 219);
}

#[test]
fn default_header_is_139_bytes() {
    assert_eq!(Header::default().encode().len(), 139);
}

#[test]
fn encoded_len_matches_output() {
    let mut big = example_header().extension().clone();
    if let HeaderExtension::V1(ext) = &mut big {
        ext.commitment.commitment = vec![7; 300];
        ext.commitment.rows = u64::MAX.into();
        ext.app_lookup.size = 70_000u32.into();
    }
    for header in [
        Header::default(),
        example_header(),
        example_header_with(HeaderExtension::VTest(example_vtest())),
        example_header_with(big),
    ] {
        assert_eq!(header.encoded_len(), header.encode().len());
    }
}

#[test]
fn equality_depends_on_populated_variant() {
    let v1 = example_header();
    assert_eq!(v1, example_header());

    let vtest_fields = example_vtest();
    let as_v1 = example_header_with(HeaderExtension::V1(V1HeaderExtension {
        commitment: vtest_fields.commitment.clone(),
        app_lookup: vtest_fields.app_lookup.clone(),
    }));
    let as_vtest = example_header_with(HeaderExtension::VTest(VTHeaderExtension {
        new_field: Vec::new(),
        ..vtest_fields
    }));
    assert_ne!(as_v1, as_vtest);

    let mut reordered = example_header().digest().logs.clone();
    reordered.swap(0, 1);
    let other_order = Header::new(
        *v1.parent_hash(),
        v1.number(),
        *v1.state_root(),
        v1.extrinsics_root().clone(),
        reordered.into(),
        v1.extension().clone(),
    );
    assert_ne!(v1, other_order);
}

#[test]
fn header_is_never_equal_to_other_types() {
    fn equals_header(header: &Header, other: &dyn Any) -> bool {
        other.downcast_ref::<Header>() == Some(header)
    }
    let header = example_header();
    assert!(equals_header(&header, &example_header()));
    assert!(!equals_header(&header, &header.encode()));
    assert!(!equals_header(&header, &false));
}

#[test]
fn empty_buffer_fails() {
    let err = Header::decode_all(&[]).unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.path_string(), "parentHash");
}

#[test]
fn every_truncation_fails() {
    let encoded = example_header().encode();
    for len in 0..encoded.len() {
        assert!(
            Header::decode_all(&encoded[..len]).is_err(),
            "prefix of {len} bytes decoded"
        );
    }
}

#[test]
fn truncation_reports_field() {
    let encoded = example_header().encode();

    let err = Header::decode_all(&encoded[..50]).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::Truncated {
            needed: 32,
            remaining: 17
        }
    );
    assert_eq!(err.path_string(), "stateRoot");

    // cut inside the commitment bytes of the extension
    let err = Header::decode_all(&encoded[..encoded.len() - 8]).unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(err.path_string(), "extension.V1.commitment.commitment");
}

#[test]
fn block_number_paths_agree() {
    let header = example_header();
    let number = header.number();
    let from_text = BlockNumber::from_text(&number.to_text()).unwrap();
    let from_binary = Header::decode_all(&header.encode()).unwrap().number();
    assert_eq!(from_text, from_binary);
    assert_eq!(from_binary, BlockNumber(42));
}
