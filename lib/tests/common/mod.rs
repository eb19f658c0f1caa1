// Shared fixtures for the integration tests.
#![allow(dead_code)]

use header_codec::{
    BlockNumber, ConsensusEngineId, DataLookup, DataLookupIndexItem, Digest, DigestItem, Header,
    HeaderExtension, KateCommitment, V1HeaderExtension, VTHeaderExtension, H256,
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn example_digest() -> Digest {
    Digest::from(vec![
        DigestItem::Other(vec![4, 5]),
        DigestItem::ChangesTrieRoot(H256::from_prefix(&[6, 7])),
        DigestItem::Consensus(ConsensusEngineId([9, 0, 0, 0]), vec![10, 11, 12]),
        DigestItem::Seal(ConsensusEngineId([11, 0, 0, 0]), vec![12, 13, 14]),
        DigestItem::PreRuntime(ConsensusEngineId([13, 0, 0, 0]), vec![14, 15, 16]),
    ])
}

pub fn example_v1() -> V1HeaderExtension {
    V1HeaderExtension {
        commitment: KateCommitment {
            data_root: H256::from_prefix(&[8, 9, 10, 11, 12]),
            commitment: vec![1, 2, 3, 4],
            rows: 4u32.into(),
            cols: 1u32.into(),
        },
        app_lookup: DataLookup {
            size: 1u32.into(),
            index: vec![DataLookupIndexItem::new(1u32, 1u32)],
        },
    }
}

pub fn example_vtest() -> VTHeaderExtension {
    VTHeaderExtension {
        new_field: vec![1, 2, 3, 4, 5],
        commitment: KateCommitment {
            data_root: H256::from_prefix(&[13, 14, 15, 16, 17]),
            commitment: vec![5, 6, 7, 8],
            rows: 8u32.into(),
            cols: 2u32.into(),
        },
        app_lookup: DataLookup {
            size: 2u32.into(),
            index: vec![DataLookupIndexItem::new(2u32, 10u32)],
        },
    }
}

pub fn example_header_with(extension: HeaderExtension) -> Header {
    Header::new(
        H256::from_prefix(&[1, 2, 3, 4, 5]),
        BlockNumber(42),
        H256::from_prefix(&[2, 3, 4, 5, 6]),
        KateCommitment {
            data_root: H256::from_prefix(&[3, 4, 5, 6, 7]),
            commitment: vec![1, 2, 3, 4],
            rows: 4u32.into(),
            cols: 1u32.into(),
        },
        example_digest(),
        extension,
    )
}

pub fn example_header() -> Header {
    example_header_with(HeaderExtension::V1(example_v1()))
}
