use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use super::Header;
use crate::codec::Encode;
use crate::primitives::H256;

// Block hashes are Blake2b with a 256 bit output over the binary encoding of
// the header.
pub type Hasher = Blake2b<U32>;

pub fn blake2_256(data: &[u8]) -> H256 {
    H256(Hasher::digest(data).into())
}

pub fn header_hash(hdr: &Header) -> H256 {
    blake2_256(&hdr.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        // blake2b-256 of the empty string
        assert_eq!(
            hex::encode(blake2_256(&[]).0),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }
}
