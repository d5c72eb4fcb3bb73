use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::Token;

pub fn sha1(data: &[u8]) -> Token<20> {
    let mut hash = [0; 20];
    hash.copy_from_slice(&Sha1::digest(data));
    hash
}

/// SHA-256 over the concatenation of `parts`.
pub fn sha256(parts: &[&[u8]]) -> Token<32> {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }

    let mut hash = [0; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_sha1() {
        assert_eq!(
            sha1(b"abc"),
            hex!("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
    }

    #[test]
    fn test_sha256_concatenates_parts() {
        let expected = hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");

        assert_eq!(sha256(&[b"abc"]), expected);
        assert_eq!(sha256(&[b"a", b"", b"bc"]), expected);
    }
}
