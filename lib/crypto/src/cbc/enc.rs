use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use cipher::inout::PadError;

use crate::Token;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;

const BLOCK_SIZE: usize = 16;

/// Encrypts `message` in place with AES-128-CBC and PKCS#7 padding. The
/// buffer grows to hold the padding; the returned slice is the ciphertext.
pub fn encrypt(message: &mut Vec<u8>, key: Token<16>, iv: Token<16>) -> Result<&[u8], PadError> {
    let message_len = message.len();
    message.resize(padded_len(message_len), 0);

    Aes128CbcEnc::new(&key.into(), &iv.into()).encrypt_padded_mut::<Pkcs7>(message, message_len)
}

/// PKCS#7 always adds at least one byte, so an aligned length gains a block.
fn padded_len(len: usize) -> usize {
    (len / BLOCK_SIZE + 1) * BLOCK_SIZE
}
