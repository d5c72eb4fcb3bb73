use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use cipher::block_padding::UnpadError;

use crate::Token;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Decrypts `ciphertext` in place and returns the unpadded plaintext within it.
/// Fails on a partial block or bad padding.
pub fn decrypt(ciphertext: &mut [u8], key: Token<16>, iv: Token<16>) -> Result<&[u8], UnpadError> {
    Aes128CbcDec::new(&key.into(), &iv.into()).decrypt_padded_mut::<Pkcs7>(ciphertext)
}
