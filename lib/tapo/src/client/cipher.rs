use crypto::hash::sha256;
use crypto::{cbc, Token};

use super::Error;

const SIGNATURE_LEN: usize = 32;

/// Per-session KLAP cipher derived from both handshake seeds.
pub struct Cipher {
    key: Token<16>,
    iv: Token<12>,
    sig: Token<28>,
    seq: i32,
}

impl Cipher {
    pub fn new(local_seed: &[u8], remote_seed: &[u8], auth_hash: &[u8]) -> Self {
        let key = sha256(&[b"lsk", local_seed, remote_seed, auth_hash]);
        let iv = sha256(&[b"iv", local_seed, remote_seed, auth_hash]);
        let sig = sha256(&[b"ldk", local_seed, remote_seed, auth_hash]);

        let mut cipher = Self {
            key: [0; 16],
            iv: [0; 12],
            sig: [0; 28],
            seq: i32::from_be_bytes([iv[28], iv[29], iv[30], iv[31]]),
        };

        cipher.key.copy_from_slice(&key[..16]);
        cipher.iv.copy_from_slice(&iv[..12]);
        cipher.sig.copy_from_slice(&sig[..28]);

        cipher
    }

    /// Advances the sequence and returns it together with the signed body.
    pub fn encrypt(&mut self, mut payload: Vec<u8>) -> Result<(i32, Vec<u8>), Error> {
        self.seq = self.seq.wrapping_add(1);
        let seq = self.seq;

        let ciphertext = cbc::encrypt(&mut payload, self.key, self.iv_seq(seq))
            .map_err(|_| Error::Encrypt)?;

        let signature = sha256(&[&self.sig, &seq.to_be_bytes(), ciphertext]);

        let mut body = Vec::with_capacity(SIGNATURE_LEN + ciphertext.len());
        body.extend_from_slice(&signature);
        body.extend_from_slice(ciphertext);

        Ok((seq, body))
    }

    pub fn decrypt(&self, seq: i32, body: &mut [u8]) -> Result<Vec<u8>, Error> {
        if body.len() <= SIGNATURE_LEN {
            return Err(Error::Decrypt);
        }

        let payload = cbc::decrypt(&mut body[SIGNATURE_LEN..], self.key, self.iv_seq(seq))
            .map_err(|_| Error::Decrypt)?;

        Ok(payload.to_vec())
    }

    fn iv_seq(&self, seq: i32) -> Token<16> {
        let mut iv = [0; 16];
        iv[..12].copy_from_slice(&self.iv);
        iv[12..].copy_from_slice(&seq.to_be_bytes());
        iv
    }
}
