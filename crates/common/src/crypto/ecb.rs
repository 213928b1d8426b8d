//! AES-256-ECB with PKCS#7 padding.
//!
//! ECB leaks plaintext block structure and is only here because inbound
//! platform callbacks are encrypted with it. Do not use it for anything new.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use aes::Aes256;

use crate::error::{CommonError, CommonResult};

type Aes256EcbEnc = ecb::Encryptor<Aes256>;
type Aes256EcbDec = ecb::Decryptor<Aes256>;

const ALGORITHM: &str = "AES-256-ECB";
const BLOCK_SIZE: usize = 16;

/// Encrypt and pad `plaintext` with a 32-byte key.
///
/// # Errors
/// Returns [`CommonError::Crypto`] when the key is not 32 bytes.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> CommonResult<Vec<u8>> {
    let cipher = Aes256EcbEnc::new_from_slice(key)
        .map_err(|_| CommonError::crypto(ALGORITHM, format!("key must be 32 bytes, got {}", key.len())))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt and unpad `ciphertext` with a 32-byte key.
///
/// # Errors
/// Returns [`CommonError::Crypto`] for a bad key length, a ciphertext that
/// is empty or not block aligned, or invalid padding.
pub fn decrypt(key: &[u8], ciphertext: &[u8]) -> CommonResult<Vec<u8>> {
    let cipher = Aes256EcbDec::new_from_slice(key)
        .map_err(|_| CommonError::crypto(ALGORITHM, format!("key must be 32 bytes, got {}", key.len())))?;

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CommonError::crypto(
            ALGORITHM,
            format!("ciphertext length {} is not a positive multiple of {BLOCK_SIZE}", ciphertext.len()),
        ));
    }

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CommonError::crypto(ALGORITHM, "invalid PKCS#7 padding"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8; 32] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn round_trip_pads_to_block_size() {
        let ciphertext = encrypt(KEY, b"refund notice").unwrap();
        assert_eq!(ciphertext.len(), BLOCK_SIZE);
        assert_eq!(decrypt(KEY, &ciphertext).unwrap(), b"refund notice");

        // Exactly one block of plaintext gains a full padding block.
        let aligned = encrypt(KEY, &[7u8; BLOCK_SIZE]).unwrap();
        assert_eq!(aligned.len(), 2 * BLOCK_SIZE);
    }

    #[test]
    fn identical_blocks_encrypt_identically() {
        let ciphertext = encrypt(KEY, &[0u8; 32]).unwrap();
        assert_eq!(ciphertext[..16], ciphertext[16..32]);
    }

    #[test]
    fn rejects_bad_key_length() {
        let err = encrypt(b"short", b"x").unwrap_err();
        assert!(matches!(err, CommonError::Crypto { .. }));
    }

    #[test]
    fn rejects_unaligned_ciphertext() {
        assert!(decrypt(KEY, &[1u8; 15]).is_err());
        assert!(decrypt(KEY, &[]).is_err());
    }

    #[test]
    fn rejects_wrong_key_padding() {
        let ciphertext = encrypt(KEY, b"secret payload").unwrap();
        let other = b"fedcba9876543210fedcba9876543210";
        // A wrong key yields garbage whose last byte is almost never valid padding.
        match decrypt(other, &ciphertext) {
            Err(CommonError::Crypto { .. }) => {}
            Ok(plain) => assert_ne!(plain, b"secret payload"),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
