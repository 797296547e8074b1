//! AES-256-CBC decryption of stored secrets.
//!
//! A stored secret is one of:
//! - an empty string or the `"-"` sentinel, meaning "no secret", or
//! - standard base64 of `AES-256-CBC(key, iv, pkcs7_pad(plaintext))`.
//!
//! Three entry points with different failure contracts:
//! - `decrypt` returns a `DecodeError` the caller can inspect.
//! - `try_decrypt` returns `None` on any failure.
//! - `must_decrypt` returns an empty string on any failure. The exporter
//!   uses this so one unreadable secret never aborts a backup.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, KeyInit};
use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use super::legacy_key::{LegacyKey, BLOCK_LEN};
use crate::errors::DecodeError;

/// Placeholder stored instead of a secret when none was set.
pub const EMPTY_SENTINEL: &str = "-";

/// Decrypt a stored secret, surfacing why it failed.
pub fn decrypt(stored: &str) -> Result<String, DecodeError> {
    if stored.is_empty() || stored == EMPTY_SENTINEL {
        return Ok(String::new());
    }

    let mut data = BASE64
        .decode(stored)
        .map_err(|e| DecodeError::Base64(e.to_string()))?;

    let legacy = LegacyKey::get();
    cbc_decrypt_in_place(legacy.key(), legacy.iv(), &mut data)?;
    let len = unpad(&data)?;
    data.truncate(len);

    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Decrypt a stored secret, or `None` if it cannot be decoded.
pub fn try_decrypt(stored: &str) -> Option<String> {
    decrypt(stored).ok()
}

/// Decrypt a stored secret, degrading to an empty string on failure.
pub fn must_decrypt(stored: &str) -> String {
    match decrypt(stored) {
        Ok(plain) => plain,
        Err(e) => {
            log::debug!("blanking undecodable secret: {e}");
            String::new()
        }
    }
}

/// CBC decryption: each block is decrypted then XORed with the previous
/// ciphertext block (the IV for the first one).
fn cbc_decrypt_in_place(
    key: &[u8],
    iv: &[u8; BLOCK_LEN],
    data: &mut [u8],
) -> Result<(), DecodeError> {
    if data.is_empty() || data.len() % BLOCK_LEN != 0 {
        return Err(DecodeError::Length(data.len()));
    }

    let cipher = Aes256::new(GenericArray::from_slice(key));

    let mut prev = *iv;
    for chunk in data.chunks_exact_mut(BLOCK_LEN) {
        let mut current = [0u8; BLOCK_LEN];
        current.copy_from_slice(chunk);

        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
        for (byte, mask) in chunk.iter_mut().zip(prev.iter()) {
            *byte ^= mask;
        }

        prev = current;
    }

    Ok(())
}

/// Length of `data` once trailing-byte padding is removed.
///
/// The pad length must be within one block and within the buffer;
/// anything else means a wrong key or a corrupted ciphertext.
fn unpad(data: &[u8]) -> Result<usize, DecodeError> {
    let Some(&last) = data.last() else {
        return Err(DecodeError::Length(0));
    };

    let pad = usize::from(last);
    if pad == 0 || pad > BLOCK_LEN || pad > data.len() {
        return Err(DecodeError::Padding(pad));
    }

    Ok(data.len() - pad)
}

/// Test-only encryptor producing ciphertexts in the stored format.
#[cfg(test)]
pub(crate) fn seal(plaintext: &str) -> String {
    let mut data = plaintext.as_bytes().to_vec();
    let pad = BLOCK_LEN - data.len() % BLOCK_LEN;
    data.extend(std::iter::repeat(pad as u8).take(pad));
    seal_raw(&data)
}

/// Test-only encryptor that skips padding, for forging bad pad bytes.
#[cfg(test)]
pub(crate) fn seal_raw(blocks: &[u8]) -> String {
    use aes::cipher::BlockEncrypt;

    assert_eq!(blocks.len() % BLOCK_LEN, 0);
    let legacy = LegacyKey::get();
    let cipher = Aes256::new(GenericArray::from_slice(&legacy.key()[..]));

    let mut data = blocks.to_vec();
    let mut prev = *legacy.iv();
    for chunk in data.chunks_exact_mut(BLOCK_LEN) {
        for (byte, mask) in chunk.iter_mut().zip(prev.iter()) {
            *byte ^= mask;
        }
        cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
        prev.copy_from_slice(chunk);
    }

    BASE64.encode(data)
}
