//! The legacy compatibility key.
//!
//! Next Terminal encrypts every stored secret with one key derived from a
//! hard-coded passphrase: the lower-case hex MD5 digest of `next-terminal`.
//! The 32 ASCII characters of that digest are the AES-256 key, and the
//! first 16 of them double as the CBC initialization vector.
//!
//! Reusing the key as the IV is a known weakness. It is kept only so that
//! previously encrypted data stays readable.

use std::sync::OnceLock;

use md5::{Digest, Md5};

/// Passphrase baked into every Next Terminal release.
const LEGACY_PASSPHRASE: &[u8] = b"next-terminal";

/// Length of the hex-rendered digest, which selects AES-256.
pub(crate) const KEY_LEN: usize = 32;

/// AES block size in bytes.
pub(crate) const BLOCK_LEN: usize = 16;

/// Key and IV for the legacy secret scheme.
pub(crate) struct LegacyKey {
    key: [u8; KEY_LEN],
    iv: [u8; BLOCK_LEN],
}

impl LegacyKey {
    /// The process-wide key, derived on first use.
    pub(crate) fn get() -> &'static LegacyKey {
        static KEY: OnceLock<LegacyKey> = OnceLock::new();
        KEY.get_or_init(Self::derive)
    }

    fn derive() -> Self {
        let digest = hex::encode(Md5::digest(LEGACY_PASSPHRASE));

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(digest.as_bytes());

        let mut iv = [0u8; BLOCK_LEN];
        iv.copy_from_slice(&key[..BLOCK_LEN]);

        Self { key, iv }
    }

    /// Raw cipher key bytes (ASCII hex).
    pub(crate) fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// CBC initialization vector: the leading block of the key.
    pub(crate) fn iv(&self) -> &[u8; BLOCK_LEN] {
        &self.iv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_lowercase_hex_of_md5() {
        let key = LegacyKey::get().key();
        assert!(key
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b)));

        let expected = hex::encode(Md5::digest(b"next-terminal"));
        assert_eq!(&key[..], expected.as_bytes());
    }

    #[test]
    fn iv_is_leading_block_of_key() {
        let legacy = LegacyKey::get();
        assert_eq!(&legacy.iv()[..], &legacy.key()[..BLOCK_LEN]);
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = LegacyKey::derive();
        let b = LegacyKey::derive();
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key(), LegacyKey::get().key());
    }
}
