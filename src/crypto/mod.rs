//! Decryption of secrets stored by Next Terminal.
//!
//! This module provides:
//! - The fixed legacy key and IV (`legacy_key`)
//! - Strict and lenient AES-CBC secret decryption (`secret`)
//!
//! It is decrypt-only and reproduces exactly one scheme so that existing
//! ciphertexts can be read. Do not reuse it for new data. The key itself
//! stays inside the crate:
//!
//! ```compile_fail
//! let _ = ntexport::crypto::legacy_key::LegacyKey::get();
//! ```

pub(crate) mod legacy_key;
pub mod secret;

pub use secret::{decrypt, must_decrypt, try_decrypt, EMPTY_SENTINEL};
