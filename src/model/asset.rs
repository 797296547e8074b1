//! Secret-bearing entities and the attribute override table.

use serde::Serialize;

use super::time::JsonTime;
use crate::crypto::try_decrypt;

/// Reusable login material shared between assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
    pub password: String,
    pub private_key: String,
    pub passphrase: String,
    pub owner: String,
    pub encrypted: bool,
    pub created: Option<JsonTime>,
}

/// A remote machine reachable through the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub protocol: String,
    pub ip: String,
    pub port: i64,
    pub account_type: String,
    pub username: String,
    pub password: String,
    pub credential_id: String,
    pub private_key: String,
    pub passphrase: String,
    pub description: String,
    pub active: bool,
    pub active_message: String,
    pub tags: String,
    pub owner: String,
    pub encrypted: bool,
    pub access_gateway_id: String,
    pub sort: i64,
    pub last_access_time: Option<JsonTime>,
    pub created: Option<JsonTime>,
}

/// One `(asset, name, value)` row of the override table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAttribute {
    pub id: String,
    pub asset_id: String,
    pub name: String,
    pub value: String,
}

/// Implemented by entities whose password, private key and passphrase
/// are stored encrypted with the legacy scheme.
pub trait SecretFields {
    fn secret_fields_mut(&mut self) -> [&mut String; 3];

    /// Replace every stored secret with its plaintext.
    ///
    /// Secrets that cannot be decoded are blanked, the same outcome as
    /// `crypto::must_decrypt`. Returns how many were blanked.
    fn decrypt_secrets(&mut self) -> usize {
        let mut blanked = 0;
        for field in self.secret_fields_mut() {
            match try_decrypt(field.as_str()) {
                Some(plain) => *field = plain,
                None => {
                    field.clear();
                    blanked += 1;
                }
            }
        }
        blanked
    }
}

impl SecretFields for Credential {
    fn secret_fields_mut(&mut self) -> [&mut String; 3] {
        [&mut self.password, &mut self.private_key, &mut self.passphrase]
    }
}

impl SecretFields for Asset {
    fn secret_fields_mut(&mut self) -> [&mut String; 3] {
        [&mut self.password, &mut self.private_key, &mut self.passphrase]
    }
}
