//! Entity types read from the Next Terminal database.
//!
//! Every fixed-schema entity mirrors its source table and serializes
//! with the camelCase keys the gateway itself uses in its JSON API.

pub mod asset;
pub mod entities;
pub mod time;

pub use asset::{Asset, AssetAttribute, Credential, SecretFields};
pub use entities::{
    AccessGateway, AccessSecurity, Command, Job, Storage, Strategy, User, UserGroup,
};
pub use time::JsonTime;
