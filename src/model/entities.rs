//! Fixed-schema entities exported verbatim (apart from user passwords).

use serde::Serialize;

use super::time::JsonTime;

/// A login account. `password` is always blanked before export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub totp_secret: String,
    pub online: bool,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub mail: String,
    pub source: String,
    pub created: Option<JsonTime>,
}

/// A named set of users. `members` comes from `user_group_members`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub id: String,
    pub name: String,
    pub created: Option<JsonTime>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    pub id: String,
    pub name: String,
    pub is_share: bool,
    pub limit_size: i64,
    pub is_default: bool,
    pub owner: String,
    pub created: Option<JsonTime>,
}

/// File-transfer permissions applied to a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub upload: bool,
    pub download: bool,
    pub delete: bool,
    pub rename: bool,
    pub edit: bool,
    pub create_dir: bool,
    pub copy: bool,
    pub paste: bool,
    pub created: Option<JsonTime>,
}

/// An IP allow/deny rule. The exporter has no step that reads these, so
/// the backup's `access_securities` collection is always empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessSecurity {
    pub id: String,
    pub rule: String,
    pub ip: String,
    pub source: String,
    pub priority: i64,
}

/// An SSH jump host used to reach assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGateway {
    pub id: String,
    pub name: String,
    pub ip: String,
    pub port: i64,
    pub account_type: String,
    pub username: String,
    pub password: String,
    pub private_key: String,
    pub passphrase: String,
    pub created: Option<JsonTime>,
}

/// A saved shell snippet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub id: String,
    pub name: String,
    pub content: String,
    pub owner: String,
    pub created: Option<JsonTime>,
}

/// A scheduled task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub cron_job_id: i64,
    pub name: String,
    pub func: String,
    pub cron: String,
    pub mode: String,
    pub resource_ids: String,
    pub status: String,
    pub metadata: String,
    pub created: Option<JsonTime>,
    pub updated: Option<JsonTime>,
}
