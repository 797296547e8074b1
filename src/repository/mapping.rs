//! Table names and column mappings for every exported entity.

use super::record::Record;
use crate::model::{
    AccessGateway, Asset, AssetAttribute, Command, Credential, Job, Storage, Strategy, User,
    UserGroup,
};

/// An entity that can be built from one row of its table.
pub trait FromRecord: Sized {
    /// Source table name.
    const TABLE: &'static str;

    fn from_record(r: &Record) -> Self;
}

impl FromRecord for User {
    const TABLE: &'static str = "users";

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            username: r.text("username"),
            password: r.text("password"),
            nickname: r.text("nickname"),
            totp_secret: r.text("totp_secret"),
            online: r.boolean("online"),
            status: r.text("status"),
            kind: r.text("type"),
            mail: r.text("mail"),
            source: r.text("source"),
            created: r.time("created"),
        }
    }
}

impl FromRecord for UserGroup {
    const TABLE: &'static str = "user_groups";

    /// `members` is filled in separately from `user_group_members`.
    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            name: r.text("name"),
            created: r.time("created"),
            members: Vec::new(),
        }
    }
}

impl FromRecord for Storage {
    const TABLE: &'static str = "storages";

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            name: r.text("name"),
            is_share: r.boolean("is_share"),
            limit_size: r.int("limit_size"),
            is_default: r.boolean("is_default"),
            owner: r.text("owner"),
            created: r.time("created"),
        }
    }
}

impl FromRecord for Strategy {
    const TABLE: &'static str = "strategies";

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            name: r.text("name"),
            upload: r.boolean("upload"),
            download: r.boolean("download"),
            delete: r.boolean("delete"),
            rename: r.boolean("rename"),
            edit: r.boolean("edit"),
            create_dir: r.boolean("create_dir"),
            copy: r.boolean("copy"),
            paste: r.boolean("paste"),
            created: r.time("created"),
        }
    }
}

impl FromRecord for AccessGateway {
    const TABLE: &'static str = "access_gateways";

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            name: r.text("name"),
            ip: r.text("ip"),
            port: r.int("port"),
            account_type: r.text("account_type"),
            username: r.text("username"),
            password: r.text("password"),
            private_key: r.text("private_key"),
            passphrase: r.text("passphrase"),
            created: r.time("created"),
        }
    }
}

impl FromRecord for Command {
    const TABLE: &'static str = "commands";

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            name: r.text("name"),
            content: r.text("content"),
            owner: r.text("owner"),
            created: r.time("created"),
        }
    }
}

impl FromRecord for Job {
    const TABLE: &'static str = "jobs";

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            cron_job_id: r.int("cron_job_id"),
            name: r.text("name"),
            func: r.text("func"),
            cron: r.text("cron"),
            mode: r.text("mode"),
            resource_ids: r.text("resource_ids"),
            status: r.text("status"),
            metadata: r.text("metadata"),
            created: r.time("created"),
            updated: r.time("updated"),
        }
    }
}

impl FromRecord for Credential {
    const TABLE: &'static str = "credentials";

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            name: r.text("name"),
            kind: r.text("type"),
            username: r.text("username"),
            password: r.text("password"),
            private_key: r.text("private_key"),
            passphrase: r.text("passphrase"),
            owner: r.text("owner"),
            encrypted: r.boolean("encrypted"),
            created: r.time("created"),
        }
    }
}

impl FromRecord for Asset {
    const TABLE: &'static str = "assets";

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            name: r.text("name"),
            protocol: r.text("protocol"),
            ip: r.text("ip"),
            port: r.int("port"),
            account_type: r.text("account_type"),
            username: r.text("username"),
            password: r.text("password"),
            credential_id: r.text("credential_id"),
            private_key: r.text("private_key"),
            passphrase: r.text("passphrase"),
            description: r.text("description"),
            active: r.boolean("active"),
            active_message: r.text("active_message"),
            tags: r.text("tags"),
            owner: r.text("owner"),
            encrypted: r.boolean("encrypted"),
            access_gateway_id: r.text("access_gateway_id"),
            sort: r.int("sort"),
            last_access_time: r.time("last_access_time"),
            created: r.time("created"),
        }
    }
}

impl FromRecord for AssetAttribute {
    const TABLE: &'static str = "asset_attributes";

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            asset_id: r.text("asset_id"),
            name: r.text("name"),
            value: r.text("value"),
        }
    }
}
