//! The single aggregate artifact of an export run.

use std::fmt;

use serde::Serialize;

use crate::merge::MergedAsset;
use crate::model::{
    AccessGateway, AccessSecurity, Command, Credential, Job, Storage, Strategy, User, UserGroup,
};

/// Every exported collection, serialized in declaration order.
///
/// `assets` entries are schema-less merged records; everything else
/// mirrors its source table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BackupDocument {
    pub users: Vec<User>,
    pub user_groups: Vec<UserGroup>,
    pub storages: Vec<Storage>,
    pub strategies: Vec<Strategy>,
    pub access_securities: Vec<AccessSecurity>,
    pub access_gateways: Vec<AccessGateway>,
    pub commands: Vec<Command>,
    pub credentials: Vec<Credential>,
    pub assets: Vec<MergedAsset>,
    pub jobs: Vec<Job>,
}

/// Per-collection counts, for logging and the final status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackupSummary {
    pub users: usize,
    pub user_groups: usize,
    pub storages: usize,
    pub strategies: usize,
    pub access_gateways: usize,
    pub commands: usize,
    pub credentials: usize,
    pub assets: usize,
    pub jobs: usize,
}

impl BackupDocument {
    pub fn summary(&self) -> BackupSummary {
        BackupSummary {
            users: self.users.len(),
            user_groups: self.user_groups.len(),
            storages: self.storages.len(),
            strategies: self.strategies.len(),
            access_gateways: self.access_gateways.len(),
            commands: self.commands.len(),
            credentials: self.credentials.len(),
            assets: self.assets.len(),
            jobs: self.jobs.len(),
        }
    }
}

impl fmt::Display for BackupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users, {} groups, {} storages, {} strategies, {} gateways, \
             {} commands, {} credentials, {} assets, {} jobs",
            self.users,
            self.user_groups,
            self.storages,
            self.strategies,
            self.access_gateways,
            self.commands,
            self.credentials,
            self.assets,
            self.jobs
        )
    }
}
