//! The export pipeline.
//!
//! Reads run in a fixed order and any read failure aborts the whole run,
//! so a backup is either complete or never produced. Undecodable secrets
//! are the one recoverable failure: the field is blanked and the run goes on.

use super::document::BackupDocument;
use crate::errors::Result;
use crate::merge::merge;
use crate::model::{
    AccessGateway, Asset, Command, Credential, Job, SecretFields, Storage, Strategy, User,
    UserGroup,
};
use crate::repository::Repository;

/// The result of one export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRun {
    pub document: BackupDocument,
    /// Non-empty secrets that could not be decrypted and were blanked.
    pub blanked_secrets: usize,
}

/// Build a complete backup from `repo`.
pub fn export_backup<R: Repository>(repo: &R) -> Result<ExportRun> {
    log::info!("exporting...");

    // 1. Users. Account passwords are never exported.
    let mut users: Vec<User> = repo.find_all()?;
    for user in &mut users {
        user.password.clear();
    }
    log::debug!("users: {}", users.len());

    // 2. Groups and their members.
    let mut user_groups: Vec<UserGroup> = repo.find_all()?;
    for group in &mut user_groups {
        group.members = repo.group_members(&group.id)?;
    }
    log::debug!("user groups: {}", user_groups.len());

    // 3. Plain collections.
    let storages: Vec<Storage> = repo.find_all()?;
    let strategies: Vec<Strategy> = repo.find_all()?;
    let jobs: Vec<Job> = repo.find_all()?;
    let access_gateways: Vec<AccessGateway> = repo.find_all()?;
    let commands: Vec<Command> = repo.find_all()?;

    let mut blanked_secrets = 0;

    // 4. Credentials.
    let mut credentials: Vec<Credential> = repo.find_all()?;
    for credential in &mut credentials {
        blanked_secrets += credential.decrypt_secrets();
    }
    log::debug!("credentials: {}", credentials.len());

    // 5. Assets, decrypted then merged with their attributes.
    let raw_assets: Vec<Asset> = repo.find_all()?;
    let mut assets = Vec::with_capacity(raw_assets.len());
    for mut asset in raw_assets {
        blanked_secrets += asset.decrypt_secrets();
        let attributes = repo.asset_attributes(&asset.id)?;
        assets.push(merge(asset, attributes));
    }
    log::debug!("assets: {}", assets.len());

    // 6. Assemble. Nothing populates `access_securities`.
    let document = BackupDocument {
        users,
        user_groups,
        storages,
        strategies,
        access_securities: Vec::new(),
        access_gateways,
        commands,
        credentials,
        assets,
        jobs,
    };

    log::info!("collected {}", document.summary());
    if blanked_secrets > 0 {
        log::warn!("{blanked_secrets} secrets could not be decrypted and were left empty");
    }

    Ok(ExportRun {
        document,
        blanked_secrets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::writer::write_backup;
    use crate::crypto::secret::seal;
    use crate::errors::ExportError;
    use crate::repository::SqliteRepository;
    use rusqlite::Connection;
    use tempfile::TempDir;

    const SCHEMA: &str = "
        CREATE TABLE users (id TEXT, username TEXT, password TEXT, nickname TEXT,
            totp_secret TEXT, online INTEGER, status TEXT, type TEXT, mail TEXT,
            source TEXT, created TEXT);
        CREATE TABLE user_groups (id TEXT, name TEXT, created TEXT);
        CREATE TABLE user_group_members (id TEXT, user_id TEXT, user_group_id TEXT);
        CREATE TABLE storages (id TEXT, name TEXT, is_share INTEGER, limit_size INTEGER,
            is_default INTEGER, owner TEXT, created TEXT);
        CREATE TABLE strategies (id TEXT, name TEXT, upload TEXT, download TEXT,
            \"delete\" TEXT, rename TEXT, edit TEXT, create_dir TEXT, copy TEXT,
            paste TEXT, created TEXT);
        CREATE TABLE jobs (id TEXT, cron_job_id INTEGER, name TEXT, func TEXT, cron TEXT,
            mode TEXT, resource_ids TEXT, status TEXT, metadata TEXT, created TEXT,
            updated TEXT);
        CREATE TABLE access_gateways (id TEXT, ip TEXT, port INTEGER, account_type TEXT,
            username TEXT, password TEXT, private_key TEXT, passphrase TEXT, name TEXT,
            created TEXT);
        CREATE TABLE commands (id TEXT, name TEXT, content TEXT, created TEXT, owner TEXT);
        CREATE TABLE credentials (id TEXT, name TEXT, type TEXT, username TEXT,
            password TEXT, private_key TEXT, passphrase TEXT, created TEXT, owner TEXT,
            encrypted INTEGER);
        CREATE TABLE assets (id TEXT, name TEXT, protocol TEXT, ip TEXT, port INTEGER,
            account_type TEXT, username TEXT, password TEXT, credential_id TEXT,
            private_key TEXT, passphrase TEXT, description TEXT, active INTEGER,
            active_message TEXT, created TEXT, tags TEXT, owner TEXT, encrypted INTEGER,
            access_gateway_id TEXT, sort INTEGER, last_access_time TEXT);
        CREATE TABLE asset_attributes (id TEXT, asset_id TEXT, name TEXT, value TEXT);
    ";

    /// One user, one credential, one asset with a port override.
    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute(
            "INSERT INTO users (id, username, password, created)
             VALUES ('u1', 'admin', 'secret', '2023-05-06 07:08:09')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO credentials (id, name, type, username, password, private_key, passphrase)
             VALUES ('c1', 'root', 'custom', 'root', ?1, '-', '')",
            [seal("hunter2")],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO assets (id, name, protocol, ip, port, password, private_key, passphrase, created)
             VALUES ('a1', 'web', 'ssh', '10.0.0.1', 22, ?1, '', '-', '2023-05-06 07:08:09')",
            [seal("asset-pw")],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO asset_attributes (id, asset_id, name, value)
             VALUES ('x1', 'a1', 'port', '2222')",
            [],
        )
        .unwrap();
        conn
    }

    #[test]
    fn end_to_end_scenario() {
        let repo = SqliteRepository::from_connection(seeded());
        let run = export_backup(&repo).unwrap();
        let doc = serde_json::to_value(&run.document).unwrap();

        assert_eq!(doc["users"][0]["username"], "admin");
        assert_eq!(doc["users"][0]["password"], "");
        assert_eq!(doc["credentials"][0]["password"], "hunter2");
        assert_eq!(doc["credentials"][0]["privateKey"], "");
        assert_eq!(doc["assets"][0]["port"], "2222");
        assert_eq!(doc["assets"][0]["password"], "asset-pw");
        assert_eq!(doc["assets"][0]["created"], "2023-05-06 07:08:09");
        assert_eq!(doc["access_securities"], serde_json::json!([]));
        assert_eq!(run.blanked_secrets, 0);
    }

    #[test]
    fn group_members_are_attached_in_query_order() {
        let conn = seeded();
        conn.execute_batch(
            "INSERT INTO user_groups (id, name) VALUES ('g1', 'ops');
             INSERT INTO user_groups (id, name) VALUES ('g2', 'empty');
             INSERT INTO user_group_members (user_id, user_group_id) VALUES ('u9', 'g1');
             INSERT INTO user_group_members (user_id, user_group_id) VALUES ('u1', 'g1');",
        )
        .unwrap();

        let run = export_backup(&SqliteRepository::from_connection(conn)).unwrap();
        let groups = &run.document.user_groups;
        assert_eq!(groups[0].members, vec!["u9".to_string(), "u1".to_string()]);
        assert!(groups[1].members.is_empty());
    }

    #[test]
    fn corrupt_secret_is_blanked_without_aborting() {
        let conn = seeded();
        conn.execute(
            "UPDATE credentials SET passphrase = 'definitely not base64!' WHERE id = 'c1'",
            [],
        )
        .unwrap();

        let run = export_backup(&SqliteRepository::from_connection(conn)).unwrap();
        let cred = &run.document.credentials[0];
        assert_eq!(cred.password, "hunter2");
        assert_eq!(cred.passphrase, "");
        assert_eq!(run.blanked_secrets, 1);
    }

    #[test]
    fn plain_collections_are_copied_verbatim() {
        let conn = seeded();
        conn.execute_batch(
            "INSERT INTO commands (id, name, content) VALUES ('k1', 'uptime', 'uptime -p');
             INSERT INTO access_gateways (id, ip, port, password) VALUES ('g1', '1.2.3.4', 22, 'raw');
             INSERT INTO jobs (id, cron_job_id, func) VALUES ('j1', 3, 'check-asset-status-job');",
        )
        .unwrap();

        let doc = export_backup(&SqliteRepository::from_connection(conn))
            .unwrap()
            .document;
        assert_eq!(doc.commands[0].content, "uptime -p");
        assert_eq!(doc.access_gateways[0].password, "raw");
        assert_eq!(doc.jobs[0].cron_job_id, 3);
    }

    #[test]
    fn export_is_idempotent() {
        let repo = SqliteRepository::from_connection(seeded());
        let first = export_backup(&repo).unwrap();
        let second = export_backup(&repo).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn read_failure_aborts_without_artifact() {
        for table in ["users", "user_group_members", "jobs", "credentials", "asset_attributes"] {
            let conn = seeded();
            if table == "user_group_members" {
                conn.execute("INSERT INTO user_groups (id) VALUES ('g1')", [])
                    .unwrap();
            }
            conn.execute_batch(&format!("DROP TABLE {table};")).unwrap();

            let dir = TempDir::new().unwrap();
            let path = dir.path().join("backup.json");

            let result = export_backup(&SqliteRepository::from_connection(conn))
                .and_then(|run| write_backup(&run.document, &path));

            assert!(
                matches!(result, Err(ExportError::Query { .. })),
                "dropping {table} must abort"
            );
            assert!(!path.exists(), "no artifact after dropping {table}");
        }
    }
}
