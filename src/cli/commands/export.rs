//! `nt-export` — read the database, decrypt secrets, write the backup.

use crate::backup::{export_backup, write_backup};
use crate::cli::{output, resolve_backend, Cli};
use crate::config::Backend;
use crate::errors::Result;
use crate::repository::{MysqlRepository, SqliteRepository};

/// Execute the export.
pub fn execute(cli: &Cli) -> Result<()> {
    let run = match resolve_backend(cli)? {
        Backend::Sqlite(path) => {
            log::info!("opening sqlite database {}", path.display());
            export_backup(&SqliteRepository::open(&path)?)?
        }
        Backend::Mysql(settings) => {
            log::info!(
                "connecting to mysql {}:{}/{}",
                settings.hostname,
                settings.port,
                settings.database
            );
            export_backup(&MysqlRepository::connect(&settings)?)?
        }
    };

    write_backup(&run.document, &cli.output)?;

    if run.blanked_secrets > 0 {
        output::warning(&format!(
            "{} secrets could not be decrypted and were exported empty",
            run.blanked_secrets
        ));
    }
    output::success(&format!(
        "Exported {} to {}",
        run.document.summary(),
        cli.output.display()
    ));

    Ok(())
}
