use crate::{
    db::{db::Db, migrations::MigrationManager},
    libs::messages::Message,
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    action: Option<MigrationsAction>,
}

#[derive(Debug, Subcommand)]
enum MigrationsAction {
    /// Schema version and whether an update is pending (default)
    Status,
    /// Every applied migration, oldest first
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    // Opened without migrating so the real state can be reported.
    let conn = Db::new_without_migrations()?;
    let manager = MigrationManager::new();

    match args.action.unwrap_or(MigrationsAction::Status) {
        MigrationsAction::Status => status(&manager, &conn),
        MigrationsAction::History => history(&manager, &conn),
    }
}

fn status(manager: &MigrationManager, conn: &Connection) -> Result<()> {
    let version = manager.get_current_version(conn)?;
    msg_print!(Message::DatabaseVersion(version));
    if version < manager.latest_version() {
        msg_info!(Message::DatabaseNeedsUpdate);
    } else {
        msg_info!(Message::DatabaseUpToDate);
    }
    Ok(())
}

fn history(manager: &MigrationManager, conn: &Connection) -> Result<()> {
    msg_print!(Message::MigrationHistory, true);
    for (version, name, applied_at) in manager.get_migration_history(conn)? {
        msg_print!(Message::MigrationHistoryItem(version, name, applied_at));
    }
    Ok(())
}
