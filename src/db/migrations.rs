//! Versioned schema migrations.
//!
//! Every migration runs once, in version order, and is recorded in the
//! `migrations` table. Pending migrations are applied together in a single
//! transaction when the database is opened.
//!
//! ```rust,no_run
//! use chronolog::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("chronolog.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

const MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A schema step: SQL statements applied in order.
#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    statements: &'static [&'static str],
}

/// Append new versions at the end; applied versions must never change.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_entry_and_property",
        statements: &[
            "CREATE TABLE IF NOT EXISTS entry (
                uid INTEGER PRIMARY KEY AUTOINCREMENT,
                project TEXT NOT NULL,
                note TEXT,
                entry_datetime TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS property (
                entry_uid INTEGER NOT NULL,
                name TEXT NOT NULL,
                value TEXT NOT NULL,
                FOREIGN KEY (entry_uid) REFERENCES entry(uid) ON DELETE CASCADE
            )",
        ],
    },
    Migration {
        version: 2,
        name: "add_entry_indices",
        statements: &[
            "CREATE INDEX IF NOT EXISTS idx_entry_datetime ON entry(entry_datetime)",
            "CREATE INDEX IF NOT EXISTS idx_property_entry_uid ON property(entry_uid)",
            "CREATE INDEX IF NOT EXISTS idx_property_name ON property(name)",
        ],
    },
];

pub struct MigrationManager {
    migrations: &'static [Migration],
}

impl MigrationManager {
    pub fn new() -> Self {
        Self { migrations: MIGRATIONS }
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.iter().map(|m| m.version).max().unwrap_or(0)
    }

    /// Applies all pending migrations atomically.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current).collect();
        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }
        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));
            let applied = migration
                .statements
                .iter()
                .try_for_each(|sql| tx.execute(sql, []).map(|_| ()))
                .with_context(|| format!("migration v{} ({})", migration.version, migration.name));
            if let Err(e) = applied {
                msg_error!(Message::MigrationFailed(migration.version, format!("{:#}", e)));
                return Err(e);
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }
        tx.commit()?;

        msg_debug!(Message::AllMigrationsCompleted);
        Ok(())
    }

    /// Highest applied version, 0 when nothing was ever applied.
    pub fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        if !has_migrations_table(conn)? {
            return Ok(0);
        }
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        if !has_migrations_table(conn)? {
            return Ok(false);
        }
        let found = conn
            .query_row("SELECT 1 FROM migrations WHERE version = ?1", params![version], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    /// `(version, name, applied_at)` for each applied migration, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        if !has_migrations_table(conn)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

fn has_migrations_table(conn: &Connection) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'migrations'",
            [],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
