use crate::db::migrations::init_with_migrations;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "chronolog.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the configured database and brings its schema up to date.
    pub fn new() -> Result<Db> {
        Self::open(&Self::database_path()?)
    }

    pub fn open(path: &Path) -> Result<Db> {
        let mut conn = Self::connect(path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Connection to the configured database with no schema changes applied.
    pub fn new_without_migrations() -> Result<Connection> {
        Self::connect(&Self::database_path()?)
    }

    /// `database_file` from the config, or the default file in the data directory.
    pub fn database_path() -> Result<PathBuf> {
        match Config::read()?.database_file {
            Some(file) if !file.trim().is_empty() => Ok(PathBuf::from(file)),
            _ => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    fn connect(path: &Path) -> Result<Connection> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }
}
