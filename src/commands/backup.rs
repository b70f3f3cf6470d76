use crate::{
    db::db::Db,
    libs::messages::Message,
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd() -> Result<()> {
    let target = backup_database(&Db::database_path()?, &Local::now())?;
    msg_success!(Message::BackupCreated(target.display().to_string()));
    Ok(())
}

/// `<db>-backup_<YYYYMMDDHHMMSS>` next to the database file.
pub fn backup_path<Tz: TimeZone>(db_path: &Path, at: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let mut name = db_path.as_os_str().to_os_string();
    name.push(format!("-backup_{}", at.format("%Y%m%d%H%M%S")));
    PathBuf::from(name)
}

/// Copies the database, refusing to overwrite an existing file.
pub fn backup_database<Tz: TimeZone>(db_path: &Path, at: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    if !db_path.exists() {
        msg_bail_anyhow!(Message::DatabaseNotFound(db_path.display().to_string()));
    }
    let target = backup_path(db_path, at);
    if target.exists() {
        msg_bail_anyhow!(Message::BackupExists(target.display().to_string()));
    }
    fs::copy(db_path, &target)?;
    Ok(target)
}
