//! Storage of point-events and their properties.
//!
//! Two tables back the store: `entry` holds one row per event, `property`
//! holds any number of named values per event. Timestamps are kept as UTC
//! RFC 3339 text, so ordering and `BETWEEN` work on the raw column.
//!
//! ```rust,no_run
//! use chronolog::db::entries::Entries;
//! use chronolog::libs::entry::NewEntry;
//! use chrono::Utc;
//!
//! let entries = Entries::new()?;
//! let entry = NewEntry::from_project_task("website+deploy", "", Utc::now())?;
//! let id = entries.insert(&entry)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::db::Db;
use crate::libs::entry::{add_property, from_storage, to_storage, NewEntry, PointEvent, PROP_PUSHED, PROP_TASK, PROP_URL, TASK_DELIMITER};
use crate::libs::interval::midnight;
use anyhow::Result;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const INSERT_ENTRY: &str = "INSERT INTO entry (project, note, entry_datetime) VALUES (?1, ?2, ?3)";
const INSERT_PROPERTY: &str = "INSERT INTO property (entry_uid, name, value) VALUES (?1, ?2, ?3)";
const SELECT_RANGE: &str = "SELECT uid, project, entry_datetime FROM entry
    WHERE entry_datetime BETWEEN ?1 AND ?2
    ORDER BY entry_datetime, uid";
const SELECT_RANGE_BY_PROJECT: &str = "SELECT uid, project, entry_datetime FROM entry
    WHERE entry_datetime BETWEEN ?1 AND ?2 AND project = ?3
    ORDER BY entry_datetime, uid";
const SELECT_FIRST: &str = "SELECT uid FROM entry ORDER BY entry_datetime ASC, uid ASC LIMIT 1";
const SELECT_LAST: &str = "SELECT uid FROM entry ORDER BY entry_datetime DESC, uid DESC LIMIT 1";
const SELECT_COUNT: &str = "SELECT COUNT(*) FROM entry";
const SELECT_UNPUSHED: &str = "SELECT uid FROM entry
    WHERE uid IN (SELECT entry_uid FROM property WHERE name = 'ticket' AND TRIM(value) != '')
    AND uid NOT IN (SELECT entry_uid FROM property WHERE name = 'pushed' AND TRIM(value) != '')
    ORDER BY entry_datetime, uid";
const LOAD_CHUNK: usize = 500;
const DELETE_PROPERTY: &str = "DELETE FROM property WHERE entry_uid = ?1 AND name = ?2";

/// Header row of a purge archive.
pub const ARCHIVE_HEADER: [&str; 6] = ["uid", "project", "note", "entry_date_time", "name", "value"];

/// Id, project and timestamp of an entry, without properties.
#[derive(Debug, Clone, PartialEq)]
pub struct DistinctEntry {
    pub id: i64,
    pub project: String,
    pub timestamp: DateTime<Utc>,
}

/// Partial update of an entry; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryUpdate {
    pub project: Option<String>,
    pub note: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    /// Replaces every task, `project+task` style separators split it into several.
    pub task: Option<String>,
    /// Replaces the url, an empty string removes it.
    pub url: Option<String>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The event as it will read once the update is stored.
    pub fn apply_to(&self, event: &PointEvent) -> PointEvent {
        let mut updated = event.clone();
        if let Some(project) = &self.project {
            updated.project = project.clone();
        }
        if let Some(note) = &self.note {
            updated.note = note.clone();
        }
        if let Some(timestamp) = self.timestamp {
            updated.timestamp = timestamp;
        }
        if let Some(task) = &self.task {
            updated.properties.retain(|p| !p.name.eq_ignore_ascii_case(PROP_TASK));
            for piece in task.split(TASK_DELIMITER).map(str::trim).filter(|t| !t.is_empty()) {
                add_property(&mut updated.properties, PROP_TASK, piece);
            }
        }
        if let Some(url) = &self.url {
            updated.properties.retain(|p| !p.name.eq_ignore_ascii_case(PROP_URL));
            if !url.trim().is_empty() {
                add_property(&mut updated.properties, PROP_URL, url.trim());
            }
        }
        updated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeScope {
    All,
    /// Everything stamped before the start of the given year (local time).
    PriorYears(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub path: PathBuf,
    pub compress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeOutcome {
    pub deleted: usize,
    pub archive: Option<PathBuf>,
}

type RawRow = (i64, String, Option<String>, String, Option<String>, Option<String>);

pub struct Entries {
    pub conn: Arc<Mutex<Connection>>,
}

impl Entries {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(db.conn)),
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let db = Db::open(path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(db.conn)),
        })
    }

    /// Stores the entry and its properties in one transaction.
    pub fn insert(&self, entry: &NewEntry) -> Result<i64> {
        let mut conn_guard = self.conn.lock();
        let tx = conn_guard.transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(INSERT_ENTRY, params![entry.project, entry.note, to_storage(&entry.timestamp)])?;
        let id = tx.last_insert_rowid();
        for property in &entry.properties {
            tx.execute(INSERT_PROPERTY, params![id, property.name, property.value])?;
        }

        tx.commit()?;
        Ok(id)
    }

    /// Entries with `start <= timestamp <= end`, ordered by time then id.
    pub fn query_by_time_range(&self, start: &DateTime<Utc>, end: &DateTime<Utc>, project: Option<&str>) -> Result<Vec<DistinctEntry>> {
        let conn_guard = self.conn.lock();
        let (start, end) = (to_storage(start), to_storage(end));

        let raw: Vec<(i64, String, String)> = match project {
            Some(project) => {
                let mut stmt = conn_guard.prepare(SELECT_RANGE_BY_PROJECT)?;
                let rows = stmt.query_map(params![start, end, project], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn_guard.prepare(SELECT_RANGE)?;
                let rows = stmt.query_map(params![start, end], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        let mut entries = Vec::with_capacity(raw.len());
        for (id, project, timestamp) in raw {
            entries.push(DistinctEntry {
                id,
                project,
                timestamp: from_storage(id, &timestamp)?,
            });
        }
        Ok(entries)
    }

    /// Full events for `ids`, ordered by time then id.
    pub fn load_full(&self, ids: &[i64]) -> Result<Vec<PointEvent>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut raw: Vec<RawRow> = Vec::new();
        {
            let conn_guard = self.conn.lock();
            // Chunks stay below SQLite's bound-parameter limit.
            for chunk in ids.chunks(LOAD_CHUNK) {
                let placeholders = vec!["?"; chunk.len()].join(", ");
                let sql = format!(
                    "SELECT e.uid, e.project, e.note, e.entry_datetime, p.name, p.value
                    FROM entry e LEFT JOIN property p ON p.entry_uid = e.uid
                    WHERE e.uid IN ({})
                    ORDER BY e.entry_datetime, e.uid, p.rowid",
                    placeholders
                );
                let mut stmt = conn_guard.prepare(&sql)?;
                let rows = stmt.query_map(params_from_iter(chunk.iter()), |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?))
                })?;
                raw.extend(rows.collect::<Result<Vec<_>, _>>()?);
            }
        }

        let mut events: Vec<PointEvent> = Vec::new();
        for (id, project, note, timestamp, name, value) in raw {
            let is_new = events.last().map(|e| e.id != id).unwrap_or(true);
            if is_new {
                events.push(PointEvent {
                    id,
                    project,
                    note: note.unwrap_or_default(),
                    timestamp: from_storage(id, &timestamp)?,
                    properties: Vec::new(),
                });
            }
            if let (Some(name), Some(value), Some(event)) = (name, value, events.last_mut()) {
                add_property(&mut event.properties, &name, &value);
            }
        }

        Ok(events)
    }

    pub fn fetch_range(&self, start: &DateTime<Utc>, end: &DateTime<Utc>, project: Option<&str>) -> Result<Vec<PointEvent>> {
        let ids: Vec<i64> = self.query_by_time_range(start, end, project)?.iter().map(|e| e.id).collect();
        self.load_full(&ids)
    }

    /// Every entry stamped on `date` as seen in `tz`.
    pub fn fetch_day<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Result<Vec<PointEvent>> {
        let (start, end) = day_bounds(date, date, tz)?;
        self.fetch_range(&start, &end, None)
    }

    pub fn get(&self, id: i64) -> Result<Option<PointEvent>> {
        Ok(self.load_full(&[id])?.into_iter().next())
    }

    pub fn first(&self) -> Result<Option<PointEvent>> {
        self.edge(SELECT_FIRST)
    }

    pub fn last(&self) -> Result<Option<PointEvent>> {
        self.edge(SELECT_LAST)
    }

    fn edge(&self, sql: &str) -> Result<Option<PointEvent>> {
        let id: Option<i64> = {
            let conn_guard = self.conn.lock();
            conn_guard.query_row(sql, [], |row| row.get(0)).optional()?
        };
        match id {
            Some(id) => self.get(id),
            None => Ok(None),
        }
    }

    pub fn count(&self) -> Result<i64> {
        let conn_guard = self.conn.lock();
        Ok(conn_guard.query_row(SELECT_COUNT, [], |row| row.get(0))?)
    }

    /// Applies the set fields of `update` to entry `id` in one transaction.
    pub fn update_fields(&self, id: i64, update: &EntryUpdate) -> Result<()> {
        let mut conn_guard = self.conn.lock();
        let tx = conn_guard.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if let Some(project) = &update.project {
            tx.execute("UPDATE entry SET project = ?1 WHERE uid = ?2", params![project, id])?;
        }
        if let Some(note) = &update.note {
            tx.execute("UPDATE entry SET note = ?1 WHERE uid = ?2", params![note, id])?;
        }
        if let Some(timestamp) = &update.timestamp {
            tx.execute("UPDATE entry SET entry_datetime = ?1 WHERE uid = ?2", params![to_storage(timestamp), id])?;
        }
        if let Some(task) = &update.task {
            tx.execute(DELETE_PROPERTY, params![id, PROP_TASK])?;
            for piece in task.split(TASK_DELIMITER).map(str::trim).filter(|t| !t.is_empty()) {
                tx.execute(INSERT_PROPERTY, params![id, PROP_TASK, piece])?;
            }
        }
        if let Some(url) = &update.url {
            tx.execute(DELETE_PROPERTY, params![id, PROP_URL])?;
            if !url.trim().is_empty() {
                tx.execute(INSERT_PROPERTY, params![id, PROP_URL, url.trim()])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Records the current instant as the entry's push time.
    pub fn mark_pushed(&self, id: i64) -> Result<()> {
        let mut conn_guard = self.conn.lock();
        let tx = conn_guard.transaction()?;
        tx.execute(DELETE_PROPERTY, params![id, PROP_PUSHED])?;
        tx.execute(INSERT_PROPERTY, params![id, PROP_PUSHED, to_storage(&Utc::now())])?;
        tx.commit()?;
        Ok(())
    }

    /// Ticketed entries that were never pushed.
    pub fn unpushed(&self) -> Result<Vec<PointEvent>> {
        let ids: Vec<i64> = {
            let conn_guard = self.conn.lock();
            let mut stmt = conn_guard.prepare(SELECT_UNPUSHED)?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        self.load_full(&ids)
    }

    pub fn count_purgeable(&self, scope: PurgeScope) -> Result<i64> {
        let (condition, args) = purge_condition(scope)?;
        let conn_guard = self.conn.lock();
        let sql = format!("SELECT COUNT(*) FROM entry WHERE {}", condition);
        Ok(conn_guard.query_row(&sql, params_from_iter(args.iter()), |row| row.get(0))?)
    }

    /// Deletes every entry in `scope`, optionally writing them to a CSV archive first.
    ///
    /// Nothing is deleted when the archive cannot be written.
    pub fn bulk_delete(&self, scope: PurgeScope, archive: Option<&ArchiveOptions>) -> Result<PurgeOutcome> {
        let (condition, args) = purge_condition(scope)?;
        let mut conn_guard = self.conn.lock();
        let tx = conn_guard.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let archive_path = match archive {
            Some(options) => {
                let sql = format!(
                    "SELECT e.uid, e.project, e.note, e.entry_datetime, p.name, p.value
                    FROM entry e LEFT JOIN property p ON p.entry_uid = e.uid
                    WHERE {}
                    ORDER BY e.entry_datetime, e.uid, p.rowid",
                    condition.replace("entry_datetime", "e.entry_datetime")
                );
                let rows: Vec<RawRow> = {
                    let mut stmt = tx.prepare(&sql)?;
                    let mapped = stmt.query_map(params_from_iter(args.iter()), |row| {
                        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?))
                    })?;
                    mapped.collect::<Result<Vec<_>, _>>()?
                };
                Some(write_archive(&rows, options)?)
            }
            None => None,
        };

        tx.execute(
            &format!("DELETE FROM property WHERE entry_uid IN (SELECT uid FROM entry WHERE {})", condition),
            params_from_iter(args.iter()),
        )?;
        let deleted = tx.execute(&format!("DELETE FROM entry WHERE {}", condition), params_from_iter(args.iter()))?;

        tx.commit()?;
        Ok(PurgeOutcome {
            deleted,
            archive: archive_path,
        })
    }
}

/// UTC bounds covering `from` through `to` inclusive, as calendar days in `tz`.
pub fn day_bounds<Tz: TimeZone>(from: NaiveDate, to: NaiveDate, tz: &Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = midnight(from, tz).ok_or_else(|| anyhow::anyhow!("No midnight on {}", from))?;
    let next = to
        .checked_add_days(Days::new(1))
        .ok_or_else(|| anyhow::anyhow!("Date out of range: {}", to))?;
    let end = midnight(next, tz).ok_or_else(|| anyhow::anyhow!("No midnight on {}", next))? - chrono::Duration::seconds(1);
    Ok((start, end))
}

fn purge_condition(scope: PurgeScope) -> Result<(&'static str, Vec<String>)> {
    match scope {
        PurgeScope::All => Ok(("1 = 1", Vec::new())),
        PurgeScope::PriorYears(year) => {
            let first_day = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| anyhow::anyhow!("Invalid year {}", year))?;
            let boundary = midnight(first_day, &chrono::Local).ok_or_else(|| anyhow::anyhow!("No midnight on {}", first_day))?;
            Ok(("entry_datetime < ?1", vec![to_storage(&boundary)]))
        }
    }
}

fn write_archive(rows: &[RawRow], options: &ArchiveOptions) -> Result<PathBuf> {
    let mut writer = csv::Writer::from_path(&options.path)?;
    writer.write_record(ARCHIVE_HEADER)?;
    for (id, project, note, timestamp, name, value) in rows {
        writer.write_record([
            id.to_string(),
            project.clone(),
            note.clone().unwrap_or_default(),
            timestamp.clone(),
            name.clone().unwrap_or_default(),
            value.clone().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    drop(writer);

    if !options.compress {
        return Ok(options.path.clone());
    }

    let mut gz_path = options.path.clone().into_os_string();
    gz_path.push(".gz");
    let gz_path = PathBuf::from(gz_path);

    let mut input = File::open(&options.path)?;
    let mut encoder = GzEncoder::new(File::create(&gz_path)?, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?;
    fs::remove_file(&options.path)?;

    Ok(gz_path)
}
