#[cfg(test)]
mod tests {
    use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
    use chronolog::db::entries::{day_bounds, ArchiveOptions, Entries, EntryUpdate, PurgeScope, ARCHIVE_HEADER};
    use chronolog::libs::entry::{HasProperties, NewEntry, PROP_TICKET, PROP_URL};
    use chronolog::libs::error::TrackerError;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct EntriesTestContext {
        temp_dir: TempDir,
        entries: Entries,
    }

    impl TestContext for EntriesTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let entries = Entries::open(&temp_dir.path().join("entries.db")).unwrap();
            EntriesTestContext { temp_dir, entries }
        }
    }

    impl EntriesTestContext {
        fn path(&self, name: &str) -> PathBuf {
            self.temp_dir.path().join(name)
        }
    }

    fn at(year: i32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, day, hour, minute, 0).unwrap()
    }

    fn add(entries: &Entries, project_task: &str, timestamp: DateTime<Utc>) -> i64 {
        let entry = NewEntry::from_project_task(project_task, "", timestamp).unwrap();
        entries.insert(&entry).unwrap()
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_insert_and_load_with_properties(ctx: &mut EntriesTestContext) {
        let entry = NewEntry::from_project_task("website+deploy+review", "release 1.2", at(2025, 15, 10, 0))
            .unwrap()
            .with_property(PROP_TICKET, "WEB-12")
            .with_property(PROP_URL, "https://example.com/pr/1");
        let id = ctx.entries.insert(&entry).unwrap();

        let stored = ctx.entries.get(id).unwrap().unwrap();
        assert_eq!(stored.project, "website");
        assert_eq!(stored.note, "release 1.2");
        assert_eq!(stored.timestamp, at(2025, 15, 10, 0));
        assert_eq!(stored.tasks(), vec!["deploy", "review"]);
        assert_eq!(stored.ticket(), Some("WEB-12"));
        assert_eq!(stored.url(), Some("https://example.com/pr/1"));
        assert_eq!(stored.pushed(), None);
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_duplicate_properties_suppressed(ctx: &mut EntriesTestContext) {
        let id = add(&ctx.entries, "website+deploy+Deploy+deploy", at(2025, 15, 10, 0));

        let stored = ctx.entries.get(id).unwrap().unwrap();
        assert_eq!(stored.tasks(), vec!["deploy"]);
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_range_is_inclusive_and_ordered(ctx: &mut EntriesTestContext) {
        let late = add(&ctx.entries, "a+x", at(2025, 15, 12, 0));
        let early = add(&ctx.entries, "b+x", at(2025, 15, 9, 0));
        let tie = add(&ctx.entries, "c+x", at(2025, 15, 12, 0));
        add(&ctx.entries, "d+x", at(2025, 16, 9, 0));

        let events = ctx.entries.fetch_range(&at(2025, 15, 9, 0), &at(2025, 15, 12, 0), None).unwrap();
        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![early, late, tie]);

        let only_a = ctx.entries.query_by_time_range(&at(2025, 15, 0, 0), &at(2025, 15, 23, 0), Some("a")).unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].id, late);
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_entries_without_properties_load(ctx: &mut EntriesTestContext) {
        let id = ctx.entries.insert(&NewEntry::break_time("", at(2025, 15, 12, 0))).unwrap();

        let stored = ctx.entries.get(id).unwrap().unwrap();
        assert!(stored.is_break());
        assert!(stored.properties.is_empty());
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_first_last_count(ctx: &mut EntriesTestContext) {
        assert_eq!(ctx.entries.count().unwrap(), 0);
        assert!(ctx.entries.first().unwrap().is_none());

        let second = add(&ctx.entries, "a+x", at(2025, 16, 9, 0));
        let first = add(&ctx.entries, "b+x", at(2025, 15, 9, 0));

        assert_eq!(ctx.entries.count().unwrap(), 2);
        assert_eq!(ctx.entries.first().unwrap().unwrap().id, first);
        assert_eq!(ctx.entries.last().unwrap().unwrap().id, second);
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_update_fields_matches_preview(ctx: &mut EntriesTestContext) {
        let entry = NewEntry::from_project_task("website+deploy", "old", at(2025, 15, 10, 0))
            .unwrap()
            .with_property(PROP_URL, "https://old.example.com")
            .with_property(PROP_TICKET, "WEB-1");
        let id = ctx.entries.insert(&entry).unwrap();
        let before = ctx.entries.get(id).unwrap().unwrap();

        let update = EntryUpdate {
            project: Some("api".to_string()),
            note: Some("new".to_string()),
            timestamp: Some(at(2025, 15, 11, 0)),
            task: Some("fix+test".to_string()),
            url: Some(String::new()),
        };
        let preview = update.apply_to(&before);
        ctx.entries.update_fields(id, &update).unwrap();
        let after = ctx.entries.get(id).unwrap().unwrap();

        assert_eq!(after.project, "api");
        assert_eq!(after.note, "new");
        assert_eq!(after.timestamp, at(2025, 15, 11, 0));
        assert_eq!(after.tasks(), vec!["fix", "test"]);
        assert_eq!(after.url(), None);
        assert_eq!(after.ticket(), Some("WEB-1"));
        assert_eq!(preview.project, after.project);
        assert_eq!(preview.tasks(), after.tasks());
        assert_eq!(preview.url(), after.url());
    }

    #[test]
    fn test_empty_update() {
        assert!(EntryUpdate::default().is_empty());
        assert!(!EntryUpdate {
            note: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_mark_pushed_and_unpushed(ctx: &mut EntriesTestContext) {
        let ticketed = ctx
            .entries
            .insert(&NewEntry::from_project_task("api+x", "", at(2025, 15, 10, 0)).unwrap().with_property(PROP_TICKET, "API-1"))
            .unwrap();
        add(&ctx.entries, "misc+x", at(2025, 15, 11, 0));

        let unpushed: Vec<i64> = ctx.entries.unpushed().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(unpushed, vec![ticketed]);

        ctx.entries.mark_pushed(ticketed).unwrap();
        ctx.entries.mark_pushed(ticketed).unwrap();

        let stored = ctx.entries.get(ticketed).unwrap().unwrap();
        assert_eq!(stored.property_values("pushed").len(), 1);
        assert!(ctx.entries.unpushed().unwrap().is_empty());
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_malformed_timestamp_is_reported(ctx: &mut EntriesTestContext) {
        {
            let conn = ctx.entries.conn.lock();
            conn.execute(
                "INSERT INTO entry (project, note, entry_datetime) VALUES ('broken', '', '2025-01-15T10:00:00Z-garbage')",
                [],
            )
            .unwrap();
        }

        let err = ctx.entries.first().unwrap_err();
        match err.downcast_ref::<TrackerError>() {
            Some(TrackerError::MalformedTimestamp { value, .. }) => assert_eq!(value, "2025-01-15T10:00:00Z-garbage"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_purge_prior_years(ctx: &mut EntriesTestContext) {
        let year = Local::now().year();
        add(&ctx.entries, "old+x", at(year - 2, 10, 12, 0));
        add(&ctx.entries, "old+y", at(year - 1, 10, 12, 0));
        let kept = add(&ctx.entries, "new+x", at(year, 10, 12, 0));

        assert_eq!(ctx.entries.count_purgeable(PurgeScope::PriorYears(year)).unwrap(), 2);
        let outcome = ctx.entries.bulk_delete(PurgeScope::PriorYears(year), None).unwrap();

        assert_eq!(outcome.deleted, 2);
        assert_eq!(outcome.archive, None);
        assert_eq!(ctx.entries.count().unwrap(), 1);
        assert_eq!(ctx.entries.first().unwrap().unwrap().id, kept);
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_purge_all_with_archive(ctx: &mut EntriesTestContext) {
        add(&ctx.entries, "website+deploy+review", at(2025, 15, 10, 0));
        ctx.entries.insert(&NewEntry::break_time("lunch", at(2025, 15, 12, 0))).unwrap();

        let options = ArchiveOptions {
            path: ctx.path("archive.csv"),
            compress: false,
        };
        let outcome = ctx.entries.bulk_delete(PurgeScope::All, Some(&options)).unwrap();

        assert_eq!(outcome.deleted, 2);
        assert_eq!(outcome.archive, Some(ctx.path("archive.csv")));
        assert_eq!(ctx.entries.count().unwrap(), 0);

        let mut reader = csv::Reader::from_path(ctx.path("archive.csv")).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, ARCHIVE_HEADER.to_vec());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        // two task rows for the first entry, one bare row for the break
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][1], "website");
        assert_eq!(&rows[0][4], "task");
        assert_eq!(&rows[2][2], "lunch");
        assert_eq!(&rows[2][4], "");
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_purge_compressed_archive(ctx: &mut EntriesTestContext) {
        add(&ctx.entries, "website+deploy", at(2025, 15, 10, 0));

        let options = ArchiveOptions {
            path: ctx.path("archive.csv"),
            compress: true,
        };
        let outcome = ctx.entries.bulk_delete(PurgeScope::All, Some(&options)).unwrap();

        let gz_path = ctx.path("archive.csv.gz");
        assert_eq!(outcome.archive, Some(gz_path.clone()));
        assert!(!ctx.path("archive.csv").exists());

        let mut content = String::new();
        GzDecoder::new(std::fs::File::open(gz_path).unwrap())
            .read_to_string(&mut content)
            .unwrap();
        assert!(content.starts_with("uid,project,note,entry_date_time,name,value"));
        assert!(content.contains("website"));
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_failed_archive_deletes_nothing(ctx: &mut EntriesTestContext) {
        add(&ctx.entries, "website+deploy", at(2025, 15, 10, 0));

        let options = ArchiveOptions {
            path: ctx.path("missing-dir/archive.csv"),
            compress: false,
        };
        assert!(ctx.entries.bulk_delete(PurgeScope::All, Some(&options)).is_err());
        assert_eq!(ctx.entries.count().unwrap(), 1);
    }

    #[test]
    fn test_day_bounds() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let (start, end) = day_bounds(day, day, &Utc).unwrap();
        assert_eq!(start, at(2025, 15, 0, 0));
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 15, 23, 59, 59).unwrap());

        let (_, week_end) = day_bounds(day, NaiveDate::from_ymd_opt(2025, 1, 21).unwrap(), &Utc).unwrap();
        assert_eq!(week_end, Utc.with_ymd_and_hms(2025, 1, 21, 23, 59, 59).unwrap());
    }

    #[test_context(EntriesTestContext)]
    #[test]
    fn test_fetch_day(ctx: &mut EntriesTestContext) {
        add(&ctx.entries, "a+x", at(2025, 14, 23, 59));
        let inside = add(&ctx.entries, "b+x", at(2025, 15, 0, 0));
        add(&ctx.entries, "c+x", at(2025, 16, 0, 0));

        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let events = ctx.entries.fetch_day(day, &Utc).unwrap();
        assert_eq!(events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![inside]);
    }
}
