#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{DateTime, TimeZone, Utc};
    use chronolog::api::WorklogSink;
    use chronolog::db::entries::Entries;
    use chronolog::libs::entry::{HasProperties, NewEntry, PointEvent, Property, DAY_START, PROP_PUSHED, PROP_TICKET};
    use chronolog::libs::error::TrackerError;
    use chronolog::libs::interval::reconstruct_intervals;
    use chronolog::libs::push::{build_push_payloads, is_eligible, jira_timestamp, push_all, PushRequest, PushResponse};
    use std::sync::Mutex;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct PushTestContext {
        _temp_dir: TempDir,
        entries: Entries,
    }

    impl AsyncTestContext for PushTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let entries = Entries::open(&temp_dir.path().join("push.db")).unwrap();
            PushTestContext {
                _temp_dir: temp_dir,
                entries,
            }
        }
    }

    /// Answers with the queued statuses in order and records what it was sent.
    struct FakeSink {
        statuses: Mutex<Vec<u16>>,
        sent: Mutex<Vec<i64>>,
    }

    impl FakeSink {
        fn new(statuses: &[u16]) -> Self {
            Self {
                statuses: Mutex::new(statuses.iter().rev().copied().collect()),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl WorklogSink for FakeSink {
        async fn send(&self, request: &PushRequest) -> Result<PushResponse> {
            self.sent.lock().unwrap().push(request.entry_id);
            match self.statuses.lock().unwrap().pop() {
                Some(status) => Ok(PushResponse {
                    status,
                    body: format!("status {}", status),
                }),
                None => Err(anyhow::anyhow!("connection refused")),
            }
        }
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, hour, minute, 0).unwrap()
    }

    fn event(id: i64, project: &str, timestamp: DateTime<Utc>, properties: &[(&str, &str)]) -> PointEvent {
        PointEvent {
            id,
            project: project.to_string(),
            note: "worked".to_string(),
            timestamp,
            properties: properties.iter().map(|(n, v)| Property::new(n, v)).collect(),
        }
    }

    /// Stores a day start at 09:00 and three ticketed entries one hour apart.
    fn seed(entries: &Entries) -> Vec<PushRequest> {
        entries.insert(&NewEntry::day_start(at(9, 0))).unwrap();
        for (hour, ticket) in [(10, "API-1"), (11, "API-2"), (12, "API-3")] {
            let entry = NewEntry::from_project_task("api+work", "worked", at(hour, 0))
                .unwrap()
                .with_property(PROP_TICKET, ticket);
            entries.insert(&entry).unwrap();
        }
        let events = entries.fetch_range(&at(0, 0), &at(23, 59), None).unwrap();
        build_push_payloads(&reconstruct_intervals(&events, &Utc), 15)
    }

    #[test]
    fn test_eligibility() {
        let events = vec![
            event(1, DAY_START, at(9, 0), &[]),
            event(2, "api", at(10, 0), &[(PROP_TICKET, "API-1")]),
            event(3, "api", at(11, 0), &[(PROP_TICKET, "API-2"), (PROP_PUSHED, "2025-01-15T12:00:00Z")]),
            event(4, "api", at(12, 0), &[(PROP_TICKET, "  ")]),
            event(5, "misc", at(13, 0), &[]),
            event(6, "api", at(14, 0), &[(PROP_TICKET, "API-3"), (PROP_PUSHED, "")]),
        ];
        let intervals = reconstruct_intervals(&events, &Utc);

        let eligible: Vec<i64> = intervals.iter().filter(|i| is_eligible(i)).map(|i| i.id).collect();
        assert_eq!(eligible, vec![2, 6]);
    }

    #[test]
    fn test_payload_contents() {
        let events = vec![
            event(1, DAY_START, at(9, 0), &[]),
            event(2, "api", at(9, 50), &[(PROP_TICKET, "API-1")]),
        ];
        let requests = build_push_payloads(&reconstruct_intervals(&events, &Utc), 15);

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].entry_id, 2);
        assert_eq!(requests[0].ticket, "API-1");
        assert_eq!(requests[0].payload.started, "2025-01-15T09:00:00.000+0000");
        // 50 minutes: 5 minutes into a bucket, rounded down
        assert_eq!(requests[0].payload.time_spent_seconds, 2700);

        let json = serde_json::to_value(&requests[0].payload).unwrap();
        assert_eq!(json["timeSpentSeconds"], 2700);
        assert_eq!(json["started"], "2025-01-15T09:00:00.000+0000");
        assert_eq!(json["comment"]["type"], "doc");
        assert_eq!(json["comment"]["version"], 1);
        assert_eq!(json["comment"]["content"][0]["type"], "paragraph");
        assert_eq!(json["comment"]["content"][0]["content"][0]["type"], "text");
        assert_eq!(json["comment"]["content"][0]["content"][0]["text"], "worked");
    }

    #[test]
    fn test_jira_timestamp_layout() {
        assert_eq!(jira_timestamp(&at(7, 5)), "2025-01-15T07:05:00.000+0000");
    }

    #[test]
    fn test_split_interval_yields_two_payloads() {
        let events = vec![
            event(1, DAY_START, Utc.with_ymd_and_hms(2025, 1, 14, 23, 0, 0).unwrap(), &[]),
            event(2, "api", at(1, 0), &[(PROP_TICKET, "API-1")]),
        ];
        let requests = build_push_payloads(&reconstruct_intervals(&events, &Utc), 15);

        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.entry_id == 2));
        assert_eq!(requests[0].payload.started, "2025-01-14T23:00:00.000+0000");
        assert_eq!(requests[1].payload.started, "2025-01-15T00:00:00.000+0000");
    }

    #[test_context(PushTestContext)]
    #[tokio::test]
    async fn test_push_marks_each_created_entry(ctx: &mut PushTestContext) {
        let requests = seed(&ctx.entries);
        assert_eq!(requests.len(), 3);

        let sink = FakeSink::new(&[201, 201, 201]);
        let pushed = push_all(&sink, &ctx.entries, &requests).await.unwrap();

        assert_eq!(pushed, 3);
        assert!(ctx.entries.unpushed().unwrap().is_empty());
        for request in &requests {
            let stored = ctx.entries.get(request.entry_id).unwrap().unwrap();
            assert!(stored.pushed().is_some());
        }
    }

    #[test_context(PushTestContext)]
    #[tokio::test]
    async fn test_push_stops_at_first_rejection(ctx: &mut PushTestContext) {
        let requests = seed(&ctx.entries);
        let sink = FakeSink::new(&[201, 500, 201]);

        let err = push_all(&sink, &ctx.entries, &requests).await.unwrap_err();

        match err.downcast_ref::<TrackerError>() {
            Some(TrackerError::PushRejected { entry_id, status, .. }) => {
                assert_eq!(*entry_id, requests[1].entry_id);
                assert_eq!(*status, 500);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(*sink.sent.lock().unwrap(), vec![requests[0].entry_id, requests[1].entry_id]);

        let unpushed: Vec<i64> = ctx.entries.unpushed().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(unpushed, vec![requests[1].entry_id, requests[2].entry_id]);
    }

    #[test_context(PushTestContext)]
    #[tokio::test]
    async fn test_push_transport_error_marks_nothing(ctx: &mut PushTestContext) {
        let requests = seed(&ctx.entries);
        let sink = FakeSink::new(&[]);

        let err = push_all(&sink, &ctx.entries, &requests).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TrackerError>(),
            Some(TrackerError::PushTransport { entry_id, .. }) if *entry_id == requests[0].entry_id
        ));
        assert_eq!(ctx.entries.unpushed().unwrap().len(), 3);
    }

    #[test_context(PushTestContext)]
    #[tokio::test]
    async fn test_pushed_entries_are_not_offered_again(ctx: &mut PushTestContext) {
        let requests = seed(&ctx.entries);
        push_all(&FakeSink::new(&[201, 201, 201]), &ctx.entries, &requests).await.unwrap();

        let events = ctx.entries.fetch_range(&at(0, 0), &at(23, 59), None).unwrap();
        assert!(build_push_payloads(&reconstruct_intervals(&events, &Utc), 15).is_empty());
    }
}
