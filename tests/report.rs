#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use chronolog::libs::config::ReportConfig;
    use chronolog::libs::entry::{PointEvent, Property, BREAK, DAY_START, PROP_PUSHED, PROP_TASK, PROP_TICKET};
    use chronolog::libs::formatter::DurationFormatter;
    use chronolog::libs::interval::{reconstruct_intervals, Interval};
    use chronolog::libs::report::{aggregate_by_day, aggregate_by_entry, aggregate_by_project, aggregate_by_task, totals, Totals};
    use chronolog::libs::sections::{build_report, totals_lines, TOTAL};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0).unwrap()
    }

    fn event(id: i64, project: &str, timestamp: DateTime<Utc>, properties: &[(&str, &str)]) -> PointEvent {
        PointEvent {
            id,
            project: project.to_string(),
            note: format!("note {}", id),
            timestamp,
            properties: properties.iter().map(|(n, v)| Property::new(n, v)).collect(),
        }
    }

    /// A working day: start 09:00, website 45m, break 15m, api 1h10m, website again 20m.
    fn sample_day() -> Vec<Interval> {
        let events = vec![
            event(1, DAY_START, at(15, 9, 0), &[]),
            event(2, "website", at(15, 9, 45), &[(PROP_TASK, "deploy")]),
            event(3, BREAK, at(15, 10, 0), &[]),
            event(4, "api", at(15, 11, 10), &[(PROP_TASK, "review"), (PROP_TICKET, "API-7")]),
            event(5, "website", at(15, 11, 30), &[(PROP_TASK, "fix"), (PROP_TASK, "deploy")]),
        ];
        reconstruct_intervals(&events, &Utc)
    }

    #[test]
    fn test_by_project_scenario() {
        let events = vec![event(1, DAY_START, at(15, 9, 0), &[]), event(2, "B", at(15, 9, 45), &[])];
        let rows = aggregate_by_project(&reconstruct_intervals(&events, &Utc), 15);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project, "B");
        assert_eq!(rows[0].duration, 2700);
        assert_eq!(DurationFormatter::new(15, false).format(rows[0].duration, true), "45 minutes 0 second");
    }

    #[test]
    fn test_by_project_merges_tasks_in_first_seen_order() {
        let rows = aggregate_by_project(&sample_day(), 15);

        let projects: Vec<&str> = rows.iter().map(|r| r.project.as_str()).collect();
        assert_eq!(projects, vec![BREAK, "api", "website"]);

        let website = rows.iter().find(|r| r.project == "website").unwrap();
        assert_eq!(website.tasks, "deploy, fix");
        // 45m plus 20m, each rounded on its own
        assert_eq!(website.duration, 2700 + 900);
    }

    #[test]
    fn test_no_row_for_day_start() {
        let intervals = sample_day();
        assert!(aggregate_by_project(&intervals, 15).iter().all(|r| r.project != DAY_START));
        assert!(aggregate_by_task(&intervals, 15).rows.iter().all(|r| r.projects != DAY_START));
        assert!(aggregate_by_entry(&intervals, 15, &Utc).rows.iter().all(|r| r.project != DAY_START));
        assert!(aggregate_by_day(&intervals, 15)
            .iter()
            .flat_map(|d| d.rows.iter())
            .all(|r| r.project != DAY_START));
    }

    #[test]
    fn test_project_and_entry_totals_agree() {
        let intervals = sample_day();
        for g in [0, 1, 5, 15, 30] {
            let by_project: i64 = aggregate_by_project(&intervals, g).iter().map(|r| r.duration).sum();
            let by_entry: i64 = aggregate_by_entry(&intervals, g, &Utc).rows.iter().map(|r| r.duration).sum();
            let by_day: i64 = aggregate_by_day(&intervals, g).iter().map(|d| d.total).sum();
            assert_eq!(by_project, by_entry, "g={}", g);
            assert_eq!(by_project, by_day, "g={}", g);
            assert_eq!(by_project, totals(&intervals, g).all(), "g={}", g);
        }
    }

    #[test]
    fn test_by_task_ticket_column() {
        let report = aggregate_by_task(&sample_day(), 15);

        assert!(report.has_tickets);
        let review = report.rows.iter().find(|r| r.task == "review").unwrap();
        assert_eq!(review.ticket.as_deref(), Some("API-7"));
        assert_eq!(review.projects, "api");

        let without = aggregate_by_task(&sample_day()[..1], 15);
        assert!(!without.has_tickets);
    }

    #[test]
    fn test_by_entry_pushed_column() {
        let events = vec![
            event(1, DAY_START, at(15, 9, 0), &[]),
            event(2, "api", at(15, 10, 0), &[(PROP_TICKET, "API-1"), (PROP_PUSHED, "2025-01-15T12:00:00Z")]),
            event(3, "api", at(15, 11, 0), &[(PROP_TICKET, "API-2")]),
            event(4, "misc", at(15, 12, 0), &[]),
        ];
        let report = aggregate_by_entry(&reconstruct_intervals(&events, &Utc), 15, &Utc);

        assert!(report.has_tickets);
        assert_eq!(report.rows[0].pushed.as_deref(), Some("2025-01-15T12:00:00Z"));
        assert_eq!(report.rows[1].pushed.as_deref(), Some("No"));
        assert_eq!(report.rows[2].pushed, None);
        assert_eq!(report.rows[1].start, at(15, 10, 0));
        assert_eq!(report.rows[1].end, at(15, 11, 0));
    }

    #[test]
    fn test_by_day_splits_at_midnight() {
        let events = vec![event(1, DAY_START, at(1, 23, 50), &[]), event(2, "C", at(2, 0, 10), &[])];
        let days = aggregate_by_day(&reconstruct_intervals(&events, &Utc), 0);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(days[0].rows[0].project, "C");
        assert_eq!(days[0].rows[0].duration, 600);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(days[1].rows[0].duration, 600);
    }

    #[test]
    fn test_totals_split_work_and_break() {
        let t = totals(&sample_day(), 15);
        assert_eq!(t.break_time, 900);
        // api's 70 minutes are 10 minutes into a bucket, below 80%
        assert_eq!(t.work, 2700 + 3600 + 900);
    }

    #[test]
    fn test_totals_lines() {
        let formatter = DurationFormatter::new(15, true);
        let t = Totals {
            work: 3600,
            break_time: 900,
        };

        let joined = totals_lines(&t, &ReportConfig::default(), &formatter);
        assert_eq!(joined, vec!["Total Time: 1h 15m 0s".to_string()]);

        let config = ReportConfig {
            split_work_from_break_time: true,
            ..ReportConfig::default()
        };
        let split = totals_lines(&t, &config, &formatter);
        assert_eq!(split, vec!["Total Working Time: 1h 0m 0s".to_string(), "  Total Break Time: 15m 0s".to_string()]);

        let long = Totals {
            work: 27 * 3600,
            break_time: 0,
        };
        assert_eq!(
            totals_lines(&long, &ReportConfig::default(), &formatter),
            vec!["Total Time: 27h 0m 0s (1 day 3 hours 0 minute 0 second)".to_string()]
        );
    }

    #[test]
    fn test_build_report_follows_section_switches() {
        let config = ReportConfig {
            by_task: false,
            by_entry: false,
            ..ReportConfig::default()
        };
        let output = build_report(&sample_day(), &config, 15, &Utc);

        let titles: Vec<&str> = output.tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["By Project", "By Day"]);
        assert_eq!(output.totals.len(), 1);

        let by_day = &output.tables[1];
        let total_row = by_day.rows.last().unwrap();
        assert_eq!(total_row[1], TOTAL);
    }

    #[test]
    fn test_build_report_shows_ticket_columns_only_when_needed() {
        let output = build_report(&sample_day(), &ReportConfig::default(), 15, &Utc);
        let by_task = output.tables.iter().find(|t| t.title == "By Task").unwrap();
        assert!(by_task.headers.contains(&"Ticket".to_string()));

        let plain = build_report(&sample_day()[..1], &ReportConfig::default(), 15, &Utc);
        let by_entry = plain.tables.iter().find(|t| t.title == "By Entry").unwrap();
        assert!(!by_entry.headers.contains(&"Pushed".to_string()));
    }
}
