#[cfg(test)]
mod tests {
    use crate::config::DashboardConfig;
    use crate::model::log_entry::LogEntry;
    use crate::model::metrics::MetricInputs;
    use crate::model::rating::Rating;
    use crate::repository::{LogRepository, SessionLogRepository};
    use crate::service::session::DashboardSession;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> DashboardSession<SessionLogRepository> {
        DashboardSession::new(SessionLogRepository::new(), MetricInputs::default(), ymd(2025, 3, 12))
    }

    // Pre-seeded store standing in for a repository the session did not create.
    struct SeededRepo {
        entries: Vec<LogEntry>,
    }

    impl LogRepository for SeededRepo {
        fn append(&mut self, entry: LogEntry) {
            self.entries.push(entry);
        }
        fn entries(&self) -> &[LogEntry] {
            &self.entries
        }
    }

    #[test]
    fn test_result_tracks_inputs() {
        let mut session = session();
        assert!((session.result().oee - 0.8125).abs() < 1e-9);
        assert_eq!(session.rate(session.result().oee), Rating::Fair);

        session.update_inputs("down:0 good:800").unwrap();
        assert_eq!(session.inputs().downtime, 0.0);
        assert_eq!(session.result().availability, 1.0);
        assert_eq!(session.result().quality, 1.0);
    }

    #[test]
    fn test_bad_update_keeps_inputs() {
        let mut session = session();
        let before = *session.inputs();

        assert!(session.update_inputs("planned:600 total:lots").is_err());
        assert_eq!(*session.inputs(), before);
        assert!((session.result().oee - 0.8125).abs() < 1e-9);
    }

    #[test]
    fn test_empty_log_is_no_data() {
        let session = session();

        assert!(session.entries().is_empty());
        assert!(session.trend().is_none());
        assert!(session.summary().is_none());
        assert!(session.export_csv().unwrap().is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oee_log.csv");
        assert!(session.export_to(&path).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_uses_selected_date() {
        let mut session = session();
        let first = session.save();
        assert_eq!(first.date, ymd(2025, 3, 12));

        let date = session.select_log_date("2025-03-01").unwrap();
        assert_eq!(date, ymd(2025, 3, 1));
        let second = session.save();
        assert_eq!(second.date, ymd(2025, 3, 1));

        assert!(session.select_log_date("not a date").is_err());
        assert_eq!(session.log_date(), ymd(2025, 3, 1));
    }

    #[test]
    fn test_export_has_one_row_per_save() {
        let mut session = session();
        let dates = [ymd(2025, 3, 10), ymd(2025, 3, 8), ymd(2025, 3, 10), ymd(2025, 3, 9)];
        for (i, date) in dates.iter().enumerate() {
            session.set_log_date(*date);
            session.update_inputs(&format!("good:{}", 700 + i * 10)).unwrap();
            session.save();
        }

        let csv = session.export_csv().unwrap().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), dates.len() + 1);
        assert_eq!(lines[0], "Date,Availability,Performance,Quality,OEE");

        // Insertion order in the export.
        let exported: Vec<&str> = lines[1..].iter().map(|l| &l[..10]).collect();
        assert_eq!(exported, vec!["2025-03-10", "2025-03-08", "2025-03-10", "2025-03-09"]);

        // Date order (stable) in the trend.
        let trend = session.trend().unwrap();
        let trend_dates: Vec<NaiveDate> = trend.iter().map(|e| e.date).collect();
        assert_eq!(
            trend_dates,
            vec![ymd(2025, 3, 8), ymd(2025, 3, 9), ymd(2025, 3, 10), ymd(2025, 3, 10)]
        );
        assert!(trend[2].quality < trend[3].quality);
    }

    #[test]
    fn test_saved_entry_keeps_raw_performance() {
        let mut session = session();
        session.update_inputs("cycle:1 down:0 total:960 good:960").unwrap();
        let entry = session.save();

        assert!((entry.performance - 2.0).abs() < 1e-12);
        assert_eq!(entry.oee, 1.0);
        assert_eq!(entry.availability, 1.0);

        let csv = session.export_csv().unwrap().unwrap();
        let row: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(row, vec!["2025-03-12", "100.00", "200.00", "100.00", "100.00"]);
    }

    #[test]
    fn test_export_to_file() {
        let mut session = session();
        session.save();
        session.save();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let written = session.export_to(&path).unwrap();

        assert_eq!(written.as_deref(), Some(path.as_path()));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_session_over_custom_repository() {
        let seeded = LogEntry {
            date: ymd(2025, 1, 1),
            availability: 0.5,
            performance: 0.5,
            quality: 0.5,
            oee: 0.125,
        };
        let repo = SeededRepo { entries: vec![seeded] };
        let mut session = DashboardSession::new(repo, MetricInputs::default(), ymd(2025, 1, 2));
        session.save();

        let summary = session.summary().unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.worst.date, ymd(2025, 1, 1));
        assert_eq!(summary.best.date, ymd(2025, 1, 2));
    }

    #[test]
    fn test_from_config_applies_defaults_and_thresholds() {
        let mut config = DashboardConfig::default();
        config.defaults.total_units = 0;
        config.thresholds.fair = 0.0;
        config.thresholds.good = 0.0;

        let session = DashboardSession::from_config(&config);
        assert_eq!(session.inputs().total_units, 0);
        assert_eq!(session.result().quality, 0.0);
        assert_eq!(session.rate(0.0), Rating::Good);
    }
}
