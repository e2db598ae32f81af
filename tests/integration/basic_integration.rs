/// Basic integration tests
use mood_tracker_mcp::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn log(server: &MoodTrackerServer, mood: i64, user: Option<&str>) {
        let params = LogMoodParams {
            mood,
            note: None,
            detection_method: None,
            user_id: user.map(str::to_string),
        };
        log_mood(server.storage(), &server.request_context(), params).expect("Failed to log mood");
    }

    #[tokio::test]
    async fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let server = MoodTrackerServer::new(db_path.clone())
            .await
            .expect("Failed to create first server");
        log(&server, 6, None);
        log(&server, 8, None);
        drop(server);

        // Entries survive reopening the same file
        let server = MoodTrackerServer::new(db_path)
            .await
            .expect("Failed to create second server");
        let entries = server.storage().load(None).expect("Failed to load");
        assert_eq!(entries.len(), 2);
        assert_eq!(rolling_average(&entries, DEFAULT_ROLLING_WINDOW), 7.0);
    }

    #[tokio::test]
    async fn test_default_user_scopes_calls() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let user = UserId::new("user_1").unwrap();
        let server = MoodTrackerServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server")
            .with_default_user(Some(user.clone()));

        log(&server, 5, None);
        log(&server, 9, Some("user_2"));

        assert_eq!(server.default_user(), Some(&user));
        assert_eq!(server.storage().load(Some(&user)).unwrap().len(), 1);
        assert!(server.storage().load(None).unwrap().is_empty());

        let stats = get_mood_stats(
            server.storage(),
            &server.request_context(),
            StatsParams { user_id: Some("user_2".to_string()), window: None },
        )
        .unwrap();
        assert_eq!(stats.summary.today_mood, Some(9));
        assert_eq!(stats.summary.streak, 1);
    }

    #[tokio::test]
    async fn test_clear_then_export() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = MoodTrackerServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server");
        let ctx = server.request_context();

        log(&server, 4, None);
        log(&server, 4, None);

        let refused = clear_moods(server.storage(), &ctx, ClearParams { user_id: None, confirm: false });
        assert!(matches!(refused, Err(ToolError::ConfirmationRequired)));

        let cleared = clear_moods(server.storage(), &ctx, ClearParams { user_id: None, confirm: true }).unwrap();
        assert_eq!(cleared.removed, 2);

        let export = export_moods(server.storage(), &ctx, ExportParams { user_id: None }).unwrap();
        assert_eq!(export.count, 0);
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");

        let _: &dyn EntryStore = &storage;
        assert!(storage.load(None).unwrap().is_empty());
    }
}
