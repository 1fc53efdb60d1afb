#[cfg(test)]
mod tests {
    use lapclock::libs::config::{Preferences, PreferencesStore, Theme, PREFERENCES_FILE_NAME};
    use lapclock::libs::data_storage::DataStorage;
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // Tests in this file share the process environment.
    static ENV_LOCK: Mutex<()> = const_mutex(());

    fn isolated_home() -> (TempDir, MutexGuard<'static, ()>) {
        let guard = ENV_LOCK.lock();
        let temp_dir = tempfile::tempdir().unwrap();
        std::env::set_var("HOME", temp_dir.path());
        std::env::set_var("LOCALAPPDATA", temp_dir.path());
        (temp_dir, guard)
    }

    /// Points the data directory at a fresh temporary home for each test.
    struct PrefsTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
        title: String,
    }

    impl TestContext for PrefsTestContext {
        fn setup() -> Self {
            let (temp_dir, guard) = isolated_home();
            PrefsTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
                title: "Track session".to_string(),
            }
        }
    }

    fn write_raw(content: &str) {
        let path = DataStorage::new().get_path(PREFERENCES_FILE_NAME).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test_context(PrefsTestContext)]
    #[test]
    fn test_read_missing_preferences(_ctx: &mut PrefsTestContext) {
        assert_eq!(Preferences::read(), Preferences::default());
    }

    #[test_context(PrefsTestContext)]
    #[test]
    fn test_save_and_read_preferences(ctx: &mut PrefsTestContext) {
        let prefs = Preferences {
            title: Some(ctx.title.clone()),
            theme: Some(Theme::Light),
            font: Some("Fira Mono".to_string()),
        };
        prefs.save().unwrap();

        assert_eq!(Preferences::read(), prefs);
    }

    #[test_context(PrefsTestContext)]
    #[test]
    fn test_absent_keys_are_not_written(ctx: &mut PrefsTestContext) {
        let prefs = Preferences {
            title: Some(ctx.title.clone()),
            ..Default::default()
        };
        prefs.save().unwrap();

        let path = DataStorage::new().peek_path(PREFERENCES_FILE_NAME);
        let saved = fs::read_to_string(path).unwrap();
        assert!(saved.contains("\"title\": \"Track session\""));
        assert!(!saved.contains("theme"));
        assert!(!saved.contains("font"));
    }

    #[test_context(PrefsTestContext)]
    #[test]
    fn test_theme_serialized_lowercase(_ctx: &mut PrefsTestContext) {
        write_raw(r#"{ "theme": "light" }"#);
        assert_eq!(Preferences::read().theme, Some(Theme::Light));
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test_context(PrefsTestContext)]
    #[test]
    fn test_corrupt_preferences_fall_back_to_default(_ctx: &mut PrefsTestContext) {
        write_raw("{ not json");
        assert_eq!(Preferences::read(), Preferences::default());
    }

    #[test_context(PrefsTestContext)]
    #[test]
    fn test_unknown_theme_falls_back_to_default(_ctx: &mut PrefsTestContext) {
        write_raw(r#"{ "theme": "solarized" }"#);
        assert_eq!(Preferences::read(), Preferences::default());
    }

    #[test_context(PrefsTestContext)]
    #[test]
    fn test_delete_preferences(ctx: &mut PrefsTestContext) {
        assert!(!Preferences::delete().unwrap());

        Preferences {
            title: Some(ctx.title.clone()),
            ..Default::default()
        }
        .save()
        .unwrap();
        assert!(Preferences::delete().unwrap());
        assert_eq!(Preferences::read(), Preferences::default());
    }

    #[tokio::test]
    async fn test_store_broadcasts_saved_preferences() {
        let (_temp_dir, _guard) = isolated_home();
        let store = PreferencesStore::new();
        let mut first = store.subscribe();
        let mut second = store.clone().subscribe();

        let prefs = Preferences {
            theme: Some(Theme::Light),
            ..Default::default()
        };
        store.save(&prefs).unwrap();

        let received = tokio::time::timeout(Duration::from_secs(1), first.recv()).await.unwrap().unwrap();
        assert_eq!(received, prefs);
        assert_eq!(second.recv().await.unwrap(), prefs);
        assert_eq!(store.load(), prefs);
    }

    #[tokio::test]
    async fn test_store_save_without_subscribers() {
        let (_temp_dir, _guard) = isolated_home();
        let store = PreferencesStore::new();
        store.save(&Preferences::default()).unwrap();
        assert_eq!(store.load(), Preferences::default());
    }
}
