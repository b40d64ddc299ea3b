//! Integration tests for preference persistence
//!
//! Tests the file-backed store and preference round-trips across restarts

use folio::app::AppServices;
use folio::config::AppConfig;
use folio::contact::EmailJsSettings;
use folio::prefs::{PreferenceStore, THEME_CONFIG_KEY, THEME_KEY};
use folio::storage::{FileStore, KeyValueStore};
use folio::types::{ThemeConfig, ThemeConfigPatch};
use tempfile::TempDir;

fn temp_store() -> (TempDir, FileStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path().join("prefs"));
    (dir, store)
}

mod file_store_tests {
    use super::*;

    #[test]
    fn test_storage_set_and_get() {
        let (_dir, store) = temp_store();
        let value = r#"{"primaryColor":"green"}"#;

        store.set("themeConfig", value).expect("Failed to set storage");
        assert_eq!(store.get("themeConfig"), Some(value.to_string()));
    }

    #[test]
    fn test_storage_get_nonexistent() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("nonexistent_key"), None);
    }

    #[test]
    fn test_storage_overwrite() {
        let (_dir, store) = temp_store();

        store.set("theme", "light").expect("Failed to set");
        store.set("theme", "dark").expect("Failed to overwrite");
        assert_eq!(store.get("theme"), Some("dark".to_string()));
    }

    #[test]
    fn test_storage_special_characters_in_key() {
        let (dir, store) = temp_store();

        store.set("../escape/key", "value").expect("Failed to set");
        assert_eq!(store.get("../escape/key"), Some("value".to_string()));

        // Nothing is written outside the store root
        assert!(!dir.path().join("escape").exists());
    }
}

mod preference_tests {
    use super::*;

    #[test]
    fn test_config_survives_restart() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join("prefs");

        let saved = {
            let prefs = PreferenceStore::load(FileStore::new(&root), false);
            prefs.update_config(ThemeConfigPatch::primary_color("purple"));
            prefs.update_config(ThemeConfigPatch::font_family("Poppins"))
        };

        let reloaded = PreferenceStore::load(FileStore::new(&root), false);
        assert_eq!(reloaded.config(), saved);
        assert_eq!(saved.primary_color, "purple");
        assert_eq!(saved.font_family, "Poppins");
        assert_eq!(saved.accent_color, ThemeConfig::default().accent_color);
    }

    #[test]
    fn test_dark_flag_survives_restart() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join("prefs");

        let prefs = PreferenceStore::load(FileStore::new(&root), false);
        assert!(prefs.toggle_dark());
        drop(prefs);

        // Stored value wins over the host signal
        let reloaded = PreferenceStore::load(FileStore::new(&root), false);
        assert!(reloaded.is_dark());
        assert_eq!(
            FileStore::new(&root).get(THEME_KEY),
            Some("dark".to_string())
        );
    }

    #[test]
    fn test_corrupt_files_fall_back() {
        let (_dir, store) = temp_store();
        store.set(THEME_KEY, "purple").expect("Failed to set");
        store.set(THEME_CONFIG_KEY, "{not json").expect("Failed to set");

        let prefs = PreferenceStore::load(store, true);
        assert!(prefs.is_dark());
        assert_eq!(prefs.config(), ThemeConfig::default());
    }

    #[test]
    fn test_services_share_persisted_preferences() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            email: Some(EmailJsSettings {
                service_id: "service".into(),
                template_id: "template".into(),
                public_key: "key".into(),
                to_email: "me@example.com".into(),
            }),
            ..AppConfig::default()
        };

        let services = AppServices::from_config(&config);
        assert!(services.relay.is_some());
        assert!(!services.prefs.is_dark());
        services.prefs.toggle_dark();

        let restarted = AppServices::from_config(&config);
        assert!(restarted.prefs.is_dark());
        assert!(restarted.feed.snapshot().posts.is_empty());
    }
}
