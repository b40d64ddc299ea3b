//! Runtime configuration.
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file) and fall back to the bundled `assets/config.env`, which mobile builds
//! ship with instead of a `.env`.

use crate::blog::DEFAULT_API_BASE;
use crate::contact::EmailJsSettings;
use crate::storage::default_data_dir;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Bundled config for builds without a `.env` file
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

/// Loads `.env` into the process environment when one exists.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "ignoring unreadable .env"),
    }
}

fn parse_env_lines(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        // Skip comments and empty lines
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub article_api_base: String,
    pub data_dir: PathBuf,
    pub prefers_dark: bool,
    pub log_filter: String,
    pub email: Option<EmailJsSettings>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            article_api_base: DEFAULT_API_BASE.to_string(),
            data_dir: default_data_dir(),
            prefers_dark: false,
            log_filter: "info".to_string(),
            email: None,
        }
    }
}

impl AppConfig {
    /// Log level to install before `loaded` is settled, so that
    /// [`AppConfig::or_defaults`] can report a bad config.
    pub fn log_filter_of(loaded: &Result<Self>) -> &str {
        loaded
            .as_ref()
            .map_or("info", |config| config.log_filter.as_str())
    }

    /// Unwraps a loaded config, logging and falling back to defaults on error.
    /// Call after logging is installed.
    pub fn or_defaults(loaded: Result<Self>) -> Self {
        loaded.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid configuration, using defaults");
            Self::default()
        })
    }

    pub fn from_env() -> Result<Self> {
        let bundled = parse_env_lines(BUNDLED_CONFIG);
        Self::from_lookup(|key| env::var(key).ok().or_else(|| bundled.get(key).cloned()))
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let article_api_base = lookup("FOLIO_ARTICLE_API_BASE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        reqwest::Url::parse(&article_api_base)
            .with_context(|| format!("FOLIO_ARTICLE_API_BASE is not a URL: {article_api_base}"))?;

        let data_dir = lookup("FOLIO_DATA_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let email = match (
            lookup("EMAILJS_SERVICE_ID"),
            lookup("EMAILJS_TEMPLATE_ID"),
            lookup("EMAILJS_PUBLIC_KEY"),
            lookup("CONTACT_TO_EMAIL"),
        ) {
            (Some(service_id), Some(template_id), Some(public_key), Some(to_email)) => {
                Some(EmailJsSettings {
                    service_id,
                    template_id,
                    public_key,
                    to_email,
                })
            }
            _ => None,
        };

        Ok(Self {
            article_api_base,
            data_dir,
            prefers_dark: lookup("FOLIO_PREFERS_DARK")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            log_filter: lookup("FOLIO_LOG").unwrap_or_else(|| "info".to_string()),
            email,
        })
    }

    pub fn prefs_dir(&self) -> PathBuf {
        self.data_dir.join("prefs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn bundled_config_parses() {
        let bundled = parse_env_lines(BUNDLED_CONFIG);
        assert_eq!(
            bundled.get("FOLIO_ARTICLE_API_BASE").map(String::as_str),
            Some(DEFAULT_API_BASE)
        );
        assert!(!bundled.keys().any(|k| k.starts_with('#')));
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.article_api_base, DEFAULT_API_BASE);
        assert!(!config.prefers_dark);
        assert_eq!(config.log_filter, "info");
        assert!(config.email.is_none());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FOLIO_ARTICLE_API_BASE", "http://127.0.0.1:9000/api"),
            ("FOLIO_DATA_DIR", "/tmp/folio"),
            ("FOLIO_PREFERS_DARK", "Yes"),
            ("EMAILJS_SERVICE_ID", "svc"),
            ("EMAILJS_TEMPLATE_ID", "tpl"),
            ("EMAILJS_PUBLIC_KEY", "key"),
            ("CONTACT_TO_EMAIL", "me@example.com"),
        ]))
        .unwrap();

        assert_eq!(config.article_api_base, "http://127.0.0.1:9000/api");
        assert_eq!(config.prefs_dir(), PathBuf::from("/tmp/folio/prefs"));
        assert!(config.prefers_dark);
        assert_eq!(config.email.unwrap().to_email, "me@example.com");
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn log_filter_follows_loaded_config() {
        let loaded = AppConfig::from_lookup(lookup_from(&[("FOLIO_LOG", "debug")]));
        assert_eq!(AppConfig::log_filter_of(&loaded), "debug");
    }

    #[test]
    fn bad_config_is_reported_after_logging_starts() {
        let loaded = AppConfig::from_lookup(lookup_from(&[
            ("FOLIO_ARTICLE_API_BASE", "not a url"),
            ("FOLIO_LOG", "debug"),
        ]));
        assert_eq!(AppConfig::log_filter_of(&loaded), "info");

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let config =
            tracing::subscriber::with_default(subscriber, || AppConfig::or_defaults(loaded));

        assert_eq!(config, AppConfig::default());
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("invalid configuration, using defaults"));
        assert!(output.contains("FOLIO_ARTICLE_API_BASE"));
    }

    #[test]
    fn rejects_bad_api_base() {
        let result = AppConfig::from_lookup(lookup_from(&[("FOLIO_ARTICLE_API_BASE", "not a url")]));
        assert!(result.is_err());
    }
}
