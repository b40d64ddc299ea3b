//! Theme and cosmetic preferences.
//!
//! [`PreferenceStore`] is created once at startup and shared by the
//! presentation layer. Every mutation is persisted before the derived
//! [`StyleVars`] are published to subscribers.

use crate::storage::{KeyValueStore, StorageError};
use crate::theme::StyleVars;
use crate::types::{ThemeConfig, ThemeConfigPatch, ThemeMode};
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;

pub const THEME_KEY: &str = "theme";
pub const THEME_CONFIG_KEY: &str = "themeConfig";

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("persisted state under '{key}' is corrupt: {reason}")]
    PersistedStateCorrupt { key: &'static str, reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub is_dark: bool,
    pub config: ThemeConfig,
}

impl ThemeSnapshot {
    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.is_dark)
    }

    pub fn styles(&self) -> StyleVars {
        StyleVars::derive(self.is_dark, &self.config)
    }
}

pub struct PreferenceStore<S> {
    storage: S,
    state: Mutex<ThemeSnapshot>,
    applied: watch::Sender<StyleVars>,
    notify: watch::Sender<ThemeSnapshot>,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Loads persisted preferences. `prefers_dark` is the host signal used when
    /// no dark-mode value has been stored yet.
    pub fn load(storage: S, prefers_dark: bool) -> Self {
        let is_dark = match read_dark_flag(&storage) {
            Ok(Some(flag)) => flag,
            Ok(None) => prefers_dark,
            Err(err) => {
                tracing::warn!(error = %err, "falling back to host dark-mode preference");
                prefers_dark
            }
        };
        let config = match read_config(&storage) {
            Ok(Some(config)) => config,
            Ok(None) => ThemeConfig::default(),
            Err(err) => {
                tracing::warn!(error = %err, "falling back to default theme config");
                ThemeConfig::default()
            }
        };

        let snapshot = ThemeSnapshot { is_dark, config };
        let (applied, _) = watch::channel(snapshot.styles());
        let (notify, _) = watch::channel(snapshot.clone());

        Self {
            storage,
            state: Mutex::new(snapshot),
            applied,
            notify,
        }
    }

    pub fn theme(&self) -> ThemeSnapshot {
        self.lock().clone()
    }

    pub fn is_dark(&self) -> bool {
        self.lock().is_dark
    }

    pub fn config(&self) -> ThemeConfig {
        self.lock().config.clone()
    }

    /// Style properties currently applied.
    pub fn styles(&self) -> StyleVars {
        self.applied.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        self.notify.subscribe()
    }

    pub fn subscribe_styles(&self) -> watch::Receiver<StyleVars> {
        self.applied.subscribe()
    }

    pub fn toggle_dark(&self) -> bool {
        let mut state = self.lock();
        state.is_dark = !state.is_dark;
        let mode = ThemeMode::from_dark(state.is_dark);
        self.persist(THEME_KEY, mode.as_str());
        tracing::debug!(mode = mode.as_str(), "toggled display mode");
        self.publish(&state);
        state.is_dark
    }

    pub fn update_config(&self, patch: ThemeConfigPatch) -> ThemeConfig {
        let mut state = self.lock();
        state.config = patch.apply(&state.config);
        match serde_json::to_string(&state.config) {
            Ok(json) => self.persist(THEME_CONFIG_KEY, &json),
            Err(err) => tracing::warn!(error = %err, "failed to encode theme config"),
        }
        self.publish(&state);
        state.config.clone()
    }

    pub fn reset_config(&self) -> ThemeConfig {
        self.update_config(ThemeConfig::default().into())
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.set(key, value) {
            tracing::warn!(key, error = %err, "failed to persist preference");
        }
    }

    /// Called with the state lock held so publications keep mutation order.
    fn publish(&self, snapshot: &ThemeSnapshot) {
        self.applied.send_replace(snapshot.styles());
        self.notify.send_replace(snapshot.clone());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ThemeSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_dark_flag(storage: &impl KeyValueStore) -> Result<Option<bool>, PrefsError> {
    let Some(raw) = storage.get(THEME_KEY) else {
        return Ok(None);
    };
    ThemeMode::parse(&raw)
        .map(|mode| Some(mode == ThemeMode::Dark))
        .ok_or_else(|| PrefsError::PersistedStateCorrupt {
            key: THEME_KEY,
            reason: format!("unexpected value {raw:?}"),
        })
}

/// Stored configs missing some fields are completed from the defaults.
fn read_config(storage: &impl KeyValueStore) -> Result<Option<ThemeConfig>, PrefsError> {
    let Some(raw) = storage.get(THEME_CONFIG_KEY) else {
        return Ok(None);
    };
    serde_json::from_str::<ThemeConfigPatch>(&raw)
        .map(|patch| Some(patch.apply(&ThemeConfig::default())))
        .map_err(|err| PrefsError::PersistedStateCorrupt {
            key: THEME_CONFIG_KEY,
            reason: err.to_string(),
        })
}
