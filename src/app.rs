use crate::blog::{DevToClient, FeedController};
use crate::config::AppConfig;
use crate::contact::EmailJsRelay;
use crate::prefs::PreferenceStore;
use crate::storage::FileStore;
use std::sync::Arc;

/// Long-lived components shared by the presentation layer. Built once at
/// startup and never torn down.
#[derive(Clone)]
pub struct AppServices {
    pub prefs: Arc<PreferenceStore<FileStore>>,
    pub feed: FeedController<DevToClient>,
    pub relay: Option<Arc<EmailJsRelay>>,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        let storage = FileStore::new(config.prefs_dir());
        let relay = config.email.clone().map(EmailJsRelay::new).map(Arc::new);
        if relay.is_none() {
            tracing::warn!("email relay not configured, contact form is disabled");
        }

        Self {
            prefs: Arc::new(PreferenceStore::load(storage, config.prefers_dark)),
            feed: FeedController::new(DevToClient::new(config.article_api_base.clone())),
            relay,
        }
    }
}
