use folio::config::{self, AppConfig};

fn main() {
    config::load_dotenv();
    let loaded = AppConfig::from_env();
    folio::logging::init(AppConfig::log_filter_of(&loaded));
    let settings = AppConfig::or_defaults(loaded);
    tracing::info!(api = %settings.article_api_base, "starting folio");

    dioxus::LaunchBuilder::new()
        .with_context(settings)
        .launch(folio::ui::App);
}
