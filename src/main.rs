use std::io::Result;

use actix_web::web;
use folio_site::{
    core::settings::{Settings, SETTINGS_PATH},
    i18n::Locale,
    server::{start_server, AppState},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FOLIO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(error) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("failed to initialize tracing subscriber: {}", error);
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    init_tracing();

    let settings = Settings::load_or_default(SETTINGS_PATH);
    let state = AppState::bootstrap(settings).await;
    for locale in [Locale::Es, Locale::En] {
        info!(
            projects = state.portfolio(locale).await.projects.len(),
            %locale,
            "Portfolio ready"
        );
    }
    start_server(web::Data::new(state)).await
}
