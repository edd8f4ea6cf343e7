use crate::{api::AppState, config::Settings, error, info, server, warning};

pub async fn serve(addr: Option<String>) {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let state = match AppState::from_settings(&settings) {
        Ok(state) => state,
        Err(e) => error!("Cannot set up library pipeline: {}", e),
    };

    if state.tokens.is_none() {
        warning!("No client credentials configured; requests must carry their own bearer token");
    }

    let addr = addr.unwrap_or(settings.server_addr);
    info!(
        "Serving on {} (cache: {}, concurrency: {}, ttl: {}s)",
        addr,
        settings.cache_url,
        settings.fetch_concurrency,
        settings.cache_ttl.as_secs()
    );

    if let Err(e) = server::start_api_server(&addr, state).await {
        error!("{}", e);
    }
}
