//! Startup configuration. Defaults, overridden by the page's query string.

use bellbot_types::config::AppConfig;

/// Query-string key that replaces the backend base URL
const API_PARAM: &str = "api";

pub fn load() -> AppConfig {
    let mut config = AppConfig::default();
    match query_param(API_PARAM) {
        Some(base_url) if !base_url.trim().is_empty() => {
            log::info!("Backend overridden by query string: {}", base_url);
            config.api.base_url = base_url.trim().to_string();
        }
        _ => log::info!("Backend: {}", config.api.base_url),
    }
    config
}

fn query_param(key: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()?.get(key)
}
