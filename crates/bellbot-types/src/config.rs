use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn chat_url(&self) -> String {
        self.endpoint("chat")
    }

    pub fn reservation_url(&self) -> String {
        self.endpoint("reservar")
    }

    pub fn quote_url(&self) -> String {
        self.endpoint("calcular-precio")
    }

    pub fn health_url(&self) -> String {
        self.endpoint("health")
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/{}", self.base_url.trim_end_matches('/'), name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// BCP-47 tag handed to the recognition engine
    pub lang: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LOCALE.to_string(),
        }
    }
}

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const DEFAULT_LOCALE: &str = "es-AR";
