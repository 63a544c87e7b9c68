use async_trait::async_trait;

use bellbot_core::ports::{AssistantPort, ChatReply, ChatRequest};
use bellbot_types::{config::ApiConfig, Result};

use super::wire;

/// Assistant backed by `POST /api/chat`
pub struct HttpAssistant {
    config: ApiConfig,
}

impl HttpAssistant {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl AssistantPort for HttpAssistant {
    async fn chat(&self, req: ChatRequest) -> Result<ChatReply> {
        let body = super::post_json(&self.config.chat_url(), &req).await?;
        wire::parse_chat_reply(&body)
    }

    async fn health(&self) -> Result<()> {
        let body = super::get(&self.config.health_url()).await?;
        let message = wire::parse_health(&body)?;
        log::info!("Backend health: {}", message);
        Ok(())
    }
}
