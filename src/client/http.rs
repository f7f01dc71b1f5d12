//! reqwest implementation of [`ChatBackend`].
//!
//! Only the health probe carries a timeout. Chat and mail requests wait for
//! the service to answer or the connection to fail.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;

use crate::client::types::{ChatRequest, ChatResponse, MailRequest};
use crate::client::{ChatBackend, ChatError, ConnectionStatus, Reply};
use crate::core::config::DEFAULT_HEALTH_TIMEOUT_SECS;
use crate::core::topic::Topic;

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    health_timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
            health_timeout: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECS),
        }
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Returns the body of a successful response, or the classified error.
    async fn read_success(response: reqwest::Response) -> Result<String, ChatError> {
        let status = response.status();
        debug!("Chat service response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Chat service error: {} - {}", status.as_u16(), body);
            return Err(ChatError::from_status(status.as_u16(), body));
        }

        response
            .text()
            .await
            .map_err(|e| ChatError::Unreachable(format!("failed to read response: {e}")))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_chat(&self, topic: Topic, message: &str) -> Result<Reply, ChatError> {
        let url = self.url(topic.endpoint_path());
        info!("Chat request: topic={}, message_len={}", topic.id(), message.len());

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest::new(message))
            .send()
            .await
            .map_err(|e| {
                warn!("Chat request to {} failed: {}", url, e);
                ChatError::from_transport(&e)
            })?;

        let body = Self::read_success(response).await?;

        // A 2xx without a JSON body still counts as a delivered reply.
        let parsed = serde_json::from_str::<ChatResponse>(&body).unwrap_or_else(|e| {
            warn!("Unparseable chat response ({}), using fallback reply", e);
            ChatResponse::default()
        });

        let text = parsed.into_reply_text();
        info!("Chat reply received: {} bytes", text.len());
        Ok(Reply { text })
    }

    async fn send_mail(&self, message: &str, email: &str) -> Result<(), ChatError> {
        let url = self.url("chat/mail");
        info!("Mail relay request: message_len={}", message.len());

        let response = self
            .client
            .post(&url)
            .json(&MailRequest { message, email })
            .send()
            .await
            .map_err(|e| {
                warn!("Mail request to {} failed: {}", url, e);
                ChatError::from_transport(&e)
            })?;

        Self::read_success(response).await?;
        info!("Mail relay accepted the message");
        Ok(())
    }

    async fn check_health(&self) -> ConnectionStatus {
        let result = self
            .client
            .get(self.url("health"))
            .timeout(self.health_timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status() == StatusCode::OK => ConnectionStatus::Connected,
            Ok(response) => {
                debug!("Health probe returned {}", response.status());
                ConnectionStatus::Offline
            }
            Err(e) => {
                debug!("Health probe failed: {}", e);
                ConnectionStatus::Offline
            }
        }
    }
}
