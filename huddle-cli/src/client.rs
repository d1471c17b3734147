//! HTTP client for the scheduling API

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use huddle_core::config::HuddleConfig;
use huddle_core::protocol::{
    CreateEventRequest, CreateProfileRequest, ErrorResponse, UpdateEventRequest,
};
use huddle_core::{Event, EventId, HuddleError, HuddleResult, LogEntry, Profile};

/// HTTP client for the scheduling API
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> HuddleResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| HuddleError::Config(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(HuddleError::Config(format!("Invalid API URL '{}'", base_url)));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HuddleError::Network(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &HuddleConfig) -> HuddleResult<Self> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    /// GET /api/profiles
    pub async fn list_profiles(&self) -> HuddleResult<Vec<Profile>> {
        let url = self.endpoint(&["profiles"]);
        self.send(self.http.get(url)).await
    }

    /// POST /api/profiles
    pub async fn create_profile(&self, req: &CreateProfileRequest) -> HuddleResult<Profile> {
        let url = self.endpoint(&["profiles"]);
        self.send(self.http.post(url).json(req)).await
    }

    /// GET /api/events
    pub async fn list_events(&self) -> HuddleResult<Vec<Event>> {
        let url = self.endpoint(&["events"]);
        self.send(self.http.get(url)).await
    }

    /// POST /api/events
    pub async fn create_event(&self, req: &CreateEventRequest) -> HuddleResult<Event> {
        let url = self.endpoint(&["events"]);
        self.send(self.http.post(url).json(req)).await
    }

    /// PUT /api/events/:id
    pub async fn update_event(&self, id: &EventId, req: &UpdateEventRequest) -> HuddleResult<Event> {
        let url = self.endpoint(&["events", id.as_str()]);
        self.send(self.http.put(url).json(req)).await
    }

    /// GET /api/events/:id/logs
    pub async fn event_logs(&self, id: &EventId) -> HuddleResult<Vec<LogEntry>> {
        let url = self.endpoint(&["events", id.as_str(), "logs"]);
        self.send(self.http.get(url)).await
    }

    /// `{base}/api/{segments...}`, with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> HuddleResult<T> {
        let resp = req.send().await.map_err(|e| {
            warn!(error = %e, "request failed");
            HuddleError::Network(format!("Failed to reach {}: {}", self.base_url, e))
        })?;

        let status = resp.status();
        debug!(url = %resp.url(), status = status.as_u16(), "response");

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(ErrorResponse::into_message)
                .unwrap_or_else(|| match body.trim() {
                    "" => status.canonical_reason().unwrap_or("request failed").to_string(),
                    text => text.to_string(),
                });
            warn!(status = status.as_u16(), %message, "server rejected request");
            return Err(HuddleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| HuddleError::Serialization(format!("Unexpected response: {}", e)))
    }
}
