use std::collections::VecDeque;
use std::time::Duration;

use agrimap_core::config::{LayeredConfig, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use agrimap_core::error::{AgrimapError, Result};
use agrimap_core::models::{Ack, Notification, Parcel, StatusTransition};
use agrimap_core::ports::{EventStream, NotificationApi, NotificationFeed, ParcelApi};
use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::sse::SseDecoder;

/// Silence on the live stream, in seconds, after which the connection is dropped
pub const DEFAULT_STREAM_IDLE_TIMEOUT_SECS: u64 = 90;

/// Registration service client
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Service root, e.g. "http://localhost:5000"
    base_url: String,

    /// Applies to every request except the live stream
    request_timeout: Duration,

    /// Longest silence tolerated on the live stream before it is treated as dropped
    stream_idle_timeout: Duration,

    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            stream_idle_timeout: Duration::from_secs(DEFAULT_STREAM_IDLE_TIMEOUT_SECS),
            client: reqwest::Client::new(),
        }
    }

    /// Create with default localhost URL
    pub fn localhost() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn from_config(config: &LayeredConfig) -> Self {
        Self::new(config.base_url.value.clone()).with_request_timeout(config.request_timeout())
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Server keep-alive comments count as activity, so this should exceed their interval
    pub fn with_stream_idle_timeout(mut self, timeout: Duration) -> Self {
        self.stream_idle_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(|e| AgrimapError::Transport {
            reason: format!("Failed to reach {}: {}", self.base_url, e),
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AgrimapError::Status { status, body });
        }

        Ok(response)
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(|e| AgrimapError::Transport {
            reason: format!("Failed to read response body: {}", e),
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[derive(Debug, Serialize)]
struct StatusRequest {
    status: StatusTransition,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    notification: Notification,
}

#[async_trait]
impl ParcelApi for HttpBackend {
    async fn submit_parcel(&self, parcel: &Parcel) -> Result<Ack> {
        tracing::debug!(farmer_id = %parcel.farmer_id, "POST /api/receive-coordinates");

        let response = self
            .send(
                self.client
                    .post(self.url("/api/receive-coordinates"))
                    .timeout(self.request_timeout)
                    .json(parcel),
            )
            .await?;

        Self::read_json(response).await
    }
}

#[async_trait]
impl NotificationFeed for HttpBackend {
    async fn fetch_all(&self) -> Result<Vec<Notification>> {
        let response = self
            .send(self.client.get(self.url("/api/notifications")).timeout(self.request_timeout))
            .await?;

        Self::read_json(response).await
    }

    async fn subscribe(&self) -> Result<EventStream> {
        // Each read resets the timer, so a quiet but healthy stream stays open
        let stream_client = reqwest::Client::builder()
            .read_timeout(self.stream_idle_timeout)
            .build()
            .map_err(|e| AgrimapError::Transport {
                reason: format!("Failed to build stream client: {}", e),
            })?;

        let response = self
            .send(
                stream_client
                    .get(self.url("/api/notifications/stream"))
                    .header(reqwest::header::ACCEPT, "text/event-stream"),
            )
            .await?;

        let state = StreamState {
            response: Some(response),
            decoder: SseDecoder::new(),
            ready: VecDeque::new(),
        };

        Ok(futures::stream::unfold(state, StreamState::next).boxed())
    }
}

#[async_trait]
impl NotificationApi for HttpBackend {
    async fn update_status(&self, id: &str, status: StatusTransition) -> Result<Notification> {
        tracing::debug!(id, status = %status, "Updating notification status");

        let response = self
            .send(
                self.client
                    .patch(self.url(&format!("/api/notifications/{}", id)))
                    .timeout(self.request_timeout)
                    .json(&StatusRequest { status }),
            )
            .await?;

        let body: StatusResponse = Self::read_json(response).await?;
        Ok(body.notification)
    }
}

/// Open stream body plus the decoded events not yet handed out.
///
/// `response` is dropped after a read error so the stream ends on the next poll.
struct StreamState {
    response: Option<reqwest::Response>,
    decoder: SseDecoder,
    ready: VecDeque<String>,
}

impl StreamState {
    async fn next(mut self) -> Option<(Result<String>, Self)> {
        loop {
            if let Some(payload) = self.ready.pop_front() {
                return Some((Ok(payload), self));
            }

            let response = self.response.as_mut()?;
            match response.chunk().await {
                Ok(Some(bytes)) => {
                    let events = self.decoder.feed(&bytes);
                    self.ready
                        .extend(events.into_iter().filter(|e| e.is_message()).map(|e| e.data));
                }
                Ok(None) => {
                    tracing::debug!("Notification stream closed by server");
                    return None;
                }
                Err(e) => {
                    self.response = None;
                    let err = AgrimapError::Stream { reason: e.to_string() };
                    return Some((Err(err), self));
                }
            }
        }
    }
}
