//! Session API client.
//!
//! The `SessionApi` trait abstracts over the backend so the worker can be
//! driven by a fake in tests. `HttpSessionApi` is the real implementation on
//! top of a blocking reqwest client; it is only ever called from the worker
//! thread, never from the UI loop.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::config::ApiConfig;
use crate::domain::{EquityPoint, Order, Session, SessionDetail, SessionId};

/// Failure of a single API call.
///
/// Callers treat every variant the same way (log and move on); the variants
/// exist so the log line says what went wrong.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// The backend routes this client consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Sessions,
    Detail(&'a SessionId),
    Equity(&'a SessionId, usize),
    Orders(&'a SessionId, usize),
    Delete(&'a SessionId),
}

impl Endpoint<'_> {
    /// Path segments, unescaped. The session id is always a single segment.
    pub fn segments(&self) -> Vec<String> {
        match *self {
            Endpoint::Sessions => vec!["sessions".to_string()],
            Endpoint::Detail(id) => under_session(id, &["more".to_string()]),
            Endpoint::Equity(id, offset) => {
                under_session(id, &["equity".to_string(), offset.to_string()])
            }
            Endpoint::Orders(id, offset) => {
                under_session(id, &["orders".to_string(), offset.to_string()])
            }
            Endpoint::Delete(id) => under_session(id, &["delete".to_string()]),
        }
    }
}

fn under_session(id: &SessionId, rest: &[String]) -> Vec<String> {
    let mut segments = vec!["sessions".to_string(), id.as_str().to_string()];
    segments.extend_from_slice(rest);
    segments
}

/// Operations offered by the session backend.
pub trait SessionApi: Send + Sync {
    /// All sessions, in server order.
    fn list_sessions(&self) -> Result<Vec<Session>, ApiError>;

    /// Metadata and derived statistics for one session.
    fn session_detail(&self, id: &SessionId) -> Result<SessionDetail, ApiError>;

    /// Equity points at index >= `offset`. Empty when nothing new exists.
    fn equity_page(&self, id: &SessionId, offset: usize) -> Result<Vec<EquityPoint>, ApiError>;

    /// Orders at index >= `offset`. Empty when nothing new exists.
    fn order_page(&self, id: &SessionId, offset: usize) -> Result<Vec<Order>, ApiError>;

    /// Delete the session's stored data. The response body is ignored.
    fn delete_session(&self, id: &SessionId) -> Result<(), ApiError>;
}

/// Blocking HTTP client for the session backend.
pub struct HttpSessionApi {
    client: reqwest::blocking::Client,
    base: Url,
    base_url: String,
}

impl HttpSessionApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| ApiError::Client(format!("invalid base address '{base_url}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Client(format!(
                "base address '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            client,
            base,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint under the configured base address, with
    /// each segment percent-encoded.
    pub fn url(&self, endpoint: Endpoint<'_>) -> String {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base addresses, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(endpoint.segments());
        }
        url.to_string()
    }

    fn get(&self, endpoint: Endpoint<'_>) -> Result<(String, String), ApiError> {
        let url = self.url(endpoint);
        debug!(%url, "GET");

        let resp = self.client.get(&url).send().map_err(|e| ApiError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().map_err(|e| ApiError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;
        Ok((url, body))
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T, ApiError> {
        let (url, body) = self.get(endpoint)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

impl SessionApi for HttpSessionApi {
    fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.get_json(Endpoint::Sessions)
    }

    fn session_detail(&self, id: &SessionId) -> Result<SessionDetail, ApiError> {
        self.get_json(Endpoint::Detail(id))
    }

    fn equity_page(&self, id: &SessionId, offset: usize) -> Result<Vec<EquityPoint>, ApiError> {
        self.get_json(Endpoint::Equity(id, offset))
    }

    fn order_page(&self, id: &SessionId, offset: usize) -> Result<Vec<Order>, ApiError> {
        self.get_json(Endpoint::Orders(id, offset))
    }

    fn delete_session(&self, id: &SessionId) -> Result<(), ApiError> {
        self.get(Endpoint::Delete(id)).map(|_| ())
    }
}
