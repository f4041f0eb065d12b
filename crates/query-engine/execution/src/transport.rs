//! The transport seam: how generated SQL text reaches a database.
//!
//! The engine only ever calls [`Transport::send`]; what sits behind it (an
//! HTTP API, an in-process channel, a direct driver, a test stub) is the
//! host application's choice.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::TransportError;

/// One result row, as returned by the execution destination.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// An injected execution channel.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Execute the given SQL text and return the resulting rows.
    async fn send(&self, sql: &str) -> Result<Vec<Row>, TransportError>;
}

/// The built-in selectable transport modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Http,
    Ipc,
}

/// Connection settings for the built-in transport modes.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    #[serde(default)]
    pub mode: TransportMode,
    /// Where the `http` mode POSTs SQL text.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    "/query".to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            mode: TransportMode::Http,
            endpoint: default_endpoint(),
        }
    }
}

impl TransportConfig {
    /// Resolve the configured mode to a transport. There is no in-crate
    /// channel for `ipc`; hosts that need it inject their own [`Transport`].
    pub fn into_transport(self) -> Result<Box<dyn Transport>, TransportError> {
        match self.mode {
            TransportMode::Http => Ok(Box::new(HttpTransport::new(self.endpoint))),
            TransportMode::Ipc => Err(TransportError::UnsupportedMode("ipc".to_string())),
        }
    }
}

/// The `http` mode: POST the SQL text to an endpoint that answers with a
/// JSON array of row objects.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, sql: &str) -> Result<Vec<Row>, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .body(sql.to_string())
            .send()
            .await?;
        let rows = response.error_for_status()?.json::<Vec<Row>>().await?;
        Ok(rows)
    }
}
