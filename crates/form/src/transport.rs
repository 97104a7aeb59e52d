use std::time::Duration;

use async_trait::async_trait;
use folio_contact::{ContactRequest, RelayResponse};
use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What the relay reported for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    pub accepted: bool,
    pub id: Option<String>,
}

impl Delivery {
    pub fn accepted(id: Option<String>) -> Self {
        Self { accepted: true, id }
    }

    pub fn rejected() -> Self {
        Self::default()
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid relay response: {0}")]
    InvalidResponse(String),
}

/// Carries one contact request to the relay.
#[async_trait]
pub trait ContactTransport: Send + Sync + 'static {
    async fn deliver(&self, request: ContactRequest) -> Result<Delivery, TransportError>;
}

/// Posts contact requests as JSON to the relay endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpTransport {
    async fn deliver(&self, request: ContactRequest) -> Result<Delivery, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "Relay refused contact submission");
            return Ok(Delivery::rejected());
        }

        let body = response.bytes().await?;
        let reply = serde_json::from_slice::<RelayResponse>(&body)
            .map_err(|err| TransportError::InvalidResponse(err.to_string()))?;

        Ok(Delivery {
            accepted: reply.success,
            id: reply.id,
        })
    }
}
