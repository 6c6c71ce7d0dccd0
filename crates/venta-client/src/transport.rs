//! # Sale Transport
//!
//! Moves one [`SaleRequest`] to the sales backend.
//!
//! ```text
//! SaleSubmissionService ──► SaleTransport::send(&request)
//!                               │
//!                               ├── HttpSaleTransport   POST {base_url}/{sale_path}
//!                               │                       Authorization: Bearer <token>
//!                               │                       Content-Type: application/json
//!                               │
//!                               └── (test doubles)
//! ```
//!
//! A 2xx status is success and the body is ignored. Anything else becomes a
//! [`SubmissionError`]. No retries happen at this layer.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, warn};
use url::Url;
use venta_core::SaleRequest;

use crate::config::ApiSettings;
use crate::error::{ConfigError, ConfigResult, SubmissionError, SubmissionResult};

/// Delivers a sale to wherever sales are recorded.
#[async_trait]
pub trait SaleTransport: Send + Sync {
    /// Sends the request once. `Ok` means the backend accepted it.
    async fn send(&self, request: &SaleRequest) -> SubmissionResult<()>;
}

// =============================================================================
// HTTP Transport
// =============================================================================

/// Bearer-authenticated JSON POST to the sale endpoint.
#[derive(Clone)]
pub struct HttpSaleTransport {
    client: Client,
    endpoint: Url,
    token: Option<String>,
    timeout_secs: u64,
}

impl std::fmt::Debug for HttpSaleTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSaleTransport")
            .field("endpoint", &self.endpoint.as_str())
            .field("authenticated", &self.token.is_some())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl HttpSaleTransport {
    /// Builds the HTTP client from API settings.
    pub fn new(settings: &ApiSettings) -> ConfigResult<Self> {
        let client = Client::builder()
            .connect_timeout(settings.timeout())
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: settings.sale_endpoint()?,
            token: settings.token.clone(),
            timeout_secs: settings.timeout_secs,
        })
    }

    /// The URL sales are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn map_send_error(&self, err: reqwest::Error) -> SubmissionError {
        if err.is_timeout() {
            SubmissionError::Timeout(self.timeout_secs)
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl SaleTransport for HttpSaleTransport {
    async fn send(&self, request: &SaleRequest) -> SubmissionResult<()> {
        let mut builder = self.client.post(self.endpoint.clone()).json(request);

        if let Some(auth) = self.auth_header() {
            builder = builder.header(header::AUTHORIZATION, auth);
        }

        debug!(endpoint = %self.endpoint, device_id = request.device_id, "POST sale");
        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            status.canonical_reason().unwrap_or("Unknown status").to_string()
        } else {
            text
        };

        warn!(status = status.as_u16(), "Sale endpoint rejected the request");
        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
