//! # Client Error Types
//!
//! Error types for configuration, catalog access and sale submission.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  ConfigError    │  │ SubmissionError │  │  CatalogLoadError       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connection     │  │  Unavailable            │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  InvalidRecord          │ │
//! │  │  LoadFailed     │  │  Rejected       │  │  Malformed              │ │
//! │  │  SaveFailed     │  │  Serialization  │  │  DeviceNotFound         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  PurchaseError: InFlight │ AlreadyCompleted │ Submission(..)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. A failed submission is reported to the caller
//! and leaves the order's selection untouched.

use thiserror::Error;
use venta_core::ValidationError;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Result type alias for sale submission.
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Why a sale did not go through.
///
/// The `Display` text is the human-readable reason shown to the customer.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The request never got a response (DNS, refused, reset, TLS).
    #[error("Error al realizar la venta: {0}")]
    ConnectionFailed(String),

    /// The transport gave up waiting.
    #[error("Error al realizar la venta: timed out after {0} seconds")]
    Timeout(u64),

    /// The server answered with a non-2xx status.
    #[error("Error al realizar la venta: HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request body could not be encoded.
    #[error("Error al realizar la venta: {0}")]
    SerializationFailed(String),

    /// The background task running the submission died.
    #[error("Error al realizar la venta: {0}")]
    Interrupted(String),
}

/// Timeouts are mapped by the transport, which knows the configured limit.
impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_body() {
            SubmissionError::SerializationFailed(err.to_string())
        } else {
            SubmissionError::ConnectionFailed(err.to_string())
        }
    }
}

impl SubmissionError {
    /// HTTP status of a server rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the failure happened before a response arrived.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            SubmissionError::ConnectionFailed(_) | SubmissionError::Timeout(_)
        )
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Result type alias for catalog access.
pub type CatalogResult<T> = Result<T, CatalogLoadError>;

/// No order can be built because the catalog could not be produced.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The catalog source could not be reached.
    #[error("Error al cargar los dispositivos: {0}")]
    Unavailable(String),

    /// The catalog document is not in the expected shape.
    #[error("Error al cargar los dispositivos: {0}")]
    Malformed(String),

    /// A record broke a catalog rule.
    #[error("Error al cargar los dispositivos: {0}")]
    InvalidRecord(#[from] ValidationError),

    /// No device with this id exists in the catalog.
    #[error("Device not found: {0}")]
    DeviceNotFound(i64),
}

impl From<serde_json::Error> for CatalogLoadError {
    fn from(err: serde_json::Error) -> Self {
        CatalogLoadError::Malformed(err.to_string())
    }
}

// =============================================================================
// Purchase Errors
// =============================================================================

/// Result type alias for order session purchases.
pub type PurchaseResult<T> = Result<T, PurchaseError>;

/// Errors from the order session's purchase flow.
#[derive(Debug, Error)]
pub enum PurchaseError {
    /// A submission for this order is still running.
    #[error("A purchase is already in progress for this order")]
    InFlight,

    /// The order was already sold; open a new session to buy again.
    #[error("This order has already been purchased")]
    AlreadyCompleted,

    /// The sale endpoint refused or could not be reached.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
