//! # Sale Submission Service
//!
//! One purchase intent, one network call.
//!
//! ```text
//!   submit(&request) ──► transport.send ──► Ok(())            (any 2xx)
//!                                       └─► Err(SubmissionError)
//!
//!   spawn(request) ──► PendingSubmission ──► .outcome().await
//!                              │
//!                              └── dropped: task finishes, result ignored
//! ```
//!
//! The service never retries and never deduplicates. Guarding against a
//! double tap is the caller's job (see [`crate::session::OrderSession`]).

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use venta_core::SaleRequest;

use crate::config::ClientConfig;
use crate::error::{ConfigResult, SubmissionError, SubmissionResult};
use crate::transport::{HttpSaleTransport, SaleTransport};

/// Submits finished sale requests through an injected transport.
#[derive(Debug)]
pub struct SaleSubmissionService<T> {
    transport: T,
}

impl SaleSubmissionService<HttpSaleTransport> {
    /// Builds the service with the HTTP transport described by `config`.
    pub fn from_config(config: &ClientConfig) -> ConfigResult<Self> {
        let transport = HttpSaleTransport::new(&config.api)?;
        info!(endpoint = %transport.endpoint(), "Sale submission service ready");
        Ok(Self::new(transport))
    }
}

impl<T: SaleTransport> SaleSubmissionService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends the sale once and reports the outcome.
    pub async fn submit(&self, request: &SaleRequest) -> SubmissionResult<()> {
        debug!(
            device_id = request.device_id,
            customizations = request.customizations.len(),
            add_ons = request.add_ons.len(),
            total = %request.total_price,
            "Submitting sale"
        );

        match self.transport.send(request).await {
            Ok(()) => {
                info!(
                    device_id = request.device_id,
                    total = %request.total_price,
                    sold_at = %request.sold_at,
                    "Sale recorded"
                );
                Ok(())
            }
            Err(e) if e.is_transport_error() => {
                error!(device_id = request.device_id, error = %e, "Sale endpoint unreachable");
                Err(e)
            }
            Err(e) => {
                warn!(device_id = request.device_id, error = %e, "Sale not accepted");
                Err(e)
            }
        }
    }
}

impl<T: SaleTransport + 'static> SaleSubmissionService<T> {
    /// Runs [`submit`](Self::submit) on a background task.
    pub fn spawn(self: &Arc<Self>, request: SaleRequest) -> PendingSubmission {
        let service = Arc::clone(self);
        let handle = tokio::spawn(async move { service.submit(&request).await });
        PendingSubmission { handle }
    }
}

// =============================================================================
// Pending Submission
// =============================================================================

/// Handle to a submission running in the background.
///
/// Dropping it detaches the task: the sale is still sent, its outcome is
/// discarded.
#[derive(Debug)]
pub struct PendingSubmission {
    handle: JoinHandle<SubmissionResult<()>>,
}

impl PendingSubmission {
    /// Returns true once the background task has produced its outcome.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the outcome.
    pub async fn outcome(self) -> SubmissionResult<()> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(SubmissionError::Interrupted(e.to_string())),
        }
    }
}
