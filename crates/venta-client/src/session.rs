//! # Order Session
//!
//! One customer configuring one device, from the detail view opening to the
//! sale being recorded.
//!
//! ## Purchase State Machine
//! ```text
//!                 select_option / toggle_add_on
//!                        ┌──────────┐
//!                        ▼          │
//!   open() ──────► ┌──────────┐ ────┘
//!                  │ Browsing │◄──────────────────────┐
//!                  └────┬─────┘                       │ (mutation)
//!                       │ begin_purchase              │
//!                       ▼                             │
//!                 ┌────────────┐   Err      ┌─────────┴──────┐
//!                 │ Submitting │ ─────────► │ Failed(message)│──┐
//!                 └─────┬──────┘            └────────────────┘  │
//!                       │ Ok                        ▲            │ begin_purchase
//!                       ▼                           └────────────┘ (retry)
//!                 ┌───────────┐
//!                 │ Completed │   further purchases refused
//!                 └───────────┘
//! ```
//!
//! While `Submitting`, the selection is frozen and a second purchase is
//! refused, which is what keeps a double tap from selling twice. A failed
//! submission leaves the selection exactly as it was.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use venta_core::{
    pricing, CustomizationOption, DeviceDetails, PriceQuote, SaleRequest, SelectionState,
};

use crate::catalog::CatalogSource;
use crate::error::{CatalogResult, PurchaseError, PurchaseResult, SubmissionResult};
use crate::service::SaleSubmissionService;
use crate::transport::SaleTransport;

/// Where the order is in its purchase flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PurchaseStatus {
    #[default]
    Browsing,
    Submitting,
    Completed,
    /// Last attempt failed; the message is what the customer sees.
    Failed(String),
}

impl PurchaseStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, PurchaseStatus::Submitting)
    }
}

/// A device, the customer's choices for it, and the purchase guard.
#[derive(Debug, Clone)]
pub struct OrderSession {
    details: DeviceDetails,
    selection: SelectionState,
    status: PurchaseStatus,
    /// Last quote, tagged with the selection revision it was computed for.
    cached_quote: Option<(u64, PriceQuote)>,
}

impl OrderSession {
    /// Starts an order with an empty selection.
    pub fn new(details: DeviceDetails) -> Self {
        Self {
            details,
            selection: SelectionState::new(),
            status: PurchaseStatus::Browsing,
            cached_quote: None,
        }
    }

    /// Fetches a device from the catalog and starts an order for it.
    pub async fn open<C>(catalog: &C, device_id: i64) -> CatalogResult<Self>
    where
        C: CatalogSource + ?Sized,
    {
        let details = catalog.device(device_id).await?;
        debug!(device_id, name = %details.device.name, "Order session opened");
        Ok(Self::new(details))
    }

    pub fn details(&self) -> &DeviceDetails {
        &self.details
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn status(&self) -> &PurchaseStatus {
        &self.status
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn ensure_editable(&mut self) -> PurchaseResult<()> {
        match self.status {
            PurchaseStatus::Submitting => Err(PurchaseError::InFlight),
            PurchaseStatus::Failed(_) => {
                self.status = PurchaseStatus::Browsing;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Chooses an option for a customization group.
    pub fn select_option(
        &mut self,
        group_name: impl Into<String>,
        option: CustomizationOption,
    ) -> PurchaseResult<()> {
        self.ensure_editable()?;
        self.selection.select_option(group_name, option);
        Ok(())
    }

    /// Checks or unchecks an add-on.
    pub fn toggle_add_on(&mut self, add_on_id: i64, included: bool) -> PurchaseResult<()> {
        self.ensure_editable()?;
        self.selection.toggle_add_on(add_on_id, included);
        Ok(())
    }

    /// Price breakdown for the current selection.
    ///
    /// Recomputed only when the selection changed since the last call.
    pub fn quote(&mut self) -> &PriceQuote {
        let revision = self.selection.revision();
        if !matches!(&self.cached_quote, Some((cached, _)) if *cached == revision) {
            self.cached_quote = None;
        }

        let (_, quote) = self
            .cached_quote
            .get_or_insert_with(|| (revision, pricing::quote(&self.details, &self.selection)));
        quote
    }

    // =========================================================================
    // Purchase
    // =========================================================================

    /// Freezes the selection into a sale request and marks the order as
    /// submitting.
    pub fn begin_purchase(&mut self, now: DateTime<Utc>) -> PurchaseResult<SaleRequest> {
        match self.status {
            PurchaseStatus::Submitting => return Err(PurchaseError::InFlight),
            PurchaseStatus::Completed => return Err(PurchaseError::AlreadyCompleted),
            _ => {}
        }

        let total = self.quote().total;
        let request = SaleRequest::build(&self.details, &self.selection, total, now);
        self.status = PurchaseStatus::Submitting;

        debug!(device_id = request.device_id, total = %total, "Purchase started");
        Ok(request)
    }

    /// Records how the submission started by [`begin_purchase`](Self::begin_purchase)
    /// ended.
    pub fn finish_purchase(&mut self, outcome: SubmissionResult<()>) -> PurchaseResult<()> {
        match outcome {
            Ok(()) => {
                self.status = PurchaseStatus::Completed;
                info!(device_id = self.details.device.id, "Purchase completed");
                Ok(())
            }
            Err(e) => {
                warn!(device_id = self.details.device.id, error = %e, "Purchase failed");
                self.status = PurchaseStatus::Failed(e.to_string());
                Err(PurchaseError::Submission(e))
            }
        }
    }

    /// Submits the current selection and waits for the result.
    pub async fn purchase<T: SaleTransport>(
        &mut self,
        service: &SaleSubmissionService<T>,
    ) -> PurchaseResult<()> {
        let request = self.begin_purchase(Utc::now())?;
        let outcome = service.submit(&request).await;
        self.finish_purchase(outcome)
    }
}
