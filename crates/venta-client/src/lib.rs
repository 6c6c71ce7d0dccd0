//! # venta-client: Order Sessions and Sale Submission for Venta
//!
//! This crate wraps the pure pricing logic of `venta-core` with everything
//! an order needs from the outside world: configuration, a catalog to read
//! devices from, and an authenticated transport to record the sale.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          venta-client                                   │
//! │                                                                         │
//! │   CatalogSource ──► OrderSession ──────────► SaleSubmissionService      │
//! │   (InMemoryCatalog)  │  selection                │                      │
//! │                      │  memoized quote           ▼                      │
//! │                      │  PurchaseStatus     SaleTransport                │
//! │                      │                     (HttpSaleTransport)          │
//! │                      ▼                           │                      │
//! │                  venta-core                      ▼                      │
//! │            pricing::quote, SaleRequest     POST /ventas (Bearer)        │
//! │                                                                         │
//! │   ClientConfig: defaults ◄── client.toml ◄── VENTA_* env                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - API URL, sale path, timeout and token
//! - [`error`] - Config, catalog, submission and purchase errors
//! - [`catalog`] - Catalog boundary and in-memory catalog
//! - [`transport`] - `SaleTransport` trait and the reqwest implementation
//! - [`service`] - Single-attempt submission, awaited or spawned
//! - [`session`] - Per-order selection, quote cache and purchase guard
//! - [`telemetry`] - `tracing` subscriber setup
//!
//! ## Usage
//!
//! ```rust,ignore
//! use venta_client::{ClientConfig, InMemoryCatalog, OrderSession, SaleSubmissionService};
//!
//! venta_client::telemetry::init_tracing();
//!
//! let config = ClientConfig::load(None)?;
//! let service = SaleSubmissionService::from_config(&config)?;
//! let catalog = InMemoryCatalog::from_json(&catalog_document)?;
//!
//! let mut order = OrderSession::open(&catalog, device_id).await?;
//! order.toggle_add_on(7, true)?;
//! println!("Total: {}", order.quote().total);
//!
//! match order.purchase(&service).await {
//!     Ok(()) => println!("Venta realizada"),
//!     Err(e) => println!("{}", e),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod service;
pub mod session;
pub mod telemetry;
pub mod transport;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{CatalogSource, InMemoryCatalog};
pub use config::{ApiSettings, ClientConfig};
pub use error::{
    CatalogLoadError, CatalogResult, ConfigError, ConfigResult, PurchaseError, PurchaseResult,
    SubmissionError, SubmissionResult,
};
pub use service::{PendingSubmission, SaleSubmissionService};
pub use session::{OrderSession, PurchaseStatus};
pub use transport::{HttpSaleTransport, SaleTransport};

// Core types callers need alongside a session
pub use venta_core::{DeviceDetails, Money, PriceQuote, SaleRequest};
