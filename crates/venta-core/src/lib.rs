//! # venta-core: Pure Pricing Logic for Venta
//!
//! This crate is the **heart** of Venta. It turns a catalog device plus the
//! customer's in-progress choices into a price, and freezes those choices
//! into the sale request the backend expects. Zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Venta Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation Layer                           │   │
//! │  │    Device List ──► Detail View ──► Total ──► Comprar            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               venta-client (OrderSession)                       │   │
//! │  │    select_option, toggle_add_on, quote, purchase                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ venta-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │selection │ │ pricing  │ │   sale   │          │   │
//! │  │   │ Device   │ │ choices  │ │ PriceQuo │ │ SaleReq  │          │   │
//! │  │   │ AddOn    │ │ toggles  │ │ promos   │ │ builder  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (Device, CustomizationGroup, AddOn, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`selection`] - The in-progress order configuration
//! - [`pricing`] - Base + customizations + promotional add-ons
//! - [`sale`] - Sale request wire format and builder
//! - [`validation`] - Catalog snapshot checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use venta_core::{pricing, AddOn, Device, DeviceDetails, Money, PromotionThreshold, SelectionState};
//!
//! let details = DeviceDetails {
//!     device: Device {
//!         id: 1,
//!         name: "Phone".into(),
//!         description: "A phone".into(),
//!         base_price: Money::from_major(100),
//!         currency: "USD".into(),
//!     },
//!     features: vec![],
//!     customizations: vec![],
//!     add_ons: vec![AddOn {
//!         id: 7,
//!         name: "Case".into(),
//!         price: Money::from_major(20),
//!         promotion_threshold: PromotionThreshold::Never,
//!     }],
//! };
//!
//! let mut selection = SelectionState::new();
//! assert_eq!(pricing::total_price(&details, &selection), Money::from_major(100));
//!
//! selection.toggle_add_on(7, true);
//! assert_eq!(pricing::total_price(&details, &selection), Money::from_major(120));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod sale;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{AddOnQuote, PriceQuote};
pub use sale::{SaleAddOnLine, SaleOptionRef, SaleCustomizationLine, SaleRequest};
pub use selection::SelectionState;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Wire value the catalog uses for "this add-on is never free".
pub const NEVER_FREE_SENTINEL: f64 = -1.0;

/// `fechaVenta` format: UTC, seconds precision, literal trailing `Z`.
pub const SALE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
