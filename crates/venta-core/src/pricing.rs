//! # Pricing Engine
//!
//! Folds a device, the customer's selection and the add-on promotions into a
//! total. Pure and cheap: O(groups + add-ons) per call, so callers simply
//! re-run it after every selection change.
//!
//! ## Two-Stage Computation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stage 1: base_plus_customizations                                      │
//! │    base_price + Σ resolved option additional_price (default if unset)   │
//! │                                                                         │
//! │  Stage 2: total_price                                                   │
//! │    base_plus_customizations + Σ over INCLUDED add-ons of                │
//! │        0            if threshold != Never && base_plus >= threshold     │
//! │        add_on.price otherwise                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Promotion eligibility looks at stage 1 only. Other add-ons never count
//! toward a threshold, so each add-on's contribution is independent of which
//! other add-ons are checked.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::selection::SelectionState;
use crate::types::{AddOn, DeviceDetails};

// =============================================================================
// Quote Types
// =============================================================================

/// How one add-on is priced at the current spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AddOnQuote {
    pub add_on_id: i64,

    /// Whether the customer has it checked.
    pub included: bool,

    /// The threshold is met, so the add-on would cost nothing.
    pub is_promotional: bool,

    /// What it adds to the total right now (zero when not included).
    #[ts(as = "f64")]
    pub charged: Money,
}

/// Full price breakdown for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceQuote {
    #[ts(as = "f64")]
    pub base_plus_customizations: Money,

    /// One entry per add-on of the device, in catalog order.
    pub add_ons: Vec<AddOnQuote>,

    #[ts(as = "f64")]
    pub add_ons_total: Money,

    #[ts(as = "f64")]
    pub total: Money,
}

// =============================================================================
// Stage 1
// =============================================================================

/// Base price plus the resolved option of every customization group.
pub fn base_plus_customizations(details: &DeviceDetails, selection: &SelectionState) -> Money {
    details.device.base_price
        + details
            .customizations
            .iter()
            .map(|group| selection.resolved_option(group).additional_price)
            .sum::<Money>()
}

// =============================================================================
// Stage 2
// =============================================================================

/// Returns true if `add_on` is free at this level of spend.
#[inline]
pub fn is_promotional(add_on: &AddOn, base_plus_customizations: Money) -> bool {
    add_on.promotion_threshold.is_met_by(base_plus_customizations)
}

/// What an included add-on adds to the total.
pub fn add_on_contribution(add_on: &AddOn, base_plus_customizations: Money) -> Money {
    if is_promotional(add_on, base_plus_customizations) {
        Money::zero()
    } else {
        add_on.price
    }
}

/// The amount the customer pays for this selection.
pub fn total_price(details: &DeviceDetails, selection: &SelectionState) -> Money {
    let base_plus = base_plus_customizations(details, selection);

    base_plus
        + details
            .add_ons
            .iter()
            .filter(|add_on| selection.is_included(add_on.id))
            .map(|add_on| add_on_contribution(add_on, base_plus))
            .sum::<Money>()
}

/// Both stages plus the per add-on breakdown a detail view renders.
pub fn quote(details: &DeviceDetails, selection: &SelectionState) -> PriceQuote {
    let base_plus = base_plus_customizations(details, selection);

    let add_ons: Vec<AddOnQuote> = details
        .add_ons
        .iter()
        .map(|add_on| {
            let included = selection.is_included(add_on.id);
            AddOnQuote {
                add_on_id: add_on.id,
                included,
                is_promotional: is_promotional(add_on, base_plus),
                charged: if included {
                    add_on_contribution(add_on, base_plus)
                } else {
                    Money::zero()
                },
            }
        })
        .collect();

    let add_ons_total: Money = add_ons.iter().map(|q| q.charged).sum();

    PriceQuote {
        base_plus_customizations: base_plus,
        add_ons,
        add_ons_total,
        total: base_plus + add_ons_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
