//! # Sale Request
//!
//! Freezes a selection into the payload the sale endpoint expects.
//!
//! ## Wire Format
//! ```text
//! POST /ventas
//! {
//!   "idDispositivo": 1,
//!   "personalizaciones": [ { "id": 3, "precio": 10.0, "opcion": { "id": 31 } } ],
//!   "adicionales":       [ { "id": 7, "precio": 15.0 } ],
//!   "precioFinal": 110.0,
//!   "fechaVenta": "2024-12-02T13:45:00Z"
//! }
//! ```
//!
//! ## Assembly Rules
//! - Every customization group yields exactly one line, whether or not the
//!   customer touched it (untouched groups use their default option).
//! - Only add-ons flagged as included yield a line, in catalog order. The
//!   line carries the add-on's list price even when the promotion makes it
//!   free; the promotion shows up in `precioFinal`.
//! - Building never fails and performs no I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing;
use crate::selection::SelectionState;
use crate::types::DeviceDetails;
use crate::SALE_TIMESTAMP_FORMAT;

// =============================================================================
// Line Items
// =============================================================================

/// Reference to the chosen option inside a customization line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleOptionRef {
    pub id: i64,
}

/// One line per customization group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleCustomizationLine {
    /// Customization group id.
    pub id: i64,

    /// Additional price of the chosen option.
    #[serde(rename = "precio")]
    #[ts(as = "f64")]
    pub price: Money,

    #[serde(rename = "opcion")]
    pub option: SaleOptionRef,
}

/// One line per included add-on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleAddOnLine {
    pub id: i64,

    #[serde(rename = "precio")]
    #[ts(as = "f64")]
    pub price: Money,
}

// =============================================================================
// Sale Request
// =============================================================================

/// The finalized order payload. Built once per purchase attempt and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRequest {
    #[serde(rename = "idDispositivo")]
    pub device_id: i64,

    #[serde(rename = "personalizaciones")]
    pub customizations: Vec<SaleCustomizationLine>,

    #[serde(rename = "adicionales")]
    pub add_ons: Vec<SaleAddOnLine>,

    #[serde(rename = "precioFinal")]
    #[ts(as = "f64")]
    pub total_price: Money,

    /// UTC, `YYYY-MM-DDTHH:mm:ssZ`.
    #[serde(rename = "fechaVenta")]
    pub sold_at: String,
}

impl SaleRequest {
    /// Assembles a request from a selection and an already computed total.
    ///
    /// ## Arguments
    /// * `total_price` - the total the customer saw (normally
    ///   [`pricing::total_price`] for the same selection)
    /// * `sold_at` - sale time; only seconds precision reaches the wire
    pub fn build(
        details: &DeviceDetails,
        selection: &SelectionState,
        total_price: Money,
        sold_at: DateTime<Utc>,
    ) -> Self {
        let customizations = details
            .customizations
            .iter()
            .map(|group| {
                let chosen = selection.resolved_option(group);
                SaleCustomizationLine {
                    id: group.id(),
                    price: chosen.additional_price,
                    option: SaleOptionRef { id: chosen.id },
                }
            })
            .collect();

        let add_ons = details
            .add_ons
            .iter()
            .filter(|add_on| selection.is_included(add_on.id))
            .map(|add_on| SaleAddOnLine {
                id: add_on.id,
                price: add_on.price,
            })
            .collect();

        SaleRequest {
            device_id: details.device.id,
            customizations,
            add_ons,
            total_price,
            sold_at: format_sale_timestamp(sold_at),
        }
    }

    /// Assembles a request, computing the total from the same selection.
    pub fn for_selection(
        details: &DeviceDetails,
        selection: &SelectionState,
        sold_at: DateTime<Utc>,
    ) -> Self {
        let total = pricing::total_price(details, selection);
        Self::build(details, selection, total, sold_at)
    }
}

/// Formats a sale time as `YYYY-MM-DDTHH:mm:ssZ`.
pub fn format_sale_timestamp(at: DateTime<Utc>) -> String {
    at.format(SALE_TIMESTAMP_FORMAT).to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AddOn, CustomizationGroup, CustomizationOption, Device, PromotionThreshold};
    use chrono::TimeZone;
    use serde_json::json;

    fn option(id: i64, major: i64) -> CustomizationOption {
        CustomizationOption {
            id,
            name: format!("Option {}", id),
            additional_price: Money::from_major(major),
        }
    }

    fn details() -> DeviceDetails {
        DeviceDetails {
            device: Device {
                id: 1,
                name: "Pixel".to_string(),
                description: "Phone".to_string(),
                base_price: Money::from_major(100),
                currency: "USD".to_string(),
            },
            features: vec![],
            customizations: vec![
                CustomizationGroup::new(3, "Storage", vec![option(30, 0), option(31, 10)]).unwrap(),
                CustomizationGroup::new(4, "Color", vec![option(40, 0), option(41, 5)]).unwrap(),
            ],
            add_ons: vec![
                AddOn {
                    id: 7,
                    name: "Case".to_string(),
                    price: Money::from_major(15),
                    promotion_threshold: PromotionThreshold::AtLeast(Money::from_major(100)),
                },
                AddOn {
                    id: 8,
                    name: "Charger".to_string(),
                    price: Money::from_major(20),
                    promotion_threshold: PromotionThreshold::Never,
                },
            ],
        }
    }

    fn sold_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 2, 13, 45, 9).unwrap()
    }

    #[test]
    fn test_every_group_gets_a_line() {
        let details = details();
        let mut selection = SelectionState::new();
        selection.select_option("Color", option(41, 5));

        let request = SaleRequest::for_selection(&details, &selection, sold_at());

        assert_eq!(request.customizations.len(), details.customizations.len());
        assert_eq!(request.customizations[0].option.id, 30);
        assert_eq!(request.customizations[0].price, Money::zero());
        assert_eq!(request.customizations[1].option.id, 41);
        assert_eq!(request.customizations[1].price, Money::from_major(5));
    }

    #[test]
    fn test_only_included_add_ons_are_emitted() {
        let details = details();
        let mut selection = SelectionState::new();
        selection.toggle_add_on(8, true);
        selection.toggle_add_on(7, false);
        selection.toggle_add_on(99, true);

        let request = SaleRequest::for_selection(&details, &selection, sold_at());

        assert_eq!(request.add_ons, vec![SaleAddOnLine { id: 8, price: Money::from_major(20) }]);
        assert_eq!(request.total_price, Money::from_major(120));
    }

    #[test]
    fn test_promotional_add_on_keeps_list_price_on_its_line() {
        let details = details();
        let mut selection = SelectionState::new();
        selection.toggle_add_on(7, true);

        let request = SaleRequest::for_selection(&details, &selection, sold_at());

        assert_eq!(request.add_ons[0].price, Money::from_major(15));
        assert_eq!(request.total_price, Money::from_major(100));
    }

    #[test]
    fn test_device_without_groups_yields_no_lines() {
        let mut details = details();
        details.customizations.clear();
        details.add_ons.clear();

        let request = SaleRequest::for_selection(&details, &SelectionState::new(), sold_at());

        assert!(request.customizations.is_empty());
        assert!(request.add_ons.is_empty());
        assert_eq!(request.total_price, Money::from_major(100));
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 7, 3, 2).unwrap()
            + chrono::Duration::milliseconds(789);
        assert_eq!(format_sale_timestamp(at), "2024-01-05T07:03:02Z");
    }

    #[test]
    fn test_wire_shape() {
        let details = details();
        let mut selection = SelectionState::new();
        selection.select_option("Storage", option(31, 10));
        selection.toggle_add_on(7, true);

        let request = SaleRequest::for_selection(&details, &selection, sold_at());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "idDispositivo": 1,
                "personalizaciones": [
                    { "id": 3, "precio": 10.0, "opcion": { "id": 31 } },
                    { "id": 4, "precio": 0.0, "opcion": { "id": 40 } }
                ],
                "adicionales": [ { "id": 7, "precio": 15.0 } ],
                "precioFinal": 110.0,
                "fechaVenta": "2024-12-02T13:45:09Z"
            })
        );
    }
}
