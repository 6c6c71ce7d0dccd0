//! # Catalog Types
//!
//! The records the catalog collaborator hands to the core. The core only
//! reads them; they are immutable snapshots once assembled.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          DeviceDetails                                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │     Device      │   │ CustomizationGroup   │   │     AddOn       │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  id             │   │  id                  │   │  id             │  │
//! │  │  name           │   │  name (unique key)   │   │  name           │  │
//! │  │  base_price     │   │  options[0] = default│   │  price          │  │
//! │  │  currency       │   │  ┌────────────────┐  │   │  promotion_     │  │
//! │  └─────────────────┘   │  │ Customization  │  │   │    threshold    │  │
//! │                        │  │ Option         │  │   └─────────────────┘  │
//! │  ┌─────────────────┐   │  │ additional_    │  │                        │
//! │  │    Feature      │   │  │   price        │  │                        │
//! │  │  (display only) │   │  └────────────────┘  │                        │
//! │  └─────────────────┘   └──────────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! The catalog API is Spanish (`precioBase`, `personalizaciones`,
//! `precioGratis`, ...). Rust names are English; serde maps between them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{invalid_amount, Money};
use crate::NEVER_FREE_SENTINEL;

// =============================================================================
// Device
// =============================================================================

/// A purchasable catalog item with a base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Device {
    pub id: i64,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion")]
    pub description: String,

    /// Price before any customization or add-on.
    #[serde(rename = "precioBase")]
    #[ts(as = "f64")]
    pub base_price: Money,

    /// Currency code as sent by the catalog (e.g. "USD").
    #[serde(rename = "moneda")]
    pub currency: String,
}

// =============================================================================
// Feature
// =============================================================================

/// Informational attribute shown in the detail view. Never priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Feature {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion")]
    pub description: String,
}

// =============================================================================
// Customization Option
// =============================================================================

/// One selectable choice within a customization group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomizationOption {
    pub id: i64,

    #[serde(rename = "nombre")]
    pub name: String,

    /// Amount added on top of the base price. Never negative.
    #[serde(rename = "precioAdicional")]
    #[ts(as = "f64")]
    pub additional_price: Money,
}

// =============================================================================
// Customization Group
// =============================================================================

/// A named set of mutually exclusive options (e.g. storage size).
///
/// ## Invariant
/// Always holds at least one option. The first option is the implicit
/// default when the customer never picks one. Both [`CustomizationGroup::new`]
/// and deserialization enforce this, so [`CustomizationGroup::default_option`]
/// cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(try_from = "RawCustomizationGroup")]
#[ts(export)]
pub struct CustomizationGroup {
    id: i64,

    #[serde(rename = "nombre")]
    name: String,

    #[serde(rename = "opciones")]
    options: Vec<CustomizationOption>,
}

/// Unchecked deserialization target for [`CustomizationGroup`].
#[derive(Deserialize)]
struct RawCustomizationGroup {
    id: i64,
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "opciones")]
    options: Vec<CustomizationOption>,
}

impl TryFrom<RawCustomizationGroup> for CustomizationGroup {
    type Error = CoreError;

    fn try_from(raw: RawCustomizationGroup) -> CoreResult<Self> {
        CustomizationGroup::new(raw.id, raw.name, raw.options)
    }
}

impl CustomizationGroup {
    /// Creates a group, rejecting an empty option list.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        options: Vec<CustomizationOption>,
    ) -> CoreResult<Self> {
        let name = name.into();
        if options.is_empty() {
            return Err(CoreError::EmptyCustomizationGroup { group: name });
        }

        Ok(CustomizationGroup { id, name, options })
    }

    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The group name; unique within a device and used as the selection key.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options in catalog order.
    #[inline]
    pub fn options(&self) -> &[CustomizationOption] {
        &self.options
    }

    /// The option applied when the customer never chose one.
    #[inline]
    pub fn default_option(&self) -> &CustomizationOption {
        // non-empty by construction
        &self.options[0]
    }

    /// Finds an option of this group by id.
    pub fn option(&self, option_id: i64) -> Option<&CustomizationOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

// =============================================================================
// Promotion Threshold
// =============================================================================

/// Minimum base + customization spend at which an add-on becomes free.
///
/// ## Wire Format
/// ```text
///   "precioGratis": -1     ──►  PromotionThreshold::Never
///   "precioGratis": 100.0  ──►  PromotionThreshold::AtLeast(100.00)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionThreshold {
    /// The add-on is always charged.
    #[default]
    Never,

    /// Free once the customer spends at least this much (inclusive).
    AtLeast(Money),
}

impl PromotionThreshold {
    /// Returns true if `spend` unlocks the promotion.
    #[inline]
    pub fn is_met_by(&self, spend: Money) -> bool {
        match self {
            PromotionThreshold::Never => false,
            PromotionThreshold::AtLeast(threshold) => spend >= *threshold,
        }
    }

    /// The threshold amount, if the add-on can ever be free.
    #[inline]
    pub fn amount(&self) -> Option<Money> {
        match self {
            PromotionThreshold::Never => None,
            PromotionThreshold::AtLeast(threshold) => Some(*threshold),
        }
    }
}

impl Serialize for PromotionThreshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PromotionThreshold::Never => serializer.serialize_f64(NEVER_FREE_SENTINEL),
            PromotionThreshold::AtLeast(threshold) => threshold.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PromotionThreshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if amount == NEVER_FREE_SENTINEL {
            return Ok(PromotionThreshold::Never);
        }

        Money::from_decimal(amount)
            .map(PromotionThreshold::AtLeast)
            .ok_or_else(|| invalid_amount(amount))
    }
}

// =============================================================================
// Add-On
// =============================================================================

/// An optional extra with its own price that may become free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddOn {
    pub id: i64,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "precio")]
    #[ts(as = "f64")]
    pub price: Money,

    #[serde(rename = "precioGratis", default)]
    #[ts(as = "f64")]
    pub promotion_threshold: PromotionThreshold,
}

// =============================================================================
// Device Details
// =============================================================================

/// A fully assembled catalog entry: the device and everything that can be
/// attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeviceDetails {
    #[serde(rename = "dispositivo")]
    pub device: Device,

    #[serde(rename = "caracteristicas", default)]
    pub features: Vec<Feature>,

    #[serde(rename = "personalizaciones", default)]
    pub customizations: Vec<CustomizationGroup>,

    #[serde(rename = "adicionales", default)]
    pub add_ons: Vec<AddOn>,
}

impl DeviceDetails {
    /// Finds a customization group by its name.
    pub fn customization(&self, group_name: &str) -> Option<&CustomizationGroup> {
        self.customizations.iter().find(|g| g.name == group_name)
    }

    /// Finds an add-on by id.
    pub fn add_on(&self, add_on_id: i64) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.id == add_on_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn option(id: i64, cents: i64) -> CustomizationOption {
        CustomizationOption {
            id,
            name: format!("Option {}", id),
            additional_price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_group_rejects_empty_options() {
        let err = CustomizationGroup::new(1, "Color", vec![]).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCustomizationGroup { ref group } if group == "Color"));
    }

    #[test]
    fn test_group_default_is_first_option() {
        let group = CustomizationGroup::new(1, "Storage", vec![option(10, 0), option(11, 1000)]).unwrap();
        assert_eq!(group.default_option().id, 10);
        assert_eq!(group.option(11).map(|o| o.additional_price), Some(Money::from_major(10)));
        assert!(group.option(99).is_none());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let threshold = PromotionThreshold::AtLeast(Money::from_major(100));
        assert!(threshold.is_met_by(Money::from_major(100)));
        assert!(threshold.is_met_by(Money::from_major(101)));
        assert!(!threshold.is_met_by(Money::from_cents(9_999)));
        assert!(!PromotionThreshold::Never.is_met_by(Money::from_major(1_000_000)));
    }

    #[test]
    fn test_threshold_sentinel_on_the_wire() {
        let never: PromotionThreshold = serde_json::from_value(json!(-1.0)).unwrap();
        assert_eq!(never, PromotionThreshold::Never);

        let never_int: PromotionThreshold = serde_json::from_value(json!(-1)).unwrap();
        assert_eq!(never_int, PromotionThreshold::Never);

        let at: PromotionThreshold = serde_json::from_value(json!(250.5)).unwrap();
        assert_eq!(at.amount(), Some(Money::from_cents(25_050)));

        assert_eq!(serde_json::to_value(PromotionThreshold::Never).unwrap(), json!(-1.0));
    }

    #[test]
    fn test_threshold_sentinel_round_trips_through_constant() {
        let wire = serde_json::to_value(PromotionThreshold::Never).unwrap();
        assert_eq!(wire, json!(NEVER_FREE_SENTINEL));
        let back: PromotionThreshold = serde_json::from_value(wire).unwrap();
        assert_eq!(back, PromotionThreshold::Never);
    }

    #[test]
    fn test_sub_cent_threshold_is_refused() {
        let result: Result<PromotionThreshold, _> = serde_json::from_value(json!(100.004));
        assert!(result.is_err());

        let add_on: Result<AddOn, _> = serde_json::from_value(json!({
            "id": 7, "nombre": "Funda", "precio": 15.0, "precioGratis": 100.004
        }));
        assert!(add_on.is_err());
    }

    #[test]
    fn test_device_details_from_catalog_json() {
        let details: DeviceDetails = serde_json::from_value(json!({
            "dispositivo": {
                "id": 1,
                "nombre": "Pixel",
                "descripcion": "Phone",
                "precioBase": 100.0,
                "moneda": "USD"
            },
            "caracteristicas": [{ "nombre": "Pantalla", "descripcion": "6 pulgadas" }],
            "personalizaciones": [{
                "id": 3,
                "nombre": "Almacenamiento",
                "opciones": [
                    { "id": 30, "nombre": "64GB", "precioAdicional": 0 },
                    { "id": 31, "nombre": "128GB", "precioAdicional": 10.0 }
                ]
            }],
            "adicionales": [
                { "id": 7, "nombre": "Funda", "precio": 15.0, "precioGratis": 100.0 },
                { "id": 8, "nombre": "Cargador", "precio": 20.0, "precioGratis": -1 }
            ]
        }))
        .unwrap();

        assert_eq!(details.device.base_price, Money::from_major(100));
        assert_eq!(details.features.len(), 1);
        assert_eq!(details.customization("Almacenamiento").map(|g| g.id()), Some(3));
        assert_eq!(details.add_on(8).map(|a| a.promotion_threshold), Some(PromotionThreshold::Never));
    }

    #[test]
    fn test_empty_group_in_catalog_json_is_rejected() {
        let result: Result<CustomizationGroup, _> = serde_json::from_value(json!({
            "id": 3,
            "nombre": "Color",
            "opciones": []
        }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("has no options"));
    }
}
