//! # Validation Module
//!
//! Checks an assembled catalog snapshot against the assumptions the pricing
//! engine makes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Types                                                        │
//! │  └── CustomizationGroup cannot be built without an option              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (run by the catalog boundary)                    │
//! │  ├── Non-negative prices and thresholds                                │
//! │  ├── Required names                                                    │
//! │  └── Unique group names / add-on ids / device ids                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Pricing engine trusts the record from here on                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DeviceDetails, PromotionThreshold};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn non_negative(field: impl Into<String>, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::NegativeAmount {
            field: field.into(),
        });
    }
    if amount > Money::MAX_AMOUNT {
        return Err(ValidationError::AmountOutOfRange {
            field: field.into(),
        });
    }
    Ok(())
}

/// The most this device can cost: base, the dearest option of every group
/// and every add-on at full price. Keeping it under [`Money::MAX_AMOUNT`]
/// means no pricing sum over the record can overflow.
fn worst_case_total(details: &DeviceDetails) -> Option<Money> {
    let options = details.customizations.iter().map(|group| {
        group
            .options()
            .iter()
            .map(|option| option.additional_price)
            .max()
            .unwrap_or_default()
    });
    let add_ons = details.add_ons.iter().map(|add_on| add_on.price);

    options
        .chain(add_ons)
        .try_fold(details.device.base_price, Money::checked_add)
}

/// Validates one assembled device record.
///
/// ## Rules
/// - Device name and currency are required
/// - Base price, option prices, add-on prices and thresholds are >= 0 and
///   at most [`Money::MAX_AMOUNT`], and so is the device's worst-case total
/// - Customization group names are non-empty and unique (they key the
///   selection)
/// - Add-on ids are unique (they key the inclusion flags)
///
/// ## Example
/// ```rust
/// use venta_core::validation::validate_device_details;
/// use venta_core::{Device, DeviceDetails, Money};
///
/// let details = DeviceDetails {
///     device: Device {
///         id: 1,
///         name: "Pixel".into(),
///         description: String::new(),
///         base_price: Money::from_major(100),
///         currency: "USD".into(),
///     },
///     features: vec![],
///     customizations: vec![],
///     add_ons: vec![],
/// };
/// assert!(validate_device_details(&details).is_ok());
/// ```
pub fn validate_device_details(details: &DeviceDetails) -> ValidationResult<()> {
    require("device.name", &details.device.name)?;
    require("device.currency", &details.device.currency)?;
    non_negative("device.base_price", details.device.base_price)?;

    let mut group_names = HashSet::new();
    for (i, group) in details.customizations.iter().enumerate() {
        require(&format!("customizations[{}].name", i), group.name())?;
        if !group_names.insert(group.name()) {
            return Err(ValidationError::Duplicate {
                field: "customization group".to_string(),
                value: group.name().to_string(),
            });
        }

        for (j, option) in group.options().iter().enumerate() {
            non_negative(
                format!("customizations[{}].options[{}].additional_price", i, j),
                option.additional_price,
            )?;
        }
    }

    let mut add_on_ids = HashSet::new();
    for (i, add_on) in details.add_ons.iter().enumerate() {
        if !add_on_ids.insert(add_on.id) {
            return Err(ValidationError::Duplicate {
                field: "add-on id".to_string(),
                value: add_on.id.to_string(),
            });
        }

        non_negative(format!("add_ons[{}].price", i), add_on.price)?;
        if let PromotionThreshold::AtLeast(threshold) = add_on.promotion_threshold {
            non_negative(format!("add_ons[{}].promotion_threshold", i), threshold)?;
        }
    }

    match worst_case_total(details) {
        Some(total) if total <= Money::MAX_AMOUNT => Ok(()),
        _ => Err(ValidationError::AmountOutOfRange {
            field: "device total".to_string(),
        }),
    }
}

/// Validates a whole catalog: every record, plus unique device ids.
pub fn validate_catalog(devices: &[DeviceDetails]) -> ValidationResult<()> {
    let mut ids = HashSet::new();
    for details in devices {
        if !ids.insert(details.device.id) {
            return Err(ValidationError::Duplicate {
                field: "device id".to_string(),
                value: details.device.id.to_string(),
            });
        }
        validate_device_details(details)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AddOn, CustomizationGroup, CustomizationOption, Device};

    fn option(id: i64, cents: i64) -> CustomizationOption {
        CustomizationOption {
            id,
            name: format!("Option {}", id),
            additional_price: Money::from_cents(cents),
        }
    }

    fn add_on(id: i64, cents: i64, threshold: PromotionThreshold) -> AddOn {
        AddOn {
            id,
            name: format!("Add-on {}", id),
            price: Money::from_cents(cents),
            promotion_threshold: threshold,
        }
    }

    fn valid() -> DeviceDetails {
        DeviceDetails {
            device: Device {
                id: 1,
                name: "Pixel".to_string(),
                description: "Phone".to_string(),
                base_price: Money::from_major(100),
                currency: "USD".to_string(),
            },
            features: vec![],
            customizations: vec![CustomizationGroup::new(3, "Storage", vec![option(30, 0)]).unwrap()],
            add_ons: vec![add_on(7, 1500, PromotionThreshold::Never)],
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(validate_device_details(&valid()).is_ok());
    }

    #[test]
    fn test_missing_name_fails() {
        let mut details = valid();
        details.device.name = "  ".to_string();
        assert_eq!(
            validate_device_details(&details),
            Err(ValidationError::Required {
                field: "device.name".to_string()
            })
        );
    }

    #[test]
    fn test_negative_prices_fail() {
        let mut details = valid();
        details.device.base_price = Money::from_cents(-1);
        assert!(matches!(
            validate_device_details(&details),
            Err(ValidationError::NegativeAmount { .. })
        ));

        let mut details = valid();
        details.customizations =
            vec![CustomizationGroup::new(3, "Storage", vec![option(30, -500)]).unwrap()];
        assert_eq!(
            validate_device_details(&details),
            Err(ValidationError::NegativeAmount {
                field: "customizations[0].options[0].additional_price".to_string()
            })
        );

        let mut details = valid();
        details.add_ons = vec![add_on(7, 100, PromotionThreshold::AtLeast(Money::from_cents(-5)))];
        assert!(validate_device_details(&details).is_err());
    }

    #[test]
    fn test_amount_above_maximum_fails() {
        let mut details = valid();
        details.device.base_price = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        assert_eq!(
            validate_device_details(&details),
            Err(ValidationError::AmountOutOfRange {
                field: "device.base_price".to_string()
            })
        );
    }

    #[test]
    fn test_worst_case_total_is_bounded() {
        let mut details = valid();
        details.device.base_price = Money::MAX_AMOUNT;
        let priciest = option(31, Money::MAX_AMOUNT.cents());
        details.customizations =
            vec![CustomizationGroup::new(3, "Storage", vec![option(30, 0), priciest]).unwrap()];
        assert_eq!(
            validate_device_details(&details),
            Err(ValidationError::AmountOutOfRange {
                field: "device total".to_string()
            })
        );

        // Exactly at the bound is accepted and prices without overflow
        let mut details = valid();
        details.device.base_price = Money::from_cents(Money::MAX_AMOUNT.cents() - 1500);
        assert!(validate_device_details(&details).is_ok());

        let mut selection = crate::selection::SelectionState::new();
        selection.toggle_add_on(7, true);
        assert_eq!(crate::pricing::total_price(&details, &selection), Money::MAX_AMOUNT);
    }

    #[test]
    fn test_duplicates_fail() {
        let mut details = valid();
        details
            .customizations
            .push(CustomizationGroup::new(4, "Storage", vec![option(40, 0)]).unwrap());
        assert!(matches!(
            validate_device_details(&details),
            Err(ValidationError::Duplicate { ref value, .. }) if value == "Storage"
        ));

        let mut details = valid();
        details.add_ons.push(add_on(7, 200, PromotionThreshold::Never));
        assert!(matches!(
            validate_device_details(&details),
            Err(ValidationError::Duplicate { ref value, .. }) if value == "7"
        ));
    }

    #[test]
    fn test_catalog_rejects_duplicate_device_ids() {
        let catalog = vec![valid(), valid()];
        assert!(matches!(
            validate_catalog(&catalog),
            Err(ValidationError::Duplicate { ref field, .. }) if field == "device id"
        ));
        assert!(validate_catalog(&catalog[..1]).is_ok());
    }
}
