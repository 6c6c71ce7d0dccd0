//! # Error Types
//!
//! Domain-specific error types for venta-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  venta-core errors (this file)                                          │
//! │  ├── CoreError        - Domain errors                                   │
//! │  └── ValidationError  - Catalog record validation failures              │
//! │                                                                         │
//! │  venta-client errors (separate crate)                                   │
//! │  ├── SubmissionError  - Sale endpoint failures                          │
//! │  ├── CatalogLoadError - Catalog boundary failures                       │
//! │  └── PurchaseError    - Session guard violations                        │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogLoadError → Presentation layer          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing and sale assembly never fail: a missing choice resolves to the
//! group default. Only malformed catalog input produces errors here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A customization group arrived without any options, so it has no
    /// default to fall back on.
    #[error("Customization group '{group}' has no options")]
    EmptyCustomizationGroup { group: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog validation errors.
///
/// Raised when an assembled catalog record breaks an assumption the pricing
/// engine relies on.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A price that must not be negative is negative.
    #[error("{field} must not be negative")]
    NegativeAmount { field: String },

    /// Duplicate value (group name, add-on id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// An amount, or the most a device can cost, is above `Money::MAX_AMOUNT`.
    #[error("{field} exceeds the maximum amount")]
    AmountOutOfRange { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of constructing checked catalog types.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::EmptyCustomizationGroup {
            group: "Almacenamiento".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Customization group 'Almacenamiento' has no options"
        );

        let err = ValidationError::NegativeAmount {
            field: "add_ons[0].price".to_string(),
        };
        assert_eq!(err.to_string(), "add_ons[0].price must not be negative");
    }
}
