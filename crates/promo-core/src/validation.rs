//! # Validation Module
//!
//! Caller-contract pre-checks for pricing input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront frontend (TypeScript)                              │
//! │  ├── Basic format checks (empty code, quantity bounds)                  │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API route handler (caller of this crate)                      │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: range/shape checks the type system can't express      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: compute_pricing                                               │
//! │  └── Assumes valid input; business rules become messages, not errors    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These helpers are for callers. `compute_pricing` never invokes them:
//! the engine is infallible by contract, and malformed input is a caller
//! bug caught here, one layer up.
//!
//! ## Usage
//! ```rust,no_run
//! use promo_core::validation::{validate_code, validate_quantity};
//!
//! validate_code("SAVE10").unwrap();
//! validate_quantity(3).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{CartLineItem, CouponDefinition, DiscountKind, PricingInput};
use crate::{MAX_CODE_LENGTH, MAX_PERCENT};

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a user-presented coupon code.
///
/// ## Rules
/// - Must not be blank after trimming
/// - At most [`MAX_CODE_LENGTH`] characters
pub fn validate_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a major-unit amount (unit price, shipping fee).
///
/// ## Rules
/// - Must be finite (no NaN/infinity smuggled through JSON layers)
/// - Must be non-negative; zero is allowed (free items, free shipping)
pub fn validate_amount(field: &str, amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    Ok(())
}

/// Validates one coupon definition's value fields.
///
/// ## Rules
/// - Percent coupons: `valuePct` in `[0, 100]`
/// - Fixed coupons: `valueCents` non-negative
/// - Caps and minimums, when present: non-negative
pub fn validate_coupon(coupon: &CouponDefinition) -> ValidationResult<()> {
    validate_code(&coupon.code)?;

    match coupon.kind {
        DiscountKind::Percent { pct } => {
            if pct > MAX_PERCENT {
                return Err(ValidationError::OutOfRange {
                    field: "valuePct".to_string(),
                    min: 0,
                    max: MAX_PERCENT as i64,
                });
            }
        }
        DiscountKind::Fixed { cents } => {
            if cents < 0 {
                return Err(ValidationError::InvalidFormat {
                    field: "valueCents".to_string(),
                    reason: "must not be negative".to_string(),
                });
            }
        }
        DiscountKind::FreeShipping => {}
    }

    for (field, value) in [
        ("maxRedemptions", coupon.max_redemptions),
        ("maxRedemptionsPerUser", coupon.max_redemptions_per_user),
        ("minSubtotalCents", coupon.min_subtotal_cents),
    ] {
        if let Some(v) = value {
            if v < 0 {
                return Err(ValidationError::InvalidFormat {
                    field: field.to_string(),
                    reason: "must not be negative".to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Validates one cart line.
pub fn validate_line_item(item: &CartLineItem) -> ValidationResult<()> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    validate_quantity(item.quantity)?;
    validate_amount("unitPrice", item.unit_price)?;

    Ok(())
}

// =============================================================================
// Whole-Input Validator
// =============================================================================

/// Validates a full pricing input before it is handed to the engine.
///
/// Returns the first violation found. Callers that want to skip this and
/// trust their own upstream validation may: `compute_pricing` is total
/// over well-typed input either way.
pub fn validate_pricing_input(input: &PricingInput) -> ValidationResult<()> {
    for item in &input.items {
        validate_line_item(item)?;
    }

    if let Some(shipping) = &input.shipping {
        validate_amount("fee", shipping.fee)?;
    }

    for coupon in &input.coupons {
        validate_coupon(coupon)?;
    }

    if let Some(codes) = &input.codes_order {
        for code in codes {
            validate_code(code)?;
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
