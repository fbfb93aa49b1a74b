//! # Error Types
//!
//! Caller-contract validation errors for promo-core.
//!
//! ## Two Kinds of "Failure"
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Business-rule rejections (unknown code, inactive, capped, ...)         │
//! │  └── NOT errors. Reported as RejectionReason messages inside            │
//! │      PricingResult; the pricing pass always completes.                  │
//! │                                                                         │
//! │  Caller-contract violations (negative quantity, percent > 100, ...)     │
//! │  └── ValidationError (this file). Returned by the validation            │
//! │      helpers BEFORE pricing runs; compute_pricing itself never          │
//! │      returns an error.                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller-supplied input violates the type contract in a
/// way the type system alone cannot express (value ranges, blank strings).
/// Used for early validation before the pricing pass runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid value (e.g., NaN price, negative fee).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
