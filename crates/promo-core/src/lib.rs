//! # promo-core: Pure Coupon Pricing Logic
//!
//! This crate is the pricing **heart** of the storefront. It contains the
//! coupon/discount application engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  Frontend (TypeScript)                          │    │
//! │  │    Cart UI ──► Coupon field ──► Checkout ──► Order confirmation │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                 API route handlers (caller)                     │    │
//! │  │    fetch CouponDefinitions + UsageTallies from the database,    │    │
//! │  │    assemble PricingInput, persist redemptions after capture     │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ promo-core (THIS CRATE) ★                       │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │  engine   │  │ validation│    │    │
//! │  │   │  Coupon   │  │   Money   │  │ selection │  │   rules   │    │    │
//! │  │   │  Cart line│  │ cents math│  │ + applying│  │   checks  │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CouponDefinition, CartLineItem, PricingResult, ...)
//! - [`money`] - Money type with integer-cents arithmetic (no floating point!)
//! - [`engine`] - The deterministic coupon selection + application pass
//! - [`error`] - Caller-contract validation errors
//! - [`validation`] - Input range/shape checks for callers
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, every time; the
//!    reference time is a parameter, never a clock read
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here;
//!    coupon metadata and usage tallies arrive pre-fetched from the caller
//! 3. **Integer Money**: all discount math is in cents (i64); major-unit
//!    decimals exist only at the input/output boundary
//! 4. **Rejections Are Data**: business-rule failures are message codes in
//!    the result, never errors or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use chrono::Utc;
//! use promo_core::{compute_pricing, CartLineItem, CouponDefinition, DiscountKind, PricingInput};
//!
//! let input = PricingInput {
//!     now: Utc::now(),
//!     user_id: None,
//!     items: vec![CartLineItem {
//!         id: "line-1".to_string(),
//!         product_id: None,
//!         collection_ids: vec![],
//!         quantity: 1,
//!         unit_price: 50.0,
//!     }],
//!     shipping: None,
//!     coupons: vec![CouponDefinition {
//!         code: "TENOFF".to_string(),
//!         kind: DiscountKind::Fixed { cents: 1000 },
//!         enabled: true,
//!         starts_at: None,
//!         ends_at: None,
//!         max_redemptions: None,
//!         max_redemptions_per_user: None,
//!         min_subtotal_cents: None,
//!         allowed_product_ids: vec![],
//!         excluded_product_ids: vec![],
//!         allowed_collection_ids: vec![],
//!         excluded_collection_ids: vec![],
//!         stackable: false,
//!     }],
//!     usage: HashMap::new(),
//!     codes_order: None,
//! };
//!
//! let result = compute_pricing(&input);
//! assert_eq!(result.subtotal_after, 40.0);
//! assert_eq!(result.normalized_codes, vec!["TENOFF"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use promo_core::Money` instead of
// `use promo_core::money::Money`

pub use engine::compute_pricing;
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum accepted length for a user-presented coupon code.
///
/// ## Business Reason
/// Codes are short marketing strings; anything longer is a paste accident
/// or an abuse attempt, and rejecting it early keeps log lines sane.
pub const MAX_CODE_LENGTH: usize = 64;

/// Upper bound for a percentage discount value.
///
/// A coupon can give away the whole eligible subtotal, never more. The
/// engine also clamps at compute time, so an out-of-range value sneaking
/// past validation still cannot produce a negative subtotal.
pub const MAX_PERCENT: u32 = 100;
