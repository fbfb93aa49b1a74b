//! # Domain Types
//!
//! Core domain types for the promo pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │  CartLineItem   │   │ CouponDefinition│   │ ShippingCharge  │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id             │   │  code           │   │  provider       │        │
//! │  │  product_id?    │   │  kind (tagged)  │   │  fee            │        │
//! │  │  collection_ids │   │  window/caps    │   └─────────────────┘        │
//! │  │  qty, unit_price│   │  allow/deny     │                              │
//! │  └─────────────────┘   │  stackable      │   ┌─────────────────┐        │
//! │                        └─────────────────┘   │   UsageTally    │        │
//! │  ┌─────────────────┐                         │  ─────────────  │        │
//! │  │  DiscountKind   │   PricingInput ──────►  │  total          │        │
//! │  │  ─────────────  │   compute_pricing       │  per_user       │        │
//! │  │  Percent { pct }│         │               └─────────────────┘        │
//! │  │  Fixed { cents }│         ▼                                          │
//! │  │  FreeShipping   │   PricingResult (applied codes, messages, totals)  │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sum Types Over String Tags
//! The discount variant is a tagged enum with associated data: percentage
//! coupons carry `pct`, fixed coupons carry `cents`, free-shipping coupons
//! carry nothing. The compiler enforces that percent values are never read
//! off a fixed coupon and vice versa — the two fields are logically
//! distinct and must never be conflated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Cart Line Item
// =============================================================================

/// One line in the cart being priced.
///
/// Constructed by the caller from current cart state before each pricing
/// pass. Immutable input: the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Unique line identifier.
    pub id: String,

    /// Product identifier, used for eligibility matching. A line without
    /// one can never satisfy a product allow-list.
    pub product_id: Option<String>,

    /// Collections the product belongs to, used for eligibility matching.
    #[serde(default)]
    pub collection_ids: Vec<String>,

    /// Positive integer count.
    pub quantity: i64,

    /// Non-negative unit price in major currency units (e.g., dollars).
    pub unit_price: f64,
}

impl CartLineItem {
    /// The line subtotal in cents: `round(unit_price × 100) × quantity`.
    ///
    /// Rounding happens per unit, before the quantity multiply, so a cart
    /// with qty 3 of a $0.999 item prices as 3 × 100 cents, matching what
    /// the storefront displays per unit.
    pub fn subtotal(&self) -> Money {
        Money::from_major_units(self.unit_price).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// Tag distinguishing supported shipping fee sources.
///
/// Only fees the storefront itself quoted can be zeroed out by a
/// free-shipping coupon; `Other` covers fee sources the engine does not
/// recognize and must not discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingProvider {
    /// Flat-rate fee configured by the merchant.
    Flat,
    /// Fee calculated by the payment processor at checkout.
    ProcessorCalculated,
    /// Unrecognized fee source.
    Other,
}

impl ShippingProvider {
    /// Whether a free-shipping coupon may discount fees from this source.
    #[inline]
    pub const fn supports_free_shipping(&self) -> bool {
        matches!(self, ShippingProvider::Flat | ShippingProvider::ProcessorCalculated)
    }
}

/// Optional shipping fee context. Only relevant to free-shipping coupons.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingCharge {
    pub provider: ShippingProvider,
    /// Non-negative fee in major currency units.
    pub fee: f64,
}

impl ShippingCharge {
    /// The fee in cents.
    #[inline]
    pub fn fee_cents(&self) -> Money {
        Money::from_major_units(self.fee)
    }
}

// =============================================================================
// Discount Kind
// =============================================================================

/// The discount a coupon grants, as a tagged union.
///
/// ## Wire Shape
/// Serializes with a `type` tag matching the storefront schema:
/// `{"type": "PERCENT", "valuePct": 33}`, `{"type": "FIXED",
/// "valueCents": 1000}`, `{"type": "FREESHIP"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type")]
pub enum DiscountKind {
    /// Percentage off the eligible subtotal, floor-rounded to the cent.
    #[serde(rename = "PERCENT")]
    Percent {
        /// Whole percentage, 0–100. Clamped at compute time.
        #[serde(rename = "valuePct")]
        pct: u32,
    },
    /// Fixed amount off, in integer cents.
    #[serde(rename = "FIXED")]
    Fixed {
        #[serde(rename = "valueCents")]
        cents: i64,
    },
    /// Zeroes out a supported shipping fee.
    #[serde(rename = "FREESHIP")]
    FreeShipping,
}

impl DiscountKind {
    /// The bare variant tag, for the output breakdown.
    pub const fn discount_type(&self) -> DiscountType {
        match self {
            DiscountKind::Percent { .. } => DiscountType::Percent,
            DiscountKind::Fixed { .. } => DiscountType::Fixed,
            DiscountKind::FreeShipping => DiscountType::Freeship,
        }
    }
}

/// Bare discount type tag reported per applied coupon in `PricingResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DiscountType {
    #[serde(rename = "PERCENT")]
    Percent,
    #[serde(rename = "FIXED")]
    Fixed,
    #[serde(rename = "FREESHIP")]
    Freeship,
}

// =============================================================================
// Coupon Definition
// =============================================================================

/// Normalized metadata for one coupon code.
///
/// Looked up by the caller (typically from the database) before invocation.
/// Immutable reference data for the duration of one pricing call: the
/// engine never mutates or persists it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CouponDefinition {
    /// Case-insensitive identifier. The engine compares the trimmed,
    /// uppercased form.
    pub code: String,

    /// What the coupon grants. Flattened on the wire, so the `type` tag
    /// and value field sit beside `code` as the storefront schema expects.
    #[serde(flatten)]
    pub kind: DiscountKind,

    /// Disabled coupons are always rejected.
    pub enabled: bool,

    /// Activation window start (inclusive); absent means unbounded.
    #[ts(as = "Option<String>")]
    pub starts_at: Option<DateTime<Utc>>,

    /// Activation window end (inclusive); absent means unbounded.
    #[ts(as = "Option<String>")]
    pub ends_at: Option<DateTime<Utc>>,

    /// Global usage cap across all users.
    pub max_redemptions: Option<i64>,

    /// Per-user usage cap.
    pub max_redemptions_per_user: Option<i64>,

    /// Minimum pre-discount cart subtotal, in cents, required to qualify.
    pub min_subtotal_cents: Option<i64>,

    /// Allow-list of product identifiers. Non-empty: only these lines are
    /// eligible.
    #[serde(default)]
    pub allowed_product_ids: Vec<String>,

    /// Deny-list of product identifiers. Removes lines even if otherwise
    /// allowed.
    #[serde(default)]
    pub excluded_product_ids: Vec<String>,

    /// Allow-list of collection identifiers, same purpose at the
    /// collection level.
    #[serde(default)]
    pub allowed_collection_ids: Vec<String>,

    /// Deny-list of collection identifiers.
    #[serde(default)]
    pub excluded_collection_ids: Vec<String>,

    /// Whether this coupon may combine with others in the same pass.
    pub stackable: bool,
}

impl CouponDefinition {
    /// The trimmed, uppercased form of the code. All lookups and all
    /// output use this form.
    pub fn normalized_code(&self) -> String {
        normalize_code(&self.code)
    }

    /// Whether the coupon is enabled and `now` falls inside the
    /// activation window (inclusive at both ends).
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        if !self.enabled {
            return false;
        }
        if let Some(starts_at) = self.starts_at {
            if now < starts_at {
                return false;
            }
        }
        if let Some(ends_at) = self.ends_at {
            if now > ends_at {
                return false;
            }
        }
        true
    }

    /// Whether a cart line passes this coupon's allow/deny-list filters.
    ///
    /// Product-level and collection-level filters must BOTH pass. A line
    /// with no product id cannot satisfy a non-empty product allow-list;
    /// a line with no collections cannot satisfy a non-empty collection
    /// allow-list.
    pub fn line_eligible(&self, item: &CartLineItem) -> bool {
        // Product level
        if !self.allowed_product_ids.is_empty() {
            match &item.product_id {
                Some(pid) if self.allowed_product_ids.contains(pid) => {}
                _ => return false,
            }
        }
        if !self.excluded_product_ids.is_empty() {
            if let Some(pid) = &item.product_id {
                if self.excluded_product_ids.contains(pid) {
                    return false;
                }
            }
        }

        // Collection level
        if !self.allowed_collection_ids.is_empty()
            && !item
                .collection_ids
                .iter()
                .any(|c| self.allowed_collection_ids.contains(c))
        {
            return false;
        }
        if !self.excluded_collection_ids.is_empty()
            && item
                .collection_ids
                .iter()
                .any(|c| self.excluded_collection_ids.contains(c))
        {
            return false;
        }

        true
    }
}

/// Trims whitespace and uppercases a user-presented code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// =============================================================================
// Usage Tally
// =============================================================================

/// Per-code redemption counters supplied by the caller.
///
/// Used only for cap enforcement. The engine never updates these;
/// incrementing tallies on successful order completion is the caller's
/// responsibility (a database transaction, outside this crate).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UsageTally {
    /// All-time redemptions across all users.
    pub total: i64,
    /// Redemptions by the requesting user.
    pub per_user: i64,
}

// =============================================================================
// Pricing Input
// =============================================================================

/// Everything `compute_pricing` needs, supplied explicitly by the caller.
///
/// No clock, no storage, no globals: the reference time is pinned here so
/// tests can pin it too, and coupon metadata plus usage tallies arrive
/// pre-fetched.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    /// Reference timestamp for activation-window checks.
    #[ts(as = "String")]
    pub now: DateTime<Utc>,

    /// When absent, per-user caps are not enforced (anonymous/guest cart).
    pub user_id: Option<String>,

    pub items: Vec<CartLineItem>,

    pub shipping: Option<ShippingCharge>,

    /// The full candidate set the caller believes might apply.
    pub coupons: Vec<CouponDefinition>,

    /// Prior redemption counts, keyed by normalized code. A missing entry
    /// means no tally exists for that code.
    #[serde(default)]
    pub usage: HashMap<String, UsageTally>,

    /// Explicit ordering of codes to attempt (e.g., the order the user
    /// typed them). When absent, the engine uses the order of `coupons`.
    pub codes_order: Option<Vec<String>>,
}

// =============================================================================
// Rejection Reasons
// =============================================================================

/// Machine-readable reason a considered code was not applied.
///
/// These are business-rule outcomes, never errors: the engine reports them
/// in `PricingResult::messages` and keeps evaluating the remaining codes.
/// The storefront maps each to human-readable UI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RejectionReason {
    /// Code does not match any supplied coupon definition.
    #[serde(rename = "coupon.not_found")]
    NotFound,
    /// Disabled or outside the active date window.
    #[serde(rename = "coupon.inactive")]
    Inactive,
    /// Global redemption cap reached.
    #[serde(rename = "coupon.exhausted")]
    Exhausted,
    /// Per-user redemption cap reached.
    #[serde(rename = "coupon.user_cap")]
    UserCap,
    /// Cart subtotal below the required minimum.
    #[serde(rename = "coupon.min_subtotal")]
    MinSubtotal,
    /// Would combine with a non-stackable selection.
    #[serde(rename = "coupon.not_stackable")]
    NotStackable,
    /// Free-shipping coupon but no positive shipping fee present.
    #[serde(rename = "coupon.no_shipping_fee")]
    NoShippingFee,
    /// Free-shipping coupon but the shipping provider is not recognized.
    #[serde(rename = "coupon.unsupported_shipping")]
    UnsupportedShipping,
    /// Percent/fixed coupon but no cart lines pass its eligibility filters.
    #[serde(rename = "coupon.no_eligible_items")]
    NoEligibleItems,
}

impl RejectionReason {
    /// The `coupon.*` wire string, identical to the serde form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::NotFound => "coupon.not_found",
            RejectionReason::Inactive => "coupon.inactive",
            RejectionReason::Exhausted => "coupon.exhausted",
            RejectionReason::UserCap => "coupon.user_cap",
            RejectionReason::MinSubtotal => "coupon.min_subtotal",
            RejectionReason::NotStackable => "coupon.not_stackable",
            RejectionReason::NoShippingFee => "coupon.no_shipping_fee",
            RejectionReason::UnsupportedShipping => "coupon.unsupported_shipping",
            RejectionReason::NoEligibleItems => "coupon.no_eligible_items",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in `PricingResult::messages`: a code that was considered but
/// not applied, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingMessage {
    /// Normalized code.
    pub code: String,
    pub reason: RejectionReason,
}

// =============================================================================
// Pricing Result
// =============================================================================

/// One applied coupon's contribution to the discount breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    /// Normalized code.
    pub code: String,
    /// Discount variant tag.
    #[serde(rename = "type")]
    pub discount_type: DiscountType,
    /// Actual discount contributed, in major currency units.
    pub amount: f64,
}

/// The output of one pricing pass. All amounts are in major currency
/// units; internally everything was integer cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Applied coupons in application order, with per-code amounts.
    pub codes_applied: Vec<AppliedCoupon>,

    /// Amount subtracted from the shipping fee. Zero if no free-shipping
    /// coupon applied or no shipping charge was supplied.
    pub shipping_discount: f64,

    /// Cart subtotal before discounts.
    pub subtotal_before: f64,

    /// Cart subtotal after discounts. Never negative.
    pub subtotal_after: f64,

    /// `subtotal_before − subtotal_after + shipping_discount`, reported
    /// directly so the caller never recomputes it and drifts from the
    /// line-by-line amounts.
    pub discount_total: f64,

    /// One entry per code that was considered but not applied.
    pub messages: Vec<PricingMessage>,

    /// The codes that were actually applied, normalized — for
    /// persistence/auditing by the caller.
    pub normalized_codes: Vec<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn coupon(code: &str) -> CouponDefinition {
        CouponDefinition {
            code: code.to_string(),
            kind: DiscountKind::Percent { pct: 10 },
            enabled: true,
            starts_at: None,
            ends_at: None,
            max_redemptions: None,
            max_redemptions_per_user: None,
            min_subtotal_cents: None,
            allowed_product_ids: vec![],
            excluded_product_ids: vec![],
            allowed_collection_ids: vec![],
            excluded_collection_ids: vec![],
            stackable: false,
        }
    }

    fn line(product_id: Option<&str>, collections: &[&str]) -> CartLineItem {
        CartLineItem {
            id: "line-1".to_string(),
            product_id: product_id.map(str::to_string),
            collection_ids: collections.iter().map(|c| c.to_string()).collect(),
            quantity: 1,
            unit_price: 10.0,
        }
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  save10 "), "SAVE10");
        assert_eq!(normalize_code("SAVE10"), "SAVE10");
        assert_eq!(normalize_code("\tMix3dCase\n"), "MIX3DCASE");
    }

    #[test]
    fn test_line_subtotal_rounds_per_unit() {
        let item = CartLineItem {
            id: "l1".to_string(),
            product_id: None,
            collection_ids: vec![],
            quantity: 3,
            unit_price: 0.999,
        };
        // round(0.999 × 100) = 100 cents per unit, × 3
        assert_eq!(item.subtotal().cents(), 300);
    }

    #[test]
    fn test_activation_window_inclusive() {
        let mut c = coupon("WINDOW");
        c.starts_at = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        c.ends_at = Some(Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap());

        let start = c.starts_at.unwrap();
        let end = c.ends_at.unwrap();
        assert!(c.is_active_at(start));
        assert!(c.is_active_at(end));
        assert!(!c.is_active_at(start - chrono::Duration::seconds(1)));
        assert!(!c.is_active_at(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_disabled_never_active() {
        let mut c = coupon("OFF");
        c.enabled = false;
        assert!(!c.is_active_at(Utc::now()));
    }

    #[test]
    fn test_product_allow_list() {
        let mut c = coupon("PROD");
        c.allowed_product_ids = vec!["p1".to_string()];

        assert!(c.line_eligible(&line(Some("p1"), &[])));
        assert!(!c.line_eligible(&line(Some("p2"), &[])));
        // No product id can never satisfy an allow-list
        assert!(!c.line_eligible(&line(None, &[])));
    }

    #[test]
    fn test_product_deny_list_beats_allow_list() {
        let mut c = coupon("PROD");
        c.allowed_product_ids = vec!["p1".to_string()];
        c.excluded_product_ids = vec!["p1".to_string()];
        assert!(!c.line_eligible(&line(Some("p1"), &[])));
    }

    #[test]
    fn test_collection_filters() {
        let mut c = coupon("COLL");
        c.allowed_collection_ids = vec!["summer".to_string()];

        assert!(c.line_eligible(&line(None, &["summer", "sale"])));
        assert!(!c.line_eligible(&line(None, &["winter"])));
        assert!(!c.line_eligible(&line(None, &[])));

        c.excluded_collection_ids = vec!["clearance".to_string()];
        assert!(!c.line_eligible(&line(None, &["summer", "clearance"])));
    }

    #[test]
    fn test_both_filter_levels_must_pass() {
        let mut c = coupon("BOTH");
        c.allowed_product_ids = vec!["p1".to_string()];
        c.allowed_collection_ids = vec!["summer".to_string()];

        assert!(c.line_eligible(&line(Some("p1"), &["summer"])));
        assert!(!c.line_eligible(&line(Some("p1"), &["winter"])));
        assert!(!c.line_eligible(&line(Some("p2"), &["summer"])));
    }

    #[test]
    fn test_shipping_provider_support() {
        assert!(ShippingProvider::Flat.supports_free_shipping());
        assert!(ShippingProvider::ProcessorCalculated.supports_free_shipping());
        assert!(!ShippingProvider::Other.supports_free_shipping());
    }

    #[test]
    fn test_discount_kind_wire_shape() {
        let percent = DiscountKind::Percent { pct: 33 };
        assert_eq!(
            serde_json::to_value(percent).unwrap(),
            serde_json::json!({"type": "PERCENT", "valuePct": 33})
        );

        let fixed = DiscountKind::Fixed { cents: 1000 };
        assert_eq!(
            serde_json::to_value(fixed).unwrap(),
            serde_json::json!({"type": "FIXED", "valueCents": 1000})
        );

        let freeship = DiscountKind::FreeShipping;
        assert_eq!(
            serde_json::to_value(freeship).unwrap(),
            serde_json::json!({"type": "FREESHIP"})
        );
    }

    #[test]
    fn test_coupon_definition_wire_round_trip() {
        // The actual input boundary: the discount tag and value sit
        // flattened beside the camelCase coupon fields, and absent
        // optional fields default.
        let json = serde_json::json!({
            "code": "Save10",
            "type": "FIXED",
            "valueCents": 1000,
            "enabled": true,
            "maxRedemptions": 5,
            "allowedProductIds": ["p1"],
            "stackable": false
        });

        let coupon: CouponDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(coupon.kind, DiscountKind::Fixed { cents: 1000 });
        assert_eq!(coupon.code, "Save10");
        assert_eq!(coupon.max_redemptions, Some(5));
        assert_eq!(coupon.max_redemptions_per_user, None);
        assert_eq!(coupon.starts_at, None);
        assert_eq!(coupon.allowed_product_ids, vec!["p1"]);
        assert!(coupon.excluded_product_ids.is_empty());

        let out = serde_json::to_value(&coupon).unwrap();
        assert_eq!(out["type"], "FIXED");
        assert_eq!(out["valueCents"], 1000);
        assert_eq!(out["code"], "Save10");
        assert_eq!(out["minSubtotalCents"], serde_json::Value::Null);
    }

    #[test]
    fn test_rejection_reason_wire_strings() {
        assert_eq!(RejectionReason::NotFound.as_str(), "coupon.not_found");
        assert_eq!(
            serde_json::to_value(RejectionReason::NotStackable).unwrap(),
            serde_json::json!("coupon.not_stackable")
        );
        assert_eq!(RejectionReason::UserCap.to_string(), "coupon.user_cap");
    }
}
