//! # Pricing Engine
//!
//! The deterministic coupon application pass.
//!
//! ## One Pass, Two Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute_pricing(input)                             │
//! │                                                                         │
//! │  Phase 1: SELECTION (which codes get a slot)                            │
//! │     normalize codes ──► attempt order ──► per-code gates:               │
//! │       known? ─► active? ─► global cap? ─► user cap? ─► min subtotal?    │
//! │       ─► stacking rule                                                  │
//! │     Every failed gate records a message; the walk never stops early.    │
//! │                                                                         │
//! │  Phase 2: APPLICATION (how much each selected code discounts)           │
//! │     walk selected codes in order against the RUNNING subtotal:          │
//! │       FREESHIP  ─► zero out the remaining supported shipping fee        │
//! │       PERCENT   ─► floor(eligible × pct / 100), clamped to running      │
//! │       FIXED     ─► min(valueCents, eligible), clamped to running        │
//! │     where "eligible" is the allow/deny-filtered line subtotal,          │
//! │     itself capped at the running subtotal.                              │
//! │                                                                         │
//! │  All math in integer cents. Major units only at the output boundary.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! No I/O, no randomness, no clock access beyond the caller-supplied
//! `now`. Identical inputs always produce identical output, so concurrent
//! checkout requests can share nothing and race on nothing. Guarding
//! usage-tally reads and redemption writes is the caller's transaction,
//! not this function's concern.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::money::Money;
use crate::types::{
    normalize_code, AppliedCoupon, CartLineItem, CouponDefinition, DiscountKind, PricingInput,
    PricingMessage, PricingResult, RejectionReason,
};

/// Computes which candidate coupon codes apply to the cart, in what order,
/// and how much discount results.
///
/// Business-rule rejections (unknown code, inactive, capped, ineligible)
/// never abort the pass: each becomes a [`PricingMessage`] and the
/// remaining codes are still evaluated. The function is infallible over
/// well-typed input.
pub fn compute_pricing(input: &PricingInput) -> PricingResult {
    // Pre-discount cart subtotal, cents-exact. Also the basis for every
    // min-subtotal gate, which reads the cart BEFORE any discount.
    let subtotal_before = cart_subtotal(&input.items);

    // First definition wins when two candidates normalize to the same code.
    let mut by_code: HashMap<String, &CouponDefinition> = HashMap::new();
    for coupon in &input.coupons {
        by_code.entry(coupon.normalized_code()).or_insert(coupon);
    }

    let attempt_order: Vec<String> = match &input.codes_order {
        Some(codes) => codes.iter().map(|c| normalize_code(c)).collect(),
        None => input.coupons.iter().map(|c| c.normalized_code()).collect(),
    };

    let mut messages: Vec<PricingMessage> = Vec::new();

    // ---------------------------------------------------------------------
    // Phase 1: selection
    // ---------------------------------------------------------------------
    let mut selected: Vec<&CouponDefinition> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for code in attempt_order {
        // A code repeated in the attempt order is evaluated once; later
        // occurrences are skipped without a rejection message.
        if !seen.insert(code.clone()) {
            continue;
        }

        let Some(coupon) = by_code.get(code.as_str()).copied() else {
            reject(&mut messages, &code, RejectionReason::NotFound);
            continue;
        };

        if !coupon.is_active_at(input.now) {
            reject(&mut messages, &code, RejectionReason::Inactive);
            continue;
        }

        // Caps are enforced only when a matching tally exists; no tally
        // means the store has never recorded a redemption for this code.
        if let Some(cap) = coupon.max_redemptions {
            if let Some(tally) = input.usage.get(&code) {
                if tally.total >= cap {
                    reject(&mut messages, &code, RejectionReason::Exhausted);
                    continue;
                }
            }
        }

        // Per-user caps only apply to identified users. Anonymous carts
        // skip this gate entirely.
        if input.user_id.is_some() {
            if let Some(cap) = coupon.max_redemptions_per_user {
                if let Some(tally) = input.usage.get(&code) {
                    if tally.per_user >= cap {
                        reject(&mut messages, &code, RejectionReason::UserCap);
                        continue;
                    }
                }
            }
        }

        if let Some(min) = coupon.min_subtotal_cents {
            if subtotal_before.cents() < min {
                reject(&mut messages, &code, RejectionReason::MinSubtotal);
                continue;
            }
        }

        // Stacking rule: the first selected code always gets the slot.
        // Every later code joins only if the entire selection, itself
        // included, opts in to stacking. A single non-stackable coupon
        // therefore always wins alone.
        if !selected.is_empty()
            && (!coupon.stackable || selected.iter().any(|c| !c.stackable))
        {
            reject(&mut messages, &code, RejectionReason::NotStackable);
            continue;
        }

        debug!(code = %code, "coupon selected");
        selected.push(coupon);
    }

    // ---------------------------------------------------------------------
    // Phase 2: application
    // ---------------------------------------------------------------------
    let mut running = subtotal_before;
    let mut shipping_discount = Money::zero();
    let mut applied: Vec<AppliedCoupon> = Vec::new();

    for coupon in selected {
        let code = coupon.normalized_code();

        match coupon.kind {
            DiscountKind::FreeShipping => {
                let Some(shipping) = &input.shipping else {
                    reject(&mut messages, &code, RejectionReason::NoShippingFee);
                    continue;
                };
                // A second free-shipping coupon in the same pass finds the
                // fee already zeroed and rejects the same way.
                let remaining = shipping.fee_cents() - shipping_discount;
                if !remaining.is_positive() {
                    reject(&mut messages, &code, RejectionReason::NoShippingFee);
                    continue;
                }
                if !shipping.provider.supports_free_shipping() {
                    reject(&mut messages, &code, RejectionReason::UnsupportedShipping);
                    continue;
                }

                shipping_discount += remaining;
                debug!(code = %code, amount = remaining.cents(), "free shipping applied");
                applied.push(AppliedCoupon {
                    code,
                    discount_type: coupon.kind.discount_type(),
                    amount: remaining.to_major_units(),
                });
            }

            DiscountKind::Percent { pct } => {
                let Some(eligible) = eligible_subtotal(coupon, &input.items, running) else {
                    reject(&mut messages, &code, RejectionReason::NoEligibleItems);
                    continue;
                };
                let discount = eligible.percent_floor(pct).clamp_to(running);
                running -= discount;
                debug!(code = %code, amount = discount.cents(), "percent discount applied");
                applied.push(AppliedCoupon {
                    code,
                    discount_type: coupon.kind.discount_type(),
                    amount: discount.to_major_units(),
                });
            }

            DiscountKind::Fixed { cents } => {
                let Some(eligible) = eligible_subtotal(coupon, &input.items, running) else {
                    reject(&mut messages, &code, RejectionReason::NoEligibleItems);
                    continue;
                };
                let discount = Money::from_cents(cents).min(eligible).clamp_to(running);
                running -= discount;
                debug!(code = %code, amount = discount.cents(), "fixed discount applied");
                applied.push(AppliedCoupon {
                    code,
                    discount_type: coupon.kind.discount_type(),
                    amount: discount.to_major_units(),
                });
            }
        }
    }

    let subtotal_after = running;
    let normalized_codes = applied.iter().map(|a| a.code.clone()).collect();

    PricingResult {
        shipping_discount: shipping_discount.to_major_units(),
        subtotal_before: subtotal_before.to_major_units(),
        subtotal_after: subtotal_after.to_major_units(),
        // Reported from the same cents values the per-code amounts came
        // from, so the total always matches the breakdown.
        discount_total: (subtotal_before - subtotal_after + shipping_discount).to_major_units(),
        codes_applied: applied,
        messages,
        normalized_codes,
    }
}

/// Sum of all line subtotals, in cents.
fn cart_subtotal(items: &[CartLineItem]) -> Money {
    items
        .iter()
        .map(CartLineItem::subtotal)
        .fold(Money::zero(), |acc, line| acc + line)
}

/// The portion of the cart this coupon may discount: the subtotal of lines
/// passing its allow/deny filters, capped at the running subtotal (a
/// coupon can't discount more than what's left).
///
/// Returns `None` when the capped value is zero — no lines pass the
/// filters, or earlier coupons already drained the running subtotal.
/// Either way there is nothing to discount: the coupon must reject with
/// `coupon.no_eligible_items`, not record a redemption for $0.
fn eligible_subtotal(
    coupon: &CouponDefinition,
    items: &[CartLineItem],
    running: Money,
) -> Option<Money> {
    let eligible = items
        .iter()
        .filter(|item| coupon.line_eligible(item))
        .map(CartLineItem::subtotal)
        .fold(Money::zero(), |acc, line| acc + line);

    // Cap BEFORE the zero test.
    let capped = eligible.min(running);
    if capped.is_positive() {
        Some(capped)
    } else {
        None
    }
}

fn reject(messages: &mut Vec<PricingMessage>, code: &str, reason: RejectionReason) {
    debug!(code = %code, reason = reason.as_str(), "coupon rejected");
    messages.push(PricingMessage {
        code: code.to_string(),
        reason,
    });
}

// =============================================================================
// Unit Tests
// =============================================================================
