//! Order settlement arithmetic.
//!
//! All amounts are `Decimal`. Intermediate sums keep full precision; each
//! derived field is rounded to cents once, when it is assigned to the order.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::entities::{Customer, MembershipTier, Order, TaxCategory};

/// 100 loyalty points are worth one currency unit.
pub const LOYALTY_POINT_VALUE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Errors raised for contract violations by callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Loyalty points cannot be negative (got {0})")]
    NegativeLoyaltyPoints(i64),

    #[error("Order amount is too large")]
    AmountOverflow,
}

/// Domain service deriving order totals, discounts and loyalty points.
pub struct OrderTotalCalculator;

impl OrderTotalCalculator {
    /// Currency value of `points` loyalty points.
    pub fn calculate_loyalty_discount(points: i64) -> Result<Decimal, PricingError> {
        if points < 0 {
            return Err(PricingError::NegativeLoyaltyPoints(points));
        }
        Ok(Decimal::from(points) * LOYALTY_POINT_VALUE)
    }

    /// One point per whole currency unit spent; nothing for negative totals.
    pub fn calculate_loyalty_points_earned(total: Decimal) -> i64 {
        if total < Decimal::ZERO {
            return 0;
        }
        total.floor().to_i64().unwrap_or(i64::MAX)
    }

    pub fn validate_loyalty_redemption(customer: &Customer, points_to_redeem: i64) -> bool {
        points_to_redeem >= 0 && customer.loyalty_points >= points_to_redeem
    }

    pub fn member_discount_rate(tier: MembershipTier) -> Decimal {
        tier.discount_rate()
    }

    pub fn tax_rate(category: TaxCategory) -> Decimal {
        category.tax_rate()
    }

    /// Recompute every monetary field of `order`.
    ///
    /// The derivation order is fixed:
    /// 1. subtotal from line items
    /// 2. membership discount on the subtotal
    /// 3. loyalty discount from redeemed points
    /// 4. discount = membership + loyalty
    /// 5. tax per line on the undiscounted price
    /// 6. total = subtotal - discount + tax
    /// 7. a negative total shrinks the discount until the total is zero
    ///
    /// The order is left untouched when `loyalty_points_to_redeem` is negative
    /// or when any intermediate amount overflows.
    pub fn calculate_order_totals(
        order: &mut Order,
        customer: &Customer,
        loyalty_points_to_redeem: i64,
    ) -> Result<(), PricingError> {
        let loyalty_discount = Self::calculate_loyalty_discount(loyalty_points_to_redeem)?;

        let mut subtotal = Decimal::ZERO;
        let mut tax = Decimal::ZERO;
        for item in &order.items {
            let line = checked(item.line_total())?;
            subtotal = checked(subtotal.checked_add(line))?;
            // Taxed on the original prices, not the discounted ones.
            let line_tax = checked(line.checked_mul(Self::tax_rate(item.category)))?;
            tax = checked(tax.checked_add(line_tax))?;
        }

        let member_discount =
            checked(subtotal.checked_mul(Self::member_discount_rate(customer.membership_tier)))?;
        let discount = checked(member_discount.checked_add(loyalty_discount))?;

        let subtotal = round_money(subtotal);
        let mut discount = round_money(discount);
        let tax = round_money(tax);

        let mut total = checked(
            subtotal
                .checked_sub(discount)
                .and_then(|net| net.checked_add(tax)),
        )?;
        if total < Decimal::ZERO {
            discount -= total.abs();
            total = subtotal - discount + tax;
        }

        order.subtotal = subtotal;
        order.discount_amount = discount;
        order.tax_amount = tax;
        order.total_amount = total;

        Ok(())
    }
}

fn checked(amount: Option<Decimal>) -> Result<Decimal, PricingError> {
    amount.ok_or(PricingError::AmountOverflow)
}

/// Round to cents, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
