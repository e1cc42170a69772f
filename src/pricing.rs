//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

use crate::{
    cart::CartItem,
    coupons::{Coupon, DiscountType},
};

/// Line quantity at which the whole cart counts as a bulk purchase.
pub const BULK_PURCHASE_QUANTITY: u32 = 10;

/// Extra rate added to every line of a bulk purchase (5%).
pub const BULK_PURCHASE_BONUS: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Cap applied to a line rate once the bulk bonus is added (50%).
pub const MAX_DISCOUNT_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Smallest discounted total, in won, a percentage coupon can be applied to.
pub const PERCENTAGE_COUPON_MINIMUM: u32 = 10_000;

/// Errors that can occur while calculating cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A total could not be represented in minor units.
    #[error("total does not fit in minor units")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Cart totals before and after discounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    /// Sum of undiscounted line prices
    pub before_discount: Money<'static, Currency>,

    /// Total after tier discounts and the selected coupon
    pub after_discount: Money<'static, Currency>,
}

impl CartTotals {
    /// Amount saved by all discounts.
    ///
    /// # Errors
    ///
    /// Returns a `MoneyError` on currency mismatch.
    pub fn discount(&self) -> Result<Money<'static, Currency>, MoneyError> {
        self.before_discount.sub(self.after_discount)
    }
}

/// True if any line reaches the bulk purchase quantity.
pub fn has_bulk_purchase(cart: &[CartItem]) -> bool {
    cart.iter()
        .any(|item| item.quantity >= BULK_PURCHASE_QUANTITY)
}

/// Largest tier rate the line qualifies for, plus the bulk bonus when the cart has a bulk line.
pub fn max_applicable_discount(item: &CartItem, cart: &[CartItem]) -> Decimal {
    let base = item
        .product
        .discounts
        .iter()
        .filter(|tier| item.quantity >= tier.quantity)
        .map(|tier| tier.rate)
        .max()
        .unwrap_or(Decimal::ZERO);

    if has_bulk_purchase(cart) {
        (base + BULK_PURCHASE_BONUS).min(MAX_DISCOUNT_RATE)
    } else {
        base
    }
}

/// Discounted line total in won, rounded to a whole won.
pub fn item_total(item: &CartItem, cart: &[CartItem]) -> Decimal {
    let discount = max_applicable_discount(item, cart);

    round_won(Decimal::from(item.line_price()) * (Decimal::ONE - discount))
}

/// Apply a coupon to a discounted total. Amount coupons never take the total below zero.
pub fn apply_coupon(total: Decimal, coupon: &Coupon) -> Decimal {
    let value = Decimal::from(coupon.discount_value);

    match coupon.discount_type {
        DiscountType::Amount => (total - value).max(Decimal::ZERO),
        DiscountType::Percentage => {
            round_won(total * (Decimal::ONE - value / Decimal::ONE_HUNDRED)).max(Decimal::ZERO)
        }
    }
}

/// Whether a coupon may be used against the given discounted total.
pub fn coupon_minimum_met(coupon: &Coupon, total: Decimal) -> bool {
    match coupon.discount_type {
        DiscountType::Amount => true,
        DiscountType::Percentage => total >= Decimal::from(PERCENTAGE_COUPON_MINIMUM),
    }
}

/// Sum of discounted line totals, before any coupon.
pub fn discounted_subtotal(cart: &[CartItem]) -> Decimal {
    cart.iter().map(|item| item_total(item, cart)).sum()
}

/// Calculates the cart totals with an optional coupon.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if a total does not fit in minor units.
pub fn cart_totals(cart: &[CartItem], coupon: Option<&Coupon>) -> Result<CartTotals, PricingError> {
    let before: Decimal = cart
        .iter()
        .map(|item| Decimal::from(item.line_price()))
        .sum();

    let subtotal = discounted_subtotal(cart);
    let after = coupon.map_or(subtotal, |coupon| apply_coupon(subtotal, coupon));

    Ok(CartTotals {
        before_discount: won(before)?,
        after_discount: won(after)?,
    })
}

/// Convert a whole-won amount into KRW money.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the amount does not fit in minor units.
pub fn won(amount: Decimal) -> Result<Money<'static, Currency>, PricingError> {
    let minor = round_won(amount).to_i64().ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, iso::KRW))
}

fn round_won(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        coupons::CouponCode,
        products::{DiscountTier, Product, ProductId},
    };

    fn product(id: &str, price: u32, discounts: Vec<DiscountTier>) -> Product {
        Product {
            id: ProductId::from(id),
            name: id.to_string(),
            price,
            stock: 100,
            description: String::new(),
            discounts,
        }
    }

    fn tiers() -> Vec<DiscountTier> {
        vec![
            DiscountTier::new(10, Decimal::new(1, 1)),
            DiscountTier::new(20, Decimal::new(2, 1)),
        ]
    }

    fn coupon(discount_type: DiscountType, discount_value: u32) -> Coupon {
        Coupon {
            name: "test".to_string(),
            code: CouponCode::new("TEST"),
            discount_type,
            discount_value,
        }
    }

    #[test]
    fn no_tier_applies_below_threshold() {
        let cart = [CartItem::new(product("p1", 10_000, tiers()), 9)];

        assert_eq!(max_applicable_discount(&cart[0], &cart), Decimal::ZERO);
    }

    #[test]
    fn highest_qualifying_tier_wins() {
        let cart = [CartItem::new(product("p1", 10_000, tiers()), 20)];

        // Quantity 20 is also a bulk purchase, so the bonus applies on top.
        assert_eq!(
            max_applicable_discount(&cart[0], &cart),
            Decimal::new(25, 2)
        );
    }

    #[test]
    fn bulk_line_gives_every_line_the_bonus() {
        let cart = [
            CartItem::new(product("p1", 10_000, tiers()), 10),
            CartItem::new(product("p2", 20_000, Vec::new()), 1),
        ];

        assert_eq!(
            max_applicable_discount(&cart[0], &cart),
            Decimal::new(15, 2)
        );
        assert_eq!(
            max_applicable_discount(&cart[1], &cart),
            Decimal::new(5, 2)
        );
    }

    #[test]
    fn bulk_bonus_is_capped() {
        let cart = [CartItem::new(
            product("p1", 1_000, vec![DiscountTier::new(10, Decimal::new(48, 2))]),
            10,
        )];

        assert_eq!(max_applicable_discount(&cart[0], &cart), MAX_DISCOUNT_RATE);
    }

    #[test]
    fn item_total_rounds_to_whole_won() {
        let cart = [CartItem::new(
            product("p1", 333, vec![DiscountTier::new(1, Decimal::new(15, 2))]),
            1,
        )];

        // 333 * 0.85 = 283.05
        assert_eq!(item_total(&cart[0], &cart), Decimal::from(283));
    }

    #[test]
    fn amount_coupon_never_goes_negative() {
        let total = apply_coupon(Decimal::from(3_000), &coupon(DiscountType::Amount, 5_000));

        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn percentage_coupon_rounds() {
        let total = apply_coupon(
            Decimal::from(10_005),
            &coupon(DiscountType::Percentage, 10),
        );

        // 10005 * 0.9 = 9004.5
        assert_eq!(total, Decimal::from(9_005));
    }

    #[test]
    fn oversized_percentage_coupon_floors_at_zero() {
        let total = apply_coupon(
            Decimal::from(10_000),
            &coupon(DiscountType::Percentage, 150),
        );

        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn percentage_coupon_minimum() {
        let percent = coupon(DiscountType::Percentage, 10);

        assert!(!coupon_minimum_met(&percent, Decimal::from(9_999)));
        assert!(coupon_minimum_met(&percent, Decimal::from(10_000)));
        assert!(coupon_minimum_met(
            &coupon(DiscountType::Amount, 5_000),
            Decimal::ZERO
        ));
    }

    #[test]
    fn cart_totals_with_tiers_and_coupon() -> TestResult {
        let cart = [
            CartItem::new(product("p1", 10_000, tiers()), 10),
            CartItem::new(product("p2", 20_000, Vec::new()), 1),
        ];

        let without = cart_totals(&cart, None)?;
        // p1: 100000 * 0.85 = 85000, p2: 20000 * 0.95 = 19000
        assert_eq!(without.before_discount, Money::from_minor(120_000, iso::KRW));
        assert_eq!(without.after_discount, Money::from_minor(104_000, iso::KRW));
        assert_eq!(without.discount()?, Money::from_minor(16_000, iso::KRW));

        let with = cart_totals(&cart, Some(&coupon(DiscountType::Amount, 5_000)))?;
        assert_eq!(with.after_discount, Money::from_minor(99_000, iso::KRW));

        Ok(())
    }

    #[test]
    fn empty_cart_totals_are_zero() -> TestResult {
        let totals = cart_totals(&[], None)?;

        assert_eq!(totals.before_discount, Money::from_minor(0, iso::KRW));
        assert_eq!(totals.after_discount, Money::from_minor(0, iso::KRW));

        Ok(())
    }
}
