//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{DiscountTier, Product, ProductId},
};

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Product price (e.g., "10000 KRW")
    pub price: String,

    /// Units in stock
    pub stock: u32,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Quantity discount tiers
    #[serde(default)]
    pub discounts: Vec<DiscountTierFixture>,
}

/// Discount tier fixture
#[derive(Debug, Deserialize)]
pub struct DiscountTierFixture {
    /// Minimum quantity
    pub quantity: u32,

    /// Rate (e.g., "10%" or "0.1")
    pub rate: String,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;

        let discounts = fixture
            .discounts
            .iter()
            .map(|tier| Ok(DiscountTier::new(tier.quantity, parse_rate(&tier.rate)?)))
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(Product {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            price,
            stock: fixture.stock,
            description: fixture.description,
            discounts,
        })
    }
}

/// Parse price string (e.g., "10000 KRW") into whole won
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount is
/// not a non-negative whole number of won, or if the currency is not KRW.
pub fn parse_price(s: &str) -> Result<u32, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    if *currency_code != "KRW" {
        return Err(FixtureError::UnknownCurrency((*currency_code).to_string()));
    }

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if !amount.fract().is_zero() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    amount
        .to_u32()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))
}

/// Parse rate string (e.g., "15%" or "0.15") into a fraction
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or lies outside 0% to 100%.
pub fn parse_rate(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();

    let rate = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidRate(s.to_string()))?
            / Decimal::ONE_HUNDRED
    } else {
        trimmed
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidRate(s.to_string()))?
    };

    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(FixtureError::InvalidRate(s.to_string()));
    }

    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_accepts_whole_won() -> Result<(), FixtureError> {
        assert_eq!(parse_price("10000 KRW")?, 10_000);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("10000KRW");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_other_currencies() {
        let result = parse_price("2.99 GBP");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "GBP"));
    }

    #[test]
    fn parse_price_rejects_fractional_and_negative_amounts() {
        assert!(matches!(
            parse_price("10.5 KRW"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("-1 KRW"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_rate_accepts_percentage_format() -> Result<(), FixtureError> {
        assert_eq!(parse_rate("15%")?, Decimal::new(15, 2));

        Ok(())
    }

    #[test]
    fn parse_rate_accepts_decimal_format() -> Result<(), FixtureError> {
        assert_eq!(parse_rate("0.15")?, Decimal::new(15, 2));

        Ok(())
    }

    #[test]
    fn parse_rate_rejects_out_of_range() {
        assert!(matches!(
            parse_rate("150%"),
            Err(FixtureError::InvalidRate(_))
        ));
        assert!(matches!(parse_rate("abc"), Err(FixtureError::InvalidRate(_))));
    }

    #[test]
    fn product_fixture_converts_tiers() -> Result<(), FixtureError> {
        let fixture = ProductFixture {
            id: "p1".to_string(),
            name: "상품1".to_string(),
            price: "10000 KRW".to_string(),
            stock: 20,
            description: String::new(),
            discounts: vec![DiscountTierFixture {
                quantity: 10,
                rate: "10%".to_string(),
            }],
        };

        let product = Product::try_from(fixture)?;

        assert_eq!(product.price, 10_000);
        assert_eq!(
            product.discounts,
            [DiscountTier::new(10, Decimal::new(1, 1))]
        );

        Ok(())
    }
}
