//! Coupons

use std::fmt;

use serde::Deserialize;

/// Largest value a percentage coupon may carry.
pub const MAX_PERCENTAGE: u32 = 100;

/// Largest value an amount coupon may carry, in won.
pub const MAX_AMOUNT: u32 = 100_000;

/// How a coupon's value is applied to the cart total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Fixed amount off, in won
    #[default]
    Amount,

    /// Percentage off
    Percentage,
}

impl DiscountType {
    /// Upper bound for a coupon value of this type.
    pub fn max_value(self) -> u32 {
        match self {
            DiscountType::Amount => MAX_AMOUNT,
            DiscountType::Percentage => MAX_PERCENTAGE,
        }
    }

    /// Admin form label for this type.
    pub fn label(self) -> &'static str {
        match self {
            DiscountType::Amount => "정액 할인",
            DiscountType::Percentage => "정률 할인",
        }
    }

    /// Admin form label for the value field.
    pub fn value_label(self) -> &'static str {
        match self {
            DiscountType::Amount => "할인 금액",
            DiscountType::Percentage => "할인율(%)",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Amount => f.write_str("amount"),
            DiscountType::Percentage => f.write_str("percentage"),
        }
    }
}

/// Coupon code, always stored upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CouponCode(String);

impl CouponCode {
    /// Create a coupon code, upper-casing the input.
    pub fn new(code: &str) -> Self {
        Self(code.to_uppercase())
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CouponCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Coupon
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coupon {
    /// Display name
    pub name: String,

    /// Redemption code
    pub code: CouponCode,

    /// How the value applies
    pub discount_type: DiscountType,

    /// Won for amount coupons, percent points for percentage coupons
    pub discount_value: u32,
}

impl Coupon {
    /// The coupon with its value capped at the type's limit.
    #[must_use]
    pub fn clamped(self) -> Self {
        let discount_value = self.discount_value.min(self.discount_type.max_value());

        Coupon {
            discount_value,
            ..self
        }
    }

    /// Short description of the discount, e.g. `5,000원 할인` or `10% 할인`.
    pub fn describe(&self) -> String {
        match self.discount_type {
            DiscountType::Amount => format!(
                "{} 할인",
                crate::formatters::format_price_won(self.discount_value)
            ),
            DiscountType::Percentage => format!("{}% 할인", self.discount_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_upper_cased() {
        assert_eq!(CouponCode::new("welcome2024").as_str(), "WELCOME2024");
        assert_eq!(CouponCode::from("MiXeD").as_str(), "MIXED");
    }

    #[test]
    fn max_value_depends_on_type() {
        assert_eq!(DiscountType::Amount.max_value(), 100_000);
        assert_eq!(DiscountType::Percentage.max_value(), 100);
    }

    #[test]
    fn describe_formats_by_type() {
        let amount = Coupon {
            name: "5000원 할인".to_string(),
            code: CouponCode::new("AMOUNT5000"),
            discount_type: DiscountType::Amount,
            discount_value: 5000,
        };
        let percentage = Coupon {
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            ..amount.clone()
        };

        assert_eq!(amount.describe(), "5,000원 할인");
        assert_eq!(percentage.describe(), "10% 할인");
    }

    #[test]
    fn clamped_caps_value_by_type() {
        let over = Coupon {
            discount_type: DiscountType::Percentage,
            discount_value: 150,
            ..Coupon::default()
        };

        assert_eq!(over.clone().clamped().discount_value, 100);
        assert_eq!(
            Coupon {
                discount_type: DiscountType::Amount,
                ..over
            }
            .clamped()
            .discount_value,
            150
        );
    }

    #[test]
    fn form_labels_follow_type() {
        assert_eq!(DiscountType::Amount.label(), "정액 할인");
        assert_eq!(DiscountType::Percentage.label(), "정률 할인");
        assert_eq!(DiscountType::Amount.value_label(), "할인 금액");
        assert_eq!(DiscountType::Percentage.value_label(), "할인율(%)");
    }

    #[test]
    fn default_type_is_amount() {
        assert_eq!(DiscountType::default(), DiscountType::Amount);
        assert_eq!(DiscountType::Percentage.to_string(), "percentage");
    }
}
