//! Coupon Fixtures

use serde::Deserialize;

use crate::coupons::{Coupon, CouponCode, DiscountType};

/// Coupon Fixture
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Display name
    pub name: String,

    /// Redemption code, upper-cased on load
    pub code: String,

    /// `amount` or `percentage`
    pub discount_type: DiscountType,

    /// Won or percent points
    pub discount_value: u32,
}

impl From<CouponFixture> for Coupon {
    /// Values above the type's limit are clamped, matching what the admin form allows.
    fn from(fixture: CouponFixture) -> Self {
        Coupon {
            name: fixture.name,
            code: CouponCode::new(&fixture.code),
            discount_type: fixture.discount_type,
            discount_value: fixture.discount_value,
        }
        .clamped()
    }
}
