//! Admin panel: product and coupon management.

pub mod coupon_form;
pub mod coupons;
pub mod product_form;
pub mod products;

mod input;

pub use coupon_form::CouponForm;
pub use coupons::AdminCoupons;
pub use product_form::ProductForm;
pub use products::{AdminProducts, FormState};
