//! Shopfront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    admin::{AdminCoupons, AdminProducts, CouponForm, FormState, ProductForm},
    cart::{Cart, CartError, CartItem},
    cart_page::{CartLine, CartPage, CartSummary, ProductRow},
    coupons::{Coupon, CouponCode, DiscountType},
    fixtures::{Catalog, FixtureError},
    formatters::{format_price, format_price_won},
    notifications::{Notification, NotificationId, NotificationLog, Notifier, Severity},
    operations::{CartOperations, CouponBook, ProductCatalog},
    pricing::{CartTotals, PricingError},
    products::{DiscountTier, NewProduct, Product, ProductId, ProductUpdate},
    receipt::{Receipt, ReceiptError},
    store::{ShopStore, StoreError},
};
