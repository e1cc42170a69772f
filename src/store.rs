//! Shop state
//!
//! [`ShopStore`] owns every piece of mutable state (products, coupons, the cart, the selected
//! coupon and the notification log) and is the single implementation of the operation traits
//! the admin forms and pages call into.

use jiff::Timestamp;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::Cart,
    coupons::{Coupon, CouponCode},
    fixtures::Catalog,
    notifications::{NotificationId, NotificationLog, Notifier, Severity},
    operations::{CartOperations, CouponBook, ProductCatalog},
    pricing::{self, CartTotals, PricingError},
    products::{NewProduct, Product, ProductId, ProductUpdate},
};

/// Errors raised by store operations.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// No product with this id.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// No coupon with this code.
    #[error("coupon not found: {0}")]
    CouponNotFound(CouponCode),

    /// An order was placed with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Totals could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Application state owner.
#[derive(Debug, Default)]
pub struct ShopStore {
    products: Vec<Product>,
    coupons: Vec<Coupon>,
    cart: Cart,
    selected_coupon: Option<Coupon>,
    notifications: NotificationLog,
    product_seq: u64,
}

impl ShopStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            products: catalog.products,
            coupons: catalog.coupons,
            ..Self::default()
        }
    }

    /// Look up a product.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Look up a coupon.
    pub fn coupon(&self, code: &CouponCode) -> Option<&Coupon> {
        self.coupons.iter().find(|coupon| &coupon.code == code)
    }

    /// The cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Coupon currently applied to the cart.
    pub fn selected_coupon(&self) -> Option<&Coupon> {
        self.selected_coupon.as_ref()
    }

    /// Notification log. Entries stay until the host dismisses them.
    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    /// Dismiss a notification.
    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    /// Stock left for a product after what is already in the cart.
    pub fn remaining_stock(&self, product: &Product) -> i64 {
        self.cart.remaining_stock(product)
    }

    /// Total units in the cart.
    pub fn cart_item_count(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Cart totals with the selected coupon.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Pricing`] if a total cannot be represented.
    pub fn cart_totals(&self) -> Result<CartTotals, StoreError> {
        Ok(pricing::cart_totals(
            self.cart.items(),
            self.selected_coupon.as_ref(),
        )?)
    }

    /// Set a cart line's quantity; zero or below removes the line. Returns false if the
    /// quantity was rejected.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] for an unknown id.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<bool, StoreError> {
        let product = self
            .products
            .iter()
            .find(|product| &product.id == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;

        match self.cart.set_quantity(product, quantity) {
            Ok(()) => {
                debug!(product = %id, quantity, "cart quantity updated");
                Ok(true)
            }
            Err(error) => {
                self.notifications.push(error.to_string(), Severity::Error);
                Ok(false)
            }
        }
    }

    /// Select a coupon for the cart. Returns false if the cart total is too low for it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CouponNotFound`] for an unknown code.
    pub fn apply_coupon(&mut self, code: &CouponCode) -> Result<bool, StoreError> {
        let coupon = self
            .coupon(code)
            .cloned()
            .ok_or_else(|| StoreError::CouponNotFound(code.clone()))?;

        let subtotal = pricing::discounted_subtotal(self.cart.items());

        if !pricing::coupon_minimum_met(&coupon, subtotal) {
            self.notify(
                "percentage 쿠폰은 10,000원 이상 구매 시 사용 가능합니다.".to_string(),
                Severity::Error,
            );
            return Ok(false);
        }

        info!(coupon = %coupon.code, "coupon applied");
        self.selected_coupon = Some(coupon);
        self.notify("쿠폰이 적용되었습니다.".to_string(), Severity::Success);

        Ok(true)
    }

    /// Deselect the applied coupon.
    pub fn clear_coupon(&mut self) {
        self.selected_coupon = None;
    }

    /// Place the order: clears the cart and the selected coupon and returns the order number.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyCart`] if there is nothing to order.
    pub fn complete_order(&mut self) -> Result<String, StoreError> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let order_number = format!("ORD-{}", Timestamp::now().as_millisecond());

        info!(
            order = %order_number,
            items = self.cart.total_quantity(),
            "order completed"
        );

        self.notify(
            format!("주문이 완료되었습니다. 주문번호: {order_number}"),
            Severity::Success,
        );
        self.cart.clear();
        self.selected_coupon = None;

        Ok(order_number)
    }

    fn next_product_id(&mut self) -> ProductId {
        loop {
            self.product_seq += 1;
            let id = ProductId::new(format!("p{}", self.product_seq));

            if self.product(&id).is_none() {
                return id;
            }
        }
    }
}

impl Notifier for ShopStore {
    fn notify(&mut self, message: String, severity: Severity) {
        self.notifications.push(message, severity);
    }
}

impl ProductCatalog for ShopStore {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn add_product(&mut self, draft: NewProduct) -> ProductId {
        let id = self.next_product_id();

        info!(product = %id, name = %draft.name, "product added");
        self.products.push(Product::from_draft(id.clone(), draft));
        self.notify("상품이 추가되었습니다.".to_string(), Severity::Success);

        id
    }

    fn update_product(&mut self, id: &ProductId, update: ProductUpdate) -> Result<(), StoreError> {
        let product = self
            .products
            .iter_mut()
            .find(|product| &product.id == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;

        product.apply(update);
        self.cart.refresh(product);

        info!(product = %id, "product updated");
        self.notify("상품이 수정되었습니다.".to_string(), Severity::Success);

        Ok(())
    }

    fn delete_product(&mut self, id: &ProductId) -> Result<Product, StoreError> {
        let idx = self
            .products
            .iter()
            .position(|product| &product.id == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;

        let product = self.products.remove(idx);
        self.cart.remove(id);

        info!(product = %id, "product deleted");
        self.notify("상품이 삭제되었습니다.".to_string(), Severity::Success);

        Ok(product)
    }
}

impl CouponBook for ShopStore {
    fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    fn add_coupon(&mut self, coupon: Coupon) -> bool {
        let requested = coupon.discount_value;
        let coupon = coupon.clamped();

        if coupon.discount_value != requested {
            warn!(
                coupon = %coupon.code,
                requested,
                stored = coupon.discount_value,
                "coupon value clamped"
            );
        }

        if self.coupon(&coupon.code).is_some() {
            self.notify("이미 존재하는 쿠폰 코드입니다.".to_string(), Severity::Error);
            return false;
        }

        info!(coupon = %coupon.code, kind = %coupon.discount_type, "coupon added");
        self.coupons.push(coupon);
        self.notify("쿠폰이 추가되었습니다.".to_string(), Severity::Success);

        true
    }

    fn delete_coupon(&mut self, code: &CouponCode) -> Option<Coupon> {
        let idx = self.coupons.iter().position(|coupon| &coupon.code == code)?;
        let coupon = self.coupons.remove(idx);

        if self
            .selected_coupon
            .as_ref()
            .is_some_and(|selected| &selected.code == code)
        {
            self.selected_coupon = None;
        }

        info!(coupon = %code, "coupon deleted");
        self.notify("쿠폰이 삭제되었습니다.".to_string(), Severity::Success);

        Some(coupon)
    }
}

impl CartOperations for ShopStore {
    fn add_to_cart(&mut self, id: &ProductId) -> Result<bool, StoreError> {
        let product = self
            .products
            .iter()
            .find(|product| &product.id == id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;

        match self.cart.add(product) {
            Ok(quantity) => {
                debug!(product = %id, quantity, "added to cart");
                self.notifications
                    .push("장바구니에 담았습니다".to_string(), Severity::Success);
                Ok(true)
            }
            Err(error) => {
                self.notifications.push(error.to_string(), Severity::Error);
                Ok(false)
            }
        }
    }

    fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let removed = self.cart.remove(id).is_some();

        if removed {
            debug!(product = %id, "removed from cart");
        }

        removed
    }
}
