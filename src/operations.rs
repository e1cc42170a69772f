//! Operations the admin forms and pages request from the state owner.

use crate::{
    coupons::{Coupon, CouponCode},
    products::{NewProduct, Product, ProductId, ProductUpdate},
    store::StoreError,
};

/// Product list owner.
pub trait ProductCatalog {
    /// Current products, in insertion order.
    fn products(&self) -> &[Product];

    /// Add a product from a draft and return its assigned id.
    fn add_product(&mut self, draft: NewProduct) -> ProductId;

    /// Apply a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] for an unknown id.
    fn update_product(&mut self, id: &ProductId, update: ProductUpdate) -> Result<(), StoreError>;

    /// Delete a product and return it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] for an unknown id.
    fn delete_product(&mut self, id: &ProductId) -> Result<Product, StoreError>;
}

/// Coupon list owner.
pub trait CouponBook {
    /// Current coupons, in insertion order.
    fn coupons(&self) -> &[Coupon];

    /// Add a coupon. Returns false if a coupon with the same code already exists.
    fn add_coupon(&mut self, coupon: Coupon) -> bool;

    /// Delete a coupon by code.
    fn delete_coupon(&mut self, code: &CouponCode) -> Option<Coupon>;
}

/// Cart owner.
pub trait CartOperations {
    /// Add one unit of a product. Returns false if stock rules rejected it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] for an unknown id.
    fn add_to_cart(&mut self, id: &ProductId) -> Result<bool, StoreError>;

    /// Remove a product's line. Returns false if it was not in the cart.
    fn remove_from_cart(&mut self, id: &ProductId) -> bool;
}
