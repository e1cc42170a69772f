//! Cart

use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors raised by cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// No stock remains for the product.
    #[error("재고가 부족합니다!")]
    OutOfStock(ProductId),

    /// The requested quantity is more than the product has in stock.
    #[error("재고는 {stock}개까지만 있습니다.")]
    StockLimit {
        /// Product being changed
        product: ProductId,

        /// Units in stock
        stock: u32,
    },
}

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// Product snapshot, refreshed when the catalog changes
    pub product: Product,

    /// Units in the cart, at least one
    pub quantity: u32,
}

impl CartItem {
    /// Create a new cart line.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Undiscounted line price in won.
    pub fn line_price(&self) -> u64 {
        u64::from(self.product.price) * u64::from(self.quantity)
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The line for a product.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == id)
    }

    /// Units of a product in the cart.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.quantity)
    }

    /// Stock left after subtracting what is already in the cart.
    ///
    /// Negative when the stock was lowered below the cart quantity.
    pub fn remaining_stock(&self, product: &Product) -> i64 {
        i64::from(product.stock) - i64::from(self.quantity_of(&product.id))
    }

    /// Add one unit of a product, returning the new line quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::OutOfStock`]: no stock remains for the product.
    /// - [`CartError::StockLimit`]: one more unit would exceed the stock.
    pub fn add(&mut self, product: &Product) -> Result<u32, CartError> {
        if self.remaining_stock(product) <= 0 {
            return Err(CartError::OutOfStock(product.id.clone()));
        }

        if let Some(item) = self.line_mut(&product.id) {
            let quantity = item.quantity + 1;

            if quantity > product.stock {
                return Err(CartError::StockLimit {
                    product: product.id.clone(),
                    stock: product.stock,
                });
            }

            item.quantity = quantity;
            item.product = product.clone();

            return Ok(quantity);
        }

        self.items.push(CartItem::new(product.clone(), 1));

        Ok(1)
    }

    /// Remove a product's line.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        let idx = self.items.iter().position(|item| &item.product.id == id)?;

        Some(self.items.remove(idx))
    }

    /// Set a line's quantity. Zero or below removes the line; a product not in the cart is
    /// left alone.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::StockLimit`] if `quantity` exceeds the product's stock.
    pub fn set_quantity(&mut self, product: &Product, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove(&product.id);
            return Ok(());
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity <= product.stock)
            .ok_or_else(|| CartError::StockLimit {
                product: product.id.clone(),
                stock: product.stock,
            })?;

        if let Some(item) = self.line_mut(&product.id) {
            item.quantity = quantity;
            item.product = product.clone();
        }

        Ok(())
    }

    /// Replace the product snapshot held by a line.
    pub fn refresh(&mut self, product: &Product) {
        if let Some(item) = self.line_mut(&product.id) {
            item.product = product.clone();
        }
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| &item.product.id == id)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(id: &str, stock: u32) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("상품 {id}"),
            price: 10_000,
            stock,
            description: String::new(),
            discounts: Vec::new(),
        }
    }

    #[test]
    fn add_inserts_then_increments() -> TestResult {
        let mut cart = Cart::new();
        let p1 = product("p1", 5);

        assert_eq!(cart.add(&p1)?, 1);
        assert_eq!(cart.add(&p1)?, 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&p1.id), 2);

        Ok(())
    }

    #[test]
    fn add_fails_once_stock_is_used_up() -> TestResult {
        let mut cart = Cart::new();
        let p1 = product("p1", 1);

        cart.add(&p1)?;

        assert_eq!(cart.add(&p1), Err(CartError::OutOfStock(p1.id.clone())));
        assert_eq!(cart.quantity_of(&p1.id), 1);

        Ok(())
    }

    #[test]
    fn add_fails_for_product_without_stock() {
        let mut cart = Cart::new();

        assert!(matches!(
            cart.add(&product("p1", 0)),
            Err(CartError::OutOfStock(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn remaining_stock_subtracts_cart_quantity() -> TestResult {
        let mut cart = Cart::new();
        let p1 = product("p1", 3);

        cart.add(&p1)?;

        assert_eq!(cart.remaining_stock(&p1), 2);
        assert_eq!(cart.remaining_stock(&product("p2", 3)), 3);

        Ok(())
    }

    #[test]
    fn set_quantity_to_zero_removes_line() -> TestResult {
        let mut cart = Cart::new();
        let p1 = product("p1", 3);

        cart.add(&p1)?;
        cart.set_quantity(&p1, 0)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_above_stock_is_rejected() -> TestResult {
        let mut cart = Cart::new();
        let p1 = product("p1", 3);

        cart.add(&p1)?;

        assert_eq!(
            cart.set_quantity(&p1, 4),
            Err(CartError::StockLimit {
                product: p1.id.clone(),
                stock: 3
            })
        );
        assert_eq!(cart.quantity_of(&p1.id), 1);

        Ok(())
    }

    #[test]
    fn set_quantity_ignores_products_not_in_cart() -> TestResult {
        let mut cart = Cart::new();

        cart.set_quantity(&product("p1", 3), 2)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn stock_limit_message_names_the_stock() {
        let error = CartError::StockLimit {
            product: ProductId::from("p1"),
            stock: 20,
        };

        assert_eq!(error.to_string(), "재고는 20개까지만 있습니다.");
    }

    #[test]
    fn total_quantity_sums_lines() -> TestResult {
        let mut cart = Cart::new();
        let p1 = product("p1", 5);
        let p2 = product("p2", 5);

        cart.add(&p1)?;
        cart.add(&p1)?;
        cart.add(&p2)?;

        assert_eq!(cart.total_quantity(), 3);

        Ok(())
    }
}
