//! Products

use std::fmt;

use rust_decimal::Decimal;

/// Product identifier, e.g. `p1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Quantity discount tier: buying at least `quantity` units takes `rate` off the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTier {
    /// Minimum line quantity for the tier to apply
    pub quantity: u32,

    /// Discount rate as a fraction (`0.1` is 10%)
    pub rate: Decimal,
}

impl DiscountTier {
    /// Create a new discount tier.
    pub fn new(quantity: u32, rate: Decimal) -> Self {
        Self { quantity, rate }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price in won
    pub price: u32,

    /// Units in stock
    pub stock: u32,

    /// Free-text description
    pub description: String,

    /// Quantity discount tiers
    pub discounts: Vec<DiscountTier>,
}

impl Product {
    /// Build a product from a draft and an assigned id.
    pub fn from_draft(id: ProductId, draft: NewProduct) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            stock: draft.stock,
            description: draft.description,
            discounts: draft.discounts,
        }
    }

    /// Apply a partial update; absent fields keep their current value.
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }

        if let Some(price) = update.price {
            self.price = price;
        }

        if let Some(stock) = update.stock {
            self.stock = stock;
        }

        if let Some(description) = update.description {
            self.description = description;
        }

        if let Some(discounts) = update.discounts {
            self.discounts = discounts;
        }
    }

    /// The largest rate offered by any tier.
    pub fn best_discount_rate(&self) -> Option<Decimal> {
        self.discounts.iter().map(|tier| tier.rate).max()
    }

    /// Case-insensitive match of `term` against the name and description.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();

        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Product draft, without an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProduct {
    /// Product name
    pub name: String,

    /// Unit price in won
    pub price: u32,

    /// Units in stock
    pub stock: u32,

    /// Free-text description
    pub description: String,

    /// Quantity discount tiers
    pub discounts: Vec<DiscountTier>,
}

impl From<&Product> for NewProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            description: product.description.clone(),
            discounts: product.discounts.clone(),
        }
    }
}

/// Partial product update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    /// New name
    pub name: Option<String>,

    /// New unit price
    pub price: Option<u32>,

    /// New stock level
    pub stock: Option<u32>,

    /// New description
    pub description: Option<String>,

    /// Replacement discount tiers
    pub discounts: Option<Vec<DiscountTier>>,
}

impl From<NewProduct> for ProductUpdate {
    fn from(draft: NewProduct) -> Self {
        Self {
            name: Some(draft.name),
            price: Some(draft.price),
            stock: Some(draft.stock),
            description: Some(draft.description),
            discounts: Some(draft.discounts),
        }
    }
}

/// Products matching a search term; a blank term matches everything.
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| product.matches(term))
        .collect()
}
