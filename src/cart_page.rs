//! Cart page
//!
//! Read-only view of the shop for the storefront: product rows for the listing and lines plus
//! a summary for the cart panel. Mutations go back through [`ShopStore`].

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::{
    cart::CartItem,
    formatters::{format_price, format_price_won},
    operations::ProductCatalog,
    pricing::{self, PricingError},
    products::{Product, ProductId, filter_products},
    store::{ShopStore, StoreError},
};

/// Remaining stock at or below which a product is flagged as nearly sold out.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// A product in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Formatted price, or `SOLD OUT`
    pub price_label: String,

    /// Stock indicator
    pub stock_label: String,

    /// Best tier, e.g. `최대 20% 할인`
    pub discount_label: Option<String>,

    /// Whether the add button is enabled
    pub can_add: bool,
}

/// A line in the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Units in the cart
    pub quantity: u32,

    /// Formatted discounted line total
    pub total_label: String,

    /// Whole percent taken off the line, if any
    pub discount_percent: Option<u32>,
}

/// Cart totals panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    /// Formatted total before discounts
    pub before_label: String,

    /// Formatted amount saved
    pub discount_label: String,

    /// Formatted amount to pay
    pub after_label: String,

    /// Units in the cart
    pub item_count: u64,

    /// Applied coupon, e.g. `5000원 할인 (5,000원 할인)`
    pub coupon_label: Option<String>,
}

/// The storefront page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPage {
    /// Products matching the search term
    pub products: Vec<ProductRow>,

    /// Cart lines
    pub lines: Vec<CartLine>,

    /// Totals; `None` while the cart is empty
    pub summary: Option<CartSummary>,
}

impl CartPage {
    /// Build the page from store state, listing products that match `search`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Pricing`] if the totals cannot be calculated.
    pub fn build(store: &ShopStore, search: &str) -> Result<Self, StoreError> {
        let products = filter_products(store.products(), search)
            .into_iter()
            .map(|product| product_row(product, store.remaining_stock(product)))
            .collect();

        let items = store.cart().items();
        let lines = items.iter().map(|item| cart_line(item, items)).collect();

        let summary = if store.cart().is_empty() {
            None
        } else {
            let totals = store.cart_totals()?;
            let discount = totals.discount().map_err(PricingError::from)?;

            Some(CartSummary {
                before_label: format_price_won(*totals.before_discount.amount()),
                discount_label: format_price_won(*discount.amount()),
                after_label: format_price_won(*totals.after_discount.amount()),
                item_count: store.cart_item_count(),
                coupon_label: store
                    .selected_coupon()
                    .map(|coupon| format!("{} ({})", coupon.name, coupon.describe())),
            })
        };

        Ok(CartPage {
            products,
            lines,
            summary,
        })
    }
}

fn product_row(product: &Product, remaining: i64) -> ProductRow {
    let sold_out = remaining <= 0;

    let price_label = if sold_out {
        "SOLD OUT".to_string()
    } else {
        format_price(product.price)
    };

    let stock_label = if sold_out {
        "품절".to_string()
    } else if remaining <= LOW_STOCK_THRESHOLD {
        format!("품절임박! {remaining}개 남음")
    } else {
        format!("재고 {remaining}개")
    };

    let discount_label = product
        .best_discount_rate()
        .map(|rate| format!("최대 {}% 할인", (rate * Decimal::ONE_HUNDRED).normalize()));

    ProductRow {
        id: product.id.clone(),
        name: product.name.clone(),
        description: product.description.clone(),
        price_label,
        stock_label,
        discount_label,
        can_add: !sold_out,
    }
}

fn cart_line(item: &CartItem, cart: &[CartItem]) -> CartLine {
    let total = pricing::item_total(item, cart);
    let original = Decimal::from(item.line_price());

    let discount_percent = (total < original)
        .then(|| {
            ((Decimal::ONE - total / original) * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
        })
        .flatten();

    CartLine {
        id: item.product.id.clone(),
        name: item.product.name.clone(),
        quantity: item.quantity,
        total_label: format_price_won(total),
        discount_percent,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{coupons::CouponCode, fixtures::Catalog, operations::CartOperations};

    fn store() -> Result<ShopStore, crate::fixtures::FixtureError> {
        Ok(ShopStore::from_catalog(Catalog::bundled()?))
    }

    #[test]
    fn listing_shows_all_products_with_prices() -> TestResult {
        let page = CartPage::build(&store()?, "")?;

        let labels: Vec<_> = page
            .products
            .iter()
            .map(|row| row.price_label.as_str())
            .collect();

        assert_eq!(labels, ["₩10,000", "₩20,000", "₩30,000"]);
        assert!(page.lines.is_empty());
        assert!(page.summary.is_none());

        Ok(())
    }

    #[test]
    fn listing_shows_best_discount() -> TestResult {
        let page = CartPage::build(&store()?, "상품3")?;

        let row = page.products.first().ok_or("missing row")?;

        assert_eq!(page.products.len(), 1);
        assert_eq!(row.discount_label.as_deref(), Some("최대 25% 할인"));
        assert_eq!(row.stock_label, "재고 20개");

        Ok(())
    }

    #[test]
    fn low_and_exhausted_stock_labels() -> TestResult {
        let mut store = store()?;
        let id = ProductId::from("p1");

        for _ in 0..16 {
            store.add_to_cart(&id)?;
        }

        let page = CartPage::build(&store, "")?;
        let row = page.products.first().ok_or("missing row")?;
        assert_eq!(row.stock_label, "품절임박! 4개 남음");
        assert!(row.can_add);

        for _ in 0..4 {
            store.add_to_cart(&id)?;
        }

        let page = CartPage::build(&store, "")?;
        let row = page.products.first().ok_or("missing row")?;
        assert_eq!(row.price_label, "SOLD OUT");
        assert_eq!(row.stock_label, "품절");
        assert!(!row.can_add);

        Ok(())
    }

    #[test]
    fn cart_lines_and_summary() -> TestResult {
        let mut store = store()?;
        let p1 = ProductId::from("p1");

        for _ in 0..10 {
            store.add_to_cart(&p1)?;
        }
        store.add_to_cart(&ProductId::from("p2"))?;
        store.apply_coupon(&CouponCode::new("AMOUNT5000"))?;

        let page = CartPage::build(&store, "")?;

        let first = page.lines.first().ok_or("missing line")?;
        // 10% tier plus the 5% bulk bonus
        assert_eq!(first.total_label, "85,000원");
        assert_eq!(first.discount_percent, Some(15));

        let summary = page.summary.ok_or("missing summary")?;
        assert_eq!(summary.before_label, "120,000원");
        assert_eq!(summary.after_label, "99,000원");
        assert_eq!(summary.discount_label, "21,000원");
        assert_eq!(summary.item_count, 11);
        assert_eq!(
            summary.coupon_label.as_deref(),
            Some("5000원 할인 (5,000원 할인)")
        );

        Ok(())
    }

    #[test]
    fn undiscounted_line_has_no_percent() -> TestResult {
        let mut store = store()?;

        store.add_to_cart(&ProductId::from("p2"))?;

        let page = CartPage::build(&store, "")?;
        let line = page.lines.first().ok_or("missing line")?;

        assert_eq!(line.discount_percent, None);
        assert_eq!(line.total_label, "20,000원");

        Ok(())
    }
}
