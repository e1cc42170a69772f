//! Product form draft editing.

use rust_decimal::Decimal;

use crate::{
    admin::input::{digits_value, is_digit_input, leading_int, to_u32_saturating},
    notifications::{Notifier, Severity},
    products::{DiscountTier, NewProduct, Product},
};

/// Largest stock the form accepts.
pub const MAX_STOCK: u32 = 9999;

/// Tier appended by [`ProductForm::add_discount`].
pub const DEFAULT_DISCOUNT_TIER: DiscountTier = DiscountTier {
    quantity: 10,
    rate: Decimal::from_parts(1, 0, 0, false, 1),
};

/// Product form draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    draft: NewProduct,
}

impl ProductForm {
    /// Create a form with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft.
    pub fn draft(&self) -> &NewProduct {
        &self.draft
    }

    /// Fill the draft from an existing product.
    pub fn load(&mut self, product: &Product) {
        self.draft = NewProduct::from(product);
    }

    /// Reset the draft to empty defaults.
    pub fn reset(&mut self) {
        self.draft = NewProduct::default();
    }

    /// Name field changed.
    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    /// Description field changed.
    pub fn set_description(&mut self, description: &str) {
        self.draft.description = description.to_string();
    }

    /// Price keystroke; only empty or all-digit text is accepted.
    pub fn input_price(&mut self, text: &str) -> bool {
        if !is_digit_input(text) {
            return false;
        }

        self.draft.price = digits_value(text);

        true
    }

    /// Stock keystroke; only empty or all-digit text is accepted.
    pub fn input_stock(&mut self, text: &str) -> bool {
        if !is_digit_input(text) {
            return false;
        }

        self.draft.stock = digits_value(text);

        true
    }

    /// Price field lost focus.
    pub fn blur_price(&mut self, text: &str, notifier: &mut impl Notifier) {
        if text.is_empty() {
            self.draft.price = 0;
        } else if leading_int(text) < 0 {
            notifier.notify("가격은 0보다 커야 합니다".to_string(), Severity::Error);
            self.draft.price = 0;
        }
    }

    /// Stock field lost focus.
    pub fn blur_stock(&mut self, text: &str, notifier: &mut impl Notifier) {
        if text.is_empty() {
            self.draft.stock = 0;
            return;
        }

        let value = leading_int(text);

        if value < 0 {
            notifier.notify("재고는 0보다 커야 합니다".to_string(), Severity::Error);
            self.draft.stock = 0;
        } else if value > i64::from(MAX_STOCK) {
            notifier.notify(
                "재고는 9999개를 초과할 수 없습니다".to_string(),
                Severity::Error,
            );
            self.draft.stock = MAX_STOCK;
        }
    }

    /// Text shown in the price field; empty for zero.
    pub fn price_display(&self) -> String {
        display_number(self.draft.price)
    }

    /// Text shown in the stock field; empty for zero.
    pub fn stock_display(&self) -> String {
        display_number(self.draft.stock)
    }

    /// Append the default discount tier.
    pub fn add_discount(&mut self) {
        self.draft.discounts.push(DEFAULT_DISCOUNT_TIER);
    }

    /// Remove a discount tier. Out-of-range indexes are ignored.
    pub fn remove_discount(&mut self, index: usize) {
        if index < self.draft.discounts.len() {
            self.draft.discounts.remove(index);
        }
    }

    /// Tier quantity field changed.
    pub fn set_discount_quantity(&mut self, index: usize, text: &str) {
        if let Some(tier) = self.draft.discounts.get_mut(index) {
            tier.quantity = to_u32_saturating(leading_int(text));
        }
    }

    /// Tier rate field changed, in percent points (`"10"` is 10%).
    pub fn set_discount_rate_percent(&mut self, index: usize, text: &str) {
        if let Some(tier) = self.draft.discounts.get_mut(index) {
            let percent = leading_int(text).clamp(0, 100);
            tier.rate = Decimal::from(percent) / Decimal::ONE_HUNDRED;
        }
    }
}

fn display_number(value: u32) -> String {
    match value {
        0 => String::new(),
        value => value.to_string(),
    }
}
