//! Coupon form
//!
//! Draft state for a new coupon. The value field filters keystrokes to digits and clamps to
//! the discount type's limit when it loses focus.

use tracing::debug;

use crate::{
    admin::input::{digits_value, is_digit_input, leading_int},
    coupons::{Coupon, CouponCode, DiscountType},
    notifications::{Notifier, Severity},
    operations::CouponBook,
};

/// Coupon form draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponForm {
    draft: Coupon,
}

impl CouponForm {
    /// Create a form with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft.
    pub fn draft(&self) -> &Coupon {
        &self.draft
    }

    /// Name field changed.
    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    /// Code field changed; stored upper-cased.
    pub fn set_code(&mut self, code: &str) {
        self.draft.code = CouponCode::new(code);
    }

    /// Discount type changed. The value is kept as is.
    pub fn set_discount_type(&mut self, discount_type: DiscountType) {
        self.draft.discount_type = discount_type;
    }

    /// Value field keystroke. Returns false, leaving the draft untouched, unless the text is
    /// empty or all digits.
    pub fn input_discount_value(&mut self, text: &str) -> bool {
        if !is_digit_input(text) {
            return false;
        }

        self.draft.discount_value = digits_value(text);

        true
    }

    /// Value field lost focus: clamp to the type's range.
    ///
    /// Going over the limit clamps and raises a warning. Negative values clamp to zero
    /// silently; the keystroke filter never produces one, but the field text is re-read here.
    pub fn blur_discount_value(&mut self, text: &str, notifier: &mut impl Notifier) {
        let value = leading_int(text);
        let discount_type = self.draft.discount_type;
        let max = discount_type.max_value();

        if value > i64::from(max) {
            debug!(value, max, %discount_type, "coupon value clamped");
            notifier.notify(limit_message(discount_type).to_string(), Severity::Warning);
            self.draft.discount_value = max;
        } else if value < 0 {
            self.draft.discount_value = 0;
        }
    }

    /// Text shown in the value field; empty for zero.
    pub fn discount_value_display(&self) -> String {
        match self.draft.discount_value {
            0 => String::new(),
            value => value.to_string(),
        }
    }

    /// Placeholder for the value field.
    pub fn discount_value_placeholder(&self) -> &'static str {
        match self.draft.discount_type {
            DiscountType::Amount => "5000",
            DiscountType::Percentage => "10",
        }
    }

    /// Hand the draft to the coupon book and reset. Returns the submitted coupon.
    pub fn submit(&mut self, book: &mut impl CouponBook) -> Coupon {
        let coupon = std::mem::take(&mut self.draft);

        book.add_coupon(coupon.clone());

        coupon
    }

    /// Reset the draft to empty defaults.
    pub fn reset(&mut self) {
        self.draft = Coupon::default();
    }
}

fn limit_message(discount_type: DiscountType) -> &'static str {
    match discount_type {
        DiscountType::Percentage => "할인율은 100%를 초과할 수 없습니다",
        DiscountType::Amount => "할인 금액은 100,000원을 초과할 수 없습니다",
    }
}
