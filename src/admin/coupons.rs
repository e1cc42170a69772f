//! Coupon administration: the coupon list plus the show/hide state of the coupon form.

use crate::{
    admin::coupon_form::CouponForm,
    coupons::{Coupon, CouponCode},
    operations::CouponBook,
};

/// Coupon list coordinator
#[derive(Debug, Default)]
pub struct AdminCoupons {
    show_form: bool,
    form: CouponForm,
}

impl AdminCoupons {
    /// Create with the form hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the coupon form is shown.
    pub fn is_form_visible(&self) -> bool {
        self.show_form
    }

    /// Show or hide the coupon form. The draft survives hiding.
    pub fn toggle_form(&mut self) {
        self.show_form = !self.show_form;
    }

    /// Hide the coupon form without submitting.
    pub fn cancel(&mut self) {
        self.show_form = false;
    }

    /// The coupon form.
    pub fn form(&self) -> &CouponForm {
        &self.form
    }

    /// The coupon form, for editing.
    pub fn form_mut(&mut self) -> &mut CouponForm {
        &mut self.form
    }

    /// Submit the draft and hide the form.
    pub fn submit(&mut self, book: &mut impl CouponBook) -> Coupon {
        let coupon = self.form.submit(book);
        self.show_form = false;

        coupon
    }

    /// Delete a coupon from the book.
    pub fn delete_coupon(&self, code: &CouponCode, book: &mut impl CouponBook) -> Option<Coupon> {
        book.delete_coupon(code)
    }
}
