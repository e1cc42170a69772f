//! Receipt

use std::io;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::CartItem,
    coupons::Coupon,
    formatters::format_price_won,
    pricing::{self, PricingError},
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Totals could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One cart line on the receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Product name
    pub name: String,

    /// Units bought
    pub quantity: u32,

    /// Price of a single unit
    pub unit_price: Money<'static, Currency>,

    /// Undiscounted line price
    pub original_price: Money<'static, Currency>,

    /// Line price after tier and bulk discounts
    pub final_price: Money<'static, Currency>,
}

impl ReceiptLine {
    /// Amount taken off the line.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] on currency mismatch.
    pub fn savings(&self) -> Result<Money<'static, Currency>, MoneyError> {
        self.original_price.sub(self.final_price)
    }
}

/// Receipt for a cart, printed when an order is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    order_number: Option<String>,
    lines: Vec<ReceiptLine>,
    coupon: Option<Coupon>,
    subtotal: Money<'static, Currency>,
    total: Money<'static, Currency>,
}

impl Receipt {
    /// Build a receipt from cart lines and the selected coupon.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a price cannot be represented.
    pub fn from_cart(items: &[CartItem], coupon: Option<&Coupon>) -> Result<Self, ReceiptError> {
        let totals = pricing::cart_totals(items, coupon)?;

        let lines = items
            .iter()
            .map(|item| {
                Ok(ReceiptLine {
                    name: item.product.name.clone(),
                    quantity: item.quantity,
                    unit_price: pricing::won(Decimal::from(item.product.price))?,
                    original_price: pricing::won(Decimal::from(item.line_price()))?,
                    final_price: pricing::won(pricing::item_total(item, items))?,
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        Ok(Receipt {
            order_number: None,
            lines,
            coupon: coupon.cloned(),
            subtotal: totals.before_discount,
            total: totals.after_discount,
        })
    }

    /// Attach the order number returned when the order was placed.
    #[must_use]
    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }

    /// Order number, once the order is placed.
    pub fn order_number(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    /// Receipt lines in cart order.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Coupon used for the order.
    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Total before any discount
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Amount to pay
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Amount saved by all discounts and the coupon.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings(&self) -> Result<Money<'static, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Savings in whole percent points of the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings_percent(&self) -> Result<Decimal, MoneyError> {
        let savings = self.savings()?;

        if self.subtotal.is_zero() {
            return Ok(Decimal::ZERO);
        }

        Ok(percent_points(*savings.amount(), *self.subtotal.amount()))
    }

    /// Prints the receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if let Some(order_number) = &self.order_number {
            writeln!(out, "주문번호: {order_number}").map_err(|_err| ReceiptError::IO)?;
        }

        let mut builder = Builder::default();

        builder.push_record(["", "상품", "수량", "단가", "금액", "할인가", "할인"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record(line_cells(idx, line)?);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..7), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let savings = self.savings()?;
        let percent = self.savings_percent()?;

        write_summary_line(out, "상품 금액", &format_price_won(*self.subtotal.amount()))?;

        if let Some(coupon) = &self.coupon {
            write_summary_line(out, "쿠폰", &format!("{} ({})", coupon.name, coupon.describe()))?;
        }

        write_summary_line(
            out,
            "할인 금액",
            &format!("({percent}%) {}", format_price_won(*savings.amount())),
        )?;
        write_summary_line(out, "결제 금액", &format_price_won(*self.total.amount()))
    }
}

fn line_cells(idx: usize, line: &ReceiptLine) -> Result<[String; 7], ReceiptError> {
    let savings = line.savings()?;

    let (final_price, discount) = if savings.is_zero() {
        (String::new(), String::new())
    } else {
        let percent = percent_points(*savings.amount(), *line.original_price.amount());

        (
            format_price_won(*line.final_price.amount()),
            format!("-{percent}%"),
        )
    };

    Ok([
        format!("#{:<3}", idx + 1),
        line.name.clone(),
        line.quantity.to_string(),
        format_price_won(*line.unit_price.amount()),
        format_price_won(*line.original_price.amount()),
        final_price,
        discount,
    ])
}

fn percent_points(part: Decimal, whole: Decimal) -> Decimal {
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
) -> Result<(), ReceiptError> {
    writeln!(out, " {label}: {value}").map_err(|_err| ReceiptError::IO)
}
