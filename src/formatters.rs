//! Price formatting
//!
//! Both helpers render numbers the way the ko-KR locale does: a comma between every three
//! integer digits, a leading minus sign, and at most three fraction digits.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fraction digits kept by the locale number format.
const MAX_FRACTION_DIGITS: u32 = 3;

/// Formats a price with a leading won sign, e.g. `₩1,000`.
pub fn format_price(price: impl Into<Decimal>) -> String {
    format!("₩{}", group_digits(price.into()))
}

/// Formats a price followed by the `원` unit, e.g. `1,000원`.
pub fn format_price_won(price: impl Into<Decimal>) -> String {
    format!("{}원", group_digits(price.into()))
}

fn group_digits(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let digits = rounded.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + integer.len() / 3 + 1);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }

    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            out.push(',');
        }

        out.push(ch);
    }

    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    out
}
