//! Text field parsing shared by the admin forms.

/// True for the text a numeric keystroke filter accepts: empty, or ASCII digits only.
pub(crate) fn is_digit_input(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

/// Value of a digit-only string, saturating at `u32::MAX`. Empty is zero.
pub(crate) fn digits_value(text: &str) -> u32 {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0_u32, |acc, byte| {
            acc.saturating_mul(10)
                .saturating_add(u32::from(byte - b'0'))
        })
}

/// Leading integer of a field: optional whitespace, optional sign, then digits. Anything after
/// the digits is ignored and text without leading digits reads as zero.
pub(crate) fn leading_int(text: &str) -> i64 {
    let text = text.trim_start();

    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, text.get(1..).unwrap_or_default()),
        Some(b'+') => (false, text.get(1..).unwrap_or_default()),
        _ => (false, text),
    };

    let magnitude = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, byte| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(byte - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}

/// Clamp a parsed integer into `u32`.
pub(crate) fn to_u32_saturating(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
