//! Amount helpers shared by report renderers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Everything here works on `rust_decimal::Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount for statement display.
///
/// Whole units are grouped with `,` separators, the fractional part is kept
/// as-is after normalization, and negative amounts are wrapped in parentheses
/// the way financial statements print them: `-1234.5` becomes `(1,234.5)`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let digits = normalized.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    if normalized.is_sign_negative() && !normalized.is_zero() {
        format!("({grouped})")
    } else {
        grouped
    }
}

/// Divides `numerator` by `denominator`, returning zero when the denominator is zero.
///
/// The result is rounded half-away-from-zero to `scale` decimal places.
#[must_use]
pub fn safe_ratio(numerator: Decimal, denominator: Decimal, scale: u32) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .map_or(Decimal::ZERO, |ratio| {
            ratio.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
        })
}

/// Expresses `amount` as a percentage of `base`, zero when the base is zero.
#[must_use]
pub fn percentage_of(amount: Decimal, base: Decimal, scale: u32) -> Decimal {
    if base.is_zero() {
        return Decimal::ZERO;
    }
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(base))
        .map_or(Decimal::ZERO, |pct| {
            pct.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
        })
}
