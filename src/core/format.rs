use rust_decimal::{Decimal, RoundingStrategy};

/// Symbol prefixed to every displayed amount
pub const CURRENCY_SYMBOL: &str = "₱";

/// Decimal places shown for the platform currency
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds an amount to the platform currency scale.
///
/// Midpoints round away from zero, matching how amounts are shown to admins
/// (`0.005` displays as `0.01`).
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for display, e.g. `₱1,234,567.80` or `-₱12.50`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.width$}", rounded.abs(), width = CURRENCY_SCALE as usize);
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{}{}{}.{}", sign, CURRENCY_SYMBOL, group_thousands(whole), fraction)
}

/// Formats a count with thousands grouping, e.g. `12,480`
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
