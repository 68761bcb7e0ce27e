//! Display helpers shared by the dashboard components.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// `$1,234.50` style amounts
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{}${}.{}", sign, grouped, cents)
}

pub fn format_percentage(percentage: Decimal) -> String {
    format!("{}%", percentage.round_dp(0))
}

/// Width of a progress bar, capped so overspent categories fill it exactly
pub fn bar_width(percentage: Decimal) -> String {
    format!("{}%", percentage.round_dp(0).min(Decimal::ONE_HUNDRED))
}

/// "Sep 14, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
