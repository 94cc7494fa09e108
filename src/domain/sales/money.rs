use rust_decimal::{Decimal, RoundingStrategy};

/// Renders an amount the way the dashboard cards show it: `R$ 1,234.56`
///
/// # Example
/// ```
/// use diario_bordo_api::domain::sales::money::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456, 2)), "R$ 1,234.56");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = half_up(amount, 2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", rounded.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!("{}R$ {}.{}", sign, group_thousands(integer), fraction)
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

/// Converts an unclamped ratio into a percentage clamped to `[0, 100]`
///
/// The ratio itself stays unclamped in reports; over-attainment is a valid
/// state. Only the progress bar and headline percentage are capped.
pub fn display_percent(ratio: Decimal) -> Decimal {
    let percent = (ratio * Decimal::ONE_HUNDRED)
        .max(Decimal::ZERO)
        .min(Decimal::ONE_HUNDRED);
    half_up(percent, 1)
}

/// Formats a ratio as an unclamped percentage with one decimal: `40.0%`
pub fn format_percent(ratio: Decimal) -> String {
    format!("{:.1}%", half_up(ratio * Decimal::ONE_HUNDRED, 1))
}

// Midpoints round away from zero
fn half_up(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}
