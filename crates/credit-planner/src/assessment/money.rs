use rust_decimal::Decimal;

const CURRENCY_SYMBOL: &str = "₹";

/// Render an amount as whole rupees grouped by thousands (`₹123,450`).
pub(crate) fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{CURRENCY_SYMBOL}{grouped}")
    } else {
        format!("{CURRENCY_SYMBOL}{grouped}")
    }
}

/// Render a percentage rate, dropping trailing zeros (`9.99%`, `36%`).
pub(crate) fn format_rate(rate_pct: Decimal) -> String {
    format!("{}%", rate_pct.normalize())
}

/// Render a fraction as a whole percentage (`0.8` -> `80%`).
pub(crate) fn format_share(fraction: Decimal) -> String {
    format!("{}%", (fraction * Decimal::ONE_HUNDRED).round().normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands_and_rounds_to_whole_units() {
        assert_eq!(format_currency(dec!(0)), "₹0");
        assert_eq!(format_currency(dec!(999.4)), "₹999");
        assert_eq!(format_currency(dec!(1000)), "₹1,000");
        assert_eq!(format_currency(dec!(1234567.6)), "₹1,234,568");
        assert_eq!(format_currency(dec!(-10000)), "-₹10,000");
    }

    #[test]
    fn rates_and_shares_drop_trailing_zeros() {
        assert_eq!(format_rate(dec!(9.99)), "9.99%");
        assert_eq!(format_rate(dec!(36.0)), "36%");
        assert_eq!(format_share(dec!(0.80)), "80%");
        assert_eq!(format_share(dec!(0.1)), "10%");
    }
}
