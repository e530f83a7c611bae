use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Vui lòng nhập số tiền")]
    Empty,
    #[error("Số tiền không hợp lệ")]
    Invalid,
    #[error("Số tiền có quá nhiều chữ số thập phân")]
    TooManyDecimals,
    #[error("Số tiền quá lớn")]
    TooLarge,
}

/// Largest magnitude accepted from user input.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_7FFF, 0x0003_8D7E, 0, false, 0);

/// Display convention for a currency code.
///
/// Amounts travel as decimals in major units; the style decides how many
/// fraction digits are shown and how digits are grouped.
///
/// | code | example |
/// |---|---|
/// | `VND` | `1.234.567 ₫` |
/// | `EUR` | `1.234,56 €` |
/// | `USD` | `$1,234.56` |
/// | other | `1,234.56 GBP` |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrencyStyle {
    pub symbol: &'static str,
    pub symbol_first: bool,
    pub thousands: char,
    pub decimal: char,
    pub fraction_digits: u32,
}

impl CurrencyStyle {
    pub fn for_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "" | "VND" => Self {
                symbol: "₫",
                symbol_first: false,
                thousands: '.',
                decimal: ',',
                fraction_digits: 0,
            },
            "EUR" => Self {
                symbol: "€",
                symbol_first: false,
                thousands: '.',
                decimal: ',',
                fraction_digits: 2,
            },
            "USD" => Self {
                symbol: "$",
                symbol_first: true,
                thousands: ',',
                decimal: '.',
                fraction_digits: 2,
            },
            _ => Self {
                symbol: "",
                symbol_first: false,
                thousands: ',',
                decimal: '.',
                fraction_digits: 2,
            },
        }
    }
}

/// Formats an amount for display, e.g. `-45.000 ₫`.
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let style = CurrencyStyle::for_code(currency);
    let rounded = amount.abs().round_dp(style.fraction_digits);
    // Whole and fraction parts are split before scaling so that amounts
    // close to `Decimal::MAX` never overflow.
    let whole = rounded.trunc();
    let units = whole.to_i128().unwrap_or_default();
    let fraction = ((rounded - whole) * Decimal::from(10i64.pow(style.fraction_digits)))
        .trunc()
        .to_i128()
        .unwrap_or_default();
    let is_zero = units == 0 && fraction == 0;

    let mut number = group_thousands(units, style.thousands);
    if style.fraction_digits > 0 {
        number.push(style.decimal);
        number.push_str(&format!(
            "{fraction:0width$}",
            width = style.fraction_digits as usize
        ));
    }

    let sign = if amount < Decimal::ZERO && !is_zero {
        "-"
    } else {
        ""
    };
    let code = currency.trim().to_ascii_uppercase();
    if style.symbol_first {
        format!("{sign}{}{number}", style.symbol)
    } else if !style.symbol.is_empty() {
        format!("{sign}{number} {}", style.symbol)
    } else if code.is_empty() {
        format!("{sign}{number}")
    } else {
        format!("{sign}{number} {code}")
    }
}

/// Formats with an explicit `+` for non-negative amounts.
pub fn format_signed(amount: Decimal, currency: &str) -> String {
    let formatted = format_amount(amount, currency);
    if amount >= Decimal::ZERO {
        format!("+{formatted}")
    } else {
        formatted
    }
}

/// Plain text for an input field that [`parse_amount`] reads back as the
/// same value: rounded to the currency's fraction digits, no grouping.
pub fn input_text(amount: Decimal, currency: &str) -> String {
    let style = CurrencyStyle::for_code(currency);
    amount.round_dp(style.fraction_digits).normalize().to_string()
}

fn group_thousands(value: i128, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Parses user input into an amount in major units.
///
/// Accepts an optional leading `+`/`-`. For currencies without fraction
/// digits (VND) both `.` and `,` are grouping separators and are dropped;
/// otherwise either one is the decimal separator and at most the currency's
/// fraction digits are allowed.
pub fn parse_amount(input: &str, currency: &str) -> Result<Decimal, MoneyError> {
    let style = CurrencyStyle::for_code(currency);
    let trimmed: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if trimmed.is_empty() {
        return Err(MoneyError::Empty);
    }

    let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
        (true, stripped)
    } else if let Some(stripped) = trimmed.strip_prefix('+') {
        (false, stripped)
    } else {
        (false, trimmed.as_str())
    };
    if rest.is_empty() {
        return Err(MoneyError::Empty);
    }

    let (whole, fraction) = if style.fraction_digits == 0 {
        (rest.replace(['.', ','], ""), None)
    } else {
        let normalized = rest.replace(',', ".");
        let mut parts = normalized.splitn(2, '.');
        let whole = parts.next().unwrap_or_default().to_string();
        let fraction = parts.next().map(str::to_string);
        (whole, fraction)
    };

    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(MoneyError::Invalid);
    }
    let mut text = whole;
    if let Some(fraction) = fraction.filter(|f| !f.is_empty()) {
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyError::Invalid);
        }
        if fraction.len() > style.fraction_digits as usize {
            return Err(MoneyError::TooManyDecimals);
        }
        text.push('.');
        text.push_str(&fraction);
    }

    let value: Decimal = text.parse().map_err(|_| MoneyError::Invalid)?;
    if value > MAX_AMOUNT {
        return Err(MoneyError::TooLarge);
    }
    Ok(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn formats_vnd_like_vi_locale() {
        assert_eq!(format_amount(dec("1234567"), "VND"), "1.234.567 ₫");
        assert_eq!(format_amount(dec("-45000"), "VND"), "-45.000 ₫");
        assert_eq!(format_amount(dec("0"), "vnd"), "0 ₫");
        assert_eq!(format_amount(dec("999.6"), "VND"), "1.000 ₫");
    }

    #[test]
    fn formats_other_currencies() {
        assert_eq!(format_amount(dec("1234.5"), "USD"), "$1,234.50");
        assert_eq!(format_amount(dec("-1234.56"), "EUR"), "-1.234,56 €");
        assert_eq!(format_amount(dec("12"), "GBP"), "12.00 GBP");
    }

    #[test]
    fn signed_format_prefixes_plus() {
        assert_eq!(format_signed(dec("500"), "VND"), "+500 ₫");
        assert_eq!(format_signed(dec("-500"), "VND"), "-500 ₫");
    }

    #[test]
    fn parses_grouped_vnd_and_decimal_usd() {
        assert_eq!(parse_amount("45.000", "VND"), Ok(dec("45000")));
        assert_eq!(parse_amount("-1,200,000", "VND"), Ok(dec("-1200000")));
        assert_eq!(parse_amount("10,5", "USD"), Ok(dec("10.5")));
        assert_eq!(parse_amount(" +2.30 ", "EUR"), Ok(dec("2.30")));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_amount("", "VND"), Err(MoneyError::Empty));
        assert_eq!(parse_amount("-", "VND"), Err(MoneyError::Empty));
        assert_eq!(parse_amount("12a", "VND"), Err(MoneyError::Invalid));
        assert_eq!(parse_amount("12.345", "USD"), Err(MoneyError::TooManyDecimals));
    }

    #[test]
    fn input_text_survives_locale_parsing() {
        assert_eq!(input_text(dec("-45000.5"), "VND"), "-45000");
        assert_eq!(parse_amount(&input_text(dec("-45000.5"), "VND"), "VND"), Ok(dec("-45000")));
        assert_eq!(input_text(dec("1234.50"), "EUR"), "1234.5");
        assert_eq!(parse_amount("1234.5", "EUR"), Ok(dec("1234.5")));
        assert_eq!(input_text(dec("-20"), "USD"), "-20");
    }

    #[test]
    fn rejects_amounts_beyond_the_cap() {
        assert_eq!(MAX_AMOUNT, dec("999999999999999"));
        assert_eq!(parse_amount("999999999999999", "VND"), Ok(MAX_AMOUNT));
        assert_eq!(
            parse_amount("1000000000000000000000000000", "USD"),
            Err(MoneyError::TooLarge)
        );
        assert_eq!(parse_amount("-1000000000000000", "VND"), Err(MoneyError::TooLarge));
    }

    #[test]
    fn formats_huge_backend_amounts_without_overflow() {
        let huge = dec("1000000000000000000000000000");
        assert_eq!(
            format_amount(huge, "USD"),
            "$1,000,000,000,000,000,000,000,000,000.00"
        );
        assert!(format_amount(-Decimal::MAX, "EUR").starts_with("-79.228.162"));
        assert!(format_signed(Decimal::MAX, "VND").ends_with(" ₫"));
    }
}
