//! Brazilian-currency price parsing.

/// Currency token removed before parsing.
pub const CURRENCY_SYMBOL: &str = "R$";
/// Thousands separator in `1.234,56`.
pub const THOUSANDS_SEPARATOR: char = '.';
/// Decimal separator in `1.234,56`.
pub const DECIMAL_SEPARATOR: char = ',';

/// Parse a locale-formatted price (`"R$ 1.234,56"` → `1234.56`).
///
/// The rewrite is order-dependent: drop the currency token, drop spaces, drop the thousands
/// separator, turn the decimal separator into `.`, then parse. Anything that does not end up as a
/// finite number yields `None`.
///
/// Note the pipeline treats every `.` as a thousands separator, so `"90.5"` parses as `905.0`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned = raw
        .replace(CURRENCY_SYMBOL, "")
        .replace(' ', "")
        .replace(THOUSANDS_SEPARATOR, "")
        .replace(DECIMAL_SEPARATOR, ".");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
