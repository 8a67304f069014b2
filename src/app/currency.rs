use rust_decimal::Decimal;

use super::classify;

/// Symbols quoted on the Tokyo exchange carry this suffix.
pub const JPY_MARKET_SUFFIX: &str = ".T";

/// Infers the quote currency from the symbol alone: Japanese fund codes
/// and Tokyo-listed symbols are JPY, everything else defaults to USD.
pub fn currency_for_symbol(symbol: &str) -> &'static str {
    if classify::is_fund_code(symbol) || symbol.ends_with(JPY_MARKET_SUFFIX) {
        return "JPY";
    }

    "USD"
}

/// Renders a price for display. JPY has no minor unit so it renders with
/// zero decimals; a missing currency is assumed to be USD; a currency
/// without a glyph falls back to `CODE 0.00`. A missing price renders as
/// a literal `N/A`.
pub fn format_price(price: Option<Decimal>, currency: Option<&str>) -> String {
    let Some(price) = price else {
        return String::from("N/A");
    };

    match currency.unwrap_or("USD") {
        "JPY" => format!("¥{:.0}", price),
        "USD" => format!("${:.2}", price),
        "EUR" => format!("€{:.2}", price),
        "GBP" => format!("£{:.2}", price),
        other => format!("{} {:.2}", other, price),
    }
}
