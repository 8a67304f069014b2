use std::sync::LazyLock;

use regex::Regex;

use crate::models::InstrumentKind;

/// Japanese mutual-fund codes are 8 digits.
static FUND_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}$").expect("valid pattern"));

/// Japanese stocks are quoted by a 4-digit code on the Tokyo exchange.
static TOKYO_STOCK_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid pattern"));

/// Substrings marking a symbol as a currency pair. Checked against the
/// uppercased symbol, after the fund-code rule.
pub const FOREX_SYMBOL_MARKERS: &[&str] = &["=X", "USD", "EUR", "GBP", "JPY", "CAD"];

/// Keywords marking a fund by name, including the Japanese fund terms.
pub const FUND_NAME_KEYWORDS: &[&str] = &[
    "FUND",
    "ETF",
    "INDEX",
    "TRUST",
    "投資信託",
    "ファンド",
    "EMAXIS",
    "基準価額",
];

/// Keywords marking a fund by symbol alone.
pub const FUND_SYMBOL_KEYWORDS: &[&str] = &["FUND", "ETF"];

pub fn is_fund_code(symbol: &str) -> bool {
    FUND_CODE.is_match(symbol)
}

/// Classifies a search result into its asset-class bucket. The rules run
/// in a fixed order and the first match wins: an 8-digit fund code is a
/// fund even when the name would also match a forex marker.
pub fn classify(symbol: &str, name: &str) -> InstrumentKind {
    let upper_symbol = symbol.to_uppercase();
    let upper_name = name.to_uppercase();

    if is_fund_code(symbol) {
        return InstrumentKind::Fund;
    }

    if FOREX_SYMBOL_MARKERS
        .iter()
        .any(|marker| upper_symbol.contains(marker))
    {
        return InstrumentKind::Forex;
    }

    if FUND_NAME_KEYWORDS
        .iter()
        .any(|keyword| upper_name.contains(keyword))
        || FUND_SYMBOL_KEYWORDS
            .iter()
            .any(|keyword| upper_symbol.contains(keyword))
    {
        return InstrumentKind::Fund;
    }

    InstrumentKind::Stock
}

/// Normalizes a raw search query into a quote symbol: a bare 4-digit
/// Tokyo code gets the `.T` suffix, everything else is uppercased.
pub fn format_symbol(query: &str) -> String {
    let trimmed = query.trim();

    if TOKYO_STOCK_CODE.is_match(trimmed) {
        return format!("{}.T", trimmed);
    }

    trimmed.to_uppercase()
}
