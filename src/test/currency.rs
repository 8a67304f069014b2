#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::app::currency::{currency_for_symbol, format_price};

    #[test]
    fn japanese_symbols_quote_in_yen() {
        assert_eq!(currency_for_symbol("03311187"), "JPY");
        assert_eq!(currency_for_symbol("7203.T"), "JPY");
    }

    #[test]
    fn everything_else_quotes_in_dollars() {
        assert_eq!(currency_for_symbol("AAPL"), "USD");
        assert_eq!(currency_for_symbol("EURUSD=X"), "USD");
        assert_eq!(currency_for_symbol("1234567"), "USD");
    }

    #[test]
    fn missing_price_renders_as_not_available() {
        assert_eq!(format_price(None, Some("USD")), "N/A");
        assert_eq!(format_price(None, None), "N/A");
    }

    #[test]
    fn yen_renders_without_decimals() {
        assert_eq!(format_price(Some(dec!(1234)), Some("JPY")), "¥1234");
        assert_eq!(format_price(Some(dec!(1234.4)), Some("JPY")), "¥1234");
    }

    #[test]
    fn glyph_currencies_render_with_two_decimals() {
        assert_eq!(format_price(Some(dec!(120.5)), Some("USD")), "$120.50");
        assert_eq!(format_price(Some(dec!(99.99)), Some("EUR")), "€99.99");
        assert_eq!(format_price(Some(dec!(10)), Some("GBP")), "£10.00");
    }

    #[test]
    fn missing_currency_assumes_dollars() {
        assert_eq!(format_price(Some(dec!(3)), None), "$3.00");
    }

    #[test]
    fn unknown_currencies_fall_back_to_the_code() {
        assert_eq!(format_price(Some(dec!(5.5)), Some("CAD")), "CAD 5.50");
        assert_eq!(format_price(Some(dec!(8)), Some("CHF")), "CHF 8.00");
    }
}
