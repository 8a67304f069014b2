#[cfg(test)]
mod tests {
    use crate::app::classify::{
        FOREX_SYMBOL_MARKERS, FUND_NAME_KEYWORDS, FUND_SYMBOL_KEYWORDS, classify, format_symbol,
    };
    use crate::models::InstrumentKind;

    #[test]
    fn eight_digit_codes_are_funds() {
        assert_eq!(
            classify("03311187", "eMAXIS Slim 全世界株式"),
            InstrumentKind::Fund
        );
        assert_eq!(classify("12345678", ""), InstrumentKind::Fund);
    }

    #[test]
    fn fund_code_rule_wins_over_later_rules() {
        // An 8-digit code is a fund even when the name smells like forex
        // or the symbol would otherwise stay a stock.
        assert_eq!(classify("12345678", "USD Hedged"), InstrumentKind::Fund);
    }

    #[test]
    fn currency_pairs_are_forex() {
        assert_eq!(classify("EURUSD=X", "EUR/USD"), InstrumentKind::Forex);
        assert_eq!(classify("USDJPY", "US Dollar / Yen"), InstrumentKind::Forex);
        assert_eq!(classify("gbpcad", ""), InstrumentKind::Forex);
    }

    #[test]
    fn forex_rule_wins_over_fund_keywords() {
        assert_eq!(
            classify("USDX", "Dollar Index Trust"),
            InstrumentKind::Forex
        );
    }

    #[test]
    fn fund_keywords_match_name_or_symbol() {
        assert_eq!(
            classify("VTI", "Vanguard Total Market Index"),
            InstrumentKind::Fund
        );
        assert_eq!(classify("ARKETF", "Ark Innovation"), InstrumentKind::Fund);
        assert_eq!(classify("XYZ", "グローバル・ファンド"), InstrumentKind::Fund);
    }

    #[test]
    fn everything_else_is_a_stock() {
        assert_eq!(classify("AAPL", "Apple Inc"), InstrumentKind::Stock);
        assert_eq!(classify("7203.T", "Toyota Motor"), InstrumentKind::Stock);
    }

    #[test]
    fn rule_data_is_enumerable_in_order() {
        assert_eq!(
            FOREX_SYMBOL_MARKERS,
            &["=X", "USD", "EUR", "GBP", "JPY", "CAD"][..]
        );
        assert_eq!(FUND_SYMBOL_KEYWORDS, &["FUND", "ETF"][..]);
        assert_eq!(
            &FUND_NAME_KEYWORDS[..4],
            &["FUND", "ETF", "INDEX", "TRUST"][..]
        );
    }

    #[test]
    fn four_digit_queries_get_the_tokyo_suffix() {
        assert_eq!(format_symbol("7974"), "7974.T");
        assert_eq!(format_symbol(" 7203 "), "7203.T");
    }

    #[test]
    fn other_queries_are_uppercased() {
        assert_eq!(format_symbol(" aapl "), "AAPL");
        assert_eq!(format_symbol("eurusd=x"), "EURUSD=X");
        assert_eq!(format_symbol("03311187"), "03311187");
    }
}
