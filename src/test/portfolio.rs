#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::api::dto::QuoteDto;
    use crate::api::{MemoryStore, SampleQuotes};
    use crate::app::Portfolio;
    use crate::models::{InstrumentKind, TransactionSide};

    fn quote(symbol: &str, name: &str, price: rust_decimal::Decimal) -> QuoteDto {
        QuoteDto::new(
            symbol.to_string(),
            name.to_string(),
            price,
            None,
            None,
            None,
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[tokio::test]
    async fn add_quote_classifies_and_infers_currency() {
        let mut portfolio = Portfolio::new(Arc::new(MemoryStore::default()));

        let kind = portfolio
            .add_quote(&quote("EURUSD=X", "EUR/USD", dec!(1.08)))
            .await
            .unwrap();
        assert_eq!(kind, InstrumentKind::Forex);

        let kind = portfolio
            .add_quote(&quote("03311187", "eMAXIS Slim 全世界株式", dec!(25440)))
            .await
            .unwrap();
        assert_eq!(kind, InstrumentKind::Fund);

        let pair = &portfolio.bucket(InstrumentKind::Forex)[0];
        assert_eq!(pair.currency(), "USD");

        let fund = &portfolio.bucket(InstrumentKind::Fund)[0];
        assert_eq!(fund.currency(), "JPY");
        assert_eq!(*fund.current_price(), Some(dec!(25440)));
    }

    #[tokio::test]
    async fn wire_kind_and_currency_win_over_inference() {
        let mut portfolio = Portfolio::new(Arc::new(MemoryStore::default()));

        let quote = QuoteDto::new(
            String::from("AAPL"),
            String::from("Apple Inc"),
            dec!(120.50),
            Some(dec!(15.2)),
            Some(InstrumentKind::Fund),
            Some(String::from("EUR")),
        );
        let kind = portfolio.add_quote(&quote).await.unwrap();

        assert_eq!(kind, InstrumentKind::Fund);
        assert_eq!(portfolio.bucket(InstrumentKind::Fund)[0].currency(), "EUR");
    }

    #[tokio::test]
    async fn duplicate_symbols_are_rejected_per_bucket() {
        let mut portfolio = Portfolio::new(Arc::new(MemoryStore::default()));

        portfolio
            .add_quote(&quote("AAPL", "Apple Inc", dec!(120)))
            .await
            .unwrap();
        let result = portfolio.add_quote(&quote("AAPL", "Apple Inc", dec!(121))).await;

        assert!(result.is_err());
        assert_eq!(portfolio.bucket(InstrumentKind::Stock).len(), 1);
    }

    #[tokio::test]
    async fn remove_updates_bucket_and_store() {
        let store = Arc::new(MemoryStore::default());
        let mut portfolio = Portfolio::new(store.clone());

        portfolio
            .add_quote(&quote("AAPL", "Apple Inc", dec!(120)))
            .await
            .unwrap();
        portfolio.remove("AAPL", InstrumentKind::Stock).await.unwrap();

        assert!(portfolio.bucket(InstrumentKind::Stock).is_empty());

        let mut reloaded = Portfolio::new(store);
        reloaded.load().await.unwrap();
        assert!(reloaded.bucket(InstrumentKind::Stock).is_empty());
    }

    #[tokio::test]
    async fn saved_transactions_survive_a_reload() {
        let store = Arc::new(MemoryStore::default());
        let mut portfolio = Portfolio::new(store.clone());

        portfolio
            .add_quote(&quote("AAPL", "Apple Inc", dec!(150)))
            .await
            .unwrap();

        let holding = portfolio.holding_mut("AAPL", InstrumentKind::Stock).unwrap();
        let first = holding.record_transaction(TransactionSide::Buy, dec!(100), dec!(10), day(2));
        let second = holding.record_transaction(TransactionSide::Sell, dec!(120), dec!(4), day(9));
        assert_ne!(first, second);

        portfolio
            .save_transactions("AAPL", InstrumentKind::Stock)
            .await
            .unwrap();

        let mut reloaded = Portfolio::new(store);
        reloaded.load().await.unwrap();
        let holding = reloaded.holding("AAPL", InstrumentKind::Stock).unwrap();
        assert_eq!(holding.transactions().len(), 2);
        assert_eq!(holding.transactions()[0].id(), &first);

        let position = holding.position();
        assert_eq!(*position.current_shares(), dec!(6));
        assert_eq!(*position.realized_gain(), dec!(80));
    }

    #[tokio::test]
    async fn refresh_prices_pulls_fresh_quotes() {
        let mut portfolio = Portfolio::new(Arc::new(MemoryStore::default()));
        portfolio
            .add_quote(&quote("AAPL", "Apple Inc", dec!(100)))
            .await
            .unwrap();

        let quotes = SampleQuotes::with_sample_data();
        let updated = portfolio.refresh_prices(&quotes).await.unwrap();

        assert_eq!(updated, 1);
        let holding = portfolio.holding("AAPL", InstrumentKind::Stock).unwrap();
        assert_eq!(*holding.current_price(), Some(dec!(120.50)));
        assert_eq!(*holding.change_percent(), Some(dec!(15.2)));
    }

    #[tokio::test]
    async fn refresh_fails_for_unquotable_holdings() {
        let mut portfolio = Portfolio::new(Arc::new(MemoryStore::default()));
        portfolio
            .add_quote(&quote("NFLX", "Netflix", dec!(65.30)))
            .await
            .unwrap();

        let quotes = SampleQuotes::with_sample_data();
        assert!(portfolio.refresh_prices(&quotes).await.is_err());
    }

    #[tokio::test]
    async fn transactions_can_be_edited_and_removed_by_id() {
        let mut portfolio = Portfolio::new(Arc::new(MemoryStore::default()));
        portfolio
            .add_quote(&quote("AAPL", "Apple Inc", dec!(150)))
            .await
            .unwrap();

        let holding = portfolio.holding_mut("AAPL", InstrumentKind::Stock).unwrap();
        let id = holding.record_transaction(TransactionSide::Buy, dec!(100), dec!(10), day(2));

        assert!(holding.update_transaction(&id, dec!(105), dec!(12)));
        assert_eq!(*holding.transactions()[0].shares(), dec!(12));
        assert!(!holding.update_transaction("missing", dec!(1), dec!(1)));

        assert!(holding.remove_transaction(&id));
        assert!(holding.transactions().is_empty());
        assert!(!holding.remove_transaction(&id));
    }

    #[tokio::test]
    async fn summary_sums_every_bucket() {
        let mut portfolio = Portfolio::new(Arc::new(MemoryStore::default()));

        portfolio
            .add_quote(&quote("AAPL", "Apple Inc", dec!(150)))
            .await
            .unwrap();
        portfolio
            .holding_mut("AAPL", InstrumentKind::Stock)
            .unwrap()
            .record_transaction(TransactionSide::Buy, dec!(100), dec!(10), day(2));

        portfolio
            .add_quote(&quote("EURUSD=X", "EUR/USD", dec!(50)))
            .await
            .unwrap();
        let pair = portfolio.holding_mut("EURUSD=X", InstrumentKind::Forex).unwrap();
        pair.record_transaction(TransactionSide::Buy, dec!(30), dec!(2), day(3));
        pair.record_transaction(TransactionSide::Sell, dec!(40), dec!(1), day(4));

        let summary = portfolio.summary();
        assert_eq!(*summary.market_value(), dec!(1550));
        assert_eq!(*summary.realized_gain(), dec!(10));
        assert_eq!(*summary.unrealized_gain(), dec!(520));
        assert_eq!(*summary.total_gain(), dec!(530));
    }
}
