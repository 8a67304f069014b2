use anyhow::{Error, Result};
use async_trait::async_trait;
use chrono::{Datelike, Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    dto::{HoldingDto, PortfolioDto, PriceHistoryDto, PricePointDto, QuoteDto, TransactionDto},
    store::{PortfolioStore, QuoteSource},
};
use crate::{
    app::chart::Period,
    models::{InstrumentKind, Transaction, TransactionSide},
};

/// In-memory portfolio backend. Stands in for the remote
/// `/api/portfolio` endpoints in the demo binary and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<PortfolioDto>,
}

impl MemoryStore {
    pub fn new(portfolio: PortfolioDto) -> Self {
        Self {
            inner: Mutex::new(portfolio),
        }
    }

    /// Seeded with three default holdings, a transaction history for
    /// AAPL and a legacy single-trade row for TSLA.
    pub fn with_sample_data() -> Self {
        let today = Local::now().date_naive();
        let transaction =
            |side: TransactionSide, price: Decimal, shares: Decimal, days_ago: i64| {
                TransactionDto::new(
                    Uuid::new_v4().to_string(),
                    side,
                    price,
                    shares,
                    today - Duration::days(days_ago),
                )
            };

        let stocks = vec![
            HoldingDto::new(
                String::from("AAPL"),
                String::from("Apple Inc"),
                InstrumentKind::Stock,
                String::from("USD"),
                Some(dec!(120.50)),
                Some(dec!(15.2)),
                vec![
                    transaction(TransactionSide::Buy, dec!(100.00), dec!(10), 120),
                    transaction(TransactionSide::Buy, dec!(130.00), dec!(5), 60),
                    transaction(TransactionSide::Sell, dec!(150.00), dec!(4), 30),
                ],
                None,
                None,
                None,
                None,
            ),
            HoldingDto::new(
                String::from("TSLA"),
                String::from("Tesla Stock"),
                InstrumentKind::Stock,
                String::from("USD"),
                Some(dec!(2400.00)),
                Some(dec!(54.6)),
                Vec::new(),
                Some(dec!(1800.00)),
                Some(today - Duration::days(90)),
                None,
                None,
            ),
            HoldingDto::new(
                String::from("MSFT"),
                String::from("Microsoft"),
                InstrumentKind::Stock,
                String::from("USD"),
                Some(dec!(1200.00)),
                Some(dec!(27.3)),
                Vec::new(),
                None,
                None,
                None,
                None,
            ),
        ];

        Self::new(PortfolioDto::new(stocks, Vec::new(), Vec::new()))
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn load(&self) -> Result<PortfolioDto> {
        Ok(self.inner.lock().await.clone())
    }

    async fn add_holding(&self, holding: HoldingDto) -> Result<()> {
        let mut portfolio = self.inner.lock().await;
        let bucket = portfolio.bucket_mut(*holding.kind());

        if bucket.iter().any(|h| h.symbol() == holding.symbol()) {
            return Err(Error::msg(format!(
                "{} is already in the portfolio",
                holding.symbol()
            )));
        }

        bucket.push(holding);
        Ok(())
    }

    async fn remove_holding(&self, symbol: &str, kind: InstrumentKind) -> Result<()> {
        let mut portfolio = self.inner.lock().await;
        let bucket = portfolio.bucket_mut(kind);
        let before = bucket.len();
        bucket.retain(|h| h.symbol() != symbol);

        if bucket.len() == before {
            return Err(Error::msg(format!("{} is not in the portfolio", symbol)));
        }
        Ok(())
    }

    async fn update_transactions(
        &self,
        symbol: &str,
        kind: InstrumentKind,
        transactions: &[Transaction],
    ) -> Result<()> {
        let mut portfolio = self.inner.lock().await;
        let bucket = portfolio.bucket_mut(kind);

        let holding = bucket
            .iter_mut()
            .find(|h| h.symbol() == symbol)
            .ok_or_else(|| Error::msg(format!("{} is not in the portfolio", symbol)))?;

        holding.set_transactions(
            transactions
                .iter()
                .map(TransactionDto::from_transaction)
                .collect(),
        );
        Ok(())
    }
}

/// Canned quote source with a deterministic synthetic history, so the
/// binary runs end to end without any market-data backend.
#[derive(Debug, Default)]
pub struct SampleQuotes {
    quotes: Vec<QuoteDto>,
}

impl SampleQuotes {
    pub fn new(quotes: Vec<QuoteDto>) -> Self {
        Self { quotes }
    }

    pub fn with_sample_data() -> Self {
        Self::new(vec![
            QuoteDto::new(
                String::from("AAPL"),
                String::from("Apple Inc"),
                dec!(120.50),
                Some(dec!(15.2)),
                None,
                Some(String::from("USD")),
            ),
            QuoteDto::new(
                String::from("TSLA"),
                String::from("Tesla Stock"),
                dec!(2400.00),
                Some(dec!(54.6)),
                None,
                Some(String::from("USD")),
            ),
            QuoteDto::new(
                String::from("MSFT"),
                String::from("Microsoft"),
                dec!(1200.00),
                Some(dec!(27.3)),
                None,
                Some(String::from("USD")),
            ),
            QuoteDto::new(
                String::from("EURUSD=X"),
                String::from("EUR/USD"),
                dec!(1.0842),
                Some(dec!(-0.12)),
                None,
                None,
            ),
        ])
    }
}

#[async_trait]
impl QuoteSource for SampleQuotes {
    async fn get_quote(&self, symbol: &str) -> Result<QuoteDto> {
        self.quotes
            .iter()
            .find(|quote| quote.symbol() == symbol)
            .cloned()
            .ok_or_else(|| Error::msg("Stock not found"))
    }

    async fn get_history(&self, symbol: &str, period: Period) -> Result<PriceHistoryDto> {
        let quote = self.get_quote(symbol).await?;
        let today = Local::now().date_naive();
        let days_back = days_back(period, today);
        let step = (days_back / 60).max(1);

        Ok(PriceHistoryDto::new(
            sample_series(*quote.current_price(), today, days_back, step),
            Some(*quote.current_price()),
        ))
    }
}

fn days_back(period: Period, today: NaiveDate) -> i64 {
    match period {
        Period::OneDay => 1,
        Period::OneWeek => 7,
        Period::OneMonth => 30,
        Period::ThreeMonths => 90,
        Period::SixMonths => 182,
        Period::YearToDate => i64::from(today.ordinal().saturating_sub(1).max(1)),
        Period::OneYear => 365,
        Period::TwoYears => 730,
    }
}

/// Deterministic ramp from 95% of the current price with a small wobble.
/// The first point of every month carries the axis label.
fn sample_series(
    current_price: Decimal,
    today: NaiveDate,
    days_back: i64,
    step: i64,
) -> Vec<PricePointDto> {
    let mut offsets: Vec<i64> = (0..=days_back).rev().step_by(step as usize).collect();
    if offsets.last() != Some(&0) {
        offsets.push(0);
    }

    let count = offsets.len();
    let mut previous_month: Option<String> = None;
    let mut points = Vec::with_capacity(count);

    for (i, offset) in offsets.iter().enumerate() {
        let date = today - Duration::days(*offset);
        let progress = if count > 1 {
            Decimal::from(i as u64) / Decimal::from((count - 1) as u64)
        } else {
            Decimal::ONE
        };
        let wobble = Decimal::from((i as i64 * 7) % 11 - 5) / dec!(1000);
        let price = (current_price * (dec!(0.95) + dec!(0.05) * progress + wobble)).round_dp(4);

        let month = date.format("%b").to_string();
        let name = if previous_month.as_ref() != Some(&month) {
            previous_month = Some(month.clone());
            Some(month)
        } else {
            None
        };

        points.push(PricePointDto::new(date, price, name));
    }

    points
}
