use std::sync::Arc;

use anyhow::{Context, Error, Result};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use strum::IntoEnumIterator;

use crate::{
    api::{PortfolioStore, QuoteSource, dto::{HoldingDto, QuoteDto}},
    app::{classify, currency},
    models::{Holding, InstrumentKind},
};

/// Portfolio-wide totals for the overview line.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct PortfolioSummary {
    market_value: Decimal,
    realized_gain: Decimal,
    unrealized_gain: Decimal,
    total_gain: Decimal,
}

/// The three asset-class buckets plus the store they are persisted
/// through. All mutations go to the store first; the in-memory bucket
/// only changes once the store accepted the write.
pub struct Portfolio {
    stocks: Vec<Holding>,
    funds: Vec<Holding>,
    forex: Vec<Holding>,
    store: Arc<dyn PortfolioStore>,
}

impl Portfolio {
    pub fn new(store: Arc<dyn PortfolioStore>) -> Self {
        Self {
            stocks: Vec::new(),
            funds: Vec::new(),
            forex: Vec::new(),
            store,
        }
    }

    /// Handle to the backing store, for writes scheduled outside the
    /// portfolio's own borrow (debounced autosave).
    pub fn store(&self) -> Arc<dyn PortfolioStore> {
        self.store.clone()
    }

    pub async fn load(&mut self) -> Result<()> {
        let portfolio = self.store.load().await.context("Failed to load portfolio")?;

        for kind in InstrumentKind::iter() {
            *self.bucket_mut(kind) = portfolio
                .bucket(kind)
                .iter()
                .map(|dto| dto.to_holding())
                .collect();
        }
        Ok(())
    }

    pub fn bucket(&self, kind: InstrumentKind) -> &Vec<Holding> {
        match kind {
            InstrumentKind::Stock => &self.stocks,
            InstrumentKind::Fund => &self.funds,
            InstrumentKind::Forex => &self.forex,
        }
    }

    pub fn bucket_mut(&mut self, kind: InstrumentKind) -> &mut Vec<Holding> {
        match kind {
            InstrumentKind::Stock => &mut self.stocks,
            InstrumentKind::Fund => &mut self.funds,
            InstrumentKind::Forex => &mut self.forex,
        }
    }

    pub fn holding(&self, symbol: &str, kind: InstrumentKind) -> Option<&Holding> {
        self.bucket(kind).iter().find(|h| h.symbol() == symbol)
    }

    pub fn holding_mut(&mut self, symbol: &str, kind: InstrumentKind) -> Option<&mut Holding> {
        self.bucket_mut(kind).iter_mut().find(|h| h.symbol() == symbol)
    }

    /// Turns an accepted search result into a holding in its bucket.
    /// Kind and currency come from the wire when present and are
    /// inferred from the symbol otherwise. Symbols are unique per
    /// bucket.
    pub async fn add_quote(&mut self, quote: &QuoteDto) -> Result<InstrumentKind> {
        let kind = (*quote.kind())
            .unwrap_or_else(|| classify::classify(quote.symbol(), quote.name()));
        let holding_currency = quote
            .currency()
            .clone()
            .unwrap_or_else(|| currency::currency_for_symbol(quote.symbol()).to_string());

        if self.holding(quote.symbol(), kind).is_some() {
            return Err(Error::msg(format!(
                "{} is already in the portfolio",
                quote.symbol()
            )));
        }

        let holding = Holding::new(
            quote.symbol().clone(),
            quote.name().clone(),
            kind,
            holding_currency,
            Some(*quote.current_price()),
            *quote.change_percent(),
            Vec::new(),
            None,
        );

        self.store
            .add_holding(HoldingDto::from_holding(&holding))
            .await
            .with_context(|| format!("Failed to add {}", quote.symbol()))?;

        self.bucket_mut(kind).push(holding);
        Ok(kind)
    }

    pub async fn remove(&mut self, symbol: &str, kind: InstrumentKind) -> Result<()> {
        if self.holding(symbol, kind).is_none() {
            return Err(Error::msg(format!(
                "{} is not in the {} bucket",
                symbol,
                kind.to_str()
            )));
        }

        self.store
            .remove_holding(symbol, kind)
            .await
            .with_context(|| format!("Failed to remove {}", symbol))?;

        self.bucket_mut(kind).retain(|h| h.symbol() != symbol);
        Ok(())
    }

    /// Pushes the holding's current transaction list to the store.
    pub async fn save_transactions(&self, symbol: &str, kind: InstrumentKind) -> Result<()> {
        let holding = self
            .holding(symbol, kind)
            .ok_or_else(|| Error::msg(format!("{} is not in the portfolio", symbol)))?;

        self.store
            .update_transactions(symbol, kind, holding.transactions())
            .await
            .with_context(|| format!("Failed to save transactions for {}", symbol))
    }

    /// Re-quotes every holding. Returns how many prices were updated.
    pub async fn refresh_prices(&mut self, quotes: &dyn QuoteSource) -> Result<usize> {
        let mut updated = 0;

        for kind in InstrumentKind::iter() {
            for holding in self.bucket_mut(kind).iter_mut() {
                let quote = quotes
                    .get_quote(holding.symbol())
                    .await
                    .with_context(|| format!("Failed to refresh {}", holding.symbol()))?;
                holding.update_price(*quote.current_price(), *quote.change_percent());
                updated += 1;
            }
        }
        Ok(updated)
    }

    pub fn summary(&self) -> PortfolioSummary {
        let mut market_value = Decimal::ZERO;
        let mut realized_gain = Decimal::ZERO;
        let mut unrealized_gain = Decimal::ZERO;

        for kind in InstrumentKind::iter() {
            for holding in self.bucket(kind) {
                let position = holding.position();
                market_value += *position.market_value();
                realized_gain += *position.realized_gain();
                unrealized_gain += *position.unrealized_gain();
            }
        }

        PortfolioSummary::new(
            market_value,
            realized_gain,
            unrealized_gain,
            realized_gain + unrealized_gain,
        )
    }
}
