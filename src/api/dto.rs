use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    Holding, InstrumentKind, LegacyTrade, PricePoint, Transaction, TransactionSide,
};

/// `GET /api/stock/{symbol}` response. `type` and `currency` are
/// optional on the wire; missing values are inferred client-side.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    symbol: String,
    name: String,
    current_price: Decimal,
    change_percent: Option<Decimal>,
    #[serde(rename = "type")]
    kind: Option<InstrumentKind>,
    currency: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct TransactionDto {
    id: String,
    #[serde(rename = "type")]
    side: TransactionSide,
    price: Decimal,
    shares: Decimal,
    date: NaiveDate,
}

impl TransactionDto {
    pub fn to_transaction(&self) -> Transaction {
        Transaction::new(
            self.id.clone(),
            self.side,
            self.price,
            self.shares,
            self.date,
        )
    }

    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self::new(
            transaction.id().clone(),
            *transaction.side(),
            *transaction.price(),
            *transaction.shares(),
            *transaction.date(),
        )
    }
}

/// One holding as the portfolio endpoint ships it. The single
/// `buyPrice`/`sellPrice` fields predate the transaction list and are
/// still sent for old rows.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct HoldingDto {
    symbol: String,
    name: String,
    #[serde(rename = "type")]
    kind: InstrumentKind,
    currency: String,
    current_price: Option<Decimal>,
    change_percent: Option<Decimal>,
    #[serde(default)]
    transactions: Vec<TransactionDto>,
    buy_price: Option<Decimal>,
    buy_date: Option<NaiveDate>,
    sell_price: Option<Decimal>,
    sell_date: Option<NaiveDate>,
}

impl HoldingDto {
    pub fn set_transactions(&mut self, transactions: Vec<TransactionDto>) {
        self.transactions = transactions;
    }

    pub fn to_holding(&self) -> Holding {
        let legacy = if self.buy_price.is_some()
            || self.buy_date.is_some()
            || self.sell_price.is_some()
            || self.sell_date.is_some()
        {
            Some(LegacyTrade::new(
                self.buy_price,
                self.buy_date,
                self.sell_price,
                self.sell_date,
            ))
        } else {
            None
        };

        Holding::new(
            self.symbol.clone(),
            self.name.clone(),
            self.kind,
            self.currency.clone(),
            self.current_price,
            self.change_percent,
            self.transactions.iter().map(|t| t.to_transaction()).collect(),
            legacy,
        )
    }

    pub fn from_holding(holding: &Holding) -> Self {
        let legacy = holding.legacy().as_ref();
        Self::new(
            holding.symbol().clone(),
            holding.name().clone(),
            *holding.kind(),
            holding.currency().clone(),
            *holding.current_price(),
            *holding.change_percent(),
            holding
                .transactions()
                .iter()
                .map(TransactionDto::from_transaction)
                .collect(),
            legacy.and_then(|l| *l.buy_price()),
            legacy.and_then(|l| *l.buy_date()),
            legacy.and_then(|l| *l.sell_price()),
            legacy.and_then(|l| *l.sell_date()),
        )
    }
}

/// `GET /api/portfolio` response, one list per bucket.
#[derive(Clone, Debug, Default, Deserialize, Getters, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDto {
    #[serde(default)]
    stocks: Vec<HoldingDto>,
    #[serde(default)]
    funds: Vec<HoldingDto>,
    #[serde(default)]
    forex: Vec<HoldingDto>,
}

impl PortfolioDto {
    pub fn bucket(&self, kind: InstrumentKind) -> &Vec<HoldingDto> {
        match kind {
            InstrumentKind::Stock => &self.stocks,
            InstrumentKind::Fund => &self.funds,
            InstrumentKind::Forex => &self.forex,
        }
    }

    pub fn bucket_mut(&mut self, kind: InstrumentKind) -> &mut Vec<HoldingDto> {
        match kind {
            InstrumentKind::Stock => &mut self.stocks,
            InstrumentKind::Fund => &mut self.funds,
            InstrumentKind::Forex => &mut self.forex,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
pub struct PricePointDto {
    date: NaiveDate,
    price: Decimal,
    name: Option<String>,
}

impl PricePointDto {
    pub fn to_price_point(&self) -> PricePoint {
        PricePoint::new(self.date, self.price, self.name.clone())
    }
}

/// `GET /api/stock/{symbol}/history?period=...` response. Both fields
/// may be absent; an empty series and a zero price are the documented
/// fallbacks.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistoryDto {
    #[serde(default)]
    history: Vec<PricePointDto>,
    current_price: Option<Decimal>,
}

impl PriceHistoryDto {
    pub fn to_price_points(&self) -> Vec<PricePoint> {
        self.history.iter().map(|p| p.to_price_point()).collect()
    }
}

/// `POST /api/portfolio/update-transactions` payload.
#[derive(Clone, Debug, Deserialize, Getters, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionsDto {
    symbol: String,
    #[serde(rename = "type")]
    kind: InstrumentKind,
    transactions: Vec<TransactionDto>,
}
