use anyhow::Result;
use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single buy or sell event. Ids are assigned once at creation and
/// never reused; insertion order is preserved, date order is not.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct Transaction {
    id: String,
    side: TransactionSide,
    price: Decimal,
    shares: Decimal,
    date: NaiveDate,
}

impl Transaction {
    pub fn value(&self) -> Decimal {
        self.price * self.shares
    }

    pub fn set_price(&mut self, price: Decimal) {
        self.price = price;
    }

    pub fn set_shares(&mut self, shares: Decimal) {
        self.shares = shares;
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSide {
    Buy,
    Sell,
}

impl TransactionSide {
    pub fn from_str(s: &str) -> Result<TransactionSide> {
        match s {
            "buy" => Ok(TransactionSide::Buy),
            "sell" => Ok(TransactionSide::Sell),
            _ => Err(anyhow::anyhow!("Unknown transaction side '{}'", s)),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            TransactionSide::Buy => "buy",
            TransactionSide::Sell => "sell",
        }
    }
}
