use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{InstrumentKind, Position, Transaction, TransactionSide};
use crate::app::calc;

/// A tracked instrument together with its transaction history and the
/// latest known quote. The holding owns its transactions exclusively;
/// the valuation never mutates them.
#[derive(Clone, Debug, Getters, new)]
pub struct Holding {
    symbol: String,
    name: String,
    kind: InstrumentKind,
    currency: String,
    current_price: Option<Decimal>,
    change_percent: Option<Decimal>,
    transactions: Vec<Transaction>,
    legacy: Option<LegacyTrade>,
}

impl Holding {
    /// Appends a new transaction with a fresh id and returns the id.
    pub fn record_transaction(
        &mut self,
        side: TransactionSide,
        price: Decimal,
        shares: Decimal,
        date: NaiveDate,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.transactions
            .push(Transaction::new(id.clone(), side, price, shares, date));
        id
    }

    pub fn update_transaction(
        &mut self,
        id: &str,
        price: Decimal,
        shares: Decimal,
    ) -> bool {
        match self.transactions.iter_mut().find(|t| t.id() == id) {
            Some(transaction) => {
                transaction.set_price(price);
                transaction.set_shares(shares);
                true
            }
            None => false,
        }
    }

    pub fn remove_transaction(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id() != id);
        self.transactions.len() < before
    }

    pub fn update_price(&mut self, price: Decimal, change_percent: Option<Decimal>) {
        self.current_price = Some(price);
        self.change_percent = change_percent;
    }

    /// Valuation at the latest known price; an unknown price computes as
    /// zero rather than failing.
    pub fn position(&self) -> Position {
        calc::average_cost(
            &self.transactions,
            self.current_price.unwrap_or(Decimal::ZERO),
        )
    }
}

/// Single buy/sell fields from before holdings carried a transaction
/// list. Only consulted as a fallback when `transactions` is empty.
#[derive(Clone, Debug, Default, Getters, new)]
pub struct LegacyTrade {
    buy_price: Option<Decimal>,
    buy_date: Option<NaiveDate>,
    sell_price: Option<Decimal>,
    sell_date: Option<NaiveDate>,
}
