use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// Valuation snapshot derived from a transaction history and the latest
/// quote. Never persisted; recomputed on demand.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct Position {
    total_bought_shares: Decimal,
    total_sold_shares: Decimal,
    current_shares: Decimal,
    average_buy_price: Decimal,
    average_sell_price: Decimal,
    market_value: Decimal,
    realized_gain: Decimal,
    unrealized_gain: Decimal,
    total_gain: Decimal,
    total_gain_percent: Decimal,
}
