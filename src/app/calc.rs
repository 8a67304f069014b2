use rust_decimal::Decimal;

use crate::models::{Position, Transaction, TransactionSide};

const SCALE: u32 = 4;
const PERCENT_SCALE: u32 = 2;

/// Average-cost valuation of a transaction history at `current_price`.
///
/// Every sale is costed against the value-weighted average buy price,
/// not FIFO/LIFO lot matching. When sells exceed buys, `current_shares`
/// stays negative and the remaining cost basis is clamped at zero. An
/// unknown price must be passed as `Decimal::ZERO`; rows with a zero or
/// negative share count or a negative price contribute nothing. Total on
/// its input domain: no error cases, no mutation, identical inputs give
/// identical output.
pub fn average_cost(transactions: &[Transaction], current_price: Decimal) -> Position {
    let mut total_bought_shares = Decimal::ZERO;
    let mut total_buy_value = Decimal::ZERO;
    let mut total_sold_shares = Decimal::ZERO;
    let mut total_sell_value = Decimal::ZERO;

    for transaction in transactions {
        let shares = *transaction.shares();
        if shares <= Decimal::ZERO || *transaction.price() < Decimal::ZERO {
            continue;
        }
        match transaction.side() {
            TransactionSide::Buy => {
                total_bought_shares += shares;
                total_buy_value += transaction.value();
            }
            TransactionSide::Sell => {
                total_sold_shares += shares;
                total_sell_value += transaction.value();
            }
        }
    }

    let average_buy_price = if total_bought_shares > Decimal::ZERO {
        (total_buy_value / total_bought_shares).round_dp(SCALE)
    } else {
        Decimal::ZERO
    };
    let average_sell_price = if total_sold_shares > Decimal::ZERO {
        (total_sell_value / total_sold_shares).round_dp(SCALE)
    } else {
        Decimal::ZERO
    };

    let current_shares = total_bought_shares - total_sold_shares;

    let sold_cost_basis = total_sold_shares * average_buy_price;
    let realized_gain = (total_sell_value - sold_cost_basis).round_dp(SCALE);

    let mut remaining_cost_basis = current_shares * average_buy_price;
    if remaining_cost_basis < Decimal::ZERO {
        remaining_cost_basis = Decimal::ZERO;
    }

    let market_value = (current_shares * current_price).round_dp(SCALE);
    let unrealized_gain = (market_value - remaining_cost_basis).round_dp(SCALE);
    let total_gain = realized_gain + unrealized_gain;
    let total_gain_percent = if total_buy_value > Decimal::ZERO {
        (total_gain / total_buy_value * Decimal::ONE_HUNDRED).round_dp(PERCENT_SCALE)
    } else {
        Decimal::ZERO
    };

    Position::new(
        total_bought_shares.round_dp(SCALE),
        total_sold_shares.round_dp(SCALE),
        current_shares.round_dp(SCALE),
        average_buy_price,
        average_sell_price,
        market_value,
        realized_gain,
        unrealized_gain,
        total_gain,
        total_gain_percent,
    )
}
