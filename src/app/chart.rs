use std::time::Duration;

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::models::{LegacyTrade, PricePoint, Transaction, TransactionSide};

const PERCENT_SCALE: u32 = 2;

/// History window selectable above the price chart.
#[derive(Clone, Copy, Debug, EnumIter, Eq, PartialEq)]
pub enum Period {
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
    SixMonths,
    YearToDate,
    OneYear,
    TwoYears,
}

impl Period {
    pub fn from_str(s: &str) -> anyhow::Result<Period> {
        match s {
            "1D" => Ok(Period::OneDay),
            "1W" => Ok(Period::OneWeek),
            "1M" | "30D" => Ok(Period::OneMonth),
            "3M" | "90D" => Ok(Period::ThreeMonths),
            "6M" => Ok(Period::SixMonths),
            "YTD" => Ok(Period::YearToDate),
            "1Y" => Ok(Period::OneYear),
            "2Y" => Ok(Period::TwoYears),
            _ => Err(anyhow::anyhow!("Unknown period '{}'", s)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::OneDay => "1D",
            Period::OneWeek => "1W",
            Period::OneMonth => "1M",
            Period::ThreeMonths => "3M",
            Period::SixMonths => "6M",
            Period::YearToDate => "YTD",
            Period::OneYear => "1Y",
            Period::TwoYears => "2Y",
        }
    }

    /// Value sent to the history endpoint; the month windows are spelled
    /// in days on the wire.
    pub fn query_value(&self) -> &'static str {
        match self {
            Period::OneDay => "1D",
            Period::OneWeek => "1W",
            Period::OneMonth => "30D",
            Period::ThreeMonths => "90D",
            Period::SixMonths => "6M",
            Period::YearToDate => "YTD",
            Period::OneYear => "1Y",
            Period::TwoYears => "2Y",
        }
    }

    /// Auto-refresh cadence, matching the sampling interval of the
    /// backing data. Daily-sampled windows do not refresh.
    pub fn refresh_interval(&self) -> Option<Duration> {
        match self {
            Period::OneDay => Some(Duration::from_secs(120)),
            Period::OneWeek => Some(Duration::from_secs(300)),
            Period::OneMonth => Some(Duration::from_secs(3600)),
            _ => None,
        }
    }

    pub fn next(&self) -> Period {
        let periods: Vec<Period> = Period::iter().collect();
        let index = periods.iter().position(|p| p == self).unwrap_or(0);
        periods[(index + 1) % periods.len()]
    }
}

/// A buy/sell dot pinned to the history point closest to the
/// transaction date.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct Marker {
    point_index: usize,
    side: TransactionSide,
}

/// Everything the history panel needs, precomputed from one snapshot of
/// the series. Pure data; no drawing happens here.
#[derive(Clone, Debug, Getters)]
pub struct ChartView {
    first_price: Decimal,
    last_price: Decimal,
    change_percent: Decimal,
    rising: bool,
    markers: Vec<Marker>,
}

impl ChartView {
    pub fn new(
        history: &[PricePoint],
        current_price: Decimal,
        transactions: &[Transaction],
        legacy: Option<&LegacyTrade>,
    ) -> Self {
        let first_price = history
            .first()
            .map(|point| *point.price())
            .unwrap_or(Decimal::ZERO);
        let last_price = history
            .last()
            .map(|point| *point.price())
            .unwrap_or(current_price);

        let change_percent = if first_price > Decimal::ZERO {
            ((last_price - first_price) / first_price * Decimal::ONE_HUNDRED)
                .round_dp(PERCENT_SCALE)
        } else {
            Decimal::ZERO
        };

        Self {
            first_price,
            last_price,
            change_percent,
            rising: last_price >= first_price,
            markers: place_markers(history, transactions, legacy),
        }
    }
}

/// Whether a transaction date falls inside the plotted window.
pub fn date_in_range(history: &[PricePoint], date: NaiveDate) -> bool {
    match (history.first(), history.last()) {
        (Some(first), Some(last)) => date >= *first.date() && date <= *last.date(),
        _ => false,
    }
}

/// Index of the history point closest to `date` by absolute distance.
pub fn closest_point(history: &[PricePoint], date: NaiveDate) -> Option<usize> {
    history
        .iter()
        .enumerate()
        .min_by_key(|(_, point)| (*point.date() - date).num_days().abs())
        .map(|(index, _)| index)
}

/// Pins every in-range transaction to its nearest history point. When a
/// holding predates transaction lists, the single legacy buy/sell dates
/// are pinned instead.
pub fn place_markers(
    history: &[PricePoint],
    transactions: &[Transaction],
    legacy: Option<&LegacyTrade>,
) -> Vec<Marker> {
    let mut markers = Vec::new();

    if !transactions.is_empty() {
        for transaction in transactions {
            if !date_in_range(history, *transaction.date()) {
                continue;
            }
            if let Some(index) = closest_point(history, *transaction.date()) {
                markers.push(Marker::new(index, *transaction.side()));
            }
        }
        return markers;
    }

    if let Some(legacy) = legacy {
        if let (Some(_), Some(date)) = (legacy.buy_price(), legacy.buy_date()) {
            if date_in_range(history, *date) {
                if let Some(index) = closest_point(history, *date) {
                    markers.push(Marker::new(index, TransactionSide::Buy));
                }
            }
        }
        if let (Some(_), Some(date)) = (legacy.sell_price(), legacy.sell_date()) {
            if date_in_range(history, *date) {
                if let Some(index) = closest_point(history, *date) {
                    markers.push(Marker::new(index, TransactionSide::Sell));
                }
            }
        }
    }

    markers
}

/// Value-weighted average buy and sell prices for the chart legend,
/// falling back to the legacy single prices when no transactions exist.
pub fn average_trade_prices(
    transactions: &[Transaction],
    legacy: Option<&LegacyTrade>,
) -> (Option<Decimal>, Option<Decimal>) {
    let average_for = |side: TransactionSide| -> Option<Decimal> {
        let mut total_value = Decimal::ZERO;
        let mut total_shares = Decimal::ZERO;
        for transaction in transactions {
            if *transaction.side() == side {
                total_value += transaction.value();
                total_shares += *transaction.shares();
            }
        }
        if total_shares > Decimal::ZERO {
            Some((total_value / total_shares).round_dp(4))
        } else {
            None
        }
    };

    let average_buy = average_for(TransactionSide::Buy)
        .or_else(|| legacy.and_then(|l| *l.buy_price()));
    let average_sell = average_for(TransactionSide::Sell)
        .or_else(|| legacy.and_then(|l| *l.sell_price()));

    (average_buy, average_sell)
}
