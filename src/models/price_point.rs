use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

/// One sample of a price-history series. `label` carries the axis tick
/// text for the points that should show one.
#[derive(Clone, Debug, Getters, PartialEq, new)]
pub struct PricePoint {
    date: NaiveDate,
    price: Decimal,
    label: Option<String>,
}
