pub mod holding;
pub mod instrument;
pub mod position;
pub mod price_point;
pub mod transaction;

pub use holding::{Holding, LegacyTrade};
pub use instrument::InstrumentKind;
pub use position::Position;
pub use price_point::PricePoint;
pub use transaction::{Transaction, TransactionSide};
