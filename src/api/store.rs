use anyhow::Result;
use async_trait::async_trait;

use super::dto::{HoldingDto, PortfolioDto, PriceHistoryDto, QuoteDto};
use crate::{
    app::chart::Period,
    models::{InstrumentKind, Transaction},
};

/// Quote and history lookups, `GET /api/stock/...` on the wire. The
/// backend owns the actual market-data fetching; this side only shapes
/// requests and consumes responses.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn get_quote(&self, symbol: &str) -> Result<QuoteDto>;

    async fn get_history(&self, symbol: &str, period: Period) -> Result<PriceHistoryDto>;
}

/// Holdings persistence, `/api/portfolio/...` on the wire. Storage
/// format and transport are the backend's concern.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    async fn load(&self) -> Result<PortfolioDto>;

    async fn add_holding(&self, holding: HoldingDto) -> Result<()>;

    async fn remove_holding(&self, symbol: &str, kind: InstrumentKind) -> Result<()>;

    async fn update_transactions(
        &self,
        symbol: &str,
        kind: InstrumentKind,
        transactions: &[Transaction],
    ) -> Result<()>;
}
