use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Asset-class bucket a holding lives in. Symbols are unique per bucket,
/// not globally.
#[derive(Clone, Copy, Debug, Deserialize, EnumIter, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    Stock,
    Fund,
    Forex,
}

impl InstrumentKind {
    pub fn from_str(s: &str) -> Result<InstrumentKind> {
        match s {
            "stock" => Ok(InstrumentKind::Stock),
            "fund" => Ok(InstrumentKind::Fund),
            "forex" => Ok(InstrumentKind::Forex),
            _ => Err(anyhow::anyhow!("Unknown instrument kind '{}'", s)),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            InstrumentKind::Stock => "stock",
            InstrumentKind::Fund => "fund",
            InstrumentKind::Forex => "forex",
        }
    }

    pub fn next(&self) -> InstrumentKind {
        match self {
            InstrumentKind::Stock => InstrumentKind::Fund,
            InstrumentKind::Fund => InstrumentKind::Forex,
            InstrumentKind::Forex => InstrumentKind::Stock,
        }
    }

    pub fn section_title(&self) -> &str {
        match self {
            InstrumentKind::Stock => "Stocks",
            InstrumentKind::Fund => "Funds",
            InstrumentKind::Forex => "Forex",
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            InstrumentKind::Stock => "📈",
            InstrumentKind::Fund => "🏦",
            InstrumentKind::Forex => "💱",
        }
    }
}
