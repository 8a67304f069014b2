pub mod dto;
pub mod memory;
pub mod store;

pub use memory::{MemoryStore, SampleQuotes};
pub use store::{PortfolioStore, QuoteSource};
