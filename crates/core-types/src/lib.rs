pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::TradeSide;
pub use error::CoreError;
pub use structs::{
    Holding, Holiday, MarketHours, PortfolioEntry, Stock, StockMover, StockSummary, SymbolMatch,
    TransactionHistoryItem, TransactionRecord, UserCredentials, UserProfile, WatchlistStock,
};
