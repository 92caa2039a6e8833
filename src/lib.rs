// Project Store - Core Library
// Exposes all modules for use in the API server and tests

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod repository;
pub mod service;
pub mod telemetry;

// Only compile the HTTP layer when the server feature is enabled
#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use entities::{NewStock, NewStore, Stock, StockType, Store};
pub use error::{ServiceError, ServiceResult};
pub use repository::{StockRepository, StoreRepository};
pub use service::{validate_stock, StockRule, StockService, StoreService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
