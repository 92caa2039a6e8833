use thiserror::Error;

/// Outcomes a service call can fail with
///
/// `Display` strings are exactly what clients see in the `msg` field.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid stock")]
    InvalidStock,

    #[error("Store name cannot be empty")]
    InvalidStore,

    #[error("Store not found")]
    StoreNotFound,

    #[error("Stock not found")]
    StockNotFound,

    /// Storage or any other unexpected failure. Details stay server-side.
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
