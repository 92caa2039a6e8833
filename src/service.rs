// Services - business rules between the HTTP layer and the repositories

use std::sync::Arc;

use crate::entities::{NewStock, NewStore, Stock, StockType, Store};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{StockRepository, StoreRepository};

// ============================================================================
// STOCK VALIDATION
// ============================================================================

/// Business rules a stock candidate is checked against, in checking order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockRule {
    NameNotEmpty,
    TypeRecognized,
    ValuePositive,
}

impl StockRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockRule::NameNotEmpty => "name must not be empty",
            StockRule::TypeRecognized => "type must be recognized",
            StockRule::ValuePositive => "value must be strictly positive",
        }
    }
}

/// Check a candidate and return its parsed type, or the first rule it breaks
pub fn validate_stock(candidate: &NewStock) -> Result<StockType, StockRule> {
    if candidate.name.trim().is_empty() {
        return Err(StockRule::NameNotEmpty);
    }

    let stock_type = StockType::parse(&candidate.stock_type).ok_or(StockRule::TypeRecognized)?;

    if candidate.value <= 0 {
        return Err(StockRule::ValuePositive);
    }

    Ok(stock_type)
}

// ============================================================================
// STOCK SERVICE
// ============================================================================

#[derive(Clone)]
pub struct StockService {
    stores: Arc<dyn StoreRepository>,
    stocks: Arc<dyn StockRepository>,
}

impl StockService {
    pub fn new(stores: Arc<dyn StoreRepository>, stocks: Arc<dyn StockRepository>) -> Self {
        StockService { stores, stocks }
    }

    /// Create a stock in `store_id`.
    ///
    /// The store is checked first, then the candidate. `candidate.store_id`
    /// is never consulted.
    pub fn create(&self, store_id: i64, candidate: NewStock) -> ServiceResult<Stock> {
        if !self.stores.exists(store_id)? {
            return Err(ServiceError::StoreNotFound);
        }

        let stock_type = validate_stock(&candidate).map_err(|rule| {
            tracing::debug!(store_id, rule = rule.as_str(), "stock candidate rejected");
            ServiceError::InvalidStock
        })?;

        if let Some(body_store_id) = candidate.store_id.filter(|id| *id != store_id) {
            tracing::debug!(store_id, body_store_id, "ignoring storeId from request body");
        }

        let stock = self.stocks.save(&Stock {
            id: 0,
            name: candidate.name,
            stock_type,
            value: candidate.value,
            store_id,
        })?;

        tracing::info!(stock_id = stock.id, store_id, "stock created");
        Ok(stock)
    }

    pub fn get(&self, stock_id: i64) -> ServiceResult<Stock> {
        self.stocks
            .find_by_id(stock_id)?
            .ok_or(ServiceError::StockNotFound)
    }

    pub fn list_by_store(&self, store_id: i64) -> ServiceResult<Vec<Stock>> {
        if !self.stores.exists(store_id)? {
            return Err(ServiceError::StoreNotFound);
        }

        Ok(self.stocks.list_by_store(store_id)?)
    }
}

// ============================================================================
// STORE SERVICE
// ============================================================================

#[derive(Clone)]
pub struct StoreService {
    stores: Arc<dyn StoreRepository>,
}

impl StoreService {
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        StoreService { stores }
    }

    pub fn create(&self, candidate: NewStore) -> ServiceResult<Store> {
        if !candidate.has_name() {
            return Err(ServiceError::InvalidStore);
        }

        let store = self.stores.save(&candidate.name)?;
        tracing::info!(store_id = store.id, "store created");
        Ok(store)
    }

    pub fn get(&self, store_id: i64) -> ServiceResult<Store> {
        self.stores
            .find_by_id(store_id)?
            .ok_or(ServiceError::StoreNotFound)
    }
}

// ============================================================================
// TESTS
// ============================================================================
