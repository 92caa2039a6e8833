// Project Store - REST API with Axum
//
// Handlers only parse; every rule lives in the services. Errors map to
// {"msg": ...} bodies through `IntoResponse for ServiceError`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::entities::{NewStock, NewStore, Stock, Store};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{StockRepository, StoreRepository};
use crate::service::{StockService, StoreService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub stores: StoreService,
    pub stocks: StockService,
}

impl AppState {
    /// Wire both services onto one database
    pub fn new(db: Database) -> Self {
        let store_repo: Arc<dyn StoreRepository> = Arc::new(db.clone());
        let stock_repo: Arc<dyn StockRepository> = Arc::new(db);

        Self {
            stores: StoreService::new(store_repo.clone()),
            stocks: StockService::new(store_repo, stock_repo),
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    msg: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::InvalidStock | ServiceError::InvalidStore => StatusCode::BAD_REQUEST,
            ServiceError::StoreNotFound | ServiceError::StockNotFound => StatusCode::NOT_FOUND,
            ServiceError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorBody { msg: self.to_string() })).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

/// POST /stores - Create a store
async fn create_store(
    State(state): State<AppState>,
    body: Result<Json<NewStore>, JsonRejection>,
) -> ServiceResult<Json<Store>> {
    let Json(candidate) = body.map_err(|rejection| {
        tracing::warn!(%rejection, "unreadable store body");
        ServiceError::InvalidStore
    })?;

    state.stores.create(candidate).map(Json)
}

/// GET /stores/:store_id - Fetch one store
async fn get_store(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<Store>> {
    let store_id = store_id_from(path)?;
    state.stores.get(store_id).map(Json)
}

/// POST /stores/:store_id/stocks - Create a stock in a store
///
/// The route's store id is authoritative; a `storeId` in the body is ignored.
async fn create_stock(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<NewStock>, JsonRejection>,
) -> ServiceResult<Json<Stock>> {
    let store_id = store_id_from(path)?;

    let Json(candidate) = body.map_err(|rejection| {
        tracing::warn!(store_id, %rejection, "unreadable stock body");
        ServiceError::InvalidStock
    })?;

    state.stocks.create(store_id, candidate).map(Json)
}

/// GET /stores/:store_id/stocks - Stocks of a store, oldest first
async fn list_store_stocks(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<Vec<Stock>>> {
    let store_id = store_id_from(path)?;
    state.stocks.list_by_store(store_id).map(Json)
}

/// GET /stocks/:stock_id - Fetch one stock
async fn get_stock(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ServiceResult<Json<Stock>> {
    let Path(stock_id) = path.map_err(|_| ServiceError::StockNotFound)?;
    state.stocks.get(stock_id).map(Json)
}

/// A store id that does not parse as an integer cannot name any store
fn store_id_from(path: Result<Path<i64>, PathRejection>) -> ServiceResult<i64> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::warn!(%rejection, "unparseable store id");
        ServiceError::StoreNotFound
    })
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/stores", post(create_store))
        .route("/stores/:store_id", get(get_store))
        .route(
            "/stores/:store_id/stocks",
            post(create_stock).get(list_store_stocks),
        )
        .route("/stocks/:stock_id", get(get_stock))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Composition root: database → repositories → services → routes
pub fn build_app(db: Database) -> Router {
    router(AppState::new(db))
}

// ============================================================================
// TESTS
// ============================================================================
