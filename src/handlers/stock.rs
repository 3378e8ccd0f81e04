// src/handlers/stock.rs

use crate::{
    auth::AdminUser,
    errors::{AppError, AppResult},
    models::{
        CreateStockItemRequest, IssueStockRequest, ReceiveStockRequest, StockItem, StockItemView,
        StockQuery, StockSummary, StockTransaction,
    },
    services::stock::StockLedger,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;

fn require_positive(quantity: u32) -> AppResult<()> {
    if quantity == 0 {
        return Err(AppError::Validation("Quantity must be greater than zero".to_string()));
    }
    Ok(())
}

/// List stock items with their derived status
#[utoipa::path(
    get,
    path = "/api/v1/stock/items",
    params(StockQuery),
    responses(
        (status = 200, description = "Stock items", body = Vec<StockItemView>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn list_stock_items(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> AppResult<Json<Vec<StockItemView>>> {
    let data = state.data.read().await;
    Ok(Json(StockLedger::search(&data.stock_items, query.search.as_deref())))
}

/// Register a new stock item
#[utoipa::path(
    post,
    path = "/api/v1/stock/items",
    request_body = CreateStockItemRequest,
    responses(
        (status = 201, description = "Stock item created", body = StockItem),
        (status = 400, description = "Invalid thresholds or price"),
        (status = 409, description = "Item code already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn create_stock_item(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<CreateStockItemRequest>,
) -> AppResult<(StatusCode, Json<StockItem>)> {
    let mut data = state.data.write().await;
    let item = StockLedger::create_item(&mut data, body, Utc::now().date_naive())?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stock/items/{item_code}",
    params(("item_code" = String, Path, description = "Item code, e.g. TYR001")),
    responses(
        (status = 200, description = "Stock item", body = StockItemView),
        (status = 404, description = "Unknown item code"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn get_stock_item(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> AppResult<Json<StockItemView>> {
    let data = state.data.read().await;
    data.stock_item(&item_code)
        .map(|item| Json(StockLedger::view(item)))
        .ok_or_else(|| AppError::NotFound(format!("Stock item {item_code} not found")))
}

/// Items at or below their minimum level
#[utoipa::path(
    get,
    path = "/api/v1/stock/low",
    responses(
        (status = 200, description = "Low stock items", body = Vec<StockItemView>),
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn low_stock(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StockItemView>>> {
    let data = state.data.read().await;
    Ok(Json(StockLedger::low_stock(&data.stock_items)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stock/summary",
    responses(
        (status = 200, description = "Item count, low stock count and total value", body = StockSummary),
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn stock_summary(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<StockSummary>> {
    let data = state.data.read().await;
    Ok(Json(StockLedger::summary(&data.stock_items)))
}

/// Transaction ledger, newest first
#[utoipa::path(
    get,
    path = "/api/v1/stock/transactions",
    responses(
        (status = 200, description = "Stock transactions", body = Vec<StockTransaction>),
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn list_transactions(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StockTransaction>>> {
    let data = state.data.read().await;
    Ok(Json(data.transactions.clone()))
}

/// Book incoming stock from a supplier
#[utoipa::path(
    post,
    path = "/api/v1/stock/incoming",
    request_body = ReceiveStockRequest,
    responses(
        (status = 201, description = "Stock received", body = StockTransaction),
        (status = 400, description = "Quantity must be positive"),
        (status = 404, description = "Unknown item code; nothing recorded"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn receive_stock(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    Json(body): Json<ReceiveStockRequest>,
) -> AppResult<(StatusCode, Json<StockTransaction>)> {
    require_positive(body.quantity)?;
    if body.unit_price.is_sign_negative() {
        return Err(AppError::Validation("Unit price cannot be negative".to_string()));
    }

    let mut data = state.data.write().await;
    let transaction = StockLedger::receive(&mut data, &body, &user.name, Utc::now().date_naive())
        .ok_or_else(|| AppError::NotFound(format!("Stock item {} not found", body.item_code)))?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Book outgoing stock to a customer
#[utoipa::path(
    post,
    path = "/api/v1/stock/outgoing",
    request_body = IssueStockRequest,
    responses(
        (status = 201, description = "Stock issued", body = StockTransaction),
        (status = 400, description = "Quantity must be positive"),
        (status = 404, description = "Unknown item code"),
        (status = 422, description = "Insufficient stock quantity"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn issue_stock(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    Json(body): Json<IssueStockRequest>,
) -> AppResult<(StatusCode, Json<StockTransaction>)> {
    require_positive(body.quantity)?;

    let mut data = state.data.write().await;
    let transaction = StockLedger::issue(&mut data, &body, &user.name, Utc::now().date_naive())?;
    Ok((StatusCode::CREATED, Json(transaction)))
}
