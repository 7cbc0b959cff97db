//! Order routes.

use super::{ApiError, AppState};
use crate::model::{NewLineItem, OrderCreate, OrderId, UserId};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub delivery_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub phone: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_method: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    /// Cart lines send the menu item as `id`.
    #[serde(alias = "id")]
    pub menu_item_id: u64,
    pub quantity: u32,
    pub price: Decimal,
}

impl From<CreateOrderRequest> for OrderCreate {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            user_id: req.user_id,
            items: req
                .items
                .into_iter()
                .map(|i| NewLineItem {
                    menu_item_id: i.menu_item_id,
                    quantity: i.quantity,
                    price: i.price,
                })
                .collect(),
            total_amount: req.total_amount,
            delivery_address: req.delivery_address,
            latitude: req.latitude,
            longitude: req.longitude,
            phone: req.phone,
            notes: req.notes.filter(|n| !n.trim().is_empty()),
            payment_method: req.payment_method,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersParams {
    pub user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: String,
}

// ── POST /api/orders ──

pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let order = state
        .orders
        .create_order(req.into())
        .await
        .map_err(|e| ApiError::from_order(e, "Failed to create order"))?;
    Ok(Json(json!({ "success": true, "order": order })))
}

// ── GET /api/orders ──

pub async fn list_orders(
    State(state): State<AppState>,
    params: Result<Query<ListOrdersParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let orders = state
        .orders
        .list_orders(params.user_id)
        .await
        .map_err(|e| ApiError::from_order(e, "Failed to fetch orders"))?;
    Ok(Json(json!({ "orders": orders })))
}

// ── PATCH /api/orders/{id} ──

pub async fn update_order(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let Json(req) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let order = state
        .orders
        .update_status(OrderId(id), &req.status)
        .await
        .map_err(|e| ApiError::from_order(e, "Failed to update order"))?;
    Ok(Json(json!({ "success": true, "order": order })))
}
