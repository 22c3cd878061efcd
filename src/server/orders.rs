//! Handlers for the `/orders` resource.

use super::error::ApiError;
use super::AppState;
use crate::model::{Order, OrderId};
use crate::order_actor::OrderError;
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PlaceOrderParams {
    #[serde(rename = "executeOrder", alias = "execute_order", default = "execute_by_default")]
    pub execute_order: bool,
}

fn execute_by_default() -> bool {
    true
}

/// Confirmation returned by a successful cancellation.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Cancelled {
    pub detail: String,
}

/// Ids that are not UUIDs can never have been issued, so they are simply not found.
fn parse_id(raw: &str) -> Result<OrderId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(OrderError::NotFound(raw.to_string())))
}

/// Handles POST /orders requests.
pub async fn place_order(
    State(state): State<AppState>,
    Query(params): Query<PlaceOrderParams>,
) -> Result<Json<Order>, ApiError> {
    let (order, _execution) = state.service.place_order(params.execute_order).await?;
    Ok(Json(order))
}

/// Handles GET /orders requests. An empty store answers 404.
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.service.list_orders().await?))
}

/// Handles GET /orders/{id} requests.
pub async fn get_order(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get_order(id).await?))
}

/// Handles DELETE /orders/{id} requests.
pub async fn cancel_order(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Cancelled>, ApiError> {
    let id = parse_id(&id)?;
    state.service.cancel_order(id).await?;
    Ok(Json(Cancelled {
        detail: "Order cancelled".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_flag_accepts_both_spellings() {
        let params: PlaceOrderParams = serde_json::from_str(r#"{"executeOrder": false}"#).unwrap();
        assert!(!params.execute_order);
        let params: PlaceOrderParams = serde_json::from_str(r#"{"execute_order": false}"#).unwrap();
        assert!(!params.execute_order);
        let params: PlaceOrderParams = serde_json::from_str("{}").unwrap();
        assert!(params.execute_order);
    }

    #[test]
    fn malformed_ids_are_not_found() {
        let err = parse_id("nonexistent").unwrap_err();
        assert_eq!(err.0, OrderError::NotFound("nonexistent".to_string()));
    }
}
