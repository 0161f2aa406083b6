//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::models::PurchaseOrder;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::purchase_orders::{CreateQuickOrderInput, PurchaseOrderService};
use crate::AppState;

/// Get a purchase order with its lines
pub async fn get_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db, state.refresh.clone());
    let order = service
        .get_order(current_user.0.business_id, order_id)
        .await?;
    Ok(Json(order))
}

/// Create a draft purchase order for a product in shortage
pub async fn create_quick_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateQuickOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db, state.refresh.clone());
    let order = service
        .create_quick_order(current_user.0.business_id, current_user.0.user_id, input)
        .await?;
    Ok(Json(order))
}

/// Confirm a draft order (draft -> validated)
pub async fn validate_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrder>> {
    current_user
        .0
        .require_permission("purchase_orders", "validate")?;

    let service = PurchaseOrderService::new(state.db, state.refresh.clone());
    let order = service
        .validate_order(current_user.0.business_id, order_id)
        .await?;
    Ok(Json(order))
}
