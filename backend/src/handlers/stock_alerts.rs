//! HTTP handlers for stock alert endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::models::AlertAction;
use shared::types::{PaginatedResponse, Pagination};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::refresh::RefreshReason;
use crate::services::stock_alerts::{AlertView, ClassifiedAlertsView, StockAlertService};
use crate::AppState;

/// Query parameters for paginated alert listings
#[derive(Debug, Default, Deserialize)]
pub struct AlertListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl AlertListQuery {
    fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// Get the full classified alert batch with stats
pub async fn get_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ClassifiedAlertsView>> {
    let service = StockAlertService::new(state.db);
    let view = service.classified_alerts(current_user.0.business_id).await?;
    Ok(Json(view))
}

/// Get active alerts only
pub async fn get_active_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<AlertView>>> {
    let service = StockAlertService::new(state.db);
    let view = service.classified_alerts(current_user.0.business_id).await?;
    Ok(Json(view.active))
}

/// Get historical (resolved) alerts, paginated
pub async fn get_historical_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<AlertListQuery>,
) -> AppResult<Json<PaginatedResponse<AlertView>>> {
    let service = StockAlertService::new(state.db);
    let view = service.classified_alerts(current_user.0.business_id).await?;
    Ok(Json(PaginatedResponse::from_full(
        view.historical,
        &query.pagination(),
    )))
}

/// Resolve the primary action for one product's alert
pub async fn get_alert_action(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<AlertAction>> {
    let service = StockAlertService::new(state.db);
    let action = service
        .alert_action(current_user.0.business_id, product_id)
        .await?;
    Ok(Json(action))
}

/// Manual refresh: signal all subscribers and return a fresh batch
pub async fn refresh_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<serde_json::Value>> {
    let notified = state.refresh.publish(RefreshReason::Manual);
    let event = state.config.alerts.refresh_event.clone();

    let service = StockAlertService::new(state.db);
    let view = service.classified_alerts(current_user.0.business_id).await?;

    Ok(Json(serde_json::json!({
        "event": event,
        "notified_subscribers": notified,
        "alerts": view,
    })))
}
