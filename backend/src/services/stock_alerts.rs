//! Stock alert service
//!
//! Reads per-product alert rows from the `stock_alert_tracking` view and
//! runs them through the shared classifier. The batch is replaced
//! wholesale on every call; nothing is cached between refreshes.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::classify::{
    alert_stats, classify, forecasted_stock, normalize, resolve_action, severity_for, shortfall,
};
use shared::models::{
    AlertAction, AlertSeverity, AlertStats, AlertType, NormalizedAlert, StockAlertRecord,
};

use crate::error::{AppError, AppResult};

/// Stock alert service backed by the tracking view
#[derive(Clone)]
pub struct StockAlertService {
    db: PgPool,
}

/// Row shape of the `stock_alert_tracking` view
#[derive(Debug, FromRow)]
struct AlertRow {
    id: Uuid,
    product_id: Uuid,
    product_name: String,
    sku: String,
    stock_real: i64,
    stock_forecasted_in: Option<i64>,
    stock_forecasted_out: Option<i64>,
    min_stock: Option<i64>,
    shortage_quantity: Option<i64>,
    quantity_in_draft: Option<i64>,
    draft_order_id: Option<Uuid>,
    draft_order_number: Option<String>,
    validated: Option<bool>,
    validated_at: Option<chrono::DateTime<chrono::Utc>>,
    alert_type: String,
}

impl AlertRow {
    fn into_record(self) -> StockAlertRecord {
        let alert_type = match self.alert_type.as_str() {
            "out_of_stock" => AlertType::OutOfStock,
            "no_stock_but_ordered" => AlertType::NoStockButOrdered,
            _ => AlertType::LowStock,
        };

        StockAlertRecord {
            id: self.id,
            product_id: self.product_id,
            product_name: self.product_name,
            sku: self.sku,
            stock_real: self.stock_real,
            stock_forecasted_in: self.stock_forecasted_in,
            stock_forecasted_out: self.stock_forecasted_out,
            min_stock: self.min_stock,
            shortage_quantity: self.shortage_quantity,
            quantity_in_draft: self.quantity_in_draft,
            draft_order_id: self.draft_order_id,
            draft_order_number: self.draft_order_number,
            validated: self.validated.unwrap_or(false),
            validated_at: self.validated_at,
            alert_type,
        }
    }
}

/// One alert as presented to the front-end, with derived values attached
#[derive(Debug, Clone, Serialize)]
pub struct AlertView {
    #[serde(flatten)]
    pub alert: NormalizedAlert,
    pub severity: AlertSeverity,
    pub stock_forecasted: i64,
    pub shortfall: i64,
    /// Primary action offered to the operator (active alerts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AlertAction>,
}

impl AlertView {
    fn new(alert: NormalizedAlert, with_action: bool) -> Self {
        let stock_forecasted = forecasted_stock(&alert);
        let deficit = shortfall(&alert);
        let severity = severity_for(&alert);
        let action = with_action.then(|| resolve_action(&alert));

        Self {
            alert,
            severity,
            stock_forecasted,
            shortfall: deficit,
            action,
        }
    }
}

/// Full classified response for the alerts screen
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedAlertsView {
    pub active: Vec<AlertView>,
    pub historical: Vec<AlertView>,
    pub stats: AlertStats,
}

impl StockAlertService {
    /// Create a new StockAlertService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Fetch the raw alert batch for a business
    pub async fn fetch_alerts(&self, business_id: Uuid) -> AppResult<Vec<StockAlertRecord>> {
        let rows = sqlx::query_as::<_, AlertRow>(
            r#"
            SELECT id, product_id, product_name, sku, stock_real,
                   stock_forecasted_in, stock_forecasted_out, min_stock,
                   shortage_quantity, quantity_in_draft,
                   draft_order_id, draft_order_number,
                   validated, validated_at, alert_type
            FROM stock_alert_tracking
            WHERE business_id = $1
            ORDER BY product_name
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(AlertRow::into_record).collect())
    }

    /// Fetch, normalize and classify the alert batch
    pub async fn classified_alerts(&self, business_id: Uuid) -> AppResult<ClassifiedAlertsView> {
        let records = self.fetch_alerts(business_id).await?;
        let count = records.len();
        let classified = classify(records);
        let stats = alert_stats(&classified);

        tracing::debug!(
            business_id = %business_id,
            total = count,
            active = classified.active.len(),
            historical = classified.historical.len(),
            "alert batch classified"
        );

        Ok(ClassifiedAlertsView {
            active: classified
                .active
                .into_iter()
                .map(|a| AlertView::new(a, true))
                .collect(),
            historical: classified
                .historical
                .into_iter()
                .map(|a| AlertView::new(a, false))
                .collect(),
            stats,
        })
    }

    /// Resolve the primary action for one product's alert
    pub async fn alert_action(
        &self,
        business_id: Uuid,
        product_id: Uuid,
    ) -> AppResult<AlertAction> {
        let records = self.fetch_alerts(business_id).await?;
        let record = records
            .into_iter()
            .find(|r| r.product_id == product_id)
            .ok_or_else(|| AppError::NotFound("Stock alert".to_string()))?;

        Ok(resolve_action(&normalize(record)))
    }
}
