//! Stock alert models
//!
//! A stock alert row is produced per product by the `stock_alert_tracking`
//! view (real stock, forecasted in/out movements, reorder threshold and
//! draft purchase-order linkage). Batches are replaced wholesale on every
//! refresh; no identity is preserved across refreshes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned upstream by the tracking view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Product has no sellable stock at all
    OutOfStock,
    /// Stock is below the configured reorder threshold
    LowStock,
    /// Open customer orders exist against a product with no stock
    NoStockButOrdered,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::OutOfStock => "out_of_stock",
            AlertType::LowStock => "low_stock",
            AlertType::NoStockButOrdered => "no_stock_but_ordered",
        }
    }
}

/// Display severity, ordered for sorting (critical first)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Critical => "critical",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Info => "info",
        }
    }
}

/// Raw per-product alert row as delivered by the data provider
///
/// Numeric fields that the provider may leave null are optional here;
/// [`crate::classify::normalize`] is the single place where nulls and
/// negative values are coerced to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAlertRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    /// Physically counted current stock
    pub stock_real: i64,
    /// Quantity expected to arrive from confirmed/pending inbound movements
    pub stock_forecasted_in: Option<i64>,
    /// Quantity committed to leave (open sales orders)
    pub stock_forecasted_out: Option<i64>,
    /// Configured reorder threshold
    pub min_stock: Option<i64>,
    /// Shortfall precomputed by the provider, not derived locally
    pub shortage_quantity: Option<i64>,
    /// Quantity already present in an unconfirmed replenishment order
    pub quantity_in_draft: Option<i64>,
    pub draft_order_id: Option<Uuid>,
    pub draft_order_number: Option<String>,
    /// A replenishment order covering this shortage has been confirmed
    #[serde(default)]
    pub validated: bool,
    pub validated_at: Option<DateTime<Utc>>,
    pub alert_type: AlertType,
}

/// Alert row after malformed-to-zero normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedAlert {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    pub stock_real: i64,
    pub stock_forecasted_in: i64,
    pub stock_forecasted_out: i64,
    pub min_stock: i64,
    pub shortage_quantity: i64,
    pub quantity_in_draft: i64,
    pub draft_order_id: Option<Uuid>,
    pub draft_order_number: Option<String>,
    pub validated: bool,
    pub validated_at: Option<DateTime<Utc>>,
    pub alert_type: AlertType,
}

impl NormalizedAlert {
    /// Whether an unconfirmed replenishment order references this product
    pub fn is_in_draft(&self) -> bool {
        self.draft_order_id.is_some()
    }
}

/// Result of partitioning an alert batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifiedAlerts {
    /// Alerts requiring operator attention
    pub active: Vec<NormalizedAlert>,
    /// Resolved alerts, kept for reference
    pub historical: Vec<NormalizedAlert>,
}

impl ClassifiedAlerts {
    pub fn total(&self) -> usize {
        self.active.len() + self.historical.len()
    }
}

/// Primary action offered to the operator for an alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertAction {
    /// The existing draft order already covers the need; open its detail
    OpenDraftOrder { draft_order_id: Uuid },
    /// Open quick-order creation pre-filled with the remaining deficit
    CreateOrder { suggested_quantity: i64 },
}

/// Aggregate counts shown in the alerts dashboard header
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertStats {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub in_draft: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_with_kind_tag() {
        let draft_id = Uuid::new_v4();

        let open = serde_json::to_value(AlertAction::OpenDraftOrder {
            draft_order_id: draft_id,
        })
        .unwrap();
        assert_eq!(open["kind"], "open_draft_order");
        assert_eq!(open["draft_order_id"], draft_id.to_string());

        let create = serde_json::to_value(AlertAction::CreateOrder {
            suggested_quantity: 6,
        })
        .unwrap();
        assert_eq!(
            create,
            serde_json::json!({ "kind": "create_order", "suggested_quantity": 6 })
        );
    }

    #[test]
    fn record_accepts_null_numerics_and_missing_validated() {
        // Provider rows routinely omit the nullable columns entirely
        let record: StockAlertRecord = serde_json::from_value(serde_json::json!({
            "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
            "product_id": "6f9619ff-8b86-d011-b42d-00c04fc964fe",
            "product_name": "Fauteuil Oslo",
            "sku": "FAU-OSL-01",
            "stock_real": 5,
            "stock_forecasted_in": null,
            "stock_forecasted_out": 8,
            "min_stock": null,
            "shortage_quantity": null,
            "quantity_in_draft": null,
            "draft_order_id": null,
            "draft_order_number": null,
            "validated_at": null,
            "alert_type": "low_stock"
        }))
        .unwrap();

        assert_eq!(record.stock_forecasted_in, None);
        assert_eq!(record.stock_forecasted_out, Some(8));
        assert!(!record.validated);
        assert_eq!(record.alert_type, AlertType::LowStock);
    }
}
