//! Stock alert classification
//!
//! Pure, synchronous partitioning of an alert batch into active and
//! historical sets, plus the action offered to the operator for each
//! record. All quantities flow through [`normalize`] first so the
//! "missing means zero" policy lives in exactly one place.
//!
//! The active and historical predicates are intentionally asymmetric and
//! evaluated independently: a "green" alert (validated replenishment in
//! transit against open outbound demand) passes the threshold check yet
//! must stay active until physical receipt, so `is_historical` cannot be
//! the complement of `is_active`.

use crate::models::{
    AlertAction, AlertSeverity, AlertStats, ClassifiedAlerts, NormalizedAlert, StockAlertRecord,
};

/// Coerce malformed numeric fields to zero
///
/// Nulls and negative quantities or thresholds are the same malformed
/// class; both collapse to zero here. This is the only code path
/// producing a [`NormalizedAlert`]; the classifier itself performs no
/// validation and never fails. Real stock stays signed: a negative
/// physical count is data, not malformation.
pub fn normalize(record: StockAlertRecord) -> NormalizedAlert {
    fn clamp(value: Option<i64>) -> i64 {
        value.unwrap_or(0).max(0)
    }

    NormalizedAlert {
        id: record.id,
        product_id: record.product_id,
        product_name: record.product_name,
        sku: record.sku,
        stock_real: record.stock_real,
        stock_forecasted_in: clamp(record.stock_forecasted_in),
        stock_forecasted_out: clamp(record.stock_forecasted_out),
        min_stock: clamp(record.min_stock),
        shortage_quantity: clamp(record.shortage_quantity),
        quantity_in_draft: clamp(record.quantity_in_draft),
        draft_order_id: record.draft_order_id,
        draft_order_number: record.draft_order_number,
        validated: record.validated,
        validated_at: record.validated_at,
        alert_type: record.alert_type,
    }
}

/// Net stock position after known future movements
///
/// Always recomputed from its three inputs; may be negative when
/// committed outbound demand exceeds all known supply.
pub fn forecasted_stock(alert: &NormalizedAlert) -> i64 {
    alert.stock_real + alert.stock_forecasted_in - alert.stock_forecasted_out
}

/// Quantity still needed to reach the reorder threshold
pub fn shortfall(alert: &NormalizedAlert) -> i64 {
    (alert.min_stock - forecasted_stock(alert)).max(0)
}

/// A confirmed replenishment is in transit against open outbound demand
///
/// The inbound quantity is not required to cover the outbound demand;
/// any validated in-transit replenishment qualifies.
fn is_green(alert: &NormalizedAlert) -> bool {
    alert.validated && alert.stock_forecasted_in > 0 && alert.stock_forecasted_out > 0
}

/// Whether the alert requires operator attention
///
/// Conditions are evaluated in order; they are not mutually exclusive:
/// 1. forecast below zero (critical shortage),
/// 2. forecast below the reorder threshold,
/// 3. green: validated replenishment in transit, kept visible until
///    physical receipt even though the forecast already nets out fine.
pub fn is_active(alert: &NormalizedAlert) -> bool {
    let forecast = forecasted_stock(alert);

    if forecast < 0 {
        return true;
    }
    if forecast < alert.min_stock {
        return true;
    }
    if is_green(alert) {
        return true;
    }

    false
}

/// Whether the alert is resolved
///
/// Green alerts are explicitly excluded before the threshold check; they
/// stay active regardless of the forecast.
pub fn is_historical(alert: &NormalizedAlert) -> bool {
    if is_green(alert) {
        return false;
    }

    forecasted_stock(alert) >= alert.min_stock
}

/// Partition a batch into active and historical alerts
///
/// Routes on [`is_active`] so every record lands in exactly one set.
pub fn classify(records: Vec<StockAlertRecord>) -> ClassifiedAlerts {
    let mut result = ClassifiedAlerts::default();

    for record in records {
        let alert = normalize(record);
        if is_active(&alert) {
            result.active.push(alert);
        } else {
            result.historical.push(alert);
        }
    }

    result
}

/// Resolve the primary action offered for an alert
///
/// An existing draft order only suppresses order creation when the
/// forecast already meets the threshold; an insufficient draft still
/// surfaces the remaining deficit, never the draft quantity.
pub fn resolve_action(alert: &NormalizedAlert) -> AlertAction {
    let threshold_met = forecasted_stock(alert) >= alert.min_stock;

    match alert.draft_order_id {
        Some(draft_order_id) if threshold_met => AlertAction::OpenDraftOrder { draft_order_id },
        _ => AlertAction::CreateOrder {
            suggested_quantity: shortfall(alert),
        },
    }
}

/// Display severity for an alert
pub fn severity_for(alert: &NormalizedAlert) -> AlertSeverity {
    let forecast = forecasted_stock(alert);

    if forecast < 0 {
        AlertSeverity::Critical
    } else if forecast < alert.min_stock {
        AlertSeverity::Warning
    } else {
        AlertSeverity::Info
    }
}

/// Dashboard counters for a classified batch
pub fn alert_stats(classified: &ClassifiedAlerts) -> AlertStats {
    let mut stats = AlertStats {
        total: classified.total(),
        ..AlertStats::default()
    };

    for alert in &classified.active {
        match severity_for(alert) {
            AlertSeverity::Critical => stats.critical += 1,
            AlertSeverity::Warning => stats.warning += 1,
            AlertSeverity::Info => stats.info += 1,
        }
        if alert.is_in_draft() {
            stats.in_draft += 1;
        }
    }

    stats
}
