//! Stock alert classification tests
//!
//! Tests for the alert partition and action rules:
//! - Forecast computation (including negative results)
//! - Red / threshold / green activity invariants
//! - Historical resolution and the green-alert asymmetry
//! - Partition completeness
//! - Action rules (existing draft vs remaining deficit)

use proptest::prelude::*;
use uuid::Uuid;

use shared::classify::{
    alert_stats, classify, forecasted_stock, is_active, is_historical, normalize, resolve_action,
    severity_for, shortfall,
};
use shared::models::{AlertAction, AlertSeverity, AlertType, StockAlertRecord};

/// Helper to build a raw alert record
fn record(stock_real: i64, forecasted_in: i64, forecasted_out: i64, min_stock: i64) -> StockAlertRecord {
    StockAlertRecord {
        id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        product_name: "Canapé Bergen".to_string(),
        sku: "CAN-BER-03".to_string(),
        stock_real,
        stock_forecasted_in: Some(forecasted_in),
        stock_forecasted_out: Some(forecasted_out),
        min_stock: Some(min_stock),
        shortage_quantity: Some(0),
        quantity_in_draft: None,
        draft_order_id: None,
        draft_order_number: None,
        validated: false,
        validated_at: None,
        alert_type: AlertType::LowStock,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Forecast is the sum of real stock and net forecasted movements
    #[test]
    fn test_forecast_computation() {
        assert_eq!(forecasted_stock(&normalize(record(5, 0, 8, 10))), -3);
        assert_eq!(forecasted_stock(&normalize(record(0, 0, 0, 0))), 0);
        assert_eq!(forecasted_stock(&normalize(record(20, 15, 5, 10))), 30);
    }

    /// Negative forecast means committed demand exceeds all known supply
    #[test]
    fn test_red_alert_is_active() {
        let alert = normalize(record(5, 0, 8, 10));
        assert!(is_active(&alert));
        assert_eq!(severity_for(&alert), AlertSeverity::Critical);
    }

    /// Below-threshold forecast keeps the alert active
    #[test]
    fn test_threshold_alert_is_active() {
        let alert = normalize(record(4, 2, 0, 10));
        assert_eq!(forecasted_stock(&alert), 6);
        assert!(is_active(&alert));
        assert_eq!(severity_for(&alert), AlertSeverity::Warning);
    }

    /// A validated in-transit replenishment stays visible until receipt,
    /// even when the forecast already clears the threshold
    #[test]
    fn test_green_alert_stickiness() {
        let mut raw = record(20, 15, 5, 10);
        raw.validated = true;
        let alert = normalize(raw);

        assert_eq!(forecasted_stock(&alert), 30);
        assert!(is_active(&alert));
        assert!(!is_historical(&alert));
    }

    /// Validated flag alone is not enough; both movement legs must be open
    #[test]
    fn test_validated_without_movements_resolves() {
        let mut raw = record(20, 0, 0, 10);
        raw.validated = true;
        let alert = normalize(raw);

        assert!(!is_active(&alert));
        assert!(is_historical(&alert));
    }

    /// Resolved alerts land in historical
    #[test]
    fn test_resolution() {
        let alert = normalize(record(25, 0, 5, 10));
        assert!(is_historical(&alert));
        assert!(!is_active(&alert));
    }

    /// Existing draft order that covers the need opens the order detail
    #[test]
    fn test_action_existing_draft_suffices() {
        let draft_id = Uuid::new_v4();
        let mut raw = record(12, 0, 0, 10);
        raw.draft_order_id = Some(draft_id);
        raw.draft_order_number = Some("PO-2026-0001".to_string());
        let alert = normalize(raw);

        assert_eq!(
            resolve_action(&alert),
            AlertAction::OpenDraftOrder {
                draft_order_id: draft_id
            }
        );
    }

    /// An insufficient draft does not suppress order creation; the deficit
    /// is surfaced, not the draft quantity and not the threshold
    #[test]
    fn test_action_deficit_despite_draft() {
        let mut raw = record(4, 0, 0, 10);
        raw.draft_order_id = Some(Uuid::new_v4());
        raw.quantity_in_draft = Some(3);
        let alert = normalize(raw);

        assert_eq!(
            resolve_action(&alert),
            AlertAction::CreateOrder {
                suggested_quantity: 6
            }
        );
    }

    /// End-to-end: negative forecast, red, shortfall spans the deficit
    #[test]
    fn test_end_to_end_red() {
        let alert = normalize(record(5, 0, 8, 10));

        assert_eq!(forecasted_stock(&alert), -3);
        assert!(is_active(&alert));
        assert_eq!(severity_for(&alert), AlertSeverity::Critical);
        assert_eq!(shortfall(&alert), 13);
    }

    /// End-to-end: validated but no open movement pair goes historical
    #[test]
    fn test_end_to_end_validated_resolved() {
        let mut raw = record(20, 0, 0, 10);
        raw.validated = true;
        let classified = classify(vec![raw]);

        assert!(classified.active.is_empty());
        assert_eq!(classified.historical.len(), 1);
    }

    /// End-to-end: green condition met, stays active
    #[test]
    fn test_end_to_end_green() {
        let mut raw = record(20, 15, 5, 10);
        raw.validated = true;
        let classified = classify(vec![raw]);

        assert_eq!(classified.active.len(), 1);
        assert!(classified.historical.is_empty());
    }

    /// Null numerics are treated as zero
    #[test]
    fn test_null_normalization() {
        let mut raw = record(3, 0, 0, 0);
        raw.stock_forecasted_in = None;
        raw.stock_forecasted_out = None;
        raw.min_stock = None;
        let alert = normalize(raw);

        assert_eq!(forecasted_stock(&alert), 3);
        assert!(is_historical(&alert));
    }

    /// Negative thresholds and movement quantities are malformed input
    /// and collapse to zero, same as nulls
    #[test]
    fn test_negative_normalization() {
        let alert = normalize(record(3, -2, -7, -10));

        assert_eq!(alert.stock_forecasted_in, 0);
        assert_eq!(alert.stock_forecasted_out, 0);
        assert_eq!(alert.min_stock, 0);
        assert_eq!(forecasted_stock(&alert), 3);
        assert_eq!(shortfall(&alert), 0);
        assert!(is_historical(&alert));
    }

    /// Stats count active alerts by severity and draft linkage
    #[test]
    fn test_stats() {
        let mut green = record(20, 15, 5, 10);
        green.validated = true;

        let mut drafted = record(2, 0, 0, 10);
        drafted.draft_order_id = Some(Uuid::new_v4());

        let classified = classify(vec![
            record(5, 0, 8, 10),
            drafted,
            green,
            record(25, 0, 0, 10),
        ]);
        let stats = alert_stats(&classified);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.warning, 1);
        assert_eq!(stats.info, 1);
        assert_eq!(stats.in_draft, 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating optional quantities; nulls and malformed
    /// negative values included
    fn maybe_quantity() -> impl Strategy<Value = Option<i64>> {
        prop_oneof![Just(None), (-50i64..=1000).prop_map(Some)]
    }

    /// Strategy for generating raw alert records
    fn record_strategy() -> impl Strategy<Value = StockAlertRecord> {
        (
            0i64..=1000,
            maybe_quantity(),
            maybe_quantity(),
            maybe_quantity(),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(
                |(stock_real, forecasted_in, forecasted_out, min_stock, validated, in_draft)| {
                    let mut raw = record(stock_real, 0, 0, 0);
                    raw.stock_forecasted_in = forecasted_in;
                    raw.stock_forecasted_out = forecasted_out;
                    raw.min_stock = min_stock;
                    raw.validated = validated;
                    if in_draft {
                        raw.draft_order_id = Some(Uuid::new_v4());
                        raw.draft_order_number = Some("PO-2026-0099".to_string());
                        raw.quantity_in_draft = Some(5);
                    }
                    raw
                },
            )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Every record lands in exactly one partition
        #[test]
        fn prop_partition_completeness(records in prop::collection::vec(record_strategy(), 0..50)) {
            let total = records.len();
            let classified = classify(records);
            prop_assert_eq!(classified.active.len() + classified.historical.len(), total);
        }

        /// Active and historical are mutually exclusive per record
        #[test]
        fn prop_no_record_in_both(raw in record_strategy()) {
            let alert = normalize(raw);
            prop_assert!(!(is_active(&alert) && is_historical(&alert)));
            prop_assert!(is_active(&alert) || is_historical(&alert));
        }

        /// Normalization never lets a negative quantity or threshold
        /// through to the classifier
        #[test]
        fn prop_normalized_fields_non_negative(raw in record_strategy()) {
            let alert = normalize(raw);
            prop_assert!(alert.stock_forecasted_in >= 0);
            prop_assert!(alert.stock_forecasted_out >= 0);
            prop_assert!(alert.min_stock >= 0);
            prop_assert!(alert.shortage_quantity >= 0);
            prop_assert!(alert.quantity_in_draft >= 0);
        }

        /// Negative forecast always classifies as active
        #[test]
        fn prop_red_invariant(raw in record_strategy()) {
            let alert = normalize(raw);
            if forecasted_stock(&alert) < 0 {
                prop_assert!(is_active(&alert));
            }
        }

        /// Forecast below threshold always classifies as active
        #[test]
        fn prop_threshold_invariant(raw in record_strategy()) {
            let alert = normalize(raw);
            let forecast = forecasted_stock(&alert);
            if forecast >= 0 && forecast < alert.min_stock {
                prop_assert!(is_active(&alert));
            }
        }

        /// Green alerts never land in historical
        #[test]
        fn prop_green_stickiness(raw in record_strategy()) {
            let alert = normalize(raw);
            if alert.validated && alert.stock_forecasted_in > 0 && alert.stock_forecasted_out > 0 {
                prop_assert!(is_active(&alert));
                prop_assert!(!is_historical(&alert));
            }
        }

        /// At or above threshold without the green condition resolves
        #[test]
        fn prop_resolution_invariant(raw in record_strategy()) {
            let alert = normalize(raw);
            let green = alert.validated
                && alert.stock_forecasted_in > 0
                && alert.stock_forecasted_out > 0;
            if forecasted_stock(&alert) >= alert.min_stock && !green {
                prop_assert!(is_historical(&alert));
            }
        }

        /// Shortfall is never negative and zero exactly when threshold is met
        #[test]
        fn prop_shortfall_non_negative(raw in record_strategy()) {
            let alert = normalize(raw);
            let deficit = shortfall(&alert);
            prop_assert!(deficit >= 0);
            prop_assert_eq!(deficit == 0, forecasted_stock(&alert) >= alert.min_stock);
        }

        /// The action is OpenDraftOrder exactly when the threshold is met
        /// and a draft order exists; otherwise the deficit is suggested
        #[test]
        fn prop_action_dichotomy(raw in record_strategy()) {
            let alert = normalize(raw);
            let threshold_met = forecasted_stock(&alert) >= alert.min_stock;

            match resolve_action(&alert) {
                AlertAction::OpenDraftOrder { draft_order_id } => {
                    prop_assert!(threshold_met);
                    prop_assert_eq!(Some(draft_order_id), alert.draft_order_id);
                }
                AlertAction::CreateOrder { suggested_quantity } => {
                    prop_assert!(!threshold_met || alert.draft_order_id.is_none());
                    prop_assert_eq!(suggested_quantity, shortfall(&alert));
                }
            }
        }
    }
}
