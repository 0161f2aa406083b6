//! WebAssembly module for the back-office stock alerts service
//!
//! Ships the stock alert classifier to the browser so the front-end can
//! re-derive partitions and actions without a round-trip:
//! - Active/historical classification
//! - Forecasted stock and shortfall computation
//! - Per-alert action resolution

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::classify::*;
pub use shared::models::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Classify a batch of raw alert records into active/historical sets
#[wasm_bindgen]
pub fn classify_stock_alerts(records_json: &str) -> Result<String, JsValue> {
    let records: Vec<StockAlertRecord> = serde_json::from_str(records_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid records JSON: {}", e)))?;

    let classified = classify(records);
    serde_json::to_string(&classified)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Net stock position after known future movements (may be negative)
#[wasm_bindgen]
pub fn forecasted_stock_for(stock_real: i64, forecasted_in: i64, forecasted_out: i64) -> i64 {
    stock_real + forecasted_in - forecasted_out
}

/// Quantity still needed to reach the reorder threshold
#[wasm_bindgen]
pub fn shortage_for(
    stock_real: i64,
    forecasted_in: i64,
    forecasted_out: i64,
    min_stock: i64,
) -> i64 {
    (min_stock - (stock_real + forecasted_in - forecasted_out)).max(0)
}

/// Resolve the primary action for one raw alert record
#[wasm_bindgen]
pub fn resolve_alert_action(record_json: &str) -> Result<String, JsValue> {
    let record: StockAlertRecord = serde_json::from_str(record_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid record JSON: {}", e)))?;

    let action = resolve_action(&normalize(record));
    serde_json::to_string(&action)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Display severity for one raw alert record
#[wasm_bindgen]
pub fn alert_severity(record_json: &str) -> Result<String, JsValue> {
    let record: StockAlertRecord = serde_json::from_str(record_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid record JSON: {}", e)))?;

    Ok(severity_for(&normalize(record)).as_str().to_string())
}
