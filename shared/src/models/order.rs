//! Purchase order models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle states of a purchase order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    /// Reserved quantities, not yet sent to a supplier
    Draft,
    /// Confirmed; inbound quantity is a firm commitment
    Validated,
    /// Goods physically received
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Draft => "draft",
            PurchaseOrderStatus::Validated => "validated",
            PurchaseOrderStatus::Received => "received",
            PurchaseOrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Lightweight reference to a draft order, as carried by alert rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftOrderRef {
    pub order_id: Uuid,
    pub order_number: String,
    pub quantity: i64,
}

/// A purchase order with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub business_id: Uuid,
    pub order_number: String,
    pub supplier_name: Option<String>,
    pub status: PurchaseOrderStatus,
    pub total_amount: Option<Decimal>,
    pub currency: String,
    pub items: Vec<PurchaseOrderItem>,
    pub validated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single line of a purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    pub quantity: i64,
    pub unit_price: Option<Decimal>,
}
