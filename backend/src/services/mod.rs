//! Business logic services for the back-office stock alerts service

pub mod purchase_orders;
pub mod refresh;
pub mod stock_alerts;

pub use purchase_orders::PurchaseOrderService;
pub use refresh::{RefreshBus, RefreshReason};
pub use stock_alerts::StockAlertService;
