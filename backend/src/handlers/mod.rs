//! HTTP handlers for the back-office stock alerts service

pub mod health;
pub mod purchase_orders;
pub mod stock_alerts;

pub use health::*;
pub use purchase_orders::*;
pub use stock_alerts::*;
