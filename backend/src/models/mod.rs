//! Database models for the back-office stock alerts service
//!
//! Re-exports models from the shared crate and adds backend-specific models

pub use shared::models::*;
