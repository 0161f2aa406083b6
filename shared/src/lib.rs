//! Shared types and stock-alert classification for the back-office platform
//!
//! This crate contains types and pure logic shared between the backend,
//! the front-end (via WASM), and other components of the system.

pub mod classify;
pub mod models;
pub mod types;
pub mod validation;

pub use classify::*;
pub use models::*;
pub use types::*;
pub use validation::*;
