//! Domain models for the back-office stock alerts service

mod alert;
mod order;

pub use alert::*;
pub use order::*;
