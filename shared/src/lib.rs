//! Shared domain engine for the Kitchen Waste Management platform
//!
//! This crate contains the freshness scoring, batch reconciliation, and
//! waste analytics logic shared between the backend service and the
//! dashboard (via WASM). Everything here is a pure function over in-memory
//! records: callers supply the data snapshot and the evaluation instant.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
