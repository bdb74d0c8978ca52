//! Order Module
//!
//! Types for the shop's assigned-order view:
//! - Orders and line items as returned by the shop API
//! - Normalized order status and the forward-only workflow
//! - Immutable, newest-first order snapshots
//! - Served (historical) orders
//! - Displayed total derivation

pub mod money;
pub mod served;
pub mod snapshot;
pub mod status;
pub mod types;

// Re-exports
pub use money::{SERVICE_FEE, displayed_total};
pub use served::ServedOrder;
pub use snapshot::OrderSnapshot;
pub use status::OrderStatus;
pub use types::*;
