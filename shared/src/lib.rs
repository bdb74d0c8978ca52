//! Shared types for the shop order desk
//!
//! Wire and domain types used by both the order source client and the
//! desk engine: orders, line items, snapshots, served history, and the
//! request/response envelopes of the shop API.

pub mod order;
pub mod request;
pub mod response;

// Re-exports
pub use order::{
    Availability, Customer, LineItem, Order, OrderSnapshot, OrderStatus, SERVICE_FEE, ServedOrder,
    displayed_total,
};
pub use request::{AvailabilityUpdateRequest, StatusUpdateRequest};
pub use response::{AssignedOrdersEnvelope, DataEnvelope, ServedOrdersEnvelope};
pub use serde::{Deserialize, Serialize};
