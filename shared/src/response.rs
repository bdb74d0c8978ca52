//! Response envelopes of the shop API
//!
//! ```json
//! { "data": [ ...orders ] }        // GET shop/get-assigned-orders
//! { "orders": [ ...served ] }      // GET shop/served-orders
//! ```

use crate::order::{Order, ServedOrder};
use serde::{Deserialize, Serialize};

/// `{ data: T }` envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Assigned-orders response
pub type AssignedOrdersEnvelope = DataEnvelope<Vec<Order>>;

/// Served-orders response; a missing `orders` key means no history
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ServedOrdersEnvelope {
    #[serde(default)]
    pub orders: Vec<ServedOrder>,
}
