//! Request bodies for the shop API

use serde::{Deserialize, Serialize};

/// Body of `PUT shop/{order_id}/status`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// Body of `PUT shop/{order_id}/product-availability`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdateRequest {
    pub product_id: String,
    pub available: bool,
}
