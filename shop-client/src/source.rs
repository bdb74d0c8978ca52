//! Order source abstraction

use crate::ClientResult;
use async_trait::async_trait;
use shared::{Order, ServedOrder};

/// Remote source of the shop's orders.
///
/// Implementations are pure request/response: no caching, no retries.
/// Every call must be bounded in time; a timeout is reported as
/// [`ClientError::Network`](crate::ClientError::Network).
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// All orders currently assigned to the authenticated shop
    async fn fetch_assigned_orders(&self) -> ClientResult<Vec<Order>>;

    /// Request a server-side status change (`status` is the wire label)
    async fn update_order_status(&self, order_id: &str, status: &str) -> ClientResult<()>;

    /// Request a server-side availability change for one line item
    async fn set_item_availability(
        &self,
        order_id: &str,
        product_id: &str,
        available: bool,
    ) -> ClientResult<()>;

    /// Completed order history
    async fn fetch_served_orders(&self) -> ClientResult<Vec<ServedOrder>>;
}
