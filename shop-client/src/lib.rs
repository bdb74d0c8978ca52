//! Shop Client - order source for the shop API
//!
//! Stateless request/response access to the assigned-order endpoints:
//! fetching orders, changing order status, marking item availability and
//! reading served-order history. No retries are performed here; callers
//! decide what a failure means for them.

pub mod config;
pub mod error;
pub mod http;
pub mod source;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::NetworkOrderSource;
pub use source::OrderSource;

// Re-export shared types for convenience
pub use shared::{Order, OrderSnapshot, OrderStatus, ServedOrder};
