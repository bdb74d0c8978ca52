use shop_client::ClientError;
use thiserror::Error;

/// Errors returned by desk commands
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeskError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Order not found: {0}")]
    UnknownOrder(String),

    #[error("Item {product_id} not found in order {order_id}")]
    UnknownItem {
        order_id: String,
        product_id: String,
    },
}

impl DeskError {
    /// Whether the operator has to log in again
    pub fn requires_reauth(&self) -> bool {
        matches!(self, DeskError::Client(e) if e.is_auth())
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
