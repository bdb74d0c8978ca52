//! Order status normalization and workflow transitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized order status
///
/// The server sends free-form strings ("Assigned", " confirmed ", ...).
/// Matching is done on the trimmed, lower-cased value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Assigned,
    Confirmed,
    ReadyToCollect,
    Pending,
    Cancelled,
    Delivered,
    /// Anything the desk does not recognise (normalized form)
    Other(String),
}

impl OrderStatus {
    /// Parse a raw server status string
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "assigned" => Self::Assigned,
            "confirmed" => Self::Confirmed,
            "ready to collect" => Self::ReadyToCollect,
            "pending" => Self::Pending,
            "cancelled" => Self::Cancelled,
            "delivered" => Self::Delivered,
            _ => Self::Other(normalized),
        }
    }

    /// Next status a shop operator may move the order to.
    ///
    /// Only `assigned → confirmed → ready to collect` is client-driven;
    /// every other status is server-driven and returns `None`.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Assigned => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::ReadyToCollect),
            _ => None,
        }
    }

    /// Label sent to the server for this status
    pub fn wire_label(&self) -> &str {
        match self {
            Self::Assigned => "Assigned",
            Self::Confirmed => "Confirmed",
            Self::ReadyToCollect => "Ready to Collect",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
            Self::Delivered => "Delivered",
            Self::Other(s) => s,
        }
    }

    /// Whether an order in this status triggers the new-order alarm
    pub fn is_qualifying(&self) -> bool {
        matches!(self, Self::Assigned)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}
