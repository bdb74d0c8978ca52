//! Assigned order types as consumed from the shop API

use super::status::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Customer
// ============================================================================

/// Customer reference (populated `customerId` on the server side)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// Line Item
// ============================================================================

/// Availability flag of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    /// The shop has not marked the item yet
    #[default]
    Unknown,
    Available,
    Unavailable,
}

impl From<Option<bool>> for Availability {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => Self::Unknown,
            Some(true) => Self::Available,
            Some(false) => Self::Unavailable,
        }
    }
}

impl From<Availability> for Option<bool> {
    fn from(availability: Availability) -> Self {
        match availability {
            Availability::Unknown => None,
            Availability::Available => Some(true),
            Availability::Unavailable => Some(false),
        }
    }
}

/// Line item of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product ID (unique within the parent order)
    pub product_id: String,
    pub name: String,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price
    pub price: f64,
    /// Tri-state availability flag (absent = not marked)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl LineItem {
    pub fn availability(&self) -> Availability {
        self.is_available.into()
    }

    /// Availability change offered to the operator, if any.
    ///
    /// Available items can be marked unavailable and vice versa;
    /// unmarked items offer nothing.
    pub fn availability_action(&self) -> Option<bool> {
        match self.availability() {
            Availability::Available => Some(false),
            Availability::Unavailable => Some(true),
            Availability::Unknown => None,
        }
    }

    /// Copy of this item with the availability flag set
    pub fn with_availability(&self, available: bool) -> Self {
        Self {
            is_available: Some(available),
            ..self.clone()
        }
    }
}

// ============================================================================
// Order
// ============================================================================

/// Order assigned to the shop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "customerId", default, deserialize_with = "deserialize_customer")]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Raw status as sent by the server
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub total_amount: f64,
}

/// `customerId` is normally populated to `{ name }`, but an unpopulated
/// reference arrives as a bare id string. Either way the order decodes.
fn deserialize_customer<'de, D>(deserializer: D) -> Result<Option<Customer>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CustomerRef {
        Populated(Customer),
        Id(String),
    }

    Ok(match Option::<CustomerRef>::deserialize(deserializer)? {
        Some(CustomerRef::Populated(customer)) => Some(customer),
        Some(CustomerRef::Id(_)) | None => None,
    })
}

impl Order {
    /// Normalized status
    pub fn status(&self) -> OrderStatus {
        OrderStatus::parse(&self.status)
    }

    /// Whether this order counts towards the new-order alarm
    pub fn is_qualifying(&self) -> bool {
        self.status().is_qualifying()
    }

    pub fn customer_name(&self) -> &str {
        self.customer
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown customer")
    }

    pub fn item(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}
