//! Served (completed) orders - read-only history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order already served by the shop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServedOrder {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
}

impl ServedOrder {
    /// Short human reference: last 6 characters of the ID, upper-cased
    pub fn short_ref(&self) -> String {
        let chars: Vec<char> = self.id.chars().collect();
        let start = chars.len().saturating_sub(6);
        chars[start..].iter().collect::<String>().to_uppercase()
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status.trim().eq_ignore_ascii_case("paid")
    }
}
