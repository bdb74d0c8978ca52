//! Displayed order total

use super::types::Order;

/// Fixed service fee withheld from the order total (currency units)
pub const SERVICE_FEE: f64 = 22.0;

/// Total shown to the shop: `max(total_amount - service_fee, 0)`
pub fn displayed_total(total_amount: f64, service_fee: f64) -> f64 {
    (total_amount - service_fee).max(0.0)
}

impl Order {
    /// Displayed total with the given service fee
    pub fn displayed_total(&self, service_fee: f64) -> f64 {
        displayed_total(self.total_amount, service_fee)
    }
}
