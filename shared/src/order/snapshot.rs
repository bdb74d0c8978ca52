//! Order snapshot - the desk's view of all currently assigned orders
//!
//! A snapshot is an immutable value. Each successful sync replaces it
//! wholesale; local optimistic edits build a new snapshot instead of
//! mutating the current one, so readers holding an older snapshot never
//! observe a partial update.

use super::types::Order;
use serde::Serialize;
use std::collections::HashSet;

/// Assigned orders, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderSnapshot {
    orders: Vec<Order>,
}

impl OrderSnapshot {
    /// Build a snapshot from a server response.
    ///
    /// Orders are sorted by `created_at` descending. The sort is stable,
    /// so orders with equal timestamps keep the server's order.
    pub fn from_server(mut orders: Vec<Order>) -> Self {
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { orders }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// IDs of every order in the snapshot
    pub fn ids(&self) -> HashSet<String> {
        self.orders.iter().map(|o| o.id.clone()).collect()
    }

    /// Orders whose normalized status is `assigned`
    pub fn qualifying(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| o.is_qualifying())
    }

    pub fn has_qualifying(&self) -> bool {
        self.qualifying().next().is_some()
    }

    /// New snapshot with one order's raw status replaced.
    ///
    /// Unknown order IDs yield an unchanged copy.
    pub fn with_status(&self, order_id: &str, status: &str) -> Self {
        let orders = self
            .orders
            .iter()
            .map(|o| {
                if o.id == order_id {
                    Order {
                        status: status.to_string(),
                        ..o.clone()
                    }
                } else {
                    o.clone()
                }
            })
            .collect();
        Self { orders }
    }

    /// New snapshot with a single line item's availability flag set.
    ///
    /// Only the item matching both `order_id` and `product_id` changes.
    pub fn with_item_availability(
        &self,
        order_id: &str,
        product_id: &str,
        available: bool,
    ) -> Self {
        let orders = self
            .orders
            .iter()
            .map(|o| {
                if o.id != order_id {
                    return o.clone();
                }
                let items = o
                    .items
                    .iter()
                    .map(|item| {
                        if item.product_id == product_id {
                            item.with_availability(available)
                        } else {
                            item.clone()
                        }
                    })
                    .collect();
                Order { items, ..o.clone() }
            })
            .collect();
        Self { orders }
    }
}

impl<'a> IntoIterator for &'a OrderSnapshot {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Availability, LineItem, OrderStatus};
    use chrono::{TimeZone, Utc};

    fn order(id: &str, status: &str, minute: u32) -> Order {
        Order {
            id: id.to_string(),
            customer: None,
            items: vec![
                LineItem {
                    product_id: "p-1".into(),
                    name: "Rice 5kg".into(),
                    quantity: 1,
                    description: None,
                    price: 320.0,
                    is_available: Some(true),
                },
                LineItem {
                    product_id: "p-2".into(),
                    name: "Dal 1kg".into(),
                    quantity: 2,
                    description: None,
                    price: 140.0,
                    is_available: None,
                },
            ],
            status: status.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, minute, 0).unwrap(),
            total_amount: 600.0,
        }
    }

    #[test]
    fn test_sorted_newest_first() {
        let snapshot = OrderSnapshot::from_server(vec![
            order("a", "Assigned", 1),
            order("b", "Assigned", 30),
            order("c", "Assigned", 10),
        ]);
        let ids: Vec<_> = snapshot.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_equal_timestamps_keep_server_order() {
        let snapshot = OrderSnapshot::from_server(vec![
            order("x", "Assigned", 5),
            order("newest", "Assigned", 40),
            order("y", "Confirmed", 5),
            order("z", "Assigned", 5),
        ]);
        let ids: Vec<_> = snapshot.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "x", "y", "z"]);
    }

    #[test]
    fn test_qualifying_orders() {
        let snapshot = OrderSnapshot::from_server(vec![
            order("a", "confirmed", 1),
            order("b", " ASSIGNED ", 2),
        ]);
        assert!(snapshot.has_qualifying());
        let ids: Vec<_> = snapshot.qualifying().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);

        let snapshot = OrderSnapshot::from_server(vec![order("a", "Ready to Collect", 1)]);
        assert!(!snapshot.has_qualifying());
        assert!(!OrderSnapshot::empty().has_qualifying());
    }

    #[test]
    fn test_with_status_builds_new_value() {
        let original = OrderSnapshot::from_server(vec![
            order("a", "Assigned", 1),
            order("b", "Assigned", 2),
        ]);
        let updated = original.with_status("a", "Confirmed");

        assert_eq!(updated.get("a").unwrap().status(), OrderStatus::Confirmed);
        assert_eq!(updated.get("b").unwrap().status(), OrderStatus::Assigned);
        // Original untouched
        assert_eq!(original.get("a").unwrap().status(), OrderStatus::Assigned);
        // Ordering preserved
        assert_eq!(updated.orders()[0].id, "b");
    }

    #[test]
    fn test_with_status_unknown_order_is_noop() {
        let original = OrderSnapshot::from_server(vec![order("a", "Assigned", 1)]);
        assert_eq!(original.with_status("missing", "Confirmed"), original);
    }

    #[test]
    fn test_with_item_availability_targets_one_item() {
        let original = OrderSnapshot::from_server(vec![
            order("a", "Assigned", 1),
            order("b", "Assigned", 2),
        ]);
        let updated = original.with_item_availability("a", "p-2", false);

        let a = updated.get("a").unwrap();
        assert_eq!(a.item("p-2").unwrap().availability(), Availability::Unavailable);
        assert_eq!(a.item("p-1").unwrap().availability(), Availability::Available);
        assert_eq!(a.status, "Assigned");
        assert_eq!(a.total_amount, 600.0);

        // Same product ID in another order is untouched
        let b = updated.get("b").unwrap();
        assert_eq!(b.item("p-2").unwrap().availability(), Availability::Unknown);
    }

    #[test]
    fn test_ids_cover_all_orders() {
        let snapshot = OrderSnapshot::from_server(vec![
            order("a", "Assigned", 1),
            order("b", "Cancelled", 2),
        ]);
        let ids = snapshot.ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("a") && ids.contains("b"));
    }
}
