//! Alarm decision for one sync cycle

use shared::OrderSnapshot;
use std::collections::HashSet;

/// What the alarm should do after a fetched snapshot.
///
/// - start: edge-triggered, only when a qualifying order was not seen before
/// - stop: level-triggered, whenever no qualifying order remains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmDecision {
    pub has_qualifying: bool,
    pub is_new_qualifying: bool,
}

impl AlarmDecision {
    pub fn evaluate(snapshot: &OrderSnapshot, seen: &HashSet<String>) -> Self {
        let mut decision = Self::default();
        for order in snapshot.qualifying() {
            decision.has_qualifying = true;
            if !seen.contains(&order.id) {
                decision.is_new_qualifying = true;
                break;
            }
        }
        decision
    }

    pub fn should_start(&self) -> bool {
        self.is_new_qualifying
    }

    pub fn should_stop(&self) -> bool {
        !self.has_qualifying
    }
}
