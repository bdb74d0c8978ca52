//! Order workflow commands
//!
//! Status moves forward only: `assigned → confirmed → ready to collect`.
//! Every command goes to the server first; the local snapshot is updated
//! optimistically only after the server acknowledged it, and the next sync
//! cycle overwrites it with server truth.

use crate::alert::AlarmTransition;
use crate::core::{DeskError, DeskResult};
use crate::event::DeskEvent;
use crate::state::DeskState;
use shared::{OrderStatus, ServedOrder};
use shop_client::{ClientError, OrderSource};
use std::sync::Arc;

/// Result of [`WorkflowManager::advance_status`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusAdvance {
    Advanced { from: OrderStatus, to: OrderStatus },
    /// The current status has no client-driven successor
    NotActionable(OrderStatus),
}

pub struct WorkflowManager {
    source: Arc<dyn OrderSource>,
    state: DeskState,
}

impl WorkflowManager {
    pub fn new(source: Arc<dyn OrderSource>, state: DeskState) -> Self {
        Self { source, state }
    }

    /// Move an order to its next workflow status
    pub async fn advance_status(&self, order_id: &str) -> DeskResult<StatusAdvance> {
        let from = self
            .state
            .snapshot()
            .get(order_id)
            .map(|order| order.status())
            .ok_or_else(|| DeskError::UnknownOrder(order_id.to_string()))?;

        let Some(to) = from.next() else {
            tracing::debug!(order_id = %order_id, status = %from, "Status not actionable");
            return Ok(StatusAdvance::NotActionable(from));
        };

        if let Err(e) = self
            .source
            .update_order_status(order_id, to.wire_label())
            .await
        {
            return Err(self.command_failed(order_id, e));
        }

        let snapshot = self
            .state
            .update_snapshot(|s| s.with_status(order_id, to.wire_label()));
        self.state
            .publish(DeskEvent::SnapshotUpdated(snapshot.clone()));

        if !snapshot.has_qualifying() {
            self.state.stop_alarm().await;
        }

        tracing::info!(order_id = %order_id, from = %from, to = %to, "Order status advanced");
        Ok(StatusAdvance::Advanced { from, to })
    }

    /// Mark one line item available or unavailable
    pub async fn set_item_availability(
        &self,
        order_id: &str,
        product_id: &str,
        available: bool,
    ) -> DeskResult<()> {
        {
            let snapshot = self.state.snapshot();
            let order = snapshot
                .get(order_id)
                .ok_or_else(|| DeskError::UnknownOrder(order_id.to_string()))?;
            if order.item(product_id).is_none() {
                return Err(DeskError::UnknownItem {
                    order_id: order_id.to_string(),
                    product_id: product_id.to_string(),
                });
            }
        }

        if let Err(e) = self
            .source
            .set_item_availability(order_id, product_id, available)
            .await
        {
            return Err(self.command_failed(order_id, e));
        }

        let snapshot = self
            .state
            .update_snapshot(|s| s.with_item_availability(order_id, product_id, available));
        self.state.publish(DeskEvent::SnapshotUpdated(snapshot));

        tracing::info!(
            order_id = %order_id,
            product_id = %product_id,
            available,
            "Item availability updated"
        );
        Ok(())
    }

    /// Silence the alarm by hand
    pub async fn acknowledge_alarm(&self) -> AlarmTransition {
        self.state.stop_alarm().await
    }

    /// Served order history (read-only)
    pub async fn served_orders(&self) -> DeskResult<Vec<ServedOrder>> {
        self.source.fetch_served_orders().await.map_err(|e| {
            if e.is_auth() {
                self.state.publish(DeskEvent::ReauthRequired {
                    message: e.to_string(),
                });
            }
            DeskError::from(e)
        })
    }

    fn command_failed(&self, order_id: &str, err: ClientError) -> DeskError {
        tracing::warn!(order_id = %order_id, error = %err, "Order command rejected");
        if err.is_auth() {
            self.state.publish(DeskEvent::ReauthRequired {
                message: err.to_string(),
            });
        }
        self.state.publish(DeskEvent::CommandFailed {
            order_id: order_id.to_string(),
            message: err.to_string(),
        });
        DeskError::Client(err)
    }
}
