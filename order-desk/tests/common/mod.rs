//! Test doubles for the desk integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use order_desk::alert::VIBRATION_PATTERN;
use order_desk::{AlarmBackend, AlertController, AlertError, DeskEvent, DeskState};
use parking_lot::Mutex;
use shared::{Customer, LineItem, Order, ServedOrder};
use shop_client::{ClientError, ClientResult, OrderSource};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, broadcast};

// ========== Fixtures ==========

pub fn order(id: &str, status: &str, minutes_ago: i64) -> Order {
    Order {
        id: id.to_string(),
        customer: Some(Customer {
            name: format!("Customer {}", id),
        }),
        items: vec![],
        status: status.to_string(),
        created_at: Utc::now() - ChronoDuration::minutes(minutes_ago),
        total_amount: 120.0,
    }
}

pub fn item(product_id: &str, is_available: Option<bool>) -> LineItem {
    LineItem {
        product_id: product_id.to_string(),
        name: format!("Product {}", product_id),
        quantity: 1,
        description: None,
        price: 40.0,
        is_available,
    }
}

pub fn with_items(mut order: Order, items: Vec<LineItem>) -> Order {
    order.items = items;
    order
}

/// Drain every event already published
pub fn drain(rx: &mut broadcast::Receiver<DeskEvent>) -> Vec<DeskEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

// ========== Scripted order source ==========

/// Order source replaying a queue of fetch results.
///
/// Once the queue is empty the last result is repeated. A single fetch
/// can be held open with [`ScriptedSource::block_next_fetch`].
#[derive(Default)]
pub struct ScriptedSource {
    fetch_results: Mutex<VecDeque<ClientResult<Vec<Order>>>>,
    last_result: Mutex<Option<ClientResult<Vec<Order>>>>,
    fetches: AtomicUsize,
    fetch_started: Notify,
    gate: Mutex<Option<Arc<Notify>>>,
    command_error: Mutex<Option<ClientError>>,
    status_updates: Mutex<Vec<(String, String)>>,
    availability_updates: Mutex<Vec<(String, String, bool)>>,
    served: Mutex<Vec<ServedOrder>>,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_orders(&self, orders: Vec<Order>) {
        self.fetch_results.lock().push_back(Ok(orders));
    }

    pub fn push_error(&self, error: ClientError) {
        self.fetch_results.lock().push_back(Err(error));
    }

    /// Hold the next fetch until the returned handle is notified
    pub fn block_next_fetch(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    /// Resolves once a fetch has started
    pub async fn fetch_started(&self) {
        self.fetch_started.notified().await
    }

    pub fn fail_commands_with(&self, error: ClientError) {
        *self.command_error.lock() = Some(error);
    }

    pub fn set_served(&self, served: Vec<ServedOrder>) {
        *self.served.lock() = served;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn status_updates(&self) -> Vec<(String, String)> {
        self.status_updates.lock().clone()
    }

    pub fn availability_updates(&self) -> Vec<(String, String, bool)> {
        self.availability_updates.lock().clone()
    }

    fn command_result(&self) -> ClientResult<()> {
        match self.command_error.lock().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OrderSource for ScriptedSource {
    async fn fetch_assigned_orders(&self) -> ClientResult<Vec<Order>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.fetch_started.notify_one();

        let result = {
            let next = self.fetch_results.lock().pop_front();
            let mut last = self.last_result.lock();
            match next {
                Some(result) => {
                    *last = Some(result.clone());
                    result
                }
                None => last.clone().unwrap_or_else(|| Ok(vec![])),
            }
        };

        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn update_order_status(&self, order_id: &str, status: &str) -> ClientResult<()> {
        self.command_result()?;
        self.status_updates
            .lock()
            .push((order_id.to_string(), status.to_string()));
        Ok(())
    }

    async fn set_item_availability(
        &self,
        order_id: &str,
        product_id: &str,
        available: bool,
    ) -> ClientResult<()> {
        self.command_result()?;
        self.availability_updates
            .lock()
            .push((order_id.to_string(), product_id.to_string(), available));
        Ok(())
    }

    async fn fetch_served_orders(&self) -> ClientResult<Vec<ServedOrder>> {
        self.command_result()?;
        Ok(self.served.lock().clone())
    }
}

// ========== Recording alarm backend ==========

#[derive(Default)]
pub struct RecordingAlarm {
    deny_permission: bool,
    plays: AtomicUsize,
    sound_stops: AtomicUsize,
    vibrations: AtomicUsize,
    vibration_cancels: AtomicUsize,
}

impl RecordingAlarm {
    /// Backend whose platform refuses the vibration permission
    pub fn denying() -> Self {
        Self {
            deny_permission: true,
            ..Default::default()
        }
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }

    pub fn sound_stops(&self) -> usize {
        self.sound_stops.load(Ordering::SeqCst)
    }

    pub fn vibrations(&self) -> usize {
        self.vibrations.load(Ordering::SeqCst)
    }

    pub fn vibration_cancels(&self) -> usize {
        self.vibration_cancels.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlarmBackend for RecordingAlarm {
    async fn request_vibration_permission(&self) -> bool {
        !self.deny_permission
    }

    fn play_looping(&self) -> Result<(), AlertError> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn stop_sound(&self) {
        self.sound_stops.fetch_add(1, Ordering::SeqCst);
    }

    fn vibrate(&self, pattern: &[Duration], repeat: bool) {
        assert_eq!(pattern, &VIBRATION_PATTERN);
        assert!(repeat);
        self.vibrations.fetch_add(1, Ordering::SeqCst);
    }

    fn cancel_vibration(&self) {
        self.vibration_cancels.fetch_add(1, Ordering::SeqCst);
    }
}

// ========== Desk wiring ==========

pub struct TestDesk {
    pub source: Arc<ScriptedSource>,
    pub alarm: Arc<RecordingAlarm>,
    pub state: DeskState,
}

pub fn desk() -> TestDesk {
    desk_with_alarm(RecordingAlarm::default())
}

pub fn desk_with_alarm(alarm: RecordingAlarm) -> TestDesk {
    let source = ScriptedSource::new();
    let alarm = Arc::new(alarm);
    let state = DeskState::new(AlertController::new(alarm.clone()));
    TestDesk {
        source,
        alarm,
        state,
    }
}

impl TestDesk {
    pub fn source(&self) -> Arc<dyn OrderSource> {
        self.source.clone()
    }
}
