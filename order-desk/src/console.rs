//! Operator console: command parsing and text rendering

use chrono::Local;
use shared::{Availability, Order, OrderSnapshot, OrderStatus, ServedOrder};
use std::fmt::Write;
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  advance <order>                  move order to its next status
  avail <order> <product> yes|no   mark a line item available / unavailable
  ack                              silence the new-order alarm
  refresh                          sync now
  served                           list served orders
  help                             show this help
  quit                             stop the desk";

/// Operator command read from stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Advance {
        order_id: String,
    },
    Availability {
        order_id: String,
        product_id: String,
        available: bool,
    },
    Acknowledge,
    Refresh,
    Served,
    Help,
    Quit,
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "yes" | "y" | "true" | "available" | "on" => Ok(true),
        "no" | "n" | "false" | "unavailable" | "off" => Ok(false),
        other => Err(format!("expected yes or no, got '{}'", other)),
    }
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = parts.split_first() else {
            return Err("empty command".into());
        };

        match (command.to_lowercase().as_str(), args) {
            ("advance" | "next", [order_id]) => Ok(Self::Advance {
                order_id: order_id.to_string(),
            }),
            ("avail" | "availability", [order_id, product_id, flag]) => Ok(Self::Availability {
                order_id: order_id.to_string(),
                product_id: product_id.to_string(),
                available: parse_flag(flag)?,
            }),
            ("ack" | "silence", []) => Ok(Self::Acknowledge),
            ("refresh" | "sync", []) => Ok(Self::Refresh),
            ("served" | "history", []) => Ok(Self::Served),
            ("help" | "?", []) => Ok(Self::Help),
            ("quit" | "exit", []) => Ok(Self::Quit),
            ("advance" | "next", _) => Err("usage: advance <order>".into()),
            ("avail" | "availability", _) => Err("usage: avail <order> <product> yes|no".into()),
            (other, _) => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

/// Button label for the next workflow step
fn next_step_label(status: &OrderStatus) -> Option<&'static str> {
    match status.next()? {
        OrderStatus::Confirmed => Some("Mark as Confirmed"),
        OrderStatus::ReadyToCollect => Some("Mark as Ready to Collect"),
        _ => None,
    }
}

fn render_order(out: &mut String, order: &Order, service_fee: f64) {
    let placed = order
        .created_at
        .with_timezone(&Local)
        .format("%d %b %Y, %-I:%M %p");
    let _ = writeln!(
        out,
        "[{}] {} · {} · {}",
        order.id,
        order.status.trim(),
        order.customer_name(),
        placed
    );

    for item in &order.items {
        let _ = write!(out, "    {} x{} @ ₹{}", item.name, item.quantity, item.price);
        if let Some(description) = item.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(out, " ({})", description);
        }
        match (item.availability(), item.availability_action()) {
            (Availability::Unknown, _) | (_, None) => {}
            (availability, Some(target)) => {
                let _ = write!(
                    out,
                    " [{} → avail {} {} {}]",
                    if availability == Availability::Available {
                        "available"
                    } else {
                        "unavailable"
                    },
                    order.id,
                    item.product_id,
                    if target { "yes" } else { "no" }
                );
            }
        }
        out.push('\n');
    }

    let _ = writeln!(out, "    Total: ₹{}", order.displayed_total(service_fee));
    if let Some(label) = next_step_label(&order.status()) {
        let _ = writeln!(out, "    → advance {} ({})", order.id, label);
    }
}

/// Render the assigned-order view
pub fn render_snapshot(snapshot: &OrderSnapshot, service_fee: f64) -> String {
    if snapshot.is_empty() {
        return "No assigned orders\n".to_string();
    }

    let mut out = format!("Assigned Orders ({})\n", snapshot.len());
    for order in snapshot {
        render_order(&mut out, order, service_fee);
    }
    out
}

/// Render the served-order history
pub fn render_served(orders: &[ServedOrder]) -> String {
    if orders.is_empty() {
        return "No orders have been delivered yet.\n".to_string();
    }

    let mut out = format!("Completed Orders ({})\n", orders.len());
    for order in orders {
        let delivered = order
            .delivered_at
            .map(|t| t.with_timezone(&Local).format("%d %b %Y, %-I:%M %p").to_string())
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "#{} ₹{} {} {} · delivered {} · {}",
            order.short_ref(),
            order.total_amount,
            order.payment_status.to_uppercase(),
            order.payment_method.to_uppercase(),
            delivered,
            order.status
        );
    }
    out
}
