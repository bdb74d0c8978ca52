//! Desk configuration and errors

pub mod config;
pub mod error;

pub use config::DeskConfig;
pub use error::{DeskError, DeskResult};
