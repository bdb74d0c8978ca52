//! Order Desk - assigned-order synchronization and new-order alarm
//!
//! # Architecture
//!
//! - **Sync** (`sync`): periodic poll of assigned orders, snapshot
//!   replacement and alarm decisions
//! - **Alert** (`alert`): idle/sounding alarm owning sound and vibration
//! - **Workflow** (`workflow`): status advances and item availability
//! - **State** (`state`): shared snapshot, alarm and event channel
//! - **Console** (`console`): operator commands and text rendering
//!
//! # Module layout
//!
//! ```text
//! order-desk/src/
//! ├── core/       # config, errors
//! ├── alert/      # alarm state machine and backends
//! ├── sync/       # sync loop and alarm decision
//! ├── utils/      # logging
//! ├── console.rs  # operator console
//! ├── event.rs    # UI events
//! ├── state.rs    # shared state
//! └── workflow.rs # order workflow commands
//! ```

pub mod alert;
pub mod console;
pub mod core;
pub mod event;
pub mod state;
pub mod sync;
pub mod utils;
pub mod workflow;

// Re-export public types
pub use alert::{
    AlarmBackend, AlarmState, AlarmTransition, AlertController, AlertError, TerminalAlarm,
};
pub use console::ConsoleCommand;
pub use core::{DeskConfig, DeskError, DeskResult};
pub use event::DeskEvent;
pub use state::DeskState;
pub use sync::{AlarmDecision, CycleOutcome, SyncEngine, SyncHandle};
pub use workflow::{StatusAdvance, WorkflowManager};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging from the resulting configuration
pub fn setup_environment() -> DeskConfig {
    dotenv::dotenv().ok();
    let config = DeskConfig::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
  ____          _             ____            _
 / __ \_ __ __| | ___ _ __   |  _ \  ___  ___| | __
| |  | | '__/ _` |/ _ \ '__|  | | | |/ _ \/ __| |/ /
| |__| | | | (_| |  __/ |     | |_| |  __/\__ \   <
 \____/|_|  \__,_|\___|_|     |____/ \___||___/_|\_\
    "#
    );
}
