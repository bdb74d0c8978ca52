use anyhow::Context;
use order_desk::console::{self, ConsoleCommand};
use order_desk::{
    AlertController, CycleOutcome, DeskConfig, DeskEvent, DeskState, StatusAdvance, SyncEngine,
    SyncHandle, TerminalAlarm, WorkflowManager, print_banner, setup_environment,
};
use shop_client::OrderSource;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    let config = setup_environment();

    print_banner();
    tracing::info!(
        api_url = %config.api_url,
        poll_interval_secs = config.poll_interval_secs,
        "Order desk starting..."
    );
    if config.api_token.is_none() {
        tracing::warn!("SHOP_API_TOKEN not set, the first sync will ask for reauthentication");
    }

    // 2. Order source
    let source: Arc<dyn OrderSource> = Arc::new(
        config
            .client_config()
            .build_order_source()
            .context("failed to build order source")?,
    );

    // 3. Shared state and alarm
    let state = DeskState::new(AlertController::new(Arc::new(TerminalAlarm::default())));
    let mut events = state.subscribe();

    // 4. Sync loop and workflow
    let engine = Arc::new(SyncEngine::new(source.clone(), state.clone()));
    let sync = SyncHandle::spawn(engine, config.poll_interval());
    let workflow = WorkflowManager::new(source, state.clone());

    println!("{}", console::HELP);

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Received Ctrl-C, shutting down");
                break;
            }
            _ = sync.stopped() => {
                tracing::warn!("Order sync stopped, sign in again and restart the desk");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => report_event(&config, &event),
                Err(RecvError::Lagged(n)) => tracing::warn!(skipped = n, "Event receiver lagged"),
                Err(RecvError::Closed) => break,
            },
            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match line.parse::<ConsoleCommand>() {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => handle_command(command, &sync, &workflow).await,
                    Err(e) => println!("{}", e),
                },
                Ok(None) => {
                    tracing::debug!("stdin closed, console input disabled");
                    stdin_open = false;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read stdin, console input disabled");
                    stdin_open = false;
                }
            },
        }
    }

    // 5. Teardown: stop polling and silence the alarm
    sync.shutdown().await;
    tracing::info!("Order desk stopped");
    Ok(())
}

async fn handle_command(command: ConsoleCommand, sync: &SyncHandle, workflow: &WorkflowManager) {
    match command {
        ConsoleCommand::Advance { order_id } => match workflow.advance_status(&order_id).await {
            Ok(StatusAdvance::Advanced { from, to }) => {
                println!("{}: {} → {}", order_id, from, to)
            }
            Ok(StatusAdvance::NotActionable(status)) => {
                println!("{}: nothing to do while {}", order_id, status)
            }
            Err(e) => println!("{}: {}", order_id, e),
        },
        ConsoleCommand::Availability {
            order_id,
            product_id,
            available,
        } => {
            if let Err(e) = workflow
                .set_item_availability(&order_id, &product_id, available)
                .await
            {
                println!("{}/{}: {}", order_id, product_id, e);
            }
        }
        ConsoleCommand::Acknowledge => {
            workflow.acknowledge_alarm().await;
        }
        ConsoleCommand::Refresh => match sync.sync_now().await {
            CycleOutcome::Skipped => println!("A sync is already running"),
            CycleOutcome::ReauthRequired => sync.engine().cancel(),
            _ => {}
        },
        ConsoleCommand::Served => match workflow.served_orders().await {
            Ok(orders) => print!("{}", console::render_served(&orders)),
            Err(e) => println!("Failed to load served orders: {}", e),
        },
        ConsoleCommand::Help => println!("{}", console::HELP),
        ConsoleCommand::Quit => {}
    }
}

fn report_event(config: &DeskConfig, event: &DeskEvent) {
    match event {
        DeskEvent::SnapshotUpdated(snapshot) => {
            print!("{}", console::render_snapshot(snapshot, config.service_fee))
        }
        DeskEvent::SyncFailed { message } => {
            println!("Sync failed, showing last orders: {}", message)
        }
        DeskEvent::ReauthRequired { message } => println!("Session expired: {}", message),
        DeskEvent::AlarmStarted => println!("*** NEW ORDER *** (type 'ack' to silence)"),
        DeskEvent::AlarmStopped => println!("Alarm silenced"),
        DeskEvent::AlertDegraded { reason } => {
            println!("[!] New order, alarm unavailable: {}", reason)
        }
        DeskEvent::CommandFailed { order_id, message } => {
            println!("Command for {} failed: {}", order_id, message)
        }
    }
}
