//! Pomodoro Server - a state-managed HTTP server running a Pomodoro timer
//!
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use pomodoro_server::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{check_player_available, SoundCue},
    tasks::{tick_channel, tick_task, TICK_PERIOD},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    let durations = config.durations()?;

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, work={}min, break={}min, mute={}",
          config.host, config.port, config.work, config.break_minutes, config.mute);

    // A missing player only silences the bell
    if !config.mute {
        if let Err(e) = check_player_available().await {
            warn!("{}", e);
        }
    }

    // Create application state wired to the tick task and the bell
    let (ticks, tick_rx) = tick_channel();
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        durations,
        Box::new(ticks),
        Box::new(SoundCue::new(config.mute)),
    ));

    // Start the tick background task
    tokio::spawn(tick_task(Arc::clone(&state), tick_rx, TICK_PERIOD));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start            - Start the countdown");
    info!("  POST /pause            - Pause the countdown");
    info!("  POST /toggle           - Start or pause");
    info!("  POST /reset            - Restore the full duration");
    info!("  POST /mode/:mode       - Switch to work or break");
    info!("  PUT  /duration/:mode   - Set a mode's minutes");
    info!("  GET  /status           - Current timer and display values");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Ok(timer) = state.get_timer_state() {
        info!("Final state: {} {}s remaining, work #{} break #{}",
              timer.mode, timer.remaining_seconds, timer.cycles.work_count, timer.cycles.break_count);
    }

    info!("Server shutdown complete");
    Ok(())
}
