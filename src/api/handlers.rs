//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, warn};

use crate::state::{AppState, Mode, StateError, TimerState};
use super::responses::{ApiResponse, DisplayState, DurationRequest, HealthResponse, StatusResponse};

/// Turn an engine result into a JSON response or a 500
fn respond(result: Result<TimerState, StateError>, message: &str) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(timer) => Ok(Json(ApiResponse::ok(message.to_string(), timer))),
        Err(e) => {
            error!("{} failed: {}", message, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn parse_mode(mode: &str) -> Result<Mode, StatusCode> {
    mode.parse().map_err(|e| {
        warn!("{}", e);
        StatusCode::BAD_REQUEST
    })
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.start(), "Timer started")
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.pause(), "Timer paused")
}

/// Handle POST /toggle - Start when paused, pause when running
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle() {
        Ok(timer) if timer.running => respond(Ok(timer), "Timer started"),
        other => respond(other, "Timer paused"),
    }
}

/// Handle POST /reset - Pause and restore the full duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(state.reset(), "Timer reset")
}

/// Handle POST /mode/:mode - Switch between work and break
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let mode = parse_mode(&mode)?;
    respond(state.set_mode(mode), &format!("Switched to {} mode", mode))
}

/// Handle PUT /duration/:mode - Change a mode's length in minutes
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
    Json(request): Json<DurationRequest>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    let mode = parse_mode(&mode)?;

    match state.set_duration(mode, request.minutes) {
        Ok(timer) => {
            Ok((
                StatusCode::OK,
                Json(ApiResponse::ok(
                    format!("{} duration set to {} minutes", mode, request.minutes),
                    timer,
                )),
            ))
        }
        Err(StateError::Validation(e)) => {
            warn!("Rejected {} duration: {}", mode, e);
            // Report the untouched timer alongside the error
            match state.get_timer_state() {
                Ok(timer) => Ok((StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string(), timer)))),
                Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
            }
        }
        Err(e) => {
            error!("Failed to set {} duration: {}", mode, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current timer snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        display: DisplayState::from_timer(&timer),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
