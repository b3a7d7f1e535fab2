//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::warn;

use crate::domain::axis_ticks;
use crate::sim::Frame;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/timetable", get(get_timetable))
        .route("/api/paths", get(get_paths))
        .route("/api/axis", get(get_axis))
        .route("/api/frame", get(get_frame))
        .route("/api/start", post(start))
        .route("/api/stop", post(stop))
        .route("/api/reset", post(reset))
        .route("/api/speed", post(set_speed))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Stations, trains and the simulated window.
async fn get_timetable(State(state): State<AppState>) -> Json<TimetableResponse> {
    let config = &state.config;
    let topology = state.timetable.topology();

    Json(TimetableResponse {
        window: WindowInfo {
            start: config.window_start.to_string(),
            end: config.window_end.to_string(),
            total_minutes: config.total_minutes(),
        },
        stations: topology.stations().to_vec(),
        max_distance: topology.max_distance(),
        last_event: state.timetable.last_event(),
        trains: state.timetable.trains().to_vec(),
    })
}

/// Static travel and dwell segments for every train.
async fn get_paths(State(state): State<AppState>) -> Json<PathsResponse> {
    Json(PathsResponse {
        trains: state.paths.as_ref().clone(),
    })
}

/// Time-axis ticks across the window.
async fn get_axis(
    State(state): State<AppState>,
    Query(req): Query<AxisRequest>,
) -> Result<Json<AxisResponse>, AppError> {
    let step = req.step.unwrap_or(state.config.axis_step_mins);
    if step == 0 {
        return Err(AppError::BadRequest {
            message: "step must be at least 1 minute".to_string(),
        });
    }

    let ticks = axis_ticks(state.config.window_start, state.config.total_minutes(), step);
    Ok(Json(AxisResponse { ticks }))
}

/// Latest simulation frame.
async fn get_frame(State(state): State<AppState>) -> Json<Frame> {
    Json(state.latest_frame())
}

/// Start the clock.
async fn start(State(state): State<AppState>) -> Json<Frame> {
    state.driver.start();
    Json(state.latest_frame())
}

/// Stop the clock.
async fn stop(State(state): State<AppState>) -> Json<Frame> {
    state.driver.stop();
    Json(state.latest_frame())
}

/// Stop and rewind to the start of the window.
async fn reset(State(state): State<AppState>) -> Json<Frame> {
    state.driver.reset();
    Json(state.latest_frame())
}

/// Change simulated minutes per tick.
async fn set_speed(
    State(state): State<AppState>,
    Json(req): Json<SpeedRequest>,
) -> Json<Frame> {
    state.driver.set_speed(req.speed);
    Json(state.latest_frame())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::{ClockPhase, TracingSink};
    use crate::timetable::reference;

    fn state() -> AppState {
        AppState::new(reference().unwrap(), SimConfig::default(), TracingSink)
    }

    #[tokio::test]
    async fn health_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn timetable_lists_window_and_stations() {
        let Json(body) = get_timetable(State(state())).await;

        assert_eq!(body.window.start, "06:00");
        assert_eq!(body.window.end, "10:00");
        assert_eq!(body.window.total_minutes, 240);
        assert_eq!(body.stations.len(), 5);
        assert_eq!(body.max_distance, 100.0);
        // T3 reaches Station D at 08:20
        assert_eq!(body.last_event, Some(140.0));
        assert_eq!(body.trains.len(), 3);
    }

    #[tokio::test]
    async fn paths_for_every_train() {
        let Json(body) = get_paths(State(state())).await;
        assert_eq!(body.trains.len(), 3);
        // T3: travel, dwell at C, travel
        assert_eq!(body.trains[2].segments.len(), 3);
    }

    #[tokio::test]
    async fn axis_defaults_to_configured_step() {
        let Json(body) = get_axis(State(state()), Query(AxisRequest { step: None }))
            .await
            .unwrap();
        assert_eq!(body.ticks.len(), 9);
        assert_eq!(body.ticks[1].label, "06:30");
    }

    #[tokio::test]
    async fn axis_rejects_zero_step() {
        let err = get_axis(State(state()), Query(AxisRequest { step: Some(0) }))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn control_round_trip() {
        let state = state();

        let Json(frame) = get_frame(State(state.clone())).await;
        assert_eq!(frame.minutes, 0);
        assert!(frame.controls.can_start);

        let Json(frame) = set_speed(State(state.clone()), Json(SpeedRequest { speed: 10 })).await;
        assert_eq!(frame.speed, 10);

        let Json(frame) = start(State(state.clone())).await;
        assert_eq!(frame.phase, ClockPhase::Running);
        assert!(frame.controls.can_stop);

        tokio::time::sleep(std::time::Duration::from_millis(250)).await;
        let Json(frame) = stop(State(state.clone())).await;
        assert_eq!(frame.minutes, 20);
        assert_eq!(frame.label, "06:20");
        assert_eq!(frame.phase, ClockPhase::StoppedMidway);

        let Json(frame) = reset(State(state.clone())).await;
        assert_eq!(frame.minutes, 0);
        assert_eq!(frame.phase, ClockPhase::StoppedAtZero);
    }
}
