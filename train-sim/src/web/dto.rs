//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{AxisTick, Station, Train};
use crate::engine::TrainPath;

/// The simulated time window.
#[derive(Debug, Serialize)]
pub struct WindowInfo {
    /// Wall-clock start ("HH:MM")
    pub start: String,

    /// Wall-clock end ("HH:MM")
    pub end: String,

    /// Window length in minutes
    pub total_minutes: u32,
}

/// Response for the timetable endpoint.
#[derive(Debug, Serialize)]
pub struct TimetableResponse {
    pub window: WindowInfo,

    /// Stations ordered by distance
    pub stations: Vec<Station>,

    /// Span of the line
    pub max_distance: f64,

    /// Latest scheduled minute of any stop
    pub last_event: Option<f64>,

    pub trains: Vec<Train>,
}

/// Response for the path geometry endpoint.
#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub trains: Vec<TrainPath>,
}

/// Query for time-axis ticks.
#[derive(Debug, Deserialize)]
pub struct AxisRequest {
    /// Minutes between ticks (defaults to the configured step)
    pub step: Option<u32>,
}

/// Response for the time-axis endpoint.
#[derive(Debug, Serialize)]
pub struct AxisResponse {
    pub ticks: Vec<AxisTick>,
}

/// Request to change the simulation speed.
#[derive(Debug, Deserialize)]
pub struct SpeedRequest {
    /// Simulated minutes per tick
    pub speed: i32,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_request_parses() {
        let req: SpeedRequest = serde_json::from_str(r#"{ "speed": 5 }"#).unwrap();
        assert_eq!(req.speed, 5);
    }

    #[test]
    fn axis_request_step_optional() {
        let req: AxisRequest = serde_json::from_str("{}").unwrap();
        assert!(req.step.is_none());
    }

    #[test]
    fn window_serializes() {
        let window = WindowInfo {
            start: "06:00".into(),
            end: "10:00".into(),
            total_minutes: 240,
        };
        let json = serde_json::to_value(&window).unwrap();
        assert_eq!(json["total_minutes"], 240);
        assert_eq!(json["start"], "06:00");
    }
}
