//! Web layer for the train line simulation.
//!
//! Provides HTTP endpoints for reading the timetable, its static path
//! geometry and the live simulation frame, and for controlling the run.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
