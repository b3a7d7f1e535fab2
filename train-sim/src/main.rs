use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use train_sim::config::SimConfig;
use train_sim::domain::Timetable;
use train_sim::sim::TracingSink;
use train_sim::timetable::{self, LoadError};
use train_sim::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Configuration and timetable (fail fast if either is invalid)
    let config = SimConfig::from_env().unwrap_or_else(|e| {
        error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });
    let timetable = load_timetable(&config).unwrap_or_else(|e| {
        error!(error = %e, "Failed to load timetable");
        std::process::exit(1);
    });

    info!(
        window_start = %config.window_start,
        window_end = %config.window_end,
        tick_ms = config.tick_interval_ms,
        speed = config.initial_speed,
        trains = timetable.trains().len(),
        "Simulation ready"
    );

    let addr = config.addr;
    let state = AppState::new(timetable, config, TracingSink);
    let app = create_router(state);

    info!("Train simulation listening on http://{addr}");
    info!("  GET  /api/timetable  - Stations and schedules");
    info!("  GET  /api/paths      - Time-distance path segments");
    info!("  GET  /api/axis       - Time-axis ticks (?step=minutes)");
    info!("  GET  /api/frame      - Latest frame");
    info!("  POST /api/start      - Start the clock");
    info!("  POST /api/stop       - Stop the clock");
    info!("  POST /api/reset      - Rewind to the window start");
    info!("  POST /api/speed      - Set minutes per tick");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}

fn load_timetable(config: &SimConfig) -> Result<Timetable, LoadError> {
    match &config.timetable_path {
        Some(path) => timetable::load_file(path),
        None => {
            info!("Using built-in reference timetable");
            Ok(timetable::reference()?)
        }
    }
}
