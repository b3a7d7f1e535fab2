//! Timetable sources.
//!
//! A timetable is either the built-in reference data or a JSON file with
//! the shape:
//!
//! ```json
//! {
//!   "stations": [{ "name": "Station A", "distance": 0 }],
//!   "trains": [{
//!     "id": "T1",
//!     "color": "blue",
//!     "schedule": [{ "stationName": "Station A", "arrival": null, "departure": 10 }]
//!   }]
//! }
//! ```

mod error;
mod reference;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Station, Timetable, Train};

pub use error::LoadError;
pub use reference::reference;

/// Serialized form of a timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableFile {
    pub stations: Vec<Station>,
    pub trains: Vec<Train>,
}

impl TimetableFile {
    /// Validate into a timetable.
    pub fn into_timetable(self) -> Result<Timetable, LoadError> {
        Ok(Timetable::new(self.stations, self.trains)?)
    }
}

impl From<&Timetable> for TimetableFile {
    fn from(timetable: &Timetable) -> Self {
        Self {
            stations: timetable.topology().stations().to_vec(),
            trains: timetable.trains().to_vec(),
        }
    }
}

/// Parse and validate a timetable from JSON text.
pub fn from_json(json: &str) -> Result<Timetable, LoadError> {
    let file: TimetableFile = serde_json::from_str(json)?;
    file.into_timetable()
}

/// Load and validate a timetable from a JSON file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Timetable, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let timetable = from_json(&json)?;
    info!(
        path = %path.display(),
        stations = timetable.topology().len(),
        trains = timetable.trains().len(),
        "Loaded timetable"
    );
    Ok(timetable)
}
