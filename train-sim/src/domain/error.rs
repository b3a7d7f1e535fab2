//! Domain error types.
//!
//! These errors represent validation failures when a timetable is assembled
//! from stations and train schedules. They are distinct from IO and parse
//! errors raised while reading a timetable file.

use super::TrainId;

/// Domain-level errors for timetable validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Topology contains no stations
    #[error("topology must have at least one station")]
    EmptyTopology,

    /// Two stations share a name
    #[error("duplicate station name: {0}")]
    DuplicateStation(String),

    /// Station distance is negative, NaN or infinite
    #[error("station {station} has invalid distance {distance}")]
    InvalidDistance { station: String, distance: f64 },

    /// Two trains share an id
    #[error("duplicate train id: {0}")]
    DuplicateTrain(TrainId),

    /// A stop time is negative, NaN or infinite
    #[error("train {train} stop {index}: invalid time {value}")]
    InvalidTime {
        train: TrainId,
        index: usize,
        value: f64,
    },

    /// A stop departs before it arrives
    #[error("train {train} stop {index}: departure is before arrival")]
    DepartureBeforeArrival { train: TrainId, index: usize },

    /// A stop is reached before the previous stop is left
    #[error("train {train} stop {index}: schedule is not in chronological order")]
    OutOfOrder { train: TrainId, index: usize },

    /// An intermediate stop is missing a time it needs
    #[error("train {train} stop {index}: missing {which} time")]
    MissingTime {
        train: TrainId,
        index: usize,
        which: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyTopology;
        assert_eq!(err.to_string(), "topology must have at least one station");

        let err = DomainError::DuplicateStation("Station A".into());
        assert_eq!(err.to_string(), "duplicate station name: Station A");

        let err = DomainError::InvalidDistance {
            station: "Station A".into(),
            distance: -1.0,
        };
        assert_eq!(err.to_string(), "station Station A has invalid distance -1");

        let err = DomainError::DuplicateTrain(TrainId::new("T1"));
        assert_eq!(err.to_string(), "duplicate train id: T1");

        let err = DomainError::OutOfOrder {
            train: TrainId::new("T2"),
            index: 2,
        };
        assert_eq!(
            err.to_string(),
            "train T2 stop 2: schedule is not in chronological order"
        );

        let err = DomainError::MissingTime {
            train: TrainId::new("T3"),
            index: 1,
            which: "arrival",
        };
        assert_eq!(err.to_string(), "train T3 stop 1: missing arrival time");
    }
}
