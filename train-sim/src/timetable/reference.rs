//! The built-in reference timetable.
//!
//! Five stations on a 100-unit line and three trains: T1 runs A to D with
//! calls at B and C, T2 runs the other way, and T3 runs A to D calling only
//! at C.

use crate::domain::{DomainError, Station, Stop, Timetable, Train};

/// Build the reference timetable.
pub fn reference() -> Result<Timetable, DomainError> {
    let stations = vec![
        Station::new("Station A", 0.0),
        Station::new("Station B", 30.0),
        Station::new("Junction X", 55.0),
        Station::new("Station C", 80.0),
        Station::new("Station D", 100.0),
    ];

    let trains = vec![
        Train::new(
            "T1",
            "blue",
            vec![
                Stop::origin("Station A", 10.0), // 06:10
                Stop::call("Station B", 40.0, 45.0), // 06:40 - 06:45
                Stop::call("Station C", 80.0, 85.0), // 07:20 - 07:25
                Stop::terminus("Station D", 110.0), // 07:50
            ],
        ),
        Train::new(
            "T2",
            "green",
            vec![
                Stop::origin("Station D", 20.0), // 06:20
                Stop::call("Station C", 45.0, 50.0), // 06:45 - 06:50
                Stop::call("Station B", 85.0, 90.0), // 07:25 - 07:30
                Stop::terminus("Station A", 125.0), // 08:05
            ],
        ),
        Train::new(
            "T3",
            "purple",
            vec![
                Stop::origin("Station A", 60.0), // 07:00
                Stop::call("Station C", 115.0, 120.0), // 07:55 - 08:00
                Stop::terminus("Station D", 140.0), // 08:20
            ],
        ),
    ];

    Timetable::new(stations, trains)
}
