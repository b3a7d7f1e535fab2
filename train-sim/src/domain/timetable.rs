//! A validated timetable: topology plus train schedules.

use std::collections::HashSet;

use tracing::warn;

use super::{DomainError, Station, Stop, Topology, Train};

/// Stations and trains for one simulation run.
///
/// Construction validates every schedule, so the engine can rely on stops
/// being in chronological order. References to unknown stations are kept
/// (and logged) rather than rejected: the engine skips such stops so that a
/// single bad record does not hide every other train.
#[derive(Debug, Clone)]
pub struct Timetable {
    topology: Topology,
    trains: Vec<Train>,
}

impl Timetable {
    /// Build and validate a timetable.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_sim::domain::{Station, Stop, Timetable, Train};
    ///
    /// let timetable = Timetable::new(
    ///     vec![Station::new("Station A", 0.0), Station::new("Station B", 30.0)],
    ///     vec![Train::new(
    ///         "T1",
    ///         "blue",
    ///         vec![Stop::origin("Station A", 10.0), Stop::terminus("Station B", 40.0)],
    ///     )],
    /// )
    /// .unwrap();
    /// assert_eq!(timetable.trains().len(), 1);
    ///
    /// // Arriving before departing the previous stop is rejected
    /// let bad = Timetable::new(
    ///     vec![Station::new("Station A", 0.0), Station::new("Station B", 30.0)],
    ///     vec![Train::new(
    ///         "T1",
    ///         "blue",
    ///         vec![Stop::origin("Station A", 50.0), Stop::terminus("Station B", 40.0)],
    ///     )],
    /// );
    /// assert!(bad.is_err());
    /// ```
    pub fn new(stations: Vec<Station>, trains: Vec<Train>) -> Result<Self, DomainError> {
        let topology = Topology::new(stations)?;

        let mut seen = HashSet::with_capacity(trains.len());
        for train in &trains {
            if !seen.insert(&train.id) {
                return Err(DomainError::DuplicateTrain(train.id.clone()));
            }
            validate_schedule(train)?;

            if train.schedule.is_empty() {
                warn!(train = %train.id, "train has no stops and will never be shown");
            }
            for stop in &train.schedule {
                if topology.get(&stop.station).is_none() {
                    warn!(
                        train = %train.id,
                        station = %stop.station,
                        "stop references unknown station, skipping it"
                    );
                }
            }
        }

        Ok(Self { topology, trains })
    }

    /// The line's stations.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// All trains, in load order.
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Latest scheduled time of any stop, if any stop has a time.
    pub fn last_event(&self) -> Option<f64> {
        self.trains
            .iter()
            .flat_map(|t| t.schedule.iter())
            .filter_map(Stop::latest)
            .reduce(f64::max)
    }
}

/// Check a single train's schedule for ordering and completeness.
fn validate_schedule(train: &Train) -> Result<(), DomainError> {
    let last = train.schedule.len().saturating_sub(1);

    for (index, stop) in train.schedule.iter().enumerate() {
        for value in [stop.arrival, stop.departure].into_iter().flatten() {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidTime {
                    train: train.id.clone(),
                    index,
                    value,
                });
            }
        }

        if index > 0 && stop.arrival.is_none() {
            return Err(DomainError::MissingTime {
                train: train.id.clone(),
                index,
                which: "arrival",
            });
        }
        if index < last && stop.departure.is_none() {
            return Err(DomainError::MissingTime {
                train: train.id.clone(),
                index,
                which: "departure",
            });
        }

        if let Some((arrival, departure)) = stop.dwell() {
            if departure < arrival {
                return Err(DomainError::DepartureBeforeArrival {
                    train: train.id.clone(),
                    index,
                });
            }
        }
    }

    for (index, pair) in train.schedule.windows(2).enumerate() {
        if let (Some(left), Some(reached)) = (pair[0].latest(), pair[1].earliest()) {
            if left > reached {
                return Err(DomainError::OutOfOrder {
                    train: train.id.clone(),
                    index: index + 1,
                });
            }
        }
    }

    Ok(())
}
