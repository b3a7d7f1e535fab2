//! Stations and the linear track topology.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A point on the line with a fixed linear distance coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station name, referenced by schedule stops
    pub name: String,
    /// Distance along the line from its zero point
    pub distance: f64,
}

impl Station {
    /// Creates a new station.
    pub fn new(name: impl Into<String>, distance: f64) -> Self {
        Self {
            name: name.into(),
            distance,
        }
    }
}

/// The ordered set of stations making up a single-track line.
///
/// Built once at load and never mutated. Name lookups go through an index
/// map so the resolver never scans the station list.
///
/// # Examples
///
/// ```
/// use train_sim::domain::{Station, Topology};
///
/// let topology = Topology::new(vec![
///     Station::new("Station B", 30.0),
///     Station::new("Station A", 0.0),
/// ])
/// .unwrap();
///
/// // Stations are ordered by distance
/// assert_eq!(topology.stations()[0].name, "Station A");
/// assert_eq!(topology.max_distance(), 30.0);
/// assert_eq!(topology.distance_of("Station B"), Some(30.0));
/// assert_eq!(topology.distance_of("Nowhere"), None);
/// ```
#[derive(Debug, Clone)]
pub struct Topology {
    stations: Vec<Station>,
    by_name: HashMap<String, usize>,
    max_distance: f64,
}

impl Topology {
    /// Build a topology, ordering stations by distance.
    ///
    /// Rejects an empty station list, duplicate names, and distances that
    /// are negative or not finite.
    pub fn new(mut stations: Vec<Station>) -> Result<Self, DomainError> {
        if stations.is_empty() {
            return Err(DomainError::EmptyTopology);
        }

        for station in &stations {
            if !station.distance.is_finite() || station.distance < 0.0 {
                return Err(DomainError::InvalidDistance {
                    station: station.name.clone(),
                    distance: station.distance,
                });
            }
        }

        stations.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let mut by_name = HashMap::with_capacity(stations.len());
        for (idx, station) in stations.iter().enumerate() {
            if by_name.insert(station.name.clone(), idx).is_some() {
                return Err(DomainError::DuplicateStation(station.name.clone()));
            }
        }

        let max_distance = stations
            .iter()
            .map(|s| s.distance)
            .fold(0.0_f64, f64::max);

        Ok(Self {
            stations,
            by_name,
            max_distance,
        })
    }

    /// Stations ordered by distance.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Look up a station by name.
    pub fn get(&self, name: &str) -> Option<&Station> {
        self.by_name.get(name).map(|&idx| &self.stations[idx])
    }

    /// Distance of the named station, if it exists.
    pub fn distance_of(&self, name: &str) -> Option<f64> {
        self.get(name).map(|s| s.distance)
    }

    /// Total span of the line.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Position of `distance` as a fraction of the line's span.
    ///
    /// Returns 0 for a line whose span is zero.
    pub fn fraction(&self, distance: f64) -> f64 {
        if self.max_distance > 0.0 {
            distance / self.max_distance
        } else {
            0.0
        }
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always false; a topology holds at least one station.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Topology {
        Topology::new(vec![
            Station::new("Station A", 0.0),
            Station::new("Station B", 30.0),
            Station::new("Junction X", 55.0),
            Station::new("Station C", 80.0),
            Station::new("Station D", 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_by_name() {
        let topology = line();
        assert_eq!(topology.distance_of("Junction X"), Some(55.0));
        assert_eq!(topology.get("Station D").unwrap().name, "Station D");
        assert!(topology.get("station d").is_none());
    }

    #[test]
    fn max_distance_is_largest() {
        assert_eq!(line().max_distance(), 100.0);
    }

    #[test]
    fn sorts_by_distance() {
        let topology = Topology::new(vec![
            Station::new("Far", 90.0),
            Station::new("Near", 10.0),
            Station::new("Middle", 50.0),
        ])
        .unwrap();

        let names: Vec<_> = topology.stations().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Near", "Middle", "Far"]);
        assert_eq!(topology.distance_of("Far"), Some(90.0));
    }

    #[test]
    fn fraction_scales_by_span() {
        let topology = line();
        assert_eq!(topology.fraction(0.0), 0.0);
        assert_eq!(topology.fraction(55.0), 0.55);
        assert_eq!(topology.fraction(100.0), 1.0);
    }

    #[test]
    fn fraction_of_zero_span_line() {
        let topology = Topology::new(vec![Station::new("Only", 0.0)]).unwrap();
        assert_eq!(topology.max_distance(), 0.0);
        assert_eq!(topology.fraction(0.0), 0.0);
    }

    #[test]
    fn reject_empty() {
        assert_eq!(Topology::new(vec![]).unwrap_err(), DomainError::EmptyTopology);
    }

    #[test]
    fn reject_duplicate_name() {
        let err = Topology::new(vec![
            Station::new("Station A", 0.0),
            Station::new("Station A", 10.0),
        ])
        .unwrap_err();
        assert_eq!(err, DomainError::DuplicateStation("Station A".into()));
    }

    #[test]
    fn reject_bad_distance() {
        assert!(Topology::new(vec![Station::new("Bad", -5.0)]).is_err());
        assert!(Topology::new(vec![Station::new("Bad", f64::NAN)]).is_err());
        assert!(Topology::new(vec![Station::new("Bad", f64::INFINITY)]).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The span is the maximum distance and every station lies within it
        #[test]
        fn span_covers_all_stations(distances in prop::collection::vec(0.0f64..1000.0, 1..10)) {
            let stations = distances
                .iter()
                .enumerate()
                .map(|(i, d)| Station::new(format!("S{i}"), *d))
                .collect();
            let topology = Topology::new(stations).unwrap();

            let max = distances.iter().cloned().fold(0.0, f64::max);
            prop_assert_eq!(topology.max_distance(), max);
            for station in topology.stations() {
                let fraction = topology.fraction(station.distance);
                prop_assert!((0.0..=1.0).contains(&fraction));
            }
        }

        /// Stations come out sorted by distance
        #[test]
        fn stations_sorted(distances in prop::collection::vec(0.0f64..1000.0, 1..10)) {
            let stations = distances
                .iter()
                .enumerate()
                .map(|(i, d)| Station::new(format!("S{i}"), *d))
                .collect();
            let topology = Topology::new(stations).unwrap();

            for pair in topology.stations().windows(2) {
                prop_assert!(pair[0].distance <= pair[1].distance);
            }
        }
    }
}
