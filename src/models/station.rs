use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use super::StationId;
use crate::error::{Result, SubwayError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

/// Identity store for stations, kept in registration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationRegistry {
    stations: IndexMap<StationId, Station>,
    next_id: u64,
}

impl StationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stations: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Register a new station and return it
    pub fn add(&mut self, name: impl Into<String>) -> Station {
        let id = StationId(self.next_id);
        self.next_id += 1;

        let station = Station { id, name: name.into() };
        self.stations.insert(id, station.clone());
        station
    }

    #[must_use]
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Look a station up, failing with `NotFound` when it was never registered
    ///
    /// # Errors
    /// Returns `SubwayError::NotFound` if no station has this id
    pub fn require(&self, id: StationId) -> Result<&Station> {
        self.get(id)
            .ok_or_else(|| SubwayError::not_found(format!("station {id}")))
    }

    /// Find the first station registered under `name`
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Station> {
        self.stations.values().find(|station| station.name == name)
    }

    #[must_use]
    pub fn contains(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    /// Remove a station, returning it if it existed
    pub fn remove(&mut self, id: StationId) -> Option<Station> {
        // shift_remove keeps the remaining stations in registration order
        self.stations.shift_remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
