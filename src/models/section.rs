use serde::{Deserialize, Serialize};
use super::StationId;
use crate::error::{Result, SubwayError};

/// The atomic directed edge between two adjacent stations of a line.
///
/// Sections are immutable: splitting or merging always produces new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    up_station: StationId,
    down_station: StationId,
    distance: u64,
    #[serde(default)]
    duration: u64,
}

impl Section {
    /// Create a section, validating its endpoints and distance
    ///
    /// # Errors
    /// Returns `SubwayError::InvalidArgument` if `distance` is zero or both
    /// endpoints are the same station
    pub fn new(up_station: StationId, down_station: StationId, distance: u64, duration: u64) -> Result<Self> {
        if up_station == down_station {
            return Err(SubwayError::invalid_argument(format!(
                "section cannot start and end at station {up_station}"
            )));
        }
        if distance == 0 {
            return Err(SubwayError::invalid_argument("section distance must be positive"));
        }

        Ok(Self { up_station, down_station, distance, duration })
    }

    #[must_use]
    pub fn up_station(&self) -> StationId {
        self.up_station
    }

    #[must_use]
    pub fn down_station(&self) -> StationId {
        self.down_station
    }

    #[must_use]
    pub fn distance(&self) -> u64 {
        self.distance
    }

    #[must_use]
    pub fn duration(&self) -> u64 {
        self.duration
    }

    #[must_use]
    pub fn has_station(&self, station: StationId) -> bool {
        self.up_station == station || self.down_station == station
    }

    /// Split this section around `inner`, which shares exactly one endpoint
    /// with it. Returns the two replacement sections in head-to-tail order.
    ///
    /// # Errors
    /// Returns `SubwayError::InvalidArgument` if `inner` is not strictly
    /// shorter or shares no endpoint
    pub fn split(&self, inner: &Section) -> Result<(Section, Section)> {
        if inner.distance >= self.distance {
            return Err(SubwayError::invalid_argument(format!(
                "new section distance {} must be shorter than the existing {}",
                inner.distance, self.distance
            )));
        }
        // Durations are optional, so an untimed section can be split by a timed one
        let remaining_duration = self.duration.saturating_sub(inner.duration);
        let remaining_distance = self.distance - inner.distance;

        if inner.up_station == self.up_station {
            // A -> B split by A -> C gives A -> C, C -> B
            let remainder = Section::new(inner.down_station, self.down_station, remaining_distance, remaining_duration)?;
            Ok((*inner, remainder))
        } else if inner.down_station == self.down_station {
            // A -> B split by C -> B gives A -> C, C -> B
            let remainder = Section::new(self.up_station, inner.up_station, remaining_distance, remaining_duration)?;
            Ok((remainder, *inner))
        } else {
            Err(SubwayError::invalid_argument("sections share no endpoint to split on"))
        }
    }

    /// Join this section with the one directly after it
    ///
    /// # Errors
    /// Returns `SubwayError::InvalidArgument` if the sections are not adjacent
    /// or the combined distance overflows
    pub fn merge(&self, next: &Section) -> Result<Section> {
        if self.down_station != next.up_station {
            return Err(SubwayError::invalid_argument(format!(
                "section ending at {} cannot be merged with one starting at {}",
                self.down_station, next.up_station
            )));
        }
        let distance = self.distance.checked_add(next.distance)
            .ok_or_else(|| SubwayError::invalid_argument("merged distance overflows"))?;
        let duration = self.duration.checked_add(next.duration)
            .ok_or_else(|| SubwayError::invalid_argument("merged duration overflows"))?;

        Section::new(self.up_station, next.down_station, distance, duration)
    }
}
