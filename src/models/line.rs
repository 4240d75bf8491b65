use serde::Serialize;
use super::{LineId, Section, StationId};
use crate::error::{Result, SubwayError};

/// A named subway route: an ordered chain of sections.
///
/// `sections` is always stored head to tail, so the down station of each
/// section is the up station of the next one and no station repeats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub color: String,
    sections: Vec<Section>,
}

impl Line {
    /// Create a line without sections. It only stays empty until the first
    /// section is registered.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: LineId::generate(),
            name: name.into(),
            color: color.into(),
            sections: Vec::new(),
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Up station of the first section
    #[must_use]
    pub fn head(&self) -> Option<StationId> {
        self.sections.first().map(Section::up_station)
    }

    /// Down station of the last section
    #[must_use]
    pub fn tail(&self) -> Option<StationId> {
        self.sections.last().map(Section::down_station)
    }

    /// Stations in order from head to tail
    #[must_use]
    pub fn stations(&self) -> Vec<StationId> {
        let Some(head) = self.head() else {
            return Vec::new();
        };

        let mut stations = Vec::with_capacity(self.sections.len() + 1);
        stations.push(head);
        stations.extend(self.sections.iter().map(Section::down_station));
        stations
    }

    #[must_use]
    pub fn contains_station(&self, station: StationId) -> bool {
        self.sections.iter().any(|section| section.has_station(station))
    }

    pub fn update(&mut self, name: impl Into<String>, color: impl Into<String>) {
        self.name = name.into();
        self.color = color.into();
    }

    /// Add a section to the line, splitting an existing section when the new
    /// one lands between two stations.
    ///
    /// Nothing changes when the section is rejected.
    ///
    /// # Errors
    /// Returns `SubwayError::InvalidArgument` if both or neither endpoints are
    /// already on the line, or if a split section is not strictly shorter
    pub fn register_section(&mut self, section: Section) -> Result<()> {
        if self.sections.is_empty() {
            self.sections.push(section);
            return Ok(());
        }

        let has_up = self.contains_station(section.up_station());
        let has_down = self.contains_station(section.down_station());

        if has_up && has_down {
            return Err(SubwayError::invalid_argument(format!(
                "stations {} and {} are both already on line {}",
                section.up_station(), section.down_station(), self.name
            )));
        }
        if !has_up && !has_down {
            return Err(SubwayError::invalid_argument(format!(
                "neither station {} nor {} is on line {}",
                section.up_station(), section.down_station(), self.name
            )));
        }

        // Inside the chain: the new section shares its up station with an
        // existing up station, or its down station with an existing down station
        let split_at = self.sections.iter().position(|existing| {
            existing.up_station() == section.up_station() || existing.down_station() == section.down_station()
        });

        if let Some(index) = split_at {
            let (first, second) = self.sections[index].split(&section)?;
            self.sections.splice(index..=index, [first, second]);
            return Ok(());
        }

        if self.tail() == Some(section.up_station()) {
            self.sections.push(section);
        } else if self.head() == Some(section.down_station()) {
            self.sections.insert(0, section);
        } else {
            // Unreachable while the chain invariant holds
            return Err(SubwayError::invalid_argument(format!(
                "section {} -> {} does not connect to line {}",
                section.up_station(), section.down_station(), self.name
            )));
        }

        Ok(())
    }

    /// Remove a station from the line, joining its neighbouring sections
    ///
    /// Nothing changes when the deletion is rejected.
    ///
    /// # Errors
    /// Returns `SubwayError::InvalidArgument` if the line has a single
    /// section or the station is not on the line
    pub fn delete_section(&mut self, station: StationId) -> Result<()> {
        if self.sections.len() <= 1 {
            return Err(SubwayError::invalid_argument(format!(
                "line {} must keep at least one section",
                self.name
            )));
        }
        if !self.contains_station(station) {
            return Err(SubwayError::invalid_argument(format!(
                "station {station} is not on line {}",
                self.name
            )));
        }

        if self.head() == Some(station) {
            self.sections.remove(0);
            return Ok(());
        }
        if self.tail() == Some(station) {
            self.sections.pop();
            return Ok(());
        }

        // Interior station: it is the down station of section i and the up
        // station of section i + 1
        let Some(index) = self.sections.iter().position(|s| s.down_station() == station) else {
            return Err(SubwayError::invalid_argument(format!(
                "station {station} is not on line {}",
                self.name
            )));
        };
        let merged = self.sections[index].merge(&self.sections[index + 1])?;
        self.sections.splice(index..=index + 1, [merged]);

        Ok(())
    }
}
