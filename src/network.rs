//! Thread-safe facade over stations, lines and path queries.
//!
//! Lock order is always: station registry, then the line table, then a single
//! line. Mutating a line holds only that line's write lock, so splices on one
//! line are serialized while other lines stay readable. Path queries copy each
//! line under its read lock and never see a half-applied splice.

mod dto;

pub use dto::{LineRequest, LineResponse, LineUpdateRequest, PathResponse, SectionRequest, StationRequest};

use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::error::{Result, SubwayError};
use crate::models::{Line, LineId, Section, Station, StationId, StationRegistry};
use crate::path::{find_path, NetworkGraph, PathFindType};

// Every mutation is all-or-nothing, so the data behind a poisoned lock is
// still consistent.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn validate_line_fields(name: &str, color: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SubwayError::invalid_argument("line name must not be blank"));
    }
    if color.trim().is_empty() {
        return Err(SubwayError::invalid_argument("line color must not be blank"));
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct SubwayNetwork {
    stations: RwLock<StationRegistry>,
    lines: RwLock<IndexMap<LineId, Arc<RwLock<Line>>>>,
}

impl SubwayNetwork {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Stations
    // ------------------------------------------------------------------

    /// # Errors
    /// Returns `SubwayError::InvalidArgument` if the name is blank
    pub fn create_station(&self, name: impl Into<String>) -> Result<Station> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SubwayError::invalid_argument("station name must not be blank"));
        }

        let station = write(&self.stations).add(name);
        log::debug!("Created station {} ({})", station.id, station.name);
        Ok(station)
    }

    /// # Errors
    /// Returns `SubwayError::NotFound` if the station does not exist
    pub fn station(&self, id: StationId) -> Result<Station> {
        read(&self.stations).require(id).cloned()
    }

    #[must_use]
    pub fn stations(&self) -> Vec<Station> {
        read(&self.stations).iter().cloned().collect()
    }

    #[must_use]
    pub fn find_station_by_name(&self, name: &str) -> Option<Station> {
        read(&self.stations).find_by_name(name).cloned()
    }

    /// Remove a station that no line uses
    ///
    /// # Errors
    /// - `SubwayError::NotFound` if the station does not exist
    /// - `SubwayError::InvalidArgument` if a line still passes through it
    pub fn delete_station(&self, id: StationId) -> Result<()> {
        let mut stations = write(&self.stations);
        stations.require(id)?;

        let lines = read(&self.lines);
        if let Some(line) = lines.values().map(|line| read(line)).find(|line| line.contains_station(id)) {
            return Err(SubwayError::invalid_argument(format!(
                "station {id} is still used by line {}",
                line.name
            )));
        }

        stations.remove(id);
        log::debug!("Deleted station {id}");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lines
    // ------------------------------------------------------------------

    /// Create a line together with its first section
    ///
    /// # Errors
    /// - `SubwayError::NotFound` if either station does not exist
    /// - `SubwayError::InvalidArgument` if the name or color is blank or the
    ///   section is invalid
    pub fn create_line(&self, request: LineRequest) -> Result<LineResponse> {
        validate_line_fields(&request.name, &request.color)?;

        let stations = read(&self.stations);
        stations.require(request.up_station_id)?;
        stations.require(request.down_station_id)?;
        let section = Section::new(request.up_station_id, request.down_station_id, request.distance, request.duration)?;

        let mut line = Line::new(request.name, request.color);
        line.register_section(section)?;
        log::debug!("Created line {} ({})", line.id, line.name);

        let response = Self::line_response(&stations, &line);
        write(&self.lines).insert(line.id, Arc::new(RwLock::new(line)));
        Ok(response)
    }

    /// # Errors
    /// Returns `SubwayError::NotFound` if the line does not exist
    pub fn line(&self, id: LineId) -> Result<LineResponse> {
        let stations = read(&self.stations);
        let line = self.line_handle(id)?;
        let line = read(&line);
        Ok(Self::line_response(&stations, &line))
    }

    #[must_use]
    pub fn lines(&self) -> Vec<LineResponse> {
        let stations = read(&self.stations);
        read(&self.lines)
            .values()
            .map(|line| Self::line_response(&stations, &read(line)))
            .collect()
    }

    /// Stations of a line from head to tail
    ///
    /// # Errors
    /// Returns `SubwayError::NotFound` if the line does not exist
    pub fn line_stations(&self, id: LineId) -> Result<Vec<Station>> {
        self.line(id).map(|line| line.stations)
    }

    /// # Errors
    /// - `SubwayError::NotFound` if the line does not exist
    /// - `SubwayError::InvalidArgument` if the name or color is blank
    pub fn update_line(&self, id: LineId, request: LineUpdateRequest) -> Result<()> {
        validate_line_fields(&request.name, &request.color)?;

        let line = self.line_handle(id)?;
        write(&line).update(request.name, request.color);
        Ok(())
    }

    /// # Errors
    /// Returns `SubwayError::NotFound` if the line does not exist
    pub fn delete_line(&self, id: LineId) -> Result<()> {
        write(&self.lines)
            .shift_remove(&id)
            .ok_or_else(|| SubwayError::not_found(format!("line {id}")))?;

        log::debug!("Deleted line {id}");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------

    /// Register a section on a line
    ///
    /// # Errors
    /// - `SubwayError::NotFound` if the line or either station does not exist
    /// - `SubwayError::InvalidArgument` if the section breaks the line's chain
    pub fn register_section(&self, line_id: LineId, request: SectionRequest) -> Result<()> {
        let stations = read(&self.stations);
        stations.require(request.up_station_id)?;
        stations.require(request.down_station_id)?;
        let section = Section::new(request.up_station_id, request.down_station_id, request.distance, request.duration)?;

        let line = self.line_handle(line_id)?;
        let mut line = write(&line);
        line.register_section(section)?;

        log::debug!(
            "Registered section {} -> {} ({}) on line {}",
            section.up_station(), section.down_station(), section.distance(), line.name
        );
        Ok(())
    }

    /// Remove a station from a line
    ///
    /// # Errors
    /// - `SubwayError::NotFound` if the line or station does not exist
    /// - `SubwayError::InvalidArgument` if the line has a single section or
    ///   does not contain the station
    pub fn delete_section(&self, line_id: LineId, station_id: StationId) -> Result<()> {
        let stations = read(&self.stations);
        stations.require(station_id)?;

        let line = self.line_handle(line_id)?;
        let mut line = write(&line);
        line.delete_section(station_id)?;

        log::debug!("Removed station {station_id} from line {}", line.name);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------

    /// Shortest route between two stations across all lines
    ///
    /// # Errors
    /// - `SubwayError::InvalidArgument` if start and end are the same station
    /// - `SubwayError::NotFound` if either station does not exist, is on no
    ///   line, or no route connects them
    pub fn find_shortest_path(&self, start: StationId, end: StationId, mode: PathFindType) -> Result<PathResponse> {
        if start == end {
            return Err(SubwayError::invalid_argument(format!(
                "start and end of a path must differ (station {start})"
            )));
        }

        #[cfg(feature = "perf_timing")]
        let started = std::time::Instant::now();

        let stations = read(&self.stations);
        stations.require(start)?;
        stations.require(end)?;

        let graph = NetworkGraph::build(&self.snapshot(), mode);
        let path = find_path(&graph, start, end)?;

        #[cfg(feature = "perf_timing")]
        log::debug!("Path query {start} -> {end} ({mode}) took {:?}", started.elapsed());

        Ok(PathResponse {
            stations: path.stations.iter().filter_map(|id| stations.get(*id).cloned()).collect(),
            distance: path.distance,
            duration: path.duration,
        })
    }

    /// Copy of every line, each taken under its own read lock
    #[must_use]
    pub fn snapshot(&self) -> Vec<Line> {
        read(&self.lines).values().map(|line| read(line).clone()).collect()
    }

    fn line_handle(&self, id: LineId) -> Result<Arc<RwLock<Line>>> {
        read(&self.lines)
            .get(&id)
            .cloned()
            .ok_or_else(|| SubwayError::not_found(format!("line {id}")))
    }

    fn line_response(stations: &StationRegistry, line: &Line) -> LineResponse {
        LineResponse {
            id: line.id,
            name: line.name.clone(),
            color: line.color.clone(),
            stations: line.stations().into_iter().filter_map(|id| stations.get(id).cloned()).collect(),
        }
    }
}
