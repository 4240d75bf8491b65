use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use std::collections::HashMap;
use super::PathFindType;
use crate::models::{Line, Section, StationId};

/// Edge weights carried over from a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionEdge {
    pub distance: u64,
    pub duration: u64,
}

impl From<&Section> for SectionEdge {
    fn from(section: &Section) -> Self {
        Self {
            distance: section.distance(),
            duration: section.duration(),
        }
    }
}

/// Request-scoped projection of every line into one weighted graph.
///
/// Each section becomes its own undirected edge. Parallel edges between the
/// same pair of stations are kept; the search picks the cheapest.
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    pub graph: UnGraph<StationId, SectionEdge>,
    pub station_to_index: HashMap<StationId, NodeIndex>,
    pub mode: PathFindType,
}

impl NetworkGraph {
    #[must_use]
    pub fn new(mode: PathFindType) -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            station_to_index: HashMap::new(),
            mode,
        }
    }

    /// Flatten `lines` into a graph weighted for `mode`
    ///
    /// Vertices are added in line order, then head to tail within a line.
    #[must_use]
    pub fn build(lines: &[Line], mode: PathFindType) -> Self {
        let mut network = Self::new(mode);
        for line in lines {
            for section in line.sections() {
                network.add_section(section);
            }
        }

        log::debug!(
            "Built {mode} graph: {} stations, {} sections from {} lines",
            network.graph.node_count(),
            network.graph.edge_count(),
            lines.len()
        );
        network
    }

    /// Add a station node if it doesn't exist, return its `NodeIndex`
    pub fn add_or_get_station(&mut self, station: StationId) -> NodeIndex {
        if let Some(&index) = self.station_to_index.get(&station) {
            index
        } else {
            let index = self.graph.add_node(station);
            self.station_to_index.insert(station, index);
            index
        }
    }

    pub fn add_section(&mut self, section: &Section) -> EdgeIndex {
        let up = self.add_or_get_station(section.up_station());
        let down = self.add_or_get_station(section.down_station());
        self.graph.add_edge(up, down, SectionEdge::from(section))
    }

    #[must_use]
    pub fn get_station_index(&self, station: StationId) -> Option<NodeIndex> {
        self.station_to_index.get(&station).copied()
    }

    #[must_use]
    pub fn get_station(&self, index: NodeIndex) -> Option<StationId> {
        self.graph.node_weight(index).copied()
    }

    /// Weight of an edge under the graph's mode
    #[must_use]
    pub fn weight(&self, edge: EdgeIndex) -> Option<u64> {
        self.graph.edge_weight(edge).map(|weight| self.mode.weight(weight))
    }
}
