use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use super::NetworkGraph;
use crate::error::{Result, SubwayError};
use crate::models::StationId;

/// A route found by [`find_path`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// Stations from start to end, both included
    pub stations: Vec<StationId>,
    /// Total distance of the traversed sections
    pub distance: u64,
    /// Total duration of the traversed sections
    pub duration: u64,
}

/// State for the Dijkstra priority queue
#[derive(Clone, Copy, PartialEq, Eq)]
struct SearchState {
    cost: u64,
    node: NodeIndex,
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; equal costs pop the earlier-added station first
        other.cost.cmp(&self.cost)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the cheapest route between two stations under the graph's mode.
///
/// Ties are broken deterministically: the first predecessor reaching a
/// station at its final cost is kept, with stations expanded in cost order
/// and then in graph insertion order.
///
/// # Errors
/// - `SubwayError::InvalidArgument` if `start` and `end` are the same station
/// - `SubwayError::NotFound` if either station is not on any line, or no
///   route connects them
pub fn find_path(network: &NetworkGraph, start: StationId, end: StationId) -> Result<Path> {
    if start == end {
        return Err(SubwayError::invalid_argument(format!(
            "start and end of a path must differ (station {start})"
        )));
    }
    let source = network.get_station_index(start)
        .ok_or_else(|| SubwayError::not_found(format!("station {start} is not on any line")))?;
    let target = network.get_station_index(end)
        .ok_or_else(|| SubwayError::not_found(format!("station {end} is not on any line")))?;

    let node_count = network.graph.node_count();
    let mut costs: Vec<Option<u64>> = vec![None; node_count];
    let mut previous: Vec<Option<(NodeIndex, EdgeIndex)>> = vec![None; node_count];
    let mut heap = BinaryHeap::new();

    costs[source.index()] = Some(0);
    heap.push(SearchState { cost: 0, node: source });

    while let Some(SearchState { cost, node }) = heap.pop() {
        if node == target {
            break;
        }
        // Stale entry, a cheaper route was already expanded
        if costs[node.index()].is_some_and(|best| cost > best) {
            continue;
        }

        for edge in network.graph.edges(node) {
            let next = if edge.source() == node { edge.target() } else { edge.source() };
            let next_cost = cost.saturating_add(network.mode.weight(edge.weight()));

            if costs[next.index()].map_or(true, |best| next_cost < best) {
                costs[next.index()] = Some(next_cost);
                previous[next.index()] = Some((node, edge.id()));
                heap.push(SearchState { cost: next_cost, node: next });
            }
        }
    }

    if costs[target.index()].is_none() {
        return Err(SubwayError::not_found(format!("no path from station {start} to station {end}")));
    }

    // Walk predecessors back from the target
    let mut stations = vec![end];
    let mut distance = 0;
    let mut duration = 0;
    let mut current = target;
    while let Some((prev, edge)) = previous[current.index()] {
        if let Some(weight) = network.graph.edge_weight(edge) {
            distance = weight.distance.saturating_add(distance);
            duration = weight.duration.saturating_add(duration);
        }
        if let Some(station) = network.get_station(prev) {
            stations.push(station);
        }
        current = prev;
    }
    stations.reverse();

    Ok(Path { stations, distance, duration })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Line, Section};
    use crate::path::PathFindType;

    fn id(n: u64) -> StationId {
        StationId(n)
    }

    fn line(sections: &[(u64, u64, u64, u64)]) -> Line {
        let mut line = Line::new("test", "blue");
        for &(up, down, distance, duration) in sections {
            let section = Section::new(id(up), id(down), distance, duration).expect("valid section");
            line.register_section(section).expect("section registers");
        }
        line
    }

    /// Two routes from 1 to 4: 1-2-4 (300 long, 10 min) and 1-3-4 (250 long, 20 min)
    fn two_route_network() -> Vec<Line> {
        vec![
            line(&[(1, 2, 100, 5), (2, 4, 200, 5)]),
            line(&[(1, 3, 150, 10), (3, 4, 100, 10)]),
        ]
    }

    #[test]
    fn test_shortest_by_distance() {
        let graph = NetworkGraph::build(&two_route_network(), PathFindType::Distance);
        let path = find_path(&graph, id(1), id(4)).expect("path exists");

        assert_eq!(path.stations, vec![id(1), id(3), id(4)]);
        assert_eq!(path.distance, 250);
        assert_eq!(path.duration, 20);
    }

    #[test]
    fn test_shortest_by_duration() {
        let graph = NetworkGraph::build(&two_route_network(), PathFindType::Duration);
        let path = find_path(&graph, id(1), id(4)).expect("path exists");

        assert_eq!(path.stations, vec![id(1), id(2), id(4)]);
        assert_eq!(path.distance, 300);
        assert_eq!(path.duration, 10);
    }

    #[test]
    fn test_sections_are_traversable_in_reverse() {
        let graph = NetworkGraph::build(&two_route_network(), PathFindType::Distance);
        let path = find_path(&graph, id(4), id(1)).expect("path exists");

        assert_eq!(path.stations, vec![id(4), id(3), id(1)]);
        assert_eq!(path.distance, 250);
    }

    #[test]
    fn test_parallel_edges_use_cheapest() {
        let lines = vec![line(&[(1, 2, 90, 1)]), line(&[(1, 2, 40, 7)])];

        let by_distance = NetworkGraph::build(&lines, PathFindType::Distance);
        let path = find_path(&by_distance, id(1), id(2)).expect("path exists");
        assert_eq!((path.distance, path.duration), (40, 7));

        let by_duration = NetworkGraph::build(&lines, PathFindType::Duration);
        let path = find_path(&by_duration, id(1), id(2)).expect("path exists");
        assert_eq!((path.distance, path.duration), (90, 1));
    }

    #[test]
    fn test_transfer_between_lines() {
        let lines = vec![
            line(&[(1, 2, 10, 1), (2, 3, 10, 1)]),
            line(&[(5, 2, 7, 1), (2, 6, 7, 1)]),
        ];
        let graph = NetworkGraph::build(&lines, PathFindType::Distance);
        let path = find_path(&graph, id(1), id(6)).expect("path exists");

        assert_eq!(path.stations, vec![id(1), id(2), id(6)]);
        assert_eq!(path.distance, 17);
    }

    #[test]
    fn test_zero_duration_edges() {
        let lines = vec![line(&[(1, 2, 10, 0), (2, 3, 10, 0)])];
        let graph = NetworkGraph::build(&lines, PathFindType::Duration);
        let path = find_path(&graph, id(1), id(3)).expect("path exists");

        assert_eq!(path.stations, vec![id(1), id(2), id(3)]);
        assert_eq!(path.duration, 0);
        assert_eq!(path.distance, 20);
    }

    #[test]
    fn test_same_station_rejected() {
        let graph = NetworkGraph::build(&two_route_network(), PathFindType::Distance);
        let err = find_path(&graph, id(1), id(1)).expect_err("same station");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_station_not_in_graph() {
        let graph = NetworkGraph::build(&two_route_network(), PathFindType::Distance);
        assert!(find_path(&graph, id(1), id(99)).expect_err("unknown end").is_not_found());
        assert!(find_path(&graph, id(99), id(1)).expect_err("unknown start").is_not_found());
    }

    #[test]
    fn test_disconnected_stations() {
        let lines = vec![line(&[(1, 2, 10, 1)]), line(&[(3, 4, 10, 1)])];
        let graph = NetworkGraph::build(&lines, PathFindType::Distance);
        let err = find_path(&graph, id(1), id(4)).expect_err("no route");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_result_is_deterministic() {
        // Two equal-cost routes from 1 to 4
        let lines = vec![
            line(&[(1, 2, 50, 1), (2, 4, 50, 1)]),
            line(&[(1, 3, 50, 1), (3, 4, 50, 1)]),
        ];
        let graph = NetworkGraph::build(&lines, PathFindType::Distance);
        let first = find_path(&graph, id(1), id(4)).expect("path exists");
        let second = find_path(&graph, id(1), id(4)).expect("path exists");

        assert_eq!(first, second);
        assert_eq!(first.distance, 100);
    }
}
