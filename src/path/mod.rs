//! Shortest-path queries across every line of the network.
//!
//! A query flattens all lines into a throwaway [`NetworkGraph`] and runs
//! [`find_path`] over it. Nothing is cached between queries.

mod finder;
mod graph;

pub use finder::{find_path, Path};
pub use graph::{NetworkGraph, SectionEdge};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::SubwayError;

/// Selects which section attribute a path query minimises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathFindType {
    Distance,
    Duration,
}

impl PathFindType {
    pub const ALL: [PathFindType; 2] = [PathFindType::Distance, PathFindType::Duration];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "DISTANCE",
            Self::Duration => "DURATION",
        }
    }

    /// Edge weight used by the search for this mode
    #[must_use]
    pub fn weight(self, edge: &SectionEdge) -> u64 {
        match self {
            Self::Distance => edge.distance,
            Self::Duration => edge.duration,
        }
    }
}

impl fmt::Display for PathFindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathFindType {
    type Err = SubwayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SubwayError::invalid_argument(format!("unknown path find type: {s}")))
    }
}
