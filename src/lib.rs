//! Waypoint Routing Algorithm Library.
//! Plans shortest and waypoint-covering routes over a graph of labeled
//! geographic locations.

#[macro_use]
extern crate log;

pub mod types {
    pub mod edge;
    pub mod error;
    pub mod landmark;
    pub mod location;
    pub mod node;
    pub mod router;
    pub mod state;
}

pub mod algorithms {
    pub mod frontier;
    pub mod graph;
    pub mod heuristic;
    pub mod problem;
}

pub mod utils {
    pub mod generator;
    pub mod graph;
    pub mod haversine;
    pub mod router_state;
}

pub use algorithms::{frontier, graph, heuristic, problem};
pub use types::{edge, error, landmark, location, node, router, state};
pub use utils::{generator, haversine, router_state};

pub use algorithms::graph::WeightedGraph;
pub use algorithms::heuristic::{Heuristic, NoWaypointsHeuristic, StraightLineHeuristic, ZeroHeuristic};
pub use algorithms::problem::{SearchProblem, ShortestPathProblem, WaypointsShortestPathProblem};
pub use types::error::GraphError;
pub use types::location::Geolocation;
pub use types::router::engine::{Outcome, Router, SearchResult};
pub use types::state::{Progress, State};
