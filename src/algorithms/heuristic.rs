//! Heuristics for A* search.
//!
//! A [`Heuristic`] estimates the cost of getting from a state to an end
//! state. For A* to return optimal routes the estimate must never
//! exceed the true remaining cost.

use std::collections::HashMap;

use crate::error::GraphError;
use crate::graph::WeightedGraph;
use crate::haversine;
use crate::location::Geolocation;
use crate::problem::ReverseShortestPathProblem;
use crate::router::engine::Router;
use crate::state::State;

/// A lower-bound estimator of the remaining cost from a state.
pub trait Heuristic {
    /// Non-negative estimate, or [`f64::INFINITY`] if no end state is
    /// reachable from `state`.
    fn evaluate(&self, state: &State) -> f64;
}

/// Always 0. Turns A* into uniform cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn evaluate(&self, _state: &State) -> f64 {
        0.0
    }
}

/// Estimate the remaining cost as the straight-line (haversine)
/// distance to the end location.
///
/// Only meaningful when `end_tag` identifies a single location and
/// connection costs are at least the haversine distance between their
/// endpoints. If several locations carry the tag, the lexicographically
/// first one is used.
#[derive(Debug, Clone)]
pub struct StraightLineHeuristic<'g> {
    end: Geolocation,
    graph: &'g WeightedGraph,
}

impl<'g> StraightLineHeuristic<'g> {
    /// # Errors
    /// [`GraphError::NoLocationWithTag`] if no location carries
    /// `end_tag`.
    pub fn new(end_tag: &str, graph: &'g WeightedGraph) -> Result<Self, GraphError> {
        let end = graph
            .first_location_with_tag(end_tag)
            .and_then(|label| graph.geolocation(label))
            .copied()
            .ok_or_else(|| GraphError::NoLocationWithTag(end_tag.to_string()))?;
        Ok(StraightLineHeuristic { end, graph })
    }
}

impl Heuristic for StraightLineHeuristic<'_> {
    fn evaluate(&self, state: &State) -> f64 {
        match self.graph.geolocation(&state.location) {
            Some(geolocation) => haversine::distance(geolocation, &self.end),
            None => 0.0,
        }
    }
}

/// The cost of the shortest path from a location to the nearest
/// location carrying `end_tag`, ignoring waypoints.
///
/// Covering waypoints can only make a route longer, so this stays
/// admissible for [`WaypointsShortestPathProblem`]. The whole table is
/// computed up front by a single reverse search; this relies on
/// connection costs being symmetric.
///
/// [`WaypointsShortestPathProblem`]: crate::problem::WaypointsShortestPathProblem
#[derive(Debug, Clone)]
pub struct NoWaypointsHeuristic {
    costs: HashMap<String, f64>,
}

impl NoWaypointsHeuristic {
    /// Precompute the cost to the nearest end location for every
    /// location of `graph`.
    pub fn new(end_tag: &str, graph: &WeightedGraph) -> Self {
        let problem = ReverseShortestPathProblem::new(end_tag, graph);
        let result = Router::uniform_cost().solve(&problem);
        info!(
            "Precomputed distances to {} for {} of {} locations",
            end_tag,
            result.past_costs.len(),
            graph.location_count()
        );
        NoWaypointsHeuristic {
            costs: result.past_costs,
        }
    }

    /// The precomputed cost for `location`, if it can reach an end.
    pub fn cost_to_end(&self, location: &str) -> Option<f64> {
        self.costs.get(location).copied()
    }
}

impl Heuristic for NoWaypointsHeuristic {
    fn evaluate(&self, state: &State) -> f64 {
        self.cost_to_end(&state.location).unwrap_or(f64::INFINITY)
    }
}
