//! Search problems over a [`WeightedGraph`].
//!
//! A [`SearchProblem`] tells the engine where to start, when to stop
//! and how to move on from a [`State`]. Problems borrow the graph and
//! are cheap to build per query.

use std::collections::BTreeSet;

use crate::error::GraphError;
use crate::graph::WeightedGraph;
use crate::state::State;

/// The contract every search problem fulfills.
pub trait SearchProblem {
    /// Return the start state.
    fn start_state(&self) -> State;

    /// Return whether `state` is an end state.
    fn is_goal(&self, state: &State) -> bool;

    /// Return the successors of `state`, each with the non-negative
    /// cost of the edge leading to it.
    fn expand(&self, state: &State) -> Vec<(State, f64)>;
}

/// Find the shortest path from `start_location` to any location
/// carrying `end_tag`.
#[derive(Debug, Clone)]
pub struct ShortestPathProblem<'g> {
    start_location: String,
    end_tag: String,
    graph: &'g WeightedGraph,
}

impl<'g> ShortestPathProblem<'g> {
    /// # Errors
    /// [`GraphError::UnknownLocation`] if the start is not in `graph`.
    pub fn new(
        start_location: &str,
        end_tag: &str,
        graph: &'g WeightedGraph,
    ) -> Result<Self, GraphError> {
        if !graph.contains(start_location) {
            return Err(GraphError::UnknownLocation(start_location.to_string()));
        }
        Ok(ShortestPathProblem {
            start_location: start_location.to_string(),
            end_tag: end_tag.to_string(),
            graph,
        })
    }

    pub fn start_location(&self) -> &str {
        &self.start_location
    }

    pub fn end_tag(&self) -> &str {
        &self.end_tag
    }
}

impl SearchProblem for ShortestPathProblem<'_> {
    fn start_state(&self) -> State {
        State::new(self.start_location.as_str())
    }

    fn is_goal(&self, state: &State) -> bool {
        self.graph.has_tag(&state.location, &self.end_tag)
    }

    fn expand(&self, state: &State) -> Vec<(State, f64)> {
        self.graph
            .neighbors(&state.location)
            .into_iter()
            .map(|(neighbor, distance)| (State::new(neighbor), distance))
            .collect()
    }
}

/// Find the shortest path from `start_location` to any location
/// carrying `end_tag` that passes through locations covering every tag
/// in `waypoint_tags`, in any order.
///
/// States carry the set of waypoint tags covered so far rather than
/// the locations visited, so there are at most
/// `locations * 2^waypoints` of them no matter how long routes get.
#[derive(Debug, Clone)]
pub struct WaypointsShortestPathProblem<'g> {
    start_location: String,
    waypoint_tags: BTreeSet<String>,
    end_tag: String,
    graph: &'g WeightedGraph,
}

impl<'g> WaypointsShortestPathProblem<'g> {
    /// # Errors
    /// [`GraphError::UnknownLocation`] if the start is not in `graph`.
    pub fn new(
        start_location: &str,
        waypoint_tags: &[&str],
        end_tag: &str,
        graph: &'g WeightedGraph,
    ) -> Result<Self, GraphError> {
        if !graph.contains(start_location) {
            return Err(GraphError::UnknownLocation(start_location.to_string()));
        }
        Ok(WaypointsShortestPathProblem {
            start_location: start_location.to_string(),
            waypoint_tags: waypoint_tags.iter().map(|tag| tag.to_string()).collect(),
            end_tag: end_tag.to_string(),
            graph,
        })
    }

    pub fn start_location(&self) -> &str {
        &self.start_location
    }

    pub fn end_tag(&self) -> &str {
        &self.end_tag
    }

    /// The required tags, sorted and deduplicated.
    pub fn waypoint_tags(&self) -> &BTreeSet<String> {
        &self.waypoint_tags
    }

    /// `covered` plus every required tag `location` carries.
    fn cover(&self, covered: &BTreeSet<String>, location: &str) -> BTreeSet<String> {
        let mut covered = covered.clone();
        if let Some(tags) = self.graph.tags(location) {
            for tag in tags {
                if self.waypoint_tags.contains(tag) {
                    covered.insert(tag.clone());
                }
            }
        }
        covered
    }
}

impl SearchProblem for WaypointsShortestPathProblem<'_> {
    fn start_state(&self) -> State {
        let covered = self.cover(&BTreeSet::new(), &self.start_location);
        State::covered(self.start_location.as_str(), covered)
    }

    fn is_goal(&self, state: &State) -> bool {
        let covered = match state.covered_tags() {
            Some(covered) => covered,
            None => return false,
        };
        *covered == self.waypoint_tags && self.graph.has_tag(&state.location, &self.end_tag)
    }

    fn expand(&self, state: &State) -> Vec<(State, f64)> {
        let empty = BTreeSet::new();
        let covered = state.covered_tags().unwrap_or(&empty);
        self.graph
            .neighbors(&state.location)
            .into_iter()
            .map(|(neighbor, distance)| {
                let next = State::covered(neighbor, self.cover(covered, neighbor));
                (next, distance)
            })
            .collect()
    }
}

/// Reverse multi-source search from a synthetic super-source joined
/// with zero-cost edges to every location carrying `end_tag`.
///
/// No state is ever a goal, so a search over this problem finalizes
/// every location reachable from any end location. With symmetric
/// distances, the cost of reaching a location from the super-source is
/// its distance to the nearest end location.
#[derive(Debug, Clone)]
pub struct ReverseShortestPathProblem<'g> {
    end_tag: String,
    graph: &'g WeightedGraph,
}

impl<'g> ReverseShortestPathProblem<'g> {
    pub fn new(end_tag: &str, graph: &'g WeightedGraph) -> Self {
        ReverseShortestPathProblem {
            end_tag: end_tag.to_string(),
            graph,
        }
    }
}

impl SearchProblem for ReverseShortestPathProblem<'_> {
    fn start_state(&self) -> State {
        State::super_source()
    }

    fn is_goal(&self, _state: &State) -> bool {
        false
    }

    fn expand(&self, state: &State) -> Vec<(State, f64)> {
        if state.is_super_source() {
            return self
                .graph
                .locations_with_tag(&self.end_tag)
                .into_iter()
                .map(|label| (State::new(label), 0.0))
                .collect();
        }
        self.graph
            .neighbors(&state.location)
            .into_iter()
            .map(|(neighbor, distance)| (State::new(neighbor), distance))
            .collect()
    }
}
