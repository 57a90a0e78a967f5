//! The core of the router library.
//!
//! The engine module runs a best-first search over any
//! [`SearchProblem`]. Without a heuristic it is uniform cost search
//! (Dijkstra's algorithm); with an admissible [`Heuristic`] it is A*.

/// The router engine module.
pub mod engine {
    use std::collections::HashMap;

    use crate::{
        frontier::Frontier,
        heuristic::{Heuristic, ZeroHeuristic},
        problem::SearchProblem,
        state::State,
    };

    /// How a search ended.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Outcome {
        /// A goal state was reached. `path` holds the location labels
        /// from the start to the goal, both included.
        Found { path: Vec<String>, cost: f64 },

        /// The frontier ran dry before any goal state was reached.
        Unreachable,
    }

    /// Everything a search reports back.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SearchResult {
        pub outcome: Outcome,

        /// Number of states popped from the frontier, the goal
        /// included.
        pub num_states_explored: usize,

        /// Location label to the cost of the cheapest finalized state
        /// at that location.
        pub past_costs: HashMap<String, f64>,
    }

    impl Default for SearchResult {
        fn default() -> Self {
            SearchResult {
                outcome: Outcome::Unreachable,
                num_states_explored: 0,
                past_costs: HashMap::new(),
            }
        }
    }

    impl SearchResult {
        pub fn is_found(&self) -> bool {
            matches!(self.outcome, Outcome::Found { .. })
        }

        /// The route, or [`None`] if no goal was reachable.
        pub fn path(&self) -> Option<&[String]> {
            match &self.outcome {
                Outcome::Found { path, .. } => Some(path),
                Outcome::Unreachable => None,
            }
        }

        /// The route's total cost, or [`None`] if no goal was
        /// reachable.
        pub fn cost(&self) -> Option<f64> {
            match self.outcome {
                Outcome::Found { cost, .. } => Some(cost),
                Outcome::Unreachable => None,
            }
        }
    }

    /// A Router pairs the search loop with a heuristic.
    ///
    /// Routers hold no state between calls to [`Router::solve`]; every
    /// search owns its own frontier.
    #[derive(Clone, Copy)]
    pub struct Router<'h> {
        heuristic: &'h dyn Heuristic,
    }

    impl Router<'static> {
        /// Uniform cost search, i.e. A* with the zero heuristic.
        pub fn uniform_cost() -> Self {
            Router {
                heuristic: &ZeroHeuristic,
            }
        }
    }

    impl<'h> Router<'h> {
        /// A* search guided by `heuristic`.
        ///
        /// The returned cost is optimal only if `heuristic` never
        /// overestimates the remaining cost.
        pub fn astar(heuristic: &'h dyn Heuristic) -> Self {
            Router { heuristic }
        }

        /// Run the search on `problem`.
        ///
        /// # Returns
        /// A [`SearchResult`] whose outcome is [`Outcome::Unreachable`]
        /// if no goal state can be reached.
        pub fn solve(&self, problem: &dyn SearchProblem) -> SearchResult {
            let mut result = SearchResult::default();

            // h is evaluated once per state.
            let mut estimates: HashMap<State, f64> = HashMap::new();
            // state -> (previous state, best known cost so far)
            let mut backpointers: HashMap<State, (Option<State>, f64)> = HashMap::new();
            let mut frontier = Frontier::new();

            let start = problem.start_state();
            let start_estimate = self.heuristic.evaluate(&start);
            if !start_estimate.is_finite() {
                info!("No goal is reachable from {:?}", start.location);
                return result;
            }
            estimates.insert(start.clone(), start_estimate);
            backpointers.insert(start.clone(), (None, 0.0));
            frontier.update(start, start_estimate);

            while let Some((state, priority)) = frontier.remove_min() {
                let g = backpointers.get(&state).map_or(0.0, |(_, cost)| *cost);
                result.num_states_explored += 1;
                if !state.is_super_source() {
                    result
                        .past_costs
                        .entry(state.location.clone())
                        .and_modify(|cost| *cost = cost.min(g))
                        .or_insert(g);
                }
                trace!(
                    "Exploring {:?} with past cost {} (priority {})",
                    state,
                    g,
                    priority
                );

                if problem.is_goal(&state) {
                    let path = reconstruct_path(&backpointers, state);
                    debug!("num_states_explored: {}", result.num_states_explored);
                    debug!("cost: {}", g);
                    debug!("path: {:?}", path);
                    result.outcome = Outcome::Found { path, cost: g };
                    return result;
                }

                for (successor, cost) in problem.expand(&state) {
                    if frontier.is_done(&successor) {
                        continue;
                    }
                    let estimate = *estimates
                        .entry(successor.clone())
                        .or_insert_with(|| self.heuristic.evaluate(&successor));
                    if !estimate.is_finite() {
                        continue;
                    }

                    let g_successor = g + cost;
                    let f_successor = g_successor + estimate;
                    if frontier.update(successor.clone(), f_successor) {
                        // Found a better way to reach `successor`.
                        trace!("\t{:?} => {:?} (priority {})", state.location, successor, f_successor);
                        backpointers.insert(successor, (Some(state.clone()), g_successor));
                    }
                }
            }

            info!(
                "Searched the entire search space after {} states",
                result.num_states_explored
            );
            result
        }
    }

    /// Walk the backpointers from `goal` back to the start.
    fn reconstruct_path(
        backpointers: &HashMap<State, (Option<State>, f64)>,
        goal: State,
    ) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(state) = current {
            current = backpointers
                .get(&state)
                .and_then(|(previous, _)| previous.clone());
            path.push(state.location);
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod router_tests {
    use std::collections::{BTreeSet, HashMap};

    use crate::{
        generator::grid_map,
        graph::WeightedGraph,
        heuristic::{Heuristic, NoWaypointsHeuristic},
        location::Geolocation,
        node::make_tag,
        problem::{SearchProblem, ShortestPathProblem, WaypointsShortestPathProblem},
        router::engine::{Outcome, Router},
        state::State,
    };

    fn unit_grid(width: usize, height: usize) -> WeightedGraph {
        grid_map(width, height, &HashMap::new()).unwrap()
    }

    /// 3×5 grid, (0,0) -> (2,2).
    #[test_log::test]
    fn test_small_grid() {
        let graph = unit_grid(3, 5);
        let end_tag = make_tag("label", "2,2");
        let problem = ShortestPathProblem::new("0,0", &end_tag, &graph).unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.cost(), Some(4.0));

        let path = result.path().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first().map(String::as_str), Some("0,0"));
        assert_eq!(path.last().map(String::as_str), Some("2,2"));
        assert_eq!(result.past_costs["0,0"], 0.0);
        assert!(result.num_states_explored >= 5);
    }

    /// 30×30 grid, (20,10) -> any location with x=5.
    #[test]
    fn test_multiple_ends() {
        let graph = unit_grid(30, 30);
        let problem = ShortestPathProblem::new("20,10", "x=5", &graph).unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.cost(), Some(15.0));
        assert_eq!(result.path().unwrap().last().map(String::as_str), Some("5,10"));
    }

    /// 50×50 grid, (0,0) -> (49,49).
    #[test]
    fn test_large_grid() {
        let graph = unit_grid(50, 50);
        let end_tag = make_tag("label", "49,49");
        let problem = ShortestPathProblem::new("0,0", &end_tag, &graph).unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.cost(), Some(98.0));
        assert_eq!(result.path().unwrap().len(), 99);
    }

    #[test]
    fn test_start_is_goal() {
        let graph = unit_grid(2, 2);
        let problem = ShortestPathProblem::new("1,1", "x=1", &graph).unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(
            result.outcome,
            Outcome::Found {
                path: vec!["1,1".to_string()],
                cost: 0.0
            }
        );
        assert_eq!(result.num_states_explored, 1);
    }

    #[test]
    fn test_unreachable_goal() {
        let mut graph = unit_grid(3, 3);
        graph
            .add_location("island", Geolocation::new(1.0, 1.0), vec![])
            .unwrap();
        let problem = ShortestPathProblem::new("0,0", "label=island", &graph).unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.outcome, Outcome::Unreachable);
        assert_eq!(result.path(), None);
        assert_eq!(result.cost(), None);
        assert_eq!(result.num_states_explored, 9);
        assert_eq!(result.past_costs.len(), 9);
        assert_eq!(result.past_costs["2,2"], 4.0);
    }

    #[test]
    fn test_absent_tag_is_unreachable() {
        let graph = unit_grid(3, 3);
        let problem = ShortestPathProblem::new("0,0", "amenity=fuel", &graph).unwrap();
        assert!(!Router::uniform_cost().solve(&problem).is_found());
    }

    /// The cheap route has more hops than the direct connection.
    #[test]
    fn test_prefers_cheaper_longer_route() {
        let mut graph = WeightedGraph::new();
        for (label, lat) in [("a", 0.0), ("b", 0.001), ("c", 0.002), ("d", 0.003)] {
            graph
                .add_location(label, Geolocation::new(lat, 0.0), vec![])
                .unwrap();
        }
        graph.add_connection("a", "d", Some(10.0)).unwrap();
        graph.add_connection("a", "b", Some(1.0)).unwrap();
        graph.add_connection("b", "c", Some(1.0)).unwrap();
        graph.add_connection("c", "d", Some(1.0)).unwrap();

        let problem = ShortestPathProblem::new("a", "label=d", &graph).unwrap();
        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(
            result.outcome,
            Outcome::Found {
                path: vec!["a", "b", "c", "d"].into_iter().map(String::from).collect(),
                cost: 3.0
            }
        );
    }

    /// 3×5 grid with one waypoint on the far edge.
    #[test]
    fn test_one_waypoint() {
        let graph = unit_grid(3, 5);
        let end_tag = make_tag("label", "2,2");
        let problem =
            WaypointsShortestPathProblem::new("0,0", &["y=4"], &end_tag, &graph).unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.cost(), Some(8.0));
        let path = result.path().unwrap();
        assert!(path.iter().any(|label| graph.has_tag(label, "y=4")));
    }

    #[test]
    fn test_two_waypoints() {
        let graph = unit_grid(30, 30);
        let end_tag = make_tag("label", "3,3");
        let problem =
            WaypointsShortestPathProblem::new("20,10", &["x=5", "x=7"], &end_tag, &graph).unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.cost(), Some(24.0));
    }

    /// A single location satisfies all waypoints in one hop.
    #[test]
    fn test_one_location_multi_waypoints() {
        let mut extra = HashMap::new();
        extra.insert((0, 1), vec!["food".into(), "fuel".into(), "books".into()]);
        extra.insert((1, 0), vec!["food".into()]);
        extra.insert((1, 1), vec!["fuel".into()]);
        let graph = grid_map(2, 2, &extra).unwrap();
        let problem = WaypointsShortestPathProblem::new(
            "0,0",
            &["food", "fuel", "books"],
            "label=0,1",
            &graph,
        )
        .unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.cost(), Some(1.0));
        assert_eq!(result.path().unwrap(), ["0,0", "0,1"]);
    }

    #[test]
    fn test_start_location_covers_waypoints() {
        let mut extra = HashMap::new();
        extra.insert((0, 0), vec!["food".into()]);
        extra.insert((0, 1), vec!["fuel".into()]);
        extra.insert((1, 0), vec!["food".into()]);
        extra.insert((1, 1), vec!["food".into(), "fuel".into()]);
        let graph = grid_map(2, 2, &extra).unwrap();
        let problem =
            WaypointsShortestPathProblem::new("0,0", &["food", "fuel"], "label=0,1", &graph)
                .unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.cost(), Some(1.0));
    }

    /// The route has to leave the end location and come back.
    #[test]
    fn test_waypoint_loop() {
        let graph = unit_grid(3, 1);
        let problem =
            WaypointsShortestPathProblem::new("0,0", &["x=2"], "label=0,0", &graph).unwrap();

        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.cost(), Some(4.0));
        assert_eq!(result.path().unwrap(), ["0,0", "1,0", "2,0", "1,0", "0,0"]);
    }

    #[test]
    fn test_astar_matches_uniform_cost_with_waypoints() {
        let graph = unit_grid(30, 30);
        let end_tag = make_tag("label", "3,3");
        let problem =
            WaypointsShortestPathProblem::new("20,10", &["x=5", "x=7"], &end_tag, &graph).unwrap();
        let heuristic = NoWaypointsHeuristic::new(&end_tag, &graph);

        let ucs = Router::uniform_cost().solve(&problem);
        let astar = Router::astar(&heuristic).solve(&problem);
        assert_eq!(astar.cost(), ucs.cost());
        assert!(astar.num_states_explored <= ucs.num_states_explored);
    }

    /// A heuristic that overestimates everywhere except at the goal.
    struct Pessimist;

    impl Heuristic for Pessimist {
        fn evaluate(&self, state: &State) -> f64 {
            if state.location == "2,2" {
                0.0
            } else {
                100.0
            }
        }
    }

    /// Inadmissible heuristics still terminate with a valid route.
    #[test]
    fn test_inadmissible_heuristic_terminates() {
        let graph = unit_grid(3, 3);
        let problem = ShortestPathProblem::new("0,0", "label=2,2", &graph).unwrap();
        let result = Router::astar(&Pessimist).solve(&problem);
        assert!(result.cost().unwrap() >= 4.0);
    }

    /// A heuristic that rules out every state.
    struct Hopeless;

    impl Heuristic for Hopeless {
        fn evaluate(&self, _state: &State) -> f64 {
            f64::INFINITY
        }
    }

    #[test]
    fn test_infinite_start_estimate_is_unreachable() {
        let graph = unit_grid(3, 3);
        let problem = ShortestPathProblem::new("0,0", "label=2,2", &graph).unwrap();
        let result = Router::astar(&Hopeless).solve(&problem);
        assert_eq!(result.outcome, Outcome::Unreachable);
        assert_eq!(result.num_states_explored, 0);
    }

    /// Waypoint states at the same location keep the cheapest cost.
    #[test]
    fn test_past_costs_keep_minimum_per_location() {
        let graph = unit_grid(3, 1);
        let problem =
            WaypointsShortestPathProblem::new("0,0", &["x=2"], "label=0,0", &graph).unwrap();
        let result = Router::uniform_cost().solve(&problem);
        assert_eq!(result.past_costs["1,0"], 1.0);
        assert_eq!(result.past_costs["0,0"], 0.0);

        let start = problem.start_state();
        assert_eq!(start.covered_tags(), Some(&BTreeSet::new()));
    }
}
