//! Plans routes: runs a search and checks the result against the graph.

use crate::error::GraphError;
use crate::graph::WeightedGraph;
use crate::problem::SearchProblem;
use crate::router::engine::{Outcome, Router, SearchResult};
use crate::utils::graph::route_cost;

/// Relative slack allowed between the engine's cost and the summed
/// route cost, for floating point reassociation.
const COST_TOLERANCE: f64 = 1e-9;

/// Find a route for `problem` with `router`.
///
/// A route that was found is re-walked on `graph`. A route that uses a
/// missing connection, or whose summed cost differs from the reported
/// one, means the engine or the problem is broken.
///
/// # Returns
/// The search result; "no route" is [`Outcome::Unreachable`], not an
/// error.
///
/// # Errors
/// [`GraphError::MissingEdge`] or [`GraphError::CostMismatch`] if the
/// reconstructed route is inconsistent with `graph`.
pub fn find_route(
    graph: &WeightedGraph,
    problem: &dyn SearchProblem,
    router: &Router<'_>,
) -> Result<SearchResult, GraphError> {
    info!("Finding route");
    let result = router.solve(problem);

    if let Outcome::Found { path, cost } = &result.outcome {
        let summed = route_cost(graph, path)?;
        if (summed - cost).abs() > COST_TOLERANCE * cost.abs().max(1.0) {
            error!("Route cost {} does not match reported cost {}", summed, cost);
            return Err(GraphError::CostMismatch {
                reported: *cost,
                summed,
            });
        }
        debug!("route: {:?}", path);
        debug!("cost: {}", cost);
    } else {
        info!("No route found");
    }

    info!(
        "Finished finding route after exploring {} states",
        result.num_states_explored
    );
    Ok(result)
}
