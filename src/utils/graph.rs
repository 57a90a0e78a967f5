//! Helper functions for working with graphs.

use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use crate::error::GraphError;
use crate::graph::WeightedGraph;
use crate::haversine;
use crate::landmark::Landmark;
use crate::node::make_tag;

/// Connect locations within `constraint_meters` of each other.
///
/// Every pair of distinct locations whose haversine distance is at most
/// the constraint is connected, with that distance as the cost.
///
/// # Time Complexity
/// *O*(*n^2*) in the number of locations.
pub fn connect_within(graph: &mut WeightedGraph, constraint_meters: f64) -> Result<(), GraphError> {
    let nodes: Vec<_> = graph
        .nodes()
        .map(|node| (node.label.clone(), node.geolocation))
        .collect();

    let mut pairs = Vec::new();
    for (i, (from, from_geo)) in nodes.iter().enumerate() {
        for (to, to_geo) in &nodes[i + 1..] {
            if haversine::distance(from_geo, to_geo) <= constraint_meters {
                pairs.push((from, to));
            }
        }
    }

    debug!("Connecting {} pairs within {} meters", pairs.len(), constraint_meters);
    for (from, to) in pairs {
        graph.add_connection(from, to, None)?;
    }
    Ok(())
}

/// Return the route's total cost, summing the distance of every pair
/// of consecutive labels.
///
/// # Errors
/// [`GraphError::MissingEdge`] if two consecutive labels are not
/// connected.
pub fn route_cost<S: AsRef<str>>(graph: &WeightedGraph, route: &[S]) -> Result<f64, GraphError> {
    route.windows(2).try_fold(0.0, |cost, pair| {
        let (from, to) = (pair[0].as_ref(), pair[1].as_ref());
        graph
            .distance(from, to)
            .map(|distance| cost + distance)
            .ok_or_else(|| GraphError::MissingEdge {
                from: from.to_string(),
                to: to.to_string(),
            })
    })
}

/// Every tag carried by some location along the route.
pub fn covered_tags<S: AsRef<str>>(graph: &WeightedGraph, route: &[S]) -> BTreeSet<String> {
    route
        .iter()
        .filter_map(|label| graph.tags(label.as_ref()))
        .flatten()
        .cloned()
        .collect()
}

/// Add landmarks to the graph.
///
/// Landmark coordinates rarely line up with existing locations, so
/// each landmark is mapped onto the closest location, ties broken by
/// label. Landmarks whose closest location is `tolerance_meters` or
/// further away are skipped. An attached landmark adds `landmark=<name>`
/// and/or `amenity=<kind>` tags.
///
/// # Returns
/// The number of landmarks attached.
pub fn attach_landmarks(
    graph: &mut WeightedGraph,
    landmarks: &[Landmark],
    tolerance_meters: f64,
) -> Result<usize, GraphError> {
    let mut attached = 0;
    for landmark in landmarks {
        let closest = graph
            .nodes()
            .map(|node| {
                (
                    OrderedFloat(haversine::distance(&landmark.geolocation, &node.geolocation)),
                    node.label.as_str(),
                )
            })
            .min();

        let label = match closest {
            Some((distance, label)) if distance.into_inner() < tolerance_meters => label.to_string(),
            _ => {
                debug!("Skipping landmark at {}", landmark.geolocation);
                continue;
            }
        };

        if let Some(name) = &landmark.landmark {
            graph.add_tag(&label, make_tag("landmark", name))?;
        }
        if let Some(kind) = &landmark.amenity {
            graph.add_tag(&label, make_tag("amenity", kind))?;
        }
        attached += 1;
    }
    info!("Attached {} of {} landmarks", attached, landmarks.len());
    Ok(attached)
}
