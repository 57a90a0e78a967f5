//! Generators for synthetic graphs: regular grids and random
//! locations scattered around a point.

use std::collections::HashMap;
use std::f64::consts::PI;

use rand::Rng;

use crate::error::GraphError;
use crate::graph::WeightedGraph;
use crate::location::{Geolocation, UNIT_DELTA};
use crate::node::make_tag;

/// Meters per degree of latitude, close enough for offsets of a few
/// kilometers.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Return a label for the specified coordinate in a grid map.
pub fn grid_label(x: usize, y: usize) -> String {
    format!("{},{}", x, y)
}

/// Create a grid of `width` by `height` locations roughly one meter
/// apart, connected to their four neighbours at cost 1.
///
/// Location `(x, y)` is labeled `"x,y"`, sits at
/// `(x * UNIT_DELTA, y * UNIT_DELTA)` and is tagged `x=<x>`, `y=<y>`
/// followed by any tags `extra_tags` assigns to it.
pub fn grid_map(
    width: usize,
    height: usize,
    extra_tags: &HashMap<(usize, usize), Vec<String>>,
) -> Result<WeightedGraph, GraphError> {
    let mut graph = WeightedGraph::new();
    for x in 0..width {
        for y in 0..height {
            let mut tags = vec![make_tag("x", &x.to_string()), make_tag("y", &y.to_string())];
            if let Some(extra) = extra_tags.get(&(x, y)) {
                tags.extend(extra.iter().cloned());
            }
            let geolocation = Geolocation::new(x as f64 * UNIT_DELTA, y as f64 * UNIT_DELTA);
            graph.add_location(&grid_label(x, y), geolocation, tags)?;

            if x > 0 {
                graph.add_connection(&grid_label(x - 1, y), &grid_label(x, y), Some(1.0))?;
            }
            if y > 0 {
                graph.add_connection(&grid_label(x, y - 1), &grid_label(x, y), Some(1.0))?;
            }
        }
    }
    Ok(graph)
}

/// Generate `capacity` random geolocations within `radius_meters` of
/// `center`, uniformly distributed over the disc.
pub fn generate_locations_near(
    center: &Geolocation,
    radius_meters: f64,
    capacity: usize,
    rng: &mut impl Rng,
) -> Vec<Geolocation> {
    let meters_per_degree_lon = METERS_PER_DEGREE * center.latitude.0.to_radians().cos();
    (0..capacity)
        .map(|_| {
            let distance = radius_meters * rng.gen::<f64>().sqrt();
            let bearing = rng.gen_range(0.0..2.0 * PI);
            Geolocation::new(
                center.latitude.0 + distance * bearing.cos() / METERS_PER_DEGREE,
                center.longitude.0 + distance * bearing.sin() / meters_per_degree_lon,
            )
        })
        .collect()
}

/// A graph of `capacity` unconnected random locations near `center`,
/// labeled `"0"`, `"1"`, ... in generation order.
///
/// See [`connect_within`](crate::utils::graph::connect_within) to add
/// connections.
pub fn generate_graph_near(
    center: &Geolocation,
    radius_meters: f64,
    capacity: usize,
    rng: &mut impl Rng,
) -> Result<WeightedGraph, GraphError> {
    let mut graph = WeightedGraph::new();
    for (i, geolocation) in generate_locations_near(center, radius_meters, capacity, rng)
        .into_iter()
        .enumerate()
    {
        graph.add_location(&i.to_string(), geolocation, Vec::new())?;
    }
    Ok(graph)
}
