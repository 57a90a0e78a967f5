//! Defines the weighted graph of labeled locations.
//!
//! Locations are stored as [`Node`]s of an undirected [`petgraph`]
//! graph, and a [`HashMap`] maps each label to its index so lookups by
//! label are fast. Because the underlying graph is undirected, every
//! connection is symmetric by construction: the distance from A to B
//! is always the distance from B to A.

use std::collections::HashMap;
use std::io;

use ordered_float::OrderedFloat;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::edge::Edge;
use crate::error::GraphError;
use crate::haversine;
use crate::location::Geolocation;
use crate::node::Node;

/// A map consists of a set of *labeled* locations with associated
/// tags, and weighted connections between them.
#[derive(Debug, Default, Clone)]
pub struct WeightedGraph {
    graph: UnGraph<Node, OrderedFloat<f64>>,
    node_indices: HashMap<String, NodeIndex>,
}

impl WeightedGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        WeightedGraph::default()
    }

    /// Add a location denoted by `label` with the provided tags.
    ///
    /// The canonical `label=<label>` tag is prepended to `tags`.
    ///
    /// # Errors
    /// [`GraphError::DuplicateLocation`] if `label` already exists and
    /// [`GraphError::EmptyLabel`] if it is empty.
    pub fn add_location(
        &mut self,
        label: &str,
        geolocation: Geolocation,
        tags: Vec<String>,
    ) -> Result<(), GraphError> {
        if label.is_empty() {
            return Err(GraphError::EmptyLabel);
        }
        if self.node_indices.contains_key(label) {
            return Err(GraphError::DuplicateLocation(label.to_string()));
        }
        let index = self.graph.add_node(Node::new(label, geolocation, tags));
        self.node_indices.insert(label.to_string(), index);
        Ok(())
    }

    /// Append a tag to an existing location.
    pub fn add_tag(&mut self, label: &str, tag: String) -> Result<(), GraphError> {
        let index = self.index_of(label)?;
        self.graph[index].tags.push(tag);
        Ok(())
    }

    /// Connect `source` and `target` in both directions.
    ///
    /// When `distance` is [`None`] the haversine distance between the
    /// two geolocations is used. Connecting the same pair again
    /// overwrites the previous distance.
    ///
    /// # Errors
    /// Both endpoints must already exist, must differ, and the distance
    /// must be finite and non-negative.
    pub fn add_connection(
        &mut self,
        source: &str,
        target: &str,
        distance: Option<f64>,
    ) -> Result<(), GraphError> {
        let from = self.index_of(source)?;
        let to = self.index_of(target)?;
        if from == to {
            return Err(GraphError::SelfLoop(source.to_string()));
        }

        let distance = distance.unwrap_or_else(|| {
            haversine::distance(&self.graph[from].geolocation, &self.graph[to].geolocation)
        });
        if !distance.is_finite() || distance < 0.0 {
            return Err(GraphError::InvalidDistance {
                source: source.to_string(),
                target: target.to_string(),
                distance,
            });
        }

        self.graph.update_edge(from, to, OrderedFloat(distance));
        Ok(())
    }

    /// Return the lexicographically smallest label among locations
    /// carrying `tag`, or [`None`] if no location does.
    pub fn first_location_with_tag(&self, tag: &str) -> Option<&str> {
        self.graph
            .node_weights()
            .filter(|node| node.has_tag(tag))
            .map(|node| node.label.as_str())
            .min()
    }

    /// All labels of locations carrying `tag`, sorted.
    pub fn locations_with_tag(&self, tag: &str) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .graph
            .node_weights()
            .filter(|node| node.has_tag(tag))
            .map(|node| node.label.as_str())
            .collect();
        labels.sort_unstable();
        labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.node_indices.contains_key(label)
    }

    pub fn node(&self, label: &str) -> Option<&Node> {
        self.node_indices.get(label).map(|index| &self.graph[*index])
    }

    pub fn geolocation(&self, label: &str) -> Option<&Geolocation> {
        self.node(label).map(|node| &node.geolocation)
    }

    /// Tags of a location, the canonical label tag first.
    pub fn tags(&self, label: &str) -> Option<&[String]> {
        self.node(label).map(|node| node.tags.as_slice())
    }

    /// Returns false for unknown labels.
    pub fn has_tag(&self, label: &str, tag: &str) -> bool {
        self.node(label).map_or(false, |node| node.has_tag(tag))
    }

    /// Adjacent locations of `label` with their distances. Empty for
    /// unknown labels.
    pub fn neighbors(&self, label: &str) -> Vec<(&str, f64)> {
        let index = match self.node_indices.get(label) {
            Some(index) => *index,
            None => return Vec::new(),
        };
        self.graph
            .edges(index)
            .map(|edge| {
                let other = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other].label.as_str(), (*edge.weight()).into_inner())
            })
            .collect()
    }

    /// The distance of the direct connection between two locations.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        let from = *self.node_indices.get(from)?;
        let to = *self.node_indices.get(to)?;
        self.graph
            .find_edge(from, to)
            .map(|edge| self.graph[edge].into_inner())
    }

    /// Get the number of locations in the graph.
    pub fn location_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of (undirected) connections in the graph.
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Every connection once, in insertion order.
    pub fn connections(&self) -> Vec<Edge<'_>> {
        self.graph
            .edge_references()
            .map(|edge| Edge {
                from: self.graph[edge.source()].label.as_str(),
                to: self.graph[edge.target()].label.as_str(),
                distance: *edge.weight(),
            })
            .collect()
    }

    /// All labels, sorted.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.node_indices.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// The underlying graph, e.g. for running [`petgraph::algo`]
    /// routines against it.
    pub fn inner(&self) -> &UnGraph<Node, OrderedFloat<f64>> {
        &self.graph
    }

    /// Get the graph index of a label.
    pub fn get_node_index(&self, label: &str) -> Option<NodeIndex> {
        self.node_indices.get(label).copied()
    }

    /// Write a readable overview of the graph: every location with its
    /// geolocation and tags, followed by its connections.
    pub fn dump(&self, out: &mut impl io::Write) -> io::Result<()> {
        for node in self.nodes() {
            writeln!(out, "{} ({}): {}", node.label, node.geolocation, node.tags.join(" "))?;
            for (neighbor, distance) in self.neighbors(&node.label) {
                writeln!(out, "  -> {} [distance = {}]", neighbor, distance)?;
            }
        }
        Ok(())
    }

    fn index_of(&self, label: &str) -> Result<NodeIndex, GraphError> {
        self.node_indices
            .get(label)
            .copied()
            .ok_or_else(|| GraphError::UnknownLocation(label.to_string()))
    }
}
