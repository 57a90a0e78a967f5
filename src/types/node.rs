//! Struct definitions and implementations for objects that represent
//! vertices in a graph.
//!
//! A [`Node`] is a labeled [`Geolocation`] together with the tags that
//! describe it. Tags are `key=value` strings, e.g. `amenity=food` or
//! `landmark=Golisano_Hall`, and are what search problems match goals
//! and waypoints against.

use crate::location::Geolocation;

/// Key of the tag every node carries for its own label.
pub const LABEL_TAG_KEY: &str = "label";

/// Locations have string-valued tags, which are created from
/// (key, value) pairs.
pub fn make_tag(key: &str, value: &str) -> String {
    format!("{}={}", key, value)
}

/// Represent a vertex in a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique within a graph. Typed as a [`String`] to allow for
    /// synthetic ids, e.g. OSM node ids or `x,y` grid coordinates.
    pub label: String,

    /// Denotes the geographical position of the node.
    ///
    /// See also [`Geolocation`].
    pub geolocation: Geolocation,

    /// Ordered, non-unique. The first tag is always the canonical
    /// `label=<label>` tag.
    pub tags: Vec<String>,
}

impl Node {
    /// Creates a node, prepending the canonical label tag to `tags`.
    pub fn new(label: &str, geolocation: Geolocation, tags: Vec<String>) -> Self {
        let mut all_tags = Vec::with_capacity(tags.len() + 1);
        all_tags.push(make_tag(LABEL_TAG_KEY, label));
        all_tags.extend(tags);
        Node {
            label: label.to_string(),
            geolocation,
            tags: all_tags,
        }
    }

    /// Returns true if any of the node's tags equals `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
