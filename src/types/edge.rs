//! Definition of the `Edge` type.
use ordered_float::OrderedFloat;

/// An edge is a connection between two locations.
/// The distance represents the "weight" of the edge and is the same in
/// both directions.
#[derive(Debug, PartialEq, Hash, Eq, Clone, Copy)]
pub struct Edge<'a> {
    /// One end of the edge.
    pub from: &'a str,

    /// The other end of the edge.
    pub to: &'a str,

    /// The weight of the edge.
    pub distance: OrderedFloat<f64>,
}
