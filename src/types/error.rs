//! Definition of the [`GraphError`] type.

use std::fmt;

/// Errors raised while building a [`WeightedGraph`](crate::WeightedGraph)
/// or while checking a route against it.
///
/// A search that cannot reach any goal is not an error; see
/// [`Outcome::Unreachable`](crate::Outcome::Unreachable).
#[derive(Debug)]
pub enum GraphError {
    /// A location with this label was already added.
    DuplicateLocation(String),
    /// No location with this label exists.
    UnknownLocation(String),
    /// Labels must be non-empty.
    EmptyLabel,
    /// A location cannot be connected to itself.
    SelfLoop(String),
    /// Distances must be finite and non-negative.
    InvalidDistance {
        source: String,
        target: String,
        distance: f64,
    },
    /// Two consecutive route labels are not connected.
    MissingEdge { from: String, to: String },
    /// No location carries this tag.
    NoLocationWithTag(String),
    /// The summed route cost disagrees with the cost the engine reported.
    CostMismatch { reported: f64, summed: f64 },
    /// A geolocation string was not of the form `lat,lon`.
    InvalidGeolocation(String),
    /// A landmark file could not be parsed.
    Landmarks(serde_json::Error),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateLocation(label) => {
                write!(f, "location {} already processed", label)
            }
            GraphError::UnknownLocation(label) => write!(f, "unknown location {}", label),
            GraphError::EmptyLabel => write!(f, "location labels must not be empty"),
            GraphError::SelfLoop(label) => write!(f, "cannot connect {} to itself", label),
            GraphError::InvalidDistance {
                source,
                target,
                distance,
            } => write!(
                f,
                "invalid distance {} between {} and {}",
                distance, source, target
            ),
            GraphError::MissingEdge { from, to } => {
                write!(f, "no connection between {} and {}", from, to)
            }
            GraphError::NoLocationWithTag(tag) => write!(f, "no location carries tag {}", tag),
            GraphError::CostMismatch { reported, summed } => write!(
                f,
                "route cost {} does not match reported cost {}",
                summed, reported
            ),
            GraphError::InvalidGeolocation(raw) => {
                write!(f, "expected `lat,lon` geolocation, got {:?}", raw)
            }
            GraphError::Landmarks(err) => write!(f, "malformed landmark file: {}", err),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphError::Landmarks(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(value: serde_json::Error) -> Self {
        GraphError::Landmarks(value)
    }
}
