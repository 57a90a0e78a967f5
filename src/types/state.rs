//! Definition of the search [`State`] and its [`Progress`] payload.
//!
//! A state is the key the search engine deduplicates on. Everything
//! that influences how the search continues from a location has to be
//! in the state itself, so two states that compare equal must expand
//! identically.

use std::collections::BTreeSet;

/// Per-problem auxiliary data carried by a [`State`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Progress {
    /// Plain shortest path: the location alone determines the future.
    None,

    /// Waypoint tags covered so far. A sorted set keeps equal coverage
    /// equal regardless of the order tags were picked up in.
    Covered(BTreeSet<String>),

    /// Synthetic origin of a reverse multi-source search. Not a real
    /// location.
    SuperSource,
}

/// An immutable search key: a location label plus [`Progress`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    pub location: String,
    pub progress: Progress,
}

impl State {
    /// A state without auxiliary data.
    pub fn new(location: impl Into<String>) -> Self {
        State {
            location: location.into(),
            progress: Progress::None,
        }
    }

    /// A state carrying the set of waypoint tags covered so far.
    pub fn covered(location: impl Into<String>, covered: BTreeSet<String>) -> Self {
        State {
            location: location.into(),
            progress: Progress::Covered(covered),
        }
    }

    /// The synthetic super-source of a reverse search.
    pub fn super_source() -> Self {
        State {
            location: String::new(),
            progress: Progress::SuperSource,
        }
    }

    /// Tags covered so far, or [`None`] if the state does not track
    /// coverage.
    pub fn covered_tags(&self) -> Option<&BTreeSet<String>> {
        match &self.progress {
            Progress::Covered(tags) => Some(tags),
            _ => None,
        }
    }

    pub fn is_super_source(&self) -> bool {
        self.progress == Progress::SuperSource
    }
}
