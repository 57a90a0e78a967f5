//! Struct definitions for [`Landmark`]s, named points of interest that
//! are snapped onto the nearest location of a graph.

use std::convert::TryFrom;

use serde::Deserialize;

use crate::error::GraphError;
use crate::location::Geolocation;

/// Landmarks further than this from every location are dropped.
pub const LANDMARK_TOLERANCE_METERS: f64 = 250.0;

/// A named point of interest.
///
/// Deserialized from entries of the form
/// `{"geo": "43.0840,-77.6797", "landmark": "Golisano_Hall", "amenity": "food"}`
/// where both `landmark` and `amenity` are optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawLandmark")]
pub struct Landmark {
    pub geolocation: Geolocation,
    pub landmark: Option<String>,
    pub amenity: Option<String>,
}

#[derive(Deserialize)]
struct RawLandmark {
    geo: String,
    landmark: Option<String>,
    amenity: Option<String>,
}

impl TryFrom<RawLandmark> for Landmark {
    type Error = GraphError;

    fn try_from(raw: RawLandmark) -> Result<Self, Self::Error> {
        Ok(Landmark {
            geolocation: raw.geo.parse()?,
            landmark: raw.landmark,
            amenity: raw.amenity,
        })
    }
}

/// Parse a JSON array of landmarks.
pub fn parse_landmarks(json: &str) -> Result<Vec<Landmark>, GraphError> {
    Ok(serde_json::from_str(json)?)
}
