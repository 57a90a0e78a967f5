//! Struct definitions and implementations for [`Geolocation`].

use std::fmt;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// The change in latitude/longitude (in degrees) that equates to a
/// distance of roughly one meter.
pub const UNIT_DELTA: f64 = 0.00001;

/// A [`Geolocation`] is a latitude/longitude pair (in degrees) of a
/// physical location on Earth. Typically, this type is used in tandem
/// with the [`Node`](`super::node::Node`) type.
///
/// Equality is by value; [`OrderedFloat`] keeps the type hashable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geolocation {
    pub latitude: OrderedFloat<f64>,
    pub longitude: OrderedFloat<f64>,
}

impl Geolocation {
    /// Creates a geolocation from raw degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Geolocation {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        }
    }
}

impl fmt::Display for Geolocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses the `"lat,lon"` form used by landmark files.
impl FromStr for Geolocation {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GraphError::InvalidGeolocation(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let latitude = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let longitude = lon.trim().parse::<f64>().map_err(|_| invalid())?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid());
        }
        Ok(Geolocation::new(latitude, longitude))
    }
}
