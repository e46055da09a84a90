//! Geographic primitives shared across queries, results and the renderer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from constructing geographic values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    /// Build a coordinate, rejecting values outside the valid WGS84 ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// An axis-aligned region covering one or more coordinates.
///
/// Antimeridian-crossing regions are not modeled; merging coordinates on both
/// sides produces the wide box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBoundingBox {
    pub south_west: GeoCoordinate,
    pub north_east: GeoCoordinate,
}

impl GeoBoundingBox {
    /// A degenerate box containing a single point.
    pub fn from_point(point: GeoCoordinate) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Grow the box so it also contains `point`.
    pub fn expand_to(&mut self, point: GeoCoordinate) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lon = self.south_west.lon.min(point.lon);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lon = self.north_east.lon.max(point.lon);
    }

    /// The smallest box covering every coordinate, or `None` for an empty set.
    pub fn covering(points: impl IntoIterator<Item = GeoCoordinate>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bbox = Self::from_point(iter.next()?);
        for point in iter {
            bbox.expand_to(point);
        }
        Some(bbox)
    }

    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate {
            lat: (self.south_west.lat + self.north_east.lat) / 2.0,
            lon: (self.south_west.lon + self.north_east.lon) / 2.0,
        }
    }
}

/// A circular search scope: center plus radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchArea {
    pub center: GeoCoordinate,
    pub radius_m: u32,
}

impl SearchArea {
    pub fn new(center: GeoCoordinate, radius_m: u32) -> Self {
        Self { center, radius_m }
    }

    /// Approximate bounding box for the area, used when a provider only
    /// understands rectangular scopes.
    pub fn to_bounding_box(&self) -> GeoBoundingBox {
        // Rough meters-per-degree conversion; fine for scoping a search.
        let lat_delta = f64::from(self.radius_m) / 111_320.0;
        let lon_scale = self.center.lat.to_radians().cos().max(0.01);
        let lon_delta = f64::from(self.radius_m) / (111_320.0 * lon_scale);
        GeoBoundingBox {
            south_west: GeoCoordinate {
                lat: (self.center.lat - lat_delta).max(-90.0),
                lon: (self.center.lon - lon_delta).max(-180.0),
            },
            north_east: GeoCoordinate {
                lat: (self.center.lat + lat_delta).min(90.0),
                lon: (self.center.lon + lon_delta).min(180.0),
            },
        }
    }
}
