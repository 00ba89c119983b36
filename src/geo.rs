//! Geographic selection types.
//!
//! DESIGN
//! ======
//! A `Region` is always stored normalized: `south_west` holds the minimum
//! latitude/longitude and `north_east` the maximum. Constructors accept
//! corners in any order (or a drawn polygon) and normalize, so downstream
//! code never re-checks ordering.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegionError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("coordinate is not a finite number")]
    NonFinite,
    #[error("south-west corner must not exceed north-east corner")]
    InvertedCorners,
    #[error("region needs at least one vertex")]
    NoVertices,
}

impl ErrorCode for RegionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LatitudeOutOfRange(_) => "E_LATITUDE_RANGE",
            Self::LongitudeOutOfRange(_) => "E_LONGITUDE_RANGE",
            Self::NonFinite => "E_NON_FINITE",
            Self::InvertedCorners => "E_INVERTED_CORNERS",
            Self::NoVertices => "E_NO_VERTICES",
        }
    }
}

// =============================================================================
// LAT/LNG
// =============================================================================

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Build a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is non-finite or out of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, RegionError> {
        let point = Self { lat, lng };
        point.validate()?;
        Ok(point)
    }

    /// Check range and finiteness of an already-constructed pair
    /// (e.g. one that came straight out of a JSON body).
    ///
    /// # Errors
    ///
    /// Returns an error if either component is non-finite or out of range.
    pub fn validate(&self) -> Result<(), RegionError> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(RegionError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(RegionError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(RegionError::LongitudeOutOfRange(self.lng));
        }
        Ok(())
    }
}

// =============================================================================
// REGION
// =============================================================================

/// User-selected rectangular bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    south_west: LatLng,
    north_east: LatLng,
}

impl Region {
    /// Build a region from explicit south-west and north-east corners.
    ///
    /// # Errors
    ///
    /// Returns an error if a corner is invalid or south-west exceeds
    /// north-east on either axis.
    pub fn new(south_west: LatLng, north_east: LatLng) -> Result<Self, RegionError> {
        south_west.validate()?;
        north_east.validate()?;
        if south_west.lat > north_east.lat || south_west.lng > north_east.lng {
            return Err(RegionError::InvertedCorners);
        }
        Ok(Self { south_west, north_east })
    }

    /// Build a region from any two opposite corners.
    ///
    /// # Errors
    ///
    /// Returns an error if a corner is invalid.
    pub fn from_corners(a: LatLng, b: LatLng) -> Result<Self, RegionError> {
        Self::from_vertices(&[a, b])
    }

    /// Bounding box of a drawn shape.
    ///
    /// # Errors
    ///
    /// Returns an error if `vertices` is empty or any vertex is invalid.
    pub fn from_vertices(vertices: &[LatLng]) -> Result<Self, RegionError> {
        let Some(first) = vertices.first() else {
            return Err(RegionError::NoVertices);
        };
        first.validate()?;

        let mut south_west = *first;
        let mut north_east = *first;
        for vertex in &vertices[1..] {
            vertex.validate()?;
            south_west.lat = south_west.lat.min(vertex.lat);
            south_west.lng = south_west.lng.min(vertex.lng);
            north_east.lat = north_east.lat.max(vertex.lat);
            north_east.lng = north_east.lng.max(vertex.lng);
        }
        Ok(Self { south_west, north_east })
    }

    #[must_use]
    pub fn south_west(&self) -> LatLng {
        self.south_west
    }

    #[must_use]
    pub fn north_east(&self) -> LatLng {
        self.north_east
    }
}

#[cfg(test)]
#[path = "geo_test.rs"]
mod tests;
