//! Planar lat/lng geometry
//!
//! All distances here are Euclidean on raw degrees. None of this is
//! geodesic; it only has to be consistent with the fence and obstacle
//! thresholds, which are expressed in degrees too.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
}

impl Position {
    /// Create a position from latitude and longitude
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Euclidean distance in degrees
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }

    /// Arithmetic mean of both coordinates
    pub fn midpoint(&self, other: &Position) -> Position {
        Position {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }

    /// Shift each axis by an independent uniform delta in `[-step, +step)`.
    ///
    /// Unbounded: the walk may leave any fence.
    pub fn random_walk(&mut self, step: f64, rng: &mut dyn RandomSource) {
        self.latitude += rng.next_delta(step);
        self.longitude += rng.next_delta(step);
    }
}

/// Rectangular lat/lng boundary.
///
/// The four bounds are literal comparison thresholds. No compass
/// semantics (such as antimeridian wrapping) are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFence {
    /// Latitudes above this are outside
    pub north: f64,
    /// Latitudes below this are outside
    pub south: f64,
    /// Longitudes above this are outside
    pub east: f64,
    /// Longitudes below this are outside
    pub west: f64,
}

impl GeoFence {
    /// True if the position lies strictly beyond any bound
    pub fn is_outside(&self, pos: &Position) -> bool {
        pos.latitude > self.north
            || pos.latitude < self.south
            || pos.longitude > self.east
            || pos.longitude < self.west
    }
}

impl Default for GeoFence {
    fn default() -> Self {
        Self {
            north: 50.0,
            south: 40.0,
            east: -70.0,
            west: -80.0,
        }
    }
}

/// Immutable, ordered list of hazard coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleSet(Vec<Position>);

impl ObstacleSet {
    /// Wrap a list of obstacle positions
    pub fn new(obstacles: Vec<Position>) -> Self {
        Self(obstacles)
    }

    /// True if any obstacle lies strictly closer than `radius`
    pub fn any_within(&self, pos: &Position, radius: f64) -> bool {
        self.0.iter().any(|ob| pos.distance_to(ob) < radius)
    }

    /// Obstacles in configured order
    pub fn as_slice(&self) -> &[Position] {
        &self.0
    }

    /// Number of obstacles
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no obstacles
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ObstacleSet {
    fn default() -> Self {
        Self(vec![Position::new(45.2, -74.9), Position::new(44.8, -75.1)])
    }
}
