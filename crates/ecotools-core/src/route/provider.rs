//! Maps provider contract
//!
//! Request/response shapes for the two external calls the route advisor
//! makes, and the trait any provider implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::geo::Position;

/// Status string reported on success by both provider calls
pub const STATUS_OK: &str = "OK";

/// Travel mode for directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// Car routing
    Driving,
}

impl TravelMode {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
        }
    }
}

/// Traffic assumption for duration estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficModel {
    /// Best estimate from historical and live traffic
    BestGuess,
}

impl TrafficModel {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficModel::BestGuess => "best_guess",
        }
    }
}

/// Directions request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsRequest {
    /// Free-text start location
    pub origin: String,
    /// Free-text end location
    pub destination: String,
    /// Travel mode
    pub mode: TravelMode,
    /// Traffic model
    pub traffic_model: TrafficModel,
}

impl DirectionsRequest {
    /// Traffic-aware driving directions
    pub fn driving(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode: TravelMode::Driving,
            traffic_model: TrafficModel::BestGuess,
        }
    }
}

/// One leg of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Leg length in meters
    pub distance_m: f64,
    /// Travel time in seconds
    pub duration_s: f64,
    /// Start coordinates
    pub start: Position,
    /// End coordinates
    pub end: Position,
}

/// One candidate route
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    /// Legs in travel order
    pub legs: Vec<RouteLeg>,
}

/// Directions response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    /// Provider status, `OK` on success
    pub status: String,
    /// Candidate routes, best first
    pub routes: Vec<Route>,
}

impl DirectionsResponse {
    /// True if the provider reported `OK`
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// First leg of the first route
    pub fn first_leg(&self) -> Option<&RouteLeg> {
        self.routes.first().and_then(|r| r.legs.first())
    }
}

/// Nearby-search request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbySearchRequest {
    /// Search center
    pub location: Position,
    /// Search radius in meters
    pub radius_m: u32,
    /// Place category to search for
    pub category: String,
}

/// A search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name
    pub name: String,
}

/// Nearby-search response, results in provider order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySearchResponse {
    /// Provider status, `OK` on success
    pub status: String,
    /// Matching places
    pub results: Vec<Place>,
}

impl NearbySearchResponse {
    /// True if the provider reported `OK`
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Directions and places backend.
///
/// A returned `Err` is a transport failure; provider-level failures come
/// back as `Ok` with a non-`OK` status.
#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// Request directions
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, ProviderError>;

    /// Search for places near a location
    async fn nearby_search(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<NearbySearchResponse, ProviderError>;
}
