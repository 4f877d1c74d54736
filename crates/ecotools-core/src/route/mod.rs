//! Route finding
//!
//! - `provider` - request/response types and the [`MapsProvider`] trait
//! - `google` - Google Maps web-service implementation
//! - `advisor` - route summary with energy estimate and charging stations

mod advisor;
mod google;
mod provider;

pub use advisor::{RouteAdvisor, RouteSummary, NO_STATIONS_MESSAGE};
pub use google::GoogleMaps;
pub use provider::{
    DirectionsRequest, DirectionsResponse, MapsProvider, NearbySearchRequest,
    NearbySearchResponse, Place, Route, RouteLeg, TrafficModel, TravelMode, STATUS_OK,
};
