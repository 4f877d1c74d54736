//! Google Maps web-service provider
//!
//! Talks to the Directions and Places Nearby Search JSON APIs.
//!
//! ## Usage
//!
//! ```ignore
//! let maps = GoogleMaps::new(api_key);
//! let response = maps.route(&DirectionsRequest::driving("Delhi", "Agra")).await?;
//! ```

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{
    DirectionsRequest, DirectionsResponse, MapsProvider, NearbySearchRequest,
    NearbySearchResponse, Place, Route, RouteLeg,
};
use crate::error::ProviderError;
use crate::geo::Position;

const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// Directions API response body
#[derive(Debug, Deserialize)]
struct ApiDirections {
    status: String,
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    legs: Vec<ApiLeg>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    distance: ApiValue,
    duration: ApiValue,
    start_location: ApiLatLng,
    end_location: ApiLatLng,
}

/// `{ "text": "...", "value": n }` pair; only the value is used
#[derive(Debug, Deserialize)]
struct ApiValue {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct ApiLatLng {
    lat: f64,
    lng: f64,
}

impl From<ApiLatLng> for Position {
    fn from(p: ApiLatLng) -> Self {
        Position::new(p.lat, p.lng)
    }
}

/// Places Nearby Search response body
#[derive(Debug, Deserialize)]
struct ApiNearby {
    status: String,
    #[serde(default)]
    results: Vec<ApiPlace>,
}

#[derive(Debug, Deserialize)]
struct ApiPlace {
    name: String,
}

impl From<ApiDirections> for DirectionsResponse {
    fn from(api: ApiDirections) -> Self {
        DirectionsResponse {
            status: api.status,
            routes: api
                .routes
                .into_iter()
                .map(|r| Route {
                    legs: r
                        .legs
                        .into_iter()
                        .map(|leg| RouteLeg {
                            distance_m: leg.distance.value,
                            duration_s: leg.duration.value,
                            start: leg.start_location.into(),
                            end: leg.end_location.into(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<ApiNearby> for NearbySearchResponse {
    fn from(api: ApiNearby) -> Self {
        NearbySearchResponse {
            status: api.status,
            results: api
                .results
                .into_iter()
                .map(|p| Place { name: p.name })
                .collect(),
        }
    }
}

/// Google Maps client
pub struct GoogleMaps {
    client: reqwest::Client,
    api_key: String,
}

impl GoogleMaps {
    /// Create a client for `api_key`
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("EcoTools/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        GoogleMaps {
            client,
            api_key: api_key.into(),
        }
    }

    /// Create a client, failing if the key is empty
    pub fn with_key(api_key: Option<String>) -> Result<Self, ProviderError> {
        match api_key {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(ProviderError::MissingApiKey),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(format!(
                "Maps API error: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MapsProvider for GoogleMaps {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, ProviderError> {
        let query = [
            ("origin", request.origin.clone()),
            ("destination", request.destination.clone()),
            ("mode", request.mode.as_str().to_string()),
            // traffic_model is only honoured together with a departure time
            ("departure_time", "now".to_string()),
            ("traffic_model", request.traffic_model.as_str().to_string()),
        ];

        let body: ApiDirections = self.get_json(DIRECTIONS_URL, &query).await?;
        Ok(body.into())
    }

    async fn nearby_search(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<NearbySearchResponse, ProviderError> {
        let query = [
            (
                "location",
                format!(
                    "{},{}",
                    request.location.latitude, request.location.longitude
                ),
            ),
            ("radius", request.radius_m.to_string()),
            ("type", request.category.clone()),
        ];

        let body: ApiNearby = self.get_json(NEARBY_SEARCH_URL, &query).await?;
        Ok(body.into())
    }
}
