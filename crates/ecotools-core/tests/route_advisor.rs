use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ecotools_core::config::{EmissionFactors, RouteConfig};
use ecotools_core::error::{ProviderError, RouteError};
use ecotools_core::geo::Position;
use ecotools_core::route::{
    DirectionsRequest, DirectionsResponse, MapsProvider, NearbySearchRequest,
    NearbySearchResponse, Place, Route, RouteAdvisor, RouteLeg, NO_STATIONS_MESSAGE,
};
use pretty_assertions::assert_eq;

/// Scripted provider that records every call
struct FakeMaps {
    directions: Mutex<Vec<Result<DirectionsResponse, ProviderError>>>,
    nearby: Mutex<Vec<Result<NearbySearchResponse, ProviderError>>>,
    route_calls: AtomicUsize,
    search_calls: AtomicUsize,
    last_route: Mutex<Option<DirectionsRequest>>,
    last_search: Mutex<Option<NearbySearchRequest>>,
}

impl FakeMaps {
    fn new(
        directions: Vec<Result<DirectionsResponse, ProviderError>>,
        nearby: Vec<Result<NearbySearchResponse, ProviderError>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            directions: Mutex::new(directions),
            nearby: Mutex::new(nearby),
            route_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            last_route: Mutex::new(None),
            last_search: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst) + self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MapsProvider for FakeMaps {
    async fn route(&self, request: &DirectionsRequest) -> Result<DirectionsResponse, ProviderError> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_route.lock().unwrap() = Some(request.clone());
        self.directions.lock().unwrap().remove(0)
    }

    async fn nearby_search(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<NearbySearchResponse, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() = Some(request.clone());
        self.nearby.lock().unwrap().remove(0)
    }
}

/// Provider whose calls never complete
struct StalledMaps;

#[async_trait]
impl MapsProvider for StalledMaps {
    async fn route(&self, _: &DirectionsRequest) -> Result<DirectionsResponse, ProviderError> {
        std::future::pending().await
    }

    async fn nearby_search(
        &self,
        _: &NearbySearchRequest,
    ) -> Result<NearbySearchResponse, ProviderError> {
        std::future::pending().await
    }
}

fn directions_ok(distance_m: f64, duration_s: f64) -> Result<DirectionsResponse, ProviderError> {
    Ok(DirectionsResponse {
        status: "OK".to_string(),
        routes: vec![Route {
            legs: vec![RouteLeg {
                distance_m,
                duration_s,
                start: Position::new(28.0, 77.0),
                end: Position::new(29.0, 78.0),
            }],
        }],
    })
}

fn stations(names: &[&str]) -> Result<NearbySearchResponse, ProviderError> {
    Ok(NearbySearchResponse {
        status: "OK".to_string(),
        results: names
            .iter()
            .map(|n| Place {
                name: n.to_string(),
            })
            .collect(),
    })
}

fn advisor(provider: Arc<dyn MapsProvider>) -> RouteAdvisor {
    RouteAdvisor::new(provider, &RouteConfig::default(), &EmissionFactors::default())
}

#[tokio::test]
async fn test_missing_endpoint_makes_no_calls() {
    let maps = FakeMaps::new(vec![], vec![]);
    let mut advisor = advisor(maps.clone());

    assert_eq!(
        advisor.find_route("", "Agra").await,
        Err(RouteError::MissingEndpoint)
    );
    assert_eq!(
        advisor.find_route("Delhi", "   ").await,
        Err(RouteError::MissingEndpoint)
    );
    assert_eq!(maps.calls(), 0);
}

#[tokio::test]
async fn test_successful_route() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let maps = FakeMaps::new(
        vec![directions_ok(233_400.0, 12_090.0)],
        vec![stations(&["S1", "S2", "S3", "S4", "S5", "S6", "S7"])],
    );
    let mut advisor = advisor(maps.clone());

    let summary = advisor.find_route("  Delhi ", "Agra").await.unwrap();
    assert_eq!(summary.distance_km, 233.4);
    assert_eq!(summary.duration_min, 202);
    assert_eq!(summary.energy_kwh, 233.4 / 6.0);
    assert_eq!(summary.nearby_stations, vec!["S1", "S2", "S3", "S4", "S5"]);
    assert_eq!(advisor.last_summary(), Some(&summary));

    let request = maps.last_route.lock().unwrap().clone().unwrap();
    assert_eq!(request, DirectionsRequest::driving("Delhi", "Agra"));

    let search = maps.last_search.lock().unwrap().clone().unwrap();
    assert_eq!(search.location, Position::new(28.5, 77.5));
    assert_eq!(search.radius_m, 5000);
    assert_eq!(search.category, "electric_vehicle_charging_station");
}

#[tokio::test]
async fn test_summary_text() {
    let maps = FakeMaps::new(vec![directions_ok(12_000.0, 1_500.0)], vec![stations(&["A", "B"])]);
    let mut advisor = advisor(maps);

    let summary = advisor.find_route("a", "b").await.unwrap();
    assert_eq!(
        summary.to_string(),
        "Distance: 12.0 km\n\
         Estimated Duration: 25 minutes\n\
         Estimated Energy Consumption: 2.00 kWh\n\
         Nearby EV Charging Stations: A, B"
    );
}

#[tokio::test]
async fn test_bad_status_keeps_previous_summary() {
    let maps = FakeMaps::new(
        vec![
            directions_ok(10_000.0, 600.0),
            Ok(DirectionsResponse {
                status: "ZERO_RESULTS".to_string(),
                routes: vec![],
            }),
        ],
        vec![stations(&["A"])],
    );
    let mut advisor = advisor(maps.clone());

    let first = advisor.find_route("a", "b").await.unwrap();
    let err = advisor.find_route("a", "nowhere").await.unwrap_err();

    assert_eq!(err, RouteError::Status("ZERO_RESULTS".to_string()));
    assert_eq!(err.to_string(), "ZERO_RESULTS");
    assert_eq!(advisor.last_summary(), Some(&first));
    // No station search for the failed route
    assert_eq!(maps.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_transport_error_fails_route() {
    let maps = FakeMaps::new(vec![Err(ProviderError::Http("connection reset".into()))], vec![]);
    let mut advisor = advisor(maps);

    let err = advisor.find_route("a", "b").await.unwrap_err();
    assert!(matches!(err, RouteError::Provider(ProviderError::Http(_))));
    assert!(advisor.last_summary().is_none());
}

#[tokio::test]
async fn test_ok_without_legs_is_empty_route() {
    let maps = FakeMaps::new(
        vec![Ok(DirectionsResponse {
            status: "OK".to_string(),
            routes: vec![Route::default()],
        })],
        vec![],
    );
    let mut advisor = advisor(maps);
    assert_eq!(advisor.find_route("a", "b").await, Err(RouteError::EmptyRoute));
}

#[tokio::test]
async fn test_station_search_degrades() {
    let maps = FakeMaps::new(
        vec![
            directions_ok(1_000.0, 60.0),
            directions_ok(1_000.0, 60.0),
            directions_ok(1_000.0, 60.0),
        ],
        vec![
            Err(ProviderError::Http("boom".into())),
            Ok(NearbySearchResponse {
                status: "REQUEST_DENIED".to_string(),
                results: vec![],
            }),
            stations(&[]),
        ],
    );
    let mut advisor = advisor(maps);

    for _ in 0..3 {
        let summary = advisor.find_route("a", "b").await.unwrap();
        assert!(summary.nearby_stations.is_empty());
        assert_eq!(summary.stations_display(), NO_STATIONS_MESSAGE);
    }
}

#[tokio::test(start_paused = true)]
async fn test_directions_timeout() {
    let mut advisor = advisor(Arc::new(StalledMaps));
    assert_eq!(advisor.find_route("a", "b").await, Err(RouteError::Timeout));
}

/// Provider whose directions succeed but whose station search never completes
struct StalledSearchMaps;

#[async_trait]
impl MapsProvider for StalledSearchMaps {
    async fn route(&self, _: &DirectionsRequest) -> Result<DirectionsResponse, ProviderError> {
        directions_ok(50_000.0, 3_000.0)
    }

    async fn nearby_search(
        &self,
        _: &NearbySearchRequest,
    ) -> Result<NearbySearchResponse, ProviderError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn test_station_search_timeout_degrades() {
    let mut advisor = advisor(Arc::new(StalledSearchMaps));

    let summary = advisor.find_route("a", "b").await.unwrap();
    assert_eq!(summary.distance_km, 50.0);
    assert_eq!(summary.duration_min, 50);
    assert!(summary.nearby_stations.is_empty());
    assert_eq!(summary.stations_display(), NO_STATIONS_MESSAGE);
    assert_eq!(advisor.last_summary(), Some(&summary));
}
