//! Route advisor
//!
//! Runs the two provider calls strictly in sequence: directions first,
//! then a charging-station search around the route midpoint. The summary
//! is stored only after the station search settles.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::provider::{DirectionsRequest, MapsProvider, NearbySearchRequest};
use crate::config::{EmissionFactors, RouteConfig};
use crate::error::RouteError;
use crate::geo::Position;
use crate::units::{km_to_miles, meters_to_km, seconds_to_minutes, UnitsSystem};

/// Station line shown when the search fails or finds nothing
pub const NO_STATIONS_MESSAGE: &str = "None found nearby.";

/// Route figures held for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// Route length
    pub distance_km: f64,
    /// Travel time rounded to whole minutes
    pub duration_min: i64,
    /// Distance over the EV efficiency factor
    pub energy_kwh: f64,
    /// At most `max_stations` names, in provider order
    pub nearby_stations: Vec<String>,
}

impl RouteSummary {
    /// The station line content
    pub fn stations_display(&self) -> String {
        if self.nearby_stations.is_empty() {
            NO_STATIONS_MESSAGE.to_string()
        } else {
            self.nearby_stations.join(", ")
        }
    }

    /// Summary lines with the distance in the requested unit system
    pub fn lines(&self, units: UnitsSystem) -> Vec<String> {
        let distance = match units {
            UnitsSystem::Metric => format!("{:.1} km", self.distance_km),
            UnitsSystem::Imperial => format!("{:.1} mi", km_to_miles(self.distance_km)),
        };

        vec![
            format!("Distance: {}", distance),
            format!("Estimated Duration: {} minutes", self.duration_min),
            format!("Estimated Energy Consumption: {:.2} kWh", self.energy_kwh),
            format!("Nearby EV Charging Stations: {}", self.stations_display()),
        ]
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines(UnitsSystem::Metric).join("\n"))
    }
}

/// Route finder backed by a [`MapsProvider`]
pub struct RouteAdvisor {
    provider: Arc<dyn MapsProvider>,
    efficiency_km_per_kwh: f64,
    search_radius_m: u32,
    max_stations: usize,
    station_category: String,
    timeout: Duration,
    last: Option<RouteSummary>,
}

impl RouteAdvisor {
    /// Create an advisor with no stored summary
    pub fn new(
        provider: Arc<dyn MapsProvider>,
        config: &RouteConfig,
        factors: &EmissionFactors,
    ) -> Self {
        Self {
            provider,
            efficiency_km_per_kwh: factors.efficiency_km_per_kwh,
            search_radius_m: config.search_radius_m,
            max_stations: config.max_stations,
            station_category: config.station_category.clone(),
            timeout: config.timeout(),
            last: None,
        }
    }

    /// Find a driving route and the charging stations near its midpoint.
    ///
    /// On any error the previously stored summary is kept.
    pub async fn find_route(
        &mut self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteSummary, RouteError> {
        let origin = origin.trim();
        let destination = destination.trim();
        if origin.is_empty() || destination.is_empty() {
            return Err(RouteError::MissingEndpoint);
        }

        let request = DirectionsRequest::driving(origin, destination);
        let response = tokio::time::timeout(self.timeout, self.provider.route(&request))
            .await
            .map_err(|_| RouteError::Timeout)??;

        if !response.is_ok() {
            tracing::info!(
                "no route from {:?} to {:?}: {}",
                origin,
                destination,
                response.status
            );
            return Err(RouteError::Status(response.status));
        }

        let leg = response.first_leg().ok_or(RouteError::EmptyRoute)?;
        let distance_km = meters_to_km(leg.distance_m);
        let duration_min = seconds_to_minutes(leg.duration_s);
        let energy_kwh = distance_km / self.efficiency_km_per_kwh;
        let midpoint = leg.start.midpoint(&leg.end);

        let nearby_stations = self.stations_near(midpoint).await;

        let summary = RouteSummary {
            distance_km,
            duration_min,
            energy_kwh,
            nearby_stations,
        };
        tracing::info!(
            "route {:?} -> {:?}: {:.1} km, {} min, {} stations",
            origin,
            destination,
            summary.distance_km,
            summary.duration_min,
            summary.nearby_stations.len()
        );

        self.last = Some(summary.clone());
        Ok(summary)
    }

    /// Best-effort station search; every failure yields an empty list
    async fn stations_near(&self, location: Position) -> Vec<String> {
        let request = NearbySearchRequest {
            location,
            radius_m: self.search_radius_m,
            category: self.station_category.clone(),
        };

        match tokio::time::timeout(self.timeout, self.provider.nearby_search(&request)).await {
            Ok(Ok(response)) if response.is_ok() => response
                .results
                .into_iter()
                .take(self.max_stations)
                .map(|p| p.name)
                .collect(),
            Ok(Ok(response)) => {
                tracing::warn!("station search returned {}", response.status);
                Vec::new()
            }
            Ok(Err(e)) => {
                tracing::warn!("station search failed: {}", e);
                Vec::new()
            }
            Err(_) => {
                tracing::warn!("station search timed out after {:?}", self.timeout);
                Vec::new()
            }
        }
    }

    /// Last successfully computed summary
    pub fn last_summary(&self) -> Option<&RouteSummary> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(stations: &[&str]) -> RouteSummary {
        RouteSummary {
            distance_km: 12.34,
            duration_min: 20,
            energy_kwh: 12.34 / 6.0,
            nearby_stations: stations.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_summary_lines() {
        assert_eq!(
            summary(&["A", "B"]).lines(UnitsSystem::Metric),
            vec![
                "Distance: 12.3 km".to_string(),
                "Estimated Duration: 20 minutes".to_string(),
                "Estimated Energy Consumption: 2.06 kWh".to_string(),
                "Nearby EV Charging Stations: A, B".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_station_line() {
        assert_eq!(summary(&[]).stations_display(), NO_STATIONS_MESSAGE);
    }

    #[test]
    fn test_imperial_distance() {
        let lines = summary(&[]).lines(UnitsSystem::Imperial);
        assert_eq!(lines[0], "Distance: 7.7 mi");
    }
}
