//! Configuration
//!
//! Every constant the tools rely on lives here with its default value. A
//! JSON file may override any subset of fields; missing fields keep their
//! defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geo::{GeoFence, ObstacleSet, Position};

/// Energy/emission factors shared by the calculator and the route advisor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    /// Kilometers driven per kWh
    pub efficiency_km_per_kwh: f64,
    /// kg CO₂ emitted per kWh of grid electricity
    pub grid_kg_per_kwh: f64,
    /// kg CO₂ emitted per km by a petrol car
    pub petrol_kg_per_km: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            efficiency_km_per_kwh: 6.0,
            grid_kg_per_kwh: 0.4,
            petrol_kg_per_km: 0.192,
        }
    }
}

/// Safety monitor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Tick period in milliseconds, must be non-zero
    pub interval_ms: u64,
    /// Allowed area
    pub fence: GeoFence,
    /// Hazard positions
    pub obstacles: ObstacleSet,
    /// Initial position
    pub start: Position,
    /// Obstacle proximity threshold in degrees
    pub obstacle_radius: f64,
    /// Half-width of the per-tick random walk in degrees
    pub walk_step: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            fence: GeoFence::default(),
            obstacles: ObstacleSet::default(),
            start: Position::new(45.0, -75.0),
            obstacle_radius: 0.2,
            walk_step: 0.05,
        }
    }
}

impl SafetyConfig {
    /// Tick period
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Vehicle dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Tick period in milliseconds, must be non-zero
    pub interval_ms: u64,
    /// Initial position
    pub start: Position,
    /// Initial charge
    pub start_battery_percent: f64,
    /// Battery drained per tick, in percent
    pub battery_step: f64,
    /// Speeds are drawn from `[0, max_speed_kmh)`
    pub max_speed_kmh: u32,
    /// Half-width of the per-tick random walk in degrees
    pub walk_step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            start: Position::default(),
            start_battery_percent: 100.0,
            battery_step: 0.3,
            max_speed_kmh: 100,
            walk_step: 0.05,
        }
    }
}

impl DashboardConfig {
    /// Tick period
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Route advisor and maps provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Upper bound for each provider call
    pub timeout_ms: u64,
    /// Station search radius in meters
    pub search_radius_m: u32,
    /// Station names kept from the search
    pub max_stations: usize,
    /// Place category for the station search
    pub station_category: String,
    /// Maps API key. `None` falls back to the `GOOGLE_MAPS_API_KEY` variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            search_radius_m: 5000,
            max_stations: 5,
            station_category: "electric_vehicle_charging_station".to_string(),
            api_key: None,
        }
    }
}

impl RouteConfig {
    /// Per-call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Configured key, or the `GOOGLE_MAPS_API_KEY` environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_MAPS_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EcoConfig {
    /// Shared energy and emission factors
    pub emission: EmissionFactors,
    /// Safety monitor
    pub safety: SafetyConfig,
    /// Vehicle dashboard
    pub dashboard: DashboardConfig,
    /// Route advisor
    pub route: RouteConfig,
}

impl EcoConfig {
    /// Load from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a JSON document
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the widgets cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.safety.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("safety"));
        }
        if self.dashboard.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("dashboard"));
        }
        Ok(())
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
