//! Vehicle Dashboard
//!
//! Simulated telemetry generator for the dashboard widget.
//! Position wanders, the battery drains at a fixed rate and the speed is
//! redrawn every tick.

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::geo::Position;
use crate::random::RandomSource;
use crate::runner::Widget;
use crate::units::{kmh_to_mph, UnitsSystem};

/// Current simulated telemetry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Telemetry {
    /// Simulated latitude
    pub latitude: f64,
    /// Simulated longitude
    pub longitude: f64,
    /// Charge left, never below 0
    pub battery_percent: f64,
    /// Current speed
    pub speed_kmh: u32,
}

impl Telemetry {
    /// Speed formatted for the chosen unit system, e.g. `"42 km/h"`
    pub fn speed_display(&self, units: UnitsSystem) -> String {
        match units {
            UnitsSystem::Metric => format!("{} km/h", self.speed_kmh),
            UnitsSystem::Imperial => format!("{:.0} mph", kmh_to_mph(self.speed_kmh as f64)),
        }
    }

    /// Battery as a whole percentage, e.g. `"87%"`
    pub fn battery_display(&self) -> String {
        format!("{:.0}%", self.battery_percent)
    }

    /// Latitude and longitude to 4 decimals
    pub fn coordinates_display(&self) -> (String, String) {
        (
            format!("{:.4}", self.latitude),
            format!("{:.4}", self.longitude),
        )
    }
}

/// Telemetry simulator.
///
/// Holds its own position, independent of any other widget.
pub struct VehicleDashboard {
    position: Position,
    battery_percent: f64,
    speed_kmh: u32,
    battery_step: f64,
    max_speed_kmh: u32,
    walk_step: f64,
    rng: Box<dyn RandomSource>,
}

impl VehicleDashboard {
    /// Create a dashboard at the configured start, speed 0
    pub fn new(config: &DashboardConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            position: config.start,
            battery_percent: config.start_battery_percent.max(0.0),
            speed_kmh: 0,
            battery_step: config.battery_step.max(0.0),
            max_speed_kmh: config.max_speed_kmh,
            walk_step: config.walk_step,
            rng,
        }
    }

    /// Advance one refresh period
    pub fn step(&mut self) -> Telemetry {
        self.position.random_walk(self.walk_step, self.rng.as_mut());
        self.battery_percent = (self.battery_percent - self.battery_step).max(0.0);
        self.speed_kmh = self.rng.next_below(self.max_speed_kmh);
        self.telemetry()
    }

    /// Current telemetry without advancing
    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            latitude: self.position.latitude,
            longitude: self.position.longitude,
            battery_percent: self.battery_percent,
            speed_kmh: self.speed_kmh,
        }
    }
}

impl Widget for VehicleDashboard {
    type View = Telemetry;

    fn tick(&mut self) {
        self.step();
    }

    fn view(&self) -> Telemetry {
        self.telemetry()
    }
}
