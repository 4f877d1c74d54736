//! # EcoTools Core Library
//!
//! Core functionality for the EV EcoTools utilities.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - CO₂ emission comparison between an EV and a petrol car, with a chart
//!   view that never holds more than one chart
//! - Route finding with energy estimate and nearby charging stations,
//!   behind a pluggable maps provider
//! - A simulated safety monitor (geo-fence and obstacle proximity)
//! - A simulated vehicle dashboard (position, battery, speed)
//! - Timer-driven widget runners with explicit start/stop lifecycle
//! - Persisted user preferences
//!
//! ## Example
//!
//! ```rust,ignore
//! use ecotools_core::prelude::*;
//!
//! let result = compute_emission(100.0)?;
//! println!("{}", result);
//!
//! let config = EcoConfig::default();
//! let monitor = SafetyMonitor::new(&config.safety, Box::new(StdRandom::new()));
//! let runner = WidgetRunner::spawn(monitor, config.safety.interval());
//! println!("{}", runner.current().message());
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod emission;
pub mod error;
pub mod geo;
pub mod random;
pub mod route;
pub mod runner;
pub mod safety;
pub mod settings;
pub mod units;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chart::{ChartCanvas, ChartSpec, EmissionChart};
    pub use crate::config::{DashboardConfig, EcoConfig, EmissionFactors, RouteConfig, SafetyConfig};
    pub use crate::dashboard::{Telemetry, VehicleDashboard};
    pub use crate::emission::{
        compute_emission, parse_distance, CalculatorOutput, EmissionCalculator, EmissionResult,
    };
    pub use crate::error::{ConfigError, InputError, ProviderError, RouteError};
    pub use crate::geo::{GeoFence, ObstacleSet, Position};
    pub use crate::random::{RandomSource, ScriptedRandom, StdRandom};
    pub use crate::route::{GoogleMaps, MapsProvider, RouteAdvisor, RouteSummary};
    pub use crate::runner::{Widget, WidgetRunner};
    pub use crate::safety::{RenderMode, SafetyMonitor, SafetyReading, SafetyStatus};
    pub use crate::settings::{DarkMode, PreferenceStore, Preferences};
    pub use crate::units::UnitsSystem;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
