//! EcoTools terminal front-end

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use ecotools_core::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, propagate_version = true)]
#[command(about = "EV CO₂ calculator, route finder and simulated vehicle monitors", long_about = None)]
struct Args {
    /// Configuration file (JSON).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Settings file. Defaults to the app data directory.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    /// Level of verbosity.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare EV and petrol CO₂ emissions for a trip.
    Calc {
        /// Distance in km.
        distance: String,
    },
    /// Find a driving route with energy estimate and charging stations.
    Route {
        origin: String,
        destination: String,
        /// Maps API key.
        #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Run the safety monitor and vehicle dashboard.
    Monitor {
        /// Stop after this many seconds; runs until Ctrl-C otherwise.
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Show or toggle dark mode.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Set the display unit system.
    Units { system: UnitsArg },
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitsArg {
    Metric,
    Imperial,
}

impl From<UnitsArg> for UnitsSystem {
    fn from(u: UnitsArg) -> Self {
        match u {
            UnitsArg::Metric => UnitsSystem::Metric,
            UnitsArg::Imperial => UnitsSystem::Imperial,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    let config = EcoConfig::load(args.config.as_deref()).context("loading configuration")?;
    let store = match args.settings {
        Some(path) => Ok(path),
        None => PreferenceStore::default_path(),
    }
    .map(PreferenceStore::open);
    let units = display_units(&store);

    match args.command {
        Command::Calc { distance } => run_calc(&config, &distance, units),
        Command::Route {
            origin,
            destination,
            api_key,
        } => {
            let route = RouteConfig {
                api_key: api_key.or(config.route.api_key.clone()),
                ..config.route.clone()
            };
            run_route(&route, &config.emission, &origin, &destination, units).await
        }
        Command::Monitor { seconds } => {
            run_monitor(&config, seconds.map(Duration::from_secs), units).await
        }
        Command::Theme { toggle } => {
            let mut store = store.context("locating settings file")?;
            let mode = if toggle {
                store.toggle_dark_mode()?
            } else {
                store.preferences().dark_mode
            };
            let state = if mode.is_enabled() { "enabled" } else { "disabled" };
            println!("Dark mode: {}", state);
            Ok(())
        }
        Command::Units { system } => {
            let mut store = store.context("locating settings file")?;
            store.set_units_system(system.into())?;
            println!("Units: {:?}", store.preferences().units_system);
            Ok(())
        }
    }
}

/// Display units from the settings file, or the default when there is none
fn display_units(store: &Result<PreferenceStore, ConfigError>) -> UnitsSystem {
    match store {
        Ok(store) => {
            tracing::debug!("settings at {}", store.path().display());
            store.preferences().units_system
        }
        Err(e) => {
            tracing::warn!("using default preferences: {}", e);
            Preferences::default().units_system
        }
    }
}

fn run_calc(config: &EcoConfig, distance: &str, units: UnitsSystem) -> anyhow::Result<()> {
    let mut calculator = EmissionCalculator::new(config.emission);

    match calculator.calculate(distance) {
        CalculatorOutput::Result(result) => {
            for line in result.summary(units) {
                println!("{}", line);
            }
            if let Some(chart) = calculator.chart() {
                println!();
                println!("{}", chart.spec().dataset_label);
                for line in chart.spec().render_text(40) {
                    println!("{}", line);
                }
            }
        }
        CalculatorOutput::Invalid(message) => println!("{}", message),
    }

    Ok(())
}

async fn run_route(
    route: &RouteConfig,
    factors: &EmissionFactors,
    origin: &str,
    destination: &str,
    units: UnitsSystem,
) -> anyhow::Result<()> {
    let maps = GoogleMaps::with_key(route.resolve_api_key())?;
    let mut advisor = RouteAdvisor::new(Arc::new(maps), route, factors);

    match advisor.find_route(origin, destination).await {
        Ok(summary) => {
            for line in summary.lines(units) {
                println!("{}", line);
            }
            Ok(())
        }
        Err(RouteError::MissingEndpoint) => {
            anyhow::bail!("Please enter both start and destination locations.")
        }
        Err(e) => anyhow::bail!("Could not find route: {}", e),
    }
}

async fn run_monitor(
    config: &EcoConfig,
    limit: Option<Duration>,
    units: UnitsSystem,
) -> anyhow::Result<()> {
    let monitor = SafetyMonitor::new(&config.safety, Box::new(StdRandom::new()));
    let dashboard = VehicleDashboard::new(&config.dashboard, Box::new(StdRandom::new()));

    let safety = WidgetRunner::spawn(monitor, config.safety.interval());
    let vehicle = WidgetRunner::spawn(dashboard, config.dashboard.interval());

    let mut safety_rx = safety.subscribe();
    let mut vehicle_rx = vehicle.subscribe();

    println!("{}", safety.current().message());

    let deadline = async {
        match limit {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            changed = safety_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let reading = *safety_rx.borrow_and_update();
                print_safety(&reading);
            }
            changed = vehicle_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let telemetry = *vehicle_rx.borrow_and_update();
                print_telemetry(&telemetry, units);
            }
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    safety.shutdown().await;
    vehicle.shutdown().await;
    Ok(())
}

fn print_safety(reading: &SafetyReading) {
    let marker = match reading.render_mode() {
        RenderMode::Danger => "!!",
        RenderMode::Normal => "  ",
    };
    println!(
        "{} [safety] {:>9.4} {:>9.4}  {}",
        marker,
        reading.position.latitude,
        reading.position.longitude,
        reading.message()
    );
}

fn print_telemetry(telemetry: &Telemetry, units: UnitsSystem) {
    let (lat, lng) = telemetry.coordinates_display();
    println!(
        "   [vehicle] {:>9} {:>9}  speed {:>8}  battery {:>4}",
        lat,
        lng,
        telemetry.speed_display(units),
        telemetry.battery_display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_dir_falls_back_to_default_units() {
        let store = Err(ConfigError::NoDataDir);
        assert_eq!(display_units(&store), UnitsSystem::Metric);
    }

    #[test]
    fn test_units_read_from_settings_file() {
        let path = std::env::temp_dir().join(format!("ecotools-units-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "darkMode": "disabled", "units_system": "imperial" }"#).unwrap();

        let store = Ok(PreferenceStore::open(&path));
        assert_eq!(display_units(&store), UnitsSystem::Imperial);

        std::fs::remove_file(&path).unwrap();
    }
}
