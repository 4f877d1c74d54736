use std::time::Duration;

use ecotools_core::config::{DashboardConfig, EcoConfig, SafetyConfig};
use ecotools_core::dashboard::VehicleDashboard;
use ecotools_core::random::{ScriptedRandom, StdRandom};
use ecotools_core::runner::WidgetRunner;
use ecotools_core::safety::{SafetyMonitor, SafetyStatus, IDLE_MESSAGE};

#[tokio::test(start_paused = true)]
async fn test_dashboard_ticks_every_two_seconds() {
    let config = DashboardConfig::default();
    let dash = VehicleDashboard::new(&config, Box::new(StdRandom::seeded(11)));
    let mut runner = WidgetRunner::spawn(dash, config.interval());

    assert_eq!(runner.current().battery_percent, 100.0);

    tokio::time::sleep(Duration::from_millis(6_100)).await;
    let battery = runner.current().battery_percent;
    assert!((battery - 99.1).abs() < 1e-9, "battery {}", battery);

    runner.stop();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(runner.current().battery_percent, battery);
}

#[tokio::test(start_paused = true)]
async fn test_monitor_publishes_status_after_first_tick() {
    let config = SafetyConfig::default();
    let monitor = SafetyMonitor::new(&config, Box::new(ScriptedRandom::new([])));
    let runner = WidgetRunner::spawn(monitor, config.interval());

    assert_eq!(runner.current().message(), IDLE_MESSAGE);

    let mut rx = runner.subscribe();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().status, Some(SafetyStatus::AllClear));
}

#[tokio::test(start_paused = true)]
async fn test_widgets_run_independently() {
    let safety = SafetyConfig::default();
    let dashboard = DashboardConfig {
        interval_ms: 500,
        ..DashboardConfig::default()
    };

    let mut monitor = WidgetRunner::spawn(
        SafetyMonitor::new(&safety, Box::new(StdRandom::seeded(1))),
        safety.interval(),
    );
    let dash = WidgetRunner::spawn(
        VehicleDashboard::new(&dashboard, Box::new(StdRandom::seeded(2))),
        dashboard.interval(),
    );

    monitor.stop();
    tokio::time::sleep(Duration::from_millis(2_100)).await;

    assert!(monitor.current().status.is_none());
    assert!(dash.is_running());
    assert!((dash.current().battery_percent - 98.8).abs() < 1e-9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_waits_for_task() {
    let config = DashboardConfig {
        interval_ms: 1,
        ..DashboardConfig::default()
    };
    let dash = VehicleDashboard::new(&config, Box::new(StdRandom::seeded(5)));
    let runner = WidgetRunner::spawn(dash, config.interval());
    let mut rx = runner.subscribe();

    tokio::time::sleep(Duration::from_millis(20)).await;
    runner.shutdown().await;

    // The task and its sender are gone, so no further update can arrive
    let last = *rx.borrow_and_update();
    assert!(rx.changed().await.is_err());
    assert_eq!(*rx.borrow(), last);
}

#[test]
fn test_zero_interval_config_never_reaches_runner() {
    let result = EcoConfig::from_json(r#"{ "dashboard": { "interval_ms": 0 } }"#);
    assert!(result.is_err());
}
