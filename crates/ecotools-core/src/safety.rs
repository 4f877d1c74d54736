//! Safety Monitor
//!
//! Simulated vehicle tracking against a static geo-fence and a static
//! obstacle list. Every position update re-evaluates the status, so the
//! status can never lag behind the position it describes.

use serde::Serialize;

use crate::config::SafetyConfig;
use crate::geo::{GeoFence, ObstacleSet, Position};
use crate::random::RandomSource;
use crate::runner::Widget;

/// Status shown before the first position update
pub const IDLE_MESSAGE: &str = "System Ready...";

/// Monitor state, re-derived on every position update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStatus {
    /// Inside the fence, no obstacle close
    AllClear,
    /// Inside the fence, obstacle within range
    ObstacleNearby,
    /// Outside the fence
    OutOfFence,
}

impl SafetyStatus {
    /// Only obstacle proximity counts as danger; leaving the fence does not
    pub fn is_danger(&self) -> bool {
        matches!(self, SafetyStatus::ObstacleNearby)
    }

    /// Status line text
    pub fn message(&self) -> &'static str {
        match self {
            SafetyStatus::AllClear => "✅ All Clear",
            SafetyStatus::ObstacleNearby => "⚠️ Obstacle nearby!",
            SafetyStatus::OutOfFence => "🚫 Vehicle out of geo-fence!",
        }
    }

    /// Visual treatment for this status
    pub fn render_mode(&self) -> RenderMode {
        if self.is_danger() {
            RenderMode::Danger
        } else {
            RenderMode::Normal
        }
    }
}

/// Visual treatment selected by the danger flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Regular styling
    Normal,
    /// Alert styling
    Danger,
}

/// Evaluate a position.
///
/// Rules apply in priority order: leaving the fence beats obstacle
/// proximity even when both hold.
pub fn evaluate(
    pos: &Position,
    fence: &GeoFence,
    obstacles: &ObstacleSet,
    obstacle_radius: f64,
) -> SafetyStatus {
    if fence.is_outside(pos) {
        SafetyStatus::OutOfFence
    } else if obstacles.any_within(pos, obstacle_radius) {
        SafetyStatus::ObstacleNearby
    } else {
        SafetyStatus::AllClear
    }
}

/// Snapshot published to renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SafetyReading {
    /// Position at the last update
    pub position: Position,
    /// `None` until the first tick
    pub status: Option<SafetyStatus>,
}

impl SafetyReading {
    /// Status line text, or the idle message before the first update
    pub fn message(&self) -> &'static str {
        self.status.map(|s| s.message()).unwrap_or(IDLE_MESSAGE)
    }

    /// True while an obstacle is nearby
    pub fn danger(&self) -> bool {
        self.status.is_some_and(|s| s.is_danger())
    }

    /// Visual treatment for this status
    pub fn render_mode(&self) -> RenderMode {
        self.status
            .map(|s| s.render_mode())
            .unwrap_or(RenderMode::Normal)
    }
}

/// Geo-fence and obstacle monitor driven by a random walk
pub struct SafetyMonitor {
    fence: GeoFence,
    obstacles: ObstacleSet,
    obstacle_radius: f64,
    walk_step: f64,
    position: Position,
    status: Option<SafetyStatus>,
    rng: Box<dyn RandomSource>,
}

impl SafetyMonitor {
    /// Create a monitor; no status is derived until the first update
    pub fn new(config: &SafetyConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            fence: config.fence,
            obstacles: config.obstacles.clone(),
            obstacle_radius: config.obstacle_radius,
            walk_step: config.walk_step,
            position: config.start,
            status: None,
            rng,
        }
    }

    /// Move to `pos` and re-evaluate
    pub fn set_position(&mut self, pos: Position) -> SafetyStatus {
        self.position = pos;
        let status = evaluate(
            &self.position,
            &self.fence,
            &self.obstacles,
            self.obstacle_radius,
        );
        if self.status != Some(status) {
            tracing::debug!(
                "safety status {:?} -> {:?} at ({:.4}, {:.4})",
                self.status,
                status,
                pos.latitude,
                pos.longitude
            );
        }
        self.status = Some(status);
        status
    }

    /// Advance the random walk by one step
    pub fn step(&mut self) -> SafetyStatus {
        let mut next = self.position;
        next.random_walk(self.walk_step, self.rng.as_mut());
        self.set_position(next)
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Status at the current position, `None` before the first update
    pub fn status(&self) -> Option<SafetyStatus> {
        self.status
    }

    /// True while an obstacle is nearby
    pub fn danger(&self) -> bool {
        self.status.is_some_and(|s| s.is_danger())
    }

    /// Configured fence
    pub fn fence(&self) -> &GeoFence {
        &self.fence
    }

    /// Configured obstacles
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// Snapshot for renderers
    pub fn reading(&self) -> SafetyReading {
        SafetyReading {
            position: self.position,
            status: self.status,
        }
    }
}

impl Widget for SafetyMonitor {
    type View = SafetyReading;

    fn tick(&mut self) {
        self.step();
    }

    fn view(&self) -> SafetyReading {
        self.reading()
    }
}
