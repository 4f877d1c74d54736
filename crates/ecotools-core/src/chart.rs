//! Emission chart
//!
//! A canvas owns at most one live chart. Drawing a new chart destroys the
//! previous one first, so repeated calculations replace rather than stack.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::emission::EmissionResult;

/// One bar of the comparison chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    /// Axis label
    pub label: String,
    /// Bar height
    pub value: f64,
    /// CSS color
    pub color: String,
}

/// Chart contents, independent of how it is drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Legend text
    pub dataset_label: String,
    /// Bars left to right
    pub bars: Vec<ChartBar>,
}

impl ChartSpec {
    /// EV vs petrol bar chart, values rounded to 2 decimals
    pub fn for_emission(result: &EmissionResult) -> Self {
        Self {
            dataset_label: "CO₂ Emission (kg)".to_string(),
            bars: vec![
                ChartBar {
                    label: "EV".to_string(),
                    value: result.ev_display(),
                    color: "#22c55e".to_string(),
                },
                ChartBar {
                    label: "Petrol Car".to_string(),
                    value: result.petrol_display(),
                    color: "#3b82f6".to_string(),
                },
            ],
        }
    }

    /// Largest bar value, 0 for an empty chart
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }

    /// Render as horizontal text bars, `width` characters for the largest
    pub fn render_text(&self, width: usize) -> Vec<String> {
        let max = self.max_value();
        let label_width = self.bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);

        self.bars
            .iter()
            .map(|bar| {
                let len = if max > 0.0 {
                    ((bar.value / max) * width as f64).round() as usize
                } else {
                    0
                };
                format!(
                    "{:<lw$} |{} {:.2}",
                    bar.label,
                    "█".repeat(len),
                    bar.value,
                    lw = label_width
                )
            })
            .collect()
    }
}

/// A live chart instance.
///
/// Counts itself in the owning canvas while alive.
#[derive(Debug)]
pub struct EmissionChart {
    id: u64,
    spec: ChartSpec,
    live: Arc<AtomicUsize>,
}

impl EmissionChart {
    /// Sequence number within the canvas
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Chart contents
    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }
}

impl Drop for EmissionChart {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::AcqRel);
        tracing::debug!("destroyed chart #{}", self.id);
    }
}

/// Surface holding the current chart
#[derive(Debug, Default)]
pub struct ChartCanvas {
    current: Option<EmissionChart>,
    next_id: u64,
    destroyed: u64,
    live: Arc<AtomicUsize>,
}

impl ChartCanvas {
    /// Empty canvas
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy the current chart, if any, then create one from `spec`
    pub fn draw(&mut self, spec: ChartSpec) -> &EmissionChart {
        if let Some(old) = self.current.take() {
            drop(old);
            self.destroyed += 1;
        }

        self.next_id += 1;
        self.live.fetch_add(1, Ordering::AcqRel);
        tracing::debug!("created chart #{}", self.next_id);

        self.current.insert(EmissionChart {
            id: self.next_id,
            spec,
            live: self.live.clone(),
        })
    }

    /// Destroy the current chart without replacing it
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            self.destroyed += 1;
        }
    }

    /// Chart currently drawn
    pub fn current(&self) -> Option<&EmissionChart> {
        self.current.as_ref()
    }

    /// Chart instances currently alive; never more than one
    pub fn live_charts(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Charts destroyed over the canvas lifetime
    pub fn destroyed_charts(&self) -> u64 {
        self.destroyed
    }
}
