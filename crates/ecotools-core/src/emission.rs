//! EV CO₂ Emission Calculator
//!
//! Compares the CO₂ footprint of a trip driven in an EV against the same
//! trip in a petrol car:
//!
//! ```text
//! ev     = distance / efficiency * grid_factor
//! petrol = distance * petrol_factor
//! saved  = petrol - ev
//! ```
//!
//! [`EmissionCalculator`] wraps the pure formula with the view state the
//! calculator needs: the last outcome and the single chart it owns.

use std::fmt;

use serde::Serialize;

use crate::chart::{ChartCanvas, ChartSpec, EmissionChart};
use crate::config::EmissionFactors;
use crate::error::InputError;
use crate::units::{kg_to_lbs, round_to, UnitsSystem};

/// Validation message shown in place of a result
pub const INVALID_DISTANCE_MESSAGE: &str = "Please enter a valid distance.";

/// Emission figures for one trip, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionResult {
    /// Trip distance
    pub distance_km: f64,
    /// CO₂ attributed to charging the EV
    pub ev_emission_kg: f64,
    /// CO₂ emitted by a petrol car
    pub petrol_emission_kg: f64,
    /// Petrol minus EV
    pub saved_kg: f64,
    /// Saving as a share of the petrol figure
    pub saved_percent: f64,
}

impl EmissionResult {
    /// EV figure rounded to 2 decimals
    pub fn ev_display(&self) -> f64 {
        round_to(self.ev_emission_kg, 2)
    }

    /// Petrol figure rounded to 2 decimals
    pub fn petrol_display(&self) -> f64 {
        round_to(self.petrol_emission_kg, 2)
    }

    /// Saving rounded to 2 decimals
    pub fn saved_display(&self) -> f64 {
        round_to(self.saved_kg, 2)
    }

    /// Percentage saved, rounded to 1 decimal
    pub fn saved_percent_display(&self) -> f64 {
        round_to(self.saved_percent, 1)
    }

    /// Summary lines with masses in the requested unit system
    pub fn summary(&self, units: UnitsSystem) -> Vec<String> {
        let (ev, petrol, saved, unit) = match units {
            UnitsSystem::Metric => (
                self.ev_emission_kg,
                self.petrol_emission_kg,
                self.saved_kg,
                "kg",
            ),
            UnitsSystem::Imperial => (
                kg_to_lbs(self.ev_emission_kg),
                kg_to_lbs(self.petrol_emission_kg),
                kg_to_lbs(self.saved_kg),
                "lbs",
            ),
        };

        vec![
            format!("EV Emission: {:.2} {} CO₂", ev, unit),
            format!("Petrol Car Emission: {:.2} {} CO₂", petrol, unit),
            format!(
                "You save approximately {:.2} {} CO₂ ({:.1}%)",
                saved, unit, self.saved_percent
            ),
        ]
    }
}

impl fmt::Display for EmissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary(UnitsSystem::Metric).join("\n"))
    }
}

/// Parse a user-entered distance.
///
/// Accepts any finite number greater than zero, surrounding whitespace
/// allowed.
pub fn parse_distance(input: &str) -> Result<f64, InputError> {
    let distance: f64 = input
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidDistance)?;
    validate_distance(distance)
}

fn validate_distance(distance_km: f64) -> Result<f64, InputError> {
    if distance_km.is_finite() && distance_km > 0.0 {
        Ok(distance_km)
    } else {
        Err(InputError::InvalidDistance)
    }
}

/// Compute emissions with the default factors
pub fn compute_emission(distance_km: f64) -> Result<EmissionResult, InputError> {
    compute_emission_with(distance_km, &EmissionFactors::default())
}

/// Compute emissions with explicit factors
pub fn compute_emission_with(
    distance_km: f64,
    factors: &EmissionFactors,
) -> Result<EmissionResult, InputError> {
    let distance_km = validate_distance(distance_km)?;

    let ev_emission_kg = (distance_km / factors.efficiency_km_per_kwh) * factors.grid_kg_per_kwh;
    let petrol_emission_kg = distance_km * factors.petrol_kg_per_km;
    let saved_kg = petrol_emission_kg - ev_emission_kg;
    let saved_percent = saved_kg / petrol_emission_kg * 100.0;

    Ok(EmissionResult {
        distance_km,
        ev_emission_kg,
        petrol_emission_kg,
        saved_kg,
        saved_percent,
    })
}

/// What the calculator view shows after a request
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorOutput {
    /// Computed figures
    Result(EmissionResult),
    /// Validation message replacing the result
    Invalid(&'static str),
}

/// Calculator view: formula, last outcome and the chart it owns
pub struct EmissionCalculator {
    factors: EmissionFactors,
    canvas: ChartCanvas,
    last: Option<CalculatorOutput>,
}

impl EmissionCalculator {
    /// Create a calculator with no result and an empty canvas
    pub fn new(factors: EmissionFactors) -> Self {
        Self {
            factors,
            canvas: ChartCanvas::new(),
            last: None,
        }
    }

    /// Handle the raw text of the distance field.
    ///
    /// On success the chart is redrawn, replacing the previous one. On
    /// failure the validation message is returned and the chart is left
    /// as it was.
    pub fn calculate(&mut self, input: &str) -> CalculatorOutput {
        let output = match parse_distance(input)
            .and_then(|d| compute_emission_with(d, &self.factors))
        {
            Ok(result) => {
                self.canvas.draw(ChartSpec::for_emission(&result));
                CalculatorOutput::Result(result)
            }
            Err(e) => {
                tracing::debug!("rejected distance input {:?}: {}", input, e);
                CalculatorOutput::Invalid(INVALID_DISTANCE_MESSAGE)
            }
        };

        self.last = Some(output.clone());
        output
    }

    /// Outcome of the most recent request
    pub fn last_output(&self) -> Option<&CalculatorOutput> {
        self.last.as_ref()
    }

    /// Chart currently on screen, if any
    pub fn chart(&self) -> Option<&EmissionChart> {
        self.canvas.current()
    }

    /// Canvas holding the chart
    pub fn canvas(&self) -> &ChartCanvas {
        &self.canvas
    }
}

impl Default for EmissionCalculator {
    fn default() -> Self {
        Self::new(EmissionFactors::default())
    }
}
