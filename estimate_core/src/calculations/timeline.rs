//! # Timeline Estimation
//!
//! Derives planning, construction and interiors durations (in months) from
//! the project type, the entered area and the complexity. It shares inputs
//! with the cost pipeline but does not depend on any price.
//!
//! ## Procedure
//!
//! 1. `size_units = area / (1000 sqft | 100 sqm)`
//! 2. Start at 2 / 6 / 2 months (planning / construction / interiors)
//! 3. Add 1/2/1 for commercial, 2/4/1 for mixed-use
//! 4. `extra = floor(size_units / 2)` goes to construction, `floor(extra / 2)`
//!    to interiors
//! 5. Construction and interiors × `1 + (complexity - 5) × 0.08`, rounded up
//! 6. Clamp to at least 1 / 3 / 1 months and at most [`MAX_PHASE_MONTHS`]

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::project::{ProjectType, DEFAULT_COMPLEXITY, MAX_COMPLEXITY, MIN_COMPLEXITY};
use crate::units::AreaUnit;

/// Starting durations before any additions
pub const BASE_MONTHS: PhaseMonths = PhaseMonths {
    planning: 2,
    construction: 6,
    interiors: 2,
};

/// Shortest allowed duration for each phase
pub const MIN_MONTHS: PhaseMonths = PhaseMonths {
    planning: 1,
    construction: 3,
    interiors: 1,
};

/// Relative change in construction/interiors duration per complexity point
pub const COMPLEXITY_STEP: f64 = 0.08;

/// Longest duration any single phase reports. Three capped phases still sum
/// within `u32`.
pub const MAX_PHASE_MONTHS: u32 = u32::MAX / 3;

// Absorbs float noise such as 25 × 1.08 = 27.000000000000004 before ceil.
const CEIL_TOLERANCE: f64 = 1e-9;

/// Months per phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseMonths {
    pub planning: u32,
    pub construction: u32,
    pub interiors: u32,
}

impl PhaseMonths {
    /// Sum of all three phases
    pub fn total(&self) -> u32 {
        self.planning.saturating_add(self.construction).saturating_add(self.interiors)
    }
}

/// Phase durations and their total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub total_months: u32,
    pub phases: PhaseMonths,
}

/// Input parameters for timeline estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineInput {
    pub project_type: ProjectType,

    /// Area as entered, in `area_unit`
    pub area: f64,

    pub area_unit: AreaUnit,

    /// Clamped into 0-10 before use
    pub complexity: i32,
}

impl TimelineInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        if !(self.area.is_finite() && self.area > 0.0) {
            return Err(EstimateError::invalid_area(self.area, "Area must be a positive number"));
        }
        Ok(())
    }
}

/// Extra planning/construction/interiors months for a project type
fn type_addition(project_type: ProjectType) -> PhaseMonths {
    match project_type {
        ProjectType::Residential => PhaseMonths {
            planning: 0,
            construction: 0,
            interiors: 0,
        },
        ProjectType::Commercial => PhaseMonths {
            planning: 1,
            construction: 2,
            interiors: 1,
        },
        ProjectType::MixedUse => PhaseMonths {
            planning: 2,
            construction: 4,
            interiors: 1,
        },
    }
}

fn scale_months(months: f64, factor: f64) -> f64 {
    (months * factor - CEIL_TOLERANCE).ceil()
}

// Capped before the sum so `total_months` stays equal to the phase total
fn phase_months(months: f64, min: u32) -> u32 {
    (months.round().min(f64::from(MAX_PHASE_MONTHS)) as u32).clamp(min, MAX_PHASE_MONTHS)
}

/// Estimate phase durations.
pub fn calculate(input: &TimelineInput) -> EstimateResult<Timeline> {
    input.validate()?;

    let size_units = input.area / input.area_unit.size_unit();
    let addition = type_addition(input.project_type);

    let planning = f64::from(BASE_MONTHS.planning + addition.planning);
    let mut construction = f64::from(BASE_MONTHS.construction + addition.construction);
    let mut interiors = f64::from(BASE_MONTHS.interiors + addition.interiors);

    let area_addition = (size_units / 2.0).floor();
    construction += area_addition;
    interiors += (area_addition / 2.0).floor();

    let complexity = input.complexity.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY);
    let factor = 1.0 + (complexity - DEFAULT_COMPLEXITY) as f64 * COMPLEXITY_STEP;
    construction = scale_months(construction, factor);
    interiors = scale_months(interiors, factor);

    let phases = PhaseMonths {
        planning: phase_months(planning, MIN_MONTHS.planning),
        construction: phase_months(construction, MIN_MONTHS.construction),
        interiors: phase_months(interiors, MIN_MONTHS.interiors),
    };

    Ok(Timeline {
        total_months: phases.total(),
        phases,
    })
}
