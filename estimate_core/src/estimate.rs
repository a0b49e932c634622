//! # Estimate
//!
//! [`compute_estimate`] is the single entry point external collaborators
//! call. It validates the input, runs the four calculation stages and merges
//! their results into one immutable [`CostEstimate`].
//!
//! ```text
//! ProjectInput ─┬─ construction ─┐
//!               ├─ components ───┼─ adjustments ─┬─ totalCost
//!               │                │               ├─ categoryBreakdown
//!               │                │               └─ phaseBreakdown
//!               └─ timeline ─────────────────────── timeline
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::estimate::compute_estimate;
//! use estimate_core::project::{ProjectInput, ProjectType};
//! use estimate_core::units::AreaUnit;
//!
//! let input = ProjectInput::new(ProjectType::Residential, 1000.0, AreaUnit::Sqft).with_city("Mumbai");
//! let estimate = compute_estimate(&input).unwrap();
//!
//! assert!(estimate.total_cost > 0.0);
//! assert_eq!(
//!     estimate.timeline.total_months,
//!     estimate.timeline.phases.planning + estimate.timeline.phases.construction + estimate.timeline.phases.interiors
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::adjustments::{self, AdjustmentInput, AdjustmentResult};
use crate::calculations::components::{self, LineItem};
use crate::calculations::construction::{self, ConstructionInput};
use crate::calculations::timeline::{self, Timeline, TimelineInput};
use crate::errors::{EstimateError, EstimateResult};
use crate::pricing::PricingTable;
use crate::project::ProjectInput;
use crate::quality::{Category, Component};

/// Share of the total cost attributed to each phase
pub const PHASE_COST_SHARES: PhaseBreakdown = PhaseBreakdown {
    planning: 0.15,
    construction: 0.60,
    interiors: 0.25,
};

/// Cost per category after all adjustments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub construction: f64,
    pub core: f64,
    pub finishes: f64,
    pub interiors: f64,
}

impl CategoryBreakdown {
    /// Cost for one category
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Construction => self.construction,
            Category::Core => self.core,
            Category::Finishes => self.finishes,
            Category::Interiors => self.interiors,
        }
    }

    /// Sum of all categories
    pub fn total(&self) -> f64 {
        self.construction + self.core + self.finishes + self.interiors
    }
}

/// Cost per phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseBreakdown {
    pub planning: f64,
    pub construction: f64,
    pub interiors: f64,
}

impl PhaseBreakdown {
    /// Sum of all phases
    pub fn total(&self) -> f64 {
        self.planning + self.construction + self.interiors
    }
}

/// A priced, time-phased estimate.
///
/// Produced fresh by every call to [`compute_estimate`]; consumers (report
/// exporters, fee calculators) treat it as read-only data.
///
/// ## JSON Example
///
/// ```json
/// {
///   "totalCost": 323274.0,
///   "categoryBreakdown": { "construction": 81906.0, "core": 68294.0, "finishes": 84198.0, "interiors": 88876.0 },
///   "phaseBreakdown": { "planning": 48491.0, "construction": 193964.0, "interiors": 80819.0 },
///   "timeline": { "totalMonths": 10, "phases": { "planning": 2, "construction": 6, "interiors": 2 } },
///   "areaSqm": 92.903,
///   "costPerUnitArea": 323.0,
///   "pricingRevision": "canonical"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// Final cost, rounded to the nearest currency unit
    pub total_cost: f64,

    pub category_breakdown: CategoryBreakdown,

    pub phase_breakdown: PhaseBreakdown,

    pub timeline: Timeline,

    pub area_sqm: f64,

    /// Total cost divided by the area in the unit the caller entered
    pub cost_per_unit_area: f64,

    /// Per-component costs before location/project adjustments
    pub line_items: Vec<LineItem>,

    /// Multipliers and intermediate amounts of the adjustment pipeline
    pub adjustments: AdjustmentResult,

    /// Name of the pricing table used
    pub pricing_revision: String,
}

impl CostEstimate {
    /// Percentage of the total a category accounts for (0-100)
    pub fn category_share(&self, category: Category) -> f64 {
        if self.total_cost > 0.0 {
            self.category_breakdown.get(category) / self.total_cost * 100.0
        } else {
            0.0
        }
    }

    /// Line item for one component, if it is priced per area
    pub fn line_item(&self, component: Component) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.component == component)
    }
}

/// Compute an estimate with the canonical pricing table.
///
/// # Returns
///
/// * `Ok(CostEstimate)` - Complete estimate
/// * `Err(EstimateError::InvalidArea)` - Area is zero, negative, not finite or
///   too large to price
/// * `Err(EstimateError::MissingProjectType)` - No project type selected
pub fn compute_estimate(input: &ProjectInput) -> EstimateResult<CostEstimate> {
    compute_estimate_with(input, PricingTable::canonical())
}

/// Compute an estimate with a specific pricing table.
///
/// # Example
///
/// ```rust
/// use estimate_core::estimate::{compute_estimate, compute_estimate_with};
/// use estimate_core::pricing::PricingRevision;
/// use estimate_core::project::{ProjectInput, ProjectType};
/// use estimate_core::units::AreaUnit;
///
/// let input = ProjectInput::new(ProjectType::Commercial, 400.0, AreaUnit::Sqm);
/// let canonical = compute_estimate(&input).unwrap();
/// let with_gst = compute_estimate_with(&input, PricingRevision::FeesAndGst.table()).unwrap();
/// assert!(with_gst.total_cost > canonical.total_cost);
/// ```
pub fn compute_estimate_with(input: &ProjectInput, table: &PricingTable) -> EstimateResult<CostEstimate> {
    let project_type = input.validate()?;
    let area_sqm = input.area_sqm().value();

    let complexity = input.clamped_complexity();
    if complexity != input.complexity {
        tracing::debug!(requested = input.complexity, used = complexity, "complexity clamped");
    }

    let selections = input.effective_components();

    let construction = construction::calculate(
        &ConstructionInput {
            project_type,
            area_sqm,
            civil_quality: selections.civil_quality,
        },
        table,
    )?;

    let components = components::calculate(&selections, area_sqm, table)?;
    ensure_priceable(input.area, construction.cost + components.total())?;

    let adjustments = adjustments::calculate(
        &AdjustmentInput {
            construction: construction.cost,
            core: components.core,
            finishes: components.finishes,
            interiors: components.interiors,
            city: input.city.clone(),
            project_type,
            complexity,
        },
        table,
    )?;
    ensure_priceable(input.area, adjustments.total_cost)?;

    let timeline = timeline::calculate(&TimelineInput {
        project_type,
        area: input.area,
        area_unit: input.area_unit,
        complexity,
    })?;

    let total_cost = adjustments.total_cost;
    let factor = adjustments.overall_factor();

    let category_breakdown = CategoryBreakdown {
        construction: (construction.cost * factor).round(),
        core: (components.core * factor).round(),
        finishes: (components.finishes * factor).round(),
        interiors: (components.interiors * factor).round(),
    };

    let phase_breakdown = PhaseBreakdown {
        planning: (total_cost * PHASE_COST_SHARES.planning).round(),
        construction: (total_cost * PHASE_COST_SHARES.construction).round(),
        interiors: (total_cost * PHASE_COST_SHARES.interiors).round(),
    };

    tracing::debug!(
        project_type = %project_type,
        scope = %input.scope,
        area_sqm,
        total_cost,
        total_months = timeline.total_months,
        revision = %table.name,
        "computed estimate"
    );

    Ok(CostEstimate {
        total_cost,
        category_breakdown,
        phase_breakdown,
        timeline,
        area_sqm,
        cost_per_unit_area: (total_cost / input.area).round(),
        line_items: components.line_items,
        adjustments,
        pricing_revision: table.name.clone(),
    })
}

// Areas that pass validation can still overflow the cost arithmetic
fn ensure_priceable(area: f64, cost: f64) -> EstimateResult<()> {
    if cost.is_finite() {
        Ok(())
    } else {
        Err(EstimateError::invalid_area(area, "Area too large to price"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EstimateError;
    use crate::project::{ComponentSelections, ProjectScope, ProjectType};
    use crate::quality::QualityTier;
    use crate::units::AreaUnit;

    fn sample() -> ProjectInput {
        ProjectInput::new(ProjectType::Residential, 1000.0, AreaUnit::Sqft)
            .with_city("default")
            .with_components(ComponentSelections::uniform(QualityTier::Standard))
            .with_component(Component::Elevator, QualityTier::NotIncluded)
            .with_component(Component::Artefacts, QualityTier::NotIncluded)
    }

    #[test]
    fn test_breakdowns_sum_to_total() {
        let estimate = compute_estimate(&sample()).unwrap();
        assert!((estimate.category_breakdown.total() - estimate.total_cost).abs() <= 4.0);
        assert!((estimate.phase_breakdown.total() - estimate.total_cost).abs() <= 3.0);
    }

    #[test]
    fn test_zero_area_rejected() {
        let input = ProjectInput { area: 0.0, ..sample() };
        assert!(matches!(compute_estimate(&input), Err(EstimateError::InvalidArea { .. })));
    }

    #[test]
    fn test_area_too_large_to_price() {
        let input = ProjectInput::new(ProjectType::MixedUse, 1.0e306, AreaUnit::Sqm);
        match compute_estimate(&input) {
            Err(EstimateError::InvalidArea { reason, .. }) => assert_eq!(reason, "Area too large to price"),
            other => panic!("expected InvalidArea, got {:?}", other),
        }

        // Subtotal fits, Mumbai × commercial × complexity 10 pushes the total past f64::MAX
        let busy = |area| {
            ProjectInput::new(ProjectType::Commercial, area, AreaUnit::Sqm)
                .with_city("Mumbai")
                .with_complexity(10)
        };
        let rate = compute_estimate(&busy(100_000.0)).unwrap().adjustments.subtotal / 100_000.0;
        let err = compute_estimate(&busy(1.4e308 / rate)).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidArea { .. }));
        assert_eq!(err.field(), Some("area"));
    }

    #[test]
    fn test_missing_project_type_rejected() {
        let input = ProjectInput {
            project_type: None,
            ..sample()
        };
        assert_eq!(compute_estimate(&input), Err(EstimateError::MissingProjectType));
    }

    #[test]
    fn test_interior_only_has_no_construction() {
        let input = sample().with_scope(ProjectScope::InteriorOnly);
        let estimate = compute_estimate(&input).unwrap();
        assert_eq!(estimate.category_breakdown.construction, 0.0);
        assert_eq!(estimate.line_item(Component::BuildingEnvelope).map(|i| i.cost), Some(0.0));
        assert!(estimate.category_breakdown.interiors > 0.0);
    }

    #[test]
    fn test_core_shell_has_no_interiors() {
        let input = sample().with_scope(ProjectScope::CoreShell);
        let estimate = compute_estimate(&input).unwrap();
        assert_eq!(estimate.category_breakdown.interiors, 0.0);
        assert!(estimate.category_breakdown.construction > 0.0);
    }

    #[test]
    fn test_cost_per_unit_area() {
        let estimate = compute_estimate(&sample()).unwrap();
        assert_eq!(estimate.cost_per_unit_area, (estimate.total_cost / 1000.0).round());
        assert!((estimate.area_sqm - 92.903).abs() < 1e-9);
    }

    #[test]
    fn test_category_share() {
        let estimate = compute_estimate(&sample()).unwrap();
        let shares: f64 = Category::ALL.iter().map(|c| estimate.category_share(*c)).sum();
        assert!((shares - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_revision_recorded() {
        let estimate = compute_estimate(&sample()).unwrap();
        assert_eq!(estimate.pricing_revision, "canonical");
    }

    #[test]
    fn test_json_keys() {
        let estimate = compute_estimate(&sample()).unwrap();
        let json = serde_json::to_value(&estimate).unwrap();
        assert!(json["totalCost"].is_number());
        assert!(json["categoryBreakdown"]["construction"].is_number());
        assert!(json["phaseBreakdown"]["planning"].is_number());
        assert!(json["timeline"]["totalMonths"].is_number());
        assert!(json["timeline"]["phases"]["interiors"].is_number());
    }
}
