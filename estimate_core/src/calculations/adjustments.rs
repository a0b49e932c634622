//! # Adjustment Pipeline
//!
//! Turns the raw category costs into the final total:
//!
//! ```text
//! subtotal     = construction + core + finishes + interiors
//! adjusted     = subtotal × location[city] × project[type] × (1 + (complexity - 5) × step)
//! contingency  = adjusted × contingency_rate
//! fees         = (adjusted + contingency) × professional_fee_rate
//! tax          = (adjusted + contingency + fees) × tax_rate
//! total        = round(adjusted + contingency + fees + tax)
//! ```
//!
//! Every step is a multiplication, so the whole pipeline collapses to one
//! [`AdjustmentResult::overall_factor`]. The estimate scales each category by
//! that factor to keep the breakdown consistent with the total.

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::pricing::PricingTable;
use crate::project::{ProjectType, DEFAULT_COMPLEXITY, MAX_COMPLEXITY, MIN_COMPLEXITY};

/// Raw category costs and the keys that select the multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentInput {
    pub construction: f64,
    pub core: f64,
    pub finishes: f64,
    pub interiors: f64,
    pub city: String,
    pub project_type: ProjectType,
    /// Clamped into 0-10 before use
    pub complexity: i32,
}

impl AdjustmentInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        for (field, value) in [
            ("construction", self.construction),
            ("core", self.core),
            ("finishes", self.finishes),
            ("interiors", self.interiors),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EstimateError::invalid_input(
                    field,
                    value.to_string(),
                    "Category cost must be a non-negative number",
                ));
            }
        }
        Ok(())
    }

    /// Sum of the four category costs
    pub fn subtotal(&self) -> f64 {
        self.construction + self.core + self.finishes + self.interiors
    }
}

/// Every multiplier applied and the amounts they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentResult {
    /// Sum of raw category costs
    pub subtotal: f64,

    pub location_multiplier: f64,

    /// False when the city was not in the table and the default was used
    pub location_matched: bool,

    /// Type multiplier including the complexity adjustment
    pub project_multiplier: f64,

    /// Subtotal after location and project multipliers
    pub adjusted_subtotal: f64,

    pub contingency: f64,
    pub professional_fees: f64,
    pub tax: f64,

    /// Rounded to the nearest currency unit
    pub total_cost: f64,
}

impl AdjustmentResult {
    /// Ratio between the unrounded total and the raw subtotal
    pub fn overall_factor(&self) -> f64 {
        if self.subtotal > 0.0 {
            (self.adjusted_subtotal + self.contingency + self.professional_fees + self.tax) / self.subtotal
        } else {
            0.0
        }
    }
}

/// Project-type multiplier adjusted for complexity.
///
/// Complexity 5 leaves the type multiplier unchanged; each point above or
/// below moves it by `complexity_step` relative to the base.
pub fn project_multiplier(project_type: ProjectType, complexity: i32, table: &PricingTable) -> f64 {
    let complexity = complexity.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY);
    let base = table.project_multipliers.get(project_type);
    let adjustment = (complexity - DEFAULT_COMPLEXITY) as f64 * table.complexity_step;
    base * (1.0 + adjustment)
}

/// Apply location, project, contingency, fee and tax adjustments.
pub fn calculate(input: &AdjustmentInput, table: &PricingTable) -> EstimateResult<AdjustmentResult> {
    input.validate()?;

    let subtotal = input.subtotal();

    let location = table.locations.resolve(&input.city);
    if !location.matched && !input.city.trim().is_empty() {
        tracing::warn!(
            city = %input.city,
            multiplier = location.multiplier,
            "city not in location table, using default multiplier"
        );
    }

    let project_multiplier = project_multiplier(input.project_type, input.complexity, table);
    let adjusted_subtotal = subtotal * location.multiplier * project_multiplier;
    let contingency = adjusted_subtotal * table.contingency_rate;
    let professional_fees = (adjusted_subtotal + contingency) * table.professional_fee_rate;
    let tax = (adjusted_subtotal + contingency + professional_fees) * table.tax_rate;
    let total_cost = (adjusted_subtotal + contingency + professional_fees + tax).round();

    tracing::debug!(
        subtotal,
        location_multiplier = location.multiplier,
        project_multiplier,
        contingency,
        total_cost,
        "applied adjustments"
    );

    Ok(AdjustmentResult {
        subtotal,
        location_multiplier: location.multiplier,
        location_matched: location.matched,
        project_multiplier,
        adjusted_subtotal,
        contingency,
        professional_fees,
        tax,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingRevision;

    fn input(city: &str, project_type: ProjectType, complexity: i32) -> AdjustmentInput {
        AdjustmentInput {
            construction: 100_000.0,
            core: 20_000.0,
            finishes: 10_000.0,
            interiors: 5_000.0,
            city: city.to_string(),
            project_type,
            complexity,
        }
    }

    #[test]
    fn test_default_city_residential() {
        let result = calculate(&input("", ProjectType::Residential, 5), PricingTable::canonical()).unwrap();
        assert_eq!(result.subtotal, 135_000.0);
        assert_eq!(result.location_multiplier, 0.95);
        assert!(!result.location_matched);
        assert_eq!(result.project_multiplier, 1.0);
        // 135000 × 0.95 × 1.06
        assert_eq!(result.total_cost, (135_000.0_f64 * 0.95 * 1.06).round());
        assert_eq!(result.professional_fees, 0.0);
        assert_eq!(result.tax, 0.0);
    }

    #[test]
    fn test_city_multiplier() {
        let table = PricingTable::canonical();
        let mumbai = calculate(&input("Mumbai", ProjectType::Residential, 5), table).unwrap();
        let default = calculate(&input("Nowhere", ProjectType::Residential, 5), table).unwrap();
        assert!(mumbai.location_matched);
        let ratio = mumbai.adjusted_subtotal / default.adjusted_subtotal;
        assert!((ratio - 1.30 / 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_project_multiplier() {
        let table = PricingTable::canonical();
        assert_eq!(project_multiplier(ProjectType::Residential, 5, table), 1.0);
        assert!((project_multiplier(ProjectType::Commercial, 5, table) - 1.10).abs() < 1e-12);
        assert!((project_multiplier(ProjectType::MixedUse, 10, table) - 1.20 * 1.15).abs() < 1e-12);
        assert!((project_multiplier(ProjectType::Commercial, 0, table) - 1.10 * 0.85).abs() < 1e-12);
        // out-of-range complexity is clamped
        assert_eq!(
            project_multiplier(ProjectType::Commercial, 42, table),
            project_multiplier(ProjectType::Commercial, 10, table)
        );
    }

    #[test]
    fn test_fees_and_tax() {
        let table = PricingRevision::FeesAndGst.table();
        let result = calculate(&input("Pune", ProjectType::Residential, 5), table).unwrap();
        let adjusted = 135_000.0 * 1.15;
        let with_contingency = adjusted * 1.06;
        assert!((result.professional_fees - with_contingency * 0.13).abs() < 1e-6);
        assert!((result.tax - with_contingency * 1.13 * 0.12).abs() < 1e-6);
        assert_eq!(result.total_cost, (with_contingency * 1.13 * 1.12).round());
    }

    #[test]
    fn test_overall_factor() {
        let result = calculate(&input("Delhi", ProjectType::Commercial, 7), PricingTable::canonical()).unwrap();
        let expected = 1.25 * 1.10 * (1.0 + 2.0 * 0.03) * 1.06;
        assert!((result.overall_factor() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_subtotal() {
        let zero = AdjustmentInput {
            construction: 0.0,
            core: 0.0,
            finishes: 0.0,
            interiors: 0.0,
            ..input("Mumbai", ProjectType::MixedUse, 5)
        };
        let result = calculate(&zero, PricingTable::canonical()).unwrap();
        assert_eq!(result.total_cost, 0.0);
        assert_eq!(result.overall_factor(), 0.0);
    }

    #[test]
    fn test_negative_cost_rejected() {
        let bad = AdjustmentInput {
            core: -1.0,
            ..input("", ProjectType::Residential, 5)
        };
        assert!(calculate(&bad, PricingTable::canonical()).is_err());
    }
}
