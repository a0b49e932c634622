//! # Base Construction Cost
//!
//! Prices the shell and structure from the project type, the area, and the
//! civil-quality tier.
//!
//! ```text
//! cost = base_rate[type] × scale_factor(area) × civil_multiplier[tier] × area_sqm
//! ```
//!
//! Civil quality scales the shell cost; it is never an additional line item.
//! A `NotIncluded` civil tier (interior-only work) prices the shell at zero.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::construction::{calculate, ConstructionInput};
//! use estimate_core::pricing::PricingTable;
//! use estimate_core::project::ProjectType;
//! use estimate_core::quality::QualityTier;
//!
//! let input = ConstructionInput {
//!     project_type: ProjectType::Residential,
//!     area_sqm: 200.0,
//!     civil_quality: QualityTier::Premium,
//! };
//! let result = calculate(&input, PricingTable::canonical()).unwrap();
//! assert!((result.cost - 850.0 * 1.35 * 200.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::pricing::PricingTable;
use crate::project::ProjectType;
use crate::quality::QualityTier;

/// Input parameters for the shell cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstructionInput {
    pub project_type: ProjectType,

    /// Floor area in square metres
    pub area_sqm: f64,

    pub civil_quality: QualityTier,
}

impl ConstructionInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        if !(self.area_sqm.is_finite() && self.area_sqm > 0.0) {
            return Err(EstimateError::invalid_area(self.area_sqm, "Area must be a positive number"));
        }
        Ok(())
    }
}

/// Shell cost and the factors that produced it.
///
/// ## JSON Example
///
/// ```json
/// {
///   "base_rate": 850.0,
///   "scale_factor": 1.03,
///   "quality_multiplier": 1.0,
///   "rate_per_sqm": 875.5,
///   "cost": 81336.58
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstructionResult {
    /// Base rate for the project type (per sqm)
    pub base_rate: f64,

    /// Small-project premium
    pub scale_factor: f64,

    /// Civil quality multiplier
    pub quality_multiplier: f64,

    /// Effective rate per sqm after both factors
    pub rate_per_sqm: f64,

    /// Shell cost before location/project adjustments
    pub cost: f64,
}

/// Calculate the base construction cost.
///
/// # Returns
///
/// * `Ok(ConstructionResult)` - Shell cost
/// * `Err(EstimateError::InvalidArea)` - If the area is not positive
pub fn calculate(input: &ConstructionInput, table: &PricingTable) -> EstimateResult<ConstructionResult> {
    input.validate()?;

    let base_rate = table.base_rate(input.project_type);
    let scale_factor = table.scale_factor(input.area_sqm);
    let quality_multiplier = table.civil_multiplier(input.civil_quality);
    let rate_per_sqm = base_rate * scale_factor * quality_multiplier;

    Ok(ConstructionResult {
        base_rate,
        scale_factor,
        quality_multiplier,
        rate_per_sqm,
        cost: rate_per_sqm * input.area_sqm,
    })
}
