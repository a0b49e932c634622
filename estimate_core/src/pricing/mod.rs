//! # Pricing Tables
//!
//! All rates the engine uses live in a [`PricingTable`] value. The engine is
//! parameterised over the table, so every historical rate revision can be
//! priced by the same code. Four built-in revisions ship with the crate (see
//! [`PricingRevision`]). Custom tables load from TOML.
//!
//! ## TOML Layout
//!
//! ```toml
//! name = "custom"
//! contingency_rate = 0.06
//! professional_fee_rate = 0.0
//! tax_rate = 0.0
//! complexity_step = 0.03
//!
//! [base_rates]
//! residential = 850.0
//! commercial = 1100.0
//! mixed_use = 1300.0
//!
//! [[scale_bands]]
//! below_sqm = 30.0
//! factor = 1.10
//!
//! [civil_multipliers]
//! standard = 1.0
//! premium = 1.35
//! luxury = 1.80
//!
//! [component_prices.plumbing]
//! standard = 180.0
//! premium = 350.0
//! luxury = 700.0
//! # ... one entry per priced component
//!
//! [project_multipliers]
//! residential = 1.0
//! commercial = 1.1
//! mixed_use = 1.2
//!
//! [locations]
//! default = 0.95
//! [locations.cities]
//! mumbai = 1.30
//! ```

pub mod locations;
pub mod revisions;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::project::ProjectType;
use crate::quality::{Component, QualityTier};

pub use locations::LocationTable;
pub use revisions::PricingRevision;

/// A value per project type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerProjectType {
    pub residential: f64,
    pub commercial: f64,
    pub mixed_use: f64,
}

impl PerProjectType {
    /// Value for a project type
    pub fn get(&self, project_type: ProjectType) -> f64 {
        match project_type {
            ProjectType::Residential => self.residential,
            ProjectType::Commercial => self.commercial,
            ProjectType::MixedUse => self.mixed_use,
        }
    }

    fn values(&self) -> [f64; 3] {
        [self.residential, self.commercial, self.mixed_use]
    }
}

/// A value per paid tier; `NotIncluded` is always zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPrices {
    pub standard: f64,
    pub premium: f64,
    pub luxury: f64,
}

impl TierPrices {
    pub const fn new(standard: f64, premium: f64, luxury: f64) -> Self {
        TierPrices {
            standard,
            premium,
            luxury,
        }
    }

    /// Value for a tier
    pub fn get(&self, tier: QualityTier) -> f64 {
        match tier {
            QualityTier::NotIncluded => 0.0,
            QualityTier::Standard => self.standard,
            QualityTier::Premium => self.premium,
            QualityTier::Luxury => self.luxury,
        }
    }

    fn is_ordered(&self) -> bool {
        self.standard <= self.premium && self.premium <= self.luxury
    }

    fn all_non_negative(&self) -> bool {
        [self.standard, self.premium, self.luxury]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Small-project premium: applies to areas strictly below `below_sqm`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBand {
    pub below_sqm: f64,
    pub factor: f64,
}

/// Complete set of rates for one pricing revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    /// Revision name, echoed into every estimate
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub contingency_rate: f64,

    #[serde(default)]
    pub professional_fee_rate: f64,

    /// GST or other tax on the fee-inclusive amount
    #[serde(default)]
    pub tax_rate: f64,

    /// Relative change in project multiplier per complexity point away from 5
    pub complexity_step: f64,

    /// Shell construction rate per sqm
    pub base_rates: PerProjectType,

    /// Small-project premiums, smallest threshold first
    #[serde(default)]
    pub scale_bands: Vec<ScaleBand>,

    /// Multiplier civil quality applies to the shell rate
    pub civil_multipliers: TierPrices,

    /// Per-sqm price of every component except civil quality, keyed by
    /// component key (`plumbing`, `fixedFurniture`, ...)
    pub component_prices: BTreeMap<String, TierPrices>,

    /// Project-type multiplier at complexity 5
    pub project_multipliers: PerProjectType,

    pub locations: LocationTable,
}

impl PricingTable {
    /// The canonical table
    pub fn canonical() -> &'static PricingTable {
        PricingRevision::Canonical.table()
    }

    /// Base construction rate per sqm
    pub fn base_rate(&self, project_type: ProjectType) -> f64 {
        self.base_rates.get(project_type)
    }

    /// Small-project scale factor for an area in sqm
    pub fn scale_factor(&self, area_sqm: f64) -> f64 {
        self.scale_bands
            .iter()
            .find(|band| area_sqm < band.below_sqm)
            .map(|band| band.factor)
            .unwrap_or(1.0)
    }

    /// Multiplier civil quality applies to the shell cost
    pub fn civil_multiplier(&self, tier: QualityTier) -> f64 {
        self.civil_multipliers.get(tier)
    }

    /// Per-sqm price for a component at a tier.
    ///
    /// Civil quality has no per-sqm price and always returns zero here.
    pub fn price_per_sqm(&self, component: Component, tier: QualityTier) -> f64 {
        if component == Component::CivilQuality {
            return 0.0;
        }
        self.component_prices
            .get(component.key())
            .map(|prices| prices.get(tier))
            .unwrap_or(0.0)
    }

    /// Parse and validate a table from TOML text
    pub fn from_toml_str(contents: &str) -> EstimateResult<Self> {
        let table: PricingTable =
            toml::from_str(contents).map_err(|e| EstimateError::serialization(format!("Invalid pricing TOML: {}", e)))?;
        table.validate()?;
        Ok(table)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> EstimateResult<String> {
        toml::to_string_pretty(self).map_err(|e| EstimateError::serialization(e.to_string()))
    }

    /// Check every rate is usable and tier prices never decrease with quality.
    pub fn validate(&self) -> EstimateResult<()> {
        let fail = |reason: String| Err(EstimateError::invalid_pricing_table(&self.name, reason));

        if self.name.trim().is_empty() {
            return fail("name must not be empty".to_string());
        }
        if self.base_rates.values().iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return fail("base rates must be positive".to_string());
        }
        if self.project_multipliers.values().iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return fail("project multipliers must be positive".to_string());
        }
        for window in self.scale_bands.windows(2) {
            if window[0].below_sqm >= window[1].below_sqm {
                return fail("scale bands must be sorted by ascending threshold".to_string());
            }
        }
        if self.scale_bands.iter().any(|b| !(b.factor.is_finite() && b.factor > 0.0)) {
            return fail("scale factors must be positive".to_string());
        }
        if !self.civil_multipliers.all_non_negative() || !self.civil_multipliers.is_ordered() {
            return fail("civil multipliers must be non-negative and rise with quality".to_string());
        }
        for component in Component::priced() {
            match self.component_prices.get(component.key()) {
                None => return fail(format!("missing prices for '{}'", component.key())),
                Some(prices) if !prices.all_non_negative() || !prices.is_ordered() => {
                    return fail(format!(
                        "prices for '{}' must be non-negative and rise with quality",
                        component.key()
                    ))
                }
                Some(_) => {}
            }
        }
        for key in self.component_prices.keys() {
            let known = Component::priced().any(|c| c.key() == key);
            if !known {
                return fail(format!("unknown component '{}'", key));
            }
        }
        // complexity 0 must still leave a positive project multiplier
        if !(self.complexity_step.is_finite() && (0.0..0.2).contains(&self.complexity_step)) {
            return fail("complexity step must be in [0, 0.2)".to_string());
        }
        for (label, rate) in [
            ("contingency", self.contingency_rate),
            ("professional fee", self.professional_fee_rate),
            ("tax", self.tax_rate),
        ] {
            if !(rate.is_finite() && rate >= 0.0) {
                return fail(format!("{} rate must be non-negative", label));
            }
        }
        self.locations.validate().or_else(|reason| fail(reason))
    }
}

/// Load and validate a pricing table from a TOML file.
///
/// # Example
///
/// ```rust,no_run
/// use estimate_core::pricing::load_pricing_table;
/// use std::path::Path;
///
/// let table = load_pricing_table(Path::new("pricing/2025.toml"))?;
/// println!("Loaded revision {}", table.name);
/// # Ok::<(), estimate_core::errors::EstimateError>(())
/// ```
pub fn load_pricing_table(path: &Path) -> EstimateResult<PricingTable> {
    let contents = fs::read_to_string(path)
        .map_err(|e| EstimateError::file_error("read pricing table", path.display().to_string(), e.to_string()))?;
    let table = PricingTable::from_toml_str(&contents)?;
    tracing::debug!(path = %path.display(), revision = %table.name, "loaded pricing table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor_bands() {
        let table = PricingTable::canonical();
        assert_eq!(table.scale_factor(10.0), 1.10);
        assert_eq!(table.scale_factor(29.99), 1.10);
        assert_eq!(table.scale_factor(30.0), 1.06);
        assert_eq!(table.scale_factor(49.9), 1.06);
        assert_eq!(table.scale_factor(92.9), 1.03);
        assert_eq!(table.scale_factor(100.0), 1.00);
        assert_eq!(table.scale_factor(5000.0), 1.00);
    }

    #[test]
    fn test_price_lookup() {
        let table = PricingTable::canonical();
        assert_eq!(table.price_per_sqm(Component::Plumbing, QualityTier::Standard), 180.0);
        assert_eq!(table.price_per_sqm(Component::Ac, QualityTier::Luxury), 1400.0);
        assert_eq!(table.price_per_sqm(Component::Surfaces, QualityTier::NotIncluded), 0.0);
        assert_eq!(table.price_per_sqm(Component::CivilQuality, QualityTier::Luxury), 0.0);
        assert_eq!(table.civil_multiplier(QualityTier::Premium), 1.35);
        assert_eq!(table.civil_multiplier(QualityTier::NotIncluded), 0.0);
    }

    #[test]
    fn test_toml_roundtrip() {
        let table = PricingTable::canonical();
        let text = table.to_toml_string().unwrap();
        let parsed = PricingTable::from_toml_str(&text).unwrap();
        assert_eq!(&parsed, table);
    }

    #[test]
    fn test_validation_rejects_inverted_tiers() {
        let mut table = PricingTable::canonical().clone();
        table.name = "broken".to_string();
        table
            .component_prices
            .insert("windows".to_string(), TierPrices::new(500.0, 300.0, 900.0));
        let err = table.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PRICING_TABLE");
        assert!(err.to_string().contains("windows"));
    }

    #[test]
    fn test_validation_rejects_missing_and_unknown_components() {
        let mut missing = PricingTable::canonical().clone();
        missing.component_prices.remove("artefacts");
        assert!(missing.validate().is_err());

        let mut unknown = PricingTable::canonical().clone();
        unknown
            .component_prices
            .insert("jacuzzi".to_string(), TierPrices::new(1.0, 2.0, 3.0));
        assert!(unknown.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_rates() {
        let mut table = PricingTable::canonical().clone();
        table.contingency_rate = -0.01;
        assert!(table.validate().is_err());

        let mut table = PricingTable::canonical().clone();
        table.complexity_step = 0.25;
        assert!(table.validate().is_err());

        let mut table = PricingTable::canonical().clone();
        table.base_rates.commercial = 0.0;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = PricingTable::from_toml_str("name = ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_pricing_table(Path::new("/nonexistent/pricing.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
