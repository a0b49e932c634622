//! Built-in pricing revisions.
//!
//! | Revision      | Civil prem/lux | Contingency | Fees | Tax |
//! |---------------|----------------|-------------|------|-----|
//! | `canonical`   | 1.35 / 1.80    | 6%          | -    | -   |
//! | `revised-2024`| 1.40 / 2.00    | 8%          | -    | -   |
//! | `boutique`    | 1.60 / 2.80    | 9%          | -    | -   |
//! | `fees-and-gst`| 1.35 / 1.80    | 6%          | 13%  | 12% |
//!
//! Every revision shares the canonical base rates, component prices and
//! location multipliers.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::locations::canonical_locations;
use super::{PerProjectType, PricingTable, ScaleBand, TierPrices};
use crate::errors::{EstimateError, EstimateResult};
use crate::quality::Component;

static CANONICAL: Lazy<PricingTable> = Lazy::new(canonical_table);

static REVISED_2024: Lazy<PricingTable> = Lazy::new(|| PricingTable {
    name: PricingRevision::Revised2024.key().to_string(),
    description: "Steeper civil quality multipliers with 8% contingency".to_string(),
    civil_multipliers: TierPrices::new(1.0, 1.4, 2.0),
    contingency_rate: 0.08,
    ..canonical_table()
});

static BOUTIQUE: Lazy<PricingTable> = Lazy::new(|| PricingTable {
    name: PricingRevision::Boutique.key().to_string(),
    description: "High-end civil work multipliers with 9% contingency".to_string(),
    civil_multipliers: TierPrices::new(1.0, 1.6, 2.8),
    contingency_rate: 0.09,
    ..canonical_table()
});

static FEES_AND_GST: Lazy<PricingTable> = Lazy::new(|| PricingTable {
    name: PricingRevision::FeesAndGst.key().to_string(),
    description: "Canonical rates plus 13% professional fees and 12% GST".to_string(),
    professional_fee_rate: 0.13,
    tax_rate: 0.12,
    ..canonical_table()
});

/// Named built-in pricing revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingRevision {
    #[default]
    Canonical,
    #[serde(rename = "revised-2024")]
    Revised2024,
    Boutique,
    FeesAndGst,
}

impl PricingRevision {
    /// All built-in revisions
    pub const ALL: [PricingRevision; 4] = [
        PricingRevision::Canonical,
        PricingRevision::Revised2024,
        PricingRevision::Boutique,
        PricingRevision::FeesAndGst,
    ];

    /// The revision's rate table
    pub fn table(&self) -> &'static PricingTable {
        match self {
            PricingRevision::Canonical => &CANONICAL,
            PricingRevision::Revised2024 => &REVISED_2024,
            PricingRevision::Boutique => &BOUTIQUE,
            PricingRevision::FeesAndGst => &FEES_AND_GST,
        }
    }

    /// Key used on the command line and in tables
    pub fn key(&self) -> &'static str {
        match self {
            PricingRevision::Canonical => "canonical",
            PricingRevision::Revised2024 => "revised-2024",
            PricingRevision::Boutique => "boutique",
            PricingRevision::FeesAndGst => "fees-and-gst",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        PricingRevision::ALL
            .into_iter()
            .find(|r| r.key() == normalized)
            .ok_or_else(|| {
                EstimateError::invalid_input(
                    "revision",
                    s,
                    "Expected canonical, revised-2024, boutique or fees-and-gst",
                )
            })
    }
}

impl std::fmt::Display for PricingRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

fn canonical_component_prices() -> BTreeMap<String, TierPrices> {
    [
        // core
        (Component::Plumbing, TierPrices::new(180.0, 350.0, 700.0)),
        (Component::Electrical, TierPrices::new(150.0, 300.0, 600.0)),
        (Component::Ac, TierPrices::new(400.0, 750.0, 1400.0)),
        (Component::Elevator, TierPrices::new(180.0, 380.0, 850.0)),
        // finishes
        (Component::BuildingEnvelope, TierPrices::new(150.0, 320.0, 650.0)),
        (Component::Lighting, TierPrices::new(120.0, 280.0, 600.0)),
        (Component::Windows, TierPrices::new(220.0, 450.0, 950.0)),
        (Component::Ceiling, TierPrices::new(130.0, 270.0, 580.0)),
        (Component::Surfaces, TierPrices::new(280.0, 550.0, 1100.0)),
        // interiors
        (Component::FixedFurniture, TierPrices::new(400.0, 750.0, 1400.0)),
        (Component::LooseFurniture, TierPrices::new(280.0, 550.0, 1200.0)),
        (Component::Furnishings, TierPrices::new(90.0, 220.0, 500.0)),
        (Component::Appliances, TierPrices::new(180.0, 380.0, 850.0)),
        (Component::Artefacts, TierPrices::new(70.0, 180.0, 450.0)),
    ]
    .into_iter()
    .map(|(component, prices)| (component.key().to_string(), prices))
    .collect()
}

fn canonical_table() -> PricingTable {
    PricingTable {
        name: PricingRevision::Canonical.key().to_string(),
        description: "Canonical per-sqm rates (INR)".to_string(),
        contingency_rate: 0.06,
        professional_fee_rate: 0.0,
        tax_rate: 0.0,
        complexity_step: 0.03,
        base_rates: PerProjectType {
            residential: 850.0,
            commercial: 1100.0,
            mixed_use: 1300.0,
        },
        scale_bands: vec![
            ScaleBand { below_sqm: 30.0, factor: 1.10 },
            ScaleBand { below_sqm: 50.0, factor: 1.06 },
            ScaleBand { below_sqm: 100.0, factor: 1.03 },
        ],
        civil_multipliers: TierPrices::new(1.0, 1.35, 1.80),
        component_prices: canonical_component_prices(),
        project_multipliers: PerProjectType {
            residential: 1.0,
            commercial: 1.10,
            mixed_use: 1.20,
        },
        locations: canonical_locations(),
    }
}
