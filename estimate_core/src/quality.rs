//! # Quality Tiers and Components
//!
//! The option model that indexes into a [`PricingTable`](crate::pricing::PricingTable):
//! fifteen priced building components, the quality tier each one is set to,
//! and the cost category each one reports under.
//!
//! ```text
//! Category      Components
//! construction  civilQuality
//! core          plumbing, electrical, ac, elevator
//! finishes      buildingEnvelope, lighting, windows, ceiling, surfaces
//! interiors     fixedFurniture, looseFurniture, furnishings, appliances, artefacts
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// Quality level selected for a component.
///
/// Variants are declared cheapest first, so the derived `Ord` matches the
/// pricing order `NotIncluded < Standard < Premium < Luxury`.
///
/// Deserialization is lenient: any string that is not a recognised tier
/// decodes to `NotIncluded` instead of failing the whole input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum QualityTier {
    /// Component is left out of the project; always prices to zero
    #[default]
    NotIncluded,
    Standard,
    Premium,
    Luxury,
}

impl QualityTier {
    /// All tiers, cheapest first
    pub const ALL: [QualityTier; 4] = [
        QualityTier::NotIncluded,
        QualityTier::Standard,
        QualityTier::Premium,
        QualityTier::Luxury,
    ];

    /// Tiers that carry a price
    pub const PAID: [QualityTier; 3] = [QualityTier::Standard, QualityTier::Premium, QualityTier::Luxury];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "" | "none" | "no" | "notincluded" | "excluded" => Ok(QualityTier::NotIncluded),
            "standard" | "std" => Ok(QualityTier::Standard),
            "premium" | "prem" => Ok(QualityTier::Premium),
            "luxury" | "lux" => Ok(QualityTier::Luxury),
            _ => Err(EstimateError::invalid_input(
                "tier",
                s,
                "Expected one of notIncluded, standard, premium, luxury",
            )),
        }
    }

    /// Key used in JSON and TOML
    pub fn key(&self) -> &'static str {
        match self {
            QualityTier::NotIncluded => "notIncluded",
            QualityTier::Standard => "standard",
            QualityTier::Premium => "premium",
            QualityTier::Luxury => "luxury",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            QualityTier::NotIncluded => "Not Included",
            QualityTier::Standard => "Standard",
            QualityTier::Premium => "Premium",
            QualityTier::Luxury => "Luxury",
        }
    }

    /// Whether this tier contributes any cost
    pub fn is_included(&self) -> bool {
        *self != QualityTier::NotIncluded
    }
}

impl From<String> for QualityTier {
    fn from(s: String) -> Self {
        QualityTier::from_str_flexible(&s).unwrap_or_else(|_| {
            tracing::warn!(tier = %s, "unrecognized quality tier, treating as notIncluded");
            QualityTier::NotIncluded
        })
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Cost category used for breakdown reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Shell and structure, priced from the base construction rate
    Construction,
    /// Building services
    Core,
    Finishes,
    Interiors,
}

impl Category {
    /// All categories in reporting order
    pub const ALL: [Category; 4] = [
        Category::Construction,
        Category::Core,
        Category::Finishes,
        Category::Interiors,
    ];

    /// Components that report under this category, in accumulation order
    pub fn components(&self) -> impl Iterator<Item = Component> + '_ {
        Component::ALL.into_iter().filter(move |c| c.category() == *self)
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Construction => "Construction",
            Category::Core => "Core Systems",
            Category::Finishes => "Finishes",
            Category::Interiors => "Interiors",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A priced building component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    /// Structural/civil work; scales the base construction rate instead of
    /// adding a per-area price of its own
    CivilQuality,
    Plumbing,
    Electrical,
    /// Air conditioning
    Ac,
    Elevator,
    BuildingEnvelope,
    Lighting,
    Windows,
    Ceiling,
    /// Floor and wall surfaces
    Surfaces,
    FixedFurniture,
    LooseFurniture,
    /// Soft furnishings (curtains, rugs, upholstery)
    Furnishings,
    Appliances,
    Artefacts,
}

impl Component {
    /// All components, in the fixed order costs are accumulated
    pub const ALL: [Component; 15] = [
        Component::CivilQuality,
        Component::Plumbing,
        Component::Electrical,
        Component::Ac,
        Component::Elevator,
        Component::BuildingEnvelope,
        Component::Lighting,
        Component::Windows,
        Component::Ceiling,
        Component::Surfaces,
        Component::FixedFurniture,
        Component::LooseFurniture,
        Component::Furnishings,
        Component::Appliances,
        Component::Artefacts,
    ];

    /// The fourteen components priced per square metre
    pub fn priced() -> impl Iterator<Item = Component> {
        Component::ALL.into_iter().filter(|c| *c != Component::CivilQuality)
    }

    /// Category this component reports under
    pub fn category(&self) -> Category {
        match self {
            Component::CivilQuality => Category::Construction,
            Component::Plumbing | Component::Electrical | Component::Ac | Component::Elevator => Category::Core,
            Component::BuildingEnvelope
            | Component::Lighting
            | Component::Windows
            | Component::Ceiling
            | Component::Surfaces => Category::Finishes,
            Component::FixedFurniture
            | Component::LooseFurniture
            | Component::Furnishings
            | Component::Appliances
            | Component::Artefacts => Category::Interiors,
        }
    }

    /// Key used in JSON and TOML
    pub fn key(&self) -> &'static str {
        match self {
            Component::CivilQuality => "civilQuality",
            Component::Plumbing => "plumbing",
            Component::Electrical => "electrical",
            Component::Ac => "ac",
            Component::Elevator => "elevator",
            Component::BuildingEnvelope => "buildingEnvelope",
            Component::Lighting => "lighting",
            Component::Windows => "windows",
            Component::Ceiling => "ceiling",
            Component::Surfaces => "surfaces",
            Component::FixedFurniture => "fixedFurniture",
            Component::LooseFurniture => "looseFurniture",
            Component::Furnishings => "furnishings",
            Component::Appliances => "appliances",
            Component::Artefacts => "artefacts",
        }
    }

    /// Parse from a key, accepting camelCase, kebab-case and snake_case
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '_', '-'], "");
        Component::ALL
            .into_iter()
            .find(|c| c.key().to_lowercase() == normalized)
            .or(match normalized.as_str() {
                "civil" => Some(Component::CivilQuality),
                "aircon" | "hvac" => Some(Component::Ac),
                "envelope" => Some(Component::BuildingEnvelope),
                _ => None,
            })
            .ok_or_else(|| EstimateError::invalid_input("component", s, "Unknown component"))
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Component::CivilQuality => "Civil Quality",
            Component::Plumbing => "Plumbing",
            Component::Electrical => "Electrical",
            Component::Ac => "Air Conditioning",
            Component::Elevator => "Elevator",
            Component::BuildingEnvelope => "Building Envelope",
            Component::Lighting => "Lighting",
            Component::Windows => "Windows",
            Component::Ceiling => "Ceiling",
            Component::Surfaces => "Surfaces",
            Component::FixedFurniture => "Fixed Furniture",
            Component::LooseFurniture => "Loose Furniture",
            Component::Furnishings => "Furnishings",
            Component::Appliances => "Appliances",
            Component::Artefacts => "Artefacts",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
