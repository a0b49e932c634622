//! # Project Input
//!
//! [`ProjectInput`] is the caller-owned description of what is being
//! estimated. A form builds it one field at a time and hands the whole value
//! to [`compute_estimate`](crate::estimate::compute_estimate) after every
//! change. The engine never stores it.
//!
//! ## Structure
//!
//! ```text
//! ProjectInput
//! ├── projectType: residential | commercial | mixed-use
//! ├── scope: interior-only | core-shell | full-project | full-landscape | renovation
//! ├── area + areaUnit
//! ├── city, state
//! ├── complexity: 0-10
//! └── 15 component selections (flattened): civilQuality, plumbing, ...
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::project::{ProjectInput, ProjectType};
//! use estimate_core::quality::{Component, QualityTier};
//! use estimate_core::units::AreaUnit;
//!
//! let input = ProjectInput::new(ProjectType::Residential, 1200.0, AreaUnit::Sqft)
//!     .with_city("Pune")
//!     .with_component(Component::Ac, QualityTier::Premium);
//!
//! let json = serde_json::to_string_pretty(&input).unwrap();
//! assert!(json.contains("\"ac\": \"premium\""));
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::quality::{Category, Component, QualityTier};
use crate::units::{AreaUnit, SqM};

/// Complexity used when the caller does not set one
pub const DEFAULT_COMPLEXITY: i32 = 5;

/// Lowest accepted complexity; lower values are clamped
pub const MIN_COMPLEXITY: i32 = 0;

/// Highest accepted complexity; higher values are clamped
pub const MAX_COMPLEXITY: i32 = 10;

/// Building typology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Residential,
    Commercial,
    MixedUse,
}

impl ProjectType {
    /// All project types for UI selection
    pub const ALL: [ProjectType; 3] = [ProjectType::Residential, ProjectType::Commercial, ProjectType::MixedUse];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "" => Err(EstimateError::MissingProjectType),
            "residential" | "home" | "house" => Ok(ProjectType::Residential),
            "commercial" | "office" | "retail" => Ok(ProjectType::Commercial),
            "mixed-use" | "mixeduse" | "mixed" => Ok(ProjectType::MixedUse),
            _ => Err(EstimateError::invalid_input(
                "projectType",
                s,
                "Expected residential, commercial or mixed-use",
            )),
        }
    }

    /// Key used in JSON and TOML
    pub fn key(&self) -> &'static str {
        match self {
            ProjectType::Residential => "residential",
            ProjectType::Commercial => "commercial",
            ProjectType::MixedUse => "mixed-use",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Residential => "Residential",
            ProjectType::Commercial => "Commercial",
            ProjectType::MixedUse => "Mixed-Use",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Scope of work, layered on top of the typology.
///
/// Scope never changes a rate. It only decides which components are forced
/// to `NotIncluded` before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectScope {
    /// Fit-out of an existing shell: no civil work, no envelope
    InteriorOnly,
    /// Structure, services and envelope, no interiors
    CoreShell,
    #[default]
    FullProject,
    /// Full project plus outdoor works (landscape is not priced separately)
    FullLandscape,
    Renovation,
}

impl ProjectScope {
    /// All scopes for UI selection
    pub const ALL: [ProjectScope; 5] = [
        ProjectScope::InteriorOnly,
        ProjectScope::CoreShell,
        ProjectScope::FullProject,
        ProjectScope::FullLandscape,
        ProjectScope::Renovation,
    ];

    /// Whether this scope forces the component out of the estimate
    pub fn excludes(&self, component: Component) -> bool {
        match self {
            ProjectScope::InteriorOnly => {
                matches!(component, Component::CivilQuality | Component::BuildingEnvelope)
            }
            ProjectScope::CoreShell => component.category() == Category::Interiors,
            ProjectScope::FullProject | ProjectScope::FullLandscape | ProjectScope::Renovation => false,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_', '&'], "-").as_str() {
            "interior-only" | "interior" | "interiors" => Ok(ProjectScope::InteriorOnly),
            "core-shell" | "core---shell" | "shell" => Ok(ProjectScope::CoreShell),
            "full-project" | "full" => Ok(ProjectScope::FullProject),
            "full-landscape" | "landscape" => Ok(ProjectScope::FullLandscape),
            "renovation" | "remodel" => Ok(ProjectScope::Renovation),
            _ => Err(EstimateError::invalid_input("scope", s, "Unknown project scope")),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectScope::InteriorOnly => "Interior Design Only",
            ProjectScope::CoreShell => "Core & Shell",
            ProjectScope::FullProject => "Full Project",
            ProjectScope::FullLandscape => "Full Project + Landscape",
            ProjectScope::Renovation => "Renovation/Remodel",
        }
    }
}

impl std::fmt::Display for ProjectScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Quality tier selected for each of the fifteen components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentSelections {
    pub civil_quality: QualityTier,
    pub plumbing: QualityTier,
    pub electrical: QualityTier,
    pub ac: QualityTier,
    pub elevator: QualityTier,
    pub building_envelope: QualityTier,
    pub lighting: QualityTier,
    pub windows: QualityTier,
    pub ceiling: QualityTier,
    pub surfaces: QualityTier,
    pub fixed_furniture: QualityTier,
    pub loose_furniture: QualityTier,
    pub furnishings: QualityTier,
    pub appliances: QualityTier,
    pub artefacts: QualityTier,
}

impl ComponentSelections {
    /// Every component set to the same tier
    pub fn uniform(tier: QualityTier) -> Self {
        let mut selections = ComponentSelections::none();
        for component in Component::ALL {
            selections.set(component, tier);
        }
        selections
    }

    /// Every component left out
    pub fn none() -> Self {
        ComponentSelections {
            civil_quality: QualityTier::NotIncluded,
            plumbing: QualityTier::NotIncluded,
            electrical: QualityTier::NotIncluded,
            ac: QualityTier::NotIncluded,
            elevator: QualityTier::NotIncluded,
            building_envelope: QualityTier::NotIncluded,
            lighting: QualityTier::NotIncluded,
            windows: QualityTier::NotIncluded,
            ceiling: QualityTier::NotIncluded,
            surfaces: QualityTier::NotIncluded,
            fixed_furniture: QualityTier::NotIncluded,
            loose_furniture: QualityTier::NotIncluded,
            furnishings: QualityTier::NotIncluded,
            appliances: QualityTier::NotIncluded,
            artefacts: QualityTier::NotIncluded,
        }
    }

    /// Tier selected for a component
    pub fn get(&self, component: Component) -> QualityTier {
        match component {
            Component::CivilQuality => self.civil_quality,
            Component::Plumbing => self.plumbing,
            Component::Electrical => self.electrical,
            Component::Ac => self.ac,
            Component::Elevator => self.elevator,
            Component::BuildingEnvelope => self.building_envelope,
            Component::Lighting => self.lighting,
            Component::Windows => self.windows,
            Component::Ceiling => self.ceiling,
            Component::Surfaces => self.surfaces,
            Component::FixedFurniture => self.fixed_furniture,
            Component::LooseFurniture => self.loose_furniture,
            Component::Furnishings => self.furnishings,
            Component::Appliances => self.appliances,
            Component::Artefacts => self.artefacts,
        }
    }

    /// Set the tier for a component
    pub fn set(&mut self, component: Component, tier: QualityTier) {
        let slot = match component {
            Component::CivilQuality => &mut self.civil_quality,
            Component::Plumbing => &mut self.plumbing,
            Component::Electrical => &mut self.electrical,
            Component::Ac => &mut self.ac,
            Component::Elevator => &mut self.elevator,
            Component::BuildingEnvelope => &mut self.building_envelope,
            Component::Lighting => &mut self.lighting,
            Component::Windows => &mut self.windows,
            Component::Ceiling => &mut self.ceiling,
            Component::Surfaces => &mut self.surfaces,
            Component::FixedFurniture => &mut self.fixed_furniture,
            Component::LooseFurniture => &mut self.loose_furniture,
            Component::Furnishings => &mut self.furnishings,
            Component::Appliances => &mut self.appliances,
            Component::Artefacts => &mut self.artefacts,
        };
        *slot = tier;
    }

    /// (component, tier) pairs in accumulation order
    pub fn iter(&self) -> impl Iterator<Item = (Component, QualityTier)> + '_ {
        Component::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl Default for ComponentSelections {
    /// Wizard defaults: civil work, plumbing and electrical at standard,
    /// everything else left out.
    fn default() -> Self {
        ComponentSelections {
            civil_quality: QualityTier::Standard,
            plumbing: QualityTier::Standard,
            electrical: QualityTier::Standard,
            ..ComponentSelections::none()
        }
    }
}

/// Everything the engine needs to price a project.
///
/// ## JSON Example
///
/// ```json
/// {
///   "projectType": "residential",
///   "scope": "full-project",
///   "area": 1000.0,
///   "areaUnit": "sqft",
///   "city": "Mumbai",
///   "state": "Maharashtra",
///   "complexity": 5,
///   "civilQuality": "standard",
///   "plumbing": "premium",
///   "elevator": "notIncluded"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    /// Building typology; `None` until the user picks one
    #[serde(default, deserialize_with = "deserialize_project_type")]
    pub project_type: Option<ProjectType>,

    #[serde(default)]
    pub scope: ProjectScope,

    /// Floor area in `area_unit`
    #[serde(default)]
    pub area: f64,

    #[serde(default)]
    pub area_unit: AreaUnit,

    /// City name, used as the location multiplier key
    #[serde(default)]
    pub city: String,

    /// State or region, display only
    #[serde(default)]
    pub state: String,

    /// Design complexity 0-10
    #[serde(default = "default_complexity")]
    pub complexity: i32,

    #[serde(flatten)]
    pub components: ComponentSelections,
}

fn default_complexity() -> i32 {
    DEFAULT_COMPLEXITY
}

/// Empty string means "not chosen yet"; an unrecognised name falls back to
/// residential so a stale form value never blocks an estimate.
fn deserialize_project_type<'de, D>(deserializer: D) -> Result<Option<ProjectType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(s) => match ProjectType::from_str_flexible(&s) {
            Ok(project_type) => Some(project_type),
            Err(EstimateError::MissingProjectType) => None,
            Err(_) => {
                tracing::warn!(project_type = %s, "unrecognized project type, using residential rates");
                Some(ProjectType::Residential)
            }
        },
    })
}

impl ProjectInput {
    /// Create an input with default selections and complexity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use estimate_core::project::{ProjectInput, ProjectType};
    /// use estimate_core::units::AreaUnit;
    ///
    /// let input = ProjectInput::new(ProjectType::Commercial, 250.0, AreaUnit::Sqm);
    /// assert_eq!(input.complexity, 5);
    /// assert!(input.validate().is_ok());
    /// ```
    pub fn new(project_type: ProjectType, area: f64, area_unit: AreaUnit) -> Self {
        ProjectInput {
            project_type: Some(project_type),
            area,
            area_unit,
            ..ProjectInput::default()
        }
    }

    /// Builder method to set the city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Builder method to set the state/region
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Builder method to set the complexity
    pub fn with_complexity(mut self, complexity: i32) -> Self {
        self.complexity = complexity;
        self
    }

    /// Builder method to set the scope
    pub fn with_scope(mut self, scope: ProjectScope) -> Self {
        self.scope = scope;
        self
    }

    /// Builder method to set one component's tier
    pub fn with_component(mut self, component: Component, tier: QualityTier) -> Self {
        self.components.set(component, tier);
        self
    }

    /// Builder method to replace every selection at once
    pub fn with_components(mut self, components: ComponentSelections) -> Self {
        self.components = components;
        self
    }

    /// Validate the two fatal preconditions and return the project type.
    ///
    /// Area must be finite and positive, and a project type must be chosen.
    pub fn validate(&self) -> EstimateResult<ProjectType> {
        if !self.area.is_finite() {
            return Err(EstimateError::invalid_area(self.area, "Area must be a finite number"));
        }
        if self.area <= 0.0 {
            return Err(EstimateError::invalid_area(self.area, "Area must be greater than zero"));
        }
        self.project_type.ok_or(EstimateError::MissingProjectType)
    }

    /// Area converted to square metres
    pub fn area_sqm(&self) -> SqM {
        self.area_unit.to_sqm(self.area)
    }

    /// Complexity clamped into 0-10
    pub fn clamped_complexity(&self) -> i32 {
        self.complexity.clamp(MIN_COMPLEXITY, MAX_COMPLEXITY)
    }

    /// Tier that will actually be priced once the scope is applied
    pub fn effective_tier(&self, component: Component) -> QualityTier {
        if self.scope.excludes(component) {
            QualityTier::NotIncluded
        } else {
            self.components.get(component)
        }
    }

    /// Selections after scope zeroing
    pub fn effective_components(&self) -> ComponentSelections {
        let mut effective = self.components.clone();
        for component in Component::ALL {
            effective.set(component, self.effective_tier(component));
        }
        effective
    }
}

impl Default for ProjectInput {
    fn default() -> Self {
        ProjectInput {
            project_type: None,
            scope: ProjectScope::default(),
            area: 0.0,
            area_unit: AreaUnit::default(),
            city: String::new(),
            state: String::new(),
            complexity: DEFAULT_COMPLEXITY,
            components: ComponentSelections::default(),
        }
    }
}
