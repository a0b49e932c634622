//! # estimate_core - Construction Cost and Timeline Estimation
//!
//! `estimate_core` prices a construction or interior-fit-out project from a
//! small set of inputs: project type, built-up area, location, complexity and
//! a quality tier for each building component. It returns a total cost, a
//! per-category and per-phase breakdown, and a phase-by-phase timeline.
//!
//! All inputs and outputs are JSON-serializable so the engine can sit behind
//! a form, a report exporter or a fee calculator without glue code.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over immutable pricing tables
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Deterministic**: Same input and table, same estimate, bit for bit
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::{compute_estimate, ProjectInput, ProjectType, QualityTier};
//! use estimate_core::quality::Component;
//! use estimate_core::units::AreaUnit;
//!
//! let input = ProjectInput::new(ProjectType::Residential, 1500.0, AreaUnit::Sqft)
//!     .with_city("Pune")
//!     .with_component(Component::FixedFurniture, QualityTier::Premium);
//!
//! let estimate = compute_estimate(&input).unwrap();
//! println!("{} over {} months", estimate.total_cost, estimate.timeline.total_months);
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project input, scope and component selections
//! - [`quality`] - Quality tiers, components and categories
//! - [`pricing`] - Pricing tables, revisions and location multipliers
//! - [`calculations`] - The construction, component, adjustment and timeline stages
//! - [`estimate`] - The orchestrator producing a [`CostEstimate`]
//! - [`format`] - Currency display helpers
//! - [`units`] - Type-safe area units
//! - [`errors`] - Structured error types
//! - [`file_io`] - Saved estimate records with atomic writes

pub mod calculations;
pub mod errors;
pub mod estimate;
pub mod file_io;
pub mod format;
pub mod pricing;
pub mod project;
pub mod quality;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{EstimateError, EstimateResult};
pub use estimate::{compute_estimate, compute_estimate_with, CostEstimate};
pub use file_io::{load_record, save_record, EstimateRecord};
pub use pricing::{PricingRevision, PricingTable};
pub use project::{ProjectInput, ProjectScope, ProjectType};
pub use quality::{Category, Component, QualityTier};
