//! # Estimate Calculations
//!
//! The four pricing and scheduling stages. Each stage follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ...) -> EstimateResult<*Result>` - Pure calculation function
//!
//! [`crate::estimate`] composes them into a single estimate; they are public
//! so callers can inspect or test a single stage.
//!
//! ## Available Calculations
//!
//! - [`construction`] - Shell cost from type, area and civil quality
//! - [`components`] - Per-component costs summed into categories
//! - [`adjustments`] - Location, project, contingency, fee and tax multipliers
//! - [`timeline`] - Phase durations

pub mod adjustments;
pub mod components;
pub mod construction;
pub mod timeline;

// Re-export commonly used types
pub use adjustments::{AdjustmentInput, AdjustmentResult};
pub use components::{ComponentCosts, LineItem};
pub use construction::{ConstructionInput, ConstructionResult};
pub use timeline::{PhaseMonths, Timeline, TimelineInput};
