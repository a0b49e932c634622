//! # Component Cost Aggregation
//!
//! Prices the fourteen per-area components and totals them into the core,
//! finishes and interiors categories. Civil quality is handled by
//! [`construction`](super::construction) and never appears here.
//!
//! Components are accumulated in [`Component::ALL`] order so results are
//! reproducible to the last bit.

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::pricing::PricingTable;
use crate::project::ComponentSelections;
use crate::quality::{Category, Component, QualityTier};

/// One priced component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub component: Component,
    pub category: Category,
    pub tier: QualityTier,
    pub price_per_sqm: f64,
    pub cost: f64,
}

/// Category totals plus the line items behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCosts {
    /// Plumbing, electrical, AC, elevator
    pub core: f64,

    /// Envelope, lighting, windows, ceiling, surfaces
    pub finishes: f64,

    /// Furniture, furnishings, appliances, artefacts
    pub interiors: f64,

    /// All fourteen priced components, including ones left out
    pub line_items: Vec<LineItem>,
}

impl ComponentCosts {
    /// Total for one category (zero for `Construction`)
    pub fn category_total(&self, category: Category) -> f64 {
        match category {
            Category::Construction => 0.0,
            Category::Core => self.core,
            Category::Finishes => self.finishes,
            Category::Interiors => self.interiors,
        }
    }

    /// Sum of all three categories
    pub fn total(&self) -> f64 {
        self.core + self.finishes + self.interiors
    }

    /// Line items that actually cost something
    pub fn included(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.iter().filter(|item| item.cost > 0.0)
    }
}

/// Price every component at its selected tier.
///
/// `selections` should already have scope zeroing applied (see
/// [`ProjectInput::effective_components`](crate::project::ProjectInput::effective_components)).
pub fn calculate(selections: &ComponentSelections, area_sqm: f64, table: &PricingTable) -> EstimateResult<ComponentCosts> {
    if !(area_sqm.is_finite() && area_sqm > 0.0) {
        return Err(EstimateError::invalid_area(area_sqm, "Area must be a positive number"));
    }

    let mut costs = ComponentCosts {
        core: 0.0,
        finishes: 0.0,
        interiors: 0.0,
        line_items: Vec::with_capacity(14),
    };

    for component in Component::priced() {
        let tier = selections.get(component);
        let price_per_sqm = table.price_per_sqm(component, tier);
        let cost = price_per_sqm * area_sqm;
        let category = component.category();

        match category {
            Category::Core => costs.core += cost,
            Category::Finishes => costs.finishes += cost,
            Category::Interiors => costs.interiors += cost,
            Category::Construction => {}
        }

        costs.line_items.push(LineItem {
            component,
            category,
            tier,
            price_per_sqm,
            cost,
        });
    }

    Ok(costs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_selected() {
        let costs = calculate(&ComponentSelections::none(), 120.0, PricingTable::canonical()).unwrap();
        assert_eq!(costs.total(), 0.0);
        assert_eq!(costs.line_items.len(), 14);
        assert_eq!(costs.included().count(), 0);
    }

    #[test]
    fn test_all_standard() {
        let costs = calculate(
            &ComponentSelections::uniform(QualityTier::Standard),
            100.0,
            PricingTable::canonical(),
        )
        .unwrap();
        // 180 + 150 + 400 + 180
        assert!((costs.core - 91_000.0).abs() < 1e-6);
        // 150 + 120 + 220 + 130 + 280
        assert!((costs.finishes - 90_000.0).abs() < 1e-6);
        // 400 + 280 + 90 + 180 + 70
        assert!((costs.interiors - 102_000.0).abs() < 1e-6);
        assert_eq!(costs.category_total(Category::Construction), 0.0);
    }

    #[test]
    fn test_single_component() {
        let mut selections = ComponentSelections::none();
        selections.set(Component::Ac, QualityTier::Luxury);
        let costs = calculate(&selections, 50.0, PricingTable::canonical()).unwrap();
        assert!((costs.core - 1400.0 * 50.0).abs() < 1e-6);
        assert_eq!(costs.finishes, 0.0);
        assert_eq!(costs.interiors, 0.0);

        let included: Vec<_> = costs.included().collect();
        assert_eq!(included.len(), 1);
        assert_eq!(included[0].component, Component::Ac);
        assert_eq!(included[0].price_per_sqm, 1400.0);
    }

    #[test]
    fn test_civil_quality_not_a_line_item() {
        let costs = calculate(
            &ComponentSelections::uniform(QualityTier::Luxury),
            80.0,
            PricingTable::canonical(),
        )
        .unwrap();
        assert!(costs.line_items.iter().all(|item| item.component != Component::CivilQuality));
    }

    #[test]
    fn test_upgrade_never_decreases_category() {
        let table = PricingTable::canonical();
        for component in Component::priced() {
            let mut previous = 0.0;
            for tier in QualityTier::ALL {
                let mut selections = ComponentSelections::none();
                selections.set(component, tier);
                let total = calculate(&selections, 75.0, table).unwrap().total();
                assert!(total >= previous, "{} at {} decreased", component, tier);
                previous = total;
            }
        }
    }

    #[test]
    fn test_invalid_area() {
        assert!(calculate(&ComponentSelections::none(), 0.0, PricingTable::canonical()).is_err());
    }
}
