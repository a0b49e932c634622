//! Plain-text estimate report.

use std::fmt;

use estimate_core::format::{format_currency, Currency};
use estimate_core::{Category, CostEstimate, EstimateRecord, ProjectInput};

const RULE: &str = "═══════════════════════════════════════";

/// An estimate and the input it was computed from, displayed as a report.
pub struct Report<'a> {
    pub input: &'a ProjectInput,
    pub estimate: &'a CostEstimate,
    pub currency: Currency,
}

impl Report<'_> {
    fn money(&self, value: f64) -> String {
        format_currency(value, self.currency)
    }

    fn write_project(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = self.input;
        writeln!(f, "Project:")?;
        if let Some(project_type) = input.project_type {
            writeln!(f, "  Type:       {}", project_type.display_name())?;
        }
        writeln!(f, "  Scope:      {}", input.scope.display_name())?;
        writeln!(
            f,
            "  Area:       {:.0} {} ({:.1} sqm)",
            input.area,
            input.area_unit.label(),
            self.estimate.area_sqm
        )?;
        if !input.city.is_empty() {
            let location = if input.state.is_empty() {
                input.city.clone()
            } else {
                format!("{}, {}", input.city, input.state)
            };
            let matched = if self.estimate.adjustments.location_matched { "" } else { " (default rate)" };
            writeln!(f, "  Location:   {}{}", location, matched)?;
        }
        writeln!(f, "  Complexity: {}", input.clamped_complexity())?;
        writeln!(f, "  Pricing:    {}", self.estimate.pricing_revision)
    }

    fn write_costs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let estimate = self.estimate;

        writeln!(f, "Categories:")?;
        for category in Category::ALL {
            writeln!(
                f,
                "  {:<13} {:>14}  {:>5.1}%",
                category.display_name(),
                self.money(estimate.category_breakdown.get(category)),
                estimate.category_share(category)
            )?;
        }
        writeln!(f)?;

        let mut included = estimate.line_items.iter().filter(|item| item.cost > 0.0).peekable();
        if included.peek().is_some() {
            writeln!(f, "Components (before adjustments):")?;
            for item in included {
                writeln!(
                    f,
                    "  {:<17} {:<9} {:>14}",
                    item.component.display_name(),
                    item.tier.display_name(),
                    self.money(item.cost)
                )?;
            }
            writeln!(f)?;
        }

        let adj = &estimate.adjustments;
        writeln!(f, "Adjustments:")?;
        writeln!(f, "  Subtotal         {:>14}", self.money(adj.subtotal))?;
        writeln!(f, "  Location         × {:.2}", adj.location_multiplier)?;
        writeln!(f, "  Project          × {:.3}", adj.project_multiplier)?;
        writeln!(f, "  Contingency      {:>14}", self.money(adj.contingency))?;
        if adj.professional_fees > 0.0 {
            writeln!(f, "  Fees             {:>14}", self.money(adj.professional_fees))?;
        }
        if adj.tax > 0.0 {
            writeln!(f, "  Tax              {:>14}", self.money(adj.tax))?;
        }
        Ok(())
    }

    fn write_phases(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phases = &self.estimate.timeline.phases;
        let costs = &self.estimate.phase_breakdown;
        writeln!(f, "Phases:")?;
        writeln!(f, "  Planning      {:>3} mo {:>14}", phases.planning, self.money(costs.planning))?;
        writeln!(f, "  Construction  {:>3} mo {:>14}", phases.construction, self.money(costs.construction))?;
        writeln!(f, "  Interiors     {:>3} mo {:>14}", phases.interiors, self.money(costs.interiors))
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "  PROJECT ESTIMATE")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;

        self.write_project(f)?;
        writeln!(f)?;
        self.write_costs(f)?;
        writeln!(f)?;
        self.write_phases(f)?;
        writeln!(f)?;

        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "  TOTAL: {} over {} months ({} per {})",
            self.money(self.estimate.total_cost),
            self.estimate.timeline.total_months,
            self.money(self.estimate.cost_per_unit_area),
            self.input.area_unit.label()
        )?;
        writeln!(f, "{RULE}")
    }
}

/// A saved record: header lines followed by its report.
pub struct RecordReport<'a> {
    pub record: &'a EstimateRecord,
    pub currency: Currency,
}

impl fmt::Display for RecordReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.record.meta;
        let label = if meta.label.is_empty() { "(unlabelled)" } else { &meta.label };
        writeln!(f, "Record {} - {}", meta.id, label)?;
        writeln!(f, "Saved  {}", meta.created.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f)?;
        write!(
            f,
            "{}",
            Report {
                input: &self.record.input,
                estimate: &self.record.estimate,
                currency: self.currency,
            }
        )
    }
}

/// Render an estimate and the input it was computed from.
pub fn render(input: &ProjectInput, estimate: &CostEstimate, currency: Currency) -> String {
    Report {
        input,
        estimate,
        currency,
    }
    .to_string()
}

/// Render a saved record with its header.
pub fn render_record(record: &EstimateRecord, currency: Currency) -> String {
    RecordReport { record, currency }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimate_core::project::ProjectType;
    use estimate_core::units::AreaUnit;
    use estimate_core::{compute_estimate, compute_estimate_with, PricingRevision};

    #[test]
    fn test_report_mentions_totals() {
        let input = ProjectInput::new(ProjectType::Residential, 1000.0, AreaUnit::Sqft).with_city("Mumbai");
        let estimate = compute_estimate(&input).unwrap();
        let report = render(&input, &estimate, Currency::Inr);

        assert!(report.contains(&format_currency(estimate.total_cost, Currency::Inr)));
        assert!(report.contains("Mumbai"));
        assert!(report.contains(&format!("over {} months", estimate.timeline.total_months)));
        assert!(!report.contains("default rate"));
        assert!(!report.contains("Fees"));
        assert!(report.ends_with(&format!("{RULE}\n")));
    }

    #[test]
    fn test_unknown_city_is_flagged() {
        let input = ProjectInput::new(ProjectType::Commercial, 300.0, AreaUnit::Sqm).with_city("Atlantis");
        let estimate = compute_estimate(&input).unwrap();
        assert!(render(&input, &estimate, Currency::Usd).contains("Atlantis (default rate)"));
    }

    #[test]
    fn test_fees_and_tax_lines_when_charged() {
        let input = ProjectInput::new(ProjectType::Commercial, 300.0, AreaUnit::Sqm);
        let estimate = compute_estimate_with(&input, PricingRevision::FeesAndGst.table()).unwrap();
        let report = render(&input, &estimate, Currency::Inr);

        let fees = format_currency(estimate.adjustments.professional_fees, Currency::Inr);
        let tax = format_currency(estimate.adjustments.tax, Currency::Inr);
        assert!(report.contains(&format!("  Fees             {:>14}", fees)));
        assert!(report.contains(&format!("  Tax              {:>14}", tax)));
    }

    #[test]
    fn test_record_report_has_header() {
        let input = ProjectInput::new(ProjectType::Residential, 1200.0, AreaUnit::Sqft);
        let estimate = compute_estimate(&input).unwrap();
        let record = EstimateRecord::new(String::new(), input, estimate);

        let text = render_record(&record, Currency::Inr);
        assert!(text.starts_with(&format!("Record {} - (unlabelled)\n", record.meta.id)));
        assert!(text.contains("PROJECT ESTIMATE"));
    }
}
