//! # Estimate CLI
//!
//! Command-line front end for `estimate_core`. Builds a project from flags
//! or a JSON file, prices it and prints a report or JSON.
//!
//! ```text
//! estimate compute --type residential --area 1000 --city Mumbai --tier ac=premium
//! estimate compute --input project.json --revision revised-2024 --save site.estimate.json
//! estimate revisions
//! estimate show site.estimate.json
//! ```
//!
//! Set `RUST_LOG=debug` to trace the pricing pipeline.

mod cli;
mod report;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Command, ComputeArgs, ShowArgs};
use estimate_core::format::Currency;
use estimate_core::pricing::load_pricing_table;
use estimate_core::project::ComponentSelections;
use estimate_core::{
    compute_estimate_with, load_record, save_record, Component, EstimateRecord, PricingRevision, PricingTable,
    ProjectInput, ProjectScope, ProjectType, QualityTier,
};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let currency = Currency::from(cli.currency);

    match cli.command {
        Command::Compute(args) => run_compute(args, currency),
        Command::Revisions => run_revisions(),
        Command::Show(args) => run_show(args, currency),
    }
}

fn run_compute(args: ComputeArgs, currency: Currency) -> Result<()> {
    let input = build_input(&args)?;
    let table = resolve_table(&args.revision, args.pricing.as_deref())?;

    let estimate = compute_estimate_with(&input, &table).context("failed to compute estimate")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        print!("{}", report::render(&input, &estimate, currency));
    }

    if let Some(path) = &args.save {
        let record = EstimateRecord::new(args.label.clone(), input, estimate);
        save_record(&record, path).with_context(|| format!("failed to save record to {}", path.display()))?;
        tracing::info!(path = %path.display(), id = %record.meta.id, "saved estimate");
        eprintln!("Saved {}", path.display());
    }

    Ok(())
}

fn run_revisions() -> Result<()> {
    for revision in PricingRevision::ALL {
        let table = revision.table();
        println!("{:<14} {}", revision.key(), table.description);
    }
    Ok(())
}

fn run_show(args: ShowArgs, currency: Currency) -> Result<()> {
    let record = load_record(&args.record).with_context(|| format!("failed to load {}", args.record.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", report::render_record(&record, currency));
    }
    Ok(())
}

/// Pick the pricing table: a TOML file wins over a named revision.
fn resolve_table(revision: &str, pricing: Option<&Path>) -> Result<PricingTable> {
    if let Some(path) = pricing {
        let table = load_pricing_table(path).with_context(|| format!("failed to load pricing table {}", path.display()))?;
        tracing::debug!(path = %path.display(), name = %table.name, "using custom pricing table");
        return Ok(table);
    }

    let revision = PricingRevision::from_str_flexible(revision)?;
    Ok(revision.table().clone())
}

/// Merge the optional JSON input with the command-line flags.
fn build_input(args: &ComputeArgs) -> Result<ProjectInput> {
    let mut input = match &args.input {
        Some(path) => {
            let contents = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<ProjectInput>(&contents)
                .with_context(|| format!("invalid project JSON in {}", path.display()))?
        }
        None => ProjectInput::default(),
    };

    if let Some(project_type) = &args.project_type {
        input.project_type = Some(ProjectType::from_str_flexible(project_type)?);
    }
    if let Some(area) = args.area {
        input.area = area;
    }
    if let Some(unit) = args.unit {
        input.area_unit = unit.into();
    }
    if let Some(city) = &args.city {
        input.city = city.clone();
    }
    if let Some(state) = &args.state {
        input.state = state.clone();
    }
    if let Some(complexity) = args.complexity {
        input.complexity = complexity;
    }
    if let Some(scope) = &args.scope {
        input.scope = ProjectScope::from_str_flexible(scope)?;
    }
    if let Some(tier) = &args.all {
        input.components = ComponentSelections::uniform(QualityTier::from_str_flexible(tier)?);
    }
    for pair in &args.tiers {
        let (component, tier) = parse_tier_override(pair)?;
        input.components.set(component, tier);
    }

    Ok(input)
}

/// Parse `component=tier`.
fn parse_tier_override(pair: &str) -> Result<(Component, QualityTier)> {
    let (component, tier) = pair
        .split_once('=')
        .with_context(|| format!("expected COMPONENT=TIER, got '{}'", pair))?;
    Ok((Component::from_str_flexible(component)?, QualityTier::from_str_flexible(tier)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimate_core::units::AreaUnit;

    fn compute_args(argv: &[&str]) -> ComputeArgs {
        let mut full = vec!["estimate", "compute"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Compute(args) => args,
            _ => panic!("expected compute"),
        }
    }

    #[test]
    fn test_flags_build_input() {
        let args = compute_args(&[
            "--type", "mixed-use", "--area", "420", "--unit", "sqm", "--city", "Noida", "--complexity", "7",
            "--tier", "ac=luxury",
        ]);
        let input = build_input(&args).unwrap();
        assert_eq!(input.project_type, Some(ProjectType::MixedUse));
        assert_eq!(input.area, 420.0);
        assert_eq!(input.area_unit, AreaUnit::Sqm);
        assert_eq!(input.city, "Noida");
        assert_eq!(input.complexity, 7);
        assert_eq!(input.components.get(Component::Ac), QualityTier::Luxury);
    }

    #[test]
    fn test_all_then_override() {
        let args = compute_args(&["--type", "residential", "--area", "900", "--all", "premium", "--tier", "elevator=none"]);
        let input = build_input(&args).unwrap();
        assert_eq!(input.components.get(Component::Surfaces), QualityTier::Premium);
        assert_eq!(input.components.get(Component::Elevator), QualityTier::NotIncluded);
    }

    #[test]
    fn test_bad_tier_override() {
        assert!(parse_tier_override("plumbing").is_err());
        assert!(parse_tier_override("plumbing=premium").is_ok());
    }

    #[test]
    fn test_revision_lookup() {
        assert_eq!(resolve_table("boutique", None).unwrap().name, "boutique");
        assert_eq!(resolve_table("Revised 2024", None).unwrap().name, "revised-2024");
        assert!(resolve_table("vintage", None).is_err());
        assert!(resolve_table("canonical", Some(Path::new("/nonexistent/rates.toml"))).is_err());
    }
}
