//! Command definitions and argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Estimate construction and interior project costs and timelines.
#[derive(Debug, Parser)]
#[command(name = "estimate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Currency used when printing amounts
    #[arg(long, value_enum, global = true, default_value_t = CliCurrency::Inr)]
    pub currency: CliCurrency,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a project and print the estimate
    Compute(ComputeArgs),

    /// List the built-in pricing revisions
    Revisions,

    /// Print a previously saved estimate record
    Show(ShowArgs),
}

/// Arguments for the compute command.
///
/// Flags override the matching fields of `--input` when both are given.
#[derive(Debug, Args)]
pub struct ComputeArgs {
    /// Read the project from a JSON file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Project type (residential, commercial, mixed-use)
    #[arg(short = 't', long = "type")]
    pub project_type: Option<String>,

    /// Floor area in --unit
    #[arg(short, long)]
    pub area: Option<f64>,

    /// Area unit
    #[arg(short, long, value_enum)]
    pub unit: Option<CliAreaUnit>,

    /// City, selects the location multiplier
    #[arg(short, long)]
    pub city: Option<String>,

    /// State or region (display only)
    #[arg(long)]
    pub state: Option<String>,

    /// Design complexity 0-10
    #[arg(long)]
    pub complexity: Option<i32>,

    /// Scope (interior-only, core-shell, full-project, full-landscape, renovation)
    #[arg(long)]
    pub scope: Option<String>,

    /// Set every component to one tier before applying --tier overrides
    #[arg(long)]
    pub all: Option<String>,

    /// Component tier, e.g. `--tier plumbing=premium`; repeatable
    #[arg(long = "tier", value_name = "COMPONENT=TIER")]
    pub tiers: Vec<String>,

    /// Built-in pricing revision
    #[arg(short, long, default_value = "canonical")]
    pub revision: String,

    /// Custom pricing table (TOML); takes precedence over --revision
    #[arg(long, env = "ESTIMATE_PRICING")]
    pub pricing: Option<PathBuf>,

    /// Print the estimate as JSON instead of a report
    #[arg(long)]
    pub json: bool,

    /// Save input and estimate as a record
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Label stored with a saved record
    #[arg(long, default_value = "")]
    pub label: String,
}

/// Arguments for the show command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Record file written by `compute --save`
    pub record: PathBuf,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliCurrency {
    Inr,
    Usd,
}

impl From<CliCurrency> for estimate_core::format::Currency {
    fn from(currency: CliCurrency) -> Self {
        match currency {
            CliCurrency::Inr => estimate_core::format::Currency::Inr,
            CliCurrency::Usd => estimate_core::format::Currency::Usd,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliAreaUnit {
    Sqft,
    Sqm,
}

impl From<CliAreaUnit> for estimate_core::units::AreaUnit {
    fn from(unit: CliAreaUnit) -> Self {
        match unit {
            CliAreaUnit::Sqft => estimate_core::units::AreaUnit::Sqft,
            CliAreaUnit::Sqm => estimate_core::units::AreaUnit::Sqm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compute_flags() {
        let cli = Cli::try_parse_from([
            "estimate", "compute", "--type", "commercial", "--area", "2500", "--unit", "sqm", "--city", "Pune",
            "--tier", "ac=luxury", "--tier", "elevator=premium", "--json",
        ])
        .unwrap();

        let Command::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        assert_eq!(args.project_type.as_deref(), Some("commercial"));
        assert_eq!(args.area, Some(2500.0));
        assert!(matches!(args.unit, Some(CliAreaUnit::Sqm)));
        assert_eq!(args.tiers, vec!["ac=luxury", "elevator=premium"]);
        assert_eq!(args.revision, "canonical");
        assert!(args.json);
    }

    #[test]
    fn test_show_takes_a_path() {
        let cli = Cli::try_parse_from(["estimate", "--currency", "usd", "show", "site.estimate.json"]).unwrap();
        assert!(matches!(cli.currency, CliCurrency::Usd));
        assert!(matches!(cli.command, Command::Show(ShowArgs { ref record, json: false }) if record.ends_with("site.estimate.json")));
    }
}
