//! Location multipliers.
//!
//! Regional price variance is a single scalar per city. City names are
//! matched trimmed and case-insensitively; anything not listed (including an
//! empty city) prices at the table's default multiplier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key that always resolves to the default multiplier
pub const DEFAULT_LOCATION_KEY: &str = "default";

/// Multiplier for cities not in the table
pub const DEFAULT_LOCATION_MULTIPLIER: f64 = 0.95;

/// Per-city multipliers plus a fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationTable {
    /// Multiplier for unknown or empty cities
    pub default: f64,

    /// Lower-case city name -> multiplier
    #[serde(default)]
    pub cities: BTreeMap<String, f64>,
}

/// Outcome of a city lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationMatch {
    pub multiplier: f64,
    /// False when the default multiplier was used
    pub matched: bool,
}

impl LocationTable {
    /// Build a table from (city, multiplier) pairs
    pub fn new<'a>(default: f64, cities: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        LocationTable {
            default,
            cities: cities
                .into_iter()
                .map(|(city, multiplier)| (normalize_city(city), multiplier))
                .collect(),
        }
    }

    /// Multiplier for a listed city, `None` if it is not listed
    pub fn lookup(&self, city: &str) -> Option<f64> {
        self.cities.get(&normalize_city(city)).copied()
    }

    /// Resolve a city, falling back to the default multiplier
    pub fn resolve(&self, city: &str) -> LocationMatch {
        match self.lookup(city) {
            Some(multiplier) => LocationMatch {
                multiplier,
                matched: true,
            },
            None => LocationMatch {
                multiplier: self.default,
                matched: false,
            },
        }
    }

    /// Multiplier for a city, falling back to the default
    pub fn multiplier(&self, city: &str) -> f64 {
        self.resolve(city).multiplier
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !(self.default.is_finite() && self.default > 0.0) {
            return Err("default location multiplier must be positive".to_string());
        }
        for (city, multiplier) in &self.cities {
            if !(multiplier.is_finite() && *multiplier > 0.0) {
                return Err(format!("location multiplier for '{}' must be positive", city));
            }
        }
        Ok(())
    }
}

impl Default for LocationTable {
    fn default() -> Self {
        LocationTable {
            default: DEFAULT_LOCATION_MULTIPLIER,
            cities: BTreeMap::new(),
        }
    }
}

fn normalize_city(city: &str) -> String {
    city.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Canonical city multipliers.
///
/// Tier-1 metros sit at 1.15-1.30, tier-2 cities at 1.00-1.12.
pub fn canonical_locations() -> LocationTable {
    LocationTable::new(
        DEFAULT_LOCATION_MULTIPLIER,
        [
            // tier 1
            ("mumbai", 1.30),
            ("navi mumbai", 1.22),
            ("delhi", 1.25),
            ("new delhi", 1.25),
            ("gurgaon", 1.22),
            ("gurugram", 1.22),
            ("noida", 1.18),
            ("bangalore", 1.20),
            ("bengaluru", 1.20),
            ("hyderabad", 1.15),
            ("chennai", 1.15),
            ("kolkata", 1.15),
            ("pune", 1.15),
            // tier 2
            ("goa", 1.12),
            ("chandigarh", 1.10),
            ("ahmedabad", 1.08),
            ("kochi", 1.08),
            ("surat", 1.06),
            ("jaipur", 1.05),
            ("thiruvananthapuram", 1.05),
            ("coimbatore", 1.04),
            ("vadodara", 1.04),
            ("indore", 1.03),
            ("visakhapatnam", 1.03),
            ("lucknow", 1.02),
            ("nagpur", 1.02),
            ("mysore", 1.02),
            ("mysuru", 1.02),
            ("bhopal", 1.00),
            (DEFAULT_LOCATION_KEY, DEFAULT_LOCATION_MULTIPLIER),
        ],
    )
}
