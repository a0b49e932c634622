//! # Unit Types
//!
//! Type-safe wrappers for floor area. Callers enter area in square feet or
//! square metres; every pricing rate is per square metre, so all internal
//! math runs on [`SqM`].
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{SqFt, SqM};
//!
//! let area = SqFt(1000.0);
//! let metric: SqM = area.into();
//! assert!((metric.0 - 92.903).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Square metres per square foot
pub const SQM_PER_SQFT: f64 = 0.092903;

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqFt> for SqM {
    fn from(sqft: SqFt) -> Self {
        SqM(sqft.0 * SQM_PER_SQFT)
    }
}

impl From<SqM> for SqFt {
    fn from(sqm: SqM) -> Self {
        SqFt(sqm.0 / SQM_PER_SQFT)
    }
}

/// Unit the caller entered the area in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    /// Square feet
    #[default]
    Sqft,
    /// Square metres
    Sqm,
}

impl AreaUnit {
    /// All area units for UI selection
    pub const ALL: [AreaUnit; 2] = [AreaUnit::Sqft, AreaUnit::Sqm];

    /// Convert a raw value in this unit to square metres
    pub fn to_sqm(self, value: f64) -> SqM {
        match self {
            AreaUnit::Sqft => SqFt(value).into(),
            AreaUnit::Sqm => SqM(value),
        }
    }

    /// Area that counts as one "size unit" in timeline estimation
    /// (1000 sqft or 100 sqm)
    pub fn size_unit(self) -> f64 {
        match self {
            AreaUnit::Sqft => 1000.0,
            AreaUnit::Sqm => 100.0,
        }
    }

    /// Short label for display
    pub fn label(self) -> &'static str {
        match self {
            AreaUnit::Sqft => "sqft",
            AreaUnit::Sqm => "sqm",
        }
    }
}

impl std::fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(SqFt);
impl_arithmetic!(SqM);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqft_to_sqm() {
        let sqm: SqM = SqFt(1000.0).into();
        assert!((sqm.0 - 92.903).abs() < 1e-9);
    }

    #[test]
    fn test_sqm_to_sqft() {
        let sqft: SqFt = SqM(SQM_PER_SQFT * 250.0).into();
        assert!((sqft.0 - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(AreaUnit::Sqm.to_sqm(120.0), SqM(120.0));
        assert!((AreaUnit::Sqft.to_sqm(2000.0).0 - 185.806).abs() < 1e-9);
        assert_eq!(AreaUnit::Sqft.size_unit(), 1000.0);
        assert_eq!(AreaUnit::Sqm.size_unit(), 100.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = SqM(10.0);
        let b = SqM(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&SqM(92.5)).unwrap(), "92.5");
        assert_eq!(serde_json::to_string(&AreaUnit::Sqft).unwrap(), "\"sqft\"");
        let unit: AreaUnit = serde_json::from_str("\"sqm\"").unwrap();
        assert_eq!(unit, AreaUnit::Sqm);
    }
}
