//! # Unit Types
//!
//! Type-safe wrappers for the units the pricing engine moves between.
//! Product dimensions arrive from the quotation form in millimeters, the
//! area and edge-length formulas work in meters, and prices are quoted per
//! square meter or per linear meter.
//!
//! ## Units in Use
//!
//! - Length: millimeters (mm) on input, meters (m) inside formulas,
//!   centimeters (cm) for LED strip length
//! - Area: square meters (m²)
//! - Mass: kilograms (kg)
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::units::{Millimeters, Meters};
//!
//! let width = Millimeters(1200.0);
//! let width_m: Meters = width.into();
//! assert_eq!(width_m.0, 1.2);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl Mul<Meters> for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl SquareMeters {
    /// Mass of a sheet of this area at the given thickness and density
    ///
    /// kg = m² × (mm / 1000) × kg/m³
    pub fn sheet_mass(self, thickness: Millimeters, density_kg_m3: f64) -> Kilograms {
        let thickness_m: Meters = thickness.into();
        Kilograms(self.0 * thickness_m.0 * density_kg_m3)
    }
}

// ============================================================================
// Same-unit sums and scaling by a plain factor
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

    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(Kilograms);
