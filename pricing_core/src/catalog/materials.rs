//! Sheet Materials
//!
//! Plastic sheet stock priced per millimeter of thickness per square meter.
//! Some materials are only sold in discrete thicknesses; color stock
//! carries a surcharge multiplier over the clear grade.

use serde::{Deserialize, Serialize};

use crate::errors::{PricingError, PricingResult};

/// Catalog entry for a sheet material.
///
/// ## TOML Example
///
/// ```toml
/// [[materials]]
/// id = "acrylic-color"
/// name = "Colored acrylic (PMMA)"
/// base_price = 30.0
/// density_kg_m3 = 1190.0
/// thicknesses_mm = [3.0, 5.0, 8.0]
/// color_surcharge = 1.4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog id referenced by quotation lines
    pub id: String,

    /// Display name
    pub name: String,

    /// Price per (mm of thickness · m² of sheet)
    pub base_price: f64,

    /// Density in kg/m³
    pub density_kg_m3: f64,

    /// Stock thicknesses in mm; `None` means any thickness can be ordered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thicknesses_mm: Option<Vec<f64>>,

    /// Multiplier for color stock; `None` for clear/natural grades
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_surcharge: Option<f64>,
}

/// Tolerance when matching a requested thickness against stock sizes
const THICKNESS_TOLERANCE_MM: f64 = 1e-6;

impl Material {
    /// Create a material sold in any thickness, without color surcharge.
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: f64, density_kg_m3: f64) -> Self {
        Material {
            id: id.into(),
            name: name.into(),
            base_price,
            density_kg_m3,
            thicknesses_mm: None,
            color_surcharge: None,
        }
    }

    /// Restrict the material to discrete stock thicknesses.
    pub fn with_thicknesses(mut self, thicknesses_mm: &[f64]) -> Self {
        self.thicknesses_mm = Some(thicknesses_mm.to_vec());
        self
    }

    /// Mark the material as color stock with the given surcharge.
    pub fn with_color_surcharge(mut self, surcharge: f64) -> Self {
        self.color_surcharge = Some(surcharge);
        self
    }

    /// True for color stock
    pub fn is_color(&self) -> bool {
        self.color_surcharge.is_some()
    }

    /// Surcharge multiplier applied to material cost (1.0 for clear stock)
    pub fn surcharge_factor(&self) -> f64 {
        self.color_surcharge.unwrap_or(1.0)
    }

    /// Raw material cost for a sheet area at a thickness.
    ///
    /// cost = base_price × thickness_mm × area_m² × surcharge
    pub fn sheet_cost(&self, thickness_mm: f64, area_m2: f64) -> f64 {
        self.base_price * thickness_mm * area_m2 * self.surcharge_factor()
    }

    /// Check whether the material can be supplied at `thickness_mm`.
    pub fn supports_thickness(&self, thickness_mm: f64) -> bool {
        match &self.thicknesses_mm {
            Some(list) => list
                .iter()
                .any(|t| (t - thickness_mm).abs() < THICKNESS_TOLERANCE_MM),
            None => thickness_mm > 0.0,
        }
    }

    /// Closest stock thickness to the request (the request itself when the
    /// material has no stock list).
    pub fn nearest_thickness(&self, thickness_mm: f64) -> f64 {
        match &self.thicknesses_mm {
            Some(list) if !list.is_empty() => list
                .iter()
                .copied()
                .min_by(|a, b| (a - thickness_mm).abs().total_cmp(&(b - thickness_mm).abs()))
                .unwrap_or(thickness_mm),
            _ => thickness_mm,
        }
    }

    /// Validate a requested thickness for this material.
    pub fn check_thickness(&self, thickness_mm: f64) -> PricingResult<()> {
        if thickness_mm <= 0.0 || !thickness_mm.is_finite() {
            return Err(PricingError::invalid_input(
                "thickness_mm",
                thickness_mm.to_string(),
                "Thickness must be positive",
            ));
        }
        if !self.supports_thickness(thickness_mm) {
            return Err(PricingError::invalid_input(
                "thickness_mm",
                thickness_mm.to_string(),
                format!(
                    "{} is not stocked at this thickness (nearest: {} mm)",
                    self.name,
                    self.nearest_thickness(thickness_mm)
                ),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Face material of an illuminated sign box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignFace {
    /// Translucent acrylic face
    #[default]
    Acrylic,
    /// Aluminium composite face with cut-out lettering
    Composite,
}

impl SignFace {
    /// All face materials for UI selection
    pub const ALL: [SignFace; 2] = [SignFace::Acrylic, SignFace::Composite];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SignFace::Acrylic => "Acrylic face",
            SignFace::Composite => "Composite face",
        }
    }
}
