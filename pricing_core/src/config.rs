//! # Engine Configuration
//!
//! Shop-wide constants the engine prices and packs with. Defaults are the
//! reference values; a TOML file may override any subset of them.
//!
//! ```text
//! EngineConfig
//! ├── pricing:   PricingConfig   (labor ratio, UV and LED factors)
//! ├── sign_box:  SignBoxConfig   (flat rates and fixed ratios)
//! └── packaging: PackagingConfig (carton and pallet limits)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str("[pricing]\nlabor_ratio = 0.4").unwrap();
//! assert_eq!(config.pricing.labor_ratio, 0.4);
//! assert_eq!(config.packaging.pallet_width_mm, 1200.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::SignFace;
use crate::errors::{PricingError, PricingResult};

/// Root configuration handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// General cost-composition constants
    pub pricing: PricingConfig,

    /// Illuminated sign box flat-rate constants
    pub sign_box: SignBoxConfig,

    /// Carton and pallet limits
    pub packaging: PackagingConfig,
}

impl EngineConfig {
    /// Parse a (possibly partial) configuration from TOML text.
    pub fn from_toml_str(s: &str) -> PricingResult<Self> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the packaging search meaningless.
    pub fn validate(&self) -> PricingResult<()> {
        let p = &self.packaging;
        let limits = [
            ("packaging.max_carton_width_mm", p.max_carton_width_mm),
            ("packaging.max_carton_height_mm", p.max_carton_height_mm),
            ("packaging.max_carton_depth_mm", p.max_carton_depth_mm),
            ("packaging.max_flat_carton_depth_mm", p.max_flat_carton_depth_mm),
            ("packaging.pallet_width_mm", p.pallet_width_mm),
            ("packaging.pallet_depth_mm", p.pallet_depth_mm),
            ("packaging.max_stack_height_mm", p.max_stack_height_mm),
        ];
        for (field, value) in limits {
            if !(value.is_finite() && value > 0.0) {
                return Err(PricingError::invalid_input(field, value.to_string(), "Limit must be positive"));
            }
        }
        let margins = [
            ("packaging.carton_clearance_mm", p.carton_clearance_mm),
            ("packaging.dunnage_mm", p.dunnage_mm),
        ];
        for (field, value) in margins {
            if !(value.is_finite() && value > 0.0) {
                return Err(PricingError::invalid_input(field, value.to_string(), "Clearance must be positive"));
            }
        }
        let others = [
            ("packaging.flat_stack_padding_mm", p.flat_stack_padding_mm),
            ("packaging.min_flat_carton_depth_mm", p.min_flat_carton_depth_mm),
            ("packaging.carton_panel_weight_kg_m2", p.carton_panel_weight_kg_m2),
            ("pricing.labor_ratio", self.pricing.labor_ratio),
            ("pricing.uv_bonding_factor", self.pricing.uv_bonding_factor),
            ("pricing.led_supply_surcharge", self.pricing.led_supply_surcharge),
            ("pricing.waterproof_led_factor", self.pricing.waterproof_led_factor),
            ("sign_box.acrylic_rate_per_m2", self.sign_box.acrylic_rate_per_m2),
            ("sign_box.composite_rate_per_m2", self.sign_box.composite_rate_per_m2),
            ("sign_box.acrylic_density_kg_m3", self.sign_box.acrylic_density_kg_m3),
            ("sign_box.composite_density_kg_m3", self.sign_box.composite_density_kg_m3),
            ("sign_box.material_ratio", self.sign_box.material_ratio),
            ("sign_box.waste_ratio", self.sign_box.waste_ratio),
            ("sign_box.labor_ratio", self.sign_box.labor_ratio),
        ];
        for (field, value) in others {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PricingError::invalid_input(field, value.to_string(), "Value must be finite and not negative"));
            }
        }
        if p.max_pieces_per_flat_carton == 0 {
            return Err(PricingError::invalid_input(
                "packaging.max_pieces_per_flat_carton",
                "0",
                "At least one piece must fit in a carton",
            ));
        }
        if !(self.sign_box.face_thickness_mm.is_finite() && self.sign_box.face_thickness_mm > 0.0) {
            return Err(PricingError::invalid_input(
                "sign_box.face_thickness_mm",
                self.sign_box.face_thickness_mm.to_string(),
                "Thickness must be positive",
            ));
        }
        Ok(())
    }
}

/// General cost-composition constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Labor cost as a fraction of material cost
    pub labor_ratio: f64,

    /// Material cost multiplier when UV bonding is selected
    pub uv_bonding_factor: f64,

    /// Flat surcharge when LEDs are ordered without a power supply
    pub led_supply_surcharge: f64,

    /// LED cost multiplier when waterproofing is selected
    pub waterproof_led_factor: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            labor_ratio: 0.333,
            uv_bonding_factor: 1.10,
            led_supply_surcharge: 80.0,
            waterproof_led_factor: 1.15,
        }
    }
}

/// Flat-rate constants for illuminated sign boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignBoxConfig {
    /// Price per m² of face with an acrylic face
    pub acrylic_rate_per_m2: f64,

    /// Price per m² of face with a composite face
    pub composite_rate_per_m2: f64,

    /// Acrylic face density (kg/m³)
    pub acrylic_density_kg_m3: f64,

    /// Composite face density (kg/m³)
    pub composite_density_kg_m3: f64,

    /// Face thickness assumed for weight (mm)
    pub face_thickness_mm: f64,

    /// Share of the base price reported as material cost
    pub material_ratio: f64,

    /// Waste reported as a share of material cost
    pub waste_ratio: f64,

    /// Share of the base price reported as labor cost
    pub labor_ratio: f64,
}

impl SignBoxConfig {
    /// Price per m² for a face material
    pub fn rate_for(&self, face: SignFace) -> f64 {
        match face {
            SignFace::Acrylic => self.acrylic_rate_per_m2,
            SignFace::Composite => self.composite_rate_per_m2,
        }
    }

    /// Density for a face material
    pub fn density_for(&self, face: SignFace) -> f64 {
        match face {
            SignFace::Acrylic => self.acrylic_density_kg_m3,
            SignFace::Composite => self.composite_density_kg_m3,
        }
    }
}

impl Default for SignBoxConfig {
    fn default() -> Self {
        SignBoxConfig {
            acrylic_rate_per_m2: 650.0,
            composite_rate_per_m2: 520.0,
            acrylic_density_kg_m3: 1190.0,
            composite_density_kg_m3: 1380.0,
            face_thickness_mm: 3.0,
            material_ratio: 0.40,
            waste_ratio: 0.08,
            labor_ratio: 0.20,
        }
    }
}

/// Carton and pallet limits used by the packaging optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    /// Clearance added to each item dimension for the carton (mm)
    pub carton_clearance_mm: f64,

    /// Padding added to a stack of flat items (mm)
    pub flat_stack_padding_mm: f64,

    /// Minimum carton depth for flat items (mm)
    pub min_flat_carton_depth_mm: f64,

    /// Shipping-carton depth limit for stacked flat items (mm)
    pub max_flat_carton_depth_mm: f64,

    /// Hard cap on flat items per carton
    pub max_pieces_per_flat_carton: u32,

    /// Maximum carton width for multi-piece cartons (mm)
    pub max_carton_width_mm: f64,

    /// Maximum carton height for multi-piece cartons (mm)
    pub max_carton_height_mm: f64,

    /// Maximum carton depth for multi-piece cartons (mm)
    pub max_carton_depth_mm: f64,

    /// Dunnage reserved per item per axis (mm)
    pub dunnage_mm: f64,

    /// Pallet footprint width (mm)
    pub pallet_width_mm: f64,

    /// Pallet footprint depth (mm)
    pub pallet_depth_mm: f64,

    /// Maximum loaded stack height (mm)
    pub max_stack_height_mm: f64,

    /// Cardboard weight per m² of carton surface (kg/m²)
    pub carton_panel_weight_kg_m2: f64,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        PackagingConfig {
            carton_clearance_mm: 40.0,
            flat_stack_padding_mm: 20.0,
            min_flat_carton_depth_mm: 50.0,
            max_flat_carton_depth_mm: 400.0,
            max_pieces_per_flat_carton: 50,
            max_carton_width_mm: 600.0,
            max_carton_height_mm: 400.0,
            max_carton_depth_mm: 400.0,
            dunnage_mm: 10.0,
            pallet_width_mm: 1200.0,
            pallet_depth_mm: 800.0,
            max_stack_height_mm: 1656.0,
            carton_panel_weight_kg_m2: 0.6,
        }
    }
}
