//! # Catalogs
//!
//! Read-only reference data the engine prices against: product families,
//! sheet materials and additional options. A [`Catalog`] is built once and
//! handed to the engine by reference; the engine never mutates it.
//!
//! ## Sources
//!
//! - [`Catalog::builtin`] - the reference tables shipped with the crate
//! - [`Catalog::from_toml_str`] - a shop-specific catalog file
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let acrylic = catalog.material("acrylic-clear").unwrap();
//! assert_eq!(acrylic.density_kg_m3, 1190.0);
//! ```

mod builtin;
pub mod families;
pub mod materials;
pub mod options;

pub use families::{ProductFamily, ShapeKind, StandSubtype};
pub use materials::{Material, SignFace};
pub use options::{AdditionalOption, OptionRole, UnitKind};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{PricingError, PricingResult};

static BUILTIN: Lazy<Catalog> = Lazy::new(builtin::catalog);

/// Static catalog tables.
///
/// ## TOML Layout
///
/// ```toml
/// [[families]]
/// id = "flat-panel"
/// name = "Flat panel"
/// price_multiplier = 1.3
/// waste_fraction = 0.05
///
/// [[materials]]
/// id = "acrylic-clear"
/// name = "Clear acrylic"
/// base_price = 30.0
/// density_kg_m3 = 1190.0
///
/// [[options]]
/// id = "engraving"
/// name = "Laser engraving"
/// price = 25.0
/// unit = "per-piece"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Product families
    #[serde(default)]
    pub families: Vec<ProductFamily>,

    /// Sheet materials
    #[serde(default)]
    pub materials: Vec<Material>,

    /// Additional options, in display (and evaluation) order
    #[serde(default)]
    pub options: Vec<AdditionalOption>,
}

impl Catalog {
    /// The reference catalog shipped with the engine.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parse and check a catalog from TOML text.
    pub fn from_toml_str(s: &str) -> PricingResult<Self> {
        let catalog: Catalog = toml::from_str(s)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Look up a product family by id
    pub fn family(&self, id: &str) -> Option<&ProductFamily> {
        self.families.iter().find(|f| f.id == id)
    }

    /// Look up a material by id
    pub fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Look up an option by id
    pub fn option(&self, id: &str) -> Option<&AdditionalOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Options tied to a given engine role
    pub fn options_with_role(&self, role: OptionRole) -> impl Iterator<Item = &AdditionalOption> {
        self.options.iter().filter(move |o| o.has_role(role))
    }

    /// Check catalog consistency: unique ids and sane numeric values.
    pub fn check(&self) -> PricingResult<()> {
        check_unique("families", self.families.iter().map(|f| f.id.as_str()))?;
        check_unique("materials", self.materials.iter().map(|m| m.id.as_str()))?;
        check_unique("options", self.options.iter().map(|o| o.id.as_str()))?;

        for family in &self.families {
            if family.price_multiplier <= 0.0 {
                return Err(PricingError::catalog_error(format!(
                    "family '{}': price_multiplier must be positive",
                    family.id
                )));
            }
            if !(0.0..1.0).contains(&family.waste_fraction) {
                return Err(PricingError::catalog_error(format!(
                    "family '{}': waste_fraction must be in [0, 1)",
                    family.id
                )));
            }
        }

        for material in &self.materials {
            if material.base_price < 0.0 || material.density_kg_m3 <= 0.0 {
                return Err(PricingError::catalog_error(format!(
                    "material '{}': base_price must be non-negative and density positive",
                    material.id
                )));
            }
            if material.color_surcharge.is_some_and(|s| s <= 0.0) {
                return Err(PricingError::catalog_error(format!(
                    "material '{}': color_surcharge must be positive",
                    material.id
                )));
            }
        }

        for option in &self.options {
            if option.price < 0.0 {
                return Err(PricingError::catalog_error(format!(
                    "option '{}': price cannot be negative",
                    option.id
                )));
            }
        }

        Ok(())
    }
}

fn check_unique<'a>(table: &str, ids: impl Iterator<Item = &'a str>) -> PricingResult<()> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(PricingError::catalog_error(format!(
                "duplicate id '{}' in {}",
                id, table
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin();
        assert!(catalog.check().is_ok());
        assert_eq!(catalog.families.len(), ShapeKind::ALL.len());
    }

    #[test]
    fn test_builtin_families_cover_every_shape() {
        let catalog = Catalog::builtin();
        for kind in ShapeKind::ALL {
            let family = catalog.family(kind.id()).unwrap();
            assert_eq!(family.shape_kind(), kind);
        }
    }

    #[test]
    fn test_reference_acrylic() {
        let catalog = Catalog::builtin();
        let clear = catalog.material("acrylic-clear").unwrap();
        assert_eq!(clear.base_price, 30.0);
        assert!(!clear.is_color());

        let color = catalog.material("acrylic-color").unwrap();
        assert_eq!(color.color_surcharge, Some(1.4));

        let flat = catalog.family("flat-panel").unwrap();
        assert_eq!(flat.price_multiplier, 1.3);
        assert_eq!(flat.waste_fraction, 0.05);
    }

    #[test]
    fn test_lookup_missing() {
        let catalog = Catalog::builtin();
        assert!(catalog.family("vase").is_none());
        assert!(catalog.material("glass").is_none());
        assert!(catalog.option("glitter").is_none());
    }

    #[test]
    fn test_options_with_role() {
        let catalog = Catalog::builtin();
        let leds: Vec<_> = catalog.options_with_role(OptionRole::LedStrip).collect();
        assert_eq!(leds.len(), 2);
    }

    #[test]
    fn test_from_toml_str() {
        let toml_str = r#"
            [[families]]
            id = "flat-panel"
            name = "Flat panel"
            price_multiplier = 1.25
            waste_fraction = 0.04

            [[materials]]
            id = "petg"
            name = "PETG"
            base_price = 22.0
            density_kg_m3 = 1270.0

            [[options]]
            id = "engraving"
            name = "Engraving"
            price = 20.0
            unit = "per-piece"
        "#;
        let catalog = Catalog::from_toml_str(toml_str).unwrap();
        assert_eq!(catalog.family("flat-panel").unwrap().price_multiplier, 1.25);
        assert_eq!(catalog.material("petg").unwrap().base_price, 22.0);
        assert_eq!(catalog.option("engraving").unwrap().unit, UnitKind::PerPiece);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml_str = r#"
            [[materials]]
            id = "petg"
            name = "PETG"
            base_price = 22.0
            density_kg_m3 = 1270.0

            [[materials]]
            id = "petg"
            name = "PETG again"
            base_price = 23.0
            density_kg_m3 = 1270.0
        "#;
        let err = Catalog::from_toml_str(toml_str).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_ERROR");
    }

    #[test]
    fn test_invalid_waste_rejected() {
        let toml_str = r#"
            [[families]]
            id = "flat-panel"
            name = "Flat panel"
            price_multiplier = 1.3
            waste_fraction = 1.5
        "#;
        assert!(Catalog::from_toml_str(toml_str).is_err());
    }
}
