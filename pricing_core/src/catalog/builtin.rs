//! Reference catalog shipped with the engine.
//!
//! Prices are in the shop's currency units. Material base prices are per
//! millimeter of thickness per square meter of sheet.

use super::{AdditionalOption, Catalog, Material, OptionRole, ProductFamily, UnitKind};

/// Acrylic (PMMA) cast sheet stock sizes
const ACRYLIC_THICKNESSES_MM: [f64; 8] = [2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 12.0];

/// Polycarbonate solid sheet stock sizes
const POLYCARBONATE_THICKNESSES_MM: [f64; 6] = [2.0, 3.0, 4.0, 5.0, 6.0, 8.0];

/// PVC foam board stock sizes
const PVC_FOAM_THICKNESSES_MM: [f64; 4] = [3.0, 5.0, 10.0, 19.0];

/// Aluminium composite panel stock sizes
const COMPOSITE_THICKNESSES_MM: [f64; 2] = [3.0, 4.0];

pub(super) fn families() -> Vec<ProductFamily> {
    vec![
        ProductFamily::new("flat-panel", "Flat panel", 1.3, 0.05),
        ProductFamily::new("container", "Container / box", 1.6, 0.12),
        ProductFamily::new("display-case", "Display case", 1.7, 0.12),
        ProductFamily::new("protective-enclosure", "Protective enclosure", 1.6, 0.10),
        ProductFamily::new("display-stand", "Display stand", 1.8, 0.15),
        // Priced on the flat-rate path; multiplier and waste are not used
        ProductFamily::new("sign-box", "Illuminated sign box", 1.0, 0.0),
        ProductFamily::new("led-sign", "LED edge-lit sign", 1.9, 0.08),
        ProductFamily::new("impulse-display", "Impulse counter display", 1.75, 0.12),
    ]
}

pub(super) fn materials() -> Vec<Material> {
    vec![
        Material::new("acrylic-clear", "Clear acrylic (PMMA)", 30.0, 1190.0)
            .with_thicknesses(&ACRYLIC_THICKNESSES_MM),
        Material::new("acrylic-color", "Colored acrylic (PMMA)", 30.0, 1190.0)
            .with_thicknesses(&ACRYLIC_THICKNESSES_MM)
            .with_color_surcharge(1.4),
        Material::new("acrylic-mirror", "Mirror acrylic", 30.0, 1190.0)
            .with_thicknesses(&[2.0, 3.0])
            .with_color_surcharge(1.8),
        Material::new("petg", "PETG", 24.0, 1270.0),
        Material::new("polycarbonate", "Polycarbonate", 38.0, 1200.0)
            .with_thicknesses(&POLYCARBONATE_THICKNESSES_MM),
        Material::new("pvc-foam", "PVC foam board", 12.0, 550.0)
            .with_thicknesses(&PVC_FOAM_THICKNESSES_MM),
        Material::new("hips", "HIPS", 14.0, 1050.0),
        Material::new("composite", "Aluminium composite panel", 22.0, 1380.0)
            .with_thicknesses(&COMPOSITE_THICKNESSES_MM),
    ]
}

pub(super) fn options() -> Vec<AdditionalOption> {
    vec![
        AdditionalOption::special("lid", "Lid", OptionRole::Lid),
        AdditionalOption::special("separate-bottom", "Bottom in different material", OptionRole::SeparateBottom),
        AdditionalOption::special("uv-bonding", "UV bonding", OptionRole::UvBonding),
        AdditionalOption::special("waterproofing", "Waterproofing", OptionRole::Waterproofing),
        AdditionalOption::special("topper", "Header topper", OptionRole::Topper),
        AdditionalOption::new("edge-polish", "Diamond edge polishing", 18.0, UnitKind::PerLinearMeter)
            .with_role(OptionRole::EdgeFinishing),
        AdditionalOption::new("led-strip", "LED strip", 45.0, UnitKind::PerLinearMeter)
            .with_role(OptionRole::LedStrip),
        AdditionalOption::new("led-strip-rgb", "RGB LED strip", 70.0, UnitKind::PerLinearMeter)
            .with_role(OptionRole::LedStrip),
        AdditionalOption::new("power-supply", "Power supply", 65.0, UnitKind::PerPiece)
            .with_role(OptionRole::PowerSupply),
        AdditionalOption::new("adhesive-tape", "Double-sided tape", 6.0, UnitKind::PerLinearMeter)
            .with_role(OptionRole::AdhesiveTape),
        AdditionalOption::new("hooks", "Pegboard hooks", 2.5, UnitKind::PerPiece)
            .with_role(OptionRole::Hooks),
        AdditionalOption::new("uv-print", "UV full-color print", 120.0, UnitKind::PerSquareMeter),
        AdditionalOption::new("protective-film", "Protective film", 8.0, UnitKind::PerSquareMeter),
        AdditionalOption::new("engraving", "Laser engraving", 25.0, UnitKind::PerPiece),
        AdditionalOption::new("lock", "Lock", 22.0, UnitKind::PerPiece),
        AdditionalOption::new("hinges", "Hinge set", 14.0, UnitKind::PerSet),
        AdditionalOption::new("wall-mount", "Wall mounting kit", 9.0, UnitKind::PerSet),
    ]
}

pub(super) fn catalog() -> Catalog {
    Catalog {
        families: families(),
        materials: materials(),
        options: options(),
    }
}
