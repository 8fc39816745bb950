//! # Cost Composer
//!
//! Turns a priced surface into a unit price, a total price and a cost
//! breakdown.
//!
//! ## General Path
//!
//! ```text
//! A_w      = A · (1 + waste)
//! material = base_price · t · A_w · surcharge · [1.10 UV] + bottom
//! waste    = material · waste
//! labor    = material · 0.333
//! unit     = (material + labor) · multiplier + options
//! margin   = unit − material − waste − labor − options
//! total    = unit · quantity
//! ```
//!
//! `waste` is folded into `material` through `A_w` and then subtracted
//! again when deriving `margin`, so the displayed margin is one waste term
//! lower than `unit − material − labor − options`. The breakdown keeps
//! that relationship as quoted historically.
//!
//! ## Sign Box Path
//!
//! Illuminated sign boxes are priced at a flat rate per m² of face chosen
//! by face material, and their breakdown uses fixed ratios of that base.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::Dimensions;
use super::options::{options_cost, OptionContext, OptionSelection, OptionsCost};
use super::ShapeParams;
use crate::catalog::{Catalog, Material, OptionRole, ProductFamily, ShapeKind, StandSubtype};
use crate::config::EngineConfig;
use crate::units::{Millimeters, SquareMeters};

/// Per-unit cost breakdown for display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub material_cost: f64,
    pub waste_cost: f64,
    pub labor_cost: f64,
    pub options_cost: f64,
    pub margin: f64,
}

/// Everything the composer needs about one quotation line.
#[derive(Debug, Clone, Copy)]
pub struct CostRequest<'a> {
    pub family: &'a ProductFamily,
    pub shape: ShapeKind,
    pub subtype: Option<StandSubtype>,
    pub material: &'a Material,
    pub thickness_mm: f64,
    /// Product surface from the geometry resolver (m²)
    pub surface_m2: f64,
    pub quantity: u32,
    pub dims: &'a Dimensions,
    pub params: &'a ShapeParams,
    pub selection: &'a OptionSelection<'a>,
}

/// Composer output for one line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostOutcome {
    pub unit_weight_kg: f64,
    pub material_cost: f64,
    pub options: OptionsCost,
    pub unit_price: f64,
    pub total_price: f64,
    pub breakdown: CostBreakdown,
}

/// Compose the price of one line.
///
/// Returns a zero outcome when `thickness_mm <= 0`, the surface is
/// negative or `quantity == 0`.
pub fn compose(req: &CostRequest<'_>, catalog: &Catalog, config: &EngineConfig) -> CostOutcome {
    if req.thickness_mm <= 0.0 || !req.thickness_mm.is_finite() || req.surface_m2 < 0.0 || req.quantity == 0 {
        debug!(
            thickness_mm = req.thickness_mm,
            surface_m2 = req.surface_m2,
            quantity = req.quantity,
            "cost preconditions not met, pricing at zero"
        );
        return CostOutcome::default();
    }

    let ctx = OptionContext {
        shape: req.shape,
        subtype: req.subtype,
        dims: req.dims,
        params: req.params,
        features: req.selection.features(),
        surface_m2: req.surface_m2,
    };
    let options = options_cost(req.selection, &ctx, &config.pricing);

    if req.shape == ShapeKind::SignBox {
        sign_box_cost(req, options, config)
    } else {
        general_cost(req, options, catalog, config)
    }
}

fn general_cost(req: &CostRequest<'_>, options: OptionsCost, catalog: &Catalog, config: &EngineConfig) -> CostOutcome {
    let waste = req.family.waste_fraction;
    let surface_with_waste = req.surface_m2 * (1.0 + waste);

    let mut material_cost = req.material.sheet_cost(req.thickness_mm, surface_with_waste);
    if req.selection.has_role(OptionRole::UvBonding) {
        material_cost *= config.pricing.uv_bonding_factor;
    }
    if req.shape == ShapeKind::Container && req.selection.has_role(OptionRole::SeparateBottom) {
        material_cost += separate_bottom_cost(req, catalog);
    }

    let waste_cost = material_cost * waste;
    let labor_cost = material_cost * config.pricing.labor_ratio;
    let unit_price = (material_cost + labor_cost) * req.family.price_multiplier + options.total;
    let margin = unit_price - material_cost - waste_cost - labor_cost - options.total;

    let unit_weight = SquareMeters(req.surface_m2)
        .sheet_mass(Millimeters(req.thickness_mm), req.material.density_kg_m3);

    CostOutcome {
        unit_weight_kg: unit_weight.0,
        material_cost,
        options,
        unit_price,
        total_price: unit_price * f64::from(req.quantity),
        breakdown: CostBreakdown {
            material_cost,
            waste_cost,
            labor_cost,
            options_cost: options.total,
            margin,
        },
    }
}

/// Material cost of a container bottom cut from a different sheet.
///
/// Falls back to the line's material and thickness when the override is
/// missing or unknown.
fn separate_bottom_cost(req: &CostRequest<'_>, catalog: &Catalog) -> f64 {
    let material = req
        .params
        .bottom_material_id
        .as_deref()
        .and_then(|id| catalog.material(id))
        .unwrap_or(req.material);
    let thickness_mm = req
        .params
        .bottom_thickness_mm
        .filter(|t| *t > 0.0 && t.is_finite())
        .unwrap_or(req.thickness_mm);

    let bottom_area = (req.dims.width * req.dims.depth).0 * (1.0 + req.family.waste_fraction);
    material.sheet_cost(thickness_mm, bottom_area)
}

fn sign_box_cost(req: &CostRequest<'_>, options: OptionsCost, config: &EngineConfig) -> CostOutcome {
    let sign = &config.sign_box;
    let face = req.params.sign_face;

    let base_price = sign.rate_for(face) * req.surface_m2;
    let unit_price = base_price + options.total;

    let material_cost = base_price * sign.material_ratio;
    let waste_cost = material_cost * sign.waste_ratio;
    let labor_cost = base_price * sign.labor_ratio;
    let margin = unit_price - material_cost - waste_cost - labor_cost - options.total;

    let unit_weight = SquareMeters(req.surface_m2)
        .sheet_mass(Millimeters(sign.face_thickness_mm), sign.density_for(face));

    CostOutcome {
        unit_weight_kg: unit_weight.0,
        material_cost,
        options,
        unit_price,
        total_price: unit_price * f64::from(req.quantity),
        breakdown: CostBreakdown {
            material_cost,
            waste_cost,
            labor_cost,
            options_cost: options.total,
            margin,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::catalog::SignFace;

    struct Line {
        family: &'static str,
        material: &'static str,
        thickness_mm: f64,
        dims: Dimensions,
        surface_m2: f64,
        quantity: u32,
        params: ShapeParams,
        options: Vec<&'static str>,
    }

    impl Line {
        fn flat_panel() -> Self {
            Line {
                family: "flat-panel",
                material: "acrylic-clear",
                thickness_mm: 3.0,
                dims: Dimensions::from_mm(1000.0, 500.0, 0.0),
                surface_m2: 0.5,
                quantity: 10,
                params: ShapeParams::default(),
                options: Vec::new(),
            }
        }

        fn price(&self) -> CostOutcome {
            let catalog = Catalog::builtin();
            let family = catalog.family(self.family).unwrap();
            let selected: BTreeMap<String, bool> =
                self.options.iter().map(|id| (id.to_string(), true)).collect();
            let selection = OptionSelection::resolve(catalog, &selected, &BTreeMap::new(), &self.params);
            let req = CostRequest {
                family,
                shape: family.shape_kind(),
                subtype: None,
                material: catalog.material(self.material).unwrap(),
                thickness_mm: self.thickness_mm,
                surface_m2: self.surface_m2,
                quantity: self.quantity,
                dims: &self.dims,
                params: &self.params,
                selection: &selection,
            };
            compose(&req, catalog, &EngineConfig::default())
        }
    }

    #[test]
    fn test_reference_flat_panel() {
        let out = Line::flat_panel().price();
        assert!((out.material_cost - 47.25).abs() < 1e-9);
        assert!((out.breakdown.waste_cost - 2.3625).abs() < 1e-9);
        assert!((out.breakdown.labor_cost - 15.73425).abs() < 1e-9);
        assert!((out.unit_price - 81.879525).abs() < 1e-9);
        assert!((out.total_price - 818.79525).abs() < 1e-9);
        // 0.5 m² × 0.003 m × 1190 kg/m³
        assert!((out.unit_weight_kg - 1.785).abs() < 1e-9);
    }

    #[test]
    fn test_margin_subtracts_waste_twice() {
        let out = Line::flat_panel().price();
        let b = out.breakdown;
        let rebuilt = (b.material_cost + b.labor_cost) * 1.3 + b.options_cost;
        assert!((rebuilt - out.unit_price).abs() < 1e-9);

        let summed = b.material_cost + b.waste_cost + b.labor_cost + b.options_cost + b.margin;
        assert!((summed - out.unit_price).abs() < 1e-9);
        // margin is understated by exactly one waste term
        let naive_margin = out.unit_price - b.material_cost - b.labor_cost - b.options_cost;
        assert!((naive_margin - b.margin - b.waste_cost).abs() < 1e-9);
    }

    #[test]
    fn test_uv_bonding_adds_ten_percent_material() {
        let plain = Line::flat_panel().price();
        let mut line = Line::flat_panel();
        line.options = vec!["uv-bonding"];
        let bonded = line.price();
        assert!((bonded.material_cost - plain.material_cost * 1.10).abs() < 1e-9);
        assert_eq!(bonded.breakdown.options_cost, 0.0);
    }

    #[test]
    fn test_color_surcharge_scales_everything() {
        let clear = Line::flat_panel().price();
        let mut line = Line::flat_panel();
        line.material = "acrylic-color";
        let color = line.price();
        assert!((color.material_cost / clear.material_cost - 1.4).abs() < 1e-12);
        assert!((color.breakdown.labor_cost / clear.breakdown.labor_cost - 1.4).abs() < 1e-12);
        assert!((color.unit_price / clear.unit_price - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_separate_bottom_priced_with_override_material() {
        // 0.4 × 0.3 × 0.2 m container; surface without bottom = 0.36 m²
        let mut line = Line::flat_panel();
        line.family = "container";
        line.dims = Dimensions::from_mm(400.0, 300.0, 200.0);
        line.surface_m2 = 0.36;
        line.options = vec!["separate-bottom"];
        line.params.bottom_material_id = Some("pvc-foam".to_string());
        line.params.bottom_thickness_mm = Some(10.0);
        let out = line.price();

        let walls = 30.0 * 3.0 * 0.36 * 1.12;
        let bottom = 12.0 * 10.0 * 0.08 * 1.12;
        assert!((out.material_cost - (walls + bottom)).abs() < 1e-9);
    }

    #[test]
    fn test_separate_bottom_falls_back_to_line_material() {
        let mut line = Line::flat_panel();
        line.family = "container";
        line.dims = Dimensions::from_mm(400.0, 300.0, 200.0);
        line.surface_m2 = 0.36;
        line.options = vec!["separate-bottom"];
        line.params.bottom_material_id = Some("unobtainium".to_string());
        let out = line.price();

        let expected = 30.0 * 3.0 * (0.36 + 0.08) * 1.12;
        assert!((out.material_cost - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sign_box_flat_rate() {
        let mut line = Line::flat_panel();
        line.family = "sign-box";
        line.dims = Dimensions::from_mm(800.0, 600.0, 120.0);
        line.surface_m2 = 0.48;
        line.quantity = 2;
        let out = line.price();

        let base = 650.0 * 0.48;
        assert!((out.unit_price - base).abs() < 1e-9);
        assert!((out.total_price - 2.0 * base).abs() < 1e-9);
        assert!((out.breakdown.material_cost - 0.4 * base).abs() < 1e-9);
        assert!((out.breakdown.waste_cost - 0.08 * 0.4 * base).abs() < 1e-9);
        assert!((out.breakdown.labor_cost - 0.2 * base).abs() < 1e-9);
        // 3 mm acrylic face regardless of line thickness
        assert!((out.unit_weight_kg - 0.48 * 0.003 * 1190.0).abs() < 1e-9);

        line.params.sign_face = SignFace::Composite;
        let composite = line.price();
        assert!((composite.unit_price - 520.0 * 0.48).abs() < 1e-9);
        assert!((composite.unit_weight_kg - 0.48 * 0.003 * 1380.0).abs() < 1e-9);
    }

    #[test]
    fn test_sign_box_options_added_after_rate() {
        let mut line = Line::flat_panel();
        line.family = "sign-box";
        line.surface_m2 = 0.48;
        line.params.led_length_cm = 200.0;
        line.options = vec!["led-strip"];
        let out = line.price();
        // 650 × 0.48 + 45 × 2 + 80
        assert!((out.unit_price - (312.0 + 90.0 + 80.0)).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_preconditions_price_at_zero() {
        let mut line = Line::flat_panel();
        line.thickness_mm = 0.0;
        assert_eq!(line.price(), CostOutcome::default());

        let mut line = Line::flat_panel();
        line.quantity = 0;
        assert_eq!(line.price(), CostOutcome::default());

        let mut line = Line::flat_panel();
        line.surface_m2 = -1.0;
        assert_eq!(line.price(), CostOutcome::default());
    }

    #[test]
    fn test_unit_price_independent_of_quantity() {
        let mut line = Line::flat_panel();
        line.options = vec!["engraving", "edge-polish"];
        let ten = line.price();
        line.quantity = 37;
        let many = line.price();
        assert_eq!(ten.unit_price, many.unit_price);
        assert!((many.total_price - many.unit_price * 37.0).abs() < 1e-9);
    }
}
