//! # Options Cost
//!
//! Prices the additional options selected on a quotation line.
//!
//! Option charges are independent and additive, evaluated in catalog
//! order. Two rules depend on the accumulated LED total and run after the
//! main loop:
//!
//! 1. LED strips without a power-supply option add a fixed supply surcharge.
//! 2. Waterproofing on an illuminated family raises the LED-related cost
//!    (strips plus supply) by a fixed factor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::geometry::{Dimensions, ShapeFeatures, TOPPER_HEIGHT_RATIO};
use super::ShapeParams;
use crate::catalog::{AdditionalOption, Catalog, OptionRole, ShapeKind, StandSubtype, UnitKind};
use crate::config::PricingConfig;
use crate::units::{Centimeters, Meters};

/// A selected catalog option with its effective quantity.
#[derive(Debug, Clone, Copy)]
pub struct SelectedOption<'a> {
    pub option: &'a AdditionalOption,
    pub quantity: u32,
}

/// Options selected on a line, resolved against the catalog.
#[derive(Debug, Clone, Default)]
pub struct OptionSelection<'a> {
    selected: Vec<SelectedOption<'a>>,
}

impl<'a> OptionSelection<'a> {
    /// Resolve the selection maps against the catalog.
    ///
    /// Options are kept in catalog order. Ids missing from the catalog are
    /// skipped. Quantities default to 1, or to the hook grid size for hooks.
    pub fn resolve(
        catalog: &'a Catalog,
        selected: &BTreeMap<String, bool>,
        quantities: &BTreeMap<String, u32>,
        params: &ShapeParams,
    ) -> Self {
        for (id, on) in selected {
            if *on && catalog.option(id).is_none() {
                debug!(option = %id, "selected option not in catalog, ignoring");
            }
        }

        let selected = catalog
            .options
            .iter()
            .filter(|opt| selected.get(&opt.id).copied().unwrap_or(false))
            .map(|opt| {
                let default_qty = if opt.has_role(OptionRole::Hooks) {
                    params.hook_count().max(1)
                } else {
                    1
                };
                SelectedOption {
                    option: opt,
                    quantity: quantities.get(&opt.id).copied().unwrap_or(default_qty),
                }
            })
            .collect();

        OptionSelection { selected }
    }

    /// True if any selected option has the role
    pub fn has_role(&self, role: OptionRole) -> bool {
        self.selected.iter().any(|s| s.option.has_role(role))
    }

    /// Geometry-changing options
    pub fn features(&self) -> ShapeFeatures {
        ShapeFeatures {
            lid: self.has_role(OptionRole::Lid),
            separate_bottom: self.has_role(OptionRole::SeparateBottom),
            topper: self.has_role(OptionRole::Topper),
        }
    }

    /// Iterate the selected options in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &SelectedOption<'a>> {
        self.selected.iter()
    }

    /// Number of selected options
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True when nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Product context the per-unit option prices are applied to.
#[derive(Debug, Clone, Copy)]
pub struct OptionContext<'a> {
    pub shape: ShapeKind,
    pub subtype: Option<StandSubtype>,
    pub dims: &'a Dimensions,
    pub params: &'a ShapeParams,
    /// Lid/topper state, which changes the edge to be finished
    pub features: ShapeFeatures,
    /// Product surface in m² (without waste)
    pub surface_m2: f64,
}

/// Result of the options sub-routine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionsCost {
    /// Total options cost per unit, surcharges included
    pub total: f64,

    /// LED-related share of `total` (strips, supply, waterproofing)
    pub led_cost: f64,

    /// Supply surcharge applied (0 when a power supply was selected)
    pub supply_surcharge: f64,
}

/// Price the selected options for one unit.
pub fn options_cost(selection: &OptionSelection<'_>, ctx: &OptionContext<'_>, config: &PricingConfig) -> OptionsCost {
    let mut total = 0.0;
    let mut led_cost = 0.0;
    let mut any_led = false;

    for sel in selection.iter() {
        let charge = option_charge(sel, ctx);
        trace!(option = %sel.option.id, quantity = sel.quantity, charge, "option charge");
        total += charge;

        match sel.option.role {
            Some(OptionRole::LedStrip) => {
                any_led = true;
                led_cost += charge;
            }
            Some(OptionRole::PowerSupply) => led_cost += charge,
            _ => {}
        }
    }

    let mut supply_surcharge = 0.0;
    if any_led && !selection.has_role(OptionRole::PowerSupply) {
        supply_surcharge = config.led_supply_surcharge;
        total += supply_surcharge;
        led_cost += supply_surcharge;
    }

    if ctx.shape.is_illuminated() && selection.has_role(OptionRole::Waterproofing) && led_cost > 0.0 {
        let extra = led_cost * (config.waterproof_led_factor - 1.0);
        total += extra;
        led_cost += extra;
    }

    OptionsCost {
        total,
        led_cost,
        supply_surcharge,
    }
}

/// Direct charge for one selected option.
fn option_charge(sel: &SelectedOption<'_>, ctx: &OptionContext<'_>) -> f64 {
    let opt = sel.option;
    let qty = f64::from(sel.quantity);

    match opt.unit {
        UnitKind::PerSquareMeter => opt.price * ctx.surface_m2,
        UnitKind::PerLinearMeter => match opt.role {
            Some(OptionRole::EdgeFinishing) => {
                let edge = edge_length(ctx.shape, ctx.subtype, ctx.dims, ctx.params, ctx.features);
                opt.price * edge.0
            }
            Some(OptionRole::LedStrip) => {
                let strip: Meters = Centimeters(ctx.params.led_length_cm.max(0.0)).into();
                opt.price * strip.0
            }
            _ => opt.price * qty,
        },
        UnitKind::PerPiece | UnitKind::PerSet => opt.price * qty,
        UnitKind::Special => 0.0,
    }
}

/// Visible edge length to be finished, in meters.
///
/// ```text
/// flat panel / signs   2(w + h)
/// boxed families       4(w + d) + 4h  [+ 2(w + d) lid]
/// impulse display      2(w + h) + n_s·w
/// stands               see per-subtype arms below
/// ```
pub fn edge_length(
    shape: ShapeKind,
    subtype: Option<StandSubtype>,
    dims: &Dimensions,
    params: &ShapeParams,
    features: ShapeFeatures,
) -> Meters {
    let (w, h, d) = dims.whd();
    let shelves = f64::from(params.shelves);

    let length = match shape {
        ShapeKind::FlatPanel | ShapeKind::SignBox | ShapeKind::LedSign => 2.0 * (w + h),
        ShapeKind::Container | ShapeKind::DisplayCase | ShapeKind::ProtectiveEnclosure => {
            // bottom rectangle, top rim, four verticals
            let body = 4.0 * (w + d) + 4.0 * h;
            let lid = if features.lid && shape != ShapeKind::ProtectiveEnclosure {
                2.0 * (w + d)
            } else {
                0.0
            };
            body + lid
        }
        ShapeKind::ImpulseDisplay => 2.0 * (w + h) + shelves * w,
        ShapeKind::DisplayStand => {
            // base outline, two side fronts, top edge of the back
            let carcass = 2.0 * (w + d) + 2.0 * h + w;
            match subtype {
                Some(StandSubtype::Pedestal) | Some(StandSubtype::Pegboard) => {
                    let topper = if features.topper {
                        2.0 * (w + TOPPER_HEIGHT_RATIO * h)
                    } else {
                        0.0
                    };
                    carcass + topper
                }
                Some(StandSubtype::Stepped) => carcass + 2.0 * shelves * w,
                Some(StandSubtype::WallHung) => 2.0 * (w + h) + f64::from(params.pockets) * w,
                Some(StandSubtype::FloorStand) => 2.0 * (w + d) + 2.0 * h + shelves * w,
                Some(StandSubtype::CosmeticsOrganizer) => carcass + shelves * w,
                None => 2.0 * (w + h) + 2.0 * d,
            }
        }
    };

    Meters(length.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(ids: &[&str]) -> BTreeMap<String, bool> {
        ids.iter().map(|id| (id.to_string(), true)).collect()
    }

    fn ctx<'a>(shape: ShapeKind, dims: &'a Dimensions, params: &'a ShapeParams) -> OptionContext<'a> {
        OptionContext {
            shape,
            subtype: None,
            dims,
            params,
            features: ShapeFeatures::NONE,
            surface_m2: (dims.width * dims.height).0,
        }
    }

    fn price(shape: ShapeKind, ids: &[&str], quantities: &BTreeMap<String, u32>, params: &ShapeParams) -> OptionsCost {
        let catalog = Catalog::builtin();
        let dims = Dimensions::from_mm(1000.0, 500.0, 0.0);
        let selection = OptionSelection::resolve(catalog, &select(ids), quantities, params);
        options_cost(&selection, &ctx(shape, &dims, params), &PricingConfig::default())
    }

    #[test]
    fn test_no_options_cost_nothing() {
        let cost = price(ShapeKind::FlatPanel, &[], &BTreeMap::new(), &ShapeParams::default());
        assert_eq!(cost, OptionsCost::default());
    }

    #[test]
    fn test_per_piece_quantity_defaults_to_one() {
        let cost = price(ShapeKind::FlatPanel, &["engraving"], &BTreeMap::new(), &ShapeParams::default());
        assert!((cost.total - 25.0).abs() < 1e-9);

        let qty = BTreeMap::from([("engraving".to_string(), 3)]);
        let cost = price(ShapeKind::FlatPanel, &["engraving"], &qty, &ShapeParams::default());
        assert!((cost.total - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_square_meter() {
        // 120 × 0.5 m²
        let cost = price(ShapeKind::FlatPanel, &["uv-print"], &BTreeMap::new(), &ShapeParams::default());
        assert!((cost.total - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_finishing_uses_perimeter() {
        // 18 × 2(1.0 + 0.5)
        let cost = price(ShapeKind::FlatPanel, &["edge-polish"], &BTreeMap::new(), &ShapeParams::default());
        assert!((cost.total - 54.0).abs() < 1e-9);
    }

    #[test]
    fn test_adhesive_tape_uses_selected_meters() {
        let qty = BTreeMap::from([("adhesive-tape".to_string(), 4)]);
        let cost = price(ShapeKind::FlatPanel, &["adhesive-tape"], &qty, &ShapeParams::default());
        assert!((cost.total - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_led_without_supply_adds_surcharge() {
        let params = ShapeParams { led_length_cm: 250.0, ..ShapeParams::default() };
        let cost = price(ShapeKind::LedSign, &["led-strip"], &BTreeMap::new(), &params);
        // 45 × 2.5 + 80
        assert!((cost.total - 192.5).abs() < 1e-9);
        assert_eq!(cost.supply_surcharge, 80.0);
        assert!((cost.led_cost - 192.5).abs() < 1e-9);
    }

    #[test]
    fn test_led_with_supply_has_no_surcharge() {
        let params = ShapeParams { led_length_cm: 250.0, ..ShapeParams::default() };
        let cost = price(ShapeKind::LedSign, &["led-strip", "power-supply"], &BTreeMap::new(), &params);
        assert!((cost.total - 177.5).abs() < 1e-9);
        assert_eq!(cost.supply_surcharge, 0.0);
    }

    #[test]
    fn test_waterproofing_on_led_sign() {
        let params = ShapeParams { led_length_cm: 250.0, ..ShapeParams::default() };
        let cost = price(ShapeKind::LedSign, &["led-strip", "waterproofing", "engraving"], &BTreeMap::new(), &params);
        // (112.5 + 80) × 1.15 + 25
        assert!((cost.total - (192.5 * 1.15 + 25.0)).abs() < 1e-9);
        assert!((cost.led_cost - 192.5 * 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_waterproofing_ignored_off_illuminated_families() {
        let params = ShapeParams { led_length_cm: 250.0, ..ShapeParams::default() };
        let cost = price(ShapeKind::FlatPanel, &["led-strip", "waterproofing"], &BTreeMap::new(), &params);
        assert!((cost.total - 192.5).abs() < 1e-9);
    }

    #[test]
    fn test_hooks_default_to_grid_size() {
        let params = ShapeParams { hook_rows: 4, hook_cols: 5, ..ShapeParams::default() };
        let cost = price(ShapeKind::DisplayStand, &["hooks"], &BTreeMap::new(), &params);
        assert!((cost.total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_and_deselected_options_ignored() {
        let catalog = Catalog::builtin();
        let mut selected = select(&["glitter", "engraving"]);
        selected.insert("lock".to_string(), false);
        let selection = OptionSelection::resolve(catalog, &selected, &BTreeMap::new(), &ShapeParams::default());
        assert_eq!(selection.len(), 1);
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_selection_features() {
        let catalog = Catalog::builtin();
        let selection = OptionSelection::resolve(catalog, &select(&["lid", "topper"]), &BTreeMap::new(), &ShapeParams::default());
        let features = selection.features();
        assert!(features.lid);
        assert!(features.topper);
        assert!(!features.separate_bottom);
    }

    #[test]
    fn test_box_edge_length() {
        // 0.4 × 0.3 × 0.2 m: 4(0.6) + 4(0.3) = 3.6, lid + 1.2
        let dims = Dimensions::from_mm(400.0, 300.0, 200.0);
        let params = ShapeParams::default();
        let open = edge_length(ShapeKind::Container, None, &dims, &params, ShapeFeatures::NONE);
        assert!((open.0 - 3.6).abs() < 1e-12);

        let lidded = ShapeFeatures { lid: true, ..ShapeFeatures::NONE };
        let closed = edge_length(ShapeKind::DisplayCase, None, &dims, &params, lidded);
        assert!((closed.0 - 4.8).abs() < 1e-12);

        let enclosure = edge_length(ShapeKind::ProtectiveEnclosure, None, &dims, &params, lidded);
        assert!((enclosure.0 - 3.6).abs() < 1e-12);
    }

    #[test]
    fn test_stand_edge_length() {
        // w = 0.5, h = 1.0, d = 0.4
        let dims = Dimensions::from_mm(500.0, 1000.0, 400.0);
        let params = ShapeParams { shelves: 2, pockets: 3, ..ShapeParams::default() };
        let carcass = 1.8 + 2.0 + 0.5;

        let stepped = edge_length(ShapeKind::DisplayStand, Some(StandSubtype::Stepped), &dims, &params, ShapeFeatures::NONE);
        assert!((stepped.0 - (carcass + 2.0)).abs() < 1e-12);

        let wall = edge_length(ShapeKind::DisplayStand, Some(StandSubtype::WallHung), &dims, &params, ShapeFeatures::NONE);
        assert!((wall.0 - (3.0 + 1.5)).abs() < 1e-12);

        let topped = ShapeFeatures { topper: true, ..ShapeFeatures::NONE };
        let pedestal = edge_length(ShapeKind::DisplayStand, Some(StandSubtype::Pedestal), &dims, &params, topped);
        assert!((pedestal.0 - (carcass + 1.4)).abs() < 1e-12);

        let pegboard = edge_length(ShapeKind::DisplayStand, Some(StandSubtype::Pegboard), &dims, &params, ShapeFeatures::NONE);
        assert!((pegboard.0 - carcass).abs() < 1e-12);

        // 2(0.9) + 2.0 + 2 × 0.5
        let floor = edge_length(ShapeKind::DisplayStand, Some(StandSubtype::FloorStand), &dims, &params, ShapeFeatures::NONE);
        assert!((floor.0 - 4.8).abs() < 1e-12);

        let cosmetics =
            edge_length(ShapeKind::DisplayStand, Some(StandSubtype::CosmeticsOrganizer), &dims, &params, ShapeFeatures::NONE);
        assert!((cosmetics.0 - (carcass + 1.0)).abs() < 1e-12);

        // 2(1.5) + 2(0.4)
        let default = edge_length(ShapeKind::DisplayStand, None, &dims, &params, ShapeFeatures::NONE);
        assert!((default.0 - 3.8).abs() < 1e-12);
    }

    #[test]
    fn test_impulse_and_flat_edge_length() {
        let dims = Dimensions::from_mm(500.0, 1000.0, 400.0);
        let params = ShapeParams { shelves: 2, ..ShapeParams::default() };

        // 2(1.5) + 2 × 0.5
        let impulse = edge_length(ShapeKind::ImpulseDisplay, None, &dims, &params, ShapeFeatures::NONE);
        assert!((impulse.0 - 4.0).abs() < 1e-12);

        for shape in [ShapeKind::FlatPanel, ShapeKind::SignBox, ShapeKind::LedSign] {
            let edge = edge_length(shape, None, &dims, &params, ShapeFeatures::NONE);
            assert!((edge.0 - 3.0).abs() < 1e-12, "{shape}");
        }
    }
}
