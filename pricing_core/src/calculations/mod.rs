//! # Pricing Calculations
//!
//! The quotation pricing engine. A line item is priced by three layered
//! pure computations:
//!
//! ```text
//! CalculationInputs ─┬─> geometry::surface ──> cost::compose ──┐
//!                    └─> packaging::pack ───────────────────────┴─> CalculationResult
//! ```
//!
//! - [`geometry`] - surface area per product family and stand subtype
//! - [`cost`] - material, labor, options, margin and unit price
//! - [`options`] - the per-option pricing sub-routine and edge lengths
//! - [`packaging`] - carton sizing and pallet arrangement
//!
//! [`compute`] never fails: invalid selections price to zero so a form can
//! re-run it on every keystroke. [`calculate`] is the strict form that
//! validates first and reports what is wrong.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::{compute, CalculationInputs};
//! use pricing_core::catalog::Catalog;
//! use pricing_core::config::EngineConfig;
//!
//! let inputs = CalculationInputs::new("flat-panel", "acrylic-clear", 3.0, 1000.0, 500.0, 0.0, 10);
//! let result = compute(&inputs, Catalog::builtin(), &EngineConfig::default());
//!
//! assert!((result.surface_m2 - 0.5).abs() < 1e-12);
//! assert!((result.unit_price - 81.88).abs() < 0.01);
//! assert_eq!(result.packaging.pallets_needed, 1);
//! ```

pub mod cost;
pub mod geometry;
pub mod options;
pub mod packaging;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, OptionRole, ShapeKind, SignFace, StandSubtype};
use crate::config::EngineConfig;
use crate::errors::{PricingError, PricingResult};

pub use cost::{CostBreakdown, CostOutcome, CostRequest};
pub use geometry::{Dimensions, ShapeFeatures};
pub use options::{OptionSelection, OptionsCost};
pub use packaging::{PackagingResult, PackingItem};

/// Shape-specific counts and choices for one line.
///
/// Only the fields relevant to the selected family are read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    /// Shelf count (stands, impulse displays)
    pub shelves: u32,

    /// Internal partitions (containers) or dividers per shelf (organizers)
    pub partitions: u32,

    /// LED strip length in cm
    pub led_length_cm: f64,

    /// Hook grid rows (pegboard stands)
    pub hook_rows: u32,

    /// Hook grid columns (pegboard stands)
    pub hook_cols: u32,

    /// Pocket count (wall-hung stands)
    pub pockets: u32,

    /// Face material (illuminated sign boxes)
    pub sign_face: SignFace,

    /// Bottom panel material when a container bottom is a different material
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_material_id: Option<String>,

    /// Bottom panel thickness in mm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_thickness_mm: Option<f64>,
}

impl ShapeParams {
    /// Hooks in the pegboard grid
    pub fn hook_count(&self) -> u32 {
        self.hook_rows.saturating_mul(self.hook_cols)
    }
}

/// Input for pricing one quotation line.
///
/// ## JSON Example
///
/// ```json
/// {
///   "family_id": "display-stand",
///   "subtype": "stepped",
///   "material_id": "acrylic-clear",
///   "thickness_mm": 5.0,
///   "width_mm": 600.0,
///   "height_mm": 400.0,
///   "depth_mm": 300.0,
///   "quantity": 25,
///   "selected_options": { "edge-polish": true, "uv-bonding": true },
///   "option_quantities": {},
///   "shape_params": { "shelves": 3 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationInputs {
    /// Product family id
    pub family_id: String,

    /// Display stand subtype id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    /// Material id
    pub material_id: String,

    /// Sheet thickness in mm
    pub thickness_mm: f64,

    /// Width in mm
    pub width_mm: f64,

    /// Height in mm
    pub height_mm: f64,

    /// Depth in mm (zero for flat products)
    #[serde(default)]
    pub depth_mm: f64,

    /// Pieces ordered
    pub quantity: u32,

    /// Option id -> selected
    #[serde(default)]
    pub selected_options: BTreeMap<String, bool>,

    /// Option id -> quantity, for options priced per piece/set/meter
    #[serde(default)]
    pub option_quantities: BTreeMap<String, u32>,

    /// Shape-specific counts
    #[serde(default)]
    pub shape_params: ShapeParams,
}

impl CalculationInputs {
    /// Create inputs without options or shape parameters.
    pub fn new(
        family_id: impl Into<String>,
        material_id: impl Into<String>,
        thickness_mm: f64,
        width_mm: f64,
        height_mm: f64,
        depth_mm: f64,
        quantity: u32,
    ) -> Self {
        CalculationInputs {
            family_id: family_id.into(),
            subtype: None,
            material_id: material_id.into(),
            thickness_mm,
            width_mm,
            height_mm,
            depth_mm,
            quantity,
            selected_options: BTreeMap::new(),
            option_quantities: BTreeMap::new(),
            shape_params: ShapeParams::default(),
        }
    }

    /// Set the display stand subtype
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Select an option
    pub fn with_option(mut self, option_id: impl Into<String>) -> Self {
        self.selected_options.insert(option_id.into(), true);
        self
    }

    /// Select an option with an explicit quantity
    pub fn with_option_quantity(mut self, option_id: impl Into<String>, quantity: u32) -> Self {
        let id = option_id.into();
        self.selected_options.insert(id.clone(), true);
        self.option_quantities.insert(id, quantity);
        self
    }

    /// Replace the shape parameters
    pub fn with_params(mut self, params: ShapeParams) -> Self {
        self.shape_params = params;
        self
    }

    /// Parsed stand subtype; unknown ids read as no subtype.
    pub fn stand_subtype(&self) -> Option<StandSubtype> {
        let id = self.subtype.as_deref()?;
        let parsed = StandSubtype::from_id(id);
        if parsed.is_none() {
            debug!(subtype = id, "unknown stand subtype, using default stand formula");
        }
        parsed
    }

    /// Dimensions converted to meters
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::from_mm(self.width_mm, self.height_mm, self.depth_mm)
    }

    /// Check the inputs against the catalog.
    ///
    /// Reports the first problem a form layer should surface. [`compute`]
    /// does not need this to succeed.
    pub fn validate(&self, catalog: &Catalog) -> PricingResult<()> {
        if self.family_id.trim().is_empty() {
            return Err(PricingError::missing_field("family_id"));
        }
        if self.material_id.trim().is_empty() {
            return Err(PricingError::missing_field("material_id"));
        }
        let family = catalog
            .family(&self.family_id)
            .ok_or_else(|| PricingError::family_not_found(&self.family_id))?;
        let material = catalog
            .material(&self.material_id)
            .ok_or_else(|| PricingError::material_not_found(&self.material_id))?;
        let shape = family.shape_kind();

        if shape == ShapeKind::SignBox {
            if self.thickness_mm <= 0.0 {
                return Err(PricingError::invalid_input(
                    "thickness_mm",
                    self.thickness_mm.to_string(),
                    "Thickness must be positive",
                ));
            }
        } else {
            material.check_thickness(self.thickness_mm)?;
        }

        check_positive("width_mm", self.width_mm)?;
        check_positive("height_mm", self.height_mm)?;
        if needs_depth(shape) {
            check_positive("depth_mm", self.depth_mm)?;
        } else if self.depth_mm < 0.0 {
            return Err(PricingError::invalid_input(
                "depth_mm",
                self.depth_mm.to_string(),
                "Depth cannot be negative",
            ));
        }

        if self.quantity == 0 {
            return Err(PricingError::invalid_input("quantity", "0", "Quantity must be at least 1"));
        }

        if let Some(id) = &self.subtype {
            if shape != ShapeKind::DisplayStand {
                return Err(PricingError::invalid_input(
                    "subtype",
                    id.clone(),
                    format!("Subtypes only apply to display stands, not {}", family.name),
                ));
            }
            if StandSubtype::from_id(id).is_none() {
                return Err(PricingError::invalid_input("subtype", id.clone(), "Unknown display stand subtype"));
            }
        }

        for (id, _) in self.selected_options.iter().filter(|(_, on)| **on) {
            if catalog.option(id).is_none() {
                return Err(PricingError::option_not_found(id));
            }
        }
        for id in self.option_quantities.keys() {
            if catalog.option(id).is_none() {
                return Err(PricingError::option_not_found(id));
            }
        }

        let separate_bottom = catalog
            .options_with_role(OptionRole::SeparateBottom)
            .any(|opt| self.selected_options.get(&opt.id).copied().unwrap_or(false));
        if separate_bottom {
            if let Some(id) = &self.shape_params.bottom_material_id {
                let bottom = catalog
                    .material(id)
                    .ok_or_else(|| PricingError::material_not_found(id))?;
                if let Some(t) = self.shape_params.bottom_thickness_mm {
                    bottom.check_thickness(t).map_err(|_| {
                        PricingError::invalid_input(
                            "shape_params.bottom_thickness_mm",
                            t.to_string(),
                            format!("{} is not stocked at this thickness", bottom.name),
                        )
                    })?;
                }
            }
        }

        Ok(())
    }

    /// True when the line can be packed (positive size, thickness and quantity)
    fn is_packable(&self) -> bool {
        self.width_mm > 0.0 && self.height_mm > 0.0 && self.thickness_mm > 0.0 && self.quantity >= 1
    }
}

fn needs_depth(shape: ShapeKind) -> bool {
    shape.is_boxed() || matches!(shape, ShapeKind::DisplayStand | ShapeKind::ImpulseDisplay)
}

fn check_positive(field: &str, value: f64) -> PricingResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid_input(field, value.to_string(), "Dimension must be positive"))
    }
}

/// Priced line item.
///
/// ## JSON Example
///
/// ```json
/// {
///   "surface_m2": 0.5,
///   "unit_weight_kg": 1.785,
///   "material_cost": 47.25,
///   "options_cost": 0.0,
///   "unit_price": 81.879525,
///   "total_price": 818.79525,
///   "breakdown": {
///     "material_cost": 47.25,
///     "waste_cost": 2.3625,
///     "labor_cost": 15.73425,
///     "options_cost": 0.0,
///     "margin": 16.532775
///   },
///   "packaging": { "pieces_per_box": 50, "boxes_needed": 1, "pallets_needed": 1, "...": "..." }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Product surface (m²)
    pub surface_m2: f64,

    /// Weight of one piece (kg)
    pub unit_weight_kg: f64,

    /// Material cost per piece, waste and bonding included
    pub material_cost: f64,

    /// Options cost per piece
    pub options_cost: f64,

    /// Price per piece
    pub unit_price: f64,

    /// Price for the whole line
    pub total_price: f64,

    /// Per-piece breakdown for display
    pub breakdown: CostBreakdown,

    /// Cartons and pallets for the whole line
    pub packaging: PackagingResult,
}

/// Price one quotation line.
///
/// Pure and infallible: the same inputs, catalog and config always give
/// the same result. An unknown family or material yields an all-zero
/// result without packaging.
///
/// Packing always stacks by the line's `thickness_mm`, the stocked sheet
/// the piece ships as. Sign boxes are the one family whose weight uses a
/// different thickness (the configured face thickness).
pub fn compute(inputs: &CalculationInputs, catalog: &Catalog, config: &EngineConfig) -> CalculationResult {
    let Some(family) = catalog.family(&inputs.family_id) else {
        debug!(family = %inputs.family_id, "unknown family, pricing at zero");
        return CalculationResult::default();
    };
    let Some(material) = catalog.material(&inputs.material_id) else {
        debug!(material = %inputs.material_id, "unknown material, pricing at zero");
        return CalculationResult::default();
    };

    let shape = family.shape_kind();
    let subtype = if shape == ShapeKind::DisplayStand {
        inputs.stand_subtype()
    } else {
        None
    };
    let dims = inputs.dimensions();
    let params = &inputs.shape_params;
    let selection = OptionSelection::resolve(catalog, &inputs.selected_options, &inputs.option_quantities, params);

    let surface = geometry::surface(shape, subtype, &dims, params, selection.features());

    let request = CostRequest {
        family,
        shape,
        subtype,
        material,
        thickness_mm: inputs.thickness_mm,
        surface_m2: surface.0,
        quantity: inputs.quantity,
        dims: &dims,
        params,
        selection: &selection,
    };
    let priced = cost::compose(&request, catalog, config);

    let packaging = if inputs.is_packable() {
        let item = PackingItem {
            shape,
            width_mm: inputs.width_mm,
            height_mm: inputs.height_mm,
            depth_mm: inputs.depth_mm,
            thickness_mm: inputs.thickness_mm,
            quantity: inputs.quantity,
            unit_weight_kg: priced.unit_weight_kg,
        };
        packaging::pack(&item, &config.packaging)
    } else {
        PackagingResult::default()
    };

    CalculationResult {
        surface_m2: surface.0,
        unit_weight_kg: priced.unit_weight_kg,
        material_cost: priced.material_cost,
        options_cost: priced.options.total,
        unit_price: priced.unit_price,
        total_price: priced.total_price,
        breakdown: priced.breakdown,
        packaging,
    }
}

/// Validate, then price one quotation line.
///
/// # Returns
///
/// * `Ok(CalculationResult)` - the priced line
/// * `Err(PricingError)` - the first input problem found
pub fn calculate(inputs: &CalculationInputs, catalog: &Catalog, config: &EngineConfig) -> PricingResult<CalculationResult> {
    inputs.validate(catalog)?;
    Ok(compute(inputs, catalog, config))
}
