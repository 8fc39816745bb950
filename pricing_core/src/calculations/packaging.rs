//! # Packaging Optimizer
//!
//! Sizes the shipping carton for a line, counts how many cartons the order
//! needs and finds the pallet arrangement that carries the most cartons.
//!
//! ## Assumptions
//!
//! - Flat products (panels, sign boxes, LED signs) ship stacked by
//!   thickness, standing on edge in one carton.
//! - Other products get a carton sized around one piece; how many pieces a
//!   multi-piece carton holds is the best of the six axis permutations
//!   against the maximum carton size.
//! - Cartons are tiled on the pallet in a single orientation. Only the
//!   footprint is rotated; carton height always stays vertical.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::packaging::{pack, PackingItem};
//! use pricing_core::catalog::ShapeKind;
//! use pricing_core::config::PackagingConfig;
//!
//! let item = PackingItem {
//!     shape: ShapeKind::FlatPanel,
//!     width_mm: 1000.0,
//!     height_mm: 500.0,
//!     depth_mm: 0.0,
//!     thickness_mm: 3.0,
//!     quantity: 10,
//!     unit_weight_kg: 1.785,
//! };
//! let result = pack(&item, &PackagingConfig::default());
//! assert_eq!(result.boxes_per_layer, 16);
//! assert_eq!(result.layers_per_pallet, 3);
//! assert_eq!(result.pallets_needed, 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ShapeKind;
use crate::config::PackagingConfig;

/// Shipping counts and carton data for one line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PackagingResult {
    /// Carton width (mm)
    pub box_width_mm: f64,
    /// Carton height (mm), always the vertical axis on the pallet
    pub box_height_mm: f64,
    /// Carton depth (mm)
    pub box_depth_mm: f64,
    /// Carton board surface (m²)
    pub box_surface_m2: f64,
    /// Empty carton weight (kg)
    pub box_weight_kg: f64,
    pub pieces_per_box: u32,
    pub boxes_needed: u32,
    pub pallets_needed: u32,
    pub layers_per_pallet: u32,
    pub boxes_per_layer: u32,
    /// Product plus carton weight for the whole line (kg)
    pub total_weight_kg: f64,
}

impl PackagingResult {
    /// Cartons on one full pallet
    pub fn boxes_per_pallet(&self) -> u32 {
        self.boxes_per_layer.saturating_mul(self.layers_per_pallet)
    }

    /// Pieces on one full pallet
    pub fn pieces_per_pallet(&self) -> u32 {
        self.boxes_per_pallet().saturating_mul(self.pieces_per_box)
    }
}

/// Physical description of the item to pack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackingItem {
    pub shape: ShapeKind,
    pub width_mm: f64,
    pub height_mm: f64,
    pub depth_mm: f64,
    pub thickness_mm: f64,
    pub quantity: u32,
    pub unit_weight_kg: f64,
}

/// Carton size in mm (width, height, depth).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Carton {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Carton {
    /// Board surface 2(wh + wd + hd), in m²
    pub fn surface_m2(&self) -> f64 {
        2.0 * (self.width * self.height + self.width * self.depth + self.height * self.depth) / 1_000_000.0
    }
}

/// Chosen pallet tiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalletArrangement {
    pub boxes_per_layer: u32,
    pub layers: u32,
    /// True when the carton footprint was turned 90°
    pub rotated: bool,
}

impl PalletArrangement {
    /// Cartons per pallet
    pub fn capacity(&self) -> u32 {
        self.boxes_per_layer.saturating_mul(self.layers)
    }
}

/// Pack one line.
///
/// The caller only invokes this for a valid selection (positive width,
/// height and thickness, quantity ≥ 1); every count it returns is then at
/// least 1.
pub fn pack(item: &PackingItem, config: &PackagingConfig) -> PackagingResult {
    let carton = carton_for(item, config);
    let pieces_per_box = pieces_per_carton(item, config);
    let boxes_needed = item.quantity.max(1).div_ceil(pieces_per_box);

    let arrangement = arrange_on_pallet(&carton, config);
    let pallets_needed = boxes_needed.div_ceil(arrangement.capacity());

    let box_surface_m2 = carton.surface_m2();
    let box_weight_kg = box_surface_m2 * config.carton_panel_weight_kg_m2;
    let total_weight_kg =
        item.unit_weight_kg * f64::from(item.quantity) + box_weight_kg * f64::from(boxes_needed);

    PackagingResult {
        box_width_mm: carton.width,
        box_height_mm: carton.height,
        box_depth_mm: carton.depth,
        box_surface_m2,
        box_weight_kg,
        pieces_per_box,
        boxes_needed,
        pallets_needed,
        layers_per_pallet: arrangement.layers,
        boxes_per_layer: arrangement.boxes_per_layer,
        total_weight_kg,
    }
}

/// Carton dimensions for the item.
///
/// Flat products: `(w + 40, h + 40, max(t·q + 20, 50))`.
/// Others: `(w + 40, h + 40, d + 40)`.
pub fn carton_for(item: &PackingItem, config: &PackagingConfig) -> Carton {
    let clearance = config.carton_clearance_mm;
    let depth = if item.shape.is_flat_stackable() {
        let stack = item.thickness_mm * f64::from(item.quantity) + config.flat_stack_padding_mm;
        stack.max(config.min_flat_carton_depth_mm)
    } else {
        item.depth_mm.max(0.0) + clearance
    };

    Carton {
        width: item.width_mm.max(0.0) + clearance,
        height: item.height_mm.max(0.0) + clearance,
        depth,
    }
}

/// Pieces that fit in one carton, never less than 1.
pub fn pieces_per_carton(item: &PackingItem, config: &PackagingConfig) -> u32 {
    let pieces = if item.shape.is_flat_stackable() {
        if item.thickness_mm > 0.0 {
            let usable = config.max_flat_carton_depth_mm - config.flat_stack_padding_mm;
            fit_count(usable, item.thickness_mm).min(config.max_pieces_per_flat_carton)
        } else {
            0
        }
    } else {
        best_permutation_fit(item, config)
    };
    pieces.max(1)
}

/// The six axis orders of (w, h, d)
const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

fn best_permutation_fit(item: &PackingItem, config: &PackagingConfig) -> u32 {
    let dims = [item.width_mm, item.height_mm, item.depth_mm];
    let limits = [
        config.max_carton_width_mm,
        config.max_carton_height_mm,
        config.max_carton_depth_mm,
    ];
    let pad = config.dunnage_mm;

    PERMUTATIONS
        .iter()
        .map(|order| {
            order
                .iter()
                .zip(limits.iter())
                .map(|(&axis, &limit)| fit_count(limit, dims[axis].max(0.0) + pad))
                .fold(1u32, u32::saturating_mul)
        })
        .max()
        .unwrap_or(0)
}

/// floor(space / size), zero for a non-positive size
fn fit_count(space: f64, size: f64) -> u32 {
    if size > 0.0 && space > 0.0 {
        // `as` saturates; counts are bounded by the limits
        (space / size).floor() as u32
    } else {
        0
    }
}

/// Pick the footprint orientation carrying the most cartons.
///
/// Orientations that carry nothing are disqualified. When none carries
/// anything the carton ships alone: one per layer, one layer.
pub fn arrange_on_pallet(carton: &Carton, config: &PackagingConfig) -> PalletArrangement {
    let layers = fit_count(config.max_stack_height_mm, carton.height);

    let candidates = [(carton.width, carton.depth, false), (carton.depth, carton.width, true)];
    let mut best: Option<PalletArrangement> = None;

    for (footprint_w, footprint_d, rotated) in candidates {
        let per_layer =
            fit_count(config.pallet_width_mm, footprint_w).saturating_mul(fit_count(config.pallet_depth_mm, footprint_d));
        let candidate = PalletArrangement {
            boxes_per_layer: per_layer,
            layers,
            rotated,
        };
        if candidate.capacity() == 0 {
            continue;
        }
        if best.map_or(true, |b| candidate.capacity() > b.capacity()) {
            best = Some(candidate);
        }
    }

    best.unwrap_or_else(|| {
        debug!(
            width = carton.width,
            height = carton.height,
            depth = carton.depth,
            "carton does not fit the pallet, shipping one per pallet"
        );
        PalletArrangement {
            boxes_per_layer: 1,
            layers: 1,
            rotated: false,
        }
    })
}
