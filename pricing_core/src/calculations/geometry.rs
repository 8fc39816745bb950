//! # Shape Geometry Resolver
//!
//! Surface area of a fabricated product, in m², per product family and
//! display-stand subtype. Dimensions arrive in millimeters and are
//! converted to meters before any multiplication.
//!
//! ## Notation
//!
//! - `w` = width, `h` = height, `d` = depth (meters)
//! - `n_s` = shelf count, `n_p` = partition count, `n_k` = pocket count
//!
//! A missing dimension is zero, which degenerates the formulas that use it.
//! Nothing here fails: an unknown family has already been resolved to the
//! flat panel formula and an unknown stand subtype uses the default stand.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::geometry::{surface, Dimensions, ShapeFeatures};
//! use pricing_core::calculations::ShapeParams;
//! use pricing_core::catalog::ShapeKind;
//!
//! let dims = Dimensions::from_mm(1000.0, 500.0, 0.0);
//! let area = surface(ShapeKind::FlatPanel, None, &dims, &ShapeParams::default(), ShapeFeatures::NONE);
//! assert!((area.0 - 0.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use super::ShapeParams;
use crate::catalog::{ShapeKind, StandSubtype};
use crate::units::{Meters, Millimeters, SquareMeters};

/// Topper height as a fraction of stand height
pub const TOPPER_HEIGHT_RATIO: f64 = 0.2;

/// Riser height on a stepped stand (m)
pub const STEP_RISER_HEIGHT_M: f64 = 0.05;

/// Pocket depth on a wall-hung stand (m)
pub const POCKET_HEIGHT_M: f64 = 0.1;

/// Heavy base oversize factor on a floor stand
pub const FLOOR_BASE_FACTOR: f64 = 1.5;

/// Frame strip width on a floor stand (m)
pub const FLOOR_FRAME_WIDTH_M: f64 = 0.1;

/// Shelf segment height on a floor stand (m)
pub const FLOOR_SEGMENT_HEIGHT_M: f64 = 0.2;

/// Divider height in a cosmetics organizer (m)
pub const ORGANIZER_DIVIDER_HEIGHT_M: f64 = 0.08;

/// Divider strip height on an impulse display shelf (m)
pub const IMPULSE_DIVIDER_HEIGHT_M: f64 = 0.05;

/// Product envelope in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Meters,
    pub height: Meters,
    pub depth: Meters,
}

impl Dimensions {
    /// Convert millimeter inputs. Negative or non-finite values become zero.
    pub fn from_mm(width_mm: f64, height_mm: f64, depth_mm: f64) -> Self {
        Dimensions {
            width: Millimeters(sanitize(width_mm)).into(),
            height: Millimeters(sanitize(height_mm)).into(),
            depth: Millimeters(sanitize(depth_mm)).into(),
        }
    }

    /// (w, h, d) as raw meters
    pub fn whd(&self) -> (f64, f64, f64) {
        (self.width.0, self.height.0, self.depth.0)
    }
}

fn sanitize(mm: f64) -> f64 {
    if mm.is_finite() && mm > 0.0 {
        mm
    } else {
        0.0
    }
}

/// Option-driven geometry changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeFeatures {
    /// Lid panel (w × d) on containers and display cases
    pub lid: bool,
    /// Container bottom priced separately, excluded from the surface
    pub separate_bottom: bool,
    /// Header topper on pedestal and pegboard stands
    pub topper: bool,
}

impl ShapeFeatures {
    /// No geometry-changing options selected
    pub const NONE: ShapeFeatures = ShapeFeatures {
        lid: false,
        separate_bottom: false,
        topper: false,
    };
}

/// Surface area for a shape, dispatched on the family's geometry kind.
pub fn surface(
    shape: ShapeKind,
    subtype: Option<StandSubtype>,
    dims: &Dimensions,
    params: &ShapeParams,
    features: ShapeFeatures,
) -> SquareMeters {
    let area = match shape {
        ShapeKind::FlatPanel | ShapeKind::SignBox | ShapeKind::LedSign => face_surface(dims),
        ShapeKind::Container => container_surface(dims, params, features),
        ShapeKind::DisplayCase => display_case_surface(dims, features),
        ShapeKind::ProtectiveEnclosure => open_box_surface(dims),
        ShapeKind::DisplayStand => stand_surface(subtype, dims, params, features),
        ShapeKind::ImpulseDisplay => impulse_surface(dims, params),
    };
    SquareMeters(area.max(0.0))
}

/// Single face: w·h
///
/// Sign boxes and LED signs are priced on the face only; backing and
/// returns are covered by their cost path.
pub fn face_surface(dims: &Dimensions) -> f64 {
    (dims.width * dims.height).0
}

/// Five-panel open box: 2wh + 2dh + wd
pub fn open_box_surface(dims: &Dimensions) -> f64 {
    let (w, h, d) = dims.whd();
    2.0 * w * h + 2.0 * d * h + w * d
}

/// Container: walls, bottom (unless separate), lid, internal partitions.
///
/// ```text
/// A = 2wh + 2dh + [wd]bottom + [wd]lid + n_p·h·d
/// ```
pub fn container_surface(dims: &Dimensions, params: &ShapeParams, features: ShapeFeatures) -> f64 {
    let (w, h, d) = dims.whd();
    let walls = 2.0 * w * h + 2.0 * d * h;
    let bottom = if features.separate_bottom { 0.0 } else { w * d };
    let lid = if features.lid { w * d } else { 0.0 };
    let partitions = f64::from(params.partitions) * h * d;
    walls + bottom + lid + partitions
}

/// Display case: open box plus optional lid
pub fn display_case_surface(dims: &Dimensions, features: ShapeFeatures) -> f64 {
    let (w, _, d) = dims.whd();
    let lid = if features.lid { w * d } else { 0.0 };
    open_box_surface(dims) + lid
}

/// Base + back + two sides: wd + wh + 2dh
fn stand_carcass(w: f64, h: f64, d: f64) -> f64 {
    w * d + w * h + 2.0 * d * h
}

fn topper(w: f64, h: f64, features: ShapeFeatures) -> f64 {
    if features.topper {
        w * TOPPER_HEIGHT_RATIO * h
    } else {
        0.0
    }
}

/// Display stand surface by subtype.
///
/// ```text
/// pedestal      wd + wh + 2dh + [0.2·wh]topper
/// stepped       wd + wh + 2dh + wd(treads) + n_s·w·0.05
/// pegboard      wd + wh + 2dh + [0.2·wh]topper
/// wall-hung     wh + n_k·w·0.1
/// floor-stand   1.5wd + 2h·0.1 + n_s·w·0.2
/// cosmetics     wd + wh + 2dh + n_s·wd + n_s·n_p·d·0.08
/// default       wh + 2dh + wd
/// ```
pub fn stand_surface(
    subtype: Option<StandSubtype>,
    dims: &Dimensions,
    params: &ShapeParams,
    features: ShapeFeatures,
) -> f64 {
    let (w, h, d) = dims.whd();
    let shelves = f64::from(params.shelves);

    match subtype {
        Some(StandSubtype::Pedestal) | Some(StandSubtype::Pegboard) => {
            stand_carcass(w, h, d) + topper(w, h, features)
        }
        Some(StandSubtype::Stepped) => {
            // n_s treads of depth d/n_s each sum to one w·d
            let treads = if params.shelves > 0 { shelves * w * (d / shelves) } else { 0.0 };
            let risers = shelves * w * STEP_RISER_HEIGHT_M;
            stand_carcass(w, h, d) + treads + risers
        }
        Some(StandSubtype::WallHung) => {
            w * h + f64::from(params.pockets) * w * POCKET_HEIGHT_M
        }
        Some(StandSubtype::FloorStand) => {
            FLOOR_BASE_FACTOR * w * d
                + 2.0 * h * FLOOR_FRAME_WIDTH_M
                + shelves * w * FLOOR_SEGMENT_HEIGHT_M
        }
        Some(StandSubtype::CosmeticsOrganizer) => {
            let shelf_area = shelves * w * d;
            let dividers = shelves * f64::from(params.partitions) * d * ORGANIZER_DIVIDER_HEIGHT_M;
            stand_carcass(w, h, d) + shelf_area + dividers
        }
        None => w * h + 2.0 * d * h + w * d,
    }
}

/// Impulse display: back, two sides, shelves, divider strips.
///
/// ```text
/// A = wh + 2dh + n_s·wd + n_s·2·d·0.05
/// ```
pub fn impulse_surface(dims: &Dimensions, params: &ShapeParams) -> f64 {
    let (w, h, d) = dims.whd();
    let shelves = f64::from(params.shelves);
    w * h + 2.0 * d * h + shelves * w * d + shelves * 2.0 * d * IMPULSE_DIVIDER_HEIGHT_M
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ShapeParams {
        ShapeParams::default()
    }

    fn area(shape: ShapeKind, subtype: Option<StandSubtype>, dims: &Dimensions, p: &ShapeParams, f: ShapeFeatures) -> f64 {
        surface(shape, subtype, dims, p, f).0
    }

    #[test]
    fn test_flat_panel_surface() {
        let dims = Dimensions::from_mm(1000.0, 500.0, 0.0);
        assert!((area(ShapeKind::FlatPanel, None, &dims, &params(), ShapeFeatures::NONE) - 0.5).abs() < 1e-12);

        // Depth does not matter for a flat panel
        let deep = Dimensions::from_mm(1000.0, 500.0, 300.0);
        assert!((area(ShapeKind::FlatPanel, None, &deep, &params(), ShapeFeatures::NONE) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_container_surface() {
        // 0.4 × 0.3 × 0.2 m
        let dims = Dimensions::from_mm(400.0, 300.0, 200.0);
        // 2(0.12) + 2(0.06) + 0.08 = 0.44
        let base = area(ShapeKind::Container, None, &dims, &params(), ShapeFeatures::NONE);
        assert!((base - 0.44).abs() < 1e-12);

        let lidded = ShapeFeatures { lid: true, ..ShapeFeatures::NONE };
        assert!((area(ShapeKind::Container, None, &dims, &params(), lidded) - 0.52).abs() < 1e-12);

        let no_bottom = ShapeFeatures { separate_bottom: true, ..ShapeFeatures::NONE };
        assert!((area(ShapeKind::Container, None, &dims, &params(), no_bottom) - 0.36).abs() < 1e-12);

        let p = ShapeParams { partitions: 2, ..params() };
        // + 2 × 0.3 × 0.2 = 0.12
        assert!((area(ShapeKind::Container, None, &dims, &p, ShapeFeatures::NONE) - 0.56).abs() < 1e-12);
    }

    #[test]
    fn test_display_case_and_enclosure() {
        let dims = Dimensions::from_mm(400.0, 300.0, 200.0);
        let lidded = ShapeFeatures { lid: true, ..ShapeFeatures::NONE };
        assert!((area(ShapeKind::DisplayCase, None, &dims, &params(), ShapeFeatures::NONE) - 0.44).abs() < 1e-12);
        assert!((area(ShapeKind::DisplayCase, None, &dims, &params(), lidded) - 0.52).abs() < 1e-12);
        // Enclosures never take a lid
        assert!((area(ShapeKind::ProtectiveEnclosure, None, &dims, &params(), lidded) - 0.44).abs() < 1e-12);
    }

    #[test]
    fn test_sign_faces() {
        let dims = Dimensions::from_mm(800.0, 600.0, 120.0);
        assert!((area(ShapeKind::SignBox, None, &dims, &params(), ShapeFeatures::NONE) - 0.48).abs() < 1e-12);
        assert!((area(ShapeKind::LedSign, None, &dims, &params(), ShapeFeatures::NONE) - 0.48).abs() < 1e-12);
    }

    #[test]
    fn test_stand_subtypes() {
        // w = 0.5, h = 1.0, d = 0.4
        let dims = Dimensions::from_mm(500.0, 1000.0, 400.0);
        let carcass = 0.2 + 0.5 + 0.8;
        let with_topper = ShapeFeatures { topper: true, ..ShapeFeatures::NONE };

        let pedestal = area(ShapeKind::DisplayStand, Some(StandSubtype::Pedestal), &dims, &params(), ShapeFeatures::NONE);
        assert!((pedestal - carcass).abs() < 1e-12);
        let topped = area(ShapeKind::DisplayStand, Some(StandSubtype::Pegboard), &dims, &params(), with_topper);
        assert!((topped - (carcass + 0.1)).abs() < 1e-12);

        let p = ShapeParams { shelves: 3, partitions: 2, pockets: 4, ..params() };

        let stepped = area(ShapeKind::DisplayStand, Some(StandSubtype::Stepped), &dims, &p, ShapeFeatures::NONE);
        // treads 0.2 + risers 3 × 0.5 × 0.05
        assert!((stepped - (carcass + 0.2 + 0.075)).abs() < 1e-12);

        let wall = area(ShapeKind::DisplayStand, Some(StandSubtype::WallHung), &dims, &p, ShapeFeatures::NONE);
        assert!((wall - (0.5 + 4.0 * 0.5 * 0.1)).abs() < 1e-12);

        let floor = area(ShapeKind::DisplayStand, Some(StandSubtype::FloorStand), &dims, &p, ShapeFeatures::NONE);
        assert!((floor - (0.3 + 0.2 + 0.3)).abs() < 1e-12);

        let cosmetics = area(ShapeKind::DisplayStand, Some(StandSubtype::CosmeticsOrganizer), &dims, &p, ShapeFeatures::NONE);
        // shelves 3 × 0.2, dividers 3 × 2 × 0.4 × 0.08
        assert!((cosmetics - (carcass + 0.6 + 0.192)).abs() < 1e-12);

        let default = area(ShapeKind::DisplayStand, None, &dims, &p, ShapeFeatures::NONE);
        assert!((default - (0.5 + 0.8 + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_stepped_without_shelves_has_no_treads() {
        let dims = Dimensions::from_mm(500.0, 1000.0, 400.0);
        let stepped = area(ShapeKind::DisplayStand, Some(StandSubtype::Stepped), &dims, &params(), ShapeFeatures::NONE);
        assert!(stepped.is_finite());
        assert!((stepped - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_impulse_display() {
        let dims = Dimensions::from_mm(500.0, 1000.0, 400.0);
        let p = ShapeParams { shelves: 2, ..params() };
        // 0.5 + 0.8 + 2 × 0.2 + 2 × 2 × 0.4 × 0.05
        let a = area(ShapeKind::ImpulseDisplay, None, &dims, &p, ShapeFeatures::NONE);
        assert!((a - (0.5 + 0.8 + 0.4 + 0.08)).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_dimensions_are_zero_not_nan() {
        let dims = Dimensions::from_mm(f64::NAN, -200.0, 0.0);
        for shape in ShapeKind::ALL {
            let a = area(shape, None, &dims, &params(), ShapeFeatures::NONE);
            assert_eq!(a, 0.0, "{shape} should have zero area");
        }
    }
}
