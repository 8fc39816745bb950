//! Product Families
//!
//! Catalog entries for the top-level product categories and the geometry
//! kinds the engine dispatches on. A family carries its commercial data
//! (markup multiplier, expected waste); its [`ShapeKind`] decides which
//! surface, edge-length and packaging rules apply.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Catalog entry for a product family.
///
/// ## TOML Example
///
/// ```toml
/// [[families]]
/// id = "container"
/// name = "Container / box"
/// price_multiplier = 1.6
/// waste_fraction = 0.12
/// ```
///
/// `shape` may be given when a custom family reuses an existing geometry
/// (e.g. `id = "ballot-box"`, `shape = "container"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFamily {
    /// Catalog id referenced by quotation lines
    pub id: String,

    /// Display name
    pub name: String,

    /// Geometry kind id; defaults to `id` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,

    /// Markup applied to material + labor cost
    pub price_multiplier: f64,

    /// Expected material loss ratio (0.05 = 5%)
    pub waste_fraction: f64,
}

impl ProductFamily {
    /// Create a family whose shape kind is taken from its id.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_multiplier: f64, waste_fraction: f64) -> Self {
        ProductFamily {
            id: id.into(),
            name: name.into(),
            shape: None,
            price_multiplier,
            waste_fraction,
        }
    }

    /// Resolve the geometry kind for this family.
    ///
    /// Unknown shape ids fall back to [`ShapeKind::FlatPanel`] so a stale
    /// catalog entry still prices as a plain sheet.
    pub fn shape_kind(&self) -> ShapeKind {
        let id = self.shape.as_deref().unwrap_or(&self.id);
        ShapeKind::from_id(id).unwrap_or_else(|| {
            debug!(family = %self.id, shape = id, "unknown shape id, using flat panel formula");
            ShapeKind::FlatPanel
        })
    }
}

/// Geometry kind of a product family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    /// Single flat sheet (panels, plates, signs without illumination)
    FlatPanel,
    /// Open or lidded box, optionally with partitions
    Container,
    /// Display case (box with an optional lid)
    DisplayCase,
    /// Protective enclosure / cover
    ProtectiveEnclosure,
    /// Display stand, geometry depends on [`StandSubtype`]
    DisplayStand,
    /// Illuminated sign box (flat-rate pricing)
    SignBox,
    /// LED edge-lit sign
    LedSign,
    /// Impulse / counter display with shelves
    ImpulseDisplay,
}

impl ShapeKind {
    /// All shape kinds for UI selection
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::FlatPanel,
        ShapeKind::Container,
        ShapeKind::DisplayCase,
        ShapeKind::ProtectiveEnclosure,
        ShapeKind::DisplayStand,
        ShapeKind::SignBox,
        ShapeKind::LedSign,
        ShapeKind::ImpulseDisplay,
    ];

    /// Catalog id string (e.g. "flat-panel")
    pub fn id(&self) -> &'static str {
        match self {
            ShapeKind::FlatPanel => "flat-panel",
            ShapeKind::Container => "container",
            ShapeKind::DisplayCase => "display-case",
            ShapeKind::ProtectiveEnclosure => "protective-enclosure",
            ShapeKind::DisplayStand => "display-stand",
            ShapeKind::SignBox => "sign-box",
            ShapeKind::LedSign => "led-sign",
            ShapeKind::ImpulseDisplay => "impulse-display",
        }
    }

    /// Parse from common string representations
    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "flat-panel" | "panel" | "plate" => Some(ShapeKind::FlatPanel),
            "container" | "box" => Some(ShapeKind::Container),
            "display-case" | "case" => Some(ShapeKind::DisplayCase),
            "protective-enclosure" | "enclosure" | "cover" => Some(ShapeKind::ProtectiveEnclosure),
            "display-stand" | "stand" => Some(ShapeKind::DisplayStand),
            "sign-box" | "light-box" => Some(ShapeKind::SignBox),
            "led-sign" | "ledon" => Some(ShapeKind::LedSign),
            "impulse-display" | "counter-display" => Some(ShapeKind::ImpulseDisplay),
            _ => None,
        }
    }

    /// Sheet products shipped stacked by thickness in a single carton
    pub fn is_flat_stackable(&self) -> bool {
        matches!(self, ShapeKind::FlatPanel | ShapeKind::SignBox | ShapeKind::LedSign)
    }

    /// Families carrying a light source
    pub fn is_illuminated(&self) -> bool {
        matches!(self, ShapeKind::SignBox | ShapeKind::LedSign)
    }

    /// Families built as a box from five or six panels
    pub fn is_boxed(&self) -> bool {
        matches!(
            self,
            ShapeKind::Container | ShapeKind::DisplayCase | ShapeKind::ProtectiveEnclosure
        )
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Display stand variants, each with its own surface formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StandSubtype {
    /// Base, back, two sides, optional topper
    Pedestal,
    /// Pedestal carcass with step treads and risers
    Stepped,
    /// Base, pegboard back, two sides, optional topper
    Pegboard,
    /// Back panel with pockets, no base
    WallHung,
    /// Heavy base, frame and shelf segments
    FloorStand,
    /// Pedestal carcass with shelves and dividers
    CosmeticsOrganizer,
}

impl StandSubtype {
    /// All subtypes for UI selection
    pub const ALL: [StandSubtype; 6] = [
        StandSubtype::Pedestal,
        StandSubtype::Stepped,
        StandSubtype::Pegboard,
        StandSubtype::WallHung,
        StandSubtype::FloorStand,
        StandSubtype::CosmeticsOrganizer,
    ];

    /// Parse from common string representations
    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "pedestal" => Some(StandSubtype::Pedestal),
            "stepped" | "steps" => Some(StandSubtype::Stepped),
            "pegboard" | "hooks" => Some(StandSubtype::Pegboard),
            "wall-hung" | "wall" => Some(StandSubtype::WallHung),
            "floor-stand" | "floor" => Some(StandSubtype::FloorStand),
            "cosmetics-organizer" | "cosmetics" | "organizer" => Some(StandSubtype::CosmeticsOrganizer),
            _ => None,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StandSubtype::Pedestal => "Pedestal",
            StandSubtype::Stepped => "Stepped",
            StandSubtype::Pegboard => "Pegboard",
            StandSubtype::WallHung => "Wall-hung",
            StandSubtype::FloorStand => "Floor stand",
            StandSubtype::CosmeticsOrganizer => "Cosmetics organizer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_kind_ids_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_id(kind.id()), Some(kind));
        }
    }

    #[test]
    fn test_shape_kind_flexible_parse() {
        assert_eq!(ShapeKind::from_id("Display Case"), Some(ShapeKind::DisplayCase));
        assert_eq!(ShapeKind::from_id("led_sign"), Some(ShapeKind::LedSign));
        assert_eq!(ShapeKind::from_id("vase"), None);
    }

    #[test]
    fn test_unknown_shape_falls_back_to_flat_panel() {
        let family = ProductFamily::new("vase", "Vase", 1.5, 0.1);
        assert_eq!(family.shape_kind(), ShapeKind::FlatPanel);
    }

    #[test]
    fn test_explicit_shape_overrides_id() {
        let mut family = ProductFamily::new("ballot-box", "Ballot box", 1.6, 0.12);
        family.shape = Some("container".to_string());
        assert_eq!(family.shape_kind(), ShapeKind::Container);
    }

    #[test]
    fn test_flat_stackable() {
        assert!(ShapeKind::FlatPanel.is_flat_stackable());
        assert!(ShapeKind::SignBox.is_flat_stackable());
        assert!(ShapeKind::LedSign.is_flat_stackable());
        assert!(!ShapeKind::Container.is_flat_stackable());
        assert!(!ShapeKind::DisplayStand.is_flat_stackable());
    }

    #[test]
    fn test_subtype_parse() {
        assert_eq!(StandSubtype::from_id("wall_hung"), Some(StandSubtype::WallHung));
        assert_eq!(StandSubtype::from_id("Cosmetics Organizer"), Some(StandSubtype::CosmeticsOrganizer));
        assert_eq!(StandSubtype::from_id("spiral"), None);
    }

    #[test]
    fn test_shape_kind_serialization() {
        let json = serde_json::to_string(&ShapeKind::ProtectiveEnclosure).unwrap();
        assert_eq!(json, "\"protective-enclosure\"");
        let parsed: ShapeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ShapeKind::ProtectiveEnclosure);
    }
}
