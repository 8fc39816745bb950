//! Additional Options
//!
//! Add-ons that can be selected on a quotation line: finishing, hardware,
//! lighting and construction variants. Most options carry a unit price;
//! "special" options change other parts of the computation instead (a lid
//! adds surface area, UV bonding raises material cost).

use serde::{Deserialize, Serialize};

/// How an option's unit price is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKind {
    /// Price × selected quantity
    PerPiece,
    /// Price × product surface
    PerSquareMeter,
    /// Price × a length (edge, LED strip or tape meters)
    PerLinearMeter,
    /// Price × selected quantity of sets
    PerSet,
    /// No direct charge; alters other computations
    Special,
}

/// Engine behaviour an option is tied to.
///
/// Options without a role are plain priced items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionRole {
    /// Adds a lid panel (w × d) to boxed families
    Lid,
    /// Container bottom in a different material/thickness
    SeparateBottom,
    /// UV bonding: +10% material cost
    UvBonding,
    /// Waterproofing: +15% LED cost on illuminated families
    Waterproofing,
    /// Edge finishing priced per meter of visible edge
    EdgeFinishing,
    /// LED strip priced per meter of strip length
    LedStrip,
    /// Power supply; waives the automatic supply surcharge
    PowerSupply,
    /// Adhesive tape priced per selected meter
    AdhesiveTape,
    /// Header topper panel on pedestal/pegboard stands
    Topper,
    /// Hooks; quantity defaults to the hook grid size
    Hooks,
}

/// Catalog entry for an additional option.
///
/// ## TOML Example
///
/// ```toml
/// [[options]]
/// id = "edge-polish"
/// name = "Diamond edge polishing"
/// price = 18.0
/// unit = "per-linear-meter"
/// role = "edge-finishing"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalOption {
    /// Catalog id referenced by quotation lines
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price (ignored for special options)
    #[serde(default)]
    pub price: f64,

    /// How the price is applied
    pub unit: UnitKind,

    /// Engine behaviour tied to this option
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<OptionRole>,
}

impl AdditionalOption {
    /// Create a plain priced option.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, unit: UnitKind) -> Self {
        AdditionalOption {
            id: id.into(),
            name: name.into(),
            price,
            unit,
            role: None,
        }
    }

    /// Create a special (no direct charge) option with a role.
    pub fn special(id: impl Into<String>, name: impl Into<String>, role: OptionRole) -> Self {
        AdditionalOption {
            id: id.into(),
            name: name.into(),
            price: 0.0,
            unit: UnitKind::Special,
            role: Some(role),
        }
    }

    /// Attach an engine role.
    pub fn with_role(mut self, role: OptionRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Check the option's role
    pub fn has_role(&self, role: OptionRole) -> bool {
        self.role == Some(role)
    }

    /// True if the option's price depends on a selected quantity
    pub fn is_counted(&self) -> bool {
        matches!(self.unit, UnitKind::PerPiece | UnitKind::PerSet)
            || (self.unit == UnitKind::PerLinearMeter
                && !matches!(self.role, Some(OptionRole::EdgeFinishing) | Some(OptionRole::LedStrip)))
    }
}
