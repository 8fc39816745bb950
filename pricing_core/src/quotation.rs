//! # Quotation
//!
//! The `Quotation` struct groups the priced lines of one customer quote.
//! Lines hold only their inputs; prices are recomputed from the catalog
//! and config every time a summary is requested.
//!
//! ## Structure
//!
//! ```text
//! Quotation
//! ├── meta: QuotationMetadata (version, salesperson, quote number, client, timestamps)
//! ├── discount_percent
//! └── lines: HashMap<Uuid, LineItem> (label + CalculationInputs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::CalculationInputs;
//! use pricing_core::catalog::Catalog;
//! use pricing_core::config::EngineConfig;
//! use pricing_core::quotation::{LineItem, Quotation};
//!
//! let mut quote = Quotation::new("Dana Sales", "Q-26-118", "Corner Pharmacy");
//! quote.add_line(LineItem::new(
//!     "Counter panel",
//!     CalculationInputs::new("flat-panel", "acrylic-clear", 3.0, 1000.0, 500.0, 0.0, 10),
//! ));
//!
//! let summary = quote.summary(Catalog::builtin(), &EngineConfig::default());
//! assert!((summary.total - 818.8).abs() < 0.05);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{compute, CalculationInputs, CalculationResult};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::errors::{PricingError, PricingResult};

/// Current schema version for serialized quotations
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One quoted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Label shown on the quote (e.g., "Counter panel")
    pub label: String,

    pub inputs: CalculationInputs,
}

impl LineItem {
    pub fn new(label: impl Into<String>, inputs: CalculationInputs) -> Self {
        LineItem {
            label: label.into(),
            inputs,
        }
    }
}

/// Root quotation container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    pub meta: QuotationMetadata,

    /// Discount on the subtotal, in percent (0-100)
    #[serde(default)]
    pub discount_percent: f64,

    /// Line items keyed by UUID
    pub lines: HashMap<Uuid, LineItem>,
}

impl Quotation {
    /// Create an empty quotation.
    ///
    /// # Arguments
    ///
    /// * `salesperson` - Who prepared the quote
    /// * `quote_number` - Quote reference (e.g., "Q-26-001")
    /// * `client` - Client name
    pub fn new(salesperson: impl Into<String>, quote_number: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Quotation {
            meta: QuotationMetadata {
                version: SCHEMA_VERSION.to_string(),
                salesperson: salesperson.into(),
                quote_number: quote_number.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            discount_percent: 0.0,
            lines: HashMap::new(),
        }
    }

    /// Add a line, returning its UUID.
    pub fn add_line(&mut self, line: LineItem) -> Uuid {
        let id = Uuid::new_v4();
        self.lines.insert(id, line);
        self.touch();
        id
    }

    /// Remove a line by UUID.
    pub fn remove_line(&mut self, id: &Uuid) -> Option<LineItem> {
        let line = self.lines.remove(id);
        if line.is_some() {
            self.touch();
        }
        line
    }

    pub fn get_line(&self, id: &Uuid) -> Option<&LineItem> {
        self.lines.get(id)
    }

    /// Mutable access to a line. Marks the quotation as modified when found.
    pub fn get_line_mut(&mut self, id: &Uuid) -> Option<&mut LineItem> {
        if self.lines.contains_key(id) {
            self.meta.modified = Utc::now();
            self.lines.get_mut(id)
        } else {
            None
        }
    }

    /// Set the discount applied to the subtotal.
    pub fn set_discount(&mut self, percent: f64) -> PricingResult<()> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(PricingError::invalid_input(
                "discount_percent",
                percent.to_string(),
                "Discount must be between 0 and 100 percent",
            ));
        }
        self.discount_percent = percent;
        self.touch();
        Ok(())
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Price every line and total the quote.
    ///
    /// Lines are listed by label so the output is stable regardless of
    /// map order.
    pub fn summary(&self, catalog: &Catalog, config: &EngineConfig) -> QuotationSummary {
        let mut lines: Vec<LineSummary> = self
            .lines
            .iter()
            .map(|(id, line)| LineSummary {
                id: *id,
                label: line.label.clone(),
                result: compute(&line.inputs, catalog, config),
            })
            .collect();
        lines.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));

        let subtotal: f64 = lines.iter().map(|l| l.result.total_price).sum();
        let discount = subtotal * self.discount_percent.clamp(0.0, 100.0) / 100.0;
        let shipped_weight_kg = lines.iter().map(|l| l.result.packaging.total_weight_kg).sum();
        let pallets = lines.iter().map(|l| l.result.packaging.pallets_needed).sum();

        QuotationSummary {
            lines,
            subtotal,
            discount,
            total: subtotal - discount,
            shipped_weight_kg,
            pallets,
        }
    }
}

impl Default for Quotation {
    fn default() -> Self {
        Quotation::new("", "", "")
    }
}

/// Quotation header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub salesperson: String,

    pub quote_number: String,

    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// A priced line in a summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSummary {
    pub id: Uuid,
    pub label: String,
    pub result: CalculationResult,
}

/// Totals for a whole quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationSummary {
    pub lines: Vec<LineSummary>,
    /// Sum of line totals
    pub subtotal: f64,
    /// Discount amount
    pub discount: f64,
    /// Subtotal after discount
    pub total: f64,
    /// Products and cartons (kg)
    pub shipped_weight_kg: f64,
    /// Pallets across all lines, each line palletized on its own
    pub pallets: u32,
}
