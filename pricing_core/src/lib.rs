//! # pricing_core - Quotation Pricing Engine
//!
//! `pricing_core` prices custom plastic fabrication work: flat panels,
//! containers, display cases, stands, sign boxes and counter displays.
//! Given a product family, material, dimensions, quantity and options it
//! returns the surface area, weight, cost breakdown, unit and total price,
//! and a carton/pallet plan. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: [`calculations::compute`] is a pure function of its inputs
//! - **Data-driven**: families, materials and options come from a [`catalog::Catalog`]
//! - **Tunable**: pricing constants live in [`config::EngineConfig`], loadable from TOML
//! - **Rich Errors**: strict validation reports structured [`PricingError`]s
//!
//! ## Quick Start
//!
//! ```rust
//! use pricing_core::{calculate, CalculationInputs, Catalog, EngineConfig};
//!
//! let inputs = CalculationInputs::new("flat-panel", "acrylic-clear", 3.0, 1000.0, 500.0, 0.0, 10)
//!     .with_option("edge-polish");
//! let result = calculate(&inputs, Catalog::builtin(), &EngineConfig::default()).unwrap();
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("unit_price"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - geometry, cost composition, options and packaging
//! - [`catalog`] - product families, materials and additional options
//! - [`config`] - pricing, sign box and packaging constants
//! - [`quotation`] - multi-line quotation container
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types

pub mod calculations;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod quotation;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, compute, CalculationInputs, CalculationResult, ShapeParams};
pub use catalog::Catalog;
pub use config::EngineConfig;
pub use errors::{PricingError, PricingResult};
pub use quotation::{LineItem, Quotation, QuotationSummary};
