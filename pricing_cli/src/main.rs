//! # Fabquote CLI Application
//!
//! Prices a quotation line from the terminal.
//!
//! ```text
//! pricing_cli [request.json] [--catalog catalog.toml] [--config config.toml]
//! ```
//!
//! With a request file the line is read as `CalculationInputs` JSON.
//! Without one, a clear acrylic flat panel is priced from prompted values.
//! Logging goes to stderr and honours `RUST_LOG` (default `info`).

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use pricing_core::calculations::{compute, CalculationInputs, CalculationResult};
use pricing_core::catalog::Catalog;
use pricing_core::config::EngineConfig;
use pricing_core::errors::{PricingError, PricingResult};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "usage: pricing_cli [request.json] [--catalog catalog.toml] [--config config.toml]";

#[derive(Debug, Default)]
struct Args {
    request: Option<PathBuf>,
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => {
                parsed.catalog = Some(args.next().ok_or("--catalog needs a file")?.into());
            }
            "--config" => {
                parsed.config = Some(args.next().ok_or("--config needs a file")?.into());
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}\n{USAGE}")),
            path => {
                if parsed.request.is_some() {
                    return Err(format!("unexpected argument {path}\n{USAGE}"));
                }
                parsed.request = Some(path.into());
            }
        }
    }
    Ok(parsed)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn read_file(path: &PathBuf) -> PricingResult<String> {
    fs::read_to_string(path).map_err(|e| PricingError::Internal {
        message: format!("cannot read {}: {e}", path.display()),
    })
}

fn load_catalog(path: Option<&PathBuf>) -> PricingResult<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::from_toml_str(&read_file(path)?)?;
            info!(
                path = %path.display(),
                families = catalog.families.len(),
                materials = catalog.materials.len(),
                options = catalog.options.len(),
                "loaded catalog"
            );
            Ok(catalog)
        }
        None => Ok(Catalog::builtin().clone()),
    }
}

fn load_config(path: Option<&PathBuf>) -> PricingResult<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_toml_str(&read_file(path)?)?;
            info!(path = %path.display(), "loaded engine config");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn demo_inputs() -> CalculationInputs {
    let width_mm = prompt_f64("Enter panel width (mm) [1000]: ", 1000.0);
    let height_mm = prompt_f64("Enter panel height (mm) [500]: ", 500.0);
    let thickness_mm = prompt_f64("Enter thickness (mm) [3]: ", 3.0);
    let quantity = prompt_f64("Enter quantity [10]: ", 10.0).max(0.0).round() as u32;

    CalculationInputs::new("flat-panel", "acrylic-clear", thickness_mm, width_mm, height_mm, 0.0, quantity)
}

fn run(args: &Args) -> PricingResult<()> {
    let catalog = load_catalog(args.catalog.as_ref())?;
    let config = load_config(args.config.as_ref())?;

    let inputs: CalculationInputs = match &args.request {
        Some(path) => serde_json::from_str(&read_file(path)?)?,
        None => {
            println!("No request file given. Pricing a clear acrylic flat panel...");
            println!();
            demo_inputs()
        }
    };

    if let Err(e) = inputs.validate(&catalog) {
        warn!(code = e.error_code(), "{e}");
    }

    let result = compute(&inputs, &catalog, &config);
    print_report(&inputs, &result, &catalog);

    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn print_report(inputs: &CalculationInputs, result: &CalculationResult, catalog: &Catalog) {
    let family = catalog
        .family(&inputs.family_id)
        .map_or(inputs.family_id.as_str(), |f| f.name.as_str());
    let material = catalog
        .material(&inputs.material_id)
        .map_or(inputs.material_id.as_str(), |m| m.name.as_str());
    let b = &result.breakdown;
    let p = &result.packaging;

    println!("═══════════════════════════════════════");
    println!("  QUOTATION LINE");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Product:   {}", family);
    if let Some(subtype) = inputs.stand_subtype() {
        println!("  Subtype:   {}", subtype.display_name());
    }
    println!("  Material:  {} {:.1} mm", material, inputs.thickness_mm);
    println!(
        "  Size:      {:.0} x {:.0} x {:.0} mm",
        inputs.width_mm, inputs.height_mm, inputs.depth_mm
    );
    println!("  Quantity:  {}", inputs.quantity);
    let selected: Vec<&str> = inputs
        .selected_options
        .iter()
        .filter(|(_, on)| **on)
        .map(|(id, _)| id.as_str())
        .collect();
    if !selected.is_empty() {
        println!("  Options:   {}", selected.join(", "));
    }
    println!();
    println!("Per piece:");
    println!("  Surface    {:>10.4} m²", result.surface_m2);
    println!("  Weight     {:>10.3} kg", result.unit_weight_kg);
    println!("  Material   {:>10.2}", b.material_cost);
    println!("  Waste      {:>10.2}", b.waste_cost);
    println!("  Labor      {:>10.2}", b.labor_cost);
    println!("  Options    {:>10.2}", b.options_cost);
    println!("  Margin     {:>10.2}", b.margin);
    println!();
    println!("Shipping:");
    println!(
        "  Carton     {:.0} x {:.0} x {:.0} mm, {} per carton",
        p.box_width_mm, p.box_height_mm, p.box_depth_mm, p.pieces_per_box
    );
    println!(
        "  Cartons    {} ({} per layer, {} layers)",
        p.boxes_needed, p.boxes_per_layer, p.layers_per_pallet
    );
    println!("  Pallets    {}", p.pallets_needed);
    println!("  Weight     {:.1} kg", p.total_weight_kg);
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  UNIT {:.2}   TOTAL {:.2}",
        result.unit_price, result.total_price
    );
    println!("═══════════════════════════════════════");
}

fn main() {
    init_logging();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    println!("Fabquote CLI - Quotation Pricing");
    println!("================================");
    println!();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}
