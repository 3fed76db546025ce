use mutasi_core::error::MutasiError;
use mutasi_core::template::{self, PRESETS};
use std::path::Path;

use crate::output;

pub fn list() -> Result<(), MutasiError> {
    println!("Available statement templates:\n");
    for name in PRESETS {
        let t = template::load_preset(name)?;
        println!("  {:<8} {}", name, t.sentinel.text);
        if let Some(ref desc) = t.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), MutasiError> {
    let t = template::load_preset(preset)?;
    output::json::print(&t)
}

pub fn validate(file: &Path) -> Result<(), MutasiError> {
    let t = template::load_template(file)?;

    let b = &t.default_boundaries;
    println!("Template '{}' is valid.", t.name);
    println!("  Header row: {}", t.sentinel.text);
    println!(
        "  Default boundaries: date < {}, amount >= {}, balance >= {}",
        b.date_max, b.mutasi_min, b.saldo_min
    );
    println!("  Summary prefixes: {}", t.summary_prefixes.join(", "));

    let mut warnings = Vec::new();
    for token in &t.sentinel.tokens {
        if !t.sentinel.text.split_whitespace().any(|w| w == token) {
            warnings.push(format!(
                "sentinel token '{}' does not appear in sentinel text",
                token
            ));
        }
    }
    if t.header_markers.is_empty() {
        warnings.push("no header markers: account info will not be emitted".to_string());
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
