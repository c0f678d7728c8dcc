//! Validate command - check the structure of a package

use anyhow::Result;
use mmpack::{validate_package, REQUIRED_EXTENSIONS};
use std::path::PathBuf;

pub fn run(package: PathBuf, json: bool) -> Result<()> {
    let report = validate_package(&package)?;

    if json {
        return super::print_json(report);
    }

    println!("Validating {}...", package.display());
    println!();

    for ext in REQUIRED_EXTENSIONS {
        let mark = if report.missing.iter().any(|m| m == ext) {
            "✗"
        } else {
            "✓"
        };
        println!("  {} .{}", mark, ext);
    }
    println!(
        "  {} metadata.json",
        if report.has_metadata { "✓" } else { "✗" }
    );
    println!();

    println!("Entries ({}):", report.entries.len());
    for entry in &report.entries {
        println!("    {}", entry);
    }
    println!();

    if report.valid {
        println!("✓ Package structure is valid");
    } else {
        println!("✗ Package is missing required files");
    }

    Ok(())
}
