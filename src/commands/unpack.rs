//! Unpack command - extract a package next to itself

use anyhow::Result;
use mmpack::unpack_package;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Unpacked {
    out_dir: PathBuf,
}

pub fn run(package: PathBuf, json: bool) -> Result<()> {
    let out_dir = unpack_package(&package)?;

    if json {
        return super::print_json(Unpacked { out_dir });
    }

    println!("✓ Unpacked to {}", out_dir.display());
    Ok(())
}
