//! Repack command - pack the files of a folder into a new package

use anyhow::Result;
use mmpack::repack_folder;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Repacked {
    output_path: PathBuf,
}

pub fn run(
    folder: PathBuf,
    output: Option<String>,
    out_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let out_dir = super::export_dir(out_dir)?;
    let output_path = repack_folder(&folder, output.as_deref(), &out_dir)?;

    if json {
        return super::print_json(Repacked { output_path });
    }

    println!("✓ Repacked {} into {}", folder.display(), output_path.display());
    Ok(())
}
