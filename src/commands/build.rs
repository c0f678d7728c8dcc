//! Build command - create a .mmpackage from the four payload files

use anyhow::Result;
use mmpack::{build_package, validate_inputs, HostSettings, InputFile, NamingPolicy, PlatformCode, Settings};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildOutput {
    output_path: PathBuf,
}

pub fn run(
    files: Vec<PathBuf>,
    platform: Option<PlatformCode>,
    chunk: Option<u32>,
    dest: Option<PathBuf>,
    name: Option<String>,
    json: bool,
) -> Result<()> {
    let settings = Settings::load()?;
    let platform = platform.unwrap_or_else(|| settings.resolve_platform(&HostSettings::load()));
    let dest = dest.or_else(|| settings.mod_folder.clone());

    let inputs = files
        .into_iter()
        .map(InputFile::from_path)
        .collect::<mmpack::Result<Vec<_>>>()?;

    let policy = NamingPolicy {
        platform,
        chunk_override: chunk,
        explicit_name: name,
    };

    validate_inputs(&inputs)?;
    if dest.is_none() {
        return Err(mmpack::Error::NoDestinationFolder.into());
    }

    if !json {
        println!("Building package for {}...", platform);
        for input in &inputs {
            println!("  {} → {}", input.name, policy.member_name(&input.name));
        }
        println!();
    }

    let output_path = build_package(&inputs, &policy, dest.as_deref())?;

    if json {
        return super::print_json(BuildOutput { output_path });
    }

    println!("✓ Created {}", output_path.display());
    Ok(())
}
