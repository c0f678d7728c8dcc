pub mod build;
pub mod config;
pub mod metadata;
pub mod repack;
pub mod unpack;
pub mod validate;

use anyhow::Result;
use mmpack::{Outcome, Settings};
use serde::Serialize;
use std::path::PathBuf;

/// Print a successful result as a JSON outcome record
pub fn print_json<T: Serialize>(data: T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&Outcome::success(data))?);
    Ok(())
}

/// Folder for exports and repacks: flag, then settings, then desktop
pub fn export_dir(out_dir: Option<PathBuf>) -> Result<PathBuf> {
    match out_dir {
        Some(dir) => Ok(dir),
        None => Ok(Settings::load()?.resolve_export_dir()?),
    }
}
