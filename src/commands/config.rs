use anyhow::Result;
use mmpack::{HostSettings, PlatformCode, Settings};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigOutput {
    settings_path: PathBuf,
    settings: Settings,
    host_platform: PlatformCode,
}

pub fn run(action: &crate::ConfigAction, json: bool) -> Result<()> {
    use crate::ConfigAction;

    match action {
        ConfigAction::Show => show_config(json),
        ConfigAction::SetModFolder { path } => set_mod_folder(path, json),
        ConfigAction::Set { key, value } => set_config(key, Some(value), json),
        ConfigAction::Unset { key } => set_config(key, None, json),
    }
}

fn show_config(json: bool) -> Result<()> {
    let settings = Settings::load()?;
    let settings_path = Settings::default_path()?;
    let host_platform = HostSettings::load().platform_code();

    if json {
        return super::print_json(ConfigOutput {
            settings_path,
            settings,
            host_platform,
        });
    }

    println!();
    println!("  📁 Settings file: {}", settings_path.display());
    println!();
    println!("  Mod folder:     {}", format_path(settings.mod_folder.as_deref()));
    println!(
        "  Platform:       {}",
        match settings.platform {
            Some(code) => code.to_string(),
            None => format!("{} (from mod manager)", host_platform),
        }
    );
    println!("  Export folder:  {}", format_path(settings.export_dir.as_deref()));
    println!();

    Ok(())
}

fn format_path(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "(not set)".to_string(),
    }
}

fn set_mod_folder(path: &Path, json: bool) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("{} is not a folder", path.display());
    }
    let folder = path.canonicalize()?;

    let mut settings = Settings::load()?;
    settings.mod_folder = Some(folder.clone());
    settings.save()?;

    if json {
        return super::print_json(ConfigOutput {
            settings_path: Settings::default_path()?,
            host_platform: settings.resolve_platform(&HostSettings::load()),
            settings,
        });
    }

    println!("  ✓ mod_folder = {}", folder.display());
    Ok(())
}

fn set_config(key: &str, value: Option<&String>, json: bool) -> Result<()> {
    let mut settings = Settings::load()?;

    match key {
        "mod_folder" | "modFolder" => {
            settings.mod_folder = value.map(PathBuf::from);
        }
        "platform" => {
            settings.platform = value.map(|v| v.parse::<PlatformCode>()).transpose()?;
        }
        "export_dir" | "exportDir" => {
            settings.export_dir = value.map(PathBuf::from);
        }
        _ => {
            anyhow::bail!(
                "Invalid configuration key '{}'. Valid keys: mod_folder, platform, export_dir",
                key
            );
        }
    }

    settings.save()?;

    if json {
        return super::print_json(ConfigOutput {
            settings_path: Settings::default_path()?,
            host_platform: HostSettings::load().platform_code(),
            settings,
        });
    }

    match value {
        Some(value) => println!("  ✓ {} = {}", key, value),
        None => println!("  ✓ {} cleared", key),
    }
    Ok(())
}
