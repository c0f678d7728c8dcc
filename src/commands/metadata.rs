//! Metadata commands - inject, edit, view and export metadata.json

use anyhow::{Context, Result};
use mmpack::{
    batch_inject_metadata, edit_metadata, export_metadata, inject_metadata, view_metadata,
    MetadataUpdate, PackageMetadata,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{MetadataAction, MetadataFields};

#[derive(Serialize)]
struct Injected {
    packages: usize,
}

#[derive(Serialize)]
struct Viewed {
    metadata: Option<serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Exported {
    output_path: PathBuf,
}

pub fn run(action: MetadataAction, json: bool) -> Result<()> {
    match action {
        MetadataAction::Inject {
            packages,
            fields,
            from_file,
        } => inject(&packages, fields, from_file.as_deref(), json),
        MetadataAction::Edit { package, fields } => edit(&package, fields, json),
        MetadataAction::View { package } => view(&package, json),
        MetadataAction::Export { package, out_dir } => export(&package, out_dir, json),
    }
}

impl From<MetadataFields> for MetadataUpdate {
    fn from(fields: MetadataFields) -> Self {
        MetadataUpdate {
            name: fields.name,
            author: fields.author,
            description: fields.description,
            category: fields.category,
        }
    }
}

fn inject(
    packages: &[PathBuf],
    fields: MetadataFields,
    from_file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let record: serde_json::Value = match from_file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            if !value.is_object() {
                anyhow::bail!("{} must contain a JSON object", path.display());
            }
            value
        }
        None => {
            let mut metadata = PackageMetadata::default();
            metadata.apply(&fields.into());
            serde_json::to_value(metadata)?
        }
    };

    let count = if let [package] = packages {
        inject_metadata(package, &record)?;
        1
    } else {
        batch_inject_metadata(packages, &record)?
    };

    if json {
        return super::print_json(Injected { packages: count });
    }

    for package in packages {
        println!("✓ metadata.json injected into {}", package.display());
    }
    Ok(())
}

fn edit(package: &Path, fields: MetadataFields, json: bool) -> Result<()> {
    let update = MetadataUpdate::from(fields);
    if update.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one of --name, --author, --description, --category");
    }

    let metadata = edit_metadata(package, &update)?;

    if json {
        return super::print_json(Viewed {
            metadata: Some(serde_json::to_value(metadata)?),
        });
    }

    println!("✓ Updated metadata of {}", package.display());
    print_record(&serde_json::to_value(metadata)?);
    Ok(())
}

fn view(package: &Path, json: bool) -> Result<()> {
    let metadata = view_metadata(package)?;

    if json {
        return super::print_json(Viewed { metadata });
    }

    match metadata {
        Some(value) => print_record(&value),
        None => println!("No metadata.json in {}", package.display()),
    }
    Ok(())
}

fn export(package: &Path, out_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let export_dir = super::export_dir(out_dir)?;
    let output_path = export_metadata(package, &export_dir)?;

    if json {
        return super::print_json(Exported { output_path });
    }

    println!("✓ Exported metadata to {}", output_path.display());
    Ok(())
}

fn print_record(value: &serde_json::Value) {
    match value.as_object() {
        Some(fields) => {
            for (key, field) in fields {
                match field.as_str() {
                    Some(text) => println!("  {:12} {}", format!("{}:", key), text),
                    None => println!("  {:12} {}", format!("{}:", key), field),
                }
            }
        }
        None => println!("{}", value),
    }
}
