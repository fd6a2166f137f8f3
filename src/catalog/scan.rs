use std::path::Path;

use walkdir::WalkDir;

use crate::catalog::filename::{is_image_file, parse_stem};
use crate::catalog::store::{Trait, TraitCatalog};
use crate::foundation::error::{LayerforgeError, LayerforgeResult};

/// Build a [`TraitCatalog`] from a `root/<type>/<bucket>/<file>` tree.
///
/// Only image files at exactly that depth are indexed; everything else is
/// ignored. Entries are visited in file-name order so the catalog layout is
/// stable across runs.
#[tracing::instrument(skip_all)]
pub fn scan_layer_directory(root: impl AsRef<Path>) -> LayerforgeResult<TraitCatalog> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(LayerforgeError::asset(format!(
            "layer root '{}' is not a directory",
            root.display()
        )));
    }

    let mut catalog = TraitCatalog::default();
    for entry in WalkDir::new(root)
        .min_depth(3)
        .max_depth(3)
        .sort_by_file_name()
    {
        let entry = entry
            .map_err(|e| LayerforgeError::asset(format!("scan '{}': {e}", root.display())))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_image_file(file_name) {
            continue;
        }

        let path = entry.path();
        let Some((trait_type, rarity)) = parent_names(path) else {
            continue;
        };
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        let parsed = parse_stem(stem);

        catalog.insert(Trait {
            name: parsed.name,
            file_name: file_name.to_string(),
            trait_type,
            rarity,
            labels: parsed.labels,
        });
    }

    tracing::debug!(traits = catalog.len(), "scanned layer directory");
    Ok(catalog)
}

// <root>/<type>/<bucket>/<file> -> (type, bucket)
fn parent_names(path: &Path) -> Option<(String, String)> {
    let bucket_dir = path.parent()?;
    let type_dir = bucket_dir.parent()?;
    let bucket = bucket_dir.file_name()?.to_str()?;
    let trait_type = type_dir.file_name()?.to_str()?;
    Some((trait_type.to_string(), bucket.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/scan.rs"]
mod tests;
