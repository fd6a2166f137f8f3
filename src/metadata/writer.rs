use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::collection::model::Collectible;
use crate::config::model::MetadataDef;
use crate::foundation::error::{LayerforgeError, LayerforgeResult};

/// Marketplace-facing metadata document, one per collectible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    /// Absent on pre-reveal documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub trait_type: String,
    pub value: String,
}

/// Where a document's `image` field points.
#[derive(Debug, Clone, Copy)]
pub enum ImageLocation<'a> {
    /// Revealed: `<url_prefix>/<id>.png`, attributes included.
    Revealed { url_prefix: &'a str },
    /// Pre-reveal: one shared placeholder URL, attributes omitted.
    Unrevealed { url: &'a str },
}

impl TokenMetadata {
    pub fn for_collectible(
        meta: &MetadataDef,
        collectible: &Collectible,
        location: ImageLocation<'_>,
    ) -> Self {
        let (image, attributes) = match location {
            ImageLocation::Revealed { url_prefix } => (
                format!("{url_prefix}/{}.png", collectible.id),
                Some(
                    collectible
                        .attributes
                        .iter()
                        .map(|a| AttributeRecord {
                            trait_type: a.name.clone(),
                            value: format_attribute_value(&a.value),
                        })
                        .collect(),
                ),
            ),
            ImageLocation::Unrevealed { url } => (url.to_string(), None),
        };
        Self {
            name: format!("{}{}", meta.name, collectible.id),
            description: meta.description.clone(),
            image,
            attributes,
        }
    }
}

/// Attribute values use `_` where asset file names use `-`.
pub fn format_attribute_value(value: &str) -> String {
    value.replace('-', "_")
}

/// Write one pretty-printed document per collectible under `out_dir`, named
/// by bare id (no extension), matching token-URI layouts.
pub fn write_collection_metadata(
    meta: &MetadataDef,
    collectibles: &[Collectible],
    location: ImageLocation<'_>,
    out_dir: &Path,
) -> LayerforgeResult<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let mut written = Vec::with_capacity(collectibles.len());
    for collectible in collectibles {
        let doc = TokenMetadata::for_collectible(meta, collectible, location);
        let json = serde_json::to_string_pretty(&doc).map_err(|e| {
            LayerforgeError::serde(format!(
                "serialize metadata for collectible {}: {e}",
                collectible.id
            ))
        })?;
        let out_path = out_dir.join(collectible.id.to_string());
        std::fs::write(&out_path, json)
            .with_context(|| format!("write metadata '{}'", out_path.display()))?;
        written.push(out_path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/writer.rs"]
mod tests;
