use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{LayerforgeError, LayerforgeResult};

/// One resolved trait choice, as persisted in the intermediate collection
/// file. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Trait type name.
    pub name: String,
    /// Rarity bucket the value was drawn from.
    pub rarity: String,
    /// Trait display name.
    pub value: String,
}

/// A generated collectible. Ids are dense `1..=N` in draw order; the
/// attribute sequence is final (ordering rules already applied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub attributes: Vec<Attribute>,
}

/// Write a collection as pretty-printed JSON, creating parent directories.
pub fn save_collection(collectibles: &[Collectible], path: impl AsRef<Path>) -> LayerforgeResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(collectibles)
        .map_err(|e| LayerforgeError::serde(format!("serialize collection: {e}")))?;
    std::fs::write(path, json)
        .with_context(|| format!("write collection '{}'", path.display()))?;
    Ok(())
}

/// Read a collection file written by [`save_collection`].
pub fn load_collection(path: impl AsRef<Path>) -> LayerforgeResult<Vec<Collectible>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read collection '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| LayerforgeError::serde(format!("parse collection '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/collection/model.rs"]
mod tests;
