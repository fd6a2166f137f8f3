use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::catalog::store::TraitCatalog;
use crate::foundation::error::{LayerforgeError, LayerforgeResult};
use crate::select::rarity::Rarity;

/// Boundary model for a collection configuration file.
///
/// `types` is ordered: trait types are evaluated (and attributes emitted) in
/// this order, and `requires`/`affinities` can only see types listed earlier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Default rarity distribution shared by all trait types.
    pub rarities: Vec<Rarity>,
    /// Collection-level metadata fields.
    pub metadata: MetadataDef,
    /// Output image dimensions.
    pub canvas: CanvasSize,
    /// Per-trait-type generation rules, in evaluation order.
    #[serde(default)]
    pub types: Vec<TraitTypeRule>,
    /// Per-trait ordering rules applied after a draw.
    #[serde(default)]
    pub traits: Vec<TraitOrderRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataDef {
    /// Token name prefix; the collectible id is appended.
    pub name: String,
    pub description: String,
}

/// Generation rule for one trait type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitTypeRule {
    pub name: String,
    /// Occurrence chance in percent. Absent means 100.
    #[serde(default)]
    pub chance: Option<u32>,
    /// Override distribution replacing the shared default.
    #[serde(default)]
    pub rarities: Option<Vec<Rarity>>,
    /// Constraints against already-chosen trait types.
    #[serde(default)]
    pub requires: Option<Vec<RequireRule>>,
    /// Label filters resolved against already-chosen trait types.
    #[serde(default)]
    pub affinities: Option<Vec<AffinityRule>>,
}

impl TraitTypeRule {
    pub fn chance_percent(&self) -> u32 {
        self.chance.unwrap_or(100)
    }
}

/// The chosen value of `type` (or the literal `"none"` when that type yielded
/// nothing) must be one of `values`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequireRule {
    #[serde(rename = "type")]
    pub trait_type: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffinityRule {
    #[serde(rename = "type")]
    pub trait_type: String,
    pub exist: bool,
}

/// Reposition directive for a specific `(type, name)` trait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitOrderRule {
    #[serde(rename = "type")]
    pub trait_type: String,
    pub name: String,
    pub order: OrderDef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDef {
    /// Trait type the matched trait is placed immediately after.
    #[serde(default)]
    pub after: Option<String>,
}

impl CollectionConfig {
    pub fn from_path(path: impl AsRef<Path>) -> LayerforgeResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read collection config '{}'", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> LayerforgeResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| LayerforgeError::serde(format!("parse collection config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks that need no catalog.
    pub fn validate(&self) -> LayerforgeResult<()> {
        validate_chance_sum(&self.rarities, "default rarities")?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(LayerforgeError::validation(
                "canvas dimensions must be non-zero",
            ));
        }
        for rule in &self.types {
            if let Some(chance) = rule.chance
                && chance > 100
            {
                return Err(LayerforgeError::validation(format!(
                    "trait type '{}': chance {chance} exceeds 100",
                    rule.name
                )));
            }
            if let Some(rarities) = &rule.rarities {
                validate_chance_sum(rarities, &format!("trait type '{}' rarities", rule.name))?;
            }
        }
        Ok(())
    }

    /// Cross-checks against a scanned catalog: every configured trait type
    /// must have a layer directory and every ordering rule must name a trait
    /// that exists on disk.
    pub fn validate_against(&self, catalog: &TraitCatalog) -> LayerforgeResult<()> {
        for rule in &self.types {
            if !catalog.contains_type(&rule.name) {
                return Err(LayerforgeError::validation(format!(
                    "trait type '{}' has no layer directory",
                    rule.name
                )));
            }
        }
        for order in &self.traits {
            if catalog.find_any(&order.trait_type, &order.name).is_none() {
                return Err(LayerforgeError::validation(format!(
                    "ordering rule references unknown trait '{}/{}'",
                    order.trait_type, order.name
                )));
            }
        }
        Ok(())
    }
}

fn validate_chance_sum(rarities: &[Rarity], what: &str) -> LayerforgeResult<()> {
    let sum: u32 = rarities.iter().map(|r| r.chance).sum();
    if sum != 100 {
        return Err(LayerforgeError::validation(format!(
            "{what}: sum of chances must equal 100, got {sum}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
