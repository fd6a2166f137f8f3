use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One trait image discovered in the layer tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trait {
    /// Display name (file stem before the label delimiter).
    pub name: String,
    /// On-disk file name including extension.
    pub file_name: String,
    /// Trait type this image belongs to (first-level directory).
    pub trait_type: String,
    /// Rarity bucket (second-level directory).
    pub rarity: String,
    /// Labels parsed from the file name, used for affinity matching.
    pub labels: Vec<String>,
}

/// Immutable index of available traits: type -> rarity bucket -> traits.
///
/// Built once by [`scan_layer_directory`](crate::catalog::scan::scan_layer_directory)
/// and shared read-only across all draws.
#[derive(Debug, Clone, Default)]
pub struct TraitCatalog {
    by_type: BTreeMap<String, BTreeMap<String, Vec<Trait>>>,
}

impl TraitCatalog {
    pub(crate) fn insert(&mut self, t: Trait) {
        self.by_type
            .entry(t.trait_type.clone())
            .or_default()
            .entry(t.rarity.clone())
            .or_default()
            .push(t);
    }

    /// Candidate traits for `(trait_type, rarity)`, possibly empty.
    pub fn traits_for(&self, trait_type: &str, rarity: &str) -> &[Trait] {
        self.by_type
            .get(trait_type)
            .and_then(|buckets| buckets.get(rarity))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_type(&self, trait_type: &str) -> bool {
        self.by_type.contains_key(trait_type)
    }

    /// Trait type names in lexicographic order.
    pub fn trait_types(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }

    /// Exact lookup by `(type, bucket, display name)`; first match wins when
    /// label variants share a display name.
    pub fn find(&self, trait_type: &str, rarity: &str, name: &str) -> Option<&Trait> {
        self.traits_for(trait_type, rarity)
            .iter()
            .find(|t| t.name == name)
    }

    /// Lookup by display name across all buckets of a type.
    pub fn find_any(&self, trait_type: &str, name: &str) -> Option<&Trait> {
        self.by_type
            .get(trait_type)?
            .values()
            .flatten()
            .find(|t| t.name == name)
    }

    /// Path of a trait's image file under `root`.
    pub fn layer_path(&self, root: &Path, t: &Trait) -> PathBuf {
        root.join(&t.trait_type).join(&t.rarity).join(&t.file_name)
    }

    /// Total number of indexed traits.
    pub fn len(&self) -> usize {
        self.by_type
            .values()
            .flat_map(|buckets| buckets.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/store.rs"]
mod tests;
