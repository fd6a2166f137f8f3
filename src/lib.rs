//! Layerforge generates collections of layered collectible images.
//!
//! The pipeline is split into independent stages connected by plain data:
//!
//! - Load and validate a [`CollectionConfig`]
//! - Scan a layer directory tree into a [`TraitCatalog`]
//! - Draw attribute sets with an [`AttributeSelector`]
//! - Flatten each [`Collectible`] into a raster image with a [`Compositor`]
//! - Emit one metadata document per collectible
//!
//! Generation is deterministic for a given seed: every collectible draws from
//! its own random stream derived from `(seed, id)`, so sequential and
//! parallel runs produce identical collections.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod collection;
pub mod compose;
pub mod config;
pub mod foundation;
pub mod metadata;
pub mod select;

pub use crate::catalog::scan::scan_layer_directory;
pub use crate::catalog::store::{Trait, TraitCatalog};
pub use crate::collection::model::{Attribute, Collectible};
pub use crate::compose::compositor::{Compositor, RenderThreading};
pub use crate::config::model::CollectionConfig;
pub use crate::foundation::error::{LayerforgeError, LayerforgeResult};
pub use crate::foundation::rng::{RandomSource, ScriptedSource, SeededSource};
pub use crate::metadata::writer::{ImageLocation, TokenMetadata};
pub use crate::select::rarity::{Rarity, RarityDistribution};
pub use crate::select::selector::AttributeSelector;
