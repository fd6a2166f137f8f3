use rayon::prelude::*;

use crate::catalog::store::TraitCatalog;
use crate::collection::model::{Attribute, Collectible};
use crate::config::model::{CollectionConfig, TraitOrderRule, TraitTypeRule};
use crate::foundation::error::{LayerforgeError, LayerforgeResult};
use crate::foundation::rng::{RandomSource, SeededSource};
use crate::select::rarity::RarityDistribution;
use crate::select::rules::{self, ChosenSlot};

/// Draws complete attribute sets for collectibles.
///
/// Construction builds every rarity distribution (the shared default and all
/// per-type overrides) up front, so configuration problems surface before any
/// generation begins.
pub struct AttributeSelector<'a> {
    config: &'a CollectionConfig,
    catalog: &'a TraitCatalog,
    default_distribution: RarityDistribution,
    /// Override distributions, parallel to `config.types`.
    overrides: Vec<Option<RarityDistribution>>,
}

impl<'a> AttributeSelector<'a> {
    pub fn new(config: &'a CollectionConfig, catalog: &'a TraitCatalog) -> LayerforgeResult<Self> {
        let default_distribution = RarityDistribution::new(config.rarities.clone())?;
        let overrides = config
            .types
            .iter()
            .map(|rule| rule.rarities.clone().map(RarityDistribution::new).transpose())
            .collect::<LayerforgeResult<Vec<_>>>()?;
        Ok(Self {
            config,
            catalog,
            default_distribution,
            overrides,
        })
    }

    /// Generate `total` collectibles with dense ids `1..=total`.
    ///
    /// Each collectible draws from its own stream derived from `(seed, id)`,
    /// so the result is independent of scheduling; `parallel` only changes
    /// wall time.
    #[tracing::instrument(skip(self))]
    pub fn generate(
        &self,
        total: u32,
        seed: u64,
        parallel: bool,
    ) -> LayerforgeResult<Vec<Collectible>> {
        let draw_one = |id: u32| -> LayerforgeResult<Collectible> {
            let mut rng = SeededSource::for_collectible(seed, id);
            Ok(Collectible {
                id,
                attributes: self.draw(&mut rng)?,
            })
        };

        if parallel {
            (1..=total).into_par_iter().map(draw_one).collect()
        } else {
            (1..=total).map(draw_one).collect()
        }
    }

    /// Draw one attribute set using `rng`.
    ///
    /// Trait types are evaluated in configured order; ordering rules are
    /// applied afterwards and empty slots are dropped from the result.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> LayerforgeResult<Vec<Attribute>> {
        let mut chosen: Vec<ChosenSlot> = Vec::with_capacity(self.config.types.len());
        for (rule, override_dist) in self.config.types.iter().zip(&self.overrides) {
            let slot = self.draw_slot(rule, override_dist.as_ref(), &chosen, rng);
            chosen.push(slot);
        }

        let reordered = reorder(chosen, &self.config.traits)?;
        Ok(reordered
            .into_iter()
            .filter_map(|slot| slot.chosen)
            .map(|t| Attribute {
                name: t.trait_type,
                rarity: t.rarity,
                value: t.name,
            })
            .collect())
    }

    /// One trait type's draw. Consumes one percent draw for the occurrence
    /// gate, then (when the gate and `requires` pass) one bucket draw and one
    /// index pick over the surviving candidates.
    fn draw_slot(
        &self,
        rule: &TraitTypeRule,
        override_dist: Option<&RarityDistribution>,
        chosen: &[ChosenSlot],
        rng: &mut dyn RandomSource,
    ) -> ChosenSlot {
        let n = rng.next_percent();
        if n >= rule.chance_percent() || !rules::requirements_met(rule, chosen) {
            return ChosenSlot::empty(&rule.name);
        }

        let distribution = override_dist.unwrap_or(&self.default_distribution);
        let affinities = rules::resolve_affinities(rule, chosen);
        let bucket = distribution.draw(rng);
        let candidates = self.catalog.traits_for(&rule.name, &bucket.name);
        let survivors = rules::filter_by_affinities(candidates, &affinities);
        if survivors.is_empty() {
            tracing::debug!(
                trait_type = %rule.name,
                bucket = %bucket.name,
                "no candidates after affinity filter"
            );
            return ChosenSlot::empty(&rule.name);
        }

        let picked = survivors[rng.pick_index(survivors.len())].clone();
        ChosenSlot {
            trait_type: rule.name.clone(),
            chosen: Some(picked),
        }
    }
}

/// Apply explicit ordering rules over the full draw sequence.
///
/// Slots are visited in original draw order. A chosen trait with a matching
/// `(type, name)` rule moves to immediately follow the rule's `after` type
/// when that type is currently present; a rule without `after`, or whose
/// target is absent, leaves the trait where it is. The slot count must
/// survive the pass unchanged.
fn reorder(
    slots: Vec<ChosenSlot>,
    order_rules: &[TraitOrderRule],
) -> LayerforgeResult<Vec<ChosenSlot>> {
    if order_rules.is_empty() {
        return Ok(slots);
    }

    let original_len = slots.len();
    let mut result = slots.clone();
    for slot in &slots {
        let Some(t) = &slot.chosen else {
            continue;
        };
        let Some(rule) = order_rules
            .iter()
            .find(|r| r.trait_type == t.trait_type && r.name == t.name)
        else {
            continue;
        };
        let Some(after) = &rule.order.after else {
            continue;
        };
        let Some(current) = result.iter().position(|s| s.trait_type == t.trait_type) else {
            continue;
        };

        let moved = result.remove(current);
        match result.iter().position(|s| s.trait_type == *after) {
            Some(i) => result.insert(i + 1, moved),
            // Target absent (empty or the slot's own type): restore the
            // original position.
            None => result.insert(current, moved),
        }
    }

    if result.len() != original_len {
        return Err(LayerforgeError::internal(format!(
            "reordering changed attribute count: {} -> {}",
            original_len,
            result.len()
        )));
    }
    Ok(result)
}

#[cfg(test)]
#[path = "../../tests/unit/select/selector.rs"]
mod tests;
