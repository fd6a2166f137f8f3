use crate::catalog::store::Trait;
use crate::config::model::TraitTypeRule;

/// One slot of an in-progress draw: a trait type and what it produced.
/// Empty slots stay in the sequence until the final filter so ordering rules
/// see every position.
#[derive(Debug, Clone)]
pub(crate) struct ChosenSlot {
    pub(crate) trait_type: String,
    pub(crate) chosen: Option<Trait>,
}

impl ChosenSlot {
    pub(crate) fn empty(trait_type: &str) -> Self {
        Self {
            trait_type: trait_type.to_string(),
            chosen: None,
        }
    }
}

/// Runtime affinity resolved against already-chosen slots.
#[derive(Debug, Clone, Default)]
pub(crate) struct TraitAffinity {
    pub(crate) exist: bool,
    /// Labels of the referenced trait; empty when that type produced nothing
    /// or its trait is label-free.
    pub(crate) labels: Vec<String>,
}

/// Check a rule's `requires` constraints against the slots chosen so far.
///
/// Each entry compares the referenced type's chosen display name (or the
/// literal `"none"` when that type yielded nothing, including types not yet
/// evaluated) against the entry's allowed values.
pub(crate) fn requirements_met(rule: &TraitTypeRule, chosen: &[ChosenSlot]) -> bool {
    let Some(requires) = &rule.requires else {
        return true;
    };
    for req in requires {
        let value = chosen
            .iter()
            .find(|slot| slot.trait_type == req.trait_type)
            .and_then(|slot| slot.chosen.as_ref())
            .map(|t| t.name.as_str())
            .unwrap_or("none");
        if !req.values.iter().any(|v| v == value) {
            return false;
        }
    }
    true
}

/// Resolve a rule's affinity filters against the slots chosen so far.
pub(crate) fn resolve_affinities(rule: &TraitTypeRule, chosen: &[ChosenSlot]) -> Vec<TraitAffinity> {
    let Some(affinities) = &rule.affinities else {
        return Vec::new();
    };
    affinities
        .iter()
        .map(|a| {
            let labels = chosen
                .iter()
                .find(|slot| slot.trait_type == a.trait_type)
                .and_then(|slot| slot.chosen.as_ref())
                .map(|t| t.labels.clone())
                .unwrap_or_default();
            TraitAffinity {
                exist: a.exist,
                labels,
            }
        })
        .collect()
}

/// Keep candidates that satisfy every affinity.
///
/// Label-free candidates are neutral and always pass. A labelled candidate
/// needs at least one overlapping label for an `exist` affinity and zero
/// overlapping labels otherwise.
pub(crate) fn filter_by_affinities<'a>(
    candidates: &'a [Trait],
    affinities: &[TraitAffinity],
) -> Vec<&'a Trait> {
    if affinities.is_empty() {
        return candidates.iter().collect();
    }
    candidates
        .iter()
        .filter(|t| passes_affinities(t, affinities))
        .collect()
}

fn passes_affinities(t: &Trait, affinities: &[TraitAffinity]) -> bool {
    if t.labels.is_empty() {
        return true;
    }
    affinities.iter().all(|a| {
        let overlap = t.labels.iter().any(|l| a.labels.contains(l));
        if a.exist { overlap } else { !overlap }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/select/rules.rs"]
mod tests;
