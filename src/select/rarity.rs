use serde::{Deserialize, Serialize};

use crate::foundation::error::{LayerforgeError, LayerforgeResult};
use crate::foundation::rng::RandomSource;

/// A named weight tier. `chance` is an integer percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rarity {
    pub name: String,
    pub chance: u32,
}

/// Weighted bucket table over cumulative half-open ranges.
///
/// Ranges are assigned by accumulating chances in input order, so the same
/// sequence always produces the same boundaries: `[0, c0)`, `[c0, c0+c1)`,
/// and so on up to exactly 100.
#[derive(Debug, Clone)]
pub struct RarityDistribution {
    ranges: Vec<RarityRange>,
}

#[derive(Debug, Clone)]
struct RarityRange {
    /// Inclusive lower bound.
    lower: u32,
    /// Exclusive upper bound.
    upper: u32,
    rarity: Rarity,
}

impl RarityRange {
    fn contains(&self, n: u32) -> bool {
        self.lower <= n && n < self.upper
    }
}

impl RarityDistribution {
    /// Build the range table. Fails unless the chances sum to exactly 100.
    pub fn new(rarities: Vec<Rarity>) -> LayerforgeResult<Self> {
        let mut ranges = Vec::with_capacity(rarities.len());
        let mut offset: u32 = 0;
        for rarity in rarities {
            let upper = offset.saturating_add(rarity.chance);
            ranges.push(RarityRange {
                lower: offset,
                upper,
                rarity,
            });
            offset = upper;
        }
        if offset != 100 {
            return Err(LayerforgeError::validation(format!(
                "sum of rarity chances must equal 100, got {offset}"
            )));
        }
        Ok(Self { ranges })
    }

    /// Weighted draw: a uniform `n` in `[0, 100)` selects the bucket whose
    /// range contains it.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> &Rarity {
        let n = rng.next_percent().min(99);
        for range in &self.ranges {
            if range.contains(n) {
                return &range.rarity;
            }
        }
        // Unreachable: the ranges partition [0, 100) and n is clamped below
        // 100. Kept total so a misbehaving RandomSource cannot panic us.
        &self.ranges[0].rarity
    }

    /// Bucket names in input order.
    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.ranges.iter().map(|r| r.rarity.name.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/rarity.rs"]
mod tests;
