//! Weighted event draw

use rand::Rng;

use crate::core::types::EventType;
use crate::selection::weights::WeightTable;

/// Draws one event per tick, proportional to its weight
#[derive(Debug, Clone)]
pub struct EventSelector {
    weights: WeightTable,
}

impl EventSelector {
    pub fn new(weights: WeightTable) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut WeightTable {
        &mut self.weights
    }

    /// Cumulative-weight walk in catalog order
    ///
    /// Rolls uniformly in `[0, total)` and returns the first event whose
    /// cumulative weight exceeds the roll. A zero total falls back to a
    /// uniform pick over the catalog.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> &EventType {
        let total = self.weights.total();
        if total == 0 {
            return self.weights.catalog().choose(rng);
        }

        let roll = rng.gen_range(0..total);
        let mut cumulative = 0u64;
        for (event, weight) in self.weights.iter() {
            cumulative += weight as u64;
            if roll < cumulative {
                return event;
            }
        }

        self.weights.catalog().choose(rng)
    }
}
