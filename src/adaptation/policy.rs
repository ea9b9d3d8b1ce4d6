//! Threshold reinforcement rule
//!
//! Events whose average predicted impact clears the threshold gain weight;
//! everything else loses weight down to the floor. Events missing from the
//! impact table are untouched.

use serde::{Deserialize, Serialize};

use crate::core::config::SessionConfig;
use crate::core::error::Result;
use crate::core::types::EventType;
use crate::selection::WeightTable;
use crate::training::ImpactTable;

/// One weight update, for the checkpoint report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightChange {
    pub event: EventType,
    pub impact: f64,
    pub before: u32,
    pub after: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptationPolicy {
    pub high_impact_threshold: f64,
    pub increment: u32,
    pub decrement: u32,
}

impl Default for AdaptationPolicy {
    fn default() -> Self {
        Self {
            high_impact_threshold: 90.0,
            increment: 2,
            decrement: 1,
        }
    }
}

impl AdaptationPolicy {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            high_impact_threshold: config.high_impact_threshold,
            increment: config.weight_increment,
            decrement: config.weight_decrement,
        }
    }

    /// Rewrite `weights` in place. The floor is the table's own.
    ///
    /// All-or-nothing: on error `weights` is left exactly as it was.
    pub fn adapt(&self, weights: &mut WeightTable, impacts: &ImpactTable) -> Result<Vec<WeightChange>> {
        let mut staged = weights.clone();
        let mut changes = Vec::with_capacity(impacts.len());

        for impact in impacts.iter() {
            let before = staged.get(&impact.event).unwrap_or(0);
            // NaN never clears the threshold, so it decays like a calm event
            let after = if impact.average > self.high_impact_threshold {
                staged.increase(&impact.event, self.increment)?
            } else {
                staged.decrease(&impact.event, self.decrement)?
            };

            tracing::debug!(
                "Adapt {}: impact {:.2} -> weight {} => {}",
                impact.event,
                impact.average,
                before,
                after
            );
            changes.push(WeightChange {
                event: impact.event.clone(),
                impact: impact.average,
                before,
                after,
            });
        }

        debug_assert!(staged.holds_invariant());
        *weights = staged;
        Ok(changes)
    }
}
