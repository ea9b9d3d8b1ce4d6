//! Session output and serialization

use serde::{Deserialize, Serialize};

use crate::adaptation::WeightChange;
use crate::core::error::Result;
use crate::core::types::{EventType, Tick};
use crate::selection::EventWeight;
use crate::simulation::Sample;
use crate::training::ImpactTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CheckpointOutcome {
    Adapted {
        impacts: ImpactTable,
        changes: Vec<WeightChange>,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointReport {
    pub tick: Tick,
    pub samples_used: usize,
    pub outcome: CheckpointOutcome,
}

impl CheckpointReport {
    pub fn is_adapted(&self) -> bool {
        matches!(self.outcome, CheckpointOutcome::Adapted { .. })
    }

    /// Multi-line text block: one line per event impact and weight change
    pub fn summary(&self) -> String {
        match &self.outcome {
            CheckpointOutcome::Adapted { impacts, changes } => {
                let mut lines = vec![format!(
                    "Checkpoint t={} ({} samples)",
                    self.tick, self.samples_used
                )];
                for change in changes {
                    lines.push(format!(
                        "  {:<16} impact {:>7.2} bpm  weight {} -> {}",
                        change.event, change.impact, change.before, change.after
                    ));
                }
                if impacts.degenerate_predictions > 0 {
                    lines.push(format!(
                        "  warning: {} near-zero predictions",
                        impacts.degenerate_predictions
                    ));
                }
                lines.join("\n")
            }
            CheckpointOutcome::Skipped { reason } => {
                format!("Checkpoint t={} skipped: {}", self.tick, reason)
            }
        }
    }
}

/// Per-event sample count over a tick range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCount {
    pub event: EventType,
    pub count: usize,
}

/// Complete session output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub seed: u64,
    pub duration_ticks: Tick,
    pub samples: Vec<Sample>,
    pub checkpoints: Vec<CheckpointReport>,
    pub final_weights: Vec<EventWeight>,
}

impl SessionReport {
    /// Event frequencies for samples with `from <= time < to`, in final-weight order
    pub fn event_counts(&self, from: Tick, to: Tick) -> Vec<EventCount> {
        self.final_weights
            .iter()
            .map(|w| EventCount {
                event: w.event.clone(),
                count: self
                    .samples
                    .iter()
                    .filter(|s| s.time >= from && s.time < to && s.event == w.event)
                    .count(),
            })
            .collect()
    }

    pub fn mean_signal(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.signal).sum::<f64>() / self.samples.len() as f64
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let adapted = self.checkpoints.iter().filter(|c| c.is_adapted()).count();
        let weights = self
            .final_weights
            .iter()
            .map(|w| format!("{}={}", w.event, w.weight))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Simulated {} ticks (seed {}), mean {:.1} bpm\n{} checkpoints ({} adapted, {} skipped)\nFinal weights: {}",
            self.samples.len(),
            self.seed,
            self.mean_signal(),
            self.checkpoints.len(),
            adapted,
            self.checkpoints.len() - adapted,
            weights,
        )
    }
}
