//! Many independent sessions in parallel
//!
//! Each session gets its own seed and owns its weights, timeline and RNG.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::config::SessionConfig;
use crate::core::error::Result;
use crate::core::types::EventType;
use crate::session::controller::SessionController;
use crate::session::report::SessionReport;

/// Mean final weight of one event across a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanWeight {
    pub event: EventType,
    pub mean: f64,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub sessions: usize,
    pub skipped_checkpoints: usize,
    pub mean_signal: f64,
    pub final_weights: Vec<MeanWeight>,
}

/// Run one session per seed. Reports come back in seed order.
pub fn run_batch(config: &SessionConfig, seeds: &[u64]) -> Result<Vec<SessionReport>> {
    config.validate()?;
    seeds
        .par_iter()
        .map(|&seed| {
            let session_config = SessionConfig {
                seed,
                ..config.clone()
            };
            SessionController::new(session_config)?.run()
        })
        .collect()
}

impl BatchSummary {
    pub fn from_reports(reports: &[SessionReport]) -> Self {
        let sessions = reports.len();
        let skipped_checkpoints = reports
            .iter()
            .flat_map(|r| r.checkpoints.iter())
            .filter(|c| !c.is_adapted())
            .count();
        let mean_signal = if sessions == 0 {
            0.0
        } else {
            reports.iter().map(|r| r.mean_signal()).sum::<f64>() / sessions as f64
        };

        // Every report shares the catalog order of the first
        let final_weights = reports
            .first()
            .map(|first| {
                first
                    .final_weights
                    .iter()
                    .enumerate()
                    .map(|(i, w)| {
                        let values: Vec<u32> = reports
                            .iter()
                            .filter_map(|r| r.final_weights.get(i).map(|x| x.weight))
                            .collect();
                        MeanWeight {
                            event: w.event.clone(),
                            mean: values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64,
                            min: values.iter().copied().min().unwrap_or(0),
                            max: values.iter().copied().max().unwrap_or(0),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            sessions,
            skipped_checkpoints,
            mean_signal,
            final_weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig {
            duration_ticks: 60,
            ..Default::default()
        }
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let seeds = [1, 2, 3];
        let reports = run_batch(&config(), &seeds).unwrap();
        assert_eq!(reports.len(), 3);

        for (report, &seed) in reports.iter().zip(&seeds) {
            let solo = SessionController::new(SessionConfig { seed, ..config() })
                .unwrap()
                .run()
                .unwrap();
            assert_eq!(report.seed, seed);
            assert_eq!(report.samples, solo.samples);
            assert_eq!(report.final_weights, solo.final_weights);
        }
    }

    #[test]
    fn test_summary_over_batch() {
        let reports = run_batch(&config(), &[10, 11, 12, 13]).unwrap();
        let summary = BatchSummary::from_reports(&reports);
        assert_eq!(summary.sessions, 4);
        assert_eq!(summary.final_weights.len(), 5);
        for weight in &summary.final_weights {
            assert!(weight.min >= 1);
            assert!(weight.mean >= weight.min as f64 && weight.mean <= weight.max as f64);
        }
    }

    #[test]
    fn test_empty_batch() {
        let summary = BatchSummary::from_reports(&[]);
        assert_eq!(summary.sessions, 0);
        assert!(summary.final_weights.is_empty());
    }
}
