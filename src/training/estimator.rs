//! Per-event impact estimation
//!
//! Trains on the whole window and predicts back onto the same samples (no
//! held-out split), then averages the predictions by event. Events that
//! never occurred in the window are left out of the table entirely:
//! absence means "unknown", not "zero impact".

use serde::{Deserialize, Serialize};

use crate::core::error::{DreadError, Result};
use crate::core::types::EventType;
use crate::events::EventCatalog;
use crate::simulation::Sample;
use crate::training::features::FeatureEncoder;
use crate::training::regression::{LeastSquaresRegressor, Regressor};

/// Predictions closer to zero than this are suspicious for heart rates
const DEGENERATE_PREDICTION: f64 = 0.1;

/// Average predicted impact of one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventImpact {
    pub event: EventType,
    pub average: f64,
    /// Samples of this event in the training window
    pub occurrences: usize,
}

/// Impacts in catalog order, only for events seen in the window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactTable {
    pub impacts: Vec<EventImpact>,
    /// Near-zero or non-finite predictions seen while averaging
    pub degenerate_predictions: usize,
}

impl ImpactTable {
    pub fn get(&self, event: &EventType) -> Option<f64> {
        self.impacts.iter().find(|i| &i.event == event).map(|i| i.average)
    }

    pub fn len(&self) -> usize {
        self.impacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventImpact> {
        self.impacts.iter()
    }
}

pub struct ImpactEstimator {
    catalog: EventCatalog,
    regressor: Box<dyn Regressor>,
    min_samples: usize,
}

impl ImpactEstimator {
    pub fn new(catalog: EventCatalog, regressor: Box<dyn Regressor>, min_samples: usize) -> Self {
        Self {
            catalog,
            regressor,
            min_samples: min_samples.max(1),
        }
    }

    /// Least-squares estimator
    pub fn least_squares(catalog: EventCatalog, ridge: f64, min_samples: usize) -> Self {
        Self::new(catalog, Box::new(LeastSquaresRegressor::with_ridge(ridge)), min_samples)
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    pub fn estimate(&self, samples: &[Sample]) -> Result<ImpactTable> {
        if samples.len() < self.min_samples {
            return Err(DreadError::InsufficientData {
                samples: samples.len(),
                required: self.min_samples,
            });
        }

        let encoder = FeatureEncoder::fit(self.catalog.clone(), samples);
        let (features, targets) = encoder.encode_window(samples)?;
        let model = self.regressor.fit(&features, &targets)?;

        let mut sums = vec![0.0; self.catalog.len()];
        let mut counts = vec![0usize; self.catalog.len()];
        let mut degenerate = 0;

        for (row, sample) in features.row_iter().zip(samples) {
            let encoded: Vec<f64> = row.iter().copied().collect();
            let prediction = model.predict(&encoded);
            tracing::debug!(
                "t={} event={} predicted={:.2} observed={:.2}",
                sample.time,
                sample.event,
                prediction,
                sample.signal
            );

            if !prediction.is_finite() || prediction.abs() < DEGENERATE_PREDICTION {
                tracing::warn!(
                    "Degenerate prediction {:.4} for {} at t={}; model may be undertrained",
                    prediction,
                    sample.event,
                    sample.time
                );
                degenerate += 1;
            }

            // Encoding already rejected events outside the catalog
            if let Some(idx) = self.catalog.index_of(&sample.event) {
                sums[idx] += prediction;
                counts[idx] += 1;
            }
        }

        let impacts = self
            .catalog
            .iter()
            .enumerate()
            .filter(|(i, _)| counts[*i] > 0)
            .map(|(i, event)| EventImpact {
                event: event.clone(),
                average: sums[i] / counts[i] as f64,
                occurrences: counts[i],
            })
            .collect();

        Ok(ImpactTable {
            impacts,
            degenerate_predictions: degenerate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Tick;

    fn sample(time: Tick, event: &str, signal: f64) -> Sample {
        Sample {
            time,
            signal,
            event: event.into(),
        }
    }

    fn estimator() -> ImpactEstimator {
        let catalog = EventCatalog::from_names(&["Spider", "Explosion", "Cheerful Music"]).unwrap();
        ImpactEstimator::least_squares(catalog, 0.0, 1)
    }

    #[test]
    fn test_empty_window_is_insufficient() {
        let err = estimator().estimate(&[]).unwrap_err();
        assert!(matches!(err, DreadError::InsufficientData { samples: 0, required: 1 }));
    }

    #[test]
    fn test_below_minimum_is_insufficient() {
        let catalog = EventCatalog::from_names(&["Spider"]).unwrap();
        let estimator = ImpactEstimator::least_squares(catalog, 0.0, 5);
        let samples = vec![sample(0, "Spider", 90.0), sample(1, "Spider", 91.0)];
        assert!(matches!(
            estimator.estimate(&samples),
            Err(DreadError::InsufficientData { samples: 2, required: 5 })
        ));
    }

    #[test]
    fn test_single_event_window_has_one_finite_entry() {
        let samples = vec![
            sample(0, "Spider", 88.0),
            sample(1, "Spider", 94.0),
            sample(2, "Spider", 91.0),
        ];
        let table = estimator().estimate(&samples).unwrap();
        assert_eq!(table.len(), 1);
        let impact = table.get(&"Spider".into()).unwrap();
        assert!(impact.is_finite());
        // Fitted values of an OLS fit with intercept average to the observed mean
        assert!((impact - 91.0).abs() < 1e-6);
    }

    #[test]
    fn test_unseen_events_are_omitted() {
        let samples = vec![sample(0, "Spider", 90.0), sample(1, "Explosion", 110.0)];
        let table = estimator().estimate(&samples).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get(&"Cheerful Music".into()).is_none());
    }

    #[test]
    fn test_impacts_separate_loud_from_calm_events() {
        let mut samples = Vec::new();
        for t in 0..40 {
            let (event, signal) = match t % 3 {
                0 => ("Spider", 92.0 + (t % 5) as f64),
                1 => ("Explosion", 110.0 + (t % 7) as f64),
                _ => ("Cheerful Music", 68.0 + (t % 4) as f64),
            };
            samples.push(sample(t, event, signal));
        }
        let table = estimator().estimate(&samples).unwrap();

        let explosion = table.get(&"Explosion".into()).unwrap();
        let music = table.get(&"Cheerful Music".into()).unwrap();
        assert!(explosion > 100.0, "explosion impact {}", explosion);
        assert!(music < 75.0, "music impact {}", music);
        assert_eq!(table.degenerate_predictions, 0);
    }

    #[test]
    fn test_estimate_is_repeatable() {
        let samples: Vec<Sample> = (0..20)
            .map(|t| sample(t, if t % 2 == 0 { "Spider" } else { "Explosion" }, 80.0 + t as f64))
            .collect();
        let estimator = estimator();
        assert_eq!(estimator.estimate(&samples).unwrap(), estimator.estimate(&samples).unwrap());
    }

    #[test]
    fn test_zero_signal_counts_as_degenerate() {
        let samples = vec![sample(0, "Spider", 0.0), sample(1, "Spider", 0.0)];
        let table = estimator().estimate(&samples).unwrap();
        assert_eq!(table.degenerate_predictions, 2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_event_outside_catalog_is_rejected() {
        let samples = vec![sample(0, "Ghost", 90.0)];
        assert!(matches!(
            estimator().estimate(&samples),
            Err(DreadError::UnrecognizedEvent(_))
        ));
    }
}
