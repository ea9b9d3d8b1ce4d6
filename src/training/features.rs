//! Feature encoding for the training matrix
//!
//! Row layout: one-hot over the full catalog, then time divided by the
//! window's largest tick. Events absent from the window keep an all-zero
//! column so the layout never depends on which events happened to occur.

use nalgebra::{DMatrix, DVector};

use crate::core::error::{DreadError, Result};
use crate::core::types::{EventType, Tick};
use crate::events::EventCatalog;
use crate::simulation::Sample;

#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    catalog: EventCatalog,
    time_scale: f64,
}

impl FeatureEncoder {
    /// Fix the time scale from the training window
    pub fn fit(catalog: EventCatalog, samples: &[Sample]) -> Self {
        let max_time = samples.iter().map(|s| s.time).max().unwrap_or(0);
        Self {
            catalog,
            time_scale: max_time.max(1) as f64,
        }
    }

    /// Number of feature columns
    pub fn width(&self) -> usize {
        self.catalog.len() + 1
    }

    pub fn encode(&self, event: &EventType, time: Tick) -> Result<Vec<f64>> {
        let idx = self
            .catalog
            .index_of(event)
            .ok_or_else(|| DreadError::UnrecognizedEvent(event.clone()))?;
        let mut row = vec![0.0; self.width()];
        row[idx] = 1.0;
        row[self.catalog.len()] = time as f64 / self.time_scale;
        Ok(row)
    }

    /// Feature matrix and signal targets for a window
    pub fn encode_window(&self, samples: &[Sample]) -> Result<(DMatrix<f64>, DVector<f64>)> {
        let width = self.width();
        let mut data = Vec::with_capacity(samples.len() * width);
        for sample in samples {
            data.extend(self.encode(&sample.event, sample.time)?);
        }
        let features = DMatrix::from_row_slice(samples.len(), width, &data);
        let targets = DVector::from_iterator(samples.len(), samples.iter().map(|s| s.signal));
        Ok((features, targets))
    }
}
