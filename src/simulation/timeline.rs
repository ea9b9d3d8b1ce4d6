//! Tick-by-tick timeline generation
//!
//! One tick = one drawn event plus the heart rate it provoked. The
//! simulator owns the selector (and so the weight table) and the session
//! RNG; the timeline is the append-only record of what it produced.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{DreadError, Result};
use crate::core::types::{EventType, Tick};
use crate::selection::EventSelector;
use crate::signal::SignalModel;

/// One recorded tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: Tick,
    pub signal: f64,
    pub event: EventType,
}

/// Append-only, gap-free sample sequence. `samples[i].time == i`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    samples: Vec<Sample>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(ticks: usize) -> Self {
        Self {
            samples: Vec::with_capacity(ticks),
        }
    }

    /// Append the next sample. Its time must equal the current length.
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        let expected = self.samples.len() as Tick;
        if sample.time != expected {
            return Err(DreadError::OutOfOrderSample {
                expected,
                got: sample.time,
            });
        }
        self.samples.push(sample);
        Ok(())
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

pub struct TimelineSimulator {
    selector: EventSelector,
    signal: SignalModel,
    rng: ChaCha8Rng,
}

impl TimelineSimulator {
    pub fn new(selector: EventSelector, signal: SignalModel, seed: u64) -> Self {
        Self {
            selector,
            signal,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn selector(&self) -> &EventSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut EventSelector {
        &mut self.selector
    }

    /// Draw an event, sample its heart rate, stamp it with `time`
    pub fn tick(&mut self, time: Tick) -> Result<Sample> {
        let event = self.selector.select(&mut self.rng).clone();
        let signal = self.signal.sample(&event, &mut self.rng)?;
        Ok(Sample { time, signal, event })
    }
}
