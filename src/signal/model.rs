//! Event-to-heart-rate response model
//!
//! Each catalog event maps to a range of plausible heart rates; a sample is
//! a uniform draw from that range. There is no memory between samples.

use rand::Rng;

use crate::core::config::{SessionConfig, SignalRange};
use crate::core::error::{DreadError, Result};
use crate::core::types::EventType;
use crate::events::EventCatalog;

#[derive(Debug, Clone)]
pub struct SignalModel {
    catalog: EventCatalog,
    /// Indexed like the catalog; unranged events hold the neutral range
    ranges: Vec<SignalRange>,
    neutral: SignalRange,
}

impl SignalModel {
    pub fn new(
        catalog: EventCatalog,
        ranges: &[(EventType, SignalRange)],
        neutral: SignalRange,
    ) -> Result<Self> {
        let mut resolved = vec![neutral; catalog.len()];
        for (event, range) in ranges {
            let idx = catalog
                .index_of(event)
                .ok_or_else(|| DreadError::UnrecognizedEvent(event.clone()))?;
            resolved[idx] = *range;
        }
        Ok(Self {
            catalog,
            ranges: resolved,
            neutral,
        })
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let ranges: Vec<(EventType, SignalRange)> = config
            .events
            .iter()
            .filter_map(|e| e.range.map(|r| (EventType::new(e.name.as_str()), r)))
            .collect();
        Self::new(config.catalog()?, &ranges, config.neutral_range)
    }

    pub fn neutral_range(&self) -> SignalRange {
        self.neutral
    }

    pub fn range_for(&self, event: &EventType) -> Result<SignalRange> {
        self.catalog
            .index_of(event)
            .map(|i| self.ranges[i])
            .ok_or_else(|| DreadError::UnrecognizedEvent(event.clone()))
    }

    /// Draw one heart rate for `event`
    pub fn sample<R: Rng + ?Sized>(&self, event: &EventType, rng: &mut R) -> Result<f64> {
        let range = self.range_for(event)?;
        Ok(rng.gen_range(range.min..range.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EventConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_samples_stay_in_event_range() {
        let expected = [
            ("Spider", 85.0, 100.0),
            ("Explosion", 100.0, 120.0),
            ("Creaking Door", 75.0, 85.0),
            ("Cheerful Music", 65.0, 75.0),
            ("Fast Chase", 90.0, 110.0),
        ];
        let model = SignalModel::from_config(&SessionConfig::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for (name, min, max) in expected {
            let event = EventType::from(name);
            assert_eq!(model.range_for(&event).unwrap(), SignalRange::new(min, max), "{}", name);
            for _ in 0..500 {
                let bpm = model.sample(&event, &mut rng).unwrap();
                assert!(bpm >= min && bpm < max, "{} bpm {} out of range", name, bpm);
            }
        }
    }

    #[test]
    fn test_unranged_event_uses_neutral_range() {
        let config = SessionConfig {
            events: vec![EventConfig::new("Spider", 85.0, 100.0), EventConfig::unranged("Whisper")],
            ..Default::default()
        };
        let model = SignalModel::from_config(&config).unwrap();
        assert_eq!(model.range_for(&"Whisper".into()).unwrap(), SignalRange::new(70.0, 90.0));

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let bpm = model.sample(&"Whisper".into(), &mut rng).unwrap();
            assert!(model.neutral_range().contains(bpm));
        }
    }

    #[test]
    fn test_event_outside_catalog_is_an_error() {
        let model = SignalModel::from_config(&SessionConfig::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = model.sample(&"Ghost".into(), &mut rng).unwrap_err();
        assert!(matches!(err, DreadError::UnrecognizedEvent(_)));
    }

    #[test]
    fn test_range_for_event_outside_catalog_rejected_at_build() {
        let catalog = EventCatalog::from_names(&["Spider"]).unwrap();
        let ranges = [(EventType::from("Ghost"), SignalRange::new(1.0, 2.0))];
        let result = SignalModel::new(catalog, &ranges, SignalRange::new(70.0, 90.0));
        assert!(result.is_err());
    }
}
