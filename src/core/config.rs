//! Session configuration with documented defaults
//!
//! Defaults reproduce the reference horror session: five events, a ten
//! minute run at one tick per second, and a single training checkpoint
//! once a fifth of the session has been recorded.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{DreadError, Result};
use crate::core::types::{EventType, Tick};
use crate::events::EventCatalog;

/// Half-open signal range `[min, max)` in beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalRange {
    pub min: f64,
    pub max: f64,
}

impl SignalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// One catalog entry. Events without a range use the neutral range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    pub name: String,
    #[serde(default)]
    pub range: Option<SignalRange>,
}

impl EventConfig {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            range: Some(SignalRange::new(min, max)),
        }
    }

    pub fn unranged(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: None,
        }
    }
}

/// Configuration for one adaptive session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    // === CATALOG ===
    /// Ordered event catalog. Order fixes selector iteration and feature columns.
    pub events: Vec<EventConfig>,

    /// Fallback range for catalog events without their own range
    pub neutral_range: SignalRange,

    // === TIMELINE ===
    /// Total ticks in the session
    pub duration_ticks: Tick,

    /// Fraction of the session after which the first checkpoint fires
    ///
    /// At 0.2 over 600 ticks the model trains at tick 120, on 121 samples.
    pub checkpoint_fraction: f64,

    /// Ticks between follow-up checkpoints. `None` means a single checkpoint.
    pub checkpoint_every: Option<Tick>,

    // === ADAPTATION ===
    /// Average predicted impact above which an event gets reinforced
    pub high_impact_threshold: f64,

    /// Weight added to events above the threshold
    pub weight_increment: u32,

    /// Weight removed from events at or below the threshold
    pub weight_decrement: u32,

    /// No weight ever drops below this
    pub weight_floor: u32,

    // === TRAINING ===
    /// Smallest window the impact estimator will train on
    pub min_training_samples: usize,

    /// Ridge penalty for the least-squares fit (0 = plain minimum-norm solve)
    pub ridge: f64,

    /// Seed for the session RNG
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            events: vec![
                EventConfig::new("Spider", 85.0, 100.0),
                EventConfig::new("Explosion", 100.0, 120.0),
                EventConfig::new("Creaking Door", 75.0, 85.0),
                EventConfig::new("Cheerful Music", 65.0, 75.0),
                EventConfig::new("Fast Chase", 90.0, 110.0),
            ],
            neutral_range: SignalRange::new(70.0, 90.0),

            duration_ticks: 600,
            checkpoint_fraction: 0.2,
            checkpoint_every: None,

            high_impact_threshold: 90.0,
            weight_increment: 2,
            weight_decrement: 1,
            weight_floor: 1,

            min_training_samples: 1,
            ridge: 0.0,
            seed: 12345,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the ordered catalog from the configured events
    pub fn catalog(&self) -> Result<EventCatalog> {
        EventCatalog::new(self.events.iter().map(|e| EventType::new(e.name.as_str())))
    }

    /// Tick at which the first checkpoint fires
    pub fn checkpoint_tick(&self) -> Tick {
        let raw = (self.duration_ticks as f64 * self.checkpoint_fraction).floor() as Tick;
        raw.min(self.duration_ticks.saturating_sub(1))
    }

    /// Whether a checkpoint fires after the sample for `tick` is recorded
    pub fn is_checkpoint(&self, tick: Tick) -> bool {
        let first = self.checkpoint_tick();
        if tick == first {
            return true;
        }
        match self.checkpoint_every {
            Some(every) if every > 0 && tick > first => (tick - first) % every == 0,
            _ => false,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.events.is_empty() {
            return invalid("event catalog is empty".into());
        }

        let mut seen = HashSet::new();
        for event in &self.events {
            if !seen.insert(event.name.as_str()) {
                return invalid(format!("duplicate event '{}'", event.name));
            }
            if let Some(range) = event.range {
                if !range.is_valid() {
                    return invalid(format!(
                        "range for '{}' must satisfy min < max ({} .. {})",
                        event.name, range.min, range.max
                    ));
                }
            }
        }

        if !self.neutral_range.is_valid() {
            return invalid(format!(
                "neutral_range must satisfy min < max ({} .. {})",
                self.neutral_range.min, self.neutral_range.max
            ));
        }

        if self.duration_ticks == 0 {
            return invalid("duration_ticks must be > 0".into());
        }

        if !(self.checkpoint_fraction > 0.0 && self.checkpoint_fraction <= 1.0) {
            return invalid(format!(
                "checkpoint_fraction ({}) must be in (0, 1]",
                self.checkpoint_fraction
            ));
        }

        if self.checkpoint_every == Some(0) {
            return invalid("checkpoint_every must be > 0 when set".into());
        }

        if self.weight_increment < 1 || self.weight_decrement < 1 || self.weight_floor < 1 {
            return invalid("weight_increment, weight_decrement and weight_floor must be >= 1".into());
        }

        if self.min_training_samples == 0 {
            return invalid("min_training_samples must be >= 1".into());
        }

        if !(self.ridge >= 0.0 && self.ridge.is_finite()) {
            return invalid(format!("ridge ({}) must be a finite value >= 0", self.ridge));
        }

        Ok(())
    }
}

fn invalid(message: String) -> Result<()> {
    Err(DreadError::InvalidConfig(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.events.len(), 5);
    }

    #[test]
    fn test_default_checkpoint_at_twenty_percent() {
        let config = SessionConfig::default();
        assert_eq!(config.checkpoint_tick(), 120);
        assert!(config.is_checkpoint(120));
        assert!(!config.is_checkpoint(240));
    }

    #[test]
    fn test_full_fraction_clamps_to_last_tick() {
        let config = SessionConfig {
            duration_ticks: 10,
            checkpoint_fraction: 1.0,
            ..Default::default()
        };
        assert_eq!(config.checkpoint_tick(), 9);
    }

    #[test]
    fn test_periodic_checkpoints() {
        let config = SessionConfig {
            duration_ticks: 100,
            checkpoint_fraction: 0.2,
            checkpoint_every: Some(30),
            ..Default::default()
        };
        let ticks: Vec<Tick> = (0..100).filter(|&t| config.is_checkpoint(t)).collect();
        assert_eq!(ticks, vec![20, 50, 80]);
    }

    #[test]
    fn test_rejects_duplicate_events() {
        let config = SessionConfig {
            events: vec![EventConfig::unranged("Spider"), EventConfig::unranged("Spider")],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DreadError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_out_of_range_fraction() {
        for fraction in [0.0, -0.5, 1.5] {
            let config = SessionConfig {
                checkpoint_fraction: fraction,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "fraction {} should be rejected", fraction);
        }
    }

    #[test]
    fn test_rejects_zero_floor() {
        let config = SessionConfig {
            weight_floor: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml_with_partial_fields() {
        let toml_str = r#"
            duration_ticks = 10
            checkpoint_fraction = 0.2
            seed = 7

            [[events]]
            name = "Spider"
            range = { min = 85.0, max = 100.0 }

            [[events]]
            name = "Explosion"
        "#;

        let config = SessionConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.duration_ticks, 10);
        assert_eq!(config.seed, 7);
        assert_eq!(config.events.len(), 2);
        assert!(config.events[1].range.is_none());
        assert_eq!(config.high_impact_threshold, 90.0);
        assert_eq!(config.checkpoint_tick(), 2);
    }

    #[test]
    fn test_load_bundled_default_session() {
        let config = SessionConfig::load(Path::new("data/sessions/default.toml"))
            .expect("Should load bundled session config");
        assert_eq!(config.duration_ticks, 600);
        assert_eq!(config.catalog().unwrap().len(), 5);
    }
}
