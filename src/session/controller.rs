use serde::{Deserialize, Serialize};

use crate::adaptation::AdaptationPolicy;
use crate::core::config::SessionConfig;
use crate::core::error::Result;
use crate::core::types::Tick;
use crate::selection::{EventSelector, WeightTable};
use crate::session::report::{CheckpointOutcome, CheckpointReport, SessionReport};
use crate::signal::SignalModel;
use crate::simulation::{Sample, Timeline, TimelineSimulator};
use crate::training::{ImpactEstimator, LeastSquaresRegressor, Regressor};

/// Largest timeline preallocation; longer sessions grow on demand
const TIMELINE_CAPACITY_HINT: Tick = 4096;

/// `Training` only lasts for the duration of a checkpoint inside `step`, so
/// callers between steps see `Running` or `Completed`. The checkpoint's
/// tracing span carries the `Training` phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Running,
    Training,
    Completed,
}

/// Owns every piece of session state; nothing is shared or global
pub struct SessionController {
    config: SessionConfig,
    simulator: TimelineSimulator,
    estimator: ImpactEstimator,
    policy: AdaptationPolicy,
    timeline: Timeline,
    checkpoints: Vec<CheckpointReport>,
    phase: SessionPhase,
    next_tick: Tick,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let regressor = LeastSquaresRegressor::with_ridge(config.ridge);
        Self::with_regressor(config, Box::new(regressor))
    }

    /// Build a session around a custom regression capability
    pub fn with_regressor(config: SessionConfig, regressor: Box<dyn Regressor>) -> Result<Self> {
        config.validate()?;

        let catalog = config.catalog()?;
        let weights = WeightTable::uniform(catalog.clone(), config.weight_floor);
        let signal = SignalModel::from_config(&config)?;
        let simulator = TimelineSimulator::new(EventSelector::new(weights), signal, config.seed);
        let estimator = ImpactEstimator::new(catalog, regressor, config.min_training_samples);
        let policy = AdaptationPolicy::from_config(&config);

        tracing::info!(
            "Session start: {} events, {} ticks, first checkpoint at t={}, seed {}",
            config.events.len(),
            config.duration_ticks,
            config.checkpoint_tick(),
            config.seed
        );

        Ok(Self {
            timeline: Timeline::with_capacity(
                config.duration_ticks.min(TIMELINE_CAPACITY_HINT) as usize,
            ),
            config,
            simulator,
            estimator,
            policy,
            checkpoints: Vec::new(),
            phase: SessionPhase::Running,
            next_tick: 0,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Tick the next `step` will record
    pub fn current_tick(&self) -> Tick {
        self.next_tick
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn weights(&self) -> &WeightTable {
        self.simulator.selector().weights()
    }

    pub fn checkpoints(&self) -> &[CheckpointReport] {
        &self.checkpoints
    }

    /// Record one tick, running a checkpoint if this tick is one
    ///
    /// Returns `None` once the session has completed.
    pub fn step(&mut self) -> Result<Option<Sample>> {
        if self.phase == SessionPhase::Completed {
            return Ok(None);
        }

        let tick = self.next_tick;
        let sample = self.simulator.tick(tick)?;
        tracing::debug!(
            "t={} bpm={:.1} event={}",
            sample.time,
            sample.signal,
            sample.event
        );
        self.timeline.push(sample.clone())?;
        self.next_tick += 1;

        if self.config.is_checkpoint(tick) {
            self.checkpoint(tick);
        }

        if self.next_tick >= self.config.duration_ticks {
            self.phase = SessionPhase::Completed;
            tracing::info!("Session complete after {} ticks", self.timeline.len());
        }

        Ok(Some(sample))
    }

    /// Run to completion
    pub fn run(mut self) -> Result<SessionReport> {
        while self.step()?.is_some() {}
        Ok(self.into_report())
    }

    pub fn into_report(self) -> SessionReport {
        SessionReport {
            seed: self.config.seed,
            duration_ticks: self.config.duration_ticks,
            final_weights: self.simulator.selector().weights().snapshot(),
            samples: self.timeline.into_samples(),
            checkpoints: self.checkpoints,
        }
    }

    /// Train on everything recorded so far and adapt the weights
    ///
    /// A failed checkpoint is skipped; the weights stay as they were.
    fn checkpoint(&mut self, tick: Tick) {
        self.phase = SessionPhase::Training;
        let span = tracing::info_span!("checkpoint", tick, phase = ?self.phase);
        let _entered = span.enter();
        tracing::info!("Checkpoint at t={}: training on {} samples", tick, self.timeline.len());

        let outcome = match self.train_and_adapt() {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Checkpoint at t={} skipped: {}", tick, e);
                CheckpointOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        };

        let report = CheckpointReport {
            tick,
            samples_used: self.timeline.len(),
            outcome,
        };
        tracing::debug!("{}", report.summary());
        self.checkpoints.push(report);
        self.phase = SessionPhase::Running;
    }

    fn train_and_adapt(&mut self) -> Result<CheckpointOutcome> {
        let impacts = self.estimator.estimate(self.timeline.samples())?;
        if impacts.degenerate_predictions > 0 {
            tracing::warn!(
                "{} near-zero predictions at this checkpoint; adapting anyway",
                impacts.degenerate_predictions
            );
        }
        let changes = self
            .policy
            .adapt(self.simulator.selector_mut().weights_mut(), &impacts)?;
        Ok(CheckpointOutcome::Adapted { impacts, changes })
    }
}
