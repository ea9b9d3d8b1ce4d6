//! Per-event selection weights

use serde::{Deserialize, Serialize};

use crate::core::error::{DreadError, Result};
use crate::core::types::EventType;
use crate::events::EventCatalog;

/// One (event, weight) pair, used for reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWeight {
    pub event: EventType,
    pub weight: u32,
}

/// Integer weight per catalog event
///
/// Every catalog event has exactly one entry and no weight ever drops
/// below the floor, so every event stays selectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    catalog: EventCatalog,
    /// Indexed like the catalog
    weights: Vec<u32>,
    floor: u32,
}

impl WeightTable {
    /// Every event starts at the floor (1 by default)
    pub fn uniform(catalog: EventCatalog, floor: u32) -> Self {
        let floor = floor.max(1);
        let weights = vec![floor; catalog.len()];
        Self { catalog, weights, floor }
    }

    /// Build from explicit weights; unlisted events start at the floor
    pub fn with_weights(
        catalog: EventCatalog,
        floor: u32,
        initial: &[(EventType, u32)],
    ) -> Result<Self> {
        let mut table = Self::uniform(catalog, floor);
        for (event, weight) in initial {
            table.set(event, *weight)?;
        }
        Ok(table)
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn get(&self, event: &EventType) -> Option<u32> {
        self.catalog.index_of(event).map(|i| self.weights[i])
    }

    /// Set a weight, clamped to the floor. Returns the stored value.
    pub fn set(&mut self, event: &EventType, weight: u32) -> Result<u32> {
        let idx = self.index(event)?;
        self.weights[idx] = weight.max(self.floor);
        Ok(self.weights[idx])
    }

    pub fn increase(&mut self, event: &EventType, amount: u32) -> Result<u32> {
        let idx = self.index(event)?;
        self.weights[idx] = self.weights[idx].saturating_add(amount);
        Ok(self.weights[idx])
    }

    /// Decrease a weight, never below the floor
    pub fn decrease(&mut self, event: &EventType, amount: u32) -> Result<u32> {
        let idx = self.index(event)?;
        self.weights[idx] = self.weights[idx].saturating_sub(amount).max(self.floor);
        Ok(self.weights[idx])
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().map(|&w| w as u64).sum()
    }

    pub fn min_weight(&self) -> u32 {
        self.weights.iter().copied().min().unwrap_or(0)
    }

    /// `sum > 0` and `min >= floor`
    pub fn holds_invariant(&self) -> bool {
        self.total() > 0 && self.min_weight() >= self.floor
    }

    /// Iterate in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&EventType, u32)> {
        self.catalog.iter().zip(self.weights.iter().copied())
    }

    pub fn snapshot(&self) -> Vec<EventWeight> {
        self.iter()
            .map(|(event, weight)| EventWeight { event: event.clone(), weight })
            .collect()
    }

    fn index(&self, event: &EventType) -> Result<usize> {
        self.catalog
            .index_of(event)
            .ok_or_else(|| DreadError::UnrecognizedEvent(event.clone()))
    }
}
