use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{DreadError, Result};
use crate::core::types::EventType;

/// Ordered, duplicate-free set of event types
///
/// The order is load-bearing: it fixes the selector's cumulative walk and
/// the one-hot column of each event in the training matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCatalog {
    events: Vec<EventType>,
}

impl EventCatalog {
    pub fn new(events: impl IntoIterator<Item = EventType>) -> Result<Self> {
        let mut ordered: Vec<EventType> = Vec::new();
        for event in events {
            if ordered.contains(&event) {
                return Err(DreadError::InvalidConfig(format!("duplicate event '{}'", event)));
            }
            ordered.push(event);
        }
        if ordered.is_empty() {
            return Err(DreadError::InvalidConfig("event catalog is empty".into()));
        }
        Ok(Self { events: ordered })
    }

    /// Convenience constructor from names
    pub fn from_names(names: &[&str]) -> Result<Self> {
        Self::new(names.iter().map(|n| EventType::from(*n)))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn index_of(&self, event: &EventType) -> Option<usize> {
        self.events.iter().position(|e| e == event)
    }

    pub fn contains(&self, event: &EventType) -> bool {
        self.index_of(event).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&EventType> {
        self.events.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventType> {
        self.events.iter()
    }

    /// Uniform pick over the catalog, ignoring weights
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &EventType {
        // Non-empty by construction
        &self.events[rng.gen_range(0..self.events.len())]
    }
}
