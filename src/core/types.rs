//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Session tick counter (one simulated second per tick)
pub type Tick = u64;

/// Named category of in-game event ("Spider", "Explosion", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(String);

impl EventType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_display_matches_name() {
        let event = EventType::new("Creaking Door");
        assert_eq!(event.to_string(), "Creaking Door");
        assert_eq!(event.as_str(), "Creaking Door");
    }

    #[test]
    fn test_event_type_serializes_as_plain_string() {
        let json = serde_json::to_string(&EventType::from("Spider")).unwrap();
        assert_eq!(json, "\"Spider\"");
    }
}
