//! Dread Engine - adaptive horror pacing
//!
//! Simulates a timeline of scare events and the heart rate they provoke,
//! fits a regression of heart rate on (event, time) at checkpoints, and
//! shifts event weights toward whatever the model says raises it most.

pub mod adaptation;
pub mod core;
pub mod events;
pub mod selection;
pub mod sensor;
pub mod session;
pub mod signal;
pub mod simulation;
pub mod training;

pub use crate::core::config::SessionConfig;
pub use crate::core::error::{DreadError, Result};
pub use crate::core::types::{EventType, Tick};
pub use crate::session::{SessionController, SessionReport};
