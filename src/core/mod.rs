pub mod config;
pub mod error;
pub mod types;

pub use config::{EventConfig, SessionConfig, SignalRange};
pub use error::{DreadError, Result};
pub use types::{EventType, Tick};
