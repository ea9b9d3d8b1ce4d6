//! Timeline simulation

pub mod timeline;

pub use timeline::{Sample, Timeline, TimelineSimulator};
