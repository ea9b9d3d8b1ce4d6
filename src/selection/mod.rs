//! Weighted event selection
//!
//! The weight table is the only state the adaptation loop mutates. The
//! selector reads it once per tick to draw the next event.

pub mod selector;
pub mod weights;

pub use selector::EventSelector;
pub use weights::{EventWeight, WeightTable};
