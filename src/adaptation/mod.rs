//! Weight adaptation from estimated impacts

pub mod policy;

pub use policy::{AdaptationPolicy, WeightChange};
