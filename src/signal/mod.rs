//! Heart-rate signal: per-event sampling and caller-side smoothing

pub mod follower;
pub mod model;

pub use follower::HeartRateFollower;
pub use model::SignalModel;
