//! Integration seam for an engine-side threat sensor
//!
//! The adaptive loop never reads this directly. A game layer can feed the
//! per-tick visibility bool into a two-level event catalog or into a
//! `HeartRateFollower`.

pub mod visibility;

pub use visibility::{
    ConeSensor, NoOcclusion, OcclusionTest, Pose, ViewCone, VisibilityEventMapper, VisibilitySensor,
};
