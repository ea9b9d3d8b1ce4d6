use glam::Vec3;

use crate::core::error::Result;
use crate::core::types::EventType;
use crate::events::EventCatalog;

/// Observer position and facing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }
}

/// Line-of-sight blocker query, answered by the host engine
pub trait OcclusionTest {
    fn is_occluded(&self, from: Vec3, to: Vec3) -> bool;
}

/// Open space: nothing ever blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcclusion;

impl OcclusionTest for NoOcclusion {
    fn is_occluded(&self, _from: Vec3, _to: Vec3) -> bool {
        false
    }
}

/// Produces one bool per tick: is any threat in view?
pub trait VisibilitySensor {
    fn any_visible(&self, observer: &Pose, targets: &[Vec3]) -> bool;
}

/// Field-of-view cone with a distance cutoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCone {
    /// Full cone angle in degrees
    pub fov_degrees: f32,
    pub max_distance: f32,
}

impl Default for ViewCone {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            max_distance: 20.0,
        }
    }
}

impl ViewCone {
    /// Strictly inside half the cone angle and strictly closer than the cutoff
    pub fn contains(&self, observer: &Pose, target: Vec3) -> bool {
        let direction = target - observer.position;
        let distance = direction.length();
        if distance >= self.max_distance {
            return false;
        }
        if distance <= f32::EPSILON {
            return true;
        }
        let angle = observer.forward.angle_between(direction).to_degrees();
        angle < self.fov_degrees / 2.0
    }
}

pub struct ConeSensor<O: OcclusionTest> {
    pub cone: ViewCone,
    occlusion: O,
}

impl<O: OcclusionTest> ConeSensor<O> {
    pub fn new(cone: ViewCone, occlusion: O) -> Self {
        Self { cone, occlusion }
    }
}

impl<O: OcclusionTest> VisibilitySensor for ConeSensor<O> {
    fn any_visible(&self, observer: &Pose, targets: &[Vec3]) -> bool {
        targets.iter().any(|&target| {
            self.cone.contains(observer, target)
                && !self.occlusion.is_occluded(observer.position, target)
        })
    }
}

/// Maps the sensor bool onto a two-event catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityEventMapper {
    pub visible: EventType,
    pub hidden: EventType,
}

impl Default for VisibilityEventMapper {
    fn default() -> Self {
        Self {
            visible: EventType::from("Spider"),
            hidden: EventType::from("Calm"),
        }
    }
}

impl VisibilityEventMapper {
    pub fn map(&self, visible: bool) -> &EventType {
        if visible {
            &self.visible
        } else {
            &self.hidden
        }
    }

    pub fn catalog(&self) -> Result<EventCatalog> {
        EventCatalog::new([self.visible.clone(), self.hidden.clone()])
    }
}
