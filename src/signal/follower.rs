//! Displayed heart rate that eases toward a rest or stress target
//!
//! Raw samples jump between event ranges. A HUD wants a value that moves
//! at a bounded rate instead, so smoothing lives here, on the caller side.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRateFollower {
    /// Target when nothing frightening is in view
    pub rest_bpm: f32,
    /// Target while a threat is in view
    pub stress_bpm: f32,
    /// Maximum change per second
    pub rate_per_sec: f32,
    current: f32,
}

impl Default for HeartRateFollower {
    fn default() -> Self {
        Self::new(60.0, 120.0, 30.0)
    }
}

impl HeartRateFollower {
    pub fn new(rest_bpm: f32, stress_bpm: f32, rate_per_sec: f32) -> Self {
        Self {
            rest_bpm,
            stress_bpm,
            rate_per_sec,
            current: rest_bpm,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Step toward the stress or rest target
    pub fn update(&mut self, threat_visible: bool, dt_secs: f32) -> f32 {
        let target = if threat_visible { self.stress_bpm } else { self.rest_bpm };
        self.follow(target, dt_secs)
    }

    /// Step toward an arbitrary target, e.g. a sampled heart rate
    pub fn follow(&mut self, target: f32, dt_secs: f32) -> f32 {
        self.current = move_towards(self.current, target, self.rate_per_sec * dt_secs);
        self.current
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_rest() {
        assert_eq!(HeartRateFollower::default().current(), 60.0);
    }

    #[test]
    fn test_rises_at_bounded_rate() {
        let mut follower = HeartRateFollower::default();
        assert_eq!(follower.update(true, 1.0), 90.0);
        assert_eq!(follower.update(true, 1.0), 120.0);
        // Does not overshoot
        assert_eq!(follower.update(true, 1.0), 120.0);
    }

    #[test]
    fn test_returns_to_rest() {
        let mut follower = HeartRateFollower::default();
        follower.update(true, 2.0);
        assert_eq!(follower.update(false, 0.5), 105.0);
        assert_eq!(follower.update(false, 10.0), 60.0);
    }

    #[test]
    fn test_follow_sampled_signal() {
        let mut follower = HeartRateFollower::new(60.0, 120.0, 10.0);
        assert_eq!(follower.follow(95.0, 1.0), 70.0);
        assert_eq!(follower.follow(65.0, 1.0), 65.0);
    }
}
