//! Ball motion as a pure function of spin progress.
//!
//! The ball starts `spin_multiplier` radians ahead of its target and eases
//! onto it with a cubic ease-out, so angular speed only ever decreases. Near
//! the end it drops from the outer track to the resting radius.

use glam::DVec2;
use keyframe::{ease, functions::EaseOutCubic};
use std::f64::consts::FRAC_PI_2;

use crate::config::{SpinConfig, WheelConfig};
use crate::geometry::polar_to_cartesian;

/// Position of the moving element for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallFrame {
    pub angle: f64,
    pub radius: f64,
    pub position: DVec2,
}

impl BallFrame {
    pub fn at(angle: f64, radius: f64) -> Self {
        Self { angle, radius, position: polar_to_cartesian(angle, radius) }
    }
}

/// `1 - (1 - progress)^3`, with `progress` clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    ease(EaseOutCubic, 0.0, 1.0, progress.clamp(0.0, 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    pub spin_multiplier: f64,
    pub outer_radius: f64,
    pub resting_radius: f64,
    pub drop_threshold: f64,
    pub radial_drop: bool,
}

impl MotionProfile {
    pub fn new(spin: &SpinConfig, wheel: &WheelConfig) -> Self {
        Self {
            spin_multiplier: spin.spin_multiplier(),
            outer_radius: wheel.outer_ball_radius(),
            resting_radius: wheel.resting_radius(),
            drop_threshold: spin.drop_threshold,
            radial_drop: spin.radial_drop,
        }
    }

    /// Radius used before the drop starts.
    fn track_radius(&self) -> f64 {
        if self.radial_drop {
            self.outer_radius
        } else {
            self.resting_radius
        }
    }

    /// Where the element waits between spins: top of the wheel, on the outer track.
    pub fn home(&self) -> BallFrame {
        BallFrame::at(-FRAC_PI_2, self.track_radius())
    }

    pub fn angle_at(&self, eased: f64, target_angle: f64) -> f64 {
        (1.0 - eased) * self.spin_multiplier + eased * target_angle
    }

    pub fn radius_at(&self, eased: f64) -> f64 {
        if !self.radial_drop {
            return self.resting_radius;
        }
        if eased < self.drop_threshold {
            return self.outer_radius;
        }
        let drop = ((eased - self.drop_threshold) / (1.0 - self.drop_threshold)).min(1.0);
        self.outer_radius - drop * (self.outer_radius - self.resting_radius)
    }

    /// Frame for a progress fraction of the spin duration.
    ///
    /// At `progress >= 1` this is exactly [`MotionProfile::resting`], not the
    /// interpolated value, so the final frame carries no rounding error.
    pub fn sample(&self, progress: f64, target_angle: f64) -> BallFrame {
        if progress >= 1.0 {
            return self.resting(target_angle);
        }
        let eased = ease_out_cubic(progress);
        BallFrame::at(self.angle_at(eased, target_angle), self.radius_at(eased))
    }

    pub fn resting(&self, target_angle: f64) -> BallFrame {
        BallFrame::at(target_angle, self.resting_radius)
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::new(&SpinConfig::default(), &WheelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert!(ease_out_cubic(0.0).abs() < EPS);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < EPS);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < EPS);
    }

    #[test]
    fn test_ease_out_cubic_clamps() {
        assert!(ease_out_cubic(-0.5).abs() < EPS);
        assert!((ease_out_cubic(2.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_ease_out_cubic_decelerates() {
        let steps: Vec<f64> = (0..=100).map(|i| ease_out_cubic(i as f64 / 100.0)).collect();
        let deltas: Vec<f64> = steps.windows(2).map(|w| w[1] - w[0]).collect();

        assert!(deltas.iter().all(|&d| d >= 0.0));
        for pair in deltas.windows(2) {
            assert!(pair[1] <= pair[0] + EPS);
        }
    }

    #[test]
    fn test_sample_starts_at_spin_multiplier() {
        let profile = MotionProfile::default();
        let frame = profile.sample(0.0, 1.0);
        assert!((frame.angle - 20.0 * PI).abs() < EPS);
        assert_eq!(frame.radius, 160.0);
    }

    #[test]
    fn test_angle_decreases_monotonically() {
        let profile = MotionProfile::default();
        let target = 0.3;
        let mut last = f64::INFINITY;
        for i in 0..=1000 {
            let frame = profile.sample(i as f64 / 1000.0, target);
            assert!(frame.angle <= last);
            last = frame.angle;
        }
        assert_eq!(last, target);
    }

    #[test]
    fn test_radius_holds_then_drops() {
        let profile = MotionProfile::default();
        assert_eq!(profile.radius_at(0.0), 160.0);
        assert_eq!(profile.radius_at(0.89), 160.0);
        assert!((profile.radius_at(0.95) - 150.0).abs() < EPS);
        assert!((profile.radius_at(1.0) - 140.0).abs() < EPS);
    }

    #[test]
    fn test_final_sample_is_exact_resting_point() {
        let profile = MotionProfile::default();
        let target = 2.5;
        let frame = profile.sample(1.0, target);

        assert_eq!(frame.angle, target);
        assert_eq!(frame.radius, 140.0);
        assert_eq!(frame.position, polar_to_cartesian(target, 140.0));
        assert_eq!(profile.sample(7.0, target), frame);
    }

    #[test]
    fn test_pointer_mode_keeps_radius() {
        let spin = SpinConfig { radial_drop: false, ..SpinConfig::default() };
        let profile = MotionProfile::new(&spin, &WheelConfig::default());

        assert_eq!(profile.home().radius, 140.0);
        for i in 0..=10 {
            assert_eq!(profile.sample(i as f64 / 10.0, 1.0).radius, 140.0);
        }
    }

    #[test]
    fn test_home_is_top_of_wheel() {
        let home = MotionProfile::default().home();
        assert!(home.position.x.abs() < EPS);
        assert!((home.position.y + 160.0).abs() < EPS);
    }
}
