//! Heading indicator state
//!
//! The needle angle accumulates instead of wrapping at 360, so every update
//! turns the needle along the shorter arc and the eased animation never
//! swings the long way round.

use crate::consts::cli_consts::{NEEDLE_EASING, NEEDLE_SNAP_DEGREES};

/// Signed turn from `rotation` to `target`, at most 180 degrees either way.
/// Targets outside `0..360` are wrapped first.
pub fn shortest_rotation(rotation: f64, target: f64) -> f64 {
    let delta = target.rem_euclid(360.0) - rotation.rem_euclid(360.0);
    if delta.abs() > 180.0 {
        if delta > 0.0 { delta - 360.0 } else { delta + 360.0 }
    } else {
        delta
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadingIndicator {
    /// Accumulated rotation, degrees clockwise from north.
    rotation: f64,
    /// Angle currently drawn, trailing `rotation`.
    displayed: f64,
}

impl HeadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns toward a new heading in degrees. Returns the applied delta.
    pub fn update(&mut self, target: f64) -> f64 {
        let delta = shortest_rotation(self.rotation, target);
        self.rotation += delta;
        delta
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    /// Moves the drawn angle one animation step toward the rotation.
    pub fn ease(&mut self) {
        let remaining = self.rotation - self.displayed;
        if remaining.abs() < NEEDLE_SNAP_DEGREES {
            self.displayed = self.rotation;
        } else {
            self.displayed += remaining * NEEDLE_EASING;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn crosses_north_the_short_way() {
        let mut heading = HeadingIndicator::new();
        assert_close(heading.update(350.0), -10.0);
        assert_close(heading.rotation(), -10.0);
        assert_close(heading.update(10.0), 20.0);
        assert_close(heading.rotation(), 10.0);
    }

    #[test]
    fn keeps_accumulating_past_full_turns() {
        let mut heading = HeadingIndicator::new();
        for target in [90.0, 180.0, 270.0, 0.0, 90.0] {
            heading.update(target);
        }
        assert_close(heading.rotation(), 450.0);
    }

    #[test]
    fn exact_half_turn_is_not_normalized() {
        let mut heading = HeadingIndicator::new();
        assert_close(heading.update(180.0), 180.0);
        assert_close(heading.update(0.0), -180.0);
    }

    #[test]
    fn every_step_is_short_and_lands_on_target() {
        let targets = [
            0.0, 359.9, 0.1, 180.0, 181.0, 1.0, 270.0, 90.0, 45.5, 225.5, 300.0, 120.0, 359.0,
            179.0, 0.0, 200.0, 20.0, 340.0, 160.0,
        ];
        let mut heading = HeadingIndicator::new();
        for target in targets {
            let delta = heading.update(target);
            assert!(delta.abs() <= 180.0, "delta {} for target {}", delta, target);
            let off = (heading.rotation() - target).rem_euclid(360.0);
            assert!(
                off < 1e-6 || off > 360.0 - 1e-6,
                "rotation {} does not point at {}",
                heading.rotation(),
                target
            );
        }
    }

    #[test]
    fn out_of_range_targets_wrap() {
        let mut heading = HeadingIndicator::new();
        assert_close(heading.update(720.0), 0.0);
        assert_close(heading.update(-90.0), -90.0);
        assert_close(heading.rotation(), -90.0);
        assert_close(heading.update(360.0), 90.0);
        assert_close(heading.rotation(), 0.0);
        for target in [450.0, -450.0, 1080.5, -0.5] {
            let delta = heading.update(target);
            assert!(delta.abs() <= 180.0, "delta {} for target {}", delta, target);
        }
        assert_close(heading.rotation().rem_euclid(360.0), 359.5);
    }

    #[test]
    fn easing_converges_then_snaps() {
        let mut heading = HeadingIndicator::new();
        heading.update(90.0);
        heading.ease();
        assert!(heading.displayed() > 0.0 && heading.displayed() < 90.0);
        for _ in 0..100 {
            heading.ease();
        }
        assert_close(heading.displayed(), 90.0);
    }
}
