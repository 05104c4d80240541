//! A single trail particle

use super::style::PointSprite;

/// Age added per animation frame (full fade over 50 frames)
pub const AGE_STEP: f64 = 0.02;

/// Per-frame velocity multiplier (friction)
pub const VELOCITY_DECAY: f64 = 0.95;

/// Points older than this are removed
pub const MAX_AGE: f64 = 1.0;

/// Transient particle following the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
    /// Grows by [`AGE_STEP`] each frame, drives the fade
    pub age: f64,
    /// Fixed at emission
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
}

impl TrailPoint {
    pub fn new(x: f64, y: f64, radius: f64, vx: f64, vy: f64) -> Self {
        Self {
            x,
            y,
            age: 0.0,
            radius,
            vx,
            vy,
        }
    }

    /// Advance one frame: age, apply friction, integrate position
    #[inline]
    pub fn step(&mut self) {
        self.age += AGE_STEP;
        self.vx *= VELOCITY_DECAY;
        self.vy *= VELOCITY_DECAY;
        self.x += self.vx;
        self.y += self.vy;
    }

    #[inline]
    pub fn opacity(&self) -> f64 {
        (1.0 - self.age).max(0.0)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age > MAX_AGE
    }

    pub fn sprite(&self) -> PointSprite {
        PointSprite {
            x: self.x,
            y: self.y,
            radius: self.radius,
            opacity: self.opacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_decays_geometrically() {
        let mut p = TrailPoint::new(0.0, 0.0, 8.0, 2.0, -1.0);
        for _ in 0..10 {
            p.step();
        }
        let factor = VELOCITY_DECAY.powi(10);
        assert!((p.vx - 2.0 * factor).abs() < 1e-12);
        assert!((p.vy + factor).abs() < 1e-12);
    }

    #[test]
    fn position_integrates_decayed_velocity() {
        let mut p = TrailPoint::new(10.0, 10.0, 8.0, 1.0, 0.0);
        p.step();
        assert!((p.x - 10.95).abs() < 1e-12);
        p.step();
        assert!((p.x - (10.95 + 0.9025)).abs() < 1e-12);
        assert_eq!(p.y, 10.0);
    }

    #[test]
    fn opacity_strictly_decreases_until_zero() {
        let mut p = TrailPoint::new(0.0, 0.0, 8.0, 0.0, 0.0);
        let mut prev = p.opacity();
        assert_eq!(prev, 1.0);
        while p.opacity() > 0.0 {
            p.step();
            assert!(p.opacity() < prev);
            prev = p.opacity();
        }
        p.step();
        assert_eq!(p.opacity(), 0.0);
        assert!(p.is_expired());
    }

    #[test]
    fn expires_only_past_max_age() {
        let mut p = TrailPoint::new(0.0, 0.0, 8.0, 0.0, 0.0);
        for _ in 0..49 {
            p.step();
        }
        assert!(!p.is_expired());
        p.step();
        p.step();
        assert!(p.is_expired());
    }
}
