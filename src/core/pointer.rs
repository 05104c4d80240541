//! Pointer tracking - last position, timing and velocity estimate

/// Longest gap (ms) used as velocity denominator after an idle pointer
pub const MAX_ELAPSED_MS: f64 = 50.0;

/// Last known pointer state, updated on every move
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    /// Velocity estimate in px/ms
    pub vx: f64,
    pub vy: f64,
    pub last_time_ms: f64,
}

/// One pointer move relative to the previous recorded position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerMotion {
    pub from_x: f64,
    pub from_y: f64,
    pub dx: f64,
    pub dy: f64,
    pub distance: f64,
    /// Clamped to `0..=MAX_ELAPSED_MS`
    pub elapsed_ms: f64,
    pub vx: f64,
    pub vy: f64,
}

impl PointerState {
    /// Pointer at the origin, timed from `now_ms`
    pub fn new(now_ms: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            last_time_ms: now_ms,
        }
    }

    /// Record a move to `(x, y)` at `now_ms`
    pub fn update(&mut self, x: f64, y: f64, now_ms: f64) -> PointerMotion {
        let elapsed_ms = (now_ms - self.last_time_ms).clamp(0.0, MAX_ELAPSED_MS);
        let dx = x - self.x;
        let dy = y - self.y;
        let distance = dx.hypot(dy);

        let (vx, vy) = if elapsed_ms > 0.0 {
            (dx / elapsed_ms, dy / elapsed_ms)
        } else {
            (0.0, 0.0)
        };

        let motion = PointerMotion {
            from_x: self.x,
            from_y: self.y,
            dx,
            dy,
            distance,
            elapsed_ms,
            vx,
            vy,
        };

        *self = Self {
            x,
            y,
            vx,
            vy,
            last_time_ms: now_ms,
        };
        motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_is_displacement_over_elapsed() {
        let mut pointer = PointerState::new(0.0);
        let motion = pointer.update(30.0, 40.0, 10.0);
        assert!((motion.distance - 50.0).abs() < 1e-9);
        assert_eq!(motion.elapsed_ms, 10.0);
        assert_eq!((motion.vx, motion.vy), (3.0, 4.0));
        assert_eq!((pointer.x, pointer.y), (30.0, 40.0));
        assert_eq!(pointer.last_time_ms, 10.0);
    }

    #[test]
    fn idle_gap_is_clamped() {
        let mut pointer = PointerState::new(0.0);
        let motion = pointer.update(100.0, 0.0, 5_000.0);
        assert_eq!(motion.elapsed_ms, MAX_ELAPSED_MS);
        assert_eq!(motion.vx, 2.0);
        // Timestamp still advances to the real time
        assert_eq!(pointer.last_time_ms, 5_000.0);
    }

    #[test]
    fn zero_elapsed_gives_zero_velocity() {
        let mut pointer = PointerState::new(100.0);
        let motion = pointer.update(9.0, 12.0, 100.0);
        assert!((motion.distance - 15.0).abs() < 1e-9);
        assert_eq!((motion.vx, motion.vy), (0.0, 0.0));
    }

    #[test]
    fn clock_going_backwards_counts_as_zero_elapsed() {
        let mut pointer = PointerState::new(100.0);
        let motion = pointer.update(5.0, 0.0, 90.0);
        assert_eq!(motion.elapsed_ms, 0.0);
        assert_eq!(motion.vx, 0.0);
    }

    #[test]
    fn motion_starts_from_previous_position() {
        let mut pointer = PointerState::new(0.0);
        pointer.update(10.0, 10.0, 16.0);
        let motion = pointer.update(13.0, 14.0, 32.0);
        assert_eq!((motion.from_x, motion.from_y), (10.0, 10.0));
        assert_eq!((motion.dx, motion.dy), (3.0, 4.0));
        assert!((motion.distance - 5.0).abs() < 1e-9);
    }
}
