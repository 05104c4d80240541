//! Trail simulator - emits points on pointer moves, steps and paints them
//! once per animation frame.

use serde::Serialize;
use tracing::{debug, trace};

use super::point::TrailPoint;
use super::pointer::{PointerMotion, PointerState};
use super::style::FADE_FILL;
use super::surface::Surface;

/// Hard cap on live points after a move
pub const MAX_POINTS: usize = 800;

/// Live points kept when the cap is exceeded
pub const TRIM_TO: usize = 600;

/// Most points emitted for a single move
pub const MAX_EMIT_PER_MOVE: usize = 5;

/// One point per this many pixels travelled
pub const EMIT_SPACING: f64 = 3.0;

pub const BASE_RADIUS: f64 = 8.0;

/// Extra radius per pixel travelled in one move
pub const RADIUS_PER_DISTANCE: f64 = 0.4;

/// Share of pointer velocity inherited by new points
pub const MOMENTUM: f64 = 0.3;

/// Lifetime counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrailStats {
    pub emitted: u64,
    /// Removed after fading out
    pub expired: u64,
    /// Removed by batch trims
    pub trimmed: u64,
    pub trims: u64,
    pub frames: u64,
}

impl PointerMotion {
    /// Points to emit: `min(ceil(distance / 3), 5)`
    pub fn emission_count(&self) -> usize {
        let count = (self.distance / EMIT_SPACING).ceil();
        if count <= 0.0 {
            0
        } else {
            (count as usize).min(MAX_EMIT_PER_MOVE)
        }
    }

    /// Radius shared by all points of this move
    pub fn point_radius(&self) -> f64 {
        BASE_RADIUS + self.distance * RADIUS_PER_DISTANCE
    }
}

/// Bounded set of trail points plus the pointer state feeding it
#[derive(Debug)]
pub struct TrailSimulator {
    /// Oldest first
    points: Vec<TrailPoint>,
    pointer: PointerState,
    stats: TrailStats,
}

impl TrailSimulator {
    /// Empty trail with the pointer timed from `now_ms`
    pub fn new(now_ms: f64) -> Self {
        Self {
            points: Vec::with_capacity(MAX_POINTS + MAX_EMIT_PER_MOVE),
            pointer: PointerState::new(now_ms),
            stats: TrailStats::default(),
        }
    }

    /// Handle a pointer move, returns the number of points emitted
    pub fn on_pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> usize {
        let motion = self.pointer.update(x, y, now_ms);
        let count = motion.emission_count();
        let radius = motion.point_radius();
        let (vx, vy) = (motion.vx * MOMENTUM, motion.vy * MOMENTUM);

        for i in 0..count {
            let t = i as f64 / count as f64;
            self.points.push(TrailPoint::new(
                motion.from_x + motion.dx * t,
                motion.from_y + motion.dy * t,
                radius,
                vx,
                vy,
            ));
        }
        self.stats.emitted += count as u64;

        trace!(
            x,
            y,
            distance = motion.distance,
            elapsed_ms = motion.elapsed_ms,
            count,
            live = self.points.len(),
            "Pointer move"
        );

        if self.points.len() > MAX_POINTS {
            let dropped = self.points.len() - TRIM_TO;
            self.points.drain(..dropped);
            self.stats.trimmed += dropped as u64;
            self.stats.trims += 1;
            debug!(dropped, live = self.points.len(), "Trail trimmed");
        }

        count
    }

    /// Step every point by one frame and paint it onto `surface`
    pub fn on_animation_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.fade(FADE_FILL);

        // Reverse order: removing index i never shifts an unvisited index
        for i in (0..self.points.len()).rev() {
            let point = &mut self.points[i];
            point.step();
            surface.draw_point(&point.sprite());

            if point.is_expired() {
                self.points.remove(i);
                self.stats.expired += 1;
            }
        }

        self.stats.frames += 1;
    }

    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn stats(&self) -> TrailStats {
        self.stats
    }
}
