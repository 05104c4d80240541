//! Rolling frame-rate estimate

use std::collections::VecDeque;

const WINDOW: usize = 60;

/// FPS over the last 60 frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: VecDeque<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(WINDOW + 1),
        }
    }

    /// Record a frame at `now_ms`
    pub fn tick(&mut self, now_ms: f64) {
        self.frames.push_back(now_ms);
        if self.frames.len() > WINDOW {
            self.frames.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_frame_report_zero() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0.0);
        fps.tick(10.0);
        assert_eq!(fps.fps(), 0.0);
    }

    #[test]
    fn steady_sixty_hz() {
        let mut fps = FpsCounter::new();
        for i in 0..200 {
            fps.tick(i as f64 * 1000.0 / 60.0);
        }
        assert!((fps.fps() - 60.0).abs() < 1e-6);
    }
}
