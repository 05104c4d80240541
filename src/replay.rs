//! Headless replay of pointer traces
//!
//! Drives a [`TrailOverlay`] over a [`RecordingSurface`] with a simulated
//! clock, one frame per tick, feeding every pointer sample that is due.
//! Used by the CLI and as an end-to-end check of the simulator.

use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::{
    Declined, Environment, RecordingSurface, Surface, TrailOverlay, TrailStats, Viewport,
};

/// User agent reported by the headless host
const HEADLESS_AGENT: &str = "trail-cli";

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read trace {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid trace: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("frame rate must be positive, got {0}")]
    InvalidFps(f64),
    #[error("overlay declined: {0}")]
    Declined(#[from] Declined),
}

/// One pointer position at `t` milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

/// Parse a JSON array of samples
pub fn parse_trace(json: &str) -> Result<Vec<PointerSample>, ReplayError> {
    let samples: Vec<PointerSample> = serde_json::from_str(json)?;
    debug!(samples = samples.len(), "Trace parsed");
    Ok(samples)
}

pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<PointerSample>, ReplayError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_trace(&json)
}

/// Pointer circling the viewport centre, sampled every `interval_ms`.
/// The radius breathes so move distances (and trail width) vary.
pub fn synthetic_sweep(viewport: Viewport, duration_ms: f64, interval_ms: f64) -> Vec<PointerSample> {
    const PERIOD_MS: f64 = 1_500.0;

    let cx = viewport.width as f64 / 2.0;
    let cy = viewport.height as f64 / 2.0;
    let base = cx.min(cy) / 2.0;
    let steps = if interval_ms > 0.0 {
        (duration_ms / interval_ms).floor() as usize
    } else {
        0
    };

    (0..=steps)
        .map(|i| {
            let t = i as f64 * interval_ms;
            let phase = TAU * t / PERIOD_MS;
            let radius = base * (1.0 + 0.5 * (phase * 0.37).sin());
            PointerSample {
                t,
                x: cx + radius * phase.cos(),
                y: cy + radius * phase.sin(),
            }
        })
        .collect()
}

/// End-of-run report
#[derive(Clone, Debug, Serialize)]
pub struct ReplaySummary {
    pub frames: u64,
    pub duration_ms: f64,
    pub peak_live: usize,
    pub live: usize,
    pub draws: u64,
    pub viewport: Viewport,
    pub stats: TrailStats,
}

/// Trace being replayed against a simulated clock
pub struct ReplaySession {
    overlay: TrailOverlay<RecordingSurface>,
    samples: VecDeque<PointerSample>,
    clock_ms: f64,
    frame_ms: f64,
    peak_live: usize,
}

impl ReplaySession {
    pub fn new(mut samples: Vec<PointerSample>, viewport: Viewport, fps: f64) -> Result<Self, ReplayError> {
        if !(fps > 0.0 && fps.is_finite()) {
            return Err(ReplayError::InvalidFps(fps));
        }
        samples.sort_by(|a, b| a.t.total_cmp(&b.t));

        let env = Environment::new(false, HEADLESS_AGENT);
        let start_ms = samples.first().map_or(0.0, |s| s.t);
        let overlay = TrailOverlay::mount(&env, start_ms, || Ok(RecordingSurface::new(viewport)))?;

        info!(samples = samples.len(), fps, width = viewport.width, height = viewport.height, "Replay ready");

        Ok(Self {
            overlay,
            samples: samples.into(),
            clock_ms: start_ms,
            frame_ms: 1000.0 / fps,
            peak_live: 0,
        })
    }

    /// Advance one frame: deliver due samples, then animate
    pub fn step(&mut self) {
        self.clock_ms += self.frame_ms;

        while let Some(sample) = self.samples.front().copied() {
            if sample.t > self.clock_ms {
                break;
            }
            self.samples.pop_front();
            self.overlay.pointer_move(sample.x, sample.y, sample.t);
        }
        self.peak_live = self.peak_live.max(self.overlay.trail().len());

        self.overlay.frame();
    }

    /// All samples delivered and every point faded out
    pub fn is_finished(&self) -> bool {
        self.samples.is_empty() && self.overlay.trail().is_empty()
    }

    /// Step until finished or `max_frames` frames have run
    pub fn run(&mut self, max_frames: u64) -> ReplaySummary {
        while !self.is_finished() && self.overlay.trail().stats().frames < max_frames {
            self.step();
        }
        self.summary()
    }

    pub fn live(&self) -> usize {
        self.overlay.trail().len()
    }

    pub fn pending_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn stats(&self) -> TrailStats {
        self.overlay.trail().stats()
    }

    pub fn summary(&self) -> ReplaySummary {
        let surface = self.overlay.surface();
        ReplaySummary {
            frames: self.stats().frames,
            duration_ms: self.clock_ms,
            peak_live: self.peak_live,
            live: self.live(),
            draws: surface.draws,
            viewport: surface.viewport(),
            stats: self.stats(),
        }
    }
}
