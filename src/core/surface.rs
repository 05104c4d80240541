//! Drawing surface abstraction
//!
//! The simulator only needs a translucent full-surface fill and a way to
//! paint one glowing point. The browser implements this on a Canvas2D
//! context; [`RecordingSurface`] keeps the calls in memory for the CLI and
//! for tests.

use serde::Serialize;

use super::style::{PointSprite, Rgba};

/// Pixel dimensions of the drawing surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse `WIDTHxHEIGHT`
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        Some(Self::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
    }
}

/// 2D surface the trail paints onto
pub trait Surface {
    /// Resynchronise the backing pixel size
    fn resize(&mut self, viewport: Viewport);

    /// Current pixel size
    fn viewport(&self) -> Viewport;

    /// Paint `fill` over the whole surface (no clear)
    fn fade(&mut self, fill: Rgba);

    /// Paint one point: outer glow plus inner core
    fn draw_point(&mut self, sprite: &PointSprite);

    /// Give the surface back to the host on teardown
    fn release(&mut self) {}
}

/// In-memory surface: counts calls and keeps the sprites of the last frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    viewport: Viewport,
    /// Sprites drawn since the last fade
    pub frame_sprites: Vec<PointSprite>,
    pub fades: u64,
    pub draws: u64,
    pub resizes: u64,
    pub released: bool,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.resizes += 1;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn fade(&mut self, _fill: Rgba) {
        self.frame_sprites.clear();
        self.fades += 1;
    }

    fn draw_point(&mut self, sprite: &PointSprite) {
        self.frame_sprites.push(*sprite);
        self.draws += 1;
    }

    fn release(&mut self) {
        self.released = true;
    }
}
