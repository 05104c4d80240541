//! Trail palette - pink → purple → teal glow on a white fade layer

use serde::Serialize;

/// RGBA colour with a fractional alpha, as Canvas2D style strings expect
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` string
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// One colour stop of the glow gradient
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

pub const PINK: Rgba = Rgba::new(244, 114, 182, 1.0);
pub const PURPLE: Rgba = Rgba::new(168, 85, 247, 1.0);
pub const TEAL: Rgba = Rgba::new(94, 234, 212, 1.0);

/// Fill painted over the whole surface each frame instead of a clear
pub const FADE_FILL: Rgba = Rgba::new(255, 255, 255, 0.02);

/// Outer glow gradient, centred on the point
pub const GLOW_STOPS: [GradientStop; 3] = [
    GradientStop { offset: 0.0, color: PINK.with_alpha(0.8) },
    GradientStop { offset: 0.4, color: PURPLE.with_alpha(0.5) },
    GradientStop { offset: 1.0, color: TEAL.with_alpha(0.1) },
];

/// Outer radius of the glow gradient (independent of point radius)
pub const GRADIENT_RADIUS: f64 = 100.0;

/// Drop-shadow blur under the glow
pub const GLOW_BLUR: f64 = 15.0;

/// Shadow alpha relative to point opacity
pub const SHADOW_ALPHA: f64 = 0.5;

pub const CORE_COLOR: Rgba = Rgba::new(255, 255, 255, 0.8);

/// Core radius relative to point radius
pub const CORE_RADIUS_RATIO: f64 = 0.4;

/// Core alpha relative to point opacity
pub const CORE_OPACITY: f64 = 0.6;

/// Everything a surface needs to paint one trail point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointSprite {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
}

impl PointSprite {
    pub fn shadow_color(&self) -> Rgba {
        PINK.with_alpha(SHADOW_ALPHA * self.opacity)
    }

    pub fn core_radius(&self) -> f64 {
        self.radius * CORE_RADIUS_RATIO
    }

    pub fn core_alpha(&self) -> f64 {
        self.opacity * CORE_OPACITY
    }
}
