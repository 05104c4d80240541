//! Canvas2D implementation of the trail surface

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::core::style::{CORE_COLOR, GLOW_BLUR, GLOW_STOPS, GRADIENT_RADIUS};
use crate::core::{Declined, PointSprite, Rgba, Surface, Viewport};

/// Fixed, click-through, additive overlay
const OVERLAY_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100vw"),
    ("height", "100vh"),
    ("pointer-events", "none"),
    ("z-index", "1"),
    ("mix-blend-mode", "screen"),
];

pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
    /// Created by us, removed from the DOM on release
    owned: bool,
    glow_stops: Vec<(f32, String)>,
    core_fill: String,
}

impl CanvasSurface {
    /// Create an overlay canvas and append it to `<body>`
    pub fn create(document: &Document, viewport: Viewport) -> Result<Self, Declined> {
        let canvas = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or(Declined::NoSurface)?;
        let body = document.body().ok_or(Declined::NoSurface)?;
        body.append_child(&canvas).map_err(|_| Declined::NoSurface)?;

        match Self::attach(canvas.clone(), viewport) {
            Ok(mut surface) => {
                surface.owned = true;
                Ok(surface)
            }
            Err(e) => {
                canvas.remove();
                Err(e)
            }
        }
    }

    /// Claim an existing canvas
    pub fn attach(canvas: HtmlCanvasElement, viewport: Viewport) -> Result<Self, Declined> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(Declined::NoSurface)?;

        let style = canvas.style();
        for (name, value) in OVERLAY_STYLE {
            style.set_property(name, value).ok();
        }

        let mut surface = Self {
            canvas,
            ctx,
            viewport,
            owned: false,
            glow_stops: GLOW_STOPS.iter().map(|s| (s.offset, s.color.css())).collect(),
            core_fill: CORE_COLOR.css(),
        };
        surface.resize(viewport);
        Ok(surface)
    }

    fn fill_circle(&self, x: f64, y: f64, radius: f64) {
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
        self.viewport = viewport;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn fade(&mut self, fill: Rgba) {
        self.ctx.set_fill_style_str(&fill.css());
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.viewport.width as f64,
            self.viewport.height as f64,
        );
    }

    fn draw_point(&mut self, sprite: &PointSprite) {
        let ctx = &self.ctx;
        ctx.save();

        // Outer glow
        ctx.set_global_alpha(sprite.opacity);
        ctx.set_shadow_color(&sprite.shadow_color().css());
        ctx.set_shadow_blur(GLOW_BLUR);
        ctx.set_shadow_offset_x(0.0);
        ctx.set_shadow_offset_y(0.0);

        if let Ok(gradient) =
            ctx.create_radial_gradient(sprite.x, sprite.y, 0.0, sprite.x, sprite.y, GRADIENT_RADIUS)
        {
            for (offset, color) in &self.glow_stops {
                gradient.add_color_stop(*offset, color).ok();
            }
            ctx.set_fill_style_canvas_gradient(&gradient);
            self.fill_circle(sprite.x, sprite.y, sprite.radius);
        }

        // Inner core
        ctx.set_global_alpha(sprite.core_alpha());
        ctx.set_fill_style_str(&self.core_fill);
        self.fill_circle(sprite.x, sprite.y, sprite.core_radius());

        ctx.restore();
    }

    fn release(&mut self) {
        if self.owned {
            self.canvas.remove();
        }
    }
}
