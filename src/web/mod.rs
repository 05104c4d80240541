//! Browser binding - Canvas2D overlay driven by requestAnimationFrame
//!
//! All state sits behind one `Rc<Mounted>`. Frame callbacks and listeners
//! only hold `Weak` references, so dropping the handles in `teardown` is
//! enough to stop the loop and unregister everything.

mod canvas;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use tracing::{debug, trace};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use crate::core::{Declined, Environment, TrailOverlay, Viewport, VisibilityChange};
use crate::time::now_ms;
use canvas::CanvasSurface;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Cursor trail handle exported to JS. Freeing it unmounts the overlay.
#[wasm_bindgen]
pub struct CursorTrail {
    mounted: Option<Rc<Mounted>>,
}

#[wasm_bindgen]
impl CursorTrail {
    /// Create a full-viewport overlay canvas and start the trail.
    ///
    /// Never throws: when the environment declines, the handle is inert.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CursorTrail {
        Self::mount_with(|window, document| CanvasSurface::create(document, viewport_of(window)?))
    }

    /// Run the trail on a canvas the page already owns
    pub fn attach(canvas: HtmlCanvasElement) -> CursorTrail {
        Self::mount_with(move |window, _| CanvasSurface::attach(canvas, viewport_of(window)?))
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.overlay.borrow().is_running())
    }

    #[wasm_bindgen(js_name = pointCount)]
    pub fn point_count(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |m| m.overlay.borrow().trail().len())
    }

    /// Stop the loop, remove listeners and the overlay canvas
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.teardown();
        }
    }
}

impl CursorTrail {
    fn mount_with<F>(claim: F) -> CursorTrail
    where
        F: FnOnce(&Window, &Document) -> Result<CanvasSurface, Declined>,
    {
        let Some((window, document)) = web_sys::window().and_then(|w| w.document().map(|d| (w, d)))
        else {
            debug!("No window or document, cursor trail disabled");
            return CursorTrail { mounted: None };
        };

        let env = environment(&window);
        let mounted = TrailOverlay::mount(&env, now_ms(), || claim(&window, &document))
            .ok()
            .map(|overlay| Mounted::start(overlay, &window, &document));

        CursorTrail { mounted }
    }
}

impl Default for CursorTrail {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CursorTrail {
    fn drop(&mut self) {
        self.unmount();
    }
}

struct Mounted {
    overlay: RefCell<TrailOverlay<CanvasSurface>>,
    /// Pending frame; dropping it cancels the request
    frame: RefCell<Option<AnimationFrame>>,
    /// Dropping a listener unregisters it
    listeners: RefCell<Vec<EventListener>>,
}

impl Mounted {
    fn start(overlay: TrailOverlay<CanvasSurface>, window: &Window, document: &Document) -> Rc<Self> {
        let mounted = Rc::new(Self {
            overlay: RefCell::new(overlay),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });

        let on_move = Self::listen(&mounted, window, "mousemove", |this, event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            this.overlay.borrow_mut().pointer_move(
                event.client_x() as f64,
                event.client_y() as f64,
                now_ms(),
            );
        });

        let resize_window = window.clone();
        let on_resize = Self::listen(&mounted, window, "resize", move |this, _| {
            match viewport_of(&resize_window) {
                Ok(viewport) => this.overlay.borrow_mut().resize(viewport),
                Err(reason) => trace!(%reason, "Resize ignored"),
            }
        });

        let visibility_document = document.clone();
        let on_visibility = Self::listen(&mounted, document, "visibilitychange", move |this, _| {
            let visible = !visibility_document.hidden();
            let change = this.overlay.borrow_mut().set_visible(visible);
            match change {
                VisibilityChange::Paused => {
                    this.frame.borrow_mut().take();
                }
                VisibilityChange::Resumed => {
                    if this.frame.borrow().is_none() {
                        this.schedule();
                    }
                }
                VisibilityChange::Unchanged => {}
            }
        });

        *mounted.listeners.borrow_mut() = vec![on_move, on_resize, on_visibility];
        mounted.schedule();
        mounted
    }

    fn listen<F>(this: &Rc<Self>, target: &EventTarget, event_type: &'static str, handler: F) -> EventListener
    where
        F: Fn(&Rc<Self>, &Event) + 'static,
    {
        let weak = Rc::downgrade(this);
        EventListener::new(target, event_type, move |event| {
            if let Some(this) = weak.upgrade() {
                handler(&this, event);
            }
        })
    }

    fn schedule(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |_| {
            let Some(this) = weak.upgrade() else {
                return;
            };
            this.frame.borrow_mut().take();
            let keep_going = this.overlay.borrow_mut().frame();
            if keep_going {
                this.schedule();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn teardown(&self) {
        if !self.overlay.borrow_mut().teardown() {
            return;
        }
        self.frame.borrow_mut().take();
        self.listeners.borrow_mut().clear();
    }
}

/// Reduced-motion preference and user agent, read once
fn environment(window: &Window) -> Environment {
    let prefers_reduced_motion = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false);
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    Environment::new(prefers_reduced_motion, user_agent)
}

fn viewport_of(window: &Window) -> Result<Viewport, Declined> {
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    match (width, height) {
        (Some(w), Some(h)) if w >= 0.0 && h >= 0.0 => Ok(Viewport::new(w as u32, h as u32)),
        _ => Err(Declined::NoViewport),
    }
}
