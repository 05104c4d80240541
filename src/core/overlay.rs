//! Overlay lifecycle - mount, frame loop state, visibility, teardown
//!
//! Platform glue (listeners, frame scheduling) lives elsewhere; this type
//! only decides what each host callback does so the same rules hold in the
//! browser, in the CLI and in tests.

use tracing::debug;

use super::activation::{Declined, Environment};
use super::surface::{Surface, Viewport};
use super::trail::TrailSimulator;

/// Frame loop state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    Running,
    /// Document hidden, no frames requested
    Paused,
    TornDown,
}

/// Result of a visibility change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityChange {
    /// Stop requesting frames
    Paused,
    /// Request a frame again
    Resumed,
    Unchanged,
}

/// A mounted trail: simulator plus the surface it exclusively owns
#[derive(Debug)]
pub struct TrailOverlay<S: Surface> {
    trail: TrailSimulator,
    surface: S,
    state: OverlayState,
}

impl<S: Surface> TrailOverlay<S> {
    /// Run the activation policy, then claim a surface.
    ///
    /// `claim` is only called when the environment allows the effect, so a
    /// declined mount never touches the host.
    pub fn mount<F>(env: &Environment, now_ms: f64, claim: F) -> Result<Self, Declined>
    where
        F: FnOnce() -> Result<S, Declined>,
    {
        let surface = env.check().and_then(|()| claim()).map_err(|reason| {
            debug!(%reason, "Cursor trail declined");
            reason
        })?;

        let viewport = surface.viewport();
        debug!(width = viewport.width, height = viewport.height, "Cursor trail mounted");

        Ok(Self {
            trail: TrailSimulator::new(now_ms),
            surface,
            state: OverlayState::Running,
        })
    }

    /// Feed a pointer move. Ignored after teardown.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> usize {
        if self.state == OverlayState::TornDown {
            return 0;
        }
        self.trail.on_pointer_move(x, y, now_ms)
    }

    /// Run one animation frame. Returns whether another frame should be requested.
    pub fn frame(&mut self) -> bool {
        match self.state {
            OverlayState::Running => {
                self.trail.on_animation_frame(&mut self.surface);
                true
            }
            OverlayState::Paused | OverlayState::TornDown => false,
        }
    }

    /// Resync the surface to a new viewport; points keep their coordinates
    pub fn resize(&mut self, viewport: Viewport) {
        if self.state == OverlayState::TornDown {
            return;
        }
        debug!(width = viewport.width, height = viewport.height, "Cursor trail resized");
        self.surface.resize(viewport);
    }

    pub fn set_visible(&mut self, visible: bool) -> VisibilityChange {
        match (self.state, visible) {
            (OverlayState::Running, false) => {
                self.state = OverlayState::Paused;
                debug!(live = self.trail.len(), "Cursor trail paused");
                VisibilityChange::Paused
            }
            (OverlayState::Paused, true) => {
                self.state = OverlayState::Running;
                debug!(live = self.trail.len(), "Cursor trail resumed");
                VisibilityChange::Resumed
            }
            _ => VisibilityChange::Unchanged,
        }
    }

    /// Stop for good and release the surface. Returns `false` if already torn down.
    pub fn teardown(&mut self) -> bool {
        if self.state == OverlayState::TornDown {
            return false;
        }
        self.state = OverlayState::TornDown;
        self.surface.release();

        let stats = self.trail.stats();
        debug!(
            frames = stats.frames,
            emitted = stats.emitted,
            trims = stats.trims,
            "Cursor trail torn down"
        );
        true
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == OverlayState::Running
    }

    pub fn trail(&self) -> &TrailSimulator {
        &self.trail
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::RecordingSurface;

    const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

    fn mounted() -> TrailOverlay<RecordingSurface> {
        TrailOverlay::mount(&Environment::new(false, DESKTOP_UA), 0.0, || {
            Ok(RecordingSurface::new(Viewport::new(800, 600)))
        })
        .expect("desktop mount")
    }

    #[test]
    fn reduced_motion_never_claims_a_surface() {
        let mut claimed = false;
        let result = TrailOverlay::<RecordingSurface>::mount(
            &Environment::new(true, DESKTOP_UA),
            0.0,
            || {
                claimed = true;
                Ok(RecordingSurface::default())
            },
        );
        assert_eq!(result.err(), Some(Declined::ReducedMotion));
        assert!(!claimed);
    }

    #[test]
    fn mobile_never_claims_a_surface() {
        let mut claimed = false;
        let result = TrailOverlay::<RecordingSurface>::mount(
            &Environment::new(false, "Mozilla/5.0 (Linux; Android 14)"),
            0.0,
            || {
                claimed = true;
                Ok(RecordingSurface::default())
            },
        );
        assert_eq!(result.err(), Some(Declined::MobileDevice));
        assert!(!claimed);
    }

    #[test]
    fn missing_surface_is_declined() {
        let result = TrailOverlay::<RecordingSurface>::mount(
            &Environment::new(false, DESKTOP_UA),
            0.0,
            || Err(Declined::NoSurface),
        );
        assert_eq!(result.err(), Some(Declined::NoSurface));
    }

    #[test]
    fn running_overlay_paints_every_frame() {
        let mut overlay = mounted();
        assert_eq!(overlay.pointer_move(30.0, 0.0, 16.0), 5);
        assert!(overlay.frame());
        assert!(overlay.frame());
        assert_eq!(overlay.surface().fades, 2);
        assert_eq!(overlay.surface().draws, 10);
    }

    #[test]
    fn teardown_is_idempotent_and_final() {
        let mut overlay = mounted();
        overlay.pointer_move(30.0, 0.0, 16.0);

        assert!(overlay.teardown());
        assert!(overlay.surface().released);
        assert!(!overlay.teardown());

        assert!(!overlay.frame());
        assert_eq!(overlay.pointer_move(60.0, 0.0, 32.0), 0);
        assert_eq!(overlay.trail().len(), 5);
        assert_eq!(overlay.set_visible(true), VisibilityChange::Unchanged);
        assert_eq!(overlay.state(), OverlayState::TornDown);
    }

    #[test]
    fn hidden_document_pauses_frames() {
        let mut overlay = mounted();
        overlay.pointer_move(30.0, 0.0, 16.0);

        assert_eq!(overlay.set_visible(false), VisibilityChange::Paused);
        assert_eq!(overlay.set_visible(false), VisibilityChange::Unchanged);
        assert!(!overlay.frame());
        assert_eq!(overlay.surface().fades, 0);

        // Moves while hidden still land
        overlay.pointer_move(60.0, 0.0, 32.0);
        assert_eq!(overlay.trail().len(), 10);

        assert_eq!(overlay.set_visible(true), VisibilityChange::Resumed);
        assert!(overlay.frame());
        assert_eq!(overlay.surface().fades, 1);
    }

    #[test]
    fn resize_keeps_points_in_place() {
        let mut overlay = mounted();
        overlay.pointer_move(30.0, 0.0, 16.0);
        let before: Vec<_> = overlay.trail().points().to_vec();

        overlay.resize(Viewport::new(400, 300));
        assert_eq!(overlay.surface().viewport(), Viewport::new(400, 300));
        assert_eq!(overlay.surface().resizes, 1);
        assert_eq!(overlay.trail().points(), before.as_slice());
    }
}
