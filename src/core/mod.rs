//! Platform-agnostic core - shared between the browser overlay and the CLI

pub mod activation;
pub mod fps;
pub mod overlay;
pub mod point;
pub mod pointer;
pub mod style;
pub mod surface;
pub mod trail;

pub use activation::{Declined, Environment};
pub use fps::FpsCounter;
pub use overlay::{OverlayState, TrailOverlay, VisibilityChange};
pub use point::TrailPoint;
pub use pointer::{PointerMotion, PointerState};
pub use style::{PointSprite, Rgba};
pub use surface::{RecordingSurface, Surface, Viewport};
pub use trail::{TrailSimulator, TrailStats};
