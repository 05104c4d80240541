//! Cursor trail - glowing particle trail that follows the pointer
//!
//! - `core`: platform-agnostic simulator, palette and overlay lifecycle
//! - `web` (wasm32 + `wasm` feature): Canvas2D overlay exported to JS as `CursorTrail`
//! - `replay` (native): headless trace replay used by `trail-cli`

pub mod core;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
pub mod replay;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use web::CursorTrail;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}
