//! Viewport state - reactive bounds for spawning and culling.
//!
//! The viewport is the rectangle particles live in: spawn positions are
//! randomized inside it and the off-screen cull threshold hangs off its
//! edges. Engines re-query these signals on every spawn rather than caching
//! them, so a resize takes effect on the very next spawned particle.
//!
//! The size is plain viewport units. A fullscreen terminal host feeds
//! `detect_viewport_size` / resize events; anything else calls
//! `set_viewport_size` with whatever units its renderer uses.

use spark_signals::{signal, Signal};

/// Fallback bounds before a host reports a real size.
const DEFAULT_WIDTH: f32 = 1280.0;
const DEFAULT_HEIGHT: f32 = 720.0;

thread_local! {
    static VIEWPORT_WIDTH: Signal<f32> = signal(DEFAULT_WIDTH);
    static VIEWPORT_HEIGHT: Signal<f32> = signal(DEFAULT_HEIGHT);
}

// =============================================================================
// Access
// =============================================================================

/// Current viewport width. Reactive when read inside an effect.
pub fn viewport_width() -> f32 {
    VIEWPORT_WIDTH.with(|width| width.get())
}

/// Current viewport height. Reactive when read inside an effect.
pub fn viewport_height() -> f32 {
    VIEWPORT_HEIGHT.with(|height| height.get())
}

/// Current viewport size as `(width, height)`.
pub fn viewport_size() -> (f32, f32) {
    (viewport_width(), viewport_height())
}

/// Update the viewport bounds.
///
/// Call on every host resize; in-flight particles are untouched, only
/// future spawns land in the new bounds.
pub fn set_viewport_size(width: f32, height: f32) {
    VIEWPORT_WIDTH.with(|signal| signal.set(width));
    VIEWPORT_HEIGHT.with(|signal| signal.set(height));
}

/// Query the hosting terminal for its size and store it.
///
/// Terminal cells become viewport units. Leaves the current bounds in
/// place when no terminal is attached (tests, pipes).
///
/// Returns the bounds in effect afterwards.
pub fn detect_viewport_size() -> (f32, f32) {
    if let Ok((cols, rows)) = crossterm::terminal::size() {
        set_viewport_size(cols as f32, rows as f32);
    }
    viewport_size()
}

/// Reset to the built-in default bounds (for testing).
pub fn reset_viewport_state() {
    set_viewport_size(DEFAULT_WIDTH, DEFAULT_HEIGHT);
}

// =============================================================================
// Tests
// =============================================================================
