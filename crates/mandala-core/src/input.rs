//! Input sampling shared between event callbacks and the frame loop.
//!
//! Event handlers overwrite these scalars as samples arrive; the animator
//! reads them once at the start of the next tick. Both sides run on the one
//! UI thread, so this is a plain last-write-wins cell, no synchronization.

/// Latest pointer offset (CSS pixels from viewport center) and normalized
/// scroll progress. `scroll_progress` is clamped at the source and is always
/// in `[0, 1]`.
#[derive(Default, Clone, Copy, Debug)]
pub struct InputState {
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub scroll_progress: f32,
}

/// Normalize a raw scroll offset against the total scrollable range.
///
/// A zero or negative range (single-screen page) yields 0.0 rather than
/// letting a division by zero leak NaN into the transform math.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f32 {
    let range = scroll_height - viewport_height;
    if range <= 0.0 {
        return 0.0;
    }
    ((scroll_y / range) as f32).clamp(0.0, 1.0)
}

/// Pointer offset from the viewport center, in CSS pixels.
#[inline]
pub fn mouse_offset(client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) -> (f32, f32) {
    (client_x - viewport_w * 0.5, client_y - viewport_h * 0.5)
}
