// Normalization of raw browser input samples.

use mandala_core::{mouse_offset, scroll_progress};

#[test]
fn scroll_progress_spans_the_scrollable_range() {
    assert_eq!(scroll_progress(0.0, 2000.0, 1000.0), 0.0);
    assert_eq!(scroll_progress(500.0, 2000.0, 1000.0), 0.5);
    assert_eq!(scroll_progress(1000.0, 2000.0, 1000.0), 1.0);
}

#[test]
fn scroll_progress_is_clamped() {
    // Overscroll (rubber-banding) must not escape [0, 1].
    assert_eq!(scroll_progress(-50.0, 2000.0, 1000.0), 0.0);
    assert_eq!(scroll_progress(5000.0, 2000.0, 1000.0), 1.0);
}

#[test]
fn single_screen_page_yields_zero() {
    // No scrollable range: avoid 0/0 rather than propagating NaN.
    assert_eq!(scroll_progress(0.0, 1000.0, 1000.0), 0.0);
    assert_eq!(scroll_progress(10.0, 800.0, 1000.0), 0.0);
}

#[test]
fn mouse_offset_is_relative_to_viewport_center() {
    assert_eq!(mouse_offset(960.0, 540.0, 1920.0, 1080.0), (0.0, 0.0));
    assert_eq!(mouse_offset(0.0, 0.0, 1920.0, 1080.0), (-960.0, -540.0));
    assert_eq!(mouse_offset(1920.0, 1080.0, 1920.0, 1080.0), (960.0, 540.0));
}
