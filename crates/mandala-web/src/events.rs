//! Browser event wiring. Handlers only overwrite the shared input cell (or,
//! for resize, poke the frame context synchronously); all animation happens
//! on the next tick.

use mandala_core::InputState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::frame::FrameContext;

fn viewport_size(window: &web::Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    (w, h)
}

fn sample_scroll_progress(window: &web::Window) -> f32 {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let scroll_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    mandala_core::scroll_progress(scroll_y, scroll_height, viewport)
}

/// Pointer and scroll listeners feeding the shared last-write-wins cell.
pub fn wire_input(input: &Rc<RefCell<InputState>>) {
    // pointermove: raw offset from viewport center, no smoothing here
    {
        let input = input.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if let Some(window) = web::window() {
                let (vw, vh) = viewport_size(&window);
                let (mx, my) =
                    mandala_core::mouse_offset(ev.client_x() as f32, ev.client_y() as f32, vw, vh);
                let mut state = input.borrow_mut();
                state.mouse_x = mx;
                state.mouse_y = my;
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(window) = web::window() {
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // scroll: normalized progress, clamped at the source
    {
        let input = input.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(window) = web::window() {
                input.borrow_mut().scroll_progress = sample_scroll_progress(&window);
            }
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            let _ =
                window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}

/// Resize runs synchronously between frames: canvas backing size, camera
/// aspect, and surface configuration are all updated before the next frame
/// renders, so there is no one-frame lag in aspect ratio.
pub fn wire_resize(ctx: Rc<RefCell<FrameContext>>) {
    let closure = Closure::wrap(Box::new(move || {
        ctx.borrow_mut().apply_resize();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
