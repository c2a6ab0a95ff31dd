//! Page chrome effects, fully independent of the 3D path: fade-in marking,
//! parallax text, and smooth anchor scrolling.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Wire all three chrome effects. Failures here are logged but do not take
/// down the 3D scene.
pub fn wire_page_chrome(document: &web::Document) {
    if let Err(e) = wire_fade_ins(document) {
        log::warn!("fade-in observer unavailable: {e:?}");
    }
    wire_parallax(document);
    wire_anchor_smooth_scroll(document);
}

/// Mark `.fade-in-up` elements with the `visible` class once they cross 10%
/// visibility. One-directional on purpose: the class is never removed, even
/// if the element scrolls back out.
fn wire_fade_ins(document: &web::Document) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let entry: web::IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let _ = entry.target().class_list().add_1("visible");
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.1));
    let observer = web::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();

    let targets = document.query_selector_all(".fade-in-up")?;
    for i in 0..targets.length() {
        if let Some(el) = targets.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            observer.observe(&el);
        }
    }
    Ok(())
}

/// Translate `.parallax` elements by scroll offset times their per-element
/// `data-speed` factor.
fn wire_parallax(document: &web::Document) {
    let document = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let scrolled = web::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
        let Ok(elements) = document.query_selector_all(".parallax") else {
            return;
        };
        for i in 0..elements.length() {
            let Some(el) = elements.item(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok())
            else {
                continue;
            };
            let speed = el
                .get_attribute("data-speed")
                .and_then(|s| s.parse::<f64>().ok())
                .unwrap_or(0.0);
            let transform = format!("translate(-50%, calc(-50% + {}px))", scrolled * speed);
            let _ = el.style().set_property("transform", &transform);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Intercept in-page anchor clicks and smooth-scroll to the target instead
/// of jumping.
fn wire_anchor_smooth_scroll(document: &web::Document) {
    let Ok(anchors) = document.query_selector_all("a[href^='#']") else {
        return;
    };
    for i in 0..anchors.length() {
        let Some(anchor) = anchors.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        let document = document.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            ev.prevent_default();
            if let Ok(Some(target)) = document.query_selector(&href) {
                let options = web::ScrollIntoViewOptions::new();
                options.set_behavior(web::ScrollBehavior::Smooth);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
