use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Typed lookup of the render canvas. The whole scene depends on the mount
/// point, so a missing element is a hard startup error.
pub fn canvas_by_id(
    document: &web::Document,
    element_id: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{element_id} mount point"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("#{element_id} is not a canvas"))
}

/// Keep the canvas backing store sized to CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
