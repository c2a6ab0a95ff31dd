//! WASM entry point: wires page chrome and input listeners, builds the
//! scene, then hands off to the requestAnimationFrame loop.

#![cfg(target_arch = "wasm32")]

mod chrome;
mod dom;
mod events;
mod frame;
mod render;

use mandala_core::{Animator, InputState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = init().await {
            log::error!("startup failed: {e:#}");
        }
    });
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // Chrome effects run even if WebGPU init fails below.
    chrome::wire_page_chrome(&document);

    let canvas = dom::canvas_by_id(&document, "bg-canvas")?;
    dom::sync_canvas_backing_size(&canvas);

    let input = Rc::new(RefCell::new(InputState::default()));
    events::wire_input(&input);

    let mut rng = StdRng::from_entropy();
    let animator = Animator::new(&mut rng);
    let gpu = render::GpuState::new(&canvas, &animator).await?;

    let ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        input, animator, rng, gpu, canvas,
    )));
    events::wire_resize(ctx.clone());

    log::info!("mandala scene ready");
    frame::start_loop(ctx);
    Ok(())
}
