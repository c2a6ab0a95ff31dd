//! Per-frame driver: owns the camera rig, the animator and the GPU state,
//! and reschedules itself through requestAnimationFrame.

use instant::Instant;
use mandala_core::{Animator, CameraPath, CameraRig, InputState};
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::render::GpuState;

pub struct FrameContext {
    input: Rc<RefCell<InputState>>,
    path: CameraPath,
    rig: CameraRig,
    animator: Animator,
    rng: StdRng,
    gpu: GpuState,
    canvas: web::HtmlCanvasElement,
    started: Instant,
}

impl FrameContext {
    pub fn new(
        input: Rc<RefCell<InputState>>,
        animator: Animator,
        rng: StdRng,
        gpu: GpuState,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
        let path = CameraPath::default();
        let rig = CameraRig::new(&path, aspect);
        Self {
            input,
            path,
            rig,
            animator,
            rng,
            gpu,
            canvas,
            started: Instant::now(),
        }
    }

    /// Resync canvas backing store, surface and camera aspect. Runs from the
    /// resize listener, between frames.
    pub fn apply_resize(&mut self) {
        crate::dom::sync_canvas_backing_size(&self.canvas);
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.gpu.resize_if_needed(w, h);
        self.rig.set_aspect(w as f32 / h.max(1) as f32);
    }

    /// One animation tick: sample the input cell once, advance camera and
    /// scene, then draw.
    pub fn frame(&mut self) {
        let elapsed = self.started.elapsed().as_secs_f32();
        let input = *self.input.borrow();

        let target = self.path.target_at(input.scroll_progress);
        self.rig.step(&target, input.mouse_x, input.mouse_y);
        self.animator.tick(elapsed, &input, &mut self.rng);

        match self.gpu.render(&self.rig, self.animator.frame()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // surface comes back after a reconfigure at the current size
                self.apply_resize();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
    }
}

/// Kick off the self-rescheduling requestAnimationFrame loop.
pub fn start_loop(ctx: Rc<RefCell<FrameContext>>) {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.borrow_mut().frame();
        request_animation_frame(&f);
    }) as Box<dyn FnMut()>));

    request_animation_frame(&g);
}

fn request_animation_frame(f: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let Some(window) = web::window() {
        if let Some(closure) = f.borrow().as_ref() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }
}
