use crate::core::style::{surface_fade_out, SurfaceStyle};
use crate::core::WarpRun;
use crate::dom;
use crate::overlay::WarpNodes;
use crate::render::WarpRenderer;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub run: WarpRun,
    pub renderer: Option<WarpRenderer>,
    pub canvas: web::HtmlCanvasElement,
    pub nodes: Option<WarpNodes>,
    pub last_instant: Instant,
    /// Fired once on the terminal frame.
    pub on_finished: Option<Box<dyn FnOnce()>>,
}

impl FrameContext {
    /// Advance and draw one frame. Returns whether another frame is wanted.
    pub fn frame(&mut self) -> bool {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let Some(visuals) = self.run.step(dt_sec) else {
            return false;
        };

        if let Some(renderer) = self.renderer.as_mut() {
            let particles = self.run.field_mut().take_dirty();
            match renderer.render(particles, &visuals) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    renderer.reconfigure();
                }
                Err(e) => log::warn!("[frame] render error: {:?}", e),
            }
        }

        let surface = SurfaceStyle::from_visuals(&visuals);
        dom::set_style(&self.canvas, "transform", &surface.transform);
        if let Some(nodes) = self.nodes.as_ref() {
            nodes.update(&visuals);
        }

        if visuals.finished {
            let (transition, opacity) = surface_fade_out();
            dom::set_styles(
                &self.canvas,
                &[("transition", transition.as_str()), ("opacity", opacity)],
            );
            log::info!("[frame] ramp complete after {:.2}s", visuals.elapsed);
            if let Some(cb) = self.on_finished.take() {
                cb();
            }
        }
        self.run.is_running()
    }
}

/// Scheduling state of a running loop, used to cancel it from outside.
#[derive(Clone)]
pub struct LoopHandle {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl LoopHandle {
    /// Cancel any pending frame and drop the tick closure. Must not be called
    /// from inside the tick itself.
    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

fn schedule(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        raf_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_clone.set(None);
        let again = frame_ctx_tick.borrow_mut().frame();
        if again {
            schedule(&tick_clone, &raf_clone);
        }
    }) as Box<dyn FnMut()>));
    schedule(&tick, &raf_id);
    LoopHandle { raf_id, tick }
}
