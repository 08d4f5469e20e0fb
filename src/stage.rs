use crate::constants::{EVENT_WARP_DONE, PART2_CANVAS_ID, WARP_SETTLE_MS};
use crate::core::ramp::WarpTuning;
use crate::core::style::{SURFACE_INITIAL_STYLES, SURFACE_SHOWN_STYLES};
use crate::core::teardown::{DisposeLatch, Teardown};
use crate::core::WarpRun;
use crate::dom;
use crate::frame::{self, FrameContext, LoopHandle};
use crate::overlay::WarpNodes;
use crate::render::WarpRenderer;
use instant::Instant;
use js_sys::Promise;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// The warp act. Cloning shares the same stage.
#[derive(Clone)]
pub struct WarpStage {
    inner: Rc<RefCell<StageInner>>,
}

struct StageInner {
    document: web::Document,
    ctx: Option<Rc<RefCell<FrameContext>>>,
    handle: Option<LoopHandle>,
    settle_timer: Option<i32>,
    released: DisposeLatch,
}

fn pixel_ratio() -> f32 {
    web::window()
        .map(|w| w.device_pixel_ratio().min(2.0) as f32)
        .unwrap_or(1.0)
}

fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_id(PART2_CANVAS_ID);
    dom::set_styles(&canvas, SURFACE_INITIAL_STYLES);
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    dom::sync_canvas_backing_size(&canvas);
    Ok(canvas)
}

fn wire_resize(ctx: Weak<RefCell<FrameContext>>) {
    let Some(window) = web::window() else {
        return;
    };
    dom::add_listener::<web::Event>(&window, "resize", move |_| {
        let Some(ctx) = ctx.upgrade() else {
            return;
        };
        let mut ctx = ctx.borrow_mut();
        dom::sync_canvas_backing_size(&ctx.canvas);
        let (w, h) = (ctx.canvas.width(), ctx.canvas.height());
        if let Some(r) = ctx.renderer.as_mut() {
            r.resize_if_needed(w, h, pixel_ratio());
        }
        let (vw, vh) = dom::viewport_size();
        ctx.run.set_viewport(vw, vh);
    });
}

impl WarpStage {
    /// Create the render surface, bring up the GPU and seed the star field.
    /// A GPU failure is logged; the stage then runs its timing without drawing.
    pub async fn load(document: web::Document) -> anyhow::Result<Self> {
        let canvas = create_canvas(&document)?;
        let (vw, vh) = dom::viewport_size();
        let run = WarpRun::new(WarpTuning::default(), vw, vh, rand::random());

        let renderer =
            match WarpRenderer::new(&canvas, run.field().particles(), pixel_ratio()).await {
                Ok(r) => Some(r),
                Err(e) => {
                    log::error!("[warp] WebGPU init error: {:?}", e);
                    None
                }
            };

        let ctx = Rc::new(RefCell::new(FrameContext {
            run,
            renderer,
            canvas,
            nodes: None,
            last_instant: Instant::now(),
            on_finished: None,
        }));
        wire_resize(Rc::downgrade(&ctx));
        log::info!("[warp] stage loaded");

        Ok(Self {
            inner: Rc::new(RefCell::new(StageInner {
                document,
                ctx: Some(ctx),
                handle: None,
                settle_timer: None,
                released: DisposeLatch::default(),
            })),
        })
    }

    /// Begin a fresh warp run. The promise resolves once, `WARP_SETTLE_MS`
    /// after the terminal frame, and `part2:done` is broadcast alongside it.
    /// A disposed stage returns a promise that never settles.
    pub fn start(&self) -> Promise {
        let mut inner = self.inner.borrow_mut();
        let ctx = match inner.ctx.clone() {
            Some(ctx) if !inner.released.is_released() => ctx,
            _ => {
                log::warn!("[warp] start after dispose ignored");
                return Promise::new(&mut |_, _| {});
            }
        };
        if let Some(old) = inner.handle.take() {
            old.cancel();
        }
        if let Some(t) = inner.settle_timer.take() {
            dom::clear_timeout(t);
        }

        let settle_slot = Rc::downgrade(&self.inner);
        let completion = Promise::new(&mut |resolve, _reject| {
            let settle_slot = settle_slot.clone();
            let mut c = ctx.borrow_mut();
            c.on_finished = Some(Box::new(move || {
                let timer = dom::set_timeout(WARP_SETTLE_MS, move || {
                    log::info!("[warp] settled");
                    _ = resolve.call0(&JsValue::UNDEFINED);
                    dom::dispatch(EVENT_WARP_DONE);
                });
                if let Some(inner) = settle_slot.upgrade() {
                    if let Ok(mut inner) = inner.try_borrow_mut() {
                        inner.settle_timer = timer;
                    }
                }
            }));
        });

        {
            let mut c = ctx.borrow_mut();
            if c.nodes.is_none() {
                match WarpNodes::create(&inner.document) {
                    Ok(n) => c.nodes = Some(n),
                    Err(e) => log::warn!("[warp] helper nodes unavailable: {:?}", e),
                }
            }
            dom::set_styles(&c.canvas, SURFACE_SHOWN_STYLES);
            c.run.start();
            c.last_instant = Instant::now();
        }
        inner.handle = Some(frame::start_loop(ctx));
        log::info!("[warp] started");
        completion
    }

    /// Release everything the stage owns. Safe before `start` and when called
    /// repeatedly; each step runs even if an earlier one failed.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.released.claim() {
            return;
        }
        let Some(ctx) = inner.ctx.take() else {
            return;
        };
        let mut td = Teardown::new("warp");
        if let Some(handle) = inner.handle.take() {
            td.always("frame loop", || handle.cancel());
        }
        if let Some(t) = inner.settle_timer.take() {
            td.always("settle timer", || dom::clear_timeout(t));
        }
        let mut c = ctx.borrow_mut();
        c.run.stop();
        c.on_finished = None;
        let canvas = c.canvas.clone();
        td.always("render surface", || canvas.remove());
        if let Some(nodes) = c.nodes.take() {
            td.always("helper nodes", || nodes.remove());
        }
        if let Some(renderer) = c.renderer.take() {
            renderer.release(&mut td);
        }
        td.step("stray surface", || {
            dom::remove_by_id(&inner.document, PART2_CANVAS_ID).map(|_| ())
        });
        td.finish();
    }
}
