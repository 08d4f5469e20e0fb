use crate::act1::Act1;
use crate::constants::{
    EVENT_TRIGGER_DONE, EVENT_WARP_DONE, HANDOFF_CEILING_MS, HIDE_STYLE_ID, LIGHT_OVERLAY_ID,
    PART2_CANVAS_ID, TITLE_CLASS,
};
use crate::core::{CompletionSource, Orchestration, TriggerOutcome};
use crate::dom;
use crate::handoff;
use crate::stage::WarpStage;
use js_sys::{Array, Promise};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Sequences the acts. Holds each stage's handle directly; nothing is
/// published on the window besides the broadcast events.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Rc<Inner>,
}

struct Inner {
    document: web::Document,
    state: RefCell<Orchestration>,
    act1: RefCell<Option<Act1>>,
    warp: RefCell<Option<WarpStage>>,
}

fn hide_style_css() -> String {
    format!(
        "#bg-container, #site-header, #center-hint, #ui, #loader, #music-controls, #bg-video, #bg-image {{ display: none !important; }}\n\
         #{PART2_CANVAS_ID} {{ display: block !important; position: fixed !important; left: 0 !important; top: 0 !important; width: 100% !important; height: 100% !important; z-index: 999 !important; }}\n\
         #{LIGHT_OVERLAY_ID} {{ display: block !important; z-index: 1000 !important; }}\n\
         .{TITLE_CLASS} {{ display: inline-flex !important; z-index: 1001 !important; pointer-events: none !important; }}\n"
    )
}

impl Orchestrator {
    pub fn new(document: web::Document, act1: Option<Act1>) -> Self {
        Self {
            inner: Rc::new(Inner {
                document,
                state: RefCell::new(Orchestration::new()),
                act1: RefCell::new(act1),
                warp: RefCell::new(None),
            }),
        }
    }

    /// Hook the scroll-in start (warp prefetch) and its completion (trigger).
    pub fn install(&self) {
        if let Some(act1) = self.inner.act1.borrow().as_ref() {
            let this = self.clone();
            act1.on_scroll_start(move || this.load_warp());
        }
        if let Some(window) = web::window() {
            let this = self.clone();
            dom::add_listener::<web::Event>(&window, EVENT_TRIGGER_DONE, move |_| {
                this.on_trigger();
            });
        }
        // After the prefetch hook, so a replayed tap also preloads the warp.
        let act1 = self.inner.act1.borrow().clone();
        if let Some(act1) = act1 {
            act1.replay_early_request();
        }
    }

    fn load_warp(&self) {
        if !self.inner.state.borrow().needs_warp_load() {
            return;
        }
        self.inner.state.borrow_mut().warp_loading();
        log::info!("[orchestrator] loading warp stage");
        let this = self.clone();
        spawn_local(async move {
            let ok = match WarpStage::load(this.inner.document.clone()).await {
                Ok(stage) => {
                    *this.inner.warp.borrow_mut() = Some(stage);
                    true
                }
                Err(e) => {
                    log::error!("[orchestrator] warp stage failed to load: {:#}", e);
                    false
                }
            };
            let begin = this.inner.state.borrow_mut().on_warp_loaded(ok);
            if begin {
                log::info!("[orchestrator] pending trigger released");
                this.begin_act2();
            }
        });
    }

    fn on_trigger(&self) {
        let outcome = self.inner.state.borrow_mut().on_trigger();
        match outcome {
            TriggerOutcome::Begin => self.begin_act2(),
            TriggerOutcome::Deferred => {
                log::debug!("[orchestrator] trigger queued until the warp is loaded");
                self.load_warp();
            }
            TriggerOutcome::Ignored => log::debug!("[orchestrator] trigger ignored"),
        }
    }

    fn inject_hide_style(&self) -> Result<(), JsValue> {
        let doc = &self.inner.document;
        if doc.get_element_by_id(HIDE_STYLE_ID).is_some() {
            return Ok(());
        }
        let style = doc.create_element("style")?;
        style.set_id(HIDE_STYLE_ID);
        style.set_text_content(Some(&hide_style_css()));
        if let Some(head) = doc.head() {
            head.append_child(&style)?;
        }
        Ok(())
    }

    /// Act 1 -> Act 2. Act 1 is disposed right after the warp start is issued,
    /// without waiting for its first frame; the two lifetimes overlap briefly.
    fn begin_act2(&self) {
        if let Err(e) = self.inject_hide_style() {
            log::warn!("[orchestrator] hide style not installed: {:?}", e);
        }
        let stage = self.inner.warp.borrow().clone();
        let completion = match stage.as_ref() {
            Some(s) => Some(s.start()),
            None => {
                log::warn!("[orchestrator] no warp stage; waiting for {}", EVENT_WARP_DONE);
                None
            }
        };
        let act1 = self.inner.act1.borrow_mut().take();
        if let Some(act1) = act1 {
            act1.dispose();
        }
        self.inner.state.borrow_mut().on_warp_started();

        let this = self.clone();
        spawn_local(async move {
            let source = await_completion(completion).await;
            this.on_stage_completion(source).await;
        });
    }

    async fn on_stage_completion(&self, source: CompletionSource) {
        if !self.inner.state.borrow_mut().on_stage_completion(source) {
            return;
        }
        log::info!("[orchestrator] warp complete via {:?}", source);
        let stage = self.inner.warp.borrow_mut().take();
        if let Some(stage) = stage {
            stage.dispose();
        }

        let doc = self.inner.document.clone();
        let mount = match handoff::ensure_mount(&doc) {
            Ok(m) => Some(m),
            Err(e) => {
                log::error!("[handoff] no mount container: {:#}", e);
                None
            }
        };
        handoff::load_bundle(&doc).await;

        if let Err(e) = dom::remove_by_id(&doc, HIDE_STYLE_ID) {
            log::warn!("[orchestrator] hide style not removed: {:?}", e);
        }
        if let Some(mount) = mount.as_ref() {
            handoff::reveal_mount(mount);
        }
        self.inner.state.borrow_mut().on_act3_mounted();
        log::info!("[orchestrator] act 3 mounted");
    }
}

/// Settle with `tag` once `p` settles, whatever its outcome.
fn tagged(p: Promise, tag: &'static str) -> Promise {
    Promise::new(&mut |resolve, _reject| {
        let p = p.clone();
        spawn_local(async move {
            _ = JsFuture::from(p).await;
            _ = resolve.call1(&JsValue::UNDEFINED, &JsValue::from_str(tag));
        });
    })
}

/// First of: the stage's own notification, the `part2:done` broadcast, or the
/// hand-off ceiling.
async fn await_completion(notification: Option<Promise>) -> CompletionSource {
    let racers = Array::new();
    if let Some(p) = notification {
        racers.push(&tagged(p, CompletionSource::Notification.tag()));
    }
    racers.push(&tagged(
        dom::window_event(EVENT_WARP_DONE),
        CompletionSource::Broadcast.tag(),
    ));
    racers.push(&tagged(
        dom::delay(HANDOFF_CEILING_MS),
        CompletionSource::Ceiling.tag(),
    ));

    let winner = JsFuture::from(Promise::race(&racers))
        .await
        .ok()
        .and_then(|v| v.as_string());
    CompletionSource::from_tag(winner.as_deref())
}
