use crate::audio::{self, AmbientAudio};
use crate::constants::{
    EVENT_TRIGGER_DONE, IMAGE_PLACEHOLDER_SRC, IMAGE_SRC, MIN_LOADER_SHOW_MS,
    PENDING_TRIGGER_FLAG, SCROLL_COMPLETE_SLACK_MS, SCROLL_DURATION_MS, VIDEO_HIDE_SLACK_MS,
    VIDEO_SRC,
};
use crate::core::media::{loader_remaining_ms, ErrorBudget, ErrorLog};
use crate::core::teardown::{sweep_decision, DisposeLatch, Sweep, Teardown};
use crate::core::trigger::ScrollIn;
use crate::dom;
use crate::error::LandingError;
use crate::events;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const CONTROL_IDS: &[&str] = &["toggle-mode", "audio-toggle", "audio-mute", "audio-volume"];

/// Act 1: background video or still image, ambient music and the scroll-in
/// that hands over to the warp.
#[derive(Clone)]
pub struct Act1 {
    inner: Rc<Act1State>,
}

/// Non-owning reference for long-lived listeners, so a disposed Act 1 can
/// actually be dropped.
#[derive(Clone)]
pub struct Act1Handle {
    inner: Weak<Act1State>,
}

impl Act1Handle {
    pub fn upgrade(&self) -> Option<Act1> {
        Act1::upgrade(&self.inner)
    }
}

struct Act1State {
    document: web::Document,
    toggle_button: web::HtmlElement,
    video: Option<web::HtmlVideoElement>,
    image: Option<web::HtmlImageElement>,
    loader: Option<web::HtmlElement>,
    center_hint: Option<web::HtmlElement>,
    music_controls: Option<web::HtmlElement>,
    audio: Option<AmbientAudio>,
    static_mode: Cell<bool>,
    scroll: Cell<ScrollIn>,
    video_budget: Cell<ErrorBudget>,
    image_budget: Cell<ErrorBudget>,
    placeholder_used: Cell<bool>,
    loader_shown_at: f64,
    loader_timer: Cell<Option<i32>>,
    timers: RefCell<Vec<i32>>,
    wheel_logged: Cell<bool>,
    on_scroll_start: RefCell<Option<Box<dyn FnOnce()>>>,
    disposed: Cell<DisposeLatch>,
}

fn require(document: &web::Document, id: &'static str) -> Result<web::HtmlElement, LandingError> {
    dom::element_by_id(document, id).ok_or(LandingError::MissingElement(id))
}

impl Act1 {
    /// Wire Act 1. Fails only when a required control is missing.
    pub fn init(document: &web::Document) -> Result<Self, LandingError> {
        let toggle_button = require(document, "toggle-mode")?;
        let audio_toggle = require(document, "audio-toggle")?;

        let audio = dom::element_by_id::<web::HtmlAudioElement>(document, "bg-audio")
            .map(|el| AmbientAudio::new(document, el));

        let act = Self {
            inner: Rc::new(Act1State {
                document: document.clone(),
                toggle_button,
                video: dom::element_by_id(document, "bg-video"),
                image: dom::element_by_id(document, "bg-image"),
                loader: dom::element_by_id(document, "loader"),
                center_hint: dom::element_by_id(document, "center-hint"),
                music_controls: dom::element_by_id(document, "music-controls"),
                audio,
                static_mode: Cell::new(false),
                scroll: Cell::new(ScrollIn::default()),
                video_budget: Cell::new(ErrorBudget::default()),
                image_budget: Cell::new(ErrorBudget::default()),
                placeholder_used: Cell::new(false),
                loader_shown_at: dom::now_ms(),
                loader_timer: Cell::new(None),
                timers: RefCell::new(Vec::new()),
                wheel_logged: Cell::new(false),
                on_scroll_start: RefCell::new(None),
                disposed: Cell::new(DisposeLatch::default()),
            }),
        };

        act.wire_mode_toggle();
        act.wire_audio_toggle(&audio_toggle);
        act.setup_video();
        act.setup_image();
        act.setup_loader();
        if let Some(a) = act.inner.audio.as_ref() {
            a.start_autoplay();
        }
        events::wire_triggers(&act);
        log::info!("[act1] ready");
        Ok(act)
    }

    /// Called once, when the first trigger starts the scroll-in.
    pub fn on_scroll_start(&self, f: impl FnOnce() + 'static) {
        *self.inner.on_scroll_start.borrow_mut() = Some(Box::new(f));
    }

    pub fn accepts_triggers(&self) -> bool {
        !self.is_disposed() && self.inner.scroll.get().accepts_triggers()
    }

    fn is_disposed(&self) -> bool {
        self.inner.disposed.get().is_released()
    }

    pub fn handle(&self) -> Act1Handle {
        Act1Handle {
            inner: self.downgrade(),
        }
    }

    /// A tap that landed before the module was wired leaves a flag on the
    /// window; consume it and run the scroll-in now.
    pub fn replay_early_request(&self) {
        let Some(window) = web::window() else {
            return;
        };
        let key = JsValue::from_str(PENDING_TRIGGER_FLAG);
        let pending = js_sys::Reflect::get(&window, &key)
            .map(|v| v.is_truthy())
            .unwrap_or(false);
        if pending {
            _ = js_sys::Reflect::delete_property(&window, &key);
            log::debug!("[act1] replaying a tap from before load");
            self.trigger("early tap");
        }
    }

    pub fn center_hint(&self) -> Option<&web::HtmlElement> {
        self.inner.center_hint.as_ref()
    }

    /// Returns true the first time only.
    pub fn mark_wheel_logged(&self) -> bool {
        !self.inner.wheel_logged.replace(true)
    }

    fn downgrade(&self) -> Weak<Act1State> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Act1State>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn push_timer(&self, handle: Option<i32>) {
        if let Some(h) = handle {
            self.inner.timers.borrow_mut().push(h);
        }
    }

    /// Start the scroll-in. Repeated triggers are ignored.
    pub fn trigger(&self, source: &'static str) {
        if self.is_disposed() {
            return;
        }
        let mut scroll = self.inner.scroll.get();
        if !scroll.try_begin() {
            return;
        }
        self.inner.scroll.set(scroll);
        log::info!("[act1] scroll-in triggered by {}", source);

        let cb = self.inner.on_scroll_start.borrow_mut().take();
        if let Some(cb) = cb {
            cb();
        }

        if let Some(body) = self.inner.document.body() {
            _ = body.class_list().add_1("scroll-in");
            dom::set_style(&body, "overflow", "hidden");
        }
        let weak = self.downgrade();
        let t = dom::set_timeout(SCROLL_DURATION_MS + SCROLL_COMPLETE_SLACK_MS, move || {
            if let Some(act) = Act1::upgrade(&weak) {
                act.complete_scroll_in();
            }
        });
        self.push_timer(t);
    }

    fn complete_scroll_in(&self) {
        let mut scroll = self.inner.scroll.get();
        if !scroll.complete() {
            return;
        }
        self.inner.scroll.set(scroll);
        if let Some(body) = self.inner.document.body() {
            _ = body.class_list().add_1("scroll-in-complete");
            dom::set_style(&body, "background", "#000");
        }
        if let Some(video) = self.inner.video.clone() {
            let transition = format!("opacity {}ms ease", SCROLL_DURATION_MS);
            dom::set_styles(&video, &[("transition", transition.as_str()), ("opacity", "0")]);
            let t = dom::set_timeout(SCROLL_DURATION_MS + VIDEO_HIDE_SLACK_MS, move || {
                _ = video.pause();
                video.set_hidden(true);
            });
            self.push_timer(t);
        }
        if let Some(image) = self.inner.image.as_ref() {
            image.set_hidden(true);
        }
        log::debug!("[act1] scroll-in complete");
        dom::dispatch(EVENT_TRIGGER_DONE);
    }

    fn wire_mode_toggle(&self) {
        let weak = self.downgrade();
        dom::add_listener::<web::Event>(&self.inner.toggle_button, "click", move |_| {
            let Some(act) = Act1::upgrade(&weak) else {
                return;
            };
            let s = &act.inner;
            let static_mode = !s.static_mode.get();
            s.static_mode.set(static_mode);
            if static_mode {
                if let Some(image) = s.image.as_ref() {
                    image.set_hidden(false);
                }
                if let Some(video) = s.video.as_ref() {
                    _ = video.pause();
                }
                s.toggle_button.set_text_content(Some("Video mode"));
            } else {
                if let Some(video) = s.video.as_ref() {
                    audio::play_quietly(video, "video");
                }
                if let Some(image) = s.image.as_ref() {
                    image.set_hidden(true);
                }
                s.toggle_button.set_text_content(Some("Static mode"));
            }
        });
    }

    fn wire_audio_toggle(&self, button: &web::HtmlElement) {
        let weak = self.downgrade();
        dom::add_listener::<web::Event>(button, "click", move |_| {
            let Some(act) = Act1::upgrade(&weak) else {
                return;
            };
            let s = &act.inner;
            let Some(panel) = s.music_controls.as_ref() else {
                return;
            };
            panel.set_hidden(!panel.hidden());
            if let Some(a) = s.audio.as_ref() {
                a.refresh_mute_label();
                a.resume_on_gesture();
            }
        });
    }

    fn setup_video(&self) {
        let Some(video) = self.inner.video.clone() else {
            return;
        };
        if !video.src().ends_with(VIDEO_SRC) {
            video.set_src(VIDEO_SRC);
            video.load();
        }
        audio::play_quietly(&video, "video");

        let weak = self.downgrade();
        let v = video.clone();
        dom::add_listener::<web::Event>(&video, "error", move |_| {
            let Some(act) = Act1::upgrade(&weak) else {
                return;
            };
            if act.is_disposed() {
                return;
            }
            let mut b = act.inner.video_budget.get();
            match b.record() {
                ErrorLog::Log => log::error!(
                    "[act1] video failed to load {}: {:?}",
                    v.src(),
                    v.error().map(|e| e.code())
                ),
                ErrorLog::SuppressNotice => log::warn!("[act1] further video errors suppressed"),
                ErrorLog::Silent => {}
            }
            act.inner.video_budget.set(b);
        });

        let once = dom::ListenerOptions {
            once: true,
            ..Default::default()
        };
        for event in ["canplay", "playing"] {
            let weak = self.downgrade();
            dom::add_listener_with_options::<web::Event>(&video, event, once, move |_| {
                if let Some(act) = Act1::upgrade(&weak) {
                    act.hide_loader();
                }
            });
        }
    }

    fn setup_image(&self) {
        let Some(image) = self.inner.image.clone() else {
            return;
        };
        if !image.src().ends_with(IMAGE_SRC) {
            image.set_src(IMAGE_SRC);
        }

        let weak = self.downgrade();
        let img = image.clone();
        dom::add_listener::<web::Event>(&image, "load", move |_| {
            log::debug!("[act1] image loaded {} ({}px)", img.src(), img.natural_width());
            if let Some(act) = Act1::upgrade(&weak) {
                act.hide_loader();
            }
        });

        let weak = self.downgrade();
        let img = image.clone();
        dom::add_listener::<web::Event>(&image, "error", move |_| {
            let Some(act) = Act1::upgrade(&weak) else {
                return;
            };
            let s = &act.inner;
            let mut b = s.image_budget.get();
            match b.record() {
                ErrorLog::Log => log::error!("[act1] image failed to load {}", img.src()),
                ErrorLog::SuppressNotice => log::warn!("[act1] further image errors suppressed"),
                ErrorLog::Silent => {}
            }
            s.image_budget.set(b);
            if b.exhausted() && !s.placeholder_used.replace(true) {
                img.set_src(IMAGE_PLACEHOLDER_SRC);
            }
            act.hide_loader();
        });

        if image.complete() && image.natural_width() > 0 {
            log::debug!("[act1] image already loaded {}", image.src());
            self.hide_loader();
        }
    }

    fn setup_loader(&self) {
        if self.inner.loader.is_none() {
            return;
        }
        let weak = self.downgrade();
        let t = dom::set_timeout(MIN_LOADER_SHOW_MS as i32, move || {
            if let Some(act) = Act1::upgrade(&weak) {
                act.hide_loader();
            }
        });
        if let Some(old) = self.inner.loader_timer.replace(t) {
            dom::clear_timeout(old);
        }
    }

    /// Hide the loader once it has been up for the minimum time.
    fn hide_loader(&self) {
        let s = &self.inner;
        let Some(loader) = s.loader.as_ref() else {
            return;
        };
        if loader.has_attribute("hidden") {
            return;
        }
        if let Some(t) = s.loader_timer.take() {
            dom::clear_timeout(t);
        }
        if let Some(remaining) = loader_remaining_ms(s.loader_shown_at, dom::now_ms(), MIN_LOADER_SHOW_MS)
        {
            let weak = self.downgrade();
            let t = dom::set_timeout(remaining.ceil() as i32, move || {
                if let Some(act) = Act1::upgrade(&weak) {
                    act.hide_loader();
                }
            });
            s.loader_timer.set(t);
            return;
        }
        _ = loader.set_attribute("hidden", "");
        _ = loader.set_attribute("aria-hidden", "true");
    }

    /// Vacate the page: stop media, drop Act 1 nodes and sweep leftovers.
    /// Idempotent.
    pub fn dispose(&self) {
        let s = &self.inner;
        let mut latch = s.disposed.get();
        if !latch.claim() {
            return;
        }
        s.disposed.set(latch);
        let mut td = Teardown::new("act1");

        let timers: Vec<i32> = s.timers.borrow_mut().drain(..).collect();
        td.always("timers", || {
            timers.into_iter().for_each(dom::clear_timeout);
            if let Some(t) = s.loader_timer.take() {
                dom::clear_timeout(t);
            }
        });
        if let Some(video) = s.video.as_ref() {
            td.step("video pause", || video.pause());
            td.step("video source", || {
                video.remove_attribute("src")?;
                video.load();
                Ok::<(), JsValue>(())
            });
            td.always("video remove", || video.remove());
        }
        if let Some(image) = s.image.as_ref() {
            td.always("image", || image.remove());
        }
        if let Some(loader) = s.loader.as_ref() {
            td.always("loader", || loader.remove());
        }
        if let Some(panel) = s.music_controls.as_ref() {
            td.always("music controls", || panel.remove());
        }
        if let Some(a) = s.audio.as_ref() {
            td.step("audio", || a.shut_down());
        }
        td.step("controls", || {
            for id in CONTROL_IDS {
                dom::remove_by_id(&s.document, id)?;
            }
            Ok::<(), JsValue>(())
        });
        if let Some(body) = s.document.body() {
            td.step("body classes", || {
                body.class_list().remove_2("scroll-in", "scroll-in-complete")
            });
            td.always("sweep", || sweep_body(&body));
            td.always("background", || dom::set_style(&body, "background", "#000"));
        }
        td.finish();
    }
}

/// Remove or hide whatever Act 1 markup is still attached to `<body>`.
fn sweep_body(body: &web::HtmlElement) {
    let children = body.children();
    let nodes: Vec<web::Element> = (0..children.length())
        .filter_map(|i| children.item(i))
        .collect();
    for el in nodes {
        match sweep_decision(&el.id(), &el.class_name(), &el.tag_name()) {
            Sweep::Keep => {}
            Sweep::Hide => {
                if let Some(h) = el.dyn_ref::<web::HtmlElement>() {
                    dom::set_style(h, "display", "none");
                }
            }
            Sweep::Remove => el.remove(),
        }
    }
}
