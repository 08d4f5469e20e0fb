use crate::constants::{AUDIO_SRC, STORAGE_KEY_MUTED, STORAGE_KEY_VOLUME};
use crate::core::media::{
    mute_button_label, parse_volume_percent, AutoplayOutcome, ErrorBudget, ErrorLog, MediaPrefs,
};
use crate::core::teardown::first_error;
use crate::dom;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn storage() -> Option<web::Storage> {
    web::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn load_prefs() -> MediaPrefs {
    let Some(s) = storage() else {
        return MediaPrefs::default();
    };
    let volume = s.get_item(STORAGE_KEY_VOLUME).ok().flatten();
    let muted = s.get_item(STORAGE_KEY_MUTED).ok().flatten();
    MediaPrefs::from_stored(volume.as_deref(), muted.as_deref())
}

fn store(key: &str, value: &str) {
    if let Some(s) = storage() {
        if let Err(e) = s.set_item(key, value) {
            log::debug!("[audio] could not persist {}: {:?}", key, e);
        }
    }
}

/// Background music for Act 1 plus its control panel.
#[derive(Clone)]
pub struct AmbientAudio {
    el: web::HtmlAudioElement,
    volume_slider: Option<web::HtmlInputElement>,
    mute_button: Option<web::HtmlElement>,
    budget: Rc<Cell<ErrorBudget>>,
}

impl AmbientAudio {
    pub fn new(document: &web::Document, el: web::HtmlAudioElement) -> Self {
        let audio = Self {
            el,
            volume_slider: dom::element_by_id(document, "audio-volume"),
            mute_button: dom::element_by_id(document, "audio-mute"),
            budget: Rc::new(Cell::new(ErrorBudget::default())),
        };
        let prefs = load_prefs();
        if !audio.el.src().ends_with(AUDIO_SRC) {
            audio.el.set_src(AUDIO_SRC);
            audio.el.load();
        }
        audio.el.set_volume(prefs.volume);
        audio.el.set_muted(prefs.muted);
        if let Some(slider) = audio.volume_slider.as_ref() {
            slider.set_value(&prefs.volume_percent());
        }
        audio.refresh_mute_label();
        audio.wire_media_events();
        audio.wire_controls();
        audio
    }

    fn wire_media_events(&self) {
        let el = self.el.clone();
        let budget = self.budget.clone();
        dom::add_listener::<web::Event>(&self.el, "error", move |_| {
            let mut b = budget.get();
            match b.record() {
                ErrorLog::Log => log::error!("[audio] failed to load {}: {:?}", el.src(), el.error().map(|e| e.code())),
                ErrorLog::SuppressNotice => log::warn!("[audio] further audio errors suppressed"),
                ErrorLog::Silent => {}
            }
            if b.exhausted() {
                _ = el.pause();
            }
            budget.set(b);
        });

        let logged = Cell::new(false);
        dom::add_listener::<web::Event>(&self.el, "canplay", move |_| {
            if !logged.replace(true) {
                log::debug!("[audio] ready to play");
            }
        });
    }

    fn wire_controls(&self) {
        if let Some(slider) = self.volume_slider.clone() {
            let el = self.el.clone();
            let s2 = slider.clone();
            dom::add_listener::<web::Event>(&slider, "input", move |_| {
                let raw = s2.value();
                if let Some(v) = parse_volume_percent(&raw) {
                    el.set_volume(v);
                    store(STORAGE_KEY_VOLUME, raw.trim());
                }
            });
        }
        if let Some(button) = self.mute_button.clone() {
            let this = self.clone();
            dom::add_listener::<web::Event>(&button, "click", move |_| {
                let muted = !this.el.muted();
                this.el.set_muted(muted);
                this.refresh_mute_label();
                let prefs = MediaPrefs {
                    volume: this.el.volume(),
                    muted,
                };
                store(STORAGE_KEY_MUTED, prefs.muted_flag());
            });
        }
    }

    pub fn refresh_mute_label(&self) {
        if let Some(b) = self.mute_button.as_ref() {
            b.set_text_content(Some(mute_button_label(self.el.muted())));
        }
    }

    fn set_volume_visible(&self, visible: bool) {
        if let Some(s) = self.volume_slider.as_ref() {
            s.set_hidden(!visible);
        }
    }

    /// With sound, then muted, then give up until the user interacts.
    pub async fn autoplay(&self) -> AutoplayOutcome {
        let outcome = if play(&self.el).await.is_ok() {
            log::debug!("[audio] autoplay with sound");
            AutoplayOutcome::WithSound
        } else {
            self.el.set_muted(true);
            match play(&self.el).await {
                Ok(()) => {
                    log::debug!("[audio] audible autoplay blocked, playing muted");
                    AutoplayOutcome::Muted
                }
                Err(e) => {
                    log::debug!("[audio] autoplay blocked, waiting for a gesture: {:?}", e);
                    AutoplayOutcome::Blocked
                }
            }
        };
        self.refresh_mute_label();
        self.set_volume_visible(outcome.shows_volume());
        outcome
    }

    pub fn start_autoplay(&self) {
        let this = self.clone();
        spawn_local(async move {
            _ = this.autoplay().await;
        });
    }

    /// Called from a user gesture: playback that autoplay refused may start now.
    pub fn resume_on_gesture(&self) {
        if self.el.paused() && !self.budget.get().exhausted() {
            play_quietly(&self.el, "audio");
            self.set_volume_visible(true);
        }
    }

    /// Stop playback, release the source and detach the element. Every
    /// action runs; the first failure is reported.
    pub fn shut_down(&self) -> Result<(), JsValue> {
        let paused = self.el.pause();
        let released = self.el.remove_attribute("src").map(|()| self.el.load());
        self.el.remove();
        first_error([paused, released])
    }
}

async fn play(el: &web::HtmlMediaElement) -> Result<(), JsValue> {
    JsFuture::from(el.play()?).await.map(|_| ())
}

/// Best-effort play for media whose rejection only matters as a log line.
pub fn play_quietly(el: &web::HtmlMediaElement, label: &'static str) {
    let el = el.clone();
    spawn_local(async move {
        if let Err(e) = play(&el).await {
            log::debug!("[{}] play() rejected: {:?}", label, e);
        }
    });
}
