use crate::act1::Act1;
use crate::core::trigger::{is_hint_activation_key, is_trigger_key};
use crate::dom;
use web_sys as web;

/// ArrowDown, PageDown and space anywhere on the page.
pub fn wire_page_keys(window: &web::Window, act: &Act1) {
    let handle = act.handle();
    dom::add_listener::<web::KeyboardEvent>(window, "keydown", move |ev| {
        let Some(act) = handle.upgrade().filter(Act1::accepts_triggers) else {
            return;
        };
        if is_trigger_key(&ev.key()) {
            ev.prevent_default();
            act.trigger("keyboard");
        }
    });
}

/// Enter and space on the focused hint.
pub fn wire_hint_keys(hint: &web::HtmlElement, act: &Act1) {
    let handle = act.handle();
    dom::add_listener::<web::KeyboardEvent>(hint, "keydown", move |ev| {
        let Some(act) = handle.upgrade() else {
            return;
        };
        if is_hint_activation_key(&ev.key()) {
            ev.prevent_default();
            act.trigger("hint key");
        }
    });
}
