use super::keyboard;
use crate::act1::Act1;
use crate::core::trigger::TOUCH_HINT_LABEL;
use crate::dom::{self, ListenerOptions};
use web_sys as web;

pub fn wire_center_hint(window: &web::Window, act: &Act1) {
    let Some(hint) = act.center_hint().cloned() else {
        return;
    };
    let opts = ListenerOptions {
        passive: false,
        once: true,
        capture: true,
    };
    for event in ["pointerdown", "touchstart"] {
        let handle = act.handle();
        dom::add_listener_with_options::<web::Event>(&hint, event, opts, move |ev| {
            ev.prevent_default();
            ev.stop_propagation();
            if let Some(act) = handle.upgrade() {
                act.trigger("center hint");
            }
        });
    }

    if dom::is_touch_device(window) {
        hint.set_text_content(Some(TOUCH_HINT_LABEL));
        dom::set_styles(&hint, &[("pointer-events", "auto"), ("cursor", "pointer")]);
        _ = hint.set_attribute("role", "button");
        _ = hint.set_attribute("tabindex", "0");
        let handle = act.handle();
        let once = ListenerOptions {
            passive: false,
            once: true,
            ..Default::default()
        };
        dom::add_listener_with_options::<web::Event>(&hint, "click", once, move |ev| {
            ev.prevent_default();
            if let Some(act) = handle.upgrade() {
                act.trigger("tap");
            }
        });
        keyboard::wire_hint_keys(&hint, act);
    }
}
