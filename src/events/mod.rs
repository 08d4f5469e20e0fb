use crate::act1::Act1;
use crate::constants::EVENT_TRIGGER_REQUEST;
use crate::dom;
use web_sys as web;

mod keyboard;
mod pointer;
mod wheel;

/// Every Act 1 -> Act 2 trigger source funnels into `Act1::trigger`.
pub fn wire_triggers(act: &Act1) {
    let Some(window) = web::window() else {
        return;
    };
    wheel::wire_wheel(&window, act);
    keyboard::wire_page_keys(&window, act);
    pointer::wire_center_hint(&window, act);

    let handle = act.handle();
    dom::add_listener::<web::Event>(&window, EVENT_TRIGGER_REQUEST, move |_| {
        if let Some(act) = handle.upgrade() {
            act.trigger("broadcast");
        }
    });
}
