use crate::act1::Act1;
use crate::constants::SCROLL_TRIGGER_THRESHOLD;
use crate::core::trigger::{classify_wheel, WheelVerdict};
use crate::dom::{self, ListenerOptions};
use web_sys as web;

pub fn wire_wheel(window: &web::Window, act: &Act1) {
    let handle = act.handle();
    let opts = ListenerOptions {
        passive: false,
        ..Default::default()
    };
    dom::add_listener_with_options::<web::WheelEvent>(window, "wheel", opts, move |ev| {
        let Some(act) = handle.upgrade().filter(Act1::accepts_triggers) else {
            return;
        };
        match classify_wheel(ev.delta_y(), SCROLL_TRIGGER_THRESHOLD) {
            WheelVerdict::Trigger => {
                ev.prevent_default();
                act.trigger("wheel");
            }
            WheelVerdict::WrongDirection => {
                if act.mark_wheel_logged() {
                    log::debug!(
                        "[act1] wheel deltaY {} is the wrong way for this device's forward scroll",
                        ev.delta_y()
                    );
                }
            }
            WheelVerdict::Ignore => {}
        }
    });
}
