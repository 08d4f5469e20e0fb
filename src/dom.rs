use js_sys::Promise;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Listener that lives for the rest of the page.
pub fn add_listener<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ListenerOptions {
    pub passive: bool,
    pub once: bool,
    pub capture: bool,
}

pub fn add_listener_with_options<E: JsCast + 'static>(
    target: &web::EventTarget,
    event: &str,
    options: ListenerOptions,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_once(options.once);
    opts.set_capture(options.capture);
    _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(2.0);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Viewport in CSS pixels.
pub fn viewport_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let read = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as f32)
            .unwrap_or(1.0)
            .max(1.0)
    };
    (read(w.inner_width()), read(w.inner_height()))
}

#[inline]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

pub fn set_styles(el: &web::HtmlElement, pairs: &[(&str, &str)]) {
    let style = el.style();
    for (k, v) in pairs {
        _ = style.set_property(k, v);
    }
}

/// One-shot timer. Returns the handle for `clear_timeout`.
pub fn set_timeout(ms: i32, f: impl FnOnce() + 'static) -> Option<i32> {
    let window = web::window()?;
    let cb = Closure::once_into_js(f);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms)
        .ok()
}

pub fn clear_timeout(handle: i32) {
    if let Some(w) = web::window() {
        w.clear_timeout_with_handle(handle);
    }
}

/// Promise resolving after `ms`.
pub fn delay(ms: i32) -> Promise {
    Promise::new(&mut |resolve, _reject| {
        _ = set_timeout(ms, move || {
            _ = resolve.call0(&JsValue::UNDEFINED);
        });
    })
}

/// Promise resolving the first time `name` is dispatched on the window.
pub fn window_event(name: &'static str) -> Promise {
    Promise::new(&mut |resolve, _reject| {
        let Some(window) = web::window() else {
            return;
        };
        let cb = Closure::once_into_js(move || {
            _ = resolve.call0(&JsValue::UNDEFINED);
        });
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);
        _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            cb.unchecked_ref(),
            &opts,
        );
    })
}

/// Broadcast a payload-less event on the window.
pub fn dispatch(name: &str) {
    let Some(window) = web::window() else {
        return;
    };
    match web::CustomEvent::new(name) {
        Ok(ev) => {
            _ = window.dispatch_event(&ev);
        }
        Err(e) => log::warn!("could not create event {}: {:?}", name, e),
    }
}

/// Remove an element if present; `Ok(false)` when it was already gone.
pub fn remove_by_id(document: &web::Document, id: &str) -> Result<bool, JsValue> {
    match document.get_element_by_id(id) {
        Some(el) => {
            el.remove();
            Ok(true)
        }
        None => Ok(false),
    }
}

pub fn is_touch_device(window: &web::Window) -> bool {
    let has_touch_start = js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart"))
        .unwrap_or(false);
    let touch_points = window.navigator().max_touch_points() > 0;
    let coarse = window
        .match_media("(pointer:coarse)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false);
    has_touch_start || touch_points || coarse
}

pub async fn fetch(url: &str) -> Result<web::Response, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()
}

pub async fn response_text(resp: &web::Response) -> Result<String, JsValue> {
    let text = JsFuture::from(resp.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}
