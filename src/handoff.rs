use crate::constants::{APP_MOUNT_ID, BUNDLE_INDEX_PATH, BUNDLE_MOUNT_PREFIX};
use crate::core::bundle::{resolve_asset_path, rewrite_asset_urls, BundleError, BundleManifest};
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn js(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

async fn fetch_text(path: &str) -> anyhow::Result<String> {
    let resp = dom::fetch(path).await.map_err(js)?;
    if !resp.ok() {
        return Err(BundleError::Status {
            path: path.to_string(),
            status: resp.status(),
        }
        .into());
    }
    dom::response_text(&resp).await.map_err(js)
}

/// The persistent Act 3 container, created hidden if the page has none.
pub fn ensure_mount(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    if let Some(el) = dom::element_by_id::<web::HtmlElement>(document, APP_MOUNT_ID) {
        return Ok(el);
    }
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    let el: web::HtmlElement = document
        .create_element("div")
        .map_err(js)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    el.set_id(APP_MOUNT_ID);
    dom::set_styles(
        &el,
        &[
            ("position", "absolute"),
            ("left", "0"),
            ("top", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("z-index", "0"),
            ("pointer-events", "auto"),
            ("opacity", "0"),
            ("transition", "opacity 0.6s ease"),
            ("overflow", "hidden"),
        ],
    );
    body.append_child(&el).map_err(js)?;
    Ok(el)
}

pub fn reveal_mount(mount: &web::HtmlElement) {
    dom::set_styles(
        mount,
        &[("z-index", "0"), ("pointer-events", "auto"), ("opacity", "1")],
    );
}

async fn inject_stylesheet(document: &web::Document, href: &str) -> anyhow::Result<()> {
    let path = resolve_asset_path(href, BUNDLE_MOUNT_PREFIX);
    let css = rewrite_asset_urls(&fetch_text(&path).await?, BUNDLE_MOUNT_PREFIX);
    let style = document.create_element("style").map_err(js)?;
    style.set_text_content(Some(&css));
    let head = document.head().ok_or_else(|| anyhow::anyhow!("no head"))?;
    head.append_child(&style).map_err(js)?;
    log::debug!("[handoff] stylesheet {} injected", path);
    Ok(())
}

/// Module scripts load through an object URL so the rewritten source runs
/// same-origin.
async fn inject_module(document: &web::Document, src: &str) -> anyhow::Result<()> {
    let path = resolve_asset_path(src, BUNDLE_MOUNT_PREFIX);
    let code = rewrite_asset_urls(&fetch_text(&path).await?, BUNDLE_MOUNT_PREFIX);

    let opts = web::BlobPropertyBag::new();
    opts.set_type("text/javascript");
    let parts = js_sys::Array::of1(&JsValue::from_str(&code));
    let blob = web::Blob::new_with_str_sequence_and_options(&parts, &opts).map_err(js)?;
    let url = web::Url::create_object_url_with_blob(&blob).map_err(js)?;

    let script: web::HtmlScriptElement = document
        .create_element("script")
        .map_err(js)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    script.set_type("module");
    script.set_src(&url);

    let loaded_path = path.clone();
    let onload = Closure::once_into_js(move || {
        log::info!("[handoff] act 3 module running ({})", loaded_path);
    });
    script.set_onload(Some(onload.unchecked_ref()));
    let failed_path = path.clone();
    let onerror = Closure::once_into_js(move |e: JsValue| {
        log::error!("[handoff] act 3 module failed ({}): {:?}", failed_path, e);
    });
    script.set_onerror(Some(onerror.unchecked_ref()));

    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.append_child(&script).map_err(js)?;
    Ok(())
}

/// Fetch the Act 3 bundle and inject its styles and module. Individual
/// failures are logged and the hand-off carries on without that piece.
pub async fn load_bundle(document: &web::Document) {
    let html = match fetch_text(BUNDLE_INDEX_PATH).await {
        Ok(t) => t,
        Err(e) => {
            log::warn!("[handoff] bundle index unavailable: {:#}", e);
            return;
        }
    };
    let manifest = BundleManifest::parse(&html);
    log::debug!(
        "[handoff] manifest: {} stylesheet(s), script {:?}",
        manifest.stylesheets.len(),
        manifest.module_script
    );
    for href in manifest.stylesheets.iter() {
        if let Err(e) = inject_stylesheet(document, href).await {
            log::warn!("[handoff] stylesheet {} skipped: {:#}", href, e);
        }
    }
    match manifest.require_script() {
        Ok(src) => {
            if let Err(e) = inject_module(document, src).await {
                log::error!("[handoff] module {} not started: {:#}", src, e);
            }
        }
        Err(e) => log::warn!("[handoff] {}; continuing without act 3", e),
    }
}
