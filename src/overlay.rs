use crate::constants::{LIGHT_OVERLAY_ID, TITLE_CLASS};
use crate::core::style::{opacity_css, TextGlow};
use crate::core::FrameVisuals;
use crate::dom;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const ICON_CANDIDATES: &[&str] = &["assets/title.svg", "assets/galaxy.svg"];

const FALLBACK_ICON: &str = r##"<svg viewBox="0 0 64 64" width="56" height="56" aria-hidden="true"><circle cx="32" cy="32" r="9" fill="#ffe9a8"/><ellipse cx="32" cy="32" rx="28" ry="9" fill="none" stroke="#ffd27a" stroke-width="2" transform="rotate(-20 32 32)"/></svg>"##;

/// Helper DOM nodes owned by the warp: the white light overlay and the title.
pub struct WarpNodes {
    light: web::HtmlElement,
    title: web::HtmlElement,
    line_dark: web::HtmlElement,
    line_grey: web::HtmlElement,
}

fn create_html(document: &web::Document, tag: &str) -> Result<web::HtmlElement, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<web::HtmlElement>()
        .map_err(JsValue::from)
}

impl WarpNodes {
    pub fn create(document: &web::Document) -> Result<Self, JsValue> {
        let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

        let light = create_html(document, "div")?;
        light.set_id(LIGHT_OVERLAY_ID);
        dom::set_styles(
            &light,
            &[
                ("position", "fixed"),
                ("inset", "0"),
                ("background", "#ffffff"),
                ("opacity", "0"),
                ("pointer-events", "none"),
                ("z-index", "3"),
            ],
        );

        let title = create_html(document, "div")?;
        title.set_class_name(TITLE_CLASS);
        dom::set_styles(
            &title,
            &[
                ("position", "fixed"),
                ("left", "50%"),
                ("top", "50%"),
                ("transform", "translate(-50%, -50%)"),
                ("display", "flex"),
                ("align-items", "center"),
                ("gap", "14px"),
                ("font", "600 28px system-ui, sans-serif"),
                ("pointer-events", "none"),
                ("z-index", "4"),
            ],
        );
        let icon = create_html(document, "span")?;
        icon.set_class_name("entering-icon");
        let text = create_html(document, "span")?;
        text.set_class_name("entering-text");
        let line_dark = create_html(document, "span")?;
        line_dark.set_text_content(Some("Entering the"));
        dom::set_styles(&line_dark, &[("display", "block"), ("color", "#111111")]);
        let line_grey = create_html(document, "span")?;
        line_grey.set_text_content(Some("solar system..."));
        dom::set_styles(&line_grey, &[("display", "block"), ("color", "#555555")]);
        text.append_child(&line_dark)?;
        text.append_child(&line_grey)?;
        title.append_child(&icon)?;
        title.append_child(&text)?;

        body.append_child(&light)?;
        body.append_child(&title)?;

        spawn_local(load_icon(icon));

        let nodes = Self {
            light,
            title,
            line_dark,
            line_grey,
        };
        nodes.apply_text_glow(TextGlow::compute(0.0, 0.0));
        Ok(nodes)
    }

    pub fn update(&self, visuals: &FrameVisuals) {
        dom::set_style(&self.light, "opacity", &opacity_css(visuals.overlay_opacity));
        self.apply_text_glow(TextGlow::from_visuals(visuals));
    }

    fn apply_text_glow(&self, glow: TextGlow) {
        dom::set_style(&self.line_dark, "text-shadow", &glow.primary_shadow());
        dom::set_style(&self.line_grey, "text-shadow", &glow.secondary_shadow());
    }

    pub fn remove(&self) {
        self.light.remove();
        self.title.remove();
    }
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = dom::fetch(url).await?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    dom::response_text(&resp).await
}

async fn load_icon(target: web::HtmlElement) {
    for url in ICON_CANDIDATES {
        match fetch_text(url).await {
            Ok(svg) if svg.contains("<svg") => {
                target.set_inner_html(&svg);
                return;
            }
            Ok(_) => log::debug!("[warp] {} is not an svg, trying next", url),
            Err(e) => log::debug!("[warp] icon {} unavailable: {:?}", url, e),
        }
    }
    target.set_inner_html(FALLBACK_ICON);
}
