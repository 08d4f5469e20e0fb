// Frame state -> CSS. The DOM is written from these values once per frame and
// never read back.

use super::run::FrameVisuals;
use crate::constants::SURFACE_FADE_SEC;

#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceStyle {
    pub transform: String,
}

impl SurfaceStyle {
    pub fn from_visuals(v: &FrameVisuals) -> Self {
        let (sx, sy) = v.stretch;
        Self {
            transform: format!("scale({:.4}, {:.4})", sx, sy),
        }
    }
}

/// The render surface is attached while Act 1 is still on screen, so it
/// starts transparent.
pub const SURFACE_INITIAL_STYLES: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("inset", "0"),
    ("width", "100vw"),
    ("height", "100vh"),
    ("display", "block"),
    ("background", "#000000"),
    ("transform-origin", "50% 50%"),
    ("z-index", "2"),
    ("opacity", "0"),
];

/// Applied when a run starts and the warp takes the screen.
pub const SURFACE_SHOWN_STYLES: &[(&str, &str)] = &[("transition", "none"), ("opacity", "1")];

/// Final fade applied to the render surface on the terminal frame.
pub fn surface_fade_out() -> (String, &'static str) {
    (format!("opacity {}s ease", SURFACE_FADE_SEC), "0")
}

#[inline]
pub fn opacity_css(value: f32) -> String {
    format!("{:.4}", value.clamp(0.0, 1.0))
}

/// Blur radius (px) and alpha of the title's warm text glow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextGlow {
    pub blur: f32,
    pub alpha: f32,
}

impl TextGlow {
    pub fn compute(glow_factor: f32, text_flicker: f32) -> Self {
        Self {
            blur: 6.0 + glow_factor * 22.0 + text_flicker * 24.0,
            alpha: (0.28 + glow_factor * 0.72 + text_flicker * 0.6).min(1.0),
        }
    }

    pub fn from_visuals(v: &FrameVisuals) -> Self {
        Self::compute(v.glow.factor, v.text_flicker)
    }

    /// Shadow for the dark half of the title.
    pub fn primary_shadow(&self) -> String {
        title_shadow(self.blur, self.alpha, 1.6, 0.45)
    }

    /// Softer shadow for the grey half of the title.
    pub fn secondary_shadow(&self) -> String {
        let blur = (self.blur * 0.85).max(4.0);
        let alpha = (self.alpha * 0.85).min(1.0);
        title_shadow(blur, alpha, 1.2, 0.35)
    }
}

const OUTLINE: &str =
    "-1px -1px 0 #ffffff, 1px -1px 0 #ffffff, -1px 1px 0 #ffffff, 1px 1px 0 #ffffff";

fn title_shadow(blur: f32, alpha: f32, outer_ratio: f32, outer_alpha_ratio: f32) -> String {
    format!(
        "{OUTLINE}, 0 0 {:.2}px rgba(255,230,120,{:.3}), 0 0 {:.2}px rgba(255,200,90,{:.3})",
        blur,
        alpha,
        blur * outer_ratio,
        alpha * outer_alpha_ratio
    )
}
