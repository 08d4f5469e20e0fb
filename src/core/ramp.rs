// Warp ramp curves. Everything here is a pure function of elapsed time (plus
// the run's flicker phase), so a frame can be reproduced from `t` alone.

use crate::constants::*;

/// Every knob of the acceleration ramp and the glow that rides on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpTuning {
    pub max_speed: f32,
    pub start_factor: f32,
    pub accel_duration: f32,
    pub accel_power: f32,
    pub light_fade_duration: f32,
    pub max_light_opacity: f32,
    pub stretch_max: f32,
    pub stretch_axis_factor: f32,
    pub glow_appear_speed: f32,
    pub glow_full_speed: f32,
    pub glow_growth_power: f32,
    pub glow_base_scale: f32,
    pub glow_max_scale_factor: f32,
    pub glow_base_opacity: f32,
    pub glow_max_opacity: f32,
    pub flicker_freq: f32,
    pub flicker_amplitude: f32,
}

impl Default for WarpTuning {
    fn default() -> Self {
        Self {
            max_speed: SPEED,
            start_factor: START_SPEED_FACTOR,
            accel_duration: ACCEL_DURATION,
            accel_power: ACCEL_POWER,
            light_fade_duration: LIGHT_FADE_DURATION,
            max_light_opacity: MAX_LIGHT_OPACITY,
            stretch_max: STRETCH_MAX,
            stretch_axis_factor: STRETCH_AXIS_FACTOR,
            glow_appear_speed: GLOW_APPEAR_SPEED,
            glow_full_speed: GLOW_FULL_SPEED,
            glow_growth_power: GLOW_GROWTH_POWER,
            glow_base_scale: GLOW_BASE_SCALE,
            glow_max_scale_factor: GLOW_MAX_SCALE_FACTOR,
            glow_base_opacity: GLOW_BASE_OPACITY,
            glow_max_opacity: GLOW_MAX_OPACITY,
            flicker_freq: GLOW_FLICKER_FREQ,
            flicker_amplitude: GLOW_FLICKER_AMPLITUDE,
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl WarpTuning {
    /// Ramp progress in `[0, 1]`; reaches 1 at `accel_duration`.
    #[inline]
    pub fn progress(&self, t: f32) -> f32 {
        if self.accel_duration <= 0.0 {
            return 1.0;
        }
        (t.max(0.0) / self.accel_duration).min(1.0)
    }

    /// Eased progress, `progress^accel_power`.
    #[inline]
    pub fn speed_ease(&self, t: f32) -> f32 {
        self.progress(t).powf(self.accel_power)
    }

    /// `start + (1 - start) * eased`; saturates at 1 once `t >= accel_duration`.
    #[inline]
    pub fn speed_factor(&self, t: f32) -> f32 {
        self.start_factor + (1.0 - self.start_factor) * self.speed_ease(t)
    }

    #[inline]
    pub fn current_speed(&self, t: f32) -> f32 {
        self.max_speed * self.speed_factor(t)
    }

    /// White overlay: zero through the ramp, then a linear fade capped at
    /// `max_light_opacity`.
    pub fn light_overlay_opacity(&self, t: f32) -> f32 {
        if t <= self.accel_duration {
            return 0.0;
        }
        let fade = if self.light_fade_duration > 0.0 {
            ((t - self.accel_duration) / self.light_fade_duration).min(1.0)
        } else {
            1.0
        };
        fade * self.max_light_opacity
    }

    /// Linear position of `speed` between the appear and full thresholds,
    /// clamped to `[0, 1]`.
    pub fn glow_raw(&self, speed: f32) -> f32 {
        let denom = (self.glow_full_speed - self.glow_appear_speed).max(1e-4);
        ((speed - self.glow_appear_speed) / denom).clamp(0.0, 1.0)
    }

    /// `raw^growth_power`: slow start, fast finish.
    pub fn glow_factor(&self, speed: f32) -> f32 {
        self.glow_raw(speed).powf(self.glow_growth_power)
    }

    /// Vertical stretch `1 + e * max`, horizontal stretch scaled by the axis factor.
    pub fn screen_stretch(&self, eased: f32) -> (f32, f32) {
        let stretch = eased * self.stretch_max;
        (1.0 + stretch * self.stretch_axis_factor, 1.0 + stretch)
    }

    pub fn glow_target_scale(&self, viewport_w: f32, viewport_h: f32) -> f32 {
        viewport_w.max(viewport_h) * self.glow_max_scale_factor
    }

    /// Glow sprite state for time `t`. `flicker_phase` is fixed per run.
    pub fn glow(&self, t: f32, viewport_w: f32, viewport_h: f32, flicker_phase: f32) -> GlowState {
        let eased = self.speed_ease(t);
        let speed = self.current_speed(t);
        let raw = self.glow_raw(speed);
        let factor = raw.powf(self.glow_growth_power);
        let control = flicker_control(eased, factor);

        let flicker =
            (t * self.flicker_freq + flicker_phase).sin() * self.flicker_amplitude * control;
        let scale_flicker = 1.0
            + (t * (self.flicker_freq * GLOW_SCALE_FLICKER_FREQ_RATIO) + flicker_phase).sin()
                * GLOW_SCALE_FLICKER_AMPLITUDE
                * control;

        let scale = lerp(
            self.glow_base_scale,
            self.glow_target_scale(viewport_w, viewport_h),
            factor,
        );
        let opacity = lerp(self.glow_base_opacity, self.glow_max_opacity, factor);

        GlowState {
            raw,
            factor,
            scale: scale * scale_flicker,
            opacity: (opacity + flicker).clamp(0.0, self.glow_max_opacity),
            active: raw > 0.0,
        }
    }

    /// Rectified flicker used by the title's text glow.
    pub fn text_flicker(&self, t: f32, eased: f32, glow_factor: f32, flicker_phase: f32) -> f32 {
        (t * self.flicker_freq + flicker_phase).sin().abs()
            * self.flicker_amplitude
            * flicker_control(eased, glow_factor)
    }
}

/// Flicker stays dormant until either the ramp or the glow gets going.
#[inline]
pub fn flicker_control(speed_ease: f32, glow_factor: f32) -> f32 {
    speed_ease.max(glow_factor)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlowState {
    pub raw: f32,
    pub factor: f32,
    pub scale: f32,
    pub opacity: f32,
    /// The sprite moves in front of the camera while active.
    pub active: bool,
}

/// Per-run ramp bookkeeping. `transition_started` latches once.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RampState {
    pub elapsed: f32,
    pub speed_factor: f32,
    pub glow_factor: f32,
    transition_started: bool,
}

impl RampState {
    pub fn transition_started(&self) -> bool {
        self.transition_started
    }

    /// Record the values for this frame. Returns true only on the frame where
    /// the ramp first reaches full progress.
    pub fn update(&mut self, tuning: &WarpTuning, elapsed: f32) -> bool {
        self.elapsed = elapsed;
        self.speed_factor = tuning.speed_factor(elapsed);
        self.glow_factor = tuning.glow_factor(tuning.current_speed(elapsed));
        if tuning.progress(elapsed) >= 1.0 && !self.transition_started {
            self.transition_started = true;
            return true;
        }
        false
    }
}
