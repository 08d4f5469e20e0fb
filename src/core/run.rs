// One warp execution: the particle field, the ramp bookkeeping and the
// idle -> running -> stopped loop phase, stepped once per animation frame.

use super::particles::{ParticleField, SpawnBounds};
use super::ramp::{GlowState, RampState, WarpTuning};
use crate::constants::{CAMERA_Z, STAR_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    Idle,
    Running,
    Stopped,
}

/// Everything the renderer and the style mapping need for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameVisuals {
    pub elapsed: f32,
    pub speed: f32,
    pub speed_ease: f32,
    pub stretch: (f32, f32),
    pub overlay_opacity: f32,
    pub glow: GlowState,
    pub glow_z: f32,
    pub text_flicker: f32,
    /// Set on the single frame where the ramp completes.
    pub finished: bool,
}

pub struct WarpRun {
    tuning: WarpTuning,
    field: ParticleField,
    ramp: RampState,
    phase: LoopPhase,
    camera_z: f32,
    viewport: (f32, f32),
    flicker_phase: f32,
    rng: StdRng,
}

impl WarpRun {
    pub fn new(tuning: WarpTuning, viewport_w: f32, viewport_h: f32, seed: u64) -> Self {
        Self::with_capacity(tuning, STAR_COUNT, viewport_w, viewport_h, seed)
    }

    pub fn with_capacity(
        tuning: WarpTuning,
        capacity: usize,
        viewport_w: f32,
        viewport_h: f32,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let flicker_phase = rng.gen::<f32>() * std::f32::consts::TAU;
        let field = ParticleField::new(
            capacity,
            SpawnBounds::for_viewport(viewport_w, viewport_h),
            &mut rng,
        );
        Self {
            tuning,
            field,
            ramp: RampState::default(),
            phase: LoopPhase::Idle,
            camera_z: CAMERA_Z,
            viewport: (viewport_w, viewport_h),
            flicker_phase,
            rng,
        }
    }

    /// Reset timing and enter `Running`. Safe to call again; each call begins
    /// a fresh ramp.
    pub fn start(&mut self) {
        self.ramp = RampState::default();
        self.phase = LoopPhase::Running;
    }

    pub fn stop(&mut self) {
        self.phase = LoopPhase::Stopped;
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    pub fn transition_started(&self) -> bool {
        self.ramp.transition_started()
    }

    pub fn ramp(&self) -> &RampState {
        &self.ramp
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn flicker_phase(&self) -> f32 {
        self.flicker_phase
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
        self.field.set_bounds(SpawnBounds::for_viewport(width, height));
    }

    /// Advance one frame. Returns `None` without touching any state once the
    /// run is not `Running`; the caller stops scheduling frames at that point.
    pub fn step(&mut self, dt_sec: f32) -> Option<FrameVisuals> {
        if self.phase != LoopPhase::Running {
            return None;
        }
        let tuning = self.tuning;
        let elapsed = self.ramp.elapsed + dt_sec.max(0.0);
        let speed = tuning.current_speed(elapsed);
        self.field.advance(speed, dt_sec, self.camera_z, &mut self.rng);

        let finished = self.ramp.update(&tuning, elapsed);
        if finished {
            self.phase = LoopPhase::Stopped;
        }

        let speed_ease = tuning.speed_ease(elapsed);
        let (vw, vh) = self.viewport;
        let glow = tuning.glow(elapsed, vw, vh, self.flicker_phase);
        let mut overlay_opacity = tuning.light_overlay_opacity(elapsed);
        let glow_z = if glow.active {
            // Keep the white overlay from burying the growing glow.
            overlay_opacity = (overlay_opacity * (1.0 - glow.factor)).max(0.0);
            self.camera_z - 1.0
        } else {
            0.0
        };

        Some(FrameVisuals {
            elapsed,
            speed,
            speed_ease,
            stretch: tuning.screen_stretch(speed_ease),
            overlay_opacity,
            glow,
            glow_z,
            text_flicker: tuning.text_flicker(elapsed, speed_ease, glow.factor, self.flicker_phase),
            finished,
        })
    }
}
