// Host-side tests for the acceleration ramp, glow growth and overlay curves.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod warp {
    pub mod ramp {
        include!("../src/core/ramp.rs");
    }
}

use constants::*;
use warp::ramp::{flicker_control, RampState, WarpTuning};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn speed_starts_at_the_start_factor() {
    let t = WarpTuning::default();
    assert!(approx(t.speed_factor(0.0), START_SPEED_FACTOR));
    assert!(approx(t.current_speed(0.0), SPEED * START_SPEED_FACTOR));
    // Negative elapsed time is treated as zero.
    assert!(approx(t.speed_factor(-3.0), START_SPEED_FACTOR));
}

#[test]
fn speed_halfway_through_the_ramp() {
    let t = WarpTuning::default();
    assert!(approx(t.progress(4.0), 0.5));
    assert!(approx(t.speed_ease(4.0), 0.25));
    assert!(approx(t.speed_factor(4.0), 0.4));
    assert!(approx(t.current_speed(4.0), 2000.0));
}

#[test]
fn speed_saturates_after_the_ramp() {
    let t = WarpTuning::default();
    assert!(approx(t.speed_factor(ACCEL_DURATION), 1.0));
    assert!(approx(t.speed_factor(ACCEL_DURATION * 5.0), 1.0));
    assert!(approx(t.current_speed(100.0), SPEED));
}

#[test]
fn speed_is_monotonic() {
    let t = WarpTuning::default();
    let mut prev = t.current_speed(0.0);
    for i in 1..=200 {
        let s = t.current_speed(i as f32 * 0.05);
        assert!(s >= prev);
        prev = s;
    }
}

#[test]
fn zero_duration_ramp_is_immediately_full() {
    let t = WarpTuning {
        accel_duration: 0.0,
        ..WarpTuning::default()
    };
    assert!(approx(t.speed_factor(0.0), 1.0));
}

#[test]
fn glow_factor_thresholds_and_growth() {
    let t = WarpTuning::default();
    assert_eq!(t.glow_factor(0.0), 0.0);
    assert_eq!(t.glow_factor(GLOW_APPEAR_SPEED), 0.0);
    assert!(approx(t.glow_factor(4500.0), 0.03125));
    assert!(approx(t.glow_factor(GLOW_FULL_SPEED), 1.0));
    assert!(approx(t.glow_factor(GLOW_FULL_SPEED * 2.0), 1.0));

    let mut prev = 0.0;
    for s in (4000..=5000).step_by(50) {
        let g = t.glow_factor(s as f32);
        assert!(g >= prev);
        prev = g;
    }
}

#[test]
fn light_overlay_waits_for_the_ramp_then_fades_in() {
    let t = WarpTuning::default();
    assert_eq!(t.light_overlay_opacity(0.0), 0.0);
    assert_eq!(t.light_overlay_opacity(ACCEL_DURATION), 0.0);
    assert!(approx(t.light_overlay_opacity(9.5), 0.425));
    assert!(approx(t.light_overlay_opacity(11.0), MAX_LIGHT_OPACITY));
    assert!(approx(t.light_overlay_opacity(60.0), MAX_LIGHT_OPACITY));
}

#[test]
fn screen_stretch_grows_y_twice_as_fast_as_x() {
    let t = WarpTuning::default();
    assert_eq!(t.screen_stretch(0.0), (1.0, 1.0));
    let (sx, sy) = t.screen_stretch(1.0);
    assert!(approx(sx, 1.5));
    assert!(approx(sy, 2.0));
}

#[test]
fn glow_is_dormant_at_the_start() {
    let t = WarpTuning::default();
    let g = t.glow(0.0, 1280.0, 720.0, 1.3);
    assert!(!g.active);
    assert_eq!(g.factor, 0.0);
    assert!(approx(g.opacity, GLOW_BASE_OPACITY));
    assert!(approx(g.scale, GLOW_BASE_SCALE));
}

#[test]
fn glow_fills_the_screen_at_full_speed() {
    let t = WarpTuning::default();
    let g = t.glow(ACCEL_DURATION, 1280.0, 720.0, 0.0);
    assert!(g.active);
    assert!(approx(g.factor, 1.0));
    let target = t.glow_target_scale(1280.0, 720.0);
    assert!(approx(target, 1280.0 * GLOW_MAX_SCALE_FACTOR));
    // Scale flicker is within a couple of percent.
    assert!((g.scale / target - 1.0).abs() <= GLOW_SCALE_FLICKER_AMPLITUDE + 1e-4);
    assert!(g.opacity <= GLOW_MAX_OPACITY);
    assert!(g.opacity >= GLOW_MAX_OPACITY - GLOW_FLICKER_AMPLITUDE - 1e-4);
}

#[test]
fn flicker_control_takes_the_larger_driver() {
    assert_eq!(flicker_control(0.0, 0.0), 0.0);
    assert_eq!(flicker_control(0.3, 0.7), 0.7);
    assert_eq!(flicker_control(0.9, 0.1), 0.9);
    let t = WarpTuning::default();
    assert_eq!(t.text_flicker(2.0, 0.0, 0.0, 0.4), 0.0);
    assert!(t.text_flicker(2.0, 1.0, 1.0, 0.4) >= 0.0);
}

#[test]
fn ramp_state_reports_completion_once() {
    let t = WarpTuning::default();
    let mut r = RampState::default();
    assert!(!r.update(&t, 1.0));
    assert!(!r.transition_started());
    assert!(r.update(&t, ACCEL_DURATION));
    assert!(r.transition_started());
    assert!(!r.update(&t, ACCEL_DURATION + 1.0));
    assert!(approx(r.speed_factor, 1.0));
    assert!(approx(r.glow_factor, 1.0));
}
