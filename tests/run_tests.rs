// Host-side tests for a whole warp run: loop phases, the terminal frame and
// the camera it renders through.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod warp {
    pub mod particles {
        include!("../src/core/particles.rs");
    }
    pub mod ramp {
        include!("../src/core/ramp.rs");
    }
    pub mod run {
        include!("../src/core/run.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
}

use constants::*;
use warp::camera::Camera;
use warp::ramp::WarpTuning;
use warp::run::{LoopPhase, WarpRun};

fn small_run(seed: u64) -> WarpRun {
    WarpRun::with_capacity(WarpTuning::default(), 64, 1280.0, 720.0, seed)
}

#[test]
fn idle_run_produces_no_frames() {
    let mut run = small_run(1);
    assert_eq!(run.phase(), LoopPhase::Idle);
    assert!(run.step(0.016).is_none());
    assert_eq!(run.ramp().elapsed, 0.0);
}

#[test]
fn exactly_one_terminal_frame() {
    let mut run = small_run(2);
    run.start();
    let mut finished = 0;
    let mut frames = 0;
    while let Some(v) = run.step(0.5) {
        frames += 1;
        if v.finished {
            finished += 1;
            assert!(v.elapsed >= ACCEL_DURATION);
        }
        assert!(frames < 1000, "run never finished");
    }
    assert_eq!(finished, 1);
    assert_eq!(frames, 16);
    assert_eq!(run.phase(), LoopPhase::Stopped);
    assert!(run.transition_started());
    assert!(run.step(0.5).is_none());
}

#[test]
fn stop_halts_the_run() {
    let mut run = small_run(3);
    run.start();
    assert!(run.step(0.1).is_some());
    run.stop();
    assert!(!run.is_running());
    assert!(run.step(0.1).is_none());
}

#[test]
fn restart_begins_a_fresh_ramp() {
    let mut run = small_run(4);
    run.start();
    while run.step(1.0).is_some() {}
    run.start();
    assert!(run.is_running());
    assert!(!run.transition_started());
    let v = run.step(0.1).expect("running");
    assert!((v.elapsed - 0.1).abs() < 1e-5);
}

#[test]
fn glow_moves_in_front_of_the_camera_when_active() {
    let mut run = small_run(5);
    run.start();
    let early = run.step(1.0).expect("frame");
    assert!(!early.glow.active);
    assert_eq!(early.glow_z, 0.0);
    let mut last = early;
    while let Some(v) = run.step(1.0) {
        last = v;
    }
    assert!(last.glow.active);
    assert_eq!(last.glow_z, CAMERA_Z - 1.0);
    assert!(last.finished);
}

#[test]
fn stretch_follows_the_eased_ramp() {
    let mut run = small_run(6);
    run.start();
    let v = run.step(ACCEL_DURATION).expect("frame");
    assert!((v.stretch.0 - 1.5).abs() < 1e-4);
    assert!((v.stretch.1 - 2.0).abs() < 1e-4);
    assert!(v.overlay_opacity >= 0.0);
}

#[test]
fn particles_stay_in_depth_range_through_the_run() {
    let mut run = small_run(7);
    run.start();
    while run.step(1.0 / 60.0).is_some() {
        for p in run.field().particles() {
            assert!(p.position[2] >= Z_FAR && p.position[2] <= CAMERA_Z);
        }
    }
}

#[test]
fn resize_updates_spawn_bounds() {
    let mut run = small_run(8);
    run.set_viewport(300.0, 200.0);
    assert_eq!(run.field().bounds().half_extent.x, 300.0);
    assert_eq!(run.field().bounds().half_extent.y, 200.0);
}

#[test]
fn same_seed_same_run() {
    let mut a = small_run(99);
    let mut b = small_run(99);
    assert_eq!(a.flicker_phase(), b.flicker_phase());
    a.start();
    b.start();
    for _ in 0..10 {
        assert_eq!(a.step(0.1), b.step(0.1));
    }
    assert_eq!(a.field().particles(), b.field().particles());
}

#[test]
fn camera_sits_on_the_axis() {
    let cam = Camera::warp(16.0 / 9.0);
    assert_eq!(cam.eye.z, CAMERA_Z);
    // A point straight ahead lands at the centre of clip space.
    let clip = cam.view_proj() * glam::Vec4::new(0.0, 0.0, -500.0, 1.0);
    assert!((clip.x / clip.w).abs() < 1e-5);
    assert!((clip.y / clip.w).abs() < 1e-5);
}

#[test]
fn camera_rejects_degenerate_aspect() {
    let mut cam = Camera::warp(0.0);
    assert_eq!(cam.aspect, 1.0);
    cam.set_aspect(f32::NAN);
    assert_eq!(cam.aspect, 1.0);
    cam.set_aspect(2.0);
    assert_eq!(cam.aspect, 2.0);
}
