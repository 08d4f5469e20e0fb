// Host-side tests for the star field: spawn invariants, motion and recycling.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod warp {
    pub mod particles {
        include!("../src/core/particles.rs");
    }
}

use constants::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use warp::particles::{ParticleField, SpawnBounds};

fn field(n: usize, seed: u64) -> (ParticleField, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let f = ParticleField::new(n, SpawnBounds::for_viewport(1280.0, 720.0), &mut rng);
    (f, rng)
}

fn assert_spawn_invariants(f: &ParticleField) {
    let b = f.bounds();
    for p in f.particles() {
        let [x, y, _] = p.position;
        assert!(x.hypot(y) >= b.clear_radius, "({x}, {y}) inside clear radius");
        assert!(x.abs() <= b.half_extent.x && y.abs() <= b.half_extent.y);
        assert!(p.size >= SIZE_MIN && p.size < SIZE_MAX);
    }
}

#[test]
fn initial_field_respects_bounds() {
    let (f, _) = field(2000, 1);
    assert_eq!(f.len(), 2000);
    assert!(!f.is_empty());
    for p in f.particles() {
        assert!(p.position[2] >= Z_FAR && p.position[2] <= Z_NEAR);
    }
    assert_spawn_invariants(&f);
}

#[test]
fn advance_moves_every_particle_by_speed_times_dt() {
    let (mut f, mut rng) = field(500, 2);
    let before: Vec<f32> = f.particles().iter().map(|p| p.position[2]).collect();
    let recycled = f.advance(10.0, 0.1, CAMERA_Z, &mut rng);
    assert_eq!(recycled, 0);
    for (p, z0) in f.particles().iter().zip(before) {
        assert!((p.position[2] - (z0 + 1.0)).abs() < 1e-3);
    }
}

#[test]
fn depth_and_clear_radius_hold_across_many_steps() {
    let (mut f, mut rng) = field(1000, 3);
    for _ in 0..600 {
        f.advance(SPEED, 1.0 / 60.0, CAMERA_Z, &mut rng);
        for p in f.particles() {
            assert!(p.position[2] >= Z_FAR && p.position[2] <= CAMERA_Z);
        }
    }
    assert!(f.recycled_total() > 0);
    assert_spawn_invariants(&f);
}

#[test]
fn particles_past_the_camera_are_recycled_not_dropped() {
    let (mut f, mut rng) = field(300, 4);
    // One huge step pushes everything past the camera.
    let recycled = f.advance(1.0e6, 1.0, CAMERA_Z, &mut rng);
    assert_eq!(recycled, 300);
    assert_eq!(f.len(), 300);
    assert_eq!(f.recycled_total(), 300);
    for p in f.particles() {
        assert!(p.position[2] >= Z_FAR && p.position[2] <= Z_NEAR);
    }
    assert_spawn_invariants(&f);
}

#[test]
fn negative_dt_does_not_move_particles() {
    let (mut f, mut rng) = field(50, 5);
    let before: Vec<f32> = f.particles().iter().map(|p| p.position[2]).collect();
    f.advance(SPEED, -1.0, CAMERA_Z, &mut rng);
    let after: Vec<f32> = f.particles().iter().map(|p| p.position[2]).collect();
    assert_eq!(before, after);
}

#[test]
fn dirty_flag_is_set_by_advance_and_cleared_by_take() {
    let (mut f, mut rng) = field(10, 6);
    assert!(f.take_dirty().is_some(), "fresh field needs an upload");
    assert!(f.take_dirty().is_none());
    f.advance(1.0, 0.016, CAMERA_Z, &mut rng);
    assert_eq!(f.take_dirty().map(|p| p.len()), Some(10));
    assert!(f.take_dirty().is_none());
}

#[test]
fn tiny_viewport_still_spawns() {
    let bounds = SpawnBounds::for_viewport(40.0, 30.0);
    assert!(bounds.clear_radius <= 15.0);
    let mut rng = StdRng::seed_from_u64(7);
    let f = ParticleField::new(100, bounds, &mut rng);
    assert_spawn_invariants(&f);
}

#[test]
fn new_bounds_only_affect_future_spawns() {
    let (mut f, mut rng) = field(200, 8);
    let before: Vec<[f32; 3]> = f.particles().iter().map(|p| p.position).collect();
    f.set_bounds(SpawnBounds::for_viewport(400.0, 300.0));
    assert_eq!(f.bounds().half_extent.x, 400.0);
    let after: Vec<[f32; 3]> = f.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);

    f.advance(1.0e6, 1.0, CAMERA_Z, &mut rng);
    for p in f.particles() {
        assert!(p.position[0].abs() <= 400.0 && p.position[1].abs() <= 300.0);
    }
}

#[test]
fn same_seed_same_field() {
    let (a, _) = field(64, 42);
    let (b, _) = field(64, 42);
    assert_eq!(a.particles(), b.particles());
}
