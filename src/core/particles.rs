// Camera-space star field: a fixed-capacity particle buffer advanced toward the
// viewer every frame and recycled to the far plane once it passes the camera.

use crate::constants::{CENTRAL_CLEAR_RADIUS, SIZE_MAX, SIZE_MIN, Z_FAR, Z_NEAR};
use glam::Vec2;
use rand::Rng;

/// Spawn volume for the field. `half_extent` is the viewport size in CSS
/// pixels; x and y are drawn from `[-w, w]` and `[-h, h]` respectively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnBounds {
    pub half_extent: Vec2,
    pub z_far: f32,
    pub z_near: f32,
    pub clear_radius: f32,
}

impl SpawnBounds {
    /// The clear radius never exceeds half the smaller extent, so sampling
    /// terminates on tiny viewports too.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let half_extent = Vec2::new(width.max(1.0), height.max(1.0));
        Self {
            half_extent,
            z_far: Z_FAR,
            z_near: Z_NEAR,
            clear_radius: CENTRAL_CLEAR_RADIUS.min(half_extent.min_element() * 0.5),
        }
    }

    fn sample_xy<R: Rng>(&self, rng: &mut R) -> Vec2 {
        // Rejection sampling; the clear disc is tiny next to the viewport.
        loop {
            let x = rng.gen_range(-1.0_f32..=1.0) * self.half_extent.x;
            let y = rng.gen_range(-1.0_f32..=1.0) * self.half_extent.y;
            if x.hypot(y) >= self.clear_radius {
                return Vec2::new(x, y);
            }
        }
    }

    fn sample_z<R: Rng>(&self, rng: &mut R) -> f32 {
        self.z_far + rng.gen::<f32>() * (self.z_near - self.z_far)
    }
}

/// GPU-ready star instance: camera-space position and base size.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    pub position: [f32; 3],
    pub size: f32,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: SpawnBounds,
    dirty: bool,
    recycled_total: u64,
}

impl ParticleField {
    pub fn new<R: Rng>(capacity: usize, bounds: SpawnBounds, rng: &mut R) -> Self {
        let particles = (0..capacity)
            .map(|_| {
                let xy = bounds.sample_xy(rng);
                Particle {
                    position: [xy.x, xy.y, bounds.sample_z(rng)],
                    size: rng.gen_range(SIZE_MIN..SIZE_MAX),
                }
            })
            .collect();
        Self {
            particles,
            bounds,
            dirty: true,
            recycled_total: 0,
        }
    }

    /// Move every particle `speed * dt` toward the viewer; any particle whose
    /// depth passes `camera_z` is respawned at a fresh depth and position.
    /// Returns how many particles were recycled this step.
    pub fn advance<R: Rng>(&mut self, speed: f32, dt: f32, camera_z: f32, rng: &mut R) -> usize {
        let step = speed * dt.max(0.0);
        let mut recycled = 0;
        for p in self.particles.iter_mut() {
            let mut z = p.position[2] + step;
            if z > camera_z {
                z = self.bounds.sample_z(rng);
                let xy = self.bounds.sample_xy(rng);
                p.position[0] = xy.x;
                p.position[1] = xy.y;
                recycled += 1;
            }
            p.position[2] = z;
        }
        self.recycled_total += recycled as u64;
        self.dirty = true;
        recycled
    }

    /// Viewport changes only affect future spawns; live particles keep flying.
    pub fn set_bounds(&mut self, bounds: SpawnBounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> SpawnBounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn recycled_total(&self) -> u64 {
        self.recycled_total
    }

    /// Returns the buffer if it changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> Option<&[Particle]> {
        if self.dirty {
            self.dirty = false;
            Some(&self.particles)
        } else {
            None
        }
    }
}
