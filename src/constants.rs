// Tuning constants for the three acts.
//
// These constants express intended behavior (durations, speed thresholds,
// clamp limits) and keep magic numbers out of the frame and wiring code.

// ---------------- Star field ----------------
pub const STAR_COUNT: usize = 8000;
pub const Z_FAR: f32 = -2000.0; // deepest spawn depth
pub const Z_NEAR: f32 = 0.0; // shallowest spawn depth
pub const SPEED: f32 = 5000.0; // full warp speed, units per second
pub const SIZE_MIN: f32 = 0.6;
pub const SIZE_MAX: f32 = 4.0;
pub const CENTRAL_CLEAR_RADIUS: f32 = 140.0; // px kept free of spawns around the center

// Star shading
pub const POINT_SCALE: f32 = 900.0; // size * POINT_SCALE / depth => pixel diameter
pub const MIN_POINT_SIZE: f32 = 0.9;

// ---------------- Camera ----------------
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 5000.0;
pub const CAMERA_Z: f32 = 100.0;

// ---------------- Acceleration ramp ----------------
pub const START_SPEED_FACTOR: f32 = 0.20; // fraction of SPEED at t = 0
pub const ACCEL_DURATION: f32 = 8.0; // seconds to reach full speed
pub const ACCEL_POWER: f32 = 2.0; // ease-in exponent

// Light overlay once the ramp saturates
pub const LIGHT_FADE_DURATION: f32 = 3.0;
pub const MAX_LIGHT_OPACITY: f32 = 0.85;

// Screen stretch
pub const STRETCH_MAX: f32 = 1.0; // +100% height at full ramp
pub const STRETCH_AXIS_FACTOR: f32 = 0.5; // x expands at half the y rate

// ---------------- Glow ----------------
pub const GLOW_APPEAR_SPEED: f32 = 4000.0;
pub const GLOW_FULL_SPEED: f32 = 5000.0;
pub const GLOW_BASE_SCALE: f32 = 80.0;
pub const GLOW_MAX_SCALE_FACTOR: f32 = 6.0; // times the larger viewport side
pub const GLOW_BASE_OPACITY: f32 = 0.06;
pub const GLOW_MAX_OPACITY: f32 = 0.98;
pub const GLOW_GROWTH_POWER: f32 = 5.0;
pub const GLOW_FLICKER_FREQ: f32 = 6.0; // Hz
pub const GLOW_FLICKER_AMPLITUDE: f32 = 0.09;
pub const GLOW_SCALE_FLICKER_FREQ_RATIO: f32 = 0.9;
pub const GLOW_SCALE_FLICKER_AMPLITUDE: f32 = 0.012;
pub const GLOW_TEXTURE_SIZE: u32 = 256;

// ---------------- Stage lifecycle ----------------
pub const WARP_SETTLE_MS: i32 = 700; // delay between terminal frame and completion
pub const SURFACE_FADE_SEC: f32 = 0.45;
pub const HANDOFF_CEILING_MS: i32 = 10_000; // Act 2 -> Act 3 liveness bound

// ---------------- Act 1 ----------------
pub const SCROLL_TRIGGER_THRESHOLD: f64 = 8.0; // wheel deltaY
pub const SCROLL_DURATION_MS: i32 = 1100; // matches the scroll-in CSS
pub const SCROLL_COMPLETE_SLACK_MS: i32 = 40;
pub const VIDEO_HIDE_SLACK_MS: i32 = 60;
pub const MIN_LOADER_SHOW_MS: f64 = 2000.0;
pub const MAX_ERROR_LOGS: u32 = 3;
pub const DEFAULT_VOLUME: f64 = 0.5;

// Act 1 media sources, assigned once at startup
pub const VIDEO_SRC: &str = "assets/video/background.mp4";
pub const AUDIO_SRC: &str = "assets/audio/bg-music.mp3";
pub const IMAGE_SRC: &str = "assets/images/bg-photo.jpg";
pub const IMAGE_PLACEHOLDER_SRC: &str = "assets/images/placeholder.svg";

// ---------------- Hand-off ----------------
pub const BUNDLE_MOUNT_PREFIX: &str = "/solar-dist";
pub const BUNDLE_INDEX_PATH: &str = "/solar-dist/index.html";
pub const APP_MOUNT_ID: &str = "app";
pub const HIDE_STYLE_ID: &str = "hide-nonpart2-style";

// ---------------- Warp DOM nodes ----------------
pub const PART2_CANVAS_ID: &str = "part2-canvas";
pub const LIGHT_OVERLAY_ID: &str = "warp-light-overlay";
pub const TITLE_CLASS: &str = "entering";

// ---------------- Broadcast events ----------------
pub const EVENT_TRIGGER_DONE: &str = "scrollin:done";
pub const EVENT_TRIGGER_REQUEST: &str = "trigger-scrollin";
pub const EVENT_WARP_DONE: &str = "part2:done";
// Window property set by the page's inline script for taps that beat the wasm
pub const PENDING_TRIGGER_FLAG: &str = "__pendingScrollIn";

// ---------------- Persisted preferences ----------------
pub const STORAGE_KEY_VOLUME: &str = "bg-audio-volume";
pub const STORAGE_KEY_MUTED: &str = "bg-audio-muted";
