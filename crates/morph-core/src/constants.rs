// Shared simulation/interaction tuning constants used by both the core
// update loops and the web frontend.

// Particle buffer
pub const DEFAULT_PARTICLE_COUNT: usize = 30_000;
pub const MIN_PARTICLE_COUNT: usize = 10_000;
pub const MAX_PARTICLE_COUNT: usize = 100_000;
pub const PARTICLE_COUNT_STEP: usize = 10_000;
pub const SEED_SPHERE_RADIUS: f32 = 10.0; // initial particle cloud

// Shape-mode morphing
pub const MORPH_RATE: f32 = 2.0; // fraction of remaining distance per second

// Gravity mode
pub const GRAVITY_FORCE: f32 = 500.0;
pub const GRAVITY_SOFTEN: f32 = 10.0; // bounds force at the singularity
pub const GRAVITY_DAMPING: f32 = 0.95; // per-frame velocity decay
pub const GRAVITY_KICK: f32 = 0.1; // velocity re-randomization span on mode entry
pub const ATTRACTOR_SPAN_X: f32 = -40.0; // inverted x for mirror feel
pub const ATTRACTOR_SPAN_Y: f32 = -30.0; // inverted y, screen y points down

// Visual scale smoothing and bounds
pub const SCALE_SMOOTH_ALPHA: f32 = 0.1;
pub const SCALE_MIN: f32 = 0.5;
pub const SCALE_MAX: f32 = 3.0;

// Pinch-to-scale mapping: scale = (avg_dist - offset) * gain + base
pub const PINCH_DIST_OFFSET: f32 = 0.05;
pub const PINCH_DIST_GAIN: f32 = 10.0;
pub const PINCH_SCALE_BASE: f32 = 0.5;

// Hand landmark indices (MediaPipe hand model ordering)
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIN_LANDMARKS: usize = 9; // enough to cover both tips

// Swipe detection
pub const HAND_HISTORY_LEN: usize = 10;
pub const SWIPE_DX_THRESHOLD: f32 = 0.15; // fraction of screen width
pub const SWIPE_WINDOW_MS: u64 = 500;
pub const SWIPE_COOLDOWN_FRAMES: u32 = 30;

// No-hand decay toward the neutral scale of 1.0
pub const NO_HAND_DECAY: f32 = 0.95;

// Pointer fallback
pub const POINTER_PRESSED_SCALE: f32 = 0.5;
pub const POINTER_RELEASED_SCALE: f32 = 1.5;
pub const POINTER_SMOOTH_ALPHA: f32 = 0.1;

// Audio banding (fractions of the spectrum length)
pub const BASS_BAND_END: f32 = 0.1;
pub const MID_BAND_END: f32 = 0.4;
pub const AUDIO_LEVEL_GAIN: f32 = 2.0; // bass -> renderer audioLevel uniform
pub const MID_TIME_GAIN: f32 = 0.5; // mid band speeds up the simulation clock
pub const HIGH_BRIGHTEN_THRESHOLD: f32 = 0.3;
pub const COLOR_LERP_ALPHA: f32 = 0.1;
pub const RAINBOW_RATE: f32 = 0.5; // hue cycles per second

// Gesture backend initialization budget; a timeout is terminal for the session
pub const GESTURE_LOAD_TIMEOUT_MS: i32 = 10_000;
