//! The particle simulation: owns the live position/velocity buffers and
//! advances them each frame toward either the active target shape or a
//! gravity attractor derived from the hand position.

use crate::audio::AudioBands;
use crate::color::{self, DEFAULT_COLOR};
use crate::constants::*;
use crate::interaction::InteractionSignal;
use crate::shapes::{self, ShapeKind};
use bytemuck::{Pod, Zeroable};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimMode {
    Shape,
    Gravity,
}

/// Explicit command surface for UI-triggered changes. Commands take effect
/// at the next `update` call; nothing reaches into the simulation directly.
#[derive(Clone, Copy, Debug)]
pub enum Command {
    SetShape(ShapeKind),
    SetMode(SimMode),
    SetCount(usize),
    SetColor([f32; 3]),
    ToggleRainbow,
}

/// Scalar uniforms the renderer samples once per frame alongside the
/// position buffer. It never mutates them.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct RenderUniforms {
    pub elapsed_time: f32,
    pub visual_scale: f32,
    pub audio_level: f32,
    pub color: [f32; 3],
}

/// Read-only per-frame view for the renderer. Borrowed fresh every frame so
/// a resize can never leave the renderer holding a stale buffer.
pub struct RenderView<'a> {
    pub positions: &'a [f32],
    pub colors: &'a [f32],
    pub sizes: &'a [f32],
    pub uniforms: RenderUniforms,
}

/// Snap a raw particle-count request to the UI step and bounds.
pub fn clamp_count(raw: usize) -> usize {
    let stepped = (raw + PARTICLE_COUNT_STEP / 2) / PARTICLE_COUNT_STEP * PARTICLE_COUNT_STEP;
    stepped.clamp(MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT)
}

pub struct ParticleSimulation {
    count: usize,
    positions: Vec<f32>,
    velocities: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    targets: Vec<f32>,
    shape: ShapeKind,
    mode: SimMode,
    rng: StdRng,
    elapsed: f32,
    visual_scale: f32,
    color: [f32; 3],
    rainbow: bool,
    rainbow_time: f32,
    audio_level: f32,
    dirty: bool,
}

impl ParticleSimulation {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions = shapes::generate(ShapeKind::Sphere, count, SEED_SPHERE_RADIUS, &mut rng);
        let sizes = (0..count).map(|_| rng.gen::<f32>()).collect();
        let targets = shapes::generate(
            ShapeKind::Sphere,
            count,
            ShapeKind::Sphere.default_scale(),
            &mut rng,
        );
        Self {
            count,
            positions,
            velocities: vec![0.0; count * 3],
            colors: vec![1.0; count * 3],
            sizes,
            targets,
            shape: ShapeKind::Sphere,
            mode: SimMode::Shape,
            rng,
            elapsed: 0.0,
            visual_scale: 1.0,
            color: DEFAULT_COLOR,
            rainbow: false,
            rainbow_time: 0.0,
            audio_level: 0.0,
            dirty: true,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn mode(&self) -> SimMode {
        self.mode
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn is_rainbow(&self) -> bool {
        self.rainbow
    }

    pub fn visual_scale(&self) -> f32 {
        self.visual_scale
    }

    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::SetShape(kind) => self.set_shape(kind),
            Command::SetMode(mode) => self.set_mode(mode),
            Command::SetCount(n) => self.set_count(n),
            Command::SetColor(rgb) => self.set_color(rgb),
            Command::ToggleRainbow => self.toggle_rainbow(),
        }
    }

    /// Regenerate the morph target for `kind` at its default scale, reset
    /// the visual scale to neutral, and return to shape mode.
    pub fn set_shape(&mut self, kind: ShapeKind) {
        self.shape = kind;
        self.mode = SimMode::Shape;
        self.visual_scale = 1.0;
        self.targets = shapes::generate(kind, self.count, kind.default_scale(), &mut self.rng);
    }

    /// Entering gravity mode kicks every velocity to a small random vector
    /// so the swarm does not start dead; leaving it keeps velocities as-is
    /// (they are simply ignored in shape mode).
    pub fn set_mode(&mut self, mode: SimMode) {
        self.mode = mode;
        if mode == SimMode::Gravity {
            for v in &mut self.velocities {
                *v = (self.rng.gen::<f32>() - 0.5) * GRAVITY_KICK;
            }
        }
    }

    /// Resize all buffers atomically. Positions re-seed from the default
    /// sphere cloud; the target regenerates for the active shape at the new
    /// count so a shape-mode resize keeps morphing toward the same shape.
    pub fn set_count(&mut self, count: usize) {
        if count == self.count {
            return;
        }
        log::info!("[particles] resizing {} -> {}", self.count, count);
        self.count = count;
        self.positions =
            shapes::generate(ShapeKind::Sphere, count, SEED_SPHERE_RADIUS, &mut self.rng);
        self.velocities = vec![0.0; count * 3];
        self.colors = vec![1.0; count * 3];
        self.sizes = (0..count).map(|_| self.rng.gen::<f32>()).collect();
        self.targets =
            shapes::generate(self.shape, count, self.shape.default_scale(), &mut self.rng);
        self.dirty = true;
    }

    pub fn set_color(&mut self, rgb: [f32; 3]) {
        self.rainbow = false;
        self.color = rgb;
    }

    pub fn toggle_rainbow(&mut self) {
        self.rainbow = !self.rainbow;
        if !self.rainbow {
            self.color = DEFAULT_COLOR;
        }
    }

    /// Advance the simulation by `dt` seconds. Missing signals are treated
    /// as neutral by the callers (default-constructed values); no input
    /// combination errors here.
    pub fn update(&mut self, dt: f32, interaction: &InteractionSignal, audio: &AudioBands) {
        // The mid band feeds the clock so sound energy speeds the visuals up.
        self.elapsed += dt + audio.mid * MID_TIME_GAIN;
        self.audio_level = audio.bass * AUDIO_LEVEL_GAIN;

        if self.rainbow {
            self.rainbow_time = (self.rainbow_time + dt * RAINBOW_RATE) % 1.0;
            self.color = color::hsl_to_rgb(self.rainbow_time, 1.0, 0.5);
        } else if audio.high > HIGH_BRIGHTEN_THRESHOLD {
            // Asymptotic brightening; the renderer clamps on output.
            let bright = [
                self.color[0] * (1.0 + audio.high),
                self.color[1] * (1.0 + audio.high),
                self.color[2] * (1.0 + audio.high),
            ];
            self.color = color::lerp_rgb(self.color, bright, COLOR_LERP_ALPHA);
        }

        self.visual_scale += (interaction.scale - self.visual_scale) * SCALE_SMOOTH_ALPHA;

        match self.mode {
            SimMode::Shape => {
                let speed = MORPH_RATE * dt;
                for (p, t) in self.positions.iter_mut().zip(&self.targets) {
                    *p += (*t - *p) * speed;
                }
            }
            SimMode::Gravity => {
                if let Some(hand) = interaction.hand_position {
                    self.step_gravity(dt, hand.x, hand.y);
                }
                // Without a hand position particles keep their last state.
            }
        }
        self.dirty = true;
    }

    fn step_gravity(&mut self, dt: f32, hx: f32, hy: f32) {
        let target_x = (hx - 0.5) * ATTRACTOR_SPAN_X;
        let target_y = (hy - 0.5) * ATTRACTOR_SPAN_Y;
        for i in 0..self.count {
            let idx = i * 3;
            let dx = target_x - self.positions[idx];
            let dy = target_y - self.positions[idx + 1];
            let dz = -self.positions[idx + 2];

            let dist_sq = dx * dx + dy * dy + dz * dz;
            // The softening term bounds the force; the distance floor keeps
            // the direction finite at the attractor itself.
            let dist = dist_sq.sqrt().max(1e-4);
            let force = GRAVITY_FORCE / (dist_sq + GRAVITY_SOFTEN);
            let impulse = force * dt / dist;

            self.velocities[idx] += dx * impulse;
            self.velocities[idx + 1] += dy * impulse;
            self.velocities[idx + 2] += dz * impulse;

            for k in 0..3 {
                self.velocities[idx + k] *= GRAVITY_DAMPING;
                self.positions[idx + k] += self.velocities[idx + k] * dt;
            }
        }
    }

    /// Borrow the render-facing state for this frame. The renderer must not
    /// retain the slices across frames.
    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            positions: &self.positions,
            colors: &self.colors,
            sizes: &self.sizes,
            uniforms: RenderUniforms {
                elapsed_time: self.elapsed,
                visual_scale: self.visual_scale,
                audio_level: self.audio_level,
                color: self.color,
            },
        }
    }

    /// True when positions changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn targets(&self) -> &[f32] {
        &self.targets
    }
}
