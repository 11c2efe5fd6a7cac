//! Procedural point-cloud generators for the nine shape archetypes.
//!
//! Every generator is a stochastic sampling of a distribution, not a
//! deterministic mesh: two calls with the same inputs produce different
//! coordinates. Callers that need reproducibility seed the RNG themselves.

use rand::prelude::*;
use std::f32::consts::{PI, TAU};
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Sphere,
    Heart,
    Saturn,
    Galaxy,
    Flower,
    TorusKnot,
    Dna,
    Fireworks,
    Atomic,
}

#[derive(Debug, Error)]
#[error("unknown shape name: {0}")]
pub struct UnknownShape(pub String);

impl ShapeKind {
    /// Display/cycling order, matching the on-screen model grid.
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Sphere,
        ShapeKind::Heart,
        ShapeKind::Saturn,
        ShapeKind::Galaxy,
        ShapeKind::Flower,
        ShapeKind::TorusKnot,
        ShapeKind::Dna,
        ShapeKind::Fireworks,
        ShapeKind::Atomic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Heart => "heart",
            ShapeKind::Saturn => "saturn",
            ShapeKind::Galaxy => "galaxy",
            ShapeKind::Flower => "flower",
            ShapeKind::TorusKnot => "torus",
            ShapeKind::Dna => "dna",
            ShapeKind::Fireworks => "fireworks",
            ShapeKind::Atomic => "atomic",
        }
    }

    /// Per-shape scale applied when the shape becomes the morph target.
    /// For `Sphere` the scale is the radius; elsewhere a unitless factor.
    pub fn default_scale(&self) -> f32 {
        match self {
            ShapeKind::Sphere => 10.0,
            ShapeKind::Heart => 0.5,
            ShapeKind::Saturn => 1.5,
            ShapeKind::Galaxy => 1.0,
            ShapeKind::Flower => 0.8,
            ShapeKind::TorusKnot => 0.8,
            ShapeKind::Dna => 1.0,
            ShapeKind::Fireworks => 1.0,
            ShapeKind::Atomic => 1.0,
        }
    }

    pub fn next(&self) -> ShapeKind {
        let i = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> ShapeKind {
        let i = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sphere" => Ok(ShapeKind::Sphere),
            "heart" => Ok(ShapeKind::Heart),
            "saturn" => Ok(ShapeKind::Saturn),
            "galaxy" => Ok(ShapeKind::Galaxy),
            "flower" => Ok(ShapeKind::Flower),
            "torus" | "torusknot" => Ok(ShapeKind::TorusKnot),
            "dna" => Ok(ShapeKind::Dna),
            "fireworks" => Ok(ShapeKind::Fireworks),
            "atomic" => Ok(ShapeKind::Atomic),
            other => Err(UnknownShape(other.to_string())),
        }
    }
}

/// Sample a flat `[x0, y0, z0, x1, ...]` point cloud of `3 * count` floats.
///
/// `count == 0` yields an empty buffer; zero or negative `scale` is accepted
/// and degenerates (or mirrors) the shape rather than erroring.
pub fn generate<R: Rng>(kind: ShapeKind, count: usize, scale: f32, rng: &mut R) -> Vec<f32> {
    let mut out = Vec::with_capacity(count * 3);
    match kind {
        ShapeKind::Sphere => sphere(&mut out, count, scale, rng),
        ShapeKind::Heart => heart(&mut out, count, scale, rng),
        ShapeKind::Saturn => saturn(&mut out, count, scale, rng),
        ShapeKind::Galaxy => galaxy(&mut out, count, scale, rng),
        ShapeKind::Flower => flower(&mut out, count, scale, rng),
        ShapeKind::TorusKnot => torus_knot(&mut out, count, scale, rng),
        ShapeKind::Dna => dna(&mut out, count, scale, rng),
        ShapeKind::Fireworks => fireworks(&mut out, count, scale, rng),
        ShapeKind::Atomic => atomic(&mut out, count, scale, rng),
    }
    out
}

/// One point uniformly distributed inside a ball: cube-root radius scaling
/// plus a uniform solid angle (inverse-cosine latitude).
fn ball_point<R: Rng>(rng: &mut R, radius: f32) -> [f32; 3] {
    let r = radius * rng.gen::<f32>().cbrt();
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    [
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    ]
}

fn sphere<R: Rng>(out: &mut Vec<f32>, count: usize, radius: f32, rng: &mut R) {
    for _ in 0..count {
        out.extend_from_slice(&ball_point(rng, radius));
    }
}

fn heart<R: Rng>(out: &mut Vec<f32>, count: usize, scale: f32, rng: &mut R) {
    for _ in 0..count {
        let t = rng.gen::<f32>() * TAU;
        // Classic parametric heart curve, extruded with random z thickness.
        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos()
            - 5.0 * (2.0 * t).cos()
            - 2.0 * (3.0 * t).cos()
            - (4.0 * t).cos();
        let z = (rng.gen::<f32>() - 0.5) * 5.0;
        // Radial jitter gives the outline some volume.
        let r = (rng.gen::<f32>() * 0.2 + 0.8) * scale;
        out.extend_from_slice(&[x * r, y * r, z * r]);
    }
}

fn saturn<R: Rng>(out: &mut Vec<f32>, count: usize, scale: f32, rng: &mut R) {
    let ring_count = count * 3 / 10;
    let planet_count = count - ring_count;

    for _ in 0..planet_count {
        out.extend_from_slice(&ball_point(rng, scale * 5.0));
    }

    let tilt = PI / 6.0;
    let (sin_t, cos_t) = tilt.sin_cos();
    for _ in 0..ring_count {
        let angle = rng.gen::<f32>() * TAU;
        let dist = (rng.gen::<f32>() * 5.0 + 8.0) * scale;
        let x = angle.cos() * dist;
        let y = (rng.gen::<f32>() - 0.5) * 0.5 * scale; // thin band
        let z = angle.sin() * dist;
        // Tilt the ring plane 30 degrees.
        out.extend_from_slice(&[x * cos_t - y * sin_t, x * sin_t + y * cos_t, z]);
    }
}

fn galaxy<R: Rng>(out: &mut Vec<f32>, count: usize, scale: f32, rng: &mut R) {
    const ARMS: f32 = 5.0;
    const ARM_WIDTH: f32 = 0.5;
    for _ in 0..count {
        let t = rng.gen::<f32>();
        let angle = t * TAU * ARMS + (rng.gen::<f32>() - 0.5) * ARM_WIDTH;
        let radius = t * 15.0 * scale;
        out.extend_from_slice(&[
            angle.cos() * radius,
            (rng.gen::<f32>() - 0.5) * 2.0 * scale,
            angle.sin() * radius,
        ]);
    }
}

fn flower<R: Rng>(out: &mut Vec<f32>, count: usize, scale: f32, rng: &mut R) {
    const PETALS: f32 = 5.0;
    for _ in 0..count {
        let u = rng.gen::<f32>() * TAU;
        let v = rng.gen::<f32>() * PI;
        // Rose curve r = 1 + sin(k*u), swept through a flattened sphere.
        let r = (1.0 + (PETALS * u).sin()) * v.sin() * 8.0 * scale;
        out.extend_from_slice(&[r * u.cos(), r * u.sin(), v.cos() * 8.0 * scale * 0.5]);
    }
}

fn torus_knot<R: Rng>(out: &mut Vec<f32>, count: usize, scale: f32, rng: &mut R) {
    // Trefoil (p = 2, q = 3) centerline with a random tube offset for volume.
    const Q_OVER_P: f32 = 3.0 / 2.0;
    for _ in 0..count {
        let t = rng.gen::<f32>() * TAU * 3.0;
        let r = 4.0 + (Q_OVER_P * t).cos();
        let x = r * t.cos() * 2.0 * scale;
        let y = r * t.sin() * 2.0 * scale;
        let z = (Q_OVER_P * t).sin() * 3.0 * scale;

        let tube_radius = 1.0 * scale;
        let theta = rng.gen::<f32>() * TAU;
        let tube_r = rng.gen::<f32>() * tube_radius;
        out.extend_from_slice(&[
            x + tube_r * theta.cos(),
            y + tube_r * theta.sin(),
            z + (rng.gen::<f32>() - 0.5) * 2.0 * tube_radius,
        ]);
    }
}

fn dna<R: Rng>(out: &mut Vec<f32>, count: usize, scale: f32, rng: &mut R) {
    const RUNG_LEVELS: u32 = 20;
    for _ in 0..count {
        let radius = 4.0 * scale;
        let (x, y, z);
        if rng.gen::<f32>() > 0.8 {
            // Base-pair rung at one of the discrete height levels, linearly
            // interpolated between the two strands.
            let rung_t = (rng.gen_range(0..RUNG_LEVELS) as f32) * (PI / 2.0);
            let lerp = rng.gen::<f32>();
            let x1 = rung_t.cos() * radius;
            let z1 = rung_t.sin() * radius;
            let x2 = (rung_t + PI).cos() * radius;
            let z2 = (rung_t + PI).sin() * radius;
            x = x1 + (x2 - x1) * lerp;
            z = z1 + (z2 - z1) * lerp;
            y = (rung_t - PI * 5.0) * 2.0 * scale;
        } else {
            // One of the two phase-offset helical strands.
            let t = rng.gen::<f32>() * PI * 10.0;
            let offset = if rng.gen::<bool>() { 0.0 } else { PI };
            x = (t + offset).cos() * radius;
            z = (t + offset).sin() * radius;
            y = (t - PI * 5.0) * 2.0 * scale;
        }
        out.extend_from_slice(&[x, y, z]);
    }
}

fn fireworks<R: Rng>(out: &mut Vec<f32>, count: usize, scale: f32, rng: &mut R) {
    // A static burst: uniform solid sphere, no temporal trail component.
    for _ in 0..count {
        out.extend_from_slice(&ball_point(rng, 15.0 * scale));
    }
}

fn atomic<R: Rng>(out: &mut Vec<f32>, count: usize, scale: f32, rng: &mut R) {
    const ORBITS: u32 = 3;
    let nucleus_count = count / 5;

    for _ in 0..nucleus_count {
        out.extend_from_slice(&ball_point(rng, 2.0 * scale));
    }

    for _ in nucleus_count..count {
        let orbit = rng.gen_range(0..ORBITS) as f32;
        let angle = rng.gen::<f32>() * TAU;
        let radius = (8.0 + orbit * 4.0) * scale;
        let x = angle.cos() * radius;
        let y = angle.sin() * radius;
        let z = (rng.gen::<f32>() - 0.5) * scale; // thin band

        // Each orbit plane is tilted twice, proportional to its index.
        let tilt_x = orbit * PI / 3.0;
        let tilt_y = orbit * PI / 4.0;
        let (y, z) = (
            y * tilt_x.cos() - z * tilt_x.sin(),
            y * tilt_x.sin() + z * tilt_x.cos(),
        );
        let (x, z) = (
            x * tilt_y.cos() + z * tilt_y.sin(),
            -x * tilt_y.sin() + z * tilt_y.cos(),
        );
        out.extend_from_slice(&[x, y, z]);
    }
}
