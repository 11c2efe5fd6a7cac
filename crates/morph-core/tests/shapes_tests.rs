// Statistical/geometric tests for the shape generators. The samplers are
// stochastic, so assertions target distributions and bounds, never exact
// coordinates.

use morph_core::shapes::{generate, ShapeKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn norms(points: &[f32]) -> Vec<f32> {
    points
        .chunks_exact(3)
        .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
        .collect()
}

#[test]
fn every_shape_emits_three_floats_per_particle() {
    let mut r = rng();
    for kind in ShapeKind::ALL {
        for count in [0usize, 1, 30_000] {
            let pts = generate(kind, count, kind.default_scale(), &mut r);
            assert_eq!(pts.len(), count * 3, "{kind:?} count {count}");
            assert!(
                pts.iter().all(|v| v.is_finite()),
                "{kind:?} produced a non-finite coordinate"
            );
        }
    }
}

#[test]
fn zero_count_is_empty_not_an_error() {
    let mut r = rng();
    for kind in ShapeKind::ALL {
        assert!(generate(kind, 0, 1.0, &mut r).is_empty());
    }
}

#[test]
fn negative_scale_is_accepted() {
    let mut r = rng();
    for kind in ShapeKind::ALL {
        let pts = generate(kind, 100, -1.0, &mut r);
        assert_eq!(pts.len(), 300);
        assert!(pts.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn sphere_is_uniform_by_volume() {
    let mut r = rng();
    let radius = 10.0;
    let pts = generate(ShapeKind::Sphere, 10_000, radius, &mut r);
    let ns = norms(&pts);
    let mean: f32 = ns.iter().sum::<f32>() / ns.len() as f32;
    // Uniform-volume expectation: E[r] = R * 3/4.
    assert!(
        (mean - radius * 0.75).abs() < 0.15,
        "mean radius {mean}, expected ~{}",
        radius * 0.75
    );
    let max = ns.iter().cloned().fold(0.0f32, f32::max);
    assert!(max <= radius + 1e-3, "max radius {max} exceeds {radius}");
}

#[test]
fn heart_respects_curve_envelope() {
    let mut r = rng();
    let scale = 0.5;
    let pts = generate(ShapeKind::Heart, 5_000, scale, &mut r);
    for p in pts.chunks_exact(3) {
        // Parametric extents times the max radial jitter of 1.0 * scale.
        assert!(p[0].abs() <= 16.0 * scale + 1e-3);
        assert!(p[1].abs() <= 21.0 * scale + 1e-3);
        assert!(p[2].abs() <= 2.5 * scale + 1e-3);
    }
    // The outline should actually span the x axis, not collapse.
    let max_x = pts.chunks_exact(3).map(|p| p[0]).fold(0.0f32, f32::max);
    assert!(max_x > 6.0 * scale);
}

#[test]
fn saturn_splits_into_planet_and_ring() {
    let mut r = rng();
    let count = 10_000usize;
    let scale = 1.0;
    let pts = generate(ShapeKind::Saturn, count, scale, &mut r);
    let ns = norms(&pts);
    // Planet points stay within 5 * scale; ring points sit in the annulus
    // [8, 13] * scale, so a threshold of 6.5 separates them exactly.
    let ring = ns.iter().filter(|&&n| n > 6.5 * scale).count();
    let planet = count - ring;
    assert_eq!(ring, count * 3 / 10, "30% of points form the ring");
    assert_eq!(planet, count - count * 3 / 10);
    for &n in &ns {
        assert!(n <= 13.1 * scale, "point outside the ring annulus: {n}");
    }
}

#[test]
fn galaxy_stays_in_disc() {
    let mut r = rng();
    let scale = 1.0;
    let pts = generate(ShapeKind::Galaxy, 5_000, scale, &mut r);
    for p in pts.chunks_exact(3) {
        let radial = (p[0] * p[0] + p[2] * p[2]).sqrt();
        assert!(radial <= 15.0 * scale + 1e-3);
        assert!(p[1].abs() <= 1.0 * scale + 1e-3);
    }
}

#[test]
fn dna_strands_lie_on_the_helix_radius() {
    let mut r = rng();
    let scale = 1.0;
    let pts = generate(ShapeKind::Dna, 5_000, scale, &mut r);
    for p in pts.chunks_exact(3) {
        let radial = (p[0] * p[0] + p[2] * p[2]).sqrt();
        // Strand points sit at exactly 4 * scale; rungs interpolate across
        // the axis, so anything up to that radius is legal.
        assert!(radial <= 4.0 * scale + 1e-3);
        assert!(p[1].abs() <= 10.0 * std::f32::consts::PI * scale + 1e-3);
    }
}

#[test]
fn fireworks_is_a_bounded_burst() {
    let mut r = rng();
    let scale = 1.0;
    let pts = generate(ShapeKind::Fireworks, 10_000, scale, &mut r);
    let ns = norms(&pts);
    let max = ns.iter().cloned().fold(0.0f32, f32::max);
    assert!(max <= 15.0 * scale + 1e-3);
    let mean: f32 = ns.iter().sum::<f32>() / ns.len() as f32;
    assert!((mean - 15.0 * scale * 0.75).abs() < 0.25);
}

#[test]
fn atomic_nucleus_and_orbits_are_separated() {
    let mut r = rng();
    let count = 10_000usize;
    let scale = 1.0;
    let pts = generate(ShapeKind::Atomic, count, scale, &mut r);
    let ns = norms(&pts);
    // Nucleus within 2 * scale, innermost orbit at 8 * scale (plus a small
    // band jitter): a threshold of 5 separates them exactly.
    let nucleus = ns.iter().filter(|&&n| n < 5.0 * scale).count();
    assert_eq!(nucleus, count / 5, "20% of points form the nucleus");
    let max = ns.iter().cloned().fold(0.0f32, f32::max);
    assert!(max <= 16.1 * scale, "outermost orbit bound exceeded: {max}");
}

#[test]
fn torus_knot_hugs_the_centerline_tube() {
    let mut r = rng();
    let scale = 0.8;
    let pts = generate(ShapeKind::TorusKnot, 5_000, scale, &mut r);
    for p in pts.chunks_exact(3) {
        let radial = (p[0] * p[0] + p[1] * p[1]).sqrt();
        // Centerline xy radius spans [6, 10] * scale, tube radius 1 * scale.
        assert!(radial <= 11.0 * scale + 1e-3);
        assert!(p[2].abs() <= 4.0 * scale + 1e-3);
    }
}

#[test]
fn shape_names_round_trip() {
    for kind in ShapeKind::ALL {
        let parsed: ShapeKind = kind.name().parse().expect("name should parse");
        assert_eq!(parsed, kind);
    }
    assert!("blob".parse::<ShapeKind>().is_err());
    // Case-insensitive, as names arrive from DOM attributes.
    assert_eq!("DNA".parse::<ShapeKind>().unwrap(), ShapeKind::Dna);
}

#[test]
fn shape_cycling_wraps_in_both_directions() {
    let mut kind = ShapeKind::Sphere;
    for _ in 0..ShapeKind::ALL.len() {
        kind = kind.next();
    }
    assert_eq!(kind, ShapeKind::Sphere);
    assert_eq!(ShapeKind::Sphere.prev(), ShapeKind::Atomic);
    assert_eq!(ShapeKind::Atomic.next(), ShapeKind::Sphere);
    for kind in ShapeKind::ALL {
        assert_eq!(kind.next().prev(), kind);
    }
}
