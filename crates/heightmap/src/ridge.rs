//! Ridge accumulation: the raw height field.
//!
//! Each iteration draws a random line through the unit square and adds a
//! `tanh`-squashed signed distance to that line at every grid point. Summed
//! over many lines this produces terraced ridges whose sharpness is set by
//! `smoothness`. A small drift driven by the animation counter translates all
//! lines, so consecutive frames with the same seed morph continuously.

use bevy::log::debug;
use bevy::math::Vec2;

use crate::config::{MAX_GRID_SIDE, MAX_ITERATIONS, RIDGE_DRIFT, SMOOTHNESS_EXPONENT};
use crate::fields::HeightField;
use crate::ridge_rng::RidgeRng;
use crate::warnings::{Axis, HeightMapWarning};

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Inputs to a single `generate` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeParams {
    /// `(width, height)` in cells.
    pub grid_size: (usize, usize),
    pub seed: u64,
    pub num_iterations: u32,
    /// Animation counter driving the ridge drift.
    pub counter: f64,
    /// Ridge sharpness in `[0, 1]`; 0 is a soft gradient, 1 a near step.
    pub smoothness: f32,
    /// Skip the grid size / iteration guardrails.
    pub experimental_mode: bool,
}

/// Output of `generate`, with the configuration actually used.
#[derive(Debug, Clone)]
pub struct GeneratedField {
    pub field: HeightField,
    pub grid_size: (usize, usize),
    pub num_iterations: u32,
    pub warnings: Vec<HeightMapWarning>,
}

// ---------------------------------------------------------------------------
// Ridge lines
// ---------------------------------------------------------------------------

/// A line through two points of the unit square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeLine {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl RidgeLine {
    /// Draw both endpoints from `rng` and shift them by `drift`.
    pub fn random(rng: &mut RidgeRng, drift: Vec2) -> Self {
        let p1 = rng.point() + drift;
        let p2 = rng.point() + drift;
        Self { p1, p2 }
    }

    /// Signed perpendicular distance of `g` from the line.
    ///
    /// Positive on the left of `p1 -> p2`. A zero-length line has no side, so
    /// every point is at distance 0.
    pub fn signed_distance(&self, g: Vec2) -> f32 {
        let dir = self.p2 - self.p1;
        let len = dir.length();
        if len <= f32::EPSILON {
            return 0.0;
        }
        dir.perp_dot(g - self.p1) / len
    }
}

/// Endpoint offset for a given animation counter.
///
/// The trigonometry runs in `f64`; only the final offset is narrowed.
pub fn drift(counter: f64) -> Vec2 {
    Vec2::new(
        (RIDGE_DRIFT * counter.sin()) as f32,
        (RIDGE_DRIFT * counter.cos()) as f32,
    )
}

/// Distance multiplier applied before `tanh`: `2^(smoothness * 8)`.
///
/// Smoothness is clamped into `[0, 1]`; a non-finite value falls back to 0.5.
pub fn sharpness(smoothness: f32) -> f32 {
    let s = if smoothness.is_finite() {
        smoothness.clamp(0.0, 1.0)
    } else {
        0.5
    };
    (s * SMOOTHNESS_EXPONENT).exp2()
}

// ---------------------------------------------------------------------------
// Guardrails
// ---------------------------------------------------------------------------

fn guard_side(
    axis: Axis,
    requested: usize,
    experimental: bool,
    warnings: &mut Vec<HeightMapWarning>,
) -> usize {
    let applied = if requested == 0 {
        1
    } else if !experimental && requested > MAX_GRID_SIDE {
        MAX_GRID_SIDE
    } else {
        requested
    };
    if applied != requested {
        let warning = HeightMapWarning::GridSideClamped {
            axis,
            requested,
            applied,
        };
        debug!("Ridge generation: {}", warning);
        warnings.push(warning);
    }
    applied
}

/// Apply the size / iteration limits, returning `(grid_size, iterations)`.
///
/// Clamping never fails: each adjustment is appended to `warnings` and logged
/// at debug level. Entries already in `warnings` are left alone.
pub fn apply_guardrails(
    params: &RidgeParams,
    warnings: &mut Vec<HeightMapWarning>,
) -> ((usize, usize), u32) {
    let experimental = params.experimental_mode;
    let (w, h) = params.grid_size;
    let width = guard_side(Axis::Width, w, experimental, warnings);
    let height = guard_side(Axis::Height, h, experimental, warnings);

    let mut iterations = params.num_iterations;
    if !experimental && iterations > MAX_ITERATIONS {
        let warning = HeightMapWarning::IterationsClamped {
            requested: iterations,
            applied: MAX_ITERATIONS,
        };
        debug!("Ridge generation: {}", warning);
        warnings.push(warning);
        iterations = MAX_ITERATIONS;
    }

    if experimental
        && (width > MAX_GRID_SIDE || height > MAX_GRID_SIDE || iterations > MAX_ITERATIONS)
    {
        debug!(
            "Ridge generation: experimental mode accepts {}x{} cells x {} iterations",
            width, height, iterations
        );
    }

    ((width, height), iterations)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the raw (un-normalized) ridge field.
///
/// Deterministic: identical `params` give bit-identical output, because the
/// RNG is created here from `params.seed` and cells are accumulated in a fixed
/// order.
pub fn generate(params: &RidgeParams) -> GeneratedField {
    let mut warnings = Vec::new();
    let ((width, height), num_iterations) = apply_guardrails(params, &mut warnings);

    let mut rng = RidgeRng::from_seed_u64(params.seed);
    let offset = drift(params.counter);
    let scale = sharpness(params.smoothness);

    let coords: Vec<Vec2> = (0..height)
        .flat_map(|j| {
            (0..width).map(move |i| Vec2::new(i as f32 / width as f32, j as f32 / height as f32))
        })
        .collect();

    let mut field = HeightField::new(width, height);
    for _ in 0..num_iterations {
        let line = RidgeLine::random(&mut rng, offset);
        for (value, &g) in field.values.iter_mut().zip(coords.iter()) {
            *value += (line.signed_distance(g) * scale).tanh();
        }
    }

    GeneratedField {
        field,
        grid_size: (width, height),
        num_iterations,
        warnings,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
