/// Largest grid side accepted without `experimental_mode`.
pub const MAX_GRID_SIDE: usize = 100;
/// Largest ridge count accepted without `experimental_mode`.
pub const MAX_ITERATIONS: u32 = 100;

pub const DEFAULT_GRID_SIZE: (usize, usize) = (48, 48);
pub const DEFAULT_ITERATIONS: u32 = 32;
pub const DEFAULT_SEED: u8 = 20;
pub const DEFAULT_SMOOTHNESS: f32 = 0.7;
pub const DEFAULT_ANIMATION_SPEED: f32 = 0.5;

/// Grid sides offered to the host UI.
pub const GRID_OPTIONS: [usize; 10] = [1, 2, 4, 8, 16, 32, 48, 64, 80, 96];

/// Counter increment per tick at full animation speed.
pub const ANIMATION_STEP: f64 = 0.1;
/// Amplitude of the per-counter drift applied to ridge endpoints.
pub const RIDGE_DRIFT: f64 = 0.01;
/// `smoothness = 1` scales distances by `2^SMOOTHNESS_EXPONENT` before `tanh`.
pub const SMOOTHNESS_EXPONENT: f32 = 8.0;

/// Fill value for fields that cannot be normalized or are disabled.
pub const DEGENERATE_FILL: f32 = 0.5;

/// Granularity of the smoothness and animation speed options.
pub const OPTION_STEP: f32 = 0.1;
