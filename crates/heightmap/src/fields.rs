//! Row-major 2D grids exported to the renderer each frame.

/// Scalar height per cell. Values are unconstrained until normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    pub values: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl Default for HeightField {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl HeightField {
    /// Zero-filled field.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            values: vec![value; width * height],
            width,
            height,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, val: f32) {
        self.values[y * self.width + x] = val;
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest value, or `None` for an empty field.
    ///
    /// NaN cells propagate into the result so callers can detect them.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut iter = self.values.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| {
            if v.is_nan() || lo.is_nan() {
                (f32::NAN, f32::NAN)
            } else {
                (lo.min(v), hi.max(v))
            }
        }))
    }
}

/// RGB color per cell, each channel in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorField {
    pub values: Vec<[f32; 3]>,
    pub width: usize,
    pub height: usize,
}

impl Default for ColorField {
    fn default() -> Self {
        Self::filled(0, 0, [0.0; 3])
    }
}

impl ColorField {
    pub fn filled(width: usize, height: usize, color: [f32; 3]) -> Self {
        Self {
            values: vec![color; width * height],
            width,
            height,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.values[y * self.width + x]
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Flattened RGBA with alpha 1, in cell order.
    pub fn to_rgba(&self) -> Vec<[f32; 4]> {
        self.values
            .iter()
            .map(|&[r, g, b]| [r, g, b, 1.0])
            .collect()
    }
}
