//! Piecewise-linear color maps for height fields.
//!
//! A map is an ordered table of control points `(key, [r, g, b])` with
//! strictly increasing keys. Sampling interpolates each channel linearly
//! between the two bracketing keys and clamps outside the table. Built-in
//! presets are read-only: mutations are ignored with a warning so a running
//! animation is never interrupted.

use bevy::log::warn;
use bevy::prelude::Resource;

use crate::fields::{ColorField, HeightField};
use crate::warnings::{HeightMapWarning, RejectReason};

// ---------------------------------------------------------------------------
// Control points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub key: f32,
    pub color: [f32; 3],
}

/// Built-in read-only maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMapPreset {
    /// blue -> cyan -> green -> yellow -> red
    Classic,
}

impl ColorMapPreset {
    fn points(self) -> Vec<ControlPoint> {
        let table: &[(f32, [f32; 3])] = match self {
            ColorMapPreset::Classic => &[
                (0.00, [0.0, 0.0, 1.0]),
                (0.25, [0.0, 1.0, 1.0]),
                (0.50, [0.0, 1.0, 0.0]),
                (0.75, [1.0, 1.0, 0.0]),
                (1.00, [1.0, 0.0, 0.0]),
            ],
        };
        table
            .iter()
            .map(|&(key, color)| ControlPoint { key, color })
            .collect()
    }
}

/// Result of `ColorMap::add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPointInsert {
    Inserted,
    /// A point with the same key existed; its color was replaced.
    Replaced,
    /// The table is unchanged.
    Rejected(RejectReason),
}

// ---------------------------------------------------------------------------
// ColorMap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorMap {
    points: Vec<ControlPoint>,
    preset: Option<ColorMapPreset>,
}

impl ColorMap {
    /// Empty, mutable map.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(preset: ColorMapPreset) -> Self {
        Self {
            points: preset.points(),
            preset: Some(preset),
        }
    }

    pub fn classic() -> Self {
        Self::preset(ColorMapPreset::Classic)
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        self.preset.is_some()
    }

    pub fn preset_kind(&self) -> Option<ColorMapPreset> {
        self.preset
    }

    /// Insert a control point, keeping keys strictly increasing.
    ///
    /// Presets, non-finite keys and keys outside `[0, 1]` leave the table
    /// untouched and log an `InvalidColorMapMutation` warning.
    pub fn add(&mut self, key: f32, color: [f32; 3]) -> ControlPointInsert {
        let rejection = if self.is_read_only() {
            Some(RejectReason::ReadOnlyPreset)
        } else if !key.is_finite() {
            Some(RejectReason::NonFiniteKey)
        } else if !(0.0..=1.0).contains(&key) {
            Some(RejectReason::KeyOutOfRange)
        } else {
            None
        };

        if let Some(reason) = rejection {
            warn!(
                "ColorMap: {}",
                HeightMapWarning::InvalidColorMapMutation { key, reason }
            );
            return ControlPointInsert::Rejected(reason);
        }

        let idx = self.points.partition_point(|p| p.key < key);
        match self.points.get_mut(idx) {
            Some(existing) if existing.key == key => {
                existing.color = color;
                ControlPointInsert::Replaced
            }
            _ => {
                self.points.insert(idx, ControlPoint { key, color });
                ControlPointInsert::Inserted
            }
        }
    }

    /// Sample the map at `t`, clamped to the key range.
    ///
    /// Every channel of the result is clamped to `[0, 1]`. An empty map is
    /// black; NaN samples the lowest key.
    pub fn sample(&self, t: f32) -> [f32; 3] {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return [0.0; 3];
        };
        let color = if t.is_nan() || t <= first.key {
            first.color
        } else if t >= last.key {
            last.color
        } else {
            // first.key < t < last.key, so 1 <= hi <= len - 1
            let hi = self.points.partition_point(|p| p.key <= t);
            let a = self.points[hi - 1];
            let b = self.points[hi];
            let frac = (t - a.key) / (b.key - a.key);
            [
                a.color[0] + (b.color[0] - a.color[0]) * frac,
                a.color[1] + (b.color[1] - a.color[1]) * frac,
                a.color[2] + (b.color[2] - a.color[2]) * frac,
            ]
        };
        color.map(|c| c.clamp(0.0, 1.0))
    }

    /// Color every cell of `field`.
    pub fn map(&self, field: &HeightField) -> ColorField {
        ColorField {
            values: field.values.iter().map(|&v| self.sample(v)).collect(),
            width: field.width,
            height: field.height,
        }
    }
}

/// The color map applied to each frame.
#[derive(Resource, Debug, Clone)]
pub struct ActiveColorMap(pub ColorMap);

impl Default for ActiveColorMap {
    fn default() -> Self {
        Self(ColorMap::classic())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_control_colors() {
        let cmap = ColorMap::classic();
        assert_eq!(cmap.sample(0.0), [0.0, 0.0, 1.0]);
        assert_eq!(cmap.sample(0.25), [0.0, 1.0, 1.0]);
        assert_eq!(cmap.sample(0.5), [0.0, 1.0, 0.0]);
        assert_eq!(cmap.sample(0.75), [1.0, 1.0, 0.0]);
        assert_eq!(cmap.sample(1.0), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_classic_interpolates_between_keys() {
        let cmap = ColorMap::classic();
        let c = cmap.sample(0.125);
        assert_eq!(c[0], 0.0);
        assert!((c[1] - 0.5).abs() < 1e-6);
        assert_eq!(c[2], 1.0);
    }

    #[test]
    fn test_classic_channels_monotonic_per_segment() {
        let cmap = ColorMap::classic();
        for pair in cmap.points().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            for channel in 0..3 {
                let rising = b.color[channel] >= a.color[channel];
                let mut prev = cmap.sample(a.key)[channel];
                for i in 1..=20 {
                    let t = a.key + (b.key - a.key) * i as f32 / 20.0;
                    let c = cmap.sample(t)[channel];
                    if rising {
                        assert!(c >= prev, "channel {channel} fell at t={t}");
                    } else {
                        assert!(c <= prev, "channel {channel} rose at t={t}");
                    }
                    prev = c;
                }
            }
        }
        assert_eq!(cmap.points().len(), 5);
    }

    #[test]
    fn test_out_of_range_inputs_clamp() {
        let cmap = ColorMap::classic();
        assert_eq!(cmap.sample(-4.0), [0.0, 0.0, 1.0]);
        assert_eq!(cmap.sample(9.0), [1.0, 0.0, 0.0]);
        assert_eq!(cmap.sample(f32::NAN), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_channels_clamped_for_wild_colors() {
        let mut cmap = ColorMap::new();
        cmap.add(0.0, [-1.0, 2.0, 0.5]);
        cmap.add(1.0, [3.0, -2.0, 0.5]);
        for i in 0..=10 {
            for c in cmap.sample(i as f32 * 0.1) {
                assert!((0.0..=1.0).contains(&c), "channel {c} out of range");
            }
        }
    }

    #[test]
    fn test_classic_is_read_only() {
        let mut cmap = ColorMap::classic();
        let before = cmap.points().to_vec();
        let result = cmap.add(0.1, [1.0, 1.0, 1.0]);
        assert_eq!(
            result,
            ControlPointInsert::Rejected(RejectReason::ReadOnlyPreset)
        );
        assert_eq!(cmap.len(), 5);
        assert_eq!(cmap.points(), before.as_slice());
    }

    #[test]
    fn test_custom_map_keeps_keys_sorted() {
        let mut cmap = ColorMap::new();
        assert_eq!(cmap.add(1.0, [1.0, 1.0, 1.0]), ControlPointInsert::Inserted);
        assert_eq!(cmap.add(0.0, [0.0, 0.0, 0.0]), ControlPointInsert::Inserted);
        assert_eq!(cmap.add(0.5, [1.0, 0.0, 0.0]), ControlPointInsert::Inserted);
        assert_eq!(cmap.add(0.5, [0.0, 1.0, 0.0]), ControlPointInsert::Replaced);
        let keys: Vec<f32> = cmap.points().iter().map(|p| p.key).collect();
        assert_eq!(keys, vec![0.0, 0.5, 1.0]);
        assert_eq!(cmap.sample(0.5), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let mut cmap = ColorMap::new();
        assert_eq!(
            cmap.add(f32::NAN, [1.0; 3]),
            ControlPointInsert::Rejected(RejectReason::NonFiniteKey)
        );
        assert_eq!(
            cmap.add(1.5, [1.0; 3]),
            ControlPointInsert::Rejected(RejectReason::KeyOutOfRange)
        );
        assert!(cmap.is_empty());
    }

    #[test]
    fn test_empty_and_single_point_maps() {
        let mut cmap = ColorMap::new();
        assert_eq!(cmap.sample(0.3), [0.0; 3]);
        cmap.add(0.4, [0.2, 0.3, 0.4]);
        assert_eq!(cmap.sample(0.0), [0.2, 0.3, 0.4]);
        assert_eq!(cmap.sample(1.0), [0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_map_preserves_dimensions() {
        let field = HeightField {
            values: vec![0.0, 0.25, 0.5, 0.75, 1.0, 0.5],
            width: 3,
            height: 2,
        };
        let colors = ColorMap::classic().map(&field);
        assert_eq!(colors.dimensions(), (3, 2));
        assert_eq!(colors.get(1, 1), [1.0, 0.0, 0.0]);
    }
}
