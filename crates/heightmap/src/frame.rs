//! Per-tick frame export: ridge field -> normalized heights -> colors.

use bevy::prelude::*;

use crate::animation::AnimationDriver;
use crate::color_map::{ActiveColorMap, ColorMap};
use crate::config::DEGENERATE_FILL;
use crate::fields::{ColorField, HeightField};
use crate::normalize::{normalize, Normalization};
use crate::ridge::generate;
use crate::settings::HeightMapSettings;
use crate::warnings::HeightMapWarning;

/// The two arrays handed to the renderer each tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct HeightMapFrame {
    /// Normalized heights, or a constant 0.5 field when disabled/degenerate.
    pub height: HeightField,
    pub color: ColorField,
    /// Animation counter the frame was generated with.
    pub counter: f64,
    /// Number of frames produced before this one.
    pub index: u64,
    pub normalization: Option<Normalization>,
    /// Everything that was clamped or ignored while building this frame.
    pub warnings: Vec<HeightMapWarning>,
    /// `warnings` differs from the previous frame's. Warnings are only
    /// logged on these frames.
    pub warnings_changed: bool,
}

impl HeightMapFrame {
    pub fn dimensions(&self) -> (usize, usize) {
        self.height.dimensions()
    }
}

/// Build a frame from the current settings and animation state.
///
/// The color field is derived from the normalized heights before the texture
/// toggles are applied, so disabling the height texture does not flatten the
/// colors.
pub fn build_frame(
    settings: &HeightMapSettings,
    driver: &AnimationDriver,
    color_map: &ColorMap,
    index: u64,
) -> HeightMapFrame {
    let inputs = driver.inputs(settings);
    let generated = generate(&settings.ridge_params(inputs));
    let mut warnings = generated.warnings;
    let mut height = generated.field;

    let normalization = normalize(&mut height);
    warnings.extend(normalization.warning());

    let (width, rows) = height.dimensions();
    let color = if settings.color_texture_enabled {
        color_map.map(&height)
    } else {
        ColorField::filled(width, rows, [DEGENERATE_FILL; 3])
    };
    if !settings.height_texture_enabled {
        height = HeightField::filled(width, rows, DEGENERATE_FILL);
    }

    HeightMapFrame {
        height,
        color,
        counter: inputs.counter,
        index,
        normalization: Some(normalization),
        warnings,
        warnings_changed: false,
    }
}

pub fn regenerate_frame(
    settings: Res<HeightMapSettings>,
    driver: Res<AnimationDriver>,
    color_map: Res<ActiveColorMap>,
    mut frame: ResMut<HeightMapFrame>,
) {
    let index = if frame.normalization.is_some() {
        frame.index + 1
    } else {
        0
    };
    let mut next = build_frame(&settings, &driver, &color_map.0, index);

    next.warnings_changed = next.warnings != frame.warnings;
    if next.warnings_changed {
        for warning in &next.warnings {
            warn!("Height map frame {}: {}", index, warning);
        }
        if next.warnings.is_empty() {
            info!("Height map frame {}: warnings cleared", index);
        }
    }
    *frame = next;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings() -> HeightMapSettings {
        HeightMapSettings {
            grid_width: 8,
            grid_height: 4,
            num_iterations: 6,
            ..default()
        }
    }

    #[test]
    fn test_frame_fields_match_grid() {
        let frame = build_frame(
            &small_settings(),
            &AnimationDriver::default(),
            &ColorMap::classic(),
            0,
        );
        assert_eq!(frame.height.dimensions(), (8, 4));
        assert_eq!(frame.color.dimensions(), (8, 4));
        assert!(frame.warnings.is_empty());
        let (lo, hi) = frame.height.min_max().unwrap();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 1.0);
    }

    #[test]
    fn test_colors_follow_heights() {
        let cmap = ColorMap::classic();
        let frame = build_frame(&small_settings(), &AnimationDriver::default(), &cmap, 0);
        for (h, c) in frame.height.values.iter().zip(frame.color.values.iter()) {
            assert_eq!(cmap.sample(*h), *c);
        }
    }

    #[test]
    fn test_disabled_textures_are_constant() {
        let settings = HeightMapSettings {
            height_texture_enabled: false,
            color_texture_enabled: false,
            ..small_settings()
        };
        let frame = build_frame(&settings, &AnimationDriver::default(), &ColorMap::classic(), 0);
        assert!(frame.height.values.iter().all(|&v| v == DEGENERATE_FILL));
        assert!(frame
            .color
            .values
            .iter()
            .all(|&c| c == [DEGENERATE_FILL; 3]));
    }

    #[test]
    fn test_disabled_height_keeps_colors() {
        let settings = HeightMapSettings {
            height_texture_enabled: false,
            ..small_settings()
        };
        let frame = build_frame(&settings, &AnimationDriver::default(), &ColorMap::classic(), 0);
        let distinct = frame
            .color
            .values
            .iter()
            .any(|&c| c != frame.color.values[0]);
        assert!(distinct, "color field should still vary");
    }

    #[test]
    fn test_zero_iterations_reports_degenerate() {
        let settings = HeightMapSettings {
            num_iterations: 0,
            ..small_settings()
        };
        let frame = build_frame(&settings, &AnimationDriver::default(), &ColorMap::classic(), 3);
        assert_eq!(frame.normalization, Some(Normalization::Degenerate));
        assert_eq!(frame.index, 3);
        assert!(frame
            .warnings
            .contains(&HeightMapWarning::DegenerateField {
                value: DEGENERATE_FILL
            }));
    }
}
