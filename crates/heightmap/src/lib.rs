use bevy::prelude::*;

pub mod animation;
pub mod color_map;
pub mod config;
pub mod fields;
pub mod frame;
pub mod normalize;
pub mod ridge;
pub mod ridge_rng;
pub mod settings;
pub mod settings_error;
pub mod warnings;

#[cfg(test)]
mod test_harness;

pub use animation::{AnimationDriver, AnimationPhase, FrameInputs, ResetAnimation};
pub use color_map::{ActiveColorMap, ColorMap, ColorMapPreset, ControlPoint, ControlPointInsert};
pub use fields::{ColorField, HeightField};
pub use frame::{build_frame, HeightMapFrame};
pub use normalize::{normalize, normalized, Normalization};
pub use ridge::{generate, GeneratedField, RidgeLine, RidgeParams};
pub use settings::{HeightMapSettings, TerrainModel, TextureFilter};
pub use settings_error::SettingsError;
pub use warnings::HeightMapWarning;

// ---------------------------------------------------------------------------
// Update phases
// ---------------------------------------------------------------------------

/// Ordered phases of a height-map tick in the `Update` schedule.
///
/// Configured as a chain: `Input` → `Generate` → `Advance`. The frame is built
/// from the counter as it was at the start of the tick; the counter moves
/// afterwards. Consumers of `HeightMapFrame` should run `.after(HeightMapSet::Generate)`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeightMapSet {
    /// Reset / reseed requests.
    Input,
    /// Ridge accumulation, normalization and color mapping.
    Generate,
    /// Counter advance.
    Advance,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct HeightMapPlugin;

impl Plugin for HeightMapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeightMapSettings>()
            .init_resource::<AnimationDriver>()
            .init_resource::<ActiveColorMap>()
            .init_resource::<HeightMapFrame>()
            .add_event::<ResetAnimation>()
            .configure_sets(
                Update,
                (
                    HeightMapSet::Input,
                    HeightMapSet::Generate,
                    HeightMapSet::Advance,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    animation::apply_reset_events.in_set(HeightMapSet::Input),
                    frame::regenerate_frame.in_set(HeightMapSet::Generate),
                    animation::advance_animation.in_set(HeightMapSet::Advance),
                ),
            );
    }
}
