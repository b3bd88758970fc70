//! # TestHeightMap: headless harness for height-map integration tests
//!
//! Wraps `bevy::app::App` + `HeightMapPlugin` so tests can run whole ticks
//! without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::animation::{AnimationDriver, ResetAnimation};
use crate::color_map::{ActiveColorMap, ColorMap};
use crate::frame::HeightMapFrame;
use crate::settings::HeightMapSettings;
use crate::HeightMapPlugin;

/// A headless Bevy App running `HeightMapPlugin`.
///
/// Use builder methods to set up the configuration, then call `tick()` to run
/// frames and assert on the exported `HeightMapFrame`.
pub struct TestHeightMap {
    app: App,
}

impl Default for TestHeightMap {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHeightMap {
    /// Default settings (48x48 grid, classic color map); no frame produced yet.
    pub fn new() -> Self {
        Self::with_settings(HeightMapSettings::default())
    }

    pub fn with_settings(settings: HeightMapSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(settings);
        app.add_plugins(HeightMapPlugin);
        Self { app }
    }

    /// Replace the active color map.
    pub fn with_color_map(mut self, color_map: ColorMap) -> Self {
        self.app.insert_resource(ActiveColorMap(color_map));
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Run `n` frames.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Queue a reset for the next tick.
    pub fn reset(&mut self, seed: Option<u8>) {
        self.app.world_mut().send_event(ResetAnimation { seed });
    }

    /// Change settings between ticks.
    pub fn update_settings(&mut self, f: impl FnOnce(&mut HeightMapSettings)) {
        let mut settings = self.app.world_mut().resource_mut::<HeightMapSettings>();
        f(&mut *settings);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn frame(&self) -> &HeightMapFrame {
        self.app.world().resource::<HeightMapFrame>()
    }

    pub fn driver(&self) -> &AnimationDriver {
        self.app.world().resource::<AnimationDriver>()
    }

    pub fn settings(&self) -> &HeightMapSettings {
        self.app.world().resource::<HeightMapSettings>()
    }
}
