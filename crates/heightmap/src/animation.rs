//! Animation counter that drives ridge drift between frames.
//!
//! The counter lives in the `AnimationDriver` resource and is handed to
//! generation explicitly through `FrameInputs`; nothing reads it from a
//! global.

use bevy::prelude::*;

use crate::config::ANIMATION_STEP;
use crate::settings::HeightMapSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    /// Never ticked; counter is 0.
    #[default]
    Idle,
    /// Counter advances every tick.
    Running,
    /// Counter was just reset to 0; the next tick resumes `Running`.
    Reset,
}

/// Per-frame generation inputs taken from the driver and the settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub counter: f64,
    pub seed: u8,
    pub smoothness: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationDriver {
    /// Accumulated in `f64` so small steps still register after days of
    /// running.
    counter: f64,
    phase: AnimationPhase,
    ticks: u64,
}

impl AnimationDriver {
    pub fn counter(&self) -> f64 {
        self.counter
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Ticks since startup, including those before a reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance by `ANIMATION_STEP * speed`, with `speed` clamped to `[0, 1]`.
    pub fn tick(&mut self, speed: f32) {
        let speed = if speed.is_finite() {
            speed.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.counter += ANIMATION_STEP * f64::from(speed);
        self.phase = AnimationPhase::Running;
        self.ticks += 1;
    }

    #[cfg(test)]
    pub(crate) fn with_counter(counter: f64) -> Self {
        Self {
            counter,
            phase: AnimationPhase::Running,
            ticks: 0,
        }
    }

    pub fn reset(&mut self) {
        self.counter = 0.0;
        self.phase = AnimationPhase::Reset;
    }

    pub fn inputs(&self, settings: &HeightMapSettings) -> FrameInputs {
        FrameInputs {
            counter: self.counter,
            seed: settings.seed,
            smoothness: settings.smoothness,
        }
    }
}

/// Restart the animation, optionally switching to a new seed.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResetAnimation {
    pub seed: Option<u8>,
}

pub fn apply_reset_events(
    mut events: EventReader<ResetAnimation>,
    mut driver: ResMut<AnimationDriver>,
    mut settings: ResMut<HeightMapSettings>,
) {
    for event in events.read() {
        driver.reset();
        if let Some(seed) = event.seed {
            if settings.seed != seed {
                info!("Height map: reseeding {} -> {}", settings.seed, seed);
                settings.seed = seed;
            }
        }
    }
}

pub fn advance_animation(mut driver: ResMut<AnimationDriver>, settings: Res<HeightMapSettings>) {
    driver.tick(settings.animation_speed);
}
