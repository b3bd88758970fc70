use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use heightmap::{HeightMapFrame, HeightMapPlugin, HeightMapSet, HeightMapSettings};

const DEFAULT_FRAME_BUDGET: u64 = 600;
const STATS_INTERVAL: u64 = 60;

fn main() {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
        LogPlugin::default(),
        AssetPlugin::default(),
    ));

    // CPU-side assets only; nothing is uploaded to a GPU.
    app.init_asset::<Image>();
    app.init_asset::<Mesh>();

    app.insert_resource(FrameBudget(frame_budget_from_env()))
        .add_systems(PreStartup, load_settings_from_env)
        .add_plugins((HeightMapPlugin, rendering::RenderingPlugin))
        .add_systems(
            Update,
            (log_frame_stats, exit_after_budget)
                .chain()
                .after(HeightMapSet::Generate),
        );

    app.run();
}

/// Number of frames to run before exiting.
#[derive(Resource)]
struct FrameBudget(u64);

fn parse_frame_budget(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_FRAME_BUDGET)
}

fn frame_budget_from_env() -> u64 {
    parse_frame_budget(std::env::var("RIDGEMAP_FRAMES").ok().as_deref())
}

/// Replace the default settings with `RIDGEMAP_SETTINGS` when it points at a
/// valid JSON file. Errors are logged and the defaults kept.
fn load_settings_from_env(mut commands: Commands) {
    let Ok(path) = std::env::var("RIDGEMAP_SETTINGS") else {
        info!("RIDGEMAP_SETTINGS not set, using default settings");
        return;
    };
    match HeightMapSettings::load(&path) {
        Ok(settings) => {
            info!(
                "Loaded settings from {}: {}x{} grid, {} iterations, seed {}",
                path,
                settings.grid_width,
                settings.grid_height,
                settings.num_iterations,
                settings.seed
            );
            commands.insert_resource(settings);
        }
        Err(e) => {
            error!("Failed to load settings from {}: {}", path, e);
        }
    }
}

fn log_frame_stats(frame: Res<HeightMapFrame>) {
    if frame.index % STATS_INTERVAL != 0 || frame.height.is_empty() {
        return;
    }
    let mean = frame.height.values.iter().sum::<f32>() / frame.height.len() as f32;
    let (w, h) = frame.dimensions();
    info!(
        "frame {}: {}x{} counter={:.2} mean_height={:.3} warnings={}",
        frame.index,
        w,
        h,
        frame.counter,
        mean,
        frame.warnings.len()
    );
}

fn exit_after_budget(
    frame: Res<HeightMapFrame>,
    budget: Res<FrameBudget>,
    mut exit: EventWriter<AppExit>,
) {
    if frame.index + 1 >= budget.0 {
        info!("Frame budget of {} reached, exiting", budget.0);
        exit.send(AppExit::Success);
    }
}
