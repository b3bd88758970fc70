use bevy::prelude::*;

use heightmap::HeightMapSet;

pub mod height_textures;
pub mod terrain_meshes;

pub use height_textures::{color_image, height_image, HeightMapTextures};
pub use terrain_meshes::{build_bars_mesh, build_grid_mesh, ActiveTerrainMesh, TerrainMeshes};

/// CPU-side export of height-map frames as `Image` and `Mesh` assets.
///
/// Requires `Assets<Image>` and `Assets<Mesh>` to be registered (either by the
/// render plugins or via `init_asset` in headless apps) and `HeightMapPlugin`.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (
                height_textures::setup_height_textures,
                terrain_meshes::setup_terrain_meshes,
            ),
        )
        .add_systems(
            Update,
            (
                height_textures::upload_frame_textures,
                terrain_meshes::rebuild_terrain_meshes,
                terrain_meshes::select_terrain_mesh,
            )
                .after(HeightMapSet::Generate),
        );
    }
}
