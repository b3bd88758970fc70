use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use heightmap::{HeightMapSettings, TerrainModel};

/// Both terrain meshes for the current grid size. The height texture is
/// projected onto them; the vertices themselves stay flat.
#[derive(Resource, Debug, Clone)]
pub struct TerrainMeshes {
    pub grid: Handle<Mesh>,
    pub bars: Handle<Mesh>,
    pub grid_size: (usize, usize),
}

impl TerrainMeshes {
    /// Handle of the mesh selected by `model`.
    pub fn active(&self, model: TerrainModel) -> &Handle<Mesh> {
        match model {
            TerrainModel::Grid => &self.grid,
            TerrainModel::Bars => &self.bars,
        }
    }
}

fn finish_mesh(
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
) -> Mesh {
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

/// Connected grid of `(w+1) x (h+1)` vertices over the unit square on the
/// XZ plane. UV equals the planar position, so texel `(i, j)` lands on cell
/// `(i, j)`.
pub fn build_grid_mesh(w: usize, h: usize) -> Mesh {
    let (w, h) = (w.max(1), h.max(1));
    let vertex_count = (w + 1) * (h + 1);
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for j in 0..=h {
        for i in 0..=w {
            let u = i as f32 / w as f32;
            let v = j as f32 / h as f32;
            positions.push([u, 0.0, v]);
            normals.push([0.0, 1.0, 0.0]);
            uvs.push([u, v]);
        }
    }

    let stride = (w + 1) as u32;
    let mut indices = Vec::with_capacity(6 * w * h);
    for j in 0..h as u32 {
        for i in 0..w as u32 {
            let tl = j * stride + i;
            let tr = tl + 1;
            let bl = tl + stride;
            let br = bl + 1;
            // Counter-clockwise seen from +Y.
            indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
        }
    }

    finish_mesh(positions, normals, uvs, indices)
}

/// Axis-aligned unit-height box faces: (normal, four corners in CCW order as
/// seen from outside). Corners are in cell-local `[0,1]^3` coordinates.
const BOX_FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // top
    (
        [0.0, 1.0, 0.0],
        [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
    ),
    // bottom
    (
        [0.0, -1.0, 0.0],
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
    ),
    // +X
    (
        [1.0, 0.0, 0.0],
        [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
    ),
    // -X
    (
        [-1.0, 0.0, 0.0],
        [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
    ),
    // +Z
    (
        [0.0, 0.0, 1.0],
        [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
    ),
    // -Z
    (
        [0.0, 0.0, -1.0],
        [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
    ),
];

/// One separate box per cell with unit height. Every vertex of a pillar uses
/// the UV of its cell centre so the whole pillar samples a single texel.
pub fn build_bars_mesh(w: usize, h: usize) -> Mesh {
    let (w, h) = (w.max(1), h.max(1));
    let cells = w * h;
    let mut positions = Vec::with_capacity(cells * 24);
    let mut normals = Vec::with_capacity(cells * 24);
    let mut uvs = Vec::with_capacity(cells * 24);
    let mut indices = Vec::with_capacity(cells * 36);

    let (sx, sz) = (1.0 / w as f32, 1.0 / h as f32);
    for j in 0..h {
        for i in 0..w {
            let x0 = i as f32 * sx;
            let z0 = j as f32 * sz;
            let uv = [x0 + 0.5 * sx, z0 + 0.5 * sz];

            for (normal, corners) in BOX_FACES {
                let base = positions.len() as u32;
                for c in corners {
                    positions.push([x0 + c[0] * sx, c[1], z0 + c[2] * sz]);
                    normals.push(normal);
                    uvs.push(uv);
                }
                indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            }
        }
    }

    finish_mesh(positions, normals, uvs, indices)
}

/// The mesh a host should draw, chosen by `HeightMapSettings::model`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ActiveTerrainMesh {
    pub model: TerrainModel,
    pub mesh: Handle<Mesh>,
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub fn setup_terrain_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    settings: Res<HeightMapSettings>,
) {
    let (w, h) = settings.grid_size();
    let terrain = TerrainMeshes {
        grid: meshes.add(build_grid_mesh(w, h)),
        bars: meshes.add(build_bars_mesh(w, h)),
        grid_size: (w, h),
    };
    commands.insert_resource(ActiveTerrainMesh {
        model: settings.model,
        mesh: terrain.active(settings.model).clone(),
    });
    commands.insert_resource(terrain);
}

/// Follow `settings.model` when it changes.
pub fn select_terrain_mesh(
    settings: Res<HeightMapSettings>,
    terrain: Option<Res<TerrainMeshes>>,
    active: Option<ResMut<ActiveTerrainMesh>>,
) {
    let (Some(terrain), Some(mut active)) = (terrain, active) else {
        return;
    };
    if active.model == settings.model {
        return;
    }
    info!("Terrain model {:?} -> {:?}", active.model, settings.model);
    active.model = settings.model;
    active.mesh = terrain.active(settings.model).clone();
}

/// Rebuild both meshes when the exported grid size differs from the one
/// they were built for.
pub fn rebuild_terrain_meshes(
    frame: Res<heightmap::HeightMapFrame>,
    terrain: Option<ResMut<TerrainMeshes>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(mut terrain) = terrain else {
        return;
    };
    let size = frame.dimensions();
    if size == (0, 0) || size == terrain.grid_size {
        return;
    }

    let (w, h) = size;
    if let Some(mesh) = meshes.get_mut(&terrain.grid) {
        *mesh = build_grid_mesh(w, h);
    }
    if let Some(mesh) = meshes.get_mut(&terrain.bars) {
        *mesh = build_bars_mesh(w, h);
    }
    terrain.grid_size = size;
    info!("Terrain meshes rebuilt for {}x{} grid", w, h);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    fn uvs(mesh: &Mesh) -> Vec<[f32; 2]> {
        match mesh.attribute(Mesh::ATTRIBUTE_UV_0) {
            Some(VertexAttributeValues::Float32x2(v)) => v.clone(),
            other => panic!("unexpected uv attribute: {other:?}"),
        }
    }

    #[test]
    fn test_grid_mesh_counts() {
        let mesh = build_grid_mesh(4, 3);
        assert_eq!(mesh.count_vertices(), 5 * 4);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(6 * 4 * 3));
    }

    #[test]
    fn test_grid_mesh_uv_spans_unit_square() {
        let uv = uvs(&build_grid_mesh(2, 2));
        assert_eq!(uv.first(), Some(&[0.0, 0.0]));
        assert_eq!(uv.last(), Some(&[1.0, 1.0]));
    }

    #[test]
    fn test_bars_mesh_counts() {
        let mesh = build_bars_mesh(3, 2);
        assert_eq!(mesh.count_vertices(), 24 * 6);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(36 * 6));
    }

    #[test]
    fn test_bars_share_cell_centre_uv() {
        let uv = uvs(&build_bars_mesh(2, 1));
        assert!(uv[..24].iter().all(|&p| p == [0.25, 0.5]));
        assert!(uv[24..].iter().all(|&p| p == [0.75, 0.5]));
    }

    #[test]
    fn test_indices_in_bounds() {
        for mesh in [build_grid_mesh(5, 7), build_bars_mesh(5, 7)] {
            let n = mesh.count_vertices();
            let indices = mesh.indices().expect("indexed mesh");
            assert!(indices.iter().all(|i| i < n));
        }
    }

    #[test]
    fn test_active_mesh_follows_model() {
        let terrain = TerrainMeshes {
            grid: Handle::default(),
            bars: Handle::weak_from_u128(7),
            grid_size: (1, 1),
        };
        assert_eq!(terrain.active(TerrainModel::Grid), &terrain.grid);
        assert_eq!(terrain.active(TerrainModel::Bars), &terrain.bars);
    }
}
